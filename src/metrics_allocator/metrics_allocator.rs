//! See [super].

use std::{
    alloc::{GlobalAlloc, Layout, System},
    fmt::{Display, Formatter},
    sync::atomic::{AtomicUsize, Ordering},
};


/// Counting wrapper around [System]. All counters are process-wide.
pub struct MetricsAllocator {
    allocations_count:   AtomicUsize,
    deallocations_count: AtomicUsize,
    reallocations_count: AtomicUsize,
    allocated_bytes:     AtomicUsize,
    deallocated_bytes:   AtomicUsize,
    current_used_memory: AtomicUsize,
}

impl MetricsAllocator {

    pub const fn new() -> Self {
        Self {
            allocations_count:   AtomicUsize::new(0),
            deallocations_count: AtomicUsize::new(0),
            reallocations_count: AtomicUsize::new(0),
            allocated_bytes:     AtomicUsize::new(0),
            deallocated_bytes:   AtomicUsize::new(0),
            current_used_memory: AtomicUsize::new(0),
        }
    }

    /// heap bytes currently in use by the whole process
    pub fn current_used_memory(&self) -> usize {
        self.current_used_memory.load(Ordering::Relaxed)
    }

    /// Snapshots the current metrics, so they may be later compared with [Self::delta_statistics()]
    pub fn save_point(&self) -> AllocatorSavePoint {
        AllocatorSavePoint { metrics: self.current_metrics() }
    }

    /// Returns the metrics accumulated since `save_point` was taken.\
    /// `current_used_memory` is the absolute value -- compare it with `save_point.metrics.current_used_memory`
    /// to know if memory was allocated or freed in between
    pub fn delta_statistics(&self, save_point: &AllocatorSavePoint) -> AllocatorMetrics {
        let now = self.current_metrics();
        AllocatorMetrics {
            allocations_count:   now.allocations_count   - save_point.metrics.allocations_count,
            deallocations_count: now.deallocations_count - save_point.metrics.deallocations_count,
            reallocations_count: now.reallocations_count - save_point.metrics.reallocations_count,
            allocated_bytes:     now.allocated_bytes     - save_point.metrics.allocated_bytes,
            deallocated_bytes:   now.deallocated_bytes   - save_point.metrics.deallocated_bytes,
            current_used_memory: now.current_used_memory,
        }
    }

    fn current_metrics(&self) -> AllocatorMetrics {
        AllocatorMetrics {
            allocations_count:   self.allocations_count.load(Ordering::Relaxed),
            deallocations_count: self.deallocations_count.load(Ordering::Relaxed),
            reallocations_count: self.reallocations_count.load(Ordering::Relaxed),
            allocated_bytes:     self.allocated_bytes.load(Ordering::Relaxed),
            deallocated_bytes:   self.deallocated_bytes.load(Ordering::Relaxed),
            current_used_memory: self.current_used_memory.load(Ordering::Relaxed),
        }
    }

    #[inline(always)]
    fn account_allocation(&self, size: usize) {
        self.allocations_count.fetch_add(1, Ordering::Relaxed);
        self.allocated_bytes.fetch_add(size, Ordering::Relaxed);
        self.current_used_memory.fetch_add(size, Ordering::Relaxed);
    }

    #[inline(always)]
    fn account_deallocation(&self, size: usize) {
        self.deallocations_count.fetch_add(1, Ordering::Relaxed);
        self.deallocated_bytes.fetch_add(size, Ordering::Relaxed);
        self.current_used_memory.fetch_sub(size, Ordering::Relaxed);
    }
}

impl Default for MetricsAllocator {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for MetricsAllocator {

    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            self.account_allocation(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        self.account_deallocation(layout.size());
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            self.account_allocation(layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            // accounted as freeing the old block & allocating the new one, without bumping the (de)allocation counts
            self.reallocations_count.fetch_add(1, Ordering::Relaxed);
            self.deallocated_bytes.fetch_add(layout.size(), Ordering::Relaxed);
            self.allocated_bytes.fetch_add(new_size, Ordering::Relaxed);
            if new_size >= layout.size() {
                self.current_used_memory.fetch_add(new_size - layout.size(), Ordering::Relaxed);
            } else {
                self.current_used_memory.fetch_sub(layout.size() - new_size, Ordering::Relaxed);
            }
        }
        new_ptr
    }
}

/// Metrics snapshot, returned by [MetricsAllocator::save_point()]
#[derive(Debug, Clone, Copy)]
pub struct AllocatorSavePoint {
    pub metrics: AllocatorMetrics,
}

/// Allocation metrics -- either absolute (in a [AllocatorSavePoint]) or relative to one (from [MetricsAllocator::delta_statistics()])
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocatorMetrics {
    pub allocations_count:   usize,
    pub deallocations_count: usize,
    pub reallocations_count: usize,
    pub allocated_bytes:     usize,
    pub deallocated_bytes:   usize,
    pub current_used_memory: usize,
}

impl Display for AllocatorMetrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{allocations: {}, deallocations: {}, reallocations: {}, allocated: {}b, deallocated: {}b, in use: {}b}}",
               self.allocations_count, self.deallocations_count, self.reallocations_count,
               self.allocated_bytes, self.deallocated_bytes, self.current_used_memory)
    }
}

//! Global allocator (wrapper around the System's default allocator) capable of gathering allocation/de-allocation/re-allocation metrics
//! -- most notably, the number of heap bytes currently in use, the ABSOLUTE metric behind space complexity analysis.
//!
//! Activate it with:
//! ```ignore
//!     use big_o_fit::metrics_allocator::MetricsAllocator;
//!     #[global_allocator]
//!     static ALLOC: MetricsAllocator = MetricsAllocator::new();
//! ```
//! (this crate already does that in [crate::features::ALLOC], unless the `no_allocator_metrics` feature is used)
//!
//! Usage example:
//! ```rust
//!     use big_o_fit::ALLOC;
//!     let save_point = ALLOC.save_point();
//!     let _vec = Vec::<u32>::with_capacity(1024);
//!     let metrics = ALLOC.delta_statistics(&save_point);
//!     println!("Allocator Metrics for the Vec allocation: {}", metrics);
//! ```

mod metrics_allocator;
pub use metrics_allocator::*;

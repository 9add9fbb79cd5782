//! The capability interface a collection must expose to have its operations analysed,
//! together with the canned add / remove / search scenarios driving it.

use crate::{
    api::{builder::ComplexityAnalyzerBuilder, types::ComplexityAnalysisConfig},
    error::{BigOError, ElementNotFound},
    low_level_analysis::types::ComplexityAnalysis,
};
use std::{
    cell::RefCell,
    collections::{BTreeSet, HashSet, LinkedList, VecDeque},
    fmt::{Display, Formatter},
    hash::Hash,
    hint::black_box,
};
use rand::{rngs::StdRng, Rng, SeedableRng};


/// The operations the canned scenarios need from a collection under analysis
pub trait BigOCollection {
    type Element;

    fn add(&mut self, element: Self::Element);

    /// Removes whatever element the collection gives away first -- the top of a stack, the head of a queue, ...
    fn remove_next(&mut self) -> Option<Self::Element>;

    fn search(&self, element: &Self::Element) -> Result<&Self::Element, ElementNotFound>;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item=&'a Self::Element> + 'a>;
}

/// as a stack
impl<T: PartialEq> BigOCollection for Vec<T> {
    type Element = T;
    fn add(&mut self, element: T) {
        Vec::push(self, element)
    }
    fn remove_next(&mut self) -> Option<T> {
        Vec::pop(self)
    }
    fn search(&self, element: &T) -> Result<&T, ElementNotFound> {
        self.as_slice().iter().find(|candidate| *candidate == element).ok_or(ElementNotFound)
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
    fn len(&self) -> usize {
        Vec::len(self)
    }
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item=&'a T> + 'a> {
        Box::new(self.as_slice().iter())
    }
}

/// as a queue
impl<T: PartialEq> BigOCollection for VecDeque<T> {
    type Element = T;
    fn add(&mut self, element: T) {
        VecDeque::push_back(self, element)
    }
    fn remove_next(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }
    fn search(&self, element: &T) -> Result<&T, ElementNotFound> {
        VecDeque::iter(self).find(|candidate| *candidate == element).ok_or(ElementNotFound)
    }
    fn clear(&mut self) {
        VecDeque::clear(self)
    }
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item=&'a T> + 'a> {
        Box::new(VecDeque::iter(self))
    }
}

/// as a queue
impl<T: PartialEq> BigOCollection for LinkedList<T> {
    type Element = T;
    fn add(&mut self, element: T) {
        LinkedList::push_back(self, element)
    }
    fn remove_next(&mut self) -> Option<T> {
        LinkedList::pop_front(self)
    }
    fn search(&self, element: &T) -> Result<&T, ElementNotFound> {
        LinkedList::iter(self).find(|candidate| *candidate == element).ok_or(ElementNotFound)
    }
    fn clear(&mut self) {
        LinkedList::clear(self)
    }
    fn len(&self) -> usize {
        LinkedList::len(self)
    }
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item=&'a T> + 'a> {
        Box::new(LinkedList::iter(self))
    }
}

/// `remove_next()` removes an arbitrary element
impl<T: Eq + Hash + Clone> BigOCollection for HashSet<T> {
    type Element = T;
    fn add(&mut self, element: T) {
        HashSet::insert(self, element);
    }
    fn remove_next(&mut self) -> Option<T> {
        let next = HashSet::iter(self).next()?.clone();
        HashSet::take(self, &next)
    }
    fn search(&self, element: &T) -> Result<&T, ElementNotFound> {
        HashSet::get(self, element).ok_or(ElementNotFound)
    }
    fn clear(&mut self) {
        HashSet::clear(self)
    }
    fn len(&self) -> usize {
        HashSet::len(self)
    }
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item=&'a T> + 'a> {
        Box::new(HashSet::iter(self))
    }
}

/// `remove_next()` removes the smallest element
impl<T: Ord> BigOCollection for BTreeSet<T> {
    type Element = T;
    fn add(&mut self, element: T) {
        BTreeSet::insert(self, element);
    }
    fn remove_next(&mut self) -> Option<T> {
        BTreeSet::pop_first(self)
    }
    fn search(&self, element: &T) -> Result<&T, ElementNotFound> {
        BTreeSet::get(self, element).ok_or(ElementNotFound)
    }
    fn clear(&mut self) {
        BTreeSet::clear(self)
    }
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item=&'a T> + 'a> {
        Box::new(BTreeSet::iter(self))
    }
}

/// The collection operation analysed by [analyse_collection_complexity()]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CollectionOperation {
    /// each run adds a random element
    Add,
    /// each run adds 2 elements (unmeasured) and then removes one -- so the collection grows by 1 on each run
    Remove,
    /// each run adds an element (unmeasured) and then searches for one of the elements added so far
    Search,
}
impl Display for CollectionOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Add    => "add",
            Self::Remove => "remove",
            Self::Search => "search",
        })
    }
}

/// What [analyse_collection_complexity()] measures
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CollectionMetric {
    Time,
    Space,
}

/// Analyses the time or space complexity of one of the `collection`'s operations, as it grows from empty up to `run_count` elements.\
/// `collection` is cleared at the start of each test pass.
pub fn analyse_collection_complexity<C: BigOCollection<Element=u64>>
                                    (collection_name: &str,
                                     collection:      &mut C,
                                     operation:       CollectionOperation,
                                     metric:          CollectionMetric,
                                     run_count:       u32,
                                     test_count:      u32)
                                    -> Result<ComplexityAnalysis, BigOError> {
    let collection = RefCell::new(collection);
    let rng = RefCell::new(StdRng::from_entropy());
    // one element per run, including the priming one
    let elements: Vec<u64> = {
        let mut rng = rng.borrow_mut();
        (0..=run_count).map(|_| rng.gen()).collect()
    };
    let builder = ComplexityAnalyzerBuilder::new(format!("{} {}", collection_name, operation))
        .with_run_count(run_count)
        .with_test_count(test_count)
        .init_test(|_test| collection.borrow_mut().clear());
    let builder = match metric {
        CollectionMetric::Time  => builder.with_time_metric(),
        CollectionMetric::Space => builder.with_space_metric(),
    };
    let config: ComplexityAnalysisConfig = match operation {
        CollectionOperation::Add => builder
            .op(|_run| {
                let element = rng.borrow_mut().gen();
                collection.borrow_mut().add(element)
            })
            .build()?,
        CollectionOperation::Remove => builder
            .init_op(|_run| {
                let (first, second) = { let mut rng = rng.borrow_mut(); (rng.gen(), rng.gen()) };
                let mut collection = collection.borrow_mut();
                collection.add(first);
                collection.add(second);
            })
            .try_op(|_run| {
                black_box(collection.borrow_mut().remove_next().ok_or(ElementNotFound)?);
                Ok(())
            })
            .build()?,
        CollectionOperation::Search => builder
            .init_op(|run| collection.borrow_mut().add(elements[run as usize]))
            .try_op(|run| {
                let index = rng.borrow_mut().gen_range(0..=run as usize);
                black_box(collection.borrow().search(&elements[index])?);
                Ok(())
            })
            .build()?,
    };
    config.run()
}


#[cfg(test)]
mod tests {

    //! Unit tests for the [collection](super) module: the [BigOCollection] implementations

    use super::*;

    /// exercises every operation of `collection`, which must start empty
    fn exercise<C: BigOCollection<Element=u64>>(mut collection: C) {
        assert!(collection.is_empty());
        for element in [30, 10, 20] {
            collection.add(element);
        }
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.search(&20), Ok(&20));
        assert_eq!(collection.search(&99), Err(ElementNotFound));
        let mut elements: Vec<u64> = collection.iter().copied().collect();
        elements.sort();
        assert_eq!(elements, vec![10, 20, 30], "iteration should visit all elements");
        let removed = collection.remove_next().expect("a non-empty collection should give an element away");
        assert!([10, 20, 30].contains(&removed));
        assert_eq!(collection.search(&removed), Err(ElementNotFound), "removed elements should not be found");
        assert_eq!(collection.len(), 2);
        collection.clear();
        assert!(collection.is_empty());
        assert_eq!(collection.remove_next(), None);
    }

    #[test]
    fn all_implementations() {
        exercise(Vec::new());
        exercise(VecDeque::new());
        exercise(LinkedList::new());
        exercise(HashSet::new());
        exercise(BTreeSet::new());
    }

    #[test]
    fn removal_order() {
        let mut stack = vec![1_u64, 2, 3];
        assert_eq!(stack.remove_next(), Some(3), "Vec is a stack");
        let mut queue: VecDeque<u64> = [1, 2, 3].into();
        assert_eq!(queue.remove_next(), Some(1), "VecDeque is a queue");
        let mut list: LinkedList<u64> = [1, 2, 3].into();
        assert_eq!(list.remove_next(), Some(1), "LinkedList is a queue");
        let mut tree: BTreeSet<u64> = [3, 1, 2].into();
        assert_eq!(tree.remove_next(), Some(1), "BTreeSet gives its smallest element away");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{} {} {}", CollectionOperation::Add, CollectionOperation::Remove, CollectionOperation::Search), "add remove search");
    }
}

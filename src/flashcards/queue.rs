//! Ternary min-heap used to order flashcards by due date
//!
//! Each node has up to three children. With the root at index 0, the
//! children of node `i` sit at `3i + 1`, `3i + 2` and `3i + 3`, and the
//! parent of node `i` at `(i - 1) / 3`. The smallest element under `Ord`
//! is always at the root.

use super::models::{Flashcard, FlashcardError, Result};

/// Usable slots in a freshly created heap
pub const DEFAULT_CAPACITY: usize = 5;

/// Factor applied to the capacity when an insert would overflow it
const GROWTH_FACTOR: usize = 3;

const ARITY: usize = 3;

/// Priority queue of flashcards, earliest due date first
pub type FlashcardQueue = TernaryHeap<Flashcard>;

/// A min-heap with a branching factor of three, backed by a `Vec`.
///
/// Elements that compare equal come out in an unspecified order.
#[derive(Debug, Clone)]
pub struct TernaryHeap<T> {
    data: Vec<T>,
    /// Logical capacity. Tracked separately from the `Vec` so growth follows
    /// a fixed 3x schedule regardless of what the allocator hands back.
    capacity: usize,
}

impl<T: Ord> TernaryHeap<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of elements the heap holds before it grows again
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add an element, growing storage first if the heap is full
    pub fn insert(&mut self, item: T) {
        self.ensure_capacity();
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// The smallest element, or `None` when the heap is empty
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Remove and return the smallest element, or `None` when the heap is empty
    pub fn extract_min(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }

        // Move the last leaf into the root slot and push it back down
        let min = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Consume the heap, returning its elements in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Some(item) = self.extract_min() {
            sorted.push(item);
        }
        sorted
    }

    /// Unordered view of the live elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    fn ensure_capacity(&mut self) {
        if self.data.len() >= self.capacity {
            let new_capacity = self.capacity * GROWTH_FACTOR;
            self.data.reserve_exact(new_capacity - self.data.len());
            log::debug!("Ternary heap grew from {} to {} slots", self.capacity, new_capacity);
            self.capacity = new_capacity;
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / ARITY;
            if self.data[index] >= self.data[parent] {
                break;
            }
            self.data.swap(index, parent);
            index = parent;
        }
    }

    /// Move the element at `index` down past its smallest child until the
    /// heap order holds below it
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let first_child = ARITY * index + 1;
            if first_child >= len {
                break;
            }

            let last_child = (first_child + ARITY).min(len);
            let mut smallest = first_child;
            for child in first_child + 1..last_child {
                if self.data[child] < self.data[smallest] {
                    smallest = child;
                }
            }

            if self.data[index] <= self.data[smallest] {
                break;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }
}

impl FlashcardQueue {
    /// Like [`TernaryHeap::peek`], but an empty queue is an error
    pub fn try_peek(&self) -> Result<&Flashcard> {
        self.peek().ok_or(FlashcardError::EmptyQueue)
    }

    /// Like [`TernaryHeap::extract_min`], but an empty queue is an error
    pub fn try_extract_min(&mut self) -> Result<Flashcard> {
        self.extract_min().ok_or(FlashcardError::EmptyQueue)
    }
}

impl<T: Ord> Default for TernaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for TernaryHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for TernaryHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

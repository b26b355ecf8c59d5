//! FIFO work queue of candidate bins still eligible for splitting

use std::collections::VecDeque;

/// Inclusive index range `[start, stop]` into a crosstab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub start: usize,
    pub stop: usize,
}

impl WorkItem {
    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(stop >= start, "work item range is reversed");
        Self { start, stop }
    }

    /// Number of crosstab rows covered by the range
    pub fn row_count(&self) -> usize {
        self.stop - self.start + 1
    }

    /// Split after row `index`: `[start, index]` and `[index + 1, stop]`
    pub fn split_at(&self, index: usize) -> (WorkItem, WorkItem) {
        (
            WorkItem::new(self.start, index),
            WorkItem::new(index + 1, self.stop),
        )
    }
}

/// Pending ranges, processed strictly in arrival order
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: VecDeque<WorkItem>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, item: WorkItem) {
        self.items.push_back(item);
    }

    /// Take the oldest pending range, or `None` when the queue is empty
    pub fn dequeue(&mut self) -> Option<WorkItem> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

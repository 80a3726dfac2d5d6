//! Array-backed min-heap used once per tree build.

use crate::config::SiftRule;

#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
    rule: SiftRule,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self::with_rule(SiftRule::default())
    }

    pub fn with_rule(rule: SiftRule) -> Self {
        MinHeap {
            elements: Vec::new(),
            rule,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
        self.sift_up(self.elements.len() - 1);
    }

    /// Removes the minimum, or `None` once the heap is drained.
    pub fn pop(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let min = self.elements.pop();
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        min
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.elements[parent] > self.elements[i] {
                self.elements.swap(parent, i);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut target = i;

            // Right is compared against whichever of parent/left is winning so far.
            match self.rule {
                SiftRule::Reference => {
                    if l < n && self.elements[l] <= self.elements[target] {
                        target = l;
                    }
                }
                SiftRule::SmallestChild => {
                    if l < n && self.elements[l] < self.elements[target] {
                        target = l;
                    }
                }
            }
            if r < n && self.elements[r] < self.elements[target] {
                target = r;
            }

            if target == i {
                break;
            }
            self.elements.swap(i, target);
            i = target;
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! Bounded rolling windows of samples for the charts.

use std::collections::VecDeque;

/// Samples kept per chart.
pub const WINDOW_CAPACITY: usize = 30;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Oldest-first sequence of at most `cap` samples.
///
/// Updates go through [`Window::appended`], which leaves `self` untouched and
/// returns the next window, so the window being drawn is never the one being
/// modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Window<T> {
    samples: VecDeque<T>,
    cap: usize,
}

impl<T: Clone> Window<T> {
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(cap),
            cap: cap.max(1),
        }
    }

    /// Previous window plus `sample`, dropping the oldest entry when full.
    pub fn appended(&self, sample: T) -> Self {
        let mut samples = self.samples.clone();
        push_capped(&mut samples, sample, self.cap);
        Self {
            samples,
            cap: self.cap,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.samples.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.samples.get(idx)
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }
}

impl<T: Clone> Default for Window<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! Recorded signals and their conversion into plot data

mod adapter;

pub use adapter::{IntoValues, PathPlot};

use std::collections::VecDeque;

/// Default maximum number of rows kept in a [`TimeTable`]
pub const DEFAULT_HISTORY_LEN: usize = 1000;

/// Bounded table of samples sharing one time axis.
///
/// Once full, pushing a row drops the oldest one.
#[derive(Debug, Clone)]
pub struct TimeTable<T> {
    time: VecDeque<T>,
    columns: Vec<VecDeque<T>>,
    max_len: usize,
}

impl<T: Copy> TimeTable<T> {
    pub fn new(columns: usize, max_len: usize) -> Self {
        Self {
            time: VecDeque::with_capacity(max_len),
            columns: vec![VecDeque::with_capacity(max_len); columns],
            max_len,
        }
    }

    pub fn with_default_len(columns: usize) -> Self {
        Self::new(columns, DEFAULT_HISTORY_LEN)
    }

    /// Append one row. Values beyond the column count are ignored, missing
    /// values leave the row out entirely.
    pub fn push(&mut self, time: T, values: &[T]) {
        if values.len() < self.columns.len() {
            tracing::warn!(
                expected = self.columns.len(),
                got = values.len(),
                "dropping incomplete row"
            );
            return;
        }
        self.time.push_back(time);
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.push_back(*value);
        }
        if self.time.len() > self.max_len {
            self.time.pop_front();
            self.columns.iter_mut().for_each(|c| {
                c.pop_front();
            });
        }
    }

    /// `(time, value)` pairs of `column`, or `None` if there is no such column
    pub fn zipped_iter(&self, column: usize) -> Option<impl Iterator<Item = (&T, &T)>> {
        self.columns
            .get(column)
            .map(|values| self.time.iter().zip(values.iter()))
    }

    pub fn clear(&mut self) {
        self.time.clear();
        self.columns.iter_mut().for_each(VecDeque::clear);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

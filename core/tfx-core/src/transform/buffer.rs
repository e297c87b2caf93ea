//! Reusable output buffer

use crate::config::{BufferGrowth, EvaluatorConfig};
use tracing::trace;

/// 재사용 출력 버퍼: 증가만 하고 축소하지 않음
///
/// Only the first `n` entries written by the latest call are meaningful.
/// Everything past that is left over from earlier batches.
#[derive(Debug)]
pub struct ValuesBuffer {
    values: Vec<f64>,
    growth: BufferGrowth,
    initial_capacity: usize,
}

impl ValuesBuffer {
    /// No memory is allocated until the first call to [`ValuesBuffer::prepare`].
    pub fn new(config: &EvaluatorConfig) -> Self {
        Self {
            values: Vec::new(),
            growth: config.growth,
            initial_capacity: config.initial_buffer_capacity,
        }
    }

    /// Number of slots currently backed by memory.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Make room for `rows` values and return the writable prefix.
    pub fn prepare(&mut self, rows: usize) -> &mut [f64] {
        if self.values.len() < rows {
            let target = self.growth.target_capacity(rows, self.initial_capacity);
            trace!(from = self.values.len(), to = target, "growing values buffer");
            self.values.resize(target, 0.0);
        }
        &mut self.values[..rows]
    }

    /// The first `rows` values.
    pub fn valid(&self, rows: usize) -> &[f64] {
        &self.values[..rows]
    }
}

//! Row Batch: the window of rows evaluated together

use crate::error::{TfxError, TfxResult};
use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;

/// 행 배치: RecordBatch 위의 활성 행 윈도우
///
/// Only the first `active_row_count` rows of the backing batch take part in
/// evaluation. Transform nodes read the batch but never own it.
#[derive(Debug, Clone)]
pub struct RowBatch {
    batch: RecordBatch,
    active_rows: usize,
}

impl RowBatch {
    /// Every row of `batch` is active.
    pub fn new(batch: RecordBatch) -> Self {
        let active_rows = batch.num_rows();
        Self { batch, active_rows }
    }

    /// Only the first `active_rows` rows of `batch` are active.
    pub fn with_active_rows(batch: RecordBatch, active_rows: usize) -> TfxResult<Self> {
        if active_rows > batch.num_rows() {
            return Err(TfxError::InvalidBatch(format!(
                "active row count {} exceeds batch size {}",
                active_rows,
                batch.num_rows()
            )));
        }
        Ok(Self { batch, active_rows })
    }

    pub fn active_row_count(&self) -> usize {
        self.active_rows
    }

    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn column_by_name(&self, name: &str) -> TfxResult<&ArrayRef> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| TfxError::ColumnNotFound(name.to_string()))
    }
}

impl From<RecordBatch> for RowBatch {
    fn from(batch: RecordBatch) -> Self {
        RowBatch::new(batch)
    }
}

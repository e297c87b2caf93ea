//! Batch pipeline: pull-based sources and the transform operator

use crate::batch::RowBatch;
use crate::error::TfxResult;
use crate::transform::BoxedTransform;
use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;
use tracing::debug;

/// 배치 소스 트레이트: Volcano 실행 모델 (Pull 기반)
pub trait BatchSource: Send {
    /// 출력 스키마 반환
    fn schema(&self) -> &Schema;

    /// 다음 RecordBatch 반환 (None이면 끝)
    fn next(&mut self) -> TfxResult<Option<RecordBatch>>;

    /// 소스 상태 초기화 (재실행용)
    fn reset(&mut self) -> TfxResult<()>;
}

/// 메모리 소스: 미리 적재된 RecordBatch를 순차적으로 반환
pub struct MemorySource {
    schema: SchemaRef,
    data: Vec<RecordBatch>,
    position: usize,
}

impl MemorySource {
    pub fn new(schema: SchemaRef, data: Vec<RecordBatch>) -> Self {
        Self {
            schema,
            data,
            position: 0,
        }
    }
}

impl BatchSource for MemorySource {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> TfxResult<Option<RecordBatch>> {
        let Some(batch) = self.data.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(batch.clone()))
    }

    fn reset(&mut self) -> TfxResult<()> {
        self.position = 0;
        Ok(())
    }
}

/// 변환 연산자: 입력 배치마다 변환 함수를 평가해 Float64 컬럼으로 출력
pub struct TransformOperator {
    input: Box<dyn BatchSource>,
    schema: SchemaRef,
    /// One node per output column
    transforms: Vec<BoxedTransform>,
}

impl TransformOperator {
    /// `outputs` pairs each output column name with the node computing it.
    pub fn new(input: Box<dyn BatchSource>, outputs: Vec<(String, BoxedTransform)>) -> Self {
        let (fields, transforms): (Vec<Field>, Vec<BoxedTransform>) = outputs
            .into_iter()
            .map(|(name, transform)| (Field::new(name, DataType::Float64, true), transform))
            .unzip();

        Self {
            input,
            schema: Arc::new(Schema::new(fields)),
            transforms,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Evaluate every output column over `batch`.
    pub fn evaluate(&mut self, batch: &RowBatch) -> TfxResult<RecordBatch> {
        let columns: Vec<ArrayRef> = self
            .transforms
            .iter_mut()
            .map(|transform| transform.to_array(batch))
            .collect::<TfxResult<_>>()?;

        Ok(RecordBatch::try_new(Arc::clone(&self.schema), columns)?)
    }

    pub fn next(&mut self) -> TfxResult<Option<RecordBatch>> {
        match self.input.next()? {
            None => Ok(None),
            Some(batch) => {
                let batch = RowBatch::new(batch);
                debug!(rows = batch.active_row_count(), "transforming batch");
                self.evaluate(&batch).map(Some)
            }
        }
    }

    pub fn reset(&mut self) -> TfxResult<()> {
        self.input.reset()
    }
}

//! Column reader: leaf transform over one batch column

use crate::batch::RowBatch;
use crate::config::EvaluatorConfig;
use crate::error::{TfxError, TfxResult};
use crate::metadata::ResultMetadata;
use crate::transform::{TransformFunction, ValuesBuffer};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute;
use arrow::datatypes::{DataType, Float64Type, Schema};

/// 컬럼 읽기 연산자: 배치의 컬럼 값을 f64로 변환
pub struct ColumnTransform {
    column: String,
    metadata: ResultMetadata,
    buffer: ValuesBuffer,
}

impl ColumnTransform {
    /// Resolve `column` against `schema`. Fails if the column is missing.
    pub fn new(column: &str, schema: &Schema, config: &EvaluatorConfig) -> TfxResult<Self> {
        let field = schema
            .field_with_name(column)
            .map_err(|_| TfxError::ColumnNotFound(column.to_string()))?;

        Ok(Self {
            column: column.to_string(),
            metadata: ResultMetadata::from_arrow(field.data_type()),
            buffer: ValuesBuffer::new(config),
        })
    }

    pub fn column_name(&self) -> &str {
        &self.column
    }
}

impl TransformFunction for ColumnTransform {
    fn name(&self) -> &str {
        &self.column
    }

    fn result_metadata(&self) -> &ResultMetadata {
        &self.metadata
    }

    fn transform_to_f64(&mut self, batch: &RowBatch) -> TfxResult<&[f64]> {
        if !self.metadata.is_single_value() {
            return Err(TfxError::UnsupportedType {
                context: format!("column '{}'", self.column),
                data_type: "multi-value".to_string(),
            });
        }

        let rows = batch.active_row_count();
        let array = batch.column_by_name(&self.column)?;
        read_f64_into(array, rows, self.buffer.prepare(rows))?;
        Ok(self.buffer.valid(rows))
    }
}

/// Widen the first `output.len()` rows of `array` to `f64`. Null slots read as NaN.
fn read_f64_into(array: &ArrayRef, rows: usize, output: &mut [f64]) -> TfxResult<()> {
    let window = array.slice(0, rows);
    let widened = match window.data_type() {
        DataType::Float64 => window,
        _ => compute::cast(&window, &DataType::Float64)?,
    };
    let doubles = widened
        .as_primitive_opt::<Float64Type>()
        .ok_or_else(|| TfxError::UnsupportedType {
            context: "column read".to_string(),
            data_type: format!("{:?}", array.data_type()),
        })?;

    if doubles.null_count() == 0 {
        output.copy_from_slice(doubles.values());
    } else {
        for (i, dst) in output.iter_mut().enumerate() {
            *dst = if doubles.is_null(i) {
                f64::NAN
            } else {
                doubles.value(i)
            };
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_util::{double_batch, int_batch};
    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::Field;
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    #[test]
    fn test_reads_double_column() {
        let batch = double_batch(&[1.5, -2.0, 3.25]);
        let mut column = ColumnTransform::new(
            "x",
            batch.record_batch().schema_ref(),
            &EvaluatorConfig::default(),
        )
        .unwrap();
        assert_eq!(column.name(), "x");
        assert_eq!(column.transform_to_f64(&batch).unwrap(), &[1.5, -2.0, 3.25]);
    }

    #[test]
    fn test_widens_int_column() {
        let batch = int_batch(&[1, -2, 3]);
        let mut column = ColumnTransform::new(
            "i",
            batch.record_batch().schema_ref(),
            &EvaluatorConfig::default(),
        )
        .unwrap();
        assert_eq!(column.result_metadata().data_type(), &DataType::Int32);
        assert_eq!(column.transform_to_f64(&batch).unwrap(), &[1.0, -2.0, 3.0]);
    }

    #[test]
    fn test_respects_active_window() {
        let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, false)]));
        let record = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![Arc::new(Int64Array::from(vec![10, 20, 30, 40]))],
        )
        .unwrap();
        let batch = RowBatch::with_active_rows(record, 2).unwrap();
        let mut column = ColumnTransform::new("n", &schema, &EvaluatorConfig::default()).unwrap();
        assert_eq!(column.transform_to_f64(&batch).unwrap(), &[10.0, 20.0]);
    }

    #[test]
    fn test_nulls_read_as_nan() {
        let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Float64, true)]));
        let record = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![Arc::new(Float64Array::from(vec![Some(1.0), None]))],
        )
        .unwrap();
        let batch = RowBatch::new(record);
        let mut column = ColumnTransform::new("x", &schema, &EvaluatorConfig::default()).unwrap();
        let values = column.transform_to_f64(&batch).unwrap();
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
    }

    #[test]
    fn test_string_column_parses_numbers() {
        let schema = Arc::new(Schema::new(vec![Field::new("s", DataType::Utf8, false)]));
        let record = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![Arc::new(StringArray::from(vec!["2.5", "-4"]))],
        )
        .unwrap();
        let batch = RowBatch::new(record);
        let mut column = ColumnTransform::new("s", &schema, &EvaluatorConfig::default()).unwrap();
        assert_eq!(column.transform_to_f64(&batch).unwrap(), &[2.5, -4.0]);
    }

    #[test]
    fn test_missing_column_at_build() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64, false)]);
        let err = ColumnTransform::new("price", &schema, &EvaluatorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, TfxError::ColumnNotFound(name) if name == "price"));
    }

    #[test]
    fn test_missing_column_at_evaluation() {
        let schema = Schema::new(vec![Field::new("y", DataType::Float64, false)]);
        let mut column = ColumnTransform::new("y", &schema, &EvaluatorConfig::default()).unwrap();
        let batch = double_batch(&[1.0]);
        assert!(matches!(
            column.transform_to_f64(&batch),
            Err(TfxError::ColumnNotFound(_))
        ));
    }
}

//! Literal: constant leaf transform

use crate::batch::RowBatch;
use crate::config::EvaluatorConfig;
use crate::error::{TfxError, TfxResult};
use crate::metadata::ResultMetadata;
use crate::transform::{TransformFunction, ValuesBuffer};
use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 리터럴 값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Int(i64),
    Float(f64),
    String(String),
}

impl LiteralValue {
    pub fn data_type(&self) -> DataType {
        match self {
            LiteralValue::Int(_) => DataType::Int64,
            LiteralValue::Float(_) => DataType::Float64,
            LiteralValue::String(_) => DataType::Utf8,
        }
    }

    pub fn as_f64(&self) -> TfxResult<f64> {
        match self {
            LiteralValue::Int(v) => Ok(*v as f64),
            LiteralValue::Float(v) => Ok(*v),
            LiteralValue::String(s) => s.trim().parse::<f64>().map_err(|_| TfxError::UnsupportedType {
                context: format!("literal '{}'", s),
                data_type: "Utf8 (not a number)".to_string(),
            }),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(v) => write!(f, "{}", v),
            LiteralValue::Float(v) => write!(f, "{}", v),
            LiteralValue::String(s) => write!(f, "'{}'", s),
        }
    }
}

/// 리터럴 연산자: 모든 행에 같은 값
pub struct LiteralTransform {
    value: LiteralValue,
    label: String,
    metadata: ResultMetadata,
    buffer: ValuesBuffer,
}

impl LiteralTransform {
    pub fn new(value: LiteralValue, config: &EvaluatorConfig) -> Self {
        Self {
            label: value.to_string(),
            metadata: ResultMetadata::new(value.data_type(), true, false),
            value,
            buffer: ValuesBuffer::new(config),
        }
    }
}

impl TransformFunction for LiteralTransform {
    fn name(&self) -> &str {
        &self.label
    }

    fn result_metadata(&self) -> &ResultMetadata {
        &self.metadata
    }

    fn is_literal(&self) -> bool {
        true
    }

    fn literal_value(&self) -> Option<&LiteralValue> {
        Some(&self.value)
    }

    fn transform_to_f64(&mut self, batch: &RowBatch) -> TfxResult<&[f64]> {
        let value = self.value.as_f64()?;
        let rows = batch.active_row_count();
        self.buffer.prepare(rows).fill(value);
        Ok(self.buffer.valid(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_util::double_batch;

    #[test]
    fn test_literal_fills_active_rows() {
        let batch = double_batch(&[0.0, 0.0, 0.0]);
        let mut literal = LiteralTransform::new(LiteralValue::Int(7), &EvaluatorConfig::default());
        assert!(literal.is_literal());
        assert_eq!(literal.name(), "7");
        assert_eq!(literal.result_metadata().data_type(), &DataType::Int64);
        assert_eq!(literal.transform_to_f64(&batch).unwrap(), &[7.0, 7.0, 7.0]);
    }

    #[test]
    fn test_numeric_string_literal() {
        let batch = double_batch(&[0.0]);
        let mut literal = LiteralTransform::new(
            LiteralValue::String(" 2.5 ".to_string()),
            &EvaluatorConfig::default(),
        );
        assert_eq!(literal.transform_to_f64(&batch).unwrap(), &[2.5]);
    }

    #[test]
    fn test_non_numeric_string_literal() {
        let batch = double_batch(&[0.0]);
        let mut literal = LiteralTransform::new(
            LiteralValue::String("abc".to_string()),
            &EvaluatorConfig::default(),
        );
        assert!(matches!(
            literal.transform_to_f64(&batch),
            Err(TfxError::UnsupportedType { .. })
        ));
    }
}

//! `truncate(x [, scale])`: drop digits past `scale` decimal places

use crate::batch::RowBatch;
use crate::config::EvaluatorConfig;
use crate::error::{TfxError, TfxResult};
use crate::metadata::{DOUBLE_SV_NO_DICTIONARY, ResultMetadata};
use crate::transform::{
    Arguments, BoxedTransform, LiteralValue, TransformFunction, ValuesBuffer, check_row_argument,
};
use std::fmt::Write;
use tracing::debug;

pub const TRUNCATE_FUNCTION_NAME: &str = "truncate";

/// Where the number of kept decimal places comes from
enum Scale {
    /// Integer literal, resolved at build time
    Fixed(i32),
    /// Single-valued row expression, read per batch and cast to `i32`
    PerRow(BoxedTransform),
}

/// 소수점 절삭 연산자 (0 방향)
pub struct TruncateDecimalTransform {
    argument: BoxedTransform,
    scale: Scale,
    buffer: ValuesBuffer,
    digits: String,
}

impl TruncateDecimalTransform {
    /// `arguments` is the value, optionally followed by an integer literal or
    /// a single-valued expression giving the scale per row.
    pub fn new(arguments: Arguments, config: &EvaluatorConfig) -> TfxResult<Self> {
        let actual = arguments.len();
        let mut arguments = arguments.into_iter();
        let (argument, scale) = match (arguments.next(), arguments.next(), arguments.next()) {
            (Some(argument), scale, None) => (argument, scale),
            _ => {
                return Err(TfxError::Arity {
                    function: TRUNCATE_FUNCTION_NAME.to_string(),
                    expected: "1 or 2".to_string(),
                    actual,
                });
            }
        };
        check_row_argument(TRUNCATE_FUNCTION_NAME, argument.as_ref())?;

        let scale = match scale {
            None => Scale::Fixed(0),
            Some(scale) => parse_scale(scale)?,
        };

        debug!(
            argument = argument.name(),
            scale = ?scale.fixed(),
            "built truncate transform"
        );
        Ok(Self {
            argument,
            scale,
            buffer: ValuesBuffer::new(config),
            digits: String::new(),
        })
    }

    /// The literal scale, or `None` when it is read from each row.
    pub fn scale(&self) -> Option<i32> {
        self.scale.fixed()
    }
}

impl Scale {
    fn fixed(&self) -> Option<i32> {
        match self {
            Scale::Fixed(scale) => Some(*scale),
            Scale::PerRow(_) => None,
        }
    }
}

fn parse_scale(scale: BoxedTransform) -> TfxResult<Scale> {
    if !scale.is_literal() {
        if !scale.result_metadata().is_single_value() {
            return Err(TfxError::invalid_argument(
                TRUNCATE_FUNCTION_NAME,
                "scale must be single-valued",
            ));
        }
        return Ok(Scale::PerRow(scale));
    }
    match scale.literal_value() {
        Some(LiteralValue::Int(v)) => i32::try_from(*v).map(Scale::Fixed).map_err(|_| {
            TfxError::invalid_argument(TRUNCATE_FUNCTION_NAME, format!("scale {} out of range", v))
        }),
        _ => Err(TfxError::invalid_argument(
            TRUNCATE_FUNCTION_NAME,
            "literal scale must be an integer",
        )),
    }
}

/// Truncate toward zero at `scale` decimal places. Negative scales clear
/// digits left of the decimal point.
///
/// Works on the shortest decimal string that round-trips to `x`, so
/// `truncate(0.29, 2)` is `0.29` while `truncate(1.2999999999999998, 1)` is `1.2`.
pub fn truncate(x: f64, scale: i32) -> f64 {
    truncate_digits(x, scale, &mut String::new())
}

fn truncate_digits(x: f64, scale: i32, digits: &mut String) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }

    // `{}` never switches to exponent notation for f64
    digits.clear();
    let _ = write!(digits, "{}", x.abs());
    let point = digits.find('.');
    let int_len = point.unwrap_or(digits.len());
    let frac_len = point.map_or(0, |p| digits.len() - p - 1);

    if scale >= 0 {
        let keep = frac_len.min(scale as usize);
        digits.truncate(if keep == 0 { int_len } else { int_len + 1 + keep });
    } else {
        let cleared = scale.unsigned_abs() as usize;
        if cleared >= int_len {
            return 0.0f64.copysign(x);
        }
        digits.truncate(int_len - cleared);
        let _ = write!(digits, "e{}", cleared);
    }

    // A digit prefix with an optional exponent always parses
    digits
        .parse::<f64>()
        .map_or(f64::NAN, |magnitude| magnitude.copysign(x))
}

impl TransformFunction for TruncateDecimalTransform {
    fn name(&self) -> &str {
        TRUNCATE_FUNCTION_NAME
    }

    fn result_metadata(&self) -> &ResultMetadata {
        &DOUBLE_SV_NO_DICTIONARY
    }

    fn transform_to_f64(&mut self, batch: &RowBatch) -> TfxResult<&[f64]> {
        let rows = batch.active_row_count();
        let output = self.buffer.prepare(rows);
        let input = self.argument.transform_to_f64(batch)?;
        let digits = &mut self.digits;

        match &mut self.scale {
            Scale::Fixed(scale) => {
                let scale = *scale;
                for (dst, &x) in output.iter_mut().zip(input) {
                    *dst = truncate_digits(x, scale, digits);
                }
            }
            Scale::PerRow(node) => {
                let scales = node.transform_to_f64(batch)?;
                for ((dst, &x), &scale) in output.iter_mut().zip(input).zip(scales) {
                    *dst = truncate_digits(x, scale as i32, digits);
                }
            }
        }
        Ok(self.buffer.valid(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::ColumnTransform;
    use crate::transform::test_util::{double_batch, double_column, list_column, literal};
    use arrow::array::{Float64Array, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use smallvec::smallvec;
    use std::sync::Arc;

    fn evaluate(values: &[f64], scale: Option<LiteralValue>) -> Vec<f64> {
        let batch = double_batch(values);
        let mut arguments: Arguments = smallvec![double_column(&batch)];
        if let Some(scale) = scale {
            arguments.push(literal(scale));
        }
        let mut node = TruncateDecimalTransform::new(arguments, &EvaluatorConfig::default()).unwrap();
        node.transform_to_f64(&batch).unwrap().to_vec()
    }

    #[test]
    fn test_default_scale_truncates_toward_zero() {
        assert_eq!(evaluate(&[1.7, -1.7, 2.0], None), vec![1.0, -1.0, 2.0]);
    }

    #[test]
    fn test_positive_scale() {
        assert_eq!(
            evaluate(&[1.2345, -1.2345, 0.29], Some(LiteralValue::Int(2))),
            vec![1.23, -1.23, 0.29]
        );
    }

    #[test]
    fn test_negative_scale() {
        assert_eq!(
            evaluate(&[1234.5, -1299.0], Some(LiteralValue::Int(-2))),
            vec![1200.0, -1200.0]
        );
    }

    #[test]
    fn test_truncates_shortest_decimal_form() {
        assert_eq!(truncate(1.2999999999999998, 1), 1.2);
        assert_eq!(truncate(1.3, 1), 1.3);
        assert_eq!(truncate(-0.0000012345, 7), -0.0000012);
    }

    #[test]
    fn test_scale_left_of_leading_digit_is_zero() {
        assert_eq!(truncate(5.0, -1), 0.0);
        assert_eq!(truncate(5.0, -400), 0.0);
        assert_eq!(truncate(5.0, i32::MIN), 0.0);
        assert!(truncate(-5.0, i32::MIN).is_sign_negative());
        assert_eq!(truncate(1e300, -299), 1e300);
    }

    #[test]
    fn test_non_finite_pass_through() {
        let result = evaluate(&[f64::NAN, f64::INFINITY], Some(LiteralValue::Int(3)));
        assert!(result[0].is_nan());
        assert_eq!(result[1], f64::INFINITY);
    }

    #[test]
    fn test_huge_scale_keeps_value() {
        assert_eq!(truncate(1e300, 300), 1e300);
        assert_eq!(truncate(0.1, i32::MAX), 0.1);
    }

    #[test]
    fn test_min_scale_literal_builds() {
        let batch = double_batch(&[42.0, -7.5]);
        let mut node = TruncateDecimalTransform::new(
            smallvec![
                double_column(&batch),
                literal(LiteralValue::Int(i32::MIN as i64))
            ],
            &EvaluatorConfig::default(),
        )
        .unwrap();
        assert_eq!(node.scale(), Some(i32::MIN));
        assert_eq!(node.transform_to_f64(&batch).unwrap(), &[0.0, 0.0]);
    }

    #[test]
    fn test_rejects_non_integer_scale() {
        let batch = double_batch(&[1.0]);
        let err = TruncateDecimalTransform::new(
            smallvec![double_column(&batch), literal(LiteralValue::Float(1.5))],
            &EvaluatorConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, TfxError::InvalidArgument { .. }));
    }

    #[test]
    fn test_scale_from_column() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("x", DataType::Float64, false),
            Field::new("s", DataType::Int64, false),
        ]));
        let record = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![
                Arc::new(Float64Array::from(vec![1.2345, 1.2345, 1234.5, 9.99])),
                Arc::new(Int64Array::from(vec![0, 2, -2, 1])),
            ],
        )
        .unwrap();
        let config = EvaluatorConfig::default();
        let value: BoxedTransform = Box::new(ColumnTransform::new("x", &schema, &config).unwrap());
        let scale: BoxedTransform = Box::new(ColumnTransform::new("s", &schema, &config).unwrap());

        let mut node = TruncateDecimalTransform::new(smallvec![value, scale], &config).unwrap();
        assert_eq!(node.scale(), None);

        let batch = RowBatch::new(record.clone());
        assert_eq!(node.transform_to_f64(&batch).unwrap(), &[1.0, 1.23, 1200.0, 9.9]);

        let window = RowBatch::with_active_rows(record, 2).unwrap();
        assert_eq!(node.transform_to_f64(&window).unwrap(), &[1.0, 1.23]);
    }

    #[test]
    fn test_rejects_multi_value_scale() {
        let batch = double_batch(&[1.0]);
        let err = TruncateDecimalTransform::new(
            smallvec![double_column(&batch), list_column()],
            &EvaluatorConfig::default(),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("single-valued"));
    }

    #[test]
    fn test_arity() {
        let err = TruncateDecimalTransform::new(Arguments::new(), &EvaluatorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, TfxError::Arity { actual: 0, .. }));

        let batch = double_batch(&[1.0]);
        let err = TruncateDecimalTransform::new(
            smallvec![
                double_column(&batch),
                literal(LiteralValue::Int(1)),
                literal(LiteralValue::Int(2))
            ],
            &EvaluatorConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, TfxError::Arity { actual: 3, .. }));
    }

    #[test]
    fn test_rejects_literal_and_multi_value_value() {
        let err = TruncateDecimalTransform::new(
            smallvec![literal(LiteralValue::Float(1.5))],
            &EvaluatorConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, TfxError::InvalidArgument { .. }));

        let err = TruncateDecimalTransform::new(smallvec![list_column()], &EvaluatorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, TfxError::InvalidArgument { .. }));
    }
}

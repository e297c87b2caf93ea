//! Transform Functions: batch-at-a-time expression nodes
//!
//! Every node produces one `f64` per active row of a [`RowBatch`]. Nodes own
//! their output buffer and hand out a view of exactly the active rows; the
//! tail beyond that view may hold values from an earlier, larger batch.

use crate::batch::RowBatch;
use crate::error::{TfxError, TfxResult};
use crate::metadata::ResultMetadata;
use arrow::array::{ArrayRef, Float64Array};
use smallvec::SmallVec;
use std::sync::Arc;

mod buffer;
mod column;
mod literal;
mod math;
mod truncate;

pub use buffer::ValuesBuffer;
pub use column::ColumnTransform;
pub use literal::{LiteralTransform, LiteralValue};
pub use math::{MathFunction, SingleParamMathTransform};
pub use truncate::{TRUNCATE_FUNCTION_NAME, TruncateDecimalTransform};

/// 변환 함수 트레이트: 배치 단위 평가 (Pull 기반)
///
/// `transform_to_f64` takes `&mut self`: a node is evaluated by one thread at a
/// time and parallel execution builds one tree per thread.
pub trait TransformFunction: Send {
    /// 함수 이름
    fn name(&self) -> &str;

    /// 출력 메타데이터 (배치와 무관)
    fn result_metadata(&self) -> &ResultMetadata;

    /// Whether this node is a compile-time constant.
    fn is_literal(&self) -> bool {
        false
    }

    /// Constant value of a literal node.
    fn literal_value(&self) -> Option<&LiteralValue> {
        None
    }

    /// Values for the active rows of `batch`. The returned slice has exactly
    /// `batch.active_row_count()` entries.
    fn transform_to_f64(&mut self, batch: &RowBatch) -> TfxResult<&[f64]>;

    /// Active rows as an owned Arrow array.
    fn to_array(&mut self, batch: &RowBatch) -> TfxResult<ArrayRef> {
        let values = self.transform_to_f64(batch)?;
        Ok(Arc::new(Float64Array::from(values.to_vec())))
    }
}

pub type BoxedTransform = Box<dyn TransformFunction>;

/// Child list handed to a constructor. Most functions take one or two.
pub type Arguments = SmallVec<[BoxedTransform; 2]>;

/// Checks shared by every row-wise numeric function: the argument must vary
/// per row and carry one value per row.
pub(crate) fn check_row_argument(function: &str, argument: &dyn TransformFunction) -> TfxResult<()> {
    if argument.is_literal() {
        return Err(TfxError::invalid_argument(
            function,
            "argument cannot be a literal",
        ));
    }
    if !argument.result_metadata().is_single_value() {
        return Err(TfxError::invalid_argument(
            function,
            "argument must be single-valued",
        ));
    }
    Ok(())
}

/// Elementwise `output[i] = f(input[i])`. Generic over `f` so each function
/// gets its own loop with no call indirection per row.
#[inline]
pub(crate) fn map_into<F>(input: &[f64], output: &mut [f64], f: F)
where
    F: Fn(f64) -> f64,
{
    for (dst, &src) in output.iter_mut().zip(input) {
        *dst = f(src);
    }
}

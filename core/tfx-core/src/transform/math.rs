//! Single-parameter math transforms
//!
//! `abs`, `ceil`, `floor`, `exp`, `ln`, `log2`, `log10`, `sqrt` and `sign`
//! share one node type. The function is a closed enum resolved once per
//! batch; each arm runs its own monomorphized loop over the child's values.
//!
//! NaN and ±∞ are ordinary outputs here, never errors.

use crate::batch::RowBatch;
use crate::config::EvaluatorConfig;
use crate::error::{TfxError, TfxResult};
use crate::metadata::{DOUBLE_SV_NO_DICTIONARY, ResultMetadata};
use crate::transform::{
    Arguments, BoxedTransform, TransformFunction, ValuesBuffer, check_row_argument, map_into,
};
use std::f64::consts::LN_2;
use std::fmt;
use tracing::debug;

/// 단일 인자 수학 함수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Abs,
    Ceil,
    Floor,
    Exp,
    Ln,
    Log2,
    Log10,
    Sqrt,
    Sign,
}

impl MathFunction {
    pub const ALL: [MathFunction; 9] = [
        MathFunction::Abs,
        MathFunction::Ceil,
        MathFunction::Floor,
        MathFunction::Exp,
        MathFunction::Ln,
        MathFunction::Log2,
        MathFunction::Log10,
        MathFunction::Sqrt,
        MathFunction::Sign,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Abs => "abs",
            MathFunction::Ceil => "ceil",
            MathFunction::Floor => "floor",
            MathFunction::Exp => "exp",
            MathFunction::Ln => "ln",
            MathFunction::Log2 => "log2",
            MathFunction::Log10 => "log10",
            MathFunction::Sqrt => "sqrt",
            MathFunction::Sign => "sign",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Scalar form, for callers outside the batch path.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            MathFunction::Abs => x.abs(),
            MathFunction::Ceil => x.ceil(),
            MathFunction::Floor => x.floor(),
            MathFunction::Exp => x.exp(),
            MathFunction::Ln => x.ln(),
            MathFunction::Log2 => log2_via_ln(x),
            MathFunction::Log10 => x.log10(),
            MathFunction::Sqrt => x.sqrt(),
            MathFunction::Sign => sign(x),
        }
    }

    /// `output[i] = f(input[i])` over the shorter of the two slices.
    pub fn apply(&self, input: &[f64], output: &mut [f64]) {
        match self {
            MathFunction::Abs => map_into(input, output, f64::abs),
            MathFunction::Ceil => map_into(input, output, f64::ceil),
            MathFunction::Floor => map_into(input, output, f64::floor),
            MathFunction::Exp => map_into(input, output, f64::exp),
            MathFunction::Ln => map_into(input, output, f64::ln),
            MathFunction::Log2 => map_into(input, output, log2_via_ln),
            MathFunction::Log10 => map_into(input, output, f64::log10),
            MathFunction::Sqrt => map_into(input, output, f64::sqrt),
            MathFunction::Sign => map_into(input, output, sign),
        }
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Natural log over ln(2); results may differ from f64::log2 in the last bit.
#[inline]
fn log2_via_ln(x: f64) -> f64 {
    x.ln() / LN_2
}

// f64::signum maps ±0.0 to ±1.0, zero has to keep its own sign.
#[inline]
fn sign(x: f64) -> f64 {
    if x == 0.0 { x } else { x.signum() }
}

/// 단일 인자 수학 변환 연산자
pub struct SingleParamMathTransform {
    function: MathFunction,
    argument: BoxedTransform,
    buffer: ValuesBuffer,
}

impl SingleParamMathTransform {
    /// Validate `arguments` and build the node. Requires exactly one argument
    /// that is neither a literal nor multi-valued.
    pub fn new(
        function: MathFunction,
        arguments: Arguments,
        config: &EvaluatorConfig,
    ) -> TfxResult<Self> {
        let actual = arguments.len();
        let mut arguments = arguments.into_iter();
        let argument = match (arguments.next(), arguments.next()) {
            (Some(argument), None) => argument,
            _ => {
                return Err(TfxError::Arity {
                    function: function.name().to_string(),
                    expected: "1".to_string(),
                    actual,
                });
            }
        };
        check_row_argument(function.name(), argument.as_ref())?;

        debug!(function = %function, argument = argument.name(), "built math transform");
        Ok(Self {
            function,
            argument,
            buffer: ValuesBuffer::new(config),
        })
    }

    pub fn function(&self) -> MathFunction {
        self.function
    }

    pub fn argument(&self) -> &dyn TransformFunction {
        self.argument.as_ref()
    }
}

impl TransformFunction for SingleParamMathTransform {
    fn name(&self) -> &str {
        self.function.name()
    }

    fn result_metadata(&self) -> &ResultMetadata {
        &DOUBLE_SV_NO_DICTIONARY
    }

    fn transform_to_f64(&mut self, batch: &RowBatch) -> TfxResult<&[f64]> {
        let rows = batch.active_row_count();
        let output = self.buffer.prepare(rows);
        let input = self.argument.transform_to_f64(batch)?;
        self.function.apply(input, output);
        Ok(self.buffer.valid(rows))
    }
}

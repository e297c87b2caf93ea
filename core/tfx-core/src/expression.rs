//! Typed transform expressions: input to the registry's tree builder

use crate::transform::LiteralValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 변환 표현식 트리
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformExpr {
    /// Column reference
    Column(String),
    /// Constant
    Literal(LiteralValue),
    /// Function call, e.g. `log2(price)`
    Function { name: String, args: Vec<TransformExpr> },
}

impl TransformExpr {
    pub fn column(name: impl Into<String>) -> Self {
        TransformExpr::Column(name.into())
    }

    pub fn literal(value: LiteralValue) -> Self {
        TransformExpr::Literal(value)
    }

    pub fn call(name: impl Into<String>, args: Vec<TransformExpr>) -> Self {
        TransformExpr::Function {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for TransformExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformExpr::Column(name) => f.write_str(name),
            TransformExpr::Literal(value) => write!(f, "{}", value),
            TransformExpr::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

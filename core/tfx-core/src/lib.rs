//! # TFX: Vectorized Transform Functions
//!
//! TFX는 Apache Arrow 배치 위에서 동작하는 벡터화 변환 함수 평가기입니다.
//! 표현식 트리의 각 노드는 배치 단위로 평가되며, 출력 버퍼를 배치 간에 재사용합니다.
//!
//! ## 주요 특징
//!
//! - **단일 인자 수학 함수**: abs, ceil, floor, exp, ln, log2, log10, sqrt, sign
//! - **일회성 검증**: 인자 개수/타입 검증은 플랜 생성 시 한 번만 수행
//! - **버퍼 재사용**: 출력 버퍼는 증가만 하고, 활성 행 수만큼의 뷰만 반환
//! - **행 단위 동적 디스패치 없음**: 함수 선택은 배치당 한 번
//!
//! ## 빠른 시작
//!
//! ```rust
//! use arrow::array::Float64Array;
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//! use tfx_core::{RowBatch, TransformExpr, TransformRegistry};
//!
//! # fn main() -> tfx_core::TfxResult<()> {
//! let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Float64, false)]));
//! let batch = RecordBatch::try_new(
//!     Arc::clone(&schema),
//!     vec![Arc::new(Float64Array::from(vec![-1.0, 2.0, -3.5]))],
//! )?;
//!
//! let registry = TransformRegistry::default();
//! let expr = TransformExpr::call("abs", vec![TransformExpr::column("x")]);
//! let mut node = registry.build_expr(&expr, &schema)?;
//!
//! let values = node.transform_to_f64(&RowBatch::new(batch))?;
//! assert_eq!(values, &[1.0, 2.0, 3.5]);
//! # Ok(())
//! # }
//! ```
//!
//! ## 실행 파이프라인
//!
//! ```text
//! BatchSource → RowBatch → TransformOperator
//!          → transform tree (column/literal leaves → math nodes) → RecordBatch
//! ```
//!
//! ## 모듈 구조
//!
//! - [`transform`]: 변환 노드 ([`TransformFunction`], [`SingleParamMathTransform`])
//! - [`registry`]: 함수 이름 → 노드 ([`TransformRegistry`])
//! - [`operator`]: 배치 파이프라인 ([`TransformOperator`])
//! - [`config`]: 평가기 설정 ([`EvaluatorConfig`])

pub mod batch;
pub mod config;
pub mod error;
pub mod expression;
pub mod metadata;
pub mod operator;
pub mod registry;
pub mod transform;

// Logging utilities
pub mod logging;

// Re-export commonly used types
pub use batch::RowBatch;
pub use config::{BufferGrowth, EvaluatorConfig, NameMatching};
pub use error::{TfxError, TfxResult};
pub use expression::TransformExpr;
pub use metadata::{DOUBLE_SV_NO_DICTIONARY, ResultMetadata};
pub use operator::{BatchSource, MemorySource, TransformOperator};
pub use registry::{FunctionKind, TransformRegistry};
pub use transform::{
    Arguments, BoxedTransform, ColumnTransform, LiteralTransform, LiteralValue, MathFunction,
    SingleParamMathTransform, TransformFunction, TruncateDecimalTransform,
};

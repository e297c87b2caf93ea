//! Transform Registry: function name → transform node, at plan-build time

use crate::config::EvaluatorConfig;
use crate::error::{TfxError, TfxResult};
use crate::expression::TransformExpr;
use crate::transform::{
    Arguments, BoxedTransform, ColumnTransform, LiteralTransform, MathFunction,
    SingleParamMathTransform, TRUNCATE_FUNCTION_NAME, TruncateDecimalTransform,
};
use ahash::AHashMap;
use arrow::datatypes::Schema;
use tracing::{debug, instrument};

/// 등록된 함수 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Math(MathFunction),
    Truncate,
}

/// 변환 함수 레지스트리
///
/// The name table is built once in [`TransformRegistry::new`]. Lookups follow
/// the configured [`NameMatching`](crate::config::NameMatching) policy.
pub struct TransformRegistry {
    config: EvaluatorConfig,
    functions: AHashMap<String, FunctionKind>,
}

impl TransformRegistry {
    pub fn new(config: EvaluatorConfig) -> Self {
        let mut functions = AHashMap::with_capacity(MathFunction::ALL.len() + 1);
        for function in MathFunction::ALL {
            functions.insert(
                config.name_matching.normalize(function.name()),
                FunctionKind::Math(function),
            );
        }
        functions.insert(
            config.name_matching.normalize(TRUNCATE_FUNCTION_NAME),
            FunctionKind::Truncate,
        );

        Self { config, functions }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn lookup(&self, name: &str) -> Option<FunctionKind> {
        self.functions
            .get(&self.config.name_matching.normalize(name))
            .copied()
    }

    /// Registered function names, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build and validate the node registered under `name` over already-built
    /// `arguments`.
    #[instrument(skip(self, arguments), fields(arity = arguments.len()))]
    pub fn build(&self, name: &str, arguments: Arguments) -> TfxResult<BoxedTransform> {
        let kind = self
            .lookup(name)
            .ok_or_else(|| TfxError::UnknownFunction(name.to_string()))?;

        let node: BoxedTransform = match kind {
            FunctionKind::Math(function) => Box::new(SingleParamMathTransform::new(
                function,
                arguments,
                &self.config,
            )?),
            FunctionKind::Truncate => {
                Box::new(TruncateDecimalTransform::new(arguments, &self.config)?)
            }
        };
        debug!(function = node.name(), "transform built");
        Ok(node)
    }

    /// Build a whole tree bottom-up, resolving columns against `schema`.
    pub fn build_expr(&self, expr: &TransformExpr, schema: &Schema) -> TfxResult<BoxedTransform> {
        match expr {
            TransformExpr::Column(name) => {
                Ok(Box::new(ColumnTransform::new(name, schema, &self.config)?))
            }
            TransformExpr::Literal(value) => {
                Ok(Box::new(LiteralTransform::new(value.clone(), &self.config)))
            }
            TransformExpr::Function { name, args } => {
                let arguments = args
                    .iter()
                    .map(|arg| self.build_expr(arg, schema))
                    .collect::<TfxResult<Arguments>>()?;
                self.build(name, arguments)
            }
        }
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

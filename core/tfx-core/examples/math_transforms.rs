//! 수학 변환 파이프라인 예제
//!
//! 실행: RUST_LOG=debug cargo run --example math_transforms --features logging

use arrow::array::{Float64Array, Int64Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::util::pretty::print_batches;
use std::sync::Arc;
use tfx_core::{
    EvaluatorConfig, LiteralValue, MemorySource, TransformExpr, TransformOperator,
    TransformRegistry,
};

fn main() -> tfx_core::TfxResult<()> {
    // 로깅 초기화
    tfx_core::logging::init_with_level("debug");

    println!("=== TFX 수학 변환 예제 ===\n");

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("price", DataType::Float64, false),
    ]));
    let batches = vec![
        RecordBatch::try_new(
            Arc::clone(&schema),
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3, 4])),
                Arc::new(Float64Array::from(vec![-12.5, 0.0, 3.75, 1024.0])),
            ],
        )?,
        RecordBatch::try_new(
            Arc::clone(&schema),
            vec![
                Arc::new(Int64Array::from(vec![5, 6])),
                Arc::new(Float64Array::from(vec![-1.0, 8.0])),
            ],
        )?,
    ];

    // 환경 변수(TFX_*)로 설정 덮어쓰기 가능
    let config = EvaluatorConfig::new().load_from_env();
    let registry = TransformRegistry::new(config);
    println!("등록된 함수: {}\n", registry.function_names().join(", "));

    let exprs = [
        TransformExpr::call("abs", vec![TransformExpr::column("price")]),
        TransformExpr::call("sign", vec![TransformExpr::column("price")]),
        TransformExpr::call("log2", vec![TransformExpr::column("price")]),
        TransformExpr::call(
            "truncate",
            vec![
                TransformExpr::call("sqrt", vec![TransformExpr::column("price")]),
                TransformExpr::literal(LiteralValue::Int(2)),
            ],
        ),
    ];
    let outputs = exprs
        .iter()
        .map(|expr| Ok((expr.to_string(), registry.build_expr(expr, &schema)?)))
        .collect::<tfx_core::TfxResult<Vec<_>>>()?;

    let source = MemorySource::new(Arc::clone(&schema), batches);
    let mut op = TransformOperator::new(Box::new(source), outputs);

    let mut results = Vec::new();
    while let Some(batch) = op.next()? {
        results.push(batch);
    }
    print_batches(&results)?;

    println!("\n=== 예제 완료 ===");
    Ok(())
}

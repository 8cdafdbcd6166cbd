use criterion::{criterion_group, criterion_main, Criterion};

use invar_core::config::InvarConfig;
use invar_core::types::{PointDecl, RepType, Value, ValueObservation, VarDecl};
use invar_engine::pipeline::{CollectingSink, InferencePipeline, TraceRecord};

fn int(name: &str) -> VarDecl {
    VarDecl::new(name, "int", RepType::Int)
}

/// 20 functions, each with an entry and two exits over four integers.
fn workload() -> (Vec<PointDecl>, Vec<TraceRecord>) {
    let mut decls = Vec::new();
    let mut records = Vec::new();
    for f in 0..20 {
        let function = format!("pkg.C.m{f}()");
        let vars = || vec![int("a"), int("b"), int("c"), int("return")];
        decls.push(PointDecl::new(format!("{function}:::ENTER"), vars()));
        decls.push(PointDecl::new(format!("{function}:::EXIT1"), vars()));
        decls.push(PointDecl::new(format!("{function}:::EXIT2"), vars()));
        for i in 0..200i64 {
            let exit = if i % 3 == 0 { "EXIT1" } else { "EXIT2" };
            let values = [i % 7, 2 * (i % 7) + 1, i % 4 + 1, i64::from(i % 3 == 0)];
            records.push(TraceRecord::new(
                format!("{function}:::ENTER"),
                ValueObservation::modified(values.iter().map(|v| Value::Int(*v))),
            ));
            records.push(TraceRecord::new(
                format!("{function}:::{exit}"),
                ValueObservation::modified(values.iter().map(|v| Value::Int(*v))),
            ));
        }
    }
    (decls, records)
}

fn run(config: &InvarConfig, decls: &[PointDecl], records: &[TraceRecord]) {
    let pipeline = InferencePipeline::new(config.clone()).unwrap();
    let mut sink = CollectingSink::new();
    pipeline
        .run(decls.iter().cloned(), records.iter().cloned(), &mut sink)
        .unwrap();
}

fn bench_pipeline_sequential(c: &mut Criterion) {
    let (decls, records) = workload();
    let mut config = InvarConfig::default();
    config.inference.parallel = Some(false);

    c.bench_function("pipeline_60_points_sequential", |b| {
        b.iter(|| run(&config, &decls, &records));
    });
}

fn bench_pipeline_parallel(c: &mut Criterion) {
    let (decls, records) = workload();
    let config = InvarConfig::default();

    c.bench_function("pipeline_60_points_parallel", |b| {
        b.iter(|| run(&config, &decls, &records));
    });
}

criterion_group!(benches, bench_pipeline_sequential, bench_pipeline_parallel);
criterion_main!(benches);

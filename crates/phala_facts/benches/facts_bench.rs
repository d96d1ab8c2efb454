use criterion::{Criterion, black_box, criterion_group, criterion_main};
use phala_facts::{
    AnalysisConfig, analyze, build_derived, build_fact_sheet, evaluate_rules, parse_chart_json,
    parse_outline_json, validate_outline,
};

const SAMPLE: &str = include_str!("../tests/data/sample_chart.json");

fn builder_bench(c: &mut Criterion) {
    let input = parse_chart_json(SAMPLE).unwrap();

    let mut group = c.benchmark_group("builder");
    group.bench_function("parse_json", |b| {
        b.iter(|| parse_chart_json(black_box(SAMPLE)))
    });
    group.bench_function("fact_sheet", |b| {
        b.iter(|| build_fact_sheet(black_box(&input)))
    });
    group.finish();
}

fn analytics_bench(c: &mut Criterion) {
    let input = parse_chart_json(SAMPLE).unwrap();
    let facts = build_fact_sheet(&input).unwrap().facts;
    let config = AnalysisConfig::default();
    let outline = parse_outline_json(
        r#"{"ascendant": {"sign": 1}, "yogas": [{"key": "shasha", "planet": "Saturn"}]}"#,
    )
    .unwrap();

    let mut group = c.benchmark_group("analytics");
    group.bench_function("derived", |b| {
        b.iter(|| build_derived(black_box(&facts), &config))
    });
    group.bench_function("rules", |b| b.iter(|| evaluate_rules(black_box(&facts))));
    group.bench_function("validate", |b| {
        b.iter(|| validate_outline(black_box(&facts), black_box(&outline)))
    });
    group.bench_function("analyze", |b| {
        b.iter(|| analyze(black_box(&input), &config))
    });
    group.finish();
}

criterion_group!(benches, builder_bench, analytics_bench);
criterion_main!(benches);

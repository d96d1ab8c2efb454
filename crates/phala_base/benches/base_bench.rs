use criterion::{Criterion, black_box, criterion_group, criterion_main};
use phala_base::{
    Graha, Rashi, dignity_in_sign, house_drishti, house_from_degrees, house_from_signs, lord_of,
    parse_graha, parse_rashi, sign_from_longitude,
};

fn calculator_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculator");
    group.bench_function("sign_from_longitude", |b| {
        b.iter(|| sign_from_longitude(black_box(283.75)))
    });
    group.bench_function("house_from_signs", |b| {
        b.iter(|| house_from_signs(black_box(11), black_box(2)))
    });
    group.bench_function("house_from_degrees", |b| {
        b.iter(|| house_from_degrees(black_box(47.2), black_box(301.9)))
    });
    group.finish();
}

fn tables_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tables");
    group.bench_function("lord_of", |b| {
        b.iter(|| lord_of(black_box(Graha::Shani), black_box(Rashi::Vrishabha)))
    });
    group.bench_function("dignity_in_sign", |b| {
        b.iter(|| dignity_in_sign(black_box(Graha::Buddh), black_box(Rashi::Kanya)))
    });
    group.bench_function("house_drishti", |b| {
        b.iter(|| house_drishti(black_box(Graha::Guru), black_box(10)))
    });
    group.finish();
}

fn names_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("names");
    group.bench_function("parse_graha", |b| b.iter(|| parse_graha(black_box("Shani"))));
    group.bench_function("parse_rashi", |b| {
        b.iter(|| parse_rashi(black_box("Vrishchika")))
    });
    group.finish();
}

criterion_group!(benches, calculator_bench, tables_bench, names_bench);
criterion_main!(benches);

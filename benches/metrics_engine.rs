use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ctgscore::decode::dict::parse_records;
use ctgscore::signal::{FisherAnalyzer, Recording};
use std::hint::black_box;

/// Synthetic trace: a slow baseline wave with short accelerations and
/// decelerations every few minutes.
fn synthetic_trace(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let base = 140.0 + 6.0 * ((i as f64) / 7.0).sin();
            match i % 600 {
                100..=140 => base + 25.0,
                400..=440 => base - 25.0,
                _ => base,
            }
        })
        .collect()
}

fn dict_text(values: &[f64]) -> String {
    let records: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{{'Key': {}, 'Value': {:.1}}}", i, v))
        .collect();
    format!("[{}]", records.join(", "))
}

fn criterion_benchmark(c: &mut Criterion) {
    let analyzer = FisherAnalyzer::default();

    let mut group = c.benchmark_group("analyze");
    for len in [600, 2400, 9600] {
        let recording = Recording::from_values(synthetic_trace(len));
        group.bench_with_input(BenchmarkId::from_parameter(len), &recording, |b, rec| {
            b.iter(|| analyzer.analyze(black_box(rec)))
        });
    }
    group.finish();

    let text = dict_text(&synthetic_trace(2400));
    c.bench_function("parse_dict_2400", |b| {
        b.iter(|| parse_records(black_box(&text)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

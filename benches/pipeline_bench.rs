//! Benchmarks for pipeline fitting and prediction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use truvalue::dataset::TrainingDataset;
use truvalue::pipeline::{ForestParams, Pipeline};
use truvalue::schema::FeatureRow;

const LOCATIONS: [&str; 5] = [
    "Dubai Marina",
    "Downtown Dubai",
    "JVC",
    "Palm Jumeirah",
    "Business Bay",
];

fn synthetic_dataset(n: usize) -> TrainingDataset {
    let mut rng = StdRng::seed_from_u64(7);
    let mut dataset = TrainingDataset::default();

    for _ in 0..n {
        let area: f64 = rng.random_range(500.0..4000.0);
        let bedrooms = rng.random_range(1..6) as f64;
        let age: f64 = rng.random_range(0.0..25.0);
        let location = rng.random_range(0..LOCATIONS.len());

        dataset.rows.push(FeatureRow {
            area_sqft: Some(area),
            bedrooms: Some(bedrooms),
            bathrooms: Some(bedrooms),
            location: Some(LOCATIONS[location].to_string()),
            age_years: Some(age),
        });
        dataset
            .targets
            .push(area * 1100.0 * (1.0 + location as f64 * 0.3) - age * 8000.0);
    }

    dataset
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_fit");
    group.sample_size(10);

    for n in [100, 500, 2000] {
        let dataset = synthetic_dataset(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &dataset, |b, dataset| {
            b.iter(|| Pipeline::fit(black_box(dataset), &ForestParams::default()));
        });
    }
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_predict");

    let dataset = synthetic_dataset(1000);
    let pipeline = match Pipeline::fit(&dataset, &ForestParams::default()) {
        Ok(pipeline) => pipeline,
        Err(e) => panic!("failed to fit benchmark pipeline: {e}"),
    };

    group.bench_function("single_row", |b| {
        let row = &dataset.rows[..1];
        b.iter(|| pipeline.predict(black_box(row)));
    });

    group.bench_function("batch_100", |b| {
        let rows = &dataset.rows[..100];
        b.iter(|| pipeline.predict(black_box(rows)));
    });
    group.finish();
}

criterion_group!(benches, bench_fit, bench_predict);
criterion_main!(benches);

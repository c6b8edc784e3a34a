use criterion::{criterion_group, criterion_main, Criterion};
use cross_spectrum::model::{power_law, Amplitude, Param, PowerLaw};
use ndarray::{array, Array1};

fn frequencies() -> Array1<f64> {
    array![27.0, 39.0, 93.0, 145.0, 225.0, 280.0]
}

/// Plain parameters: output (F, F, L)
fn bench_power_law_scalar(c: &mut Criterion) {
    let freq = frequencies();
    let beta = Param::Scalar(1.54);
    let alpha = Param::Scalar(-0.42);
    let amplitude = Amplitude::Scalar(5.0);

    c.bench_function("bench_power_law_scalar", |b| {
        b.iter(|| {
            std::hint::black_box(power_law(
                freq.view(),
                353.0,
                &beta,
                2,
                3000,
                80.0,
                &alpha,
                &amplitude,
            ))
        })
    });
}

/// TEB parameters with a full amplitude matrix: output (3, 3, F, F, L)
fn bench_power_law_teb(c: &mut Criterion) {
    let freq = frequencies();
    let model = PowerLaw::new(
        353.0,
        vec![1.54, 1.59, 1.59],
        80.0,
        vec![-2.42, -2.42, -2.54],
        array![[30.0, 1.2, 0.0], [1.2, 0.05, 0.0], [0.0, 0.0, 0.02]],
    );

    c.bench_function("bench_power_law_teb", |b| {
        b.iter(|| std::hint::black_box(model.evaluate(freq.view(), 2, 3000)))
    });
}

criterion_group!(benches, bench_power_law_scalar, bench_power_law_teb);
criterion_main!(benches);

use adclick::benchmarks::config;
use adclick::ParamGuard;
use adclick_ftrl::{FollowTheRegularizedLeader, FtrlParams};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const FIELDS: usize = 22;

fn get_stream(rng: &mut SmallRng, size: usize, n_coordinates: usize) -> Vec<(Vec<usize>, bool)> {
    (0..size)
        .map(|_| {
            let mut x = Vec::with_capacity(FIELDS + 1);
            x.push(0);
            x.extend((0..FIELDS).map(|_| rng.gen_range(1..n_coordinates)));
            (x, rng.gen_bool(0.17))
        })
        .collect()
}

fn learn_stream(c: &mut Criterion) {
    let mut benchmark = c.benchmark_group("ftrl_learn");
    config::set_default_benchmark_configs(&mut benchmark);
    let mut rng = SmallRng::seed_from_u64(42);

    for bits in [16, 20, 24].iter() {
        let n_coordinates = 1 << bits;
        let params = FtrlParams::new(0.1, 1.0, 1.0, 1.0, n_coordinates)
            .check()
            .unwrap();
        let stream = get_stream(&mut rng, 10_000, n_coordinates);

        benchmark.bench_with_input(BenchmarkId::from_parameter(bits), &stream, |b, stream| {
            b.iter(|| {
                let mut model = FollowTheRegularizedLeader::new(params.clone());
                for (x, y) in stream {
                    model.learn(black_box(x), *y).unwrap();
                }
                model
            })
        });
    }
    benchmark.finish();
}

fn predict_stream(c: &mut Criterion) {
    let mut benchmark = c.benchmark_group("ftrl_predict");
    config::set_default_benchmark_configs(&mut benchmark);
    let mut rng = SmallRng::seed_from_u64(42);

    let n_coordinates = 1 << 20;
    let params = FtrlParams::new(0.1, 1.0, 1.0, 1.0, n_coordinates)
        .check()
        .unwrap();
    let train = get_stream(&mut rng, 10_000, n_coordinates);
    let test = get_stream(&mut rng, 10_000, n_coordinates);
    let mut model = FollowTheRegularizedLeader::new(params);
    for (x, y) in &train {
        model.learn(x, *y).unwrap();
    }

    benchmark.bench_function("20", |b| {
        b.iter(|| {
            test.iter()
                .map(|(x, _)| model.predict(black_box(x)).unwrap())
                .sum::<f64>()
        })
    });
    benchmark.finish();
}

criterion_group!(benches, learn_stream, predict_stream);
criterion_main!(benches);

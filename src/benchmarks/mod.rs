/// Shared criterion settings for the throughput benchmarks of the workspace
#[cfg(feature = "benchmarks")]
pub mod config {
    use criterion::{measurement::WallTime, BenchmarkGroup};
    use std::time::Duration;

    /// Online learners are measured per record, so groups run many short samples
    pub fn set_default_benchmark_configs(benchmark: &mut BenchmarkGroup<WallTime>) {
        benchmark
            .sample_size(30)
            .measurement_time(Duration::from_secs(5))
            .warm_up_time(Duration::from_secs(2))
            .confidence_level(0.95)
            .noise_threshold(0.03);
    }
}

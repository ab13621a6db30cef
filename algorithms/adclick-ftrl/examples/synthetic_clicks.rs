use adclick::metrics::LogLossAccumulator;
use adclick::ParamGuard;
use adclick_ftrl::{FollowTheRegularizedLeader, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const N_COORDINATES: usize = 1 << 16;

fn main() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(42);

    let params = FollowTheRegularizedLeader::params(0.1, 1.0, 1.0, 1.0, N_COORDINATES).check()?;
    let mut model = FollowTheRegularizedLeader::new(params);

    // Every tenth record is held out to imitate online validation
    let mut holdout = LogLossAccumulator::new();
    for t in 0..200_000usize {
        let site = rng.gen_range(0..50usize);
        let device = rng.gen_range(0..20usize);
        let x = vec![0, 1 + site, 100 + device];
        let ctr = if site % 5 == 0 { 0.4 } else { 0.1 };
        let y = rng.gen_bool(ctr);

        if t % 10 == 0 {
            holdout.add(y, model.predict(&x)?);
        } else {
            model.learn(&x, y)?;
        }
    }

    println!(
        "holdout log loss {:.5} over {} records, {} nonzero weights",
        holdout.mean().unwrap_or(f64::NAN),
        holdout.count(),
        model.nonzero_weights()
    );
    Ok(())
}

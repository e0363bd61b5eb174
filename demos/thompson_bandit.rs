use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use thompson_bandit::{Bandit, BanditConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), thompson_bandit::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Simulated true success probabilities.
    let truth = [0.04, 0.05, 0.07];

    let mut bandit = Bandit::with_seed(BanditConfig::EmptyCount(truth.len()), 0)?;

    // Separate RNG to simulate the environment.
    let mut env = StdRng::seed_from_u64(123);

    let mut retired = std::collections::BTreeSet::new();
    for t in 1..=20_000u64 {
        let arm = bandit.select_arm()?;
        let reward = if env.random::<f64>() < truth[arm] { 1.0 } else { 0.0 };
        bandit.reward(arm, reward)?;

        if t % 1_000 == 0 {
            let report = bandit.check_convergence_explain(0.01)?;
            let pulls: Vec<u64> = bandit.arms().iter().map(|a| a.trials()).collect();
            info!(t, best = ?report.best, ?pulls, "checkpoint");
            for i in report.drop_set() {
                if retired.insert(i) {
                    info!(t, arm = i, "arm can be retired");
                }
            }
        }
    }
    Ok(())
}

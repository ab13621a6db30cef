use adclick_cli::Args;
use anyhow::Context;
use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("{:?}", args);

    let result = adclick_cli::run(&args).context("click prediction run failed")?;
    info!(
        "{} combinations tried, best holdout logloss {:.6}",
        result.trials.len(),
        result.best.log_loss
    );
    Ok(())
}

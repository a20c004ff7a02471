//! Trains the action-value baseline with the default hyperparameters.
//!
//! Reads `chess_env.toml` from the working directory when present, writes
//! the policy to `chess_agent_v0.json` and episode logs to `training_logs/`.

use anyhow::Context;
use chess_env::EnvConfig;
use tracing::info;
use trainer::{init_tracing, EpisodeLog, Trainer, TrainingConfig};

const ENV_CONFIG_FILE: &str = "chess_env.toml";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = TrainingConfig::default();
    let env_config = EnvConfig::load_or_default(ENV_CONFIG_FILE)
        .with_context(|| format!("Failed to load {ENV_CONFIG_FILE}"))?;

    let mut log = EpisodeLog::create(&config.log_dir)?;
    let env_config_copy = config.log_dir.join(ENV_CONFIG_FILE);
    std::fs::write(&env_config_copy, env_config.to_toml_string()?)
        .with_context(|| format!("Failed to write {}", env_config_copy.display()))?;

    let mut trainer = Trainer::new(config.clone(), env_config);
    let summary = trainer.train(Some(&mut log))?;

    trainer.artifact().save(&config.model_path)?;
    info!(path = %config.model_path.display(), "policy saved");

    println!("Training complete");
    println!("{summary}");
    println!("Policy:        {}", config.model_path.display());
    println!("Episode log:   {}", log.path().display());
    Ok(())
}

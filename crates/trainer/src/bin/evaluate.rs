//! Plays one greedy episode with the trained policy, printing the board
//! after every step.

use anyhow::Context;
use chess_env::{ChessEnv, EnvConfig};
use trainer::{init_tracing, run_episode, ActionValuePolicy, PolicyArtifact, TrainingConfig};

const ENV_CONFIG_FILE: &str = "chess_env.toml";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let model_path = TrainingConfig::default().model_path;
    let artifact = PolicyArtifact::load(&model_path)
        .with_context(|| format!("Run `train` first to create {}", model_path.display()))?;
    let seed = artifact.config.seed;
    let mut policy = ActionValuePolicy::from_artifact(artifact, 0.0, seed);

    let env_config = EnvConfig::load_or_default(ENV_CONFIG_FILE)
        .with_context(|| format!("Failed to load {ENV_CONFIG_FILE}"))?;
    let mut env = ChessEnv::with_config(env_config);

    let record = run_episode(&mut env, &mut policy, |env, result| {
        println!("{}", env.render());
        println!("reward: {:+.3}", result.reward);
        if let Some(reason) = result.info.reason {
            println!("({reason:?})");
        }
        println!();
    })?;

    println!("Episode finished after {} steps", record.steps);
    println!("Total reward:  {:.3}", record.total_reward);
    println!("Illegal moves: {}", record.illegal_moves);
    println!("Moves made:    {}", record.moves_made);
    match record.winner {
        Some(winner) => println!("Winner:        {winner:?}"),
        None => println!("Winner:        none"),
    }
    Ok(())
}

use super::*;
use chess_env::{ChessMove, Position, StepReason};

fn action(env: &ChessEnv, uci: &str) -> usize {
    env.codec()
        .encode(ChessMove::from_uci(uci).unwrap())
        .unwrap()
}

fn step(reward: f64, terminated: bool) -> RolloutStep {
    RolloutStep {
        action: 0,
        reward,
        terminated,
    }
}

// =============================================================================
// Discounted returns
// =============================================================================

#[test]
fn test_returns_accumulate_backwards() {
    let steps = [step(1.0, false), step(0.0, false), step(2.0, false)];
    let returns = discounted_returns(&steps, 0.5);
    assert_eq!(returns, vec![1.5, 1.0, 2.0]);
}

#[test]
fn test_returns_stop_at_episode_end() {
    let steps = [step(1.0, false), step(-1.0, true), step(4.0, false)];
    let returns = discounted_returns(&steps, 0.5);
    // The third step belongs to the next episode
    assert_eq!(returns, vec![0.5, -1.0, 4.0]);
}

#[test]
fn test_returns_of_empty_rollout() {
    assert!(discounted_returns(&[], 0.99).is_empty());
}

#[test]
fn test_rollout_buffers_are_independent() {
    let mut rollout = Rollout::new(2, 2);
    rollout.push(0, step(1.0, false));
    rollout.push(0, step(1.0, false));
    rollout.push(1, step(3.0, true));
    assert!(!rollout.is_full());

    rollout.push(1, step(5.0, false));
    assert!(rollout.is_full());
    assert_eq!(rollout.len(), 4);

    let returns: Vec<f64> = rollout.samples(1.0).into_iter().map(|(_, g)| g).collect();
    assert_eq!(returns, vec![2.0, 1.0, 3.0, 5.0]);

    rollout.clear();
    assert!(rollout.is_empty());
}

// =============================================================================
// Vectorized environments
// =============================================================================

#[test]
fn test_vec_env_steps_every_copy() {
    let mut envs = VecEnv::new(3, &EnvConfig::default());
    envs.reset();
    assert_eq!(envs.len(), 3);

    let e2e4 = action(envs.env(0), "e2e4");
    let a1a1 = action(envs.env(0), "a1a1");
    let results = envs.step(&[e2e4, a1a1, e2e4]).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].info.reason, None);
    assert_eq!(results[1].info.reason, Some(StepReason::IllegalMove));
    assert_eq!(envs.env(1).position().fen(), Position::startpos().fen());
    assert_ne!(envs.observations()[0], envs.observations()[1]);
    assert_eq!(envs.observations()[0], envs.observations()[2]);
}

#[test]
fn test_vec_env_resets_finished_episodes() {
    let config = EnvConfig {
        min_illegal_threshold: 0,
        ..Default::default()
    };
    let mut envs = VecEnv::new(1, &config);
    envs.reset();
    let a1a1 = action(envs.env(0), "a1a1");

    let first = envs.step(&[a1a1]).unwrap();
    assert!(!first[0].terminated);

    let second = envs.step(&[a1a1]).unwrap();
    assert!(second[0].terminated);
    assert_eq!(second[0].info.reason, Some(StepReason::TooManyIllegalMoves));
    // The terminal transition is reported, the environment already restarted
    assert_eq!(envs.env(0).episode().illegal_moves, 0);
    assert_eq!(second[0].observation, envs.env(0).observation());
}

#[test]
fn test_vec_env_rejects_out_of_range_actions() {
    let mut envs = VecEnv::new(1, &EnvConfig::default());
    envs.reset();
    assert!(envs.step(&[chess_env::ACTION_SPACE_SIZE]).is_err());
}

use super::*;

const EMPTY_BOARD: Observation = [[0; 8]; 8];

#[test]
fn random_policy_stays_in_populated_range() {
    let mut policy = RandomPolicy::new(7);
    for _ in 0..1000 {
        assert!(policy.predict(&EMPTY_BOARD) < NUM_MOVE_SLOTS);
    }
}

#[test]
fn random_policy_is_reproducible_from_seed() {
    let mut a = RandomPolicy::new(42);
    let mut b = RandomPolicy::new(42);
    let first: Vec<usize> = (0..20).map(|_| a.predict(&EMPTY_BOARD)).collect();
    let second: Vec<usize> = (0..20).map(|_| b.predict(&EMPTY_BOARD)).collect();
    assert_eq!(first, second);
}

#[test]
fn update_moves_value_toward_target() {
    let mut policy = ActionValuePolicy::new(0.0, 1);
    policy.update(796, 1.0, 0.5);
    assert_eq!(policy.value(796), 0.5);
    assert_eq!(policy.visits(796), 1);

    policy.update(796, 1.0, 0.5);
    assert_eq!(policy.value(796), 0.75);
    assert_eq!(policy.visits(796), 2);
}

#[test]
fn greedy_action_tracks_the_best_value() {
    let mut policy = ActionValuePolicy::new(0.0, 1);
    assert_eq!(policy.greedy_action(), 0);

    policy.update(796, 1.0, 0.5);
    assert_eq!(policy.greedy_action(), 796);
    assert_eq!(policy.predict(&EMPTY_BOARD), 796);

    policy.update(100, 2.0, 0.5);
    assert_eq!(policy.greedy_action(), 100);

    // The leader drops below zero: everything untouched (0.0) beats it,
    // and 796 is still ahead of the rest
    policy.update(100, -10.0, 1.0);
    assert_eq!(policy.greedy_action(), 796);

    // Penalizing index 0 does not change the leader
    policy.update(0, -0.1, 1.0);
    assert_eq!(policy.greedy_action(), 796);
}

#[test]
fn exploration_one_acts_randomly() {
    let mut policy = ActionValuePolicy::new(1.0, 3);
    policy.update(796, 1.0, 1.0);
    let picks: Vec<usize> = (0..50).map(|_| policy.predict(&EMPTY_BOARD)).collect();
    assert!(picks.iter().any(|&a| a != 796));
    assert!(picks.iter().all(|&a| a < NUM_MOVE_SLOTS));
}

#[test]
fn artifact_save_and_load() {
    let config = TrainingConfig::default();
    let mut policy = ActionValuePolicy::new(0.1, 5);
    policy.update(796, 0.4, 1.0);

    let path = std::env::temp_dir().join(format!("trainer_policy_{}.json", std::process::id()));
    policy.to_artifact(&config).save(&path).unwrap();
    let artifact = PolicyArtifact::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(artifact.policy, "action-value");
    assert_eq!(artifact.config, config);

    let restored = ActionValuePolicy::from_artifact(artifact, 0.0, 5);
    assert_eq!(restored.greedy_action(), 796);
    assert_eq!(restored.value(796), 0.4);
    assert_eq!(restored.visits(796), 1);
}

#[test]
fn load_rejects_truncated_tables() {
    let artifact = PolicyArtifact {
        policy: "action-value".to_string(),
        config: TrainingConfig::default(),
        values: vec![0.0; 10],
        visits: vec![0; 10],
    };
    let path = std::env::temp_dir().join(format!("trainer_short_{}.json", std::process::id()));
    artifact.save(&path).unwrap();
    let loaded = PolicyArtifact::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(loaded.is_err());
}

#[test]
fn load_missing_file_fails() {
    let path = std::env::temp_dir().join("trainer_policy_missing.json");
    assert!(PolicyArtifact::load(&path).is_err());
}

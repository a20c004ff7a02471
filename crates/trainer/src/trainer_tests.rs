use super::*;

fn small_config() -> TrainingConfig {
    TrainingConfig {
        total_timesteps: 96,
        n_steps: 16,
        num_envs: 2,
        learning_rate: 0.5,
        ..Default::default()
    }
}

#[test]
fn test_train_collects_requested_timesteps() {
    let mut trainer = Trainer::new(small_config(), EnvConfig::default());
    let summary = trainer.train(None).unwrap();

    assert_eq!(summary.timesteps, 96);
    // Mostly illegal actions: episodes end on the illegal-move budget
    assert!(summary.episodes > 0);
    assert!(summary.runaways > 0);
    assert_eq!(
        summary.white_wins + summary.black_wins + summary.draws + summary.runaways,
        summary.episodes
    );
}

#[test]
fn test_train_penalizes_the_null_move() {
    let mut trainer = Trainer::new(small_config(), EnvConfig::default());
    trainer.train(None).unwrap();

    // a1a1 is the initial greedy choice and can never be legal
    assert!(trainer.policy().visits(0) > 0);
    assert!(trainer.policy().value(0) < 0.0);
    assert_ne!(trainer.policy().greedy_action(), 0);
}

#[test]
fn test_train_is_reproducible() {
    let mut first = Trainer::new(small_config(), EnvConfig::default());
    let mut second = Trainer::new(small_config(), EnvConfig::default());
    assert_eq!(first.train(None).unwrap(), second.train(None).unwrap());
    assert_eq!(first.artifact(), second.artifact());
}

#[test]
fn test_train_logs_every_episode() {
    let dir = std::env::temp_dir().join(format!("trainer_run_{}", std::process::id()));
    let mut log = EpisodeLog::create(&dir).unwrap();

    let mut trainer = Trainer::new(small_config(), EnvConfig::default());
    let summary = trainer.train(Some(&mut log)).unwrap();

    let contents = std::fs::read_to_string(log.path()).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    let records: Vec<EpisodeRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len() as u64, summary.episodes);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.episode, i as u64);
    }
}

#[test]
fn test_summary_mean_reward() {
    let mut summary = TrainingSummary::default();
    assert_eq!(summary.mean_reward(), 0.0);

    let record = EpisodeRecord {
        episode: 0,
        steps: 4,
        total_reward: 2.0,
        illegal_moves: 0,
        winner: Some(Winner::Black),
        reason: None,
        moves_made: 3,
    };
    summary.add(&record);
    summary.add(&EpisodeRecord {
        total_reward: -1.0,
        winner: None,
        reason: Some(StepReason::TooManyIllegalMoves),
        ..record
    });

    assert_eq!(summary.episodes, 2);
    assert_eq!(summary.black_wins, 1);
    assert_eq!(summary.runaways, 1);
    assert_eq!(summary.mean_reward(), 0.5);
}

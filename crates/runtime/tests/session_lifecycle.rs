use std::fs;

use game_core::{Difficulty, EnemyAction, Maneuver, Projectile, TacticalState, Vec2};
use runtime::{HistoryRepository, MatchSession, RuntimeConfig};
use tempfile::TempDir;

const BASE_VISION: f32 = 300.0;
const FRAME: f32 = 0.5;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_test_writer()
        .try_init();
}

fn config_in(dir: &TempDir) -> RuntimeConfig {
    RuntimeConfig {
        save_data_dir: Some(dir.path().to_path_buf()),
        ..RuntimeConfig::default()
    }
}

/// Two consecutive matches against the same on-disk history.
///
/// 1. First match starts with no history: enemies use the fallback logic
/// 2. The player fires four times at 150 units, landing two hits
/// 3. The match record is persisted through the file-backed store
/// 4. Second match is seeded from that record and adapts from its first tick
#[test]
fn second_match_adapts_to_first() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);

    // ================================================================
    // First match: no history yet
    // ================================================================
    let mut session = MatchSession::builder(config.open_history().unwrap())
        .config(&config)
        .rng_seed(11)
        .build()
        .unwrap();
    let grunt = session.spawn_enemy();

    session.advance(FRAME);
    assert!(session.snapshot().is_none());

    let state = TacticalState::new(Vec2::ZERO, Vec2::new(100.0, 0.0), &[]);
    let action = session.decide(grunt, &state, BASE_VISION, FRAME).unwrap();
    assert_eq!(action, EnemyAction::Shoot(Vec2::new(1.0, 0.0)));

    for shot in 0..4 {
        session.on_player_shot(Vec2::ZERO, Some(Vec2::new(0.0, 150.0)));
        if shot % 2 == 0 {
            session.on_player_hit_enemy();
        }
        session.advance(FRAME);
    }

    let snapshot = *session.snapshot().unwrap();
    assert!((snapshot.aggression() - 2.0 / 3.0).abs() < 1e-5);
    assert_eq!(snapshot.accuracy(), 0.5);
    assert_eq!(snapshot.preferred_distance(), 0.5);

    let first = session
        .finish_at(1_000, 900, Difficulty::Normal.label(), true)
        .unwrap();
    assert!(
        temp_dir
            .path()
            .join("player_behavior_history.json")
            .exists()
    );

    // ================================================================
    // Second match: seeded from the persisted record
    // ================================================================
    let mut session = MatchSession::builder(config.open_history().unwrap())
        .config(&config)
        .rng_seed(12)
        .build()
        .unwrap();

    assert_eq!(session.tracker().total_shots(), 100);
    assert_eq!(session.tracker().total_hits(), 50);
    let history = session.tracker().load_history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].timestamp, first.timestamp);
    assert_eq!(history[0].score, 900);
    assert!(history[0].win);

    session.advance(FRAME);
    let seeded = *session.snapshot().unwrap();
    assert!((seeded.aggression() - snapshot.aggression()).abs() < 1e-4);
    assert_eq!(seeded.accuracy(), 0.5);

    // Accuracy 0.5 puts the standoff at 210 units; 230 is pursued with
    // urgency 1 + 0.5 * 0.4.
    let chaser = session.spawn_enemy_with(false);
    let state = TacticalState::new(Vec2::ZERO, Vec2::new(230.0, 0.0), &[]);
    match session.decide(chaser, &state, BASE_VISION, FRAME).unwrap() {
        EnemyAction::Move(direction) => {
            assert!((direction.x - 1.2).abs() < 1e-5);
            assert_eq!(direction.y, 0.0);
        }
        other => panic!("expected pursuit, got {other:?}"),
    }

    // Aggression above 0.6 unlocks evasion for capable enemies.
    let dodger = session.spawn_enemy_with(true);
    let incoming = [Projectile::new(Vec2::new(50.0, 0.0), Vec2::new(-1.0, 0.0))];
    let state = TacticalState::new(Vec2::ZERO, Vec2::new(100.0, 0.0), &incoming);

    let mut evasions = 0;
    for _ in 0..20 {
        session.advance(FRAME);
        let action = session.decide(dodger, &state, BASE_VISION, FRAME).unwrap();
        if session.enemy(dodger).unwrap().last_maneuver() == Maneuver::Evade {
            assert_eq!(action, EnemyAction::Move(Vec2::new(0.0, -1.0)));
            evasions += 1;
        }
    }
    assert!(evasions > 0, "evasion never triggered in 20 ticks");

    session
        .finish_at(2_000, 1_100, Difficulty::Hard.label(), false)
        .unwrap();

    let history = config.open_history().unwrap();
    let records = history.load().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].difficulty, "Hard");
}

/// A configured cap keeps only the most recent matches across sessions.
#[test]
fn history_cap_holds_across_sessions() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let mut config = config_in(&temp_dir);
    config.behavior.max_records = 3;

    for timestamp in 1..=5 {
        let mut session = MatchSession::builder(config.open_history().unwrap())
            .config(&config)
            .rng_seed(timestamp as u64)
            .build()
            .unwrap();
        session.on_player_shot(Vec2::ZERO, Some(Vec2::new(60.0, 0.0)));
        session.advance(FRAME);
        session
            .finish_at(timestamp, 10, Difficulty::Easy.label(), false)
            .unwrap();
    }

    let records = config.open_history().unwrap().load().unwrap();
    let stamps: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, vec![3, 4, 5]);
}

/// Corrupt rows in the stored history are skipped, never fatal.
#[test]
fn corrupt_rows_do_not_block_a_session() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);

    let document = serde_json::json!({
        "namespace": "player_behavior_history",
        "entries": {
            "records": "1,10,Easy,1,0.3000,0.4000,0.5000,1\nbroken,row,here\n2,20,Easy,0,0.3000,0.4000,0.5000,1\n"
        }
    });
    fs::write(
        temp_dir.path().join("player_behavior_history.json"),
        document.to_string(),
    )
    .unwrap();

    let session = MatchSession::builder(config.open_history().unwrap())
        .config(&config)
        .rng_seed(5)
        .build()
        .unwrap();

    assert_eq!(session.tracker().load_history().unwrap().len(), 2);
    assert_eq!(session.tracker().total_shots(), 100);
    assert_eq!(session.tracker().total_hits(), 40);
}

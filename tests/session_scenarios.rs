//! End-to-end runs of the simulation core against a recording host.

use rail_runner::core::components::{ObstacleKind, VerticalState};
use rail_runner::gameplay::autopilot::Autopilot;
use rail_runner::gameplay::{Command, Cue, FrameCommands, FrameOutcome, GameSession, RecordingHost, Screen};
use rail_runner::{ManualClock, RunnerConfig};

const FRAME_MS: u64 = 16;

fn started(seed: u64) -> (GameSession, RecordingHost, ManualClock) {
    let mut session = GameSession::with_seed(RunnerConfig::default(), seed);
    let mut host = RecordingHost::new();
    session.start(&mut host);
    (session, host, ManualClock::new())
}

fn run_until_over(
    session: &mut GameSession,
    host: &mut RecordingHost,
    clock: &mut ManualClock,
    max_frames: u64,
    pilot: Option<&Autopilot>,
) -> Option<rail_runner::RunSummary> {
    for _ in 0..max_frames {
        clock.advance_ms(FRAME_MS);
        let cmds = match pilot {
            Some(p) => p.decide(session),
            None => FrameCommands::default(),
        };
        if let FrameOutcome::GameOver(summary) = session.tick(cmds, &*clock, host) {
            return Some(summary);
        }
    }
    None
}

#[test]
fn idle_runner_eventually_crashes_with_pre_collision_score() {
    for seed in 0..10 {
        let (mut s, mut host, mut clock) = started(seed);
        let summary = run_until_over(&mut s, &mut host, &mut clock, 5_000, None)
            .unwrap_or_else(|| panic!("seed {seed}: idle runner survived 5000 frames"));

        assert!(summary.cause.is_some());
        assert_eq!(summary.score, summary.frames + 10 * summary.coins as u64, "seed {seed}");
        assert_eq!(host.cue_count(Cue::GameOver), 1);
        assert_eq!(host.last_screen(), Some(Screen::GameOver));
        assert!(!host.ambient_running);
        assert_eq!(s.last_summary(), Some(&summary));

        // finished sessions stay idle
        assert_eq!(
            s.tick(FrameCommands::default(), &clock, &mut host),
            FrameOutcome::Idle
        );
    }
}

#[test]
fn same_seed_same_run() {
    let pilot = Autopilot::default();
    let mut results = Vec::new();
    for _ in 0..2 {
        let (mut s, mut host, mut clock) = started(42);
        let outcome = run_until_over(&mut s, &mut host, &mut clock, 3_000, Some(&pilot));
        results.push((outcome, s.frame(), s.state.coins, host.cues.clone()));
    }
    assert_eq!(results[0], results[1]);
}

#[test]
fn speed_is_monotonic_and_capped() {
    let cfg = RunnerConfig::default();
    let cap = cfg.speed.cap();
    let pilot = Autopilot::default();
    for seed in 0..5 {
        let (mut s, mut host, mut clock) = started(seed);
        let mut last = s.state.speed;
        for _ in 0..4_000 {
            clock.advance_ms(FRAME_MS);
            let cmds = pilot.decide(&s);
            if let FrameOutcome::GameOver(_) = s.tick(cmds, &clock, &mut host) {
                break;
            }
            assert!(s.state.speed >= last);
            assert!(s.state.speed <= cap + 1e-5);
            last = s.state.speed;
        }
    }
}

#[test]
fn visuals_are_released_exactly_once() {
    let pilot = Autopilot::default();
    for seed in 0..5 {
        let (mut s, mut host, mut clock) = started(seed);
        for _ in 0..1_500 {
            clock.advance_ms(FRAME_MS);
            let cmds = pilot.decide(&s);
            if let FrameOutcome::GameOver(_) = s.tick(cmds, &clock, &mut host) {
                break;
            }
            assert_eq!(
                host.live_visuals(),
                s.obstacles.len() + s.coins.len() + s.bursts.len()
            );
        }
        let mut removed = host.removed.clone();
        removed.sort();
        removed.dedup();
        assert_eq!(removed.len(), host.removed.len(), "seed {seed}: double release");
    }
}

#[test]
fn pause_freezes_the_world() {
    let (mut s, mut host, mut clock) = started(3);
    for _ in 0..10 {
        clock.advance_ms(FRAME_MS);
        s.tick(FrameCommands::default(), &clock, &mut host);
    }
    assert!(s.pause(&mut host));
    let frame = s.frame();
    let zs: Vec<f32> = s.obstacles.iter().map(|o| o.z).collect();
    for _ in 0..100 {
        clock.advance_ms(FRAME_MS);
        assert_eq!(
            s.tick(FrameCommands::default().with(Command::Jump), &clock, &mut host),
            FrameOutcome::Paused
        );
    }
    assert_eq!(s.frame(), frame);
    assert_eq!(s.obstacles.iter().map(|o| o.z).collect::<Vec<_>>(), zs);
    assert_eq!(s.player.vertical, VerticalState::Running);

    assert!(s.resume(&mut host));
    assert!(!s.resume(&mut host));
    clock.advance_ms(FRAME_MS);
    assert_eq!(
        s.tick(FrameCommands::default(), &clock, &mut host),
        FrameOutcome::Advanced
    );
    assert_eq!(s.frame(), frame + 1);
}

#[test]
fn coin_in_lane_is_collected_once() {
    let (mut s, mut host, mut clock) = started(5);
    s.obstacles.clear();
    s.coins.clear();
    let lane = s.player.lane;
    let z = s.player.z - 1.0;
    s.spawn_coin(lane, z, &mut host);

    clock.advance_ms(FRAME_MS);
    s.tick(FrameCommands::default(), &clock, &mut host);
    assert_eq!(s.state.coins, 1);
    assert_eq!(host.cue_count(Cue::Coin), 1);
    assert_eq!(host.collect_animations.len(), 1);
    assert!(s.coins.is_empty());
    assert_eq!(s.bursts.len(), 1);
    // 1 per frame plus the coin
    assert_eq!(s.state.display_score(), 11);

    for _ in 0..20 {
        clock.advance_ms(FRAME_MS);
        s.tick(FrameCommands::default(), &clock, &mut host);
    }
    assert_eq!(s.state.coins, 1);
    assert!(s.bursts.is_empty());
}

#[test]
fn milestone_raises_speed_once_per_crossing() {
    let (mut s, mut host, mut clock) = started(9);
    s.obstacles.clear();
    s.coins.clear();
    s.state.score = 495.0;
    let before = s.state.speed;
    let difficulty = s.state.difficulty;
    for _ in 0..10 {
        clock.advance_ms(FRAME_MS);
        s.tick(FrameCommands::default(), &clock, &mut host);
    }
    assert_eq!(host.cue_count(Cue::Milestone), 1);
    assert_eq!(s.state.difficulty, difficulty + 1);
    assert_eq!(s.state.difficulty, 2);
    assert!((s.state.speed - (before + 0.02)).abs() < 1e-5);
}

#[test]
fn jump_clears_a_box_in_lane() {
    let (mut s, mut host, mut clock) = started(11);
    s.obstacles.clear();
    s.coins.clear();
    let lane = s.player.lane;
    let z = s.player.z - 3.0;
    s.spawn_obstacle(ObstacleKind::Box, lane, z, &mut host);

    clock.advance_ms(FRAME_MS);
    s.tick(FrameCommands::default().with(Command::Jump), &clock, &mut host);
    let mut outcome = FrameOutcome::Advanced;
    for _ in 0..20 {
        clock.advance_ms(FRAME_MS);
        outcome = s.tick(FrameCommands::default(), &clock, &mut host);
        if matches!(outcome, FrameOutcome::GameOver(_)) {
            break;
        }
    }
    assert_eq!(outcome, FrameOutcome::Advanced);
    assert!(s.player.vertical.is_jumping());
}

#[test]
fn box_ends_a_running_player_with_pre_collision_totals() {
    let (mut s, mut host, mut clock) = started(13);
    s.obstacles.clear();
    s.coins.clear();
    let lane = s.player.lane;
    let player_z = s.player.z;
    s.spawn_coin(lane, player_z - 1.0, &mut host);
    s.spawn_obstacle(ObstacleKind::Box, lane, player_z - 6.0, &mut host);

    let summary = run_until_over(&mut s, &mut host, &mut clock, 60, None)
        .expect("box in lane ends the run");
    assert_eq!(summary.cause, Some(ObstacleKind::Box));
    assert_eq!(summary.coins, 1);
    // one point per completed frame plus the coin; the fatal frame adds nothing
    assert_eq!(summary.score, summary.frames + 10);
    assert_eq!(s.state.display_score(), summary.score);
    assert_eq!(host.cue_count(Cue::GameOver), 1);
    assert!(!s.state.is_playing);
}

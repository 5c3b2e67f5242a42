//! Game loop orchestration: lifecycle (start, pause, resume, menu, game
//! over) and the fixed per-frame update order.

use bevy::log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::core::clock::Clock;
use crate::core::components::{
    Coin, CoinBurst, GameState, Lane, LaneLayout, Obstacle, ObstacleKind,
};
use crate::core::config::RunnerConfig;
use crate::gameplay::collaborators::{Command, Cue, FrameCommands, FrameView, Host, Screen};
use crate::gameplay::collision::{self, Hit, Probe};
use crate::gameplay::player::Player;
use crate::gameplay::progression::Progression;
use crate::gameplay::spawner::{SpawnCluster, Spawner};
use crate::gameplay::track::TrackRecycler;

/// Final numbers of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub score: u64,
    pub coins: u32,
    pub difficulty: u32,
    pub speed: f32,
    pub frames: u64,
    /// The obstacle that ended the run, if one did.
    pub cause: Option<ObstacleKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No run in progress.
    Idle,
    Paused,
    Advanced,
    GameOver(RunSummary),
}

pub struct GameSession {
    config: RunnerConfig,
    lanes: LaneLayout,
    pub state: GameState,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub bursts: Vec<CoinBurst>,
    track: TrackRecycler,
    spawner: Spawner,
    progression: Progression,
    rng: StdRng,
    frame: u64,
    last_summary: Option<RunSummary>,
}

impl GameSession {
    /// Seeds from `config.seed`, or from entropy when unset.
    pub fn new(config: RunnerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_seed(config: RunnerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: RunnerConfig, mut rng: StdRng) -> Self {
        let lanes = LaneLayout::from_track(&config.track);
        let track = TrackRecycler::new(&config.track, &lanes, &mut rng);
        Self {
            state: GameState::new(config.speed.start_speed()),
            player: Player::new(&config.player, &lanes),
            obstacles: Vec::new(),
            coins: Vec::new(),
            bursts: Vec::new(),
            track,
            spawner: Spawner::default(),
            progression: Progression::default(),
            rng,
            frame: 0,
            last_summary: None,
            lanes,
            config,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn lanes(&self) -> &LaneLayout {
        &self.lanes
    }

    pub fn track(&self) -> &TrackRecycler {
        &self.track
    }

    /// Frames advanced in the current run.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn milestones(&self) -> u64 {
        self.progression.milestones()
    }

    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    /// Resets everything and begins a new run with the opening clusters.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.cue(Cue::Start);
        host.start_ambient_loop();

        self.clear_entities(host);
        self.state = GameState {
            is_playing: true,
            ..GameState::new(self.config.speed.start_speed())
        };
        self.player.reset(&self.config.player, &self.lanes);
        self.spawner.reset();
        self.progression.reset();
        self.frame = 0;
        self.last_summary = None;

        host.show_screen(Screen::None);
        for cluster in Spawner::initial_clusters(&mut self.rng, &self.config.spawn, &self.lanes) {
            self.spawn_cluster(cluster, host);
        }
        self.report(host);
        info!(
            target: "session",
            "run started: {} obstacles, {} coins",
            self.obstacles.len(),
            self.coins.len()
        );
    }

    /// Returns false unless a run is in progress and not already paused.
    pub fn pause<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.state.is_playing || self.state.is_paused {
            return false;
        }
        self.state.is_paused = true;
        host.show_screen(Screen::Pause);
        host.stop_ambient_loop();
        info!(target: "session", "paused at frame {}", self.frame);
        true
    }

    pub fn resume<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.state.is_playing || !self.state.is_paused {
            return false;
        }
        self.state.is_paused = false;
        host.show_screen(Screen::None);
        host.start_ambient_loop();
        info!(target: "session", "resumed");
        true
    }

    /// Halts the run and shows the start screen. Entities stay until the next start.
    pub fn return_to_menu<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.state.is_playing = false;
        self.state.is_paused = false;
        host.stop_ambient_loop();
        host.show_screen(Screen::Start);
        info!(target: "session", "returned to menu");
    }

    /// Ends the current run without a collision.
    pub fn game_over<H: Host + ?Sized>(&mut self, host: &mut H) -> RunSummary {
        self.finish(None, host)
    }

    fn finish<H: Host + ?Sized>(&mut self, hit: Option<Hit>, host: &mut H) -> RunSummary {
        self.state.is_playing = false;
        self.state.is_paused = false;
        host.cue(Cue::GameOver);
        host.stop_ambient_loop();
        self.report(host);
        host.show_screen(Screen::GameOver);

        let summary = RunSummary {
            score: self.state.display_score(),
            coins: self.state.coins,
            difficulty: self.state.difficulty,
            speed: self.state.speed,
            frames: self.frame,
            cause: hit.map(|h| h.kind),
        };
        match hit {
            Some(h) => info!(
                target: "session",
                "game over: {:?} in lane {} at z {:.2}, score {}",
                h.kind,
                h.lane,
                h.z,
                summary.score
            ),
            None => info!(target: "session", "game over, score {}", summary.score),
        }
        self.last_summary = Some(summary.clone());
        summary
    }

    /// Applies one command immediately. Ignored unless the run is active.
    pub fn apply_command<H: Host + ?Sized>(
        &mut self,
        cmd: Command,
        clock: &dyn Clock,
        host: &mut H,
    ) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let applied = match cmd {
            Command::Pause => return self.pause(host),
            Command::MoveLeft => self.player.move_left(&self.lanes),
            Command::MoveRight => self.player.move_right(&self.lanes),
            Command::Jump => self.player.jump(clock.now()),
            Command::Slide => self.player.slide(clock.now()),
        };
        if applied {
            host.cue(match cmd {
                Command::Jump => Cue::Jump,
                Command::Slide => Cue::Slide,
                _ => Cue::LaneSwitch,
            });
        }
        applied
    }

    /// Advances the simulation by one frame.
    pub fn tick<H: Host + ?Sized>(
        &mut self,
        commands: FrameCommands,
        clock: &dyn Clock,
        host: &mut H,
    ) -> FrameOutcome {
        if !self.state.is_playing {
            return FrameOutcome::Idle;
        }
        if self.state.is_paused {
            return FrameOutcome::Paused;
        }
        for cmd in commands.iter() {
            self.apply_command(cmd, clock, host);
            if self.state.is_paused {
                return FrameOutcome::Paused;
            }
        }

        self.player.update(clock.now(), &self.config.player);

        let speed = self.state.speed;
        self.track.advance(speed);
        host.advance_segment_pool(self.track.segments());

        let probe = Probe::of(&self.player);
        if let Some(hit) = collision::update_obstacles(
            &mut self.obstacles,
            speed,
            &probe,
            &self.lanes,
            &self.config.collision,
            self.config.spawn.despawn_margin,
            host,
        ) {
            return FrameOutcome::GameOver(self.finish(Some(hit), host));
        }

        let started = collision::update_coins(
            &mut self.coins,
            speed,
            &probe,
            &self.lanes,
            &self.config.collision,
            self.config.spawn.despawn_margin,
            self.config.scoring.coin_value,
            &mut self.state,
            host,
        );
        collision::advance_bursts(
            &mut self.bursts,
            speed,
            self.config.scoring.collect_anim_step,
            host,
        );
        self.bursts.extend(started);

        if let Some(cluster) =
            self.spawner
                .tick(&mut self.rng, &self.config.spawn, &self.lanes, self.player.z)
        {
            debug!(
                target: "spawner",
                "cluster: {:?} in lane {} at z {:.1}, {} coins",
                cluster.kind,
                cluster.obstacle_lane,
                cluster.z,
                cluster.coins.len()
            );
            self.spawn_cluster(cluster, host);
        }

        let crossed =
            self.progression
                .advance(&mut self.state, &self.config.scoring, &self.config.speed);
        for _ in 0..crossed {
            host.cue(Cue::Milestone);
            info!(
                target: "session",
                "milestone {}: speed {:.3}, difficulty {}",
                self.progression.milestones(),
                self.state.speed,
                self.state.difficulty
            );
        }

        self.frame += 1;
        self.report(host);
        host.render_frame(&self.view());
        FrameOutcome::Advanced
    }

    pub fn spawn_obstacle<H: Host + ?Sized>(
        &mut self,
        kind: ObstacleKind,
        lane: Lane,
        z: f32,
        host: &mut H,
    ) {
        let lane = self.lanes.clamp(lane);
        let visual = host.spawn_obstacle_visual(kind, lane, z);
        self.obstacles.push(Obstacle {
            lane,
            kind,
            z,
            collidable: true,
            visual,
        });
    }

    pub fn spawn_coin<H: Host + ?Sized>(&mut self, lane: Lane, z: f32, host: &mut H) {
        let lane = self.lanes.clamp(lane);
        let visual = host.spawn_coin_visual(lane, z);
        self.coins.push(Coin {
            lane,
            z,
            collected: false,
            visual,
        });
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            frame: self.frame,
            player: self.player.pose(),
            lanes: self.lanes,
            obstacles: &self.obstacles,
            coins: &self.coins,
            bursts: &self.bursts,
            state: &self.state,
        }
    }

    fn spawn_cluster<H: Host + ?Sized>(&mut self, cluster: SpawnCluster, host: &mut H) {
        self.spawn_obstacle(cluster.kind, cluster.obstacle_lane, cluster.z, host);
        for (lane, z) in cluster.coins {
            self.spawn_coin(lane, z, host);
        }
    }

    fn clear_entities<H: Host + ?Sized>(&mut self, host: &mut H) {
        for ob in self.obstacles.drain(..) {
            host.remove_visual(ob.visual);
        }
        for coin in self.coins.drain(..) {
            host.remove_visual(coin.visual);
        }
        for burst in self.bursts.drain(..) {
            host.remove_visual(burst.visual);
        }
    }

    fn report<H: Host + ?Sized>(&self, host: &mut H) {
        host.report_score(self.state.display_score());
        host.report_coins(self.state.coins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::gameplay::collaborators::RecordingHost;

    fn session() -> (GameSession, RecordingHost, ManualClock) {
        (
            GameSession::with_seed(RunnerConfig::default(), 7),
            RecordingHost::new(),
            ManualClock::new(),
        )
    }

    #[test]
    fn idle_until_started() {
        let (mut s, mut host, clock) = session();
        assert_eq!(s.tick(FrameCommands::default(), &clock, &mut host), FrameOutcome::Idle);
        assert_eq!(host.frames_rendered, 0);
    }

    #[test]
    fn commands_emit_cues_only_when_applied() {
        let (mut s, mut host, clock) = session();
        s.start(&mut host);
        s.obstacles.clear();
        assert!(s.apply_command(Command::MoveLeft, &clock, &mut host));
        assert!(!s.apply_command(Command::MoveLeft, &clock, &mut host));
        assert_eq!(host.cue_count(Cue::LaneSwitch), 1);
        assert!(s.apply_command(Command::Jump, &clock, &mut host));
        assert!(!s.apply_command(Command::Slide, &clock, &mut host));
        assert_eq!(host.cue_count(Cue::Jump), 1);
        assert_eq!(host.cue_count(Cue::Slide), 0);
    }

    #[test]
    fn pause_command_skips_the_rest_of_the_frame() {
        let (mut s, mut host, clock) = session();
        s.start(&mut host);
        let cmds = FrameCommands::default()
            .with(Command::Pause)
            .with(Command::MoveLeft);
        assert_eq!(s.tick(cmds, &clock, &mut host), FrameOutcome::Paused);
        assert_eq!(s.player.lane, 1);
        assert_eq!(s.frame(), 0);
        assert_eq!(host.last_screen(), Some(Screen::Pause));
    }

    #[test]
    fn restart_releases_previous_visuals() {
        let (mut s, mut host, _) = session();
        s.start(&mut host);
        let first_run = host.spawned.len();
        s.start(&mut host);
        assert_eq!(host.removed.len(), first_run);
        assert_eq!(host.live_visuals(), s.obstacles.len() + s.coins.len());
    }
}

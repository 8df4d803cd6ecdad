//! A play session: one run at a time plus the bookkeeping around it
//!
//! Owns the simulation state, settings and personal best. The frame loop feeds it
//! real elapsed time; it turns that into fixed ticks.

use crate::challenge::{ChallengeLink, ChallengeProgress};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScoreStore;
use crate::platform::{KeyValueStore, PlayerNamespace};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputSampler, RunPhase, TickInput, tick};

/// Longest frame we try to catch up on (tab switches etc.)
const MAX_FRAME_DT: f32 = 0.25;

pub struct Session<S: KeyValueStore> {
    store: S,
    settings: Settings,
    state: GameState,
    high_scores: HighScoreStore,
    accumulator: f32,
    /// The run that just ended set a new personal best
    new_best: bool,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore> Session<S> {
    /// Load settings and the player's best, and sit on the start screen
    pub fn new(
        store: S,
        namespace: PlayerNamespace,
        seed: u64,
        challenge: Option<ChallengeLink>,
    ) -> Self {
        let settings = Settings::load(&store);
        let high_scores = HighScoreStore::load(&store, namespace);
        let control = settings.control_for(challenge.is_some());

        let mut state = GameState::new(seed, control);
        if let Some(link) = challenge {
            log::info!(
                "Challenge from {} (fid {}): beat {}",
                link.challenger_name,
                link.challenger_fid,
                link.target_score
            );
            state = state.with_challenge(ChallengeProgress::new(link));
        }

        Self {
            store,
            settings,
            state,
            high_scores,
            accumulator: 0.0,
            new_best: false,
            events: Vec::new(),
        }
    }

    /// Run as many fixed ticks as `dt` seconds of wall time allow. Returns ticks run.
    pub fn advance(&mut self, dt: f32, sampler: &mut impl InputSampler) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sampler.observe(&self.state);
            let input = sampler.sample();
            self.step(&input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop backlog we couldn't simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// One fixed tick plus run-over bookkeeping
    pub fn step(&mut self, input: &TickInput) {
        let was_over = self.state.is_over();
        tick(&mut self.state, input);

        if was_over && self.state.phase == RunPhase::Playing {
            self.new_best = false;
        }

        for event in &self.state.events {
            if let GameEvent::RunOver { score, wave } = event {
                log::info!("Run over: score {} wave {}", score, wave);
                self.new_best = self.high_scores.record(&mut self.store, *score);
            }
        }
        self.events.extend(self.state.events.iter().cloned());
    }

    /// Start a fresh run right away
    pub fn restart(&mut self, seed: u64) {
        self.state.restart(seed);
        self.accumulator = 0.0;
        self.new_best = false;
        self.events.clear();
        log::info!("Run restarted with seed: {}", seed);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn best(&self) -> u64 {
        self.high_scores.best()
    }

    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    pub fn namespace(&self) -> PlayerNamespace {
        self.high_scores.namespace()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings and persist them. Challenge runs keep jump controls.
    pub fn update_settings(&mut self, settings: Settings) {
        settings.save(&mut self.store);
        if self.state.challenge.is_none() {
            self.state.control = settings.control_mode;
        }
        self.settings = settings;
    }

    /// Events since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Challenge link for the current score
    pub fn share_link(&self, origin: &str) -> String {
        ChallengeLink::for_run(self.state.score, self.namespace().fid()).to_url(origin)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use crate::sim::{Autopilot, ControlMode, Entity, EntityKind, PointerInput};
    use glam::Vec2;

    fn session() -> Session<MemoryStore> {
        Session::new(MemoryStore::new(), PlayerNamespace::Fid(42), 7, None)
    }

    #[test]
    fn test_advance_runs_fixed_ticks() {
        let mut session = session();
        let mut input = PointerInput::new();
        input.press_start();

        // Just under two ticks of time
        let ran = session.advance(SIM_DT * 1.9, &mut input);
        assert_eq!(ran, 1);
        assert_eq!(session.state().phase, RunPhase::Playing);

        let ran = session.advance(SIM_DT * 1.2, &mut input);
        assert_eq!(ran, 2);
        assert_eq!(session.state().time_ticks, 2);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut session = session();
        let mut input = PointerInput::new();
        input.press_start();
        let ran = session.advance(10.0, &mut input);
        assert_eq!(ran, MAX_SUBSTEPS);
    }

    #[test]
    fn test_run_over_records_best() {
        let mut session = session();
        let mut input = PointerInput::new();
        input.press_start();
        session.advance(SIM_DT, &mut input);

        // Fake a long run, then lose the last life
        session.state.score = 900;
        session.state.lives = 1;
        let player = session.state.player.pos;
        session
            .state
            .entities
            .push(Entity::new(EntityKind::Fud, player, Vec2::ZERO));
        session.step(&TickInput::default());

        assert!(session.state().is_over());
        assert!(session.is_new_best());
        assert_eq!(session.best(), 900);
        assert_eq!(
            session.store().get("benji-highscore-42").as_deref(),
            Some("900")
        );
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::RunOver {
            score: 900,
            wave: 1
        }));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_restart_resets_run() {
        let mut session = session();
        session.state.score = 300;
        session.state.lives = 1;
        session.state.wave = 2;
        session
            .state
            .entities
            .push(Entity::new(EntityKind::Hype, Vec2::ZERO, Vec2::ZERO));

        session.restart(99);
        let state = session.state();
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
        assert!(state.entities.is_empty());
        assert_eq!(state.phase, RunPhase::Playing);
    }

    #[test]
    fn test_challenge_uses_jump_controls() {
        let link = ChallengeLink::new(500, "alice", 3);
        let session = Session::new(MemoryStore::new(), PlayerNamespace::Anonymous, 1, Some(link));
        assert_eq!(session.state().control, ControlMode::Jump);
        assert_eq!(session.state().challenge.as_ref().map(|c| c.target()), Some(500));
    }

    #[test]
    fn test_share_link_uses_player_fid() {
        let mut session = session();
        session.state.score = 1234;
        assert_eq!(
            session.share_link("https://benji.example"),
            "https://benji.example/challenge?score=1234&name=42&fid=42"
        );
    }

    #[test]
    fn test_settings_persist_through_session() {
        let mut session = session();
        let settings = Settings {
            control_mode: ControlMode::Jump,
            ..Settings::default()
        };
        session.update_settings(settings.clone());
        assert_eq!(session.state().control, ControlMode::Jump);
        assert_eq!(Settings::load(session.store()), settings);
    }

    #[test]
    fn test_shortcut_in_challenge_keeps_jump() {
        let link = ChallengeLink::new(500, "alice", 3);
        let mut session = Session::new(MemoryStore::new(), PlayerNamespace::Anonymous, 1, Some(link));
        let next = session.settings().toggled("g").unwrap();
        session.update_settings(next);
        assert!(!session.settings().show_grid);
        assert_eq!(session.state().control, ControlMode::Jump);
        assert!(!Settings::load(session.store()).show_grid);
    }

    #[test]
    fn test_autopilot_drives_session() {
        let mut session = session();
        let mut bot = Autopilot::new();
        session.advance(SIM_DT * 5.0, &mut bot);
        assert_eq!(session.state().phase, RunPhase::Playing);
        assert!(session.state().time_ticks >= 3);
    }
}

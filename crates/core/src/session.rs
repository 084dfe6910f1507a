//! GameSession - spawn/lock/clear sequencing, timing and lifecycle.
//!
//! The session exclusively owns the grid, the active piece and all scoring
//! state. It is advanced only through discrete command calls, each returning
//! the ordered list of events it produced; collaborators read snapshots after
//! a call returns and never hold references into the session.

use arrayvec::ArrayVec;

use tui_blockfall_types::{GameEvent, Phase};

use crate::config::EngineConfig;
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::rng::PieceSampler;
use crate::scoring::{drop_interval_for_level, level_for_score, score_for_clear};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};

/// Ordered events produced by one command. A single call emits at most the
/// lock chain (locked, cleared, leveled-up, game-over), so the capacity is
/// never reached.
pub type Events = ArrayVec<GameEvent, 8>;

#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    sampler: PieceSampler,
    phase: Phase,
    score: u32,
    level: u32,
    drop_interval_ms: f64,
    drop_accum_ms: f64,
}

impl GameSession {
    /// Create an idle session. Nothing moves until [`start`](Self::start).
    pub fn new(config: EngineConfig, seed: u32) -> Self {
        Self {
            grid: Grid::new(config.width(), config.height()),
            active: None,
            sampler: PieceSampler::new(seed),
            phase: Phase::Idle,
            score: 0,
            level: 1,
            drop_interval_ms: config.base_drop_interval_ms(),
            drop_accum_ms: 0.0,
            config,
        }
    }

    /// Reset all mutable state and spawn the first piece.
    ///
    /// If the spawn area is already blocked the session transitions straight
    /// to game-over, emitting the event before anything can tick.
    pub fn start(&mut self) -> Events {
        let mut events = Events::new();
        self.grid.clear();
        self.score = 0;
        self.level = 1;
        self.drop_interval_ms = self.config.base_drop_interval_ms();
        self.drop_accum_ms = 0.0;
        self.phase = Phase::Running;
        self.spawn_next(&mut events);
        events
    }

    /// Identical to [`start`](Self::start); a running, paused or finished
    /// session restarts from scratch with no residue. The piece sequence
    /// continues from the sampler's current state.
    pub fn restart(&mut self) -> Events {
        self.start()
    }

    /// Advance accumulated time; once it exceeds the drop interval, perform
    /// one automatic downward advance. No-op unless running.
    ///
    /// This is the single scheduling entry point. The session keeps no clock
    /// of its own; an external loop calls this once per frame.
    pub fn tick(&mut self, elapsed_ms: f64) -> Events {
        let mut events = Events::new();
        if !self.phase.running() {
            return events;
        }
        self.drop_accum_ms += elapsed_ms.max(0.0);
        if self.drop_accum_ms > self.drop_interval_ms {
            self.advance_down(&mut events);
        }
        events
    }

    /// Manual soft drop: advance the active piece one row, locking on
    /// contact. Always resets the gravity accumulator.
    pub fn soft_drop(&mut self) -> Events {
        let mut events = Events::new();
        if !self.phase.running() {
            return events;
        }
        self.advance_down(&mut events);
        events
    }

    /// Horizontal move; `dir` is interpreted by sign only.
    pub fn move_piece(&mut self, dir: i16) -> Events {
        let mut events = Events::new();
        if !self.phase.running() || dir == 0 {
            return events;
        }
        if let Some(active) = self.active.as_mut() {
            if active.translate(&self.grid, dir.signum()) {
                events.push(GameEvent::Moved);
            }
        }
        events
    }

    /// Rotate the active piece with the kick search. Emits `Rotated` only on
    /// success; a fully blocked rotation changes nothing.
    pub fn rotate(&mut self) -> Events {
        let mut events = Events::new();
        if !self.phase.running() {
            return events;
        }
        if let Some(active) = self.active.as_mut() {
            if active.rotate(&self.grid) {
                events.push(GameEvent::Rotated);
            }
        }
        events
    }

    /// Suspend gravity and commands. No-op unless running.
    pub fn pause(&mut self) -> Events {
        if self.phase.running() {
            self.phase = Phase::Paused;
        }
        Events::new()
    }

    /// Resume from pause. The gravity accumulator is reset so resuming never
    /// causes an immediate spurious drop.
    pub fn resume(&mut self) -> Events {
        if self.phase.paused() {
            self.phase = Phase::Running;
            self.drop_accum_ms = 0.0;
        }
        Events::new()
    }

    /// One downward advance; a blocked advance runs the full lock chain:
    /// merge, sweep, score/level/interval update, respawn, top-out check.
    fn advance_down(&mut self, events: &mut Events) {
        self.drop_accum_ms = 0.0;

        let locked = match self.active.take() {
            Some(mut piece) => {
                if piece.step_down(&self.grid) {
                    events.push(GameEvent::RowAdvanced);
                    self.active = Some(piece);
                    return;
                }
                piece
            }
            None => return,
        };

        self.grid.merge(&locked);
        events.push(GameEvent::Locked);

        let cleared = self.grid.sweep();
        if cleared > 0 {
            events.push(GameEvent::LinesCleared { count: cleared });
            self.score += score_for_clear(cleared);
            let new_level = level_for_score(self.score);
            if new_level != self.level {
                self.level = new_level;
                self.drop_interval_ms =
                    drop_interval_for_level(new_level, self.config.base_drop_interval_ms());
                events.push(GameEvent::LeveledUp { new_level });
            }
        }

        self.spawn_next(events);
    }

    /// Spawn the next piece; a colliding spawn is the top-out condition.
    /// The blocked piece stays visible for the presenter.
    fn spawn_next(&mut self, events: &mut Events) {
        let piece = ActivePiece::spawn(self.sampler.draw(), self.grid.width());
        if self.grid.collides(&piece) {
            self.phase = Phase::GameOver;
            events.push(GameEvent::GameOver);
        }
        self.active = Some(piece);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn running(&self) -> bool {
        self.phase.running()
    }

    pub fn paused(&self) -> bool {
        self.phase.paused()
    }

    pub fn game_over(&self) -> bool {
        self.phase.game_over()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.drop_interval_ms
    }

    /// Current sampler state, usable to replay the remaining piece sequence.
    pub fn seed(&self) -> u32 {
        self.sampler.seed()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill `out` in place, reusing its cell buffer across frames.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_blockfall_types::PieceKind;

    fn started_session(seed: u32) -> GameSession {
        let mut session = GameSession::new(EngineConfig::default(), seed);
        session.start();
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(EngineConfig::default(), 1);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.active().is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.drop_interval_ms(), 1000.0);
    }

    #[test]
    fn test_commands_before_start_are_ignored() {
        let mut session = GameSession::new(EngineConfig::default(), 1);
        assert!(session.move_piece(-1).is_empty());
        assert!(session.rotate().is_empty());
        assert!(session.soft_drop().is_empty());
        assert!(session.tick(10_000.0).is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_spawns_a_piece() {
        let session = started_session(1);
        assert!(session.running());
        assert!(session.active().is_some());
    }

    #[test]
    fn test_move_emits_moved_on_success_only() {
        let mut session = started_session(1);
        let x0 = session.active().map(|p| p.x());

        let events = session.move_piece(1);
        assert_eq!(events.as_slice(), &[GameEvent::Moved]);
        assert_eq!(session.active().map(|p| p.x()), x0.map(|x| x + 1));

        // Pin against the left wall; the last attempt produces no event.
        let mut last = Events::new();
        for _ in 0..16 {
            last = session.move_piece(-1);
        }
        assert!(last.is_empty());
    }

    #[test]
    fn test_tick_accumulates_until_interval_exceeded() {
        let mut session = started_session(1);
        let y0 = session.active().map(|p| p.y());

        // 999 + 1 == interval: not yet exceeded.
        assert!(session.tick(999.0).is_empty());
        assert!(session.tick(1.0).is_empty());
        assert_eq!(session.active().map(|p| p.y()), y0);

        // One more millisecond crosses the threshold.
        let events = session.tick(1.0);
        assert_eq!(events.as_slice(), &[GameEvent::RowAdvanced]);
        assert_eq!(session.active().map(|p| p.y()), y0.map(|y| y + 1));
    }

    #[test]
    fn test_soft_drop_resets_the_accumulator() {
        let mut session = started_session(1);
        session.tick(900.0);
        session.soft_drop();
        // The 900ms accumulated before the manual drop are gone.
        assert!(session.tick(200.0).is_empty());
    }

    #[test]
    fn test_pause_blocks_everything_and_resume_restores() {
        let mut session = started_session(1);
        let y0 = session.active().map(|p| p.y());

        session.pause();
        assert!(session.paused());
        assert!(session.tick(10_000.0).is_empty());
        assert!(session.move_piece(1).is_empty());
        assert!(session.rotate().is_empty());
        assert_eq!(session.active().map(|p| p.y()), y0);

        session.resume();
        assert!(session.running());
        // Resume resets the accumulator: no immediate drop.
        assert!(session.tick(500.0).is_empty());
    }

    #[test]
    fn test_pause_resume_is_idempotent_on_state() {
        let mut session = started_session(1);
        let grid_before = session.grid().clone();
        let piece_before = session.active().cloned();
        let score_before = session.score();
        let level_before = session.level();

        session.pause();
        session.resume();

        assert_eq!(session.grid(), &grid_before);
        assert_eq!(session.active().cloned(), piece_before);
        assert_eq!(session.score(), score_before);
        assert_eq!(session.level(), level_before);
    }

    #[test]
    fn test_pause_when_idle_or_over_is_a_no_op() {
        let mut session = GameSession::new(EngineConfig::default(), 1);
        session.pause();
        assert_eq!(session.phase(), Phase::Idle);

        let mut session = started_session(1);
        // Force a top-out; column 0 stays open so nothing sweeps.
        for x in 1..12 {
            session.grid_mut().set(x, 0, 1);
            session.grid_mut().set(x, 1, 1);
        }
        while !session.game_over() {
            session.soft_drop();
        }
        session.pause();
        assert!(session.game_over());
    }

    /// Fill every row the active piece will land in, leaving holes exactly
    /// under its cells. The next lock then clears all of those rows.
    fn prime_landing_rows(session: &mut GameSession) {
        let mut probe = match session.active().cloned() {
            Some(p) => p,
            None => return,
        };
        while probe.step_down(session.grid()) {}

        let landing: Vec<(i16, i16)> = probe
            .shape()
            .filled_cells()
            .map(|(r, c, _)| (probe.x() + c as i16, probe.y() + r as i16))
            .collect();
        let width = session.grid().width() as i16;
        for &(_, y) in &landing {
            for x in 0..width {
                if !landing.contains(&(x, y)) {
                    session.grid_mut().set(x, y, 1);
                }
            }
        }
    }

    /// Soft-drop until the active piece locks; returns the lock-call events.
    fn drop_until_locked(session: &mut GameSession) -> Events {
        loop {
            let events = session.soft_drop();
            if events.contains(&GameEvent::Locked) || session.game_over() {
                return events;
            }
        }
    }

    #[test]
    fn test_lock_chain_fires_in_order() {
        let mut session = session_with_first_kind(PieceKind::O);
        for x in 0..12 {
            if !(5..=6).contains(&x) {
                session.grid_mut().set(x, 19, 1);
                session.grid_mut().set(x, 18, 1);
            }
        }

        let events = drop_until_locked(&mut session);

        assert_eq!(events[0], GameEvent::Locked);
        assert_eq!(events[1], GameEvent::LinesCleared { count: 2 });
        assert_eq!(session.score(), 20);
        assert_eq!(session.level(), 1);
        // Both cleared rows are gone.
        assert!(session.grid().cells().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_single_line_clear_scores_ten() {
        let mut session = session_with_first_kind(PieceKind::O);
        // Bottom row lacks exactly the two columns the O will fill; the row
        // above stays partial.
        for x in 0..12 {
            if !(5..=6).contains(&x) {
                session.grid_mut().set(x, 19, 1);
            }
        }

        let events = drop_until_locked(&mut session);

        assert!(events.contains(&GameEvent::LinesCleared { count: 1 }));
        assert_eq!(session.score(), 10);
        // The O's top half slid down into the bottom row; the top row is empty.
        assert_eq!(session.grid().get(5, 19), Some(2));
        assert_eq!(session.grid().get(6, 19), Some(2));
        assert!((0..12).all(|x| session.grid().get(x, 0) == Some(0)));
    }

    /// Find a seed whose first draw is `kind` and return a started session.
    fn session_with_first_kind(kind: PieceKind) -> GameSession {
        for seed in 1..1000 {
            let mut session = GameSession::new(EngineConfig::default(), seed);
            session.start();
            if session.active().map(|p| p.kind()) == Some(kind) {
                return session;
            }
        }
        unreachable!("no seed below 1000 starts with {:?}", kind);
    }

    #[test]
    fn test_level_up_recomputes_interval() {
        let mut session = started_session(1);

        // Clear rows lock after lock until the score crosses 50. Every round
        // clears the 2-4 rows the piece lands in, so the grid is empty again
        // before the next spawn.
        let mut leveled = false;
        for _ in 0..10 {
            prime_landing_rows(&mut session);
            let events = drop_until_locked(&mut session);
            assert!(!session.game_over());
            if events.contains(&GameEvent::LeveledUp { new_level: 2 }) {
                leveled = true;
                break;
            }
            assert_eq!(session.level(), 1);
        }

        assert!(leveled, "no level-up within 10 full-clear locks");
        assert_eq!(session.level(), 2);
        assert_eq!(session.level(), level_for_score(session.score()));
        assert_eq!(session.drop_interval_ms(), 850.0);
        assert_eq!(
            session.drop_interval_ms(),
            drop_interval_for_level(2, 1000.0)
        );
    }

    #[test]
    fn test_restart_clears_residual_state() {
        let mut session = started_session(1);
        session.grid_mut().set(0, 19, 3);
        session.soft_drop();
        session.pause();

        let events = session.restart();
        assert!(!events.contains(&GameEvent::GameOver));
        assert!(session.running());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.drop_interval_ms(), 1000.0);
        assert!(session.grid().cells().iter().all(|&v| v == 0));
        assert!(session.active().is_some());
    }

    #[test]
    fn test_blocked_spawn_area_ends_the_session_at_start() {
        let mut session = started_session(1);
        // Choke the spawn rows, leaving column 0 open so nothing sweeps.
        for x in 1..12 {
            for y in 0..4 {
                session.grid_mut().set(x, y, 1);
            }
        }
        let events = session.soft_drop();
        assert!(events.contains(&GameEvent::GameOver));
        assert!(session.game_over());
        assert!(!session.running());

        // Everything is inert after game over except restart.
        assert!(session.move_piece(1).is_empty());
        assert!(session.tick(10_000.0).is_empty());
        let events = session.restart();
        assert!(!events.contains(&GameEvent::GameOver));
        assert!(session.running());
    }

    #[test]
    fn test_snapshot_reflects_session_state() {
        let mut session = started_session(1);
        session.grid_mut().set(0, 19, 3);
        session.move_piece(1);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.width, 12);
        assert_eq!(snapshot.height, 20);
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.cells[19 * 12], 3);
        let active = snapshot.active.as_ref().map(|a| (a.kind, a.x, a.y));
        let expected = session.active().map(|p| (p.kind(), p.x(), p.y()));
        assert_eq!(active, expected);

        // snapshot_into reuses the buffer and yields the same value.
        let mut reused = GameSnapshot::default();
        session.snapshot_into(&mut reused);
        assert_eq!(reused, snapshot);
        session.soft_drop();
        session.snapshot_into(&mut reused);
        assert_eq!(reused.cells.len(), 12 * 20);
        assert_ne!(reused, snapshot);
    }
}

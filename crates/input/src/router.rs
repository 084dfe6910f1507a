//! DAS/ARR input router for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// DAS (delayed auto shift) then ARR (auto repeat rate) timing for one held
/// key. Repeats start accumulating only after the initial delay expires.
#[derive(Debug, Clone)]
struct RepeatTimer {
    das_delay: u32,
    arr_rate: u32,
    das_timer: u32,
    arr_accumulator: u32,
}

impl RepeatTimer {
    fn new(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            das_delay,
            arr_rate,
            das_timer: 0,
            arr_accumulator: 0,
        }
    }

    fn reset(&mut self) {
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance by `elapsed_ms` and return how many repeats fired.
    fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let prev_das = self.das_timer;
        self.das_timer += elapsed_ms;
        if self.das_timer < self.das_delay {
            return 0;
        }
        // Only time past the DAS boundary counts toward ARR.
        let excess = if prev_das < self.das_delay {
            self.das_timer - self.das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator += excess;
        let repeats = self.arr_accumulator / self.arr_rate;
        self.arr_accumulator %= self.arr_rate;
        repeats
    }
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers DAS/ARR repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks held keys and turns them into repeated commands.
#[derive(Debug, Clone)]
pub struct InputRouter {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: std::time::Instant,
    horizontal_timer: RepeatTimer,
    down_timer: RepeatTimer,
    key_release_timeout_ms: u32,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: std::time::Instant::now(),
            horizontal_timer: RepeatTimer::new(das_delay, arr_rate),
            down_timer: RepeatTimer::new(SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Register a key press. Returns the immediate command for a fresh press;
    /// a press repeated by the terminal while already held returns `None`.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Left
            | KeyCode::Char('a')
            | KeyCode::Char('A')
            | KeyCode::Char('h')
            | KeyCode::Char('H') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == HorizontalDirection::Left {
                    None
                } else {
                    self.horizontal = HorizontalDirection::Left;
                    self.horizontal_timer.reset();
                    Some(Command::MoveLeft)
                }
            }
            KeyCode::Right
            | KeyCode::Char('d')
            | KeyCode::Char('D')
            | KeyCode::Char('l')
            | KeyCode::Char('L') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == HorizontalDirection::Right {
                    None
                } else {
                    self.horizontal = HorizontalDirection::Right;
                    self.horizontal_timer.reset();
                    Some(Command::MoveRight)
                }
            }
            KeyCode::Down
            | KeyCode::Char('s')
            | KeyCode::Char('S')
            | KeyCode::Char('j')
            | KeyCode::Char('J') => {
                self.last_key_time = std::time::Instant::now();
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_timer.reset();
                    Some(Command::SoftDrop)
                }
            }
            _ => None,
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left
            | KeyCode::Char('a')
            | KeyCode::Char('A')
            | KeyCode::Char('h')
            | KeyCode::Char('H') => {
                if self.horizontal == HorizontalDirection::Left {
                    self.horizontal = HorizontalDirection::None;
                    self.horizontal_timer.reset();
                }
            }
            KeyCode::Right
            | KeyCode::Char('d')
            | KeyCode::Char('D')
            | KeyCode::Char('l')
            | KeyCode::Char('L') => {
                if self.horizontal == HorizontalDirection::Right {
                    self.horizontal = HorizontalDirection::None;
                    self.horizontal_timer.reset();
                }
            }
            KeyCode::Down
            | KeyCode::Char('s')
            | KeyCode::Char('S')
            | KeyCode::Char('j')
            | KeyCode::Char('J') => {
                self.down_held = false;
                self.down_timer.reset();
            }
            _ => {}
        }
    }

    /// Advance hold timers by `elapsed_ms` and collect the repeats they fire.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Command, 32> {
        let mut commands = ArrayVec::<Command, 32>::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            if self.horizontal != HorizontalDirection::None {
                self.horizontal = HorizontalDirection::None;
                self.horizontal_timer.reset();
            }
            if self.down_held {
                self.down_held = false;
                self.down_timer.reset();
            }
        }

        let repeat = match self.horizontal {
            HorizontalDirection::Left => Some(Command::MoveLeft),
            HorizontalDirection::Right => Some(Command::MoveRight),
            HorizontalDirection::None => {
                self.horizontal_timer.reset();
                None
            }
        };
        if let Some(command) = repeat {
            for _ in 0..self.horizontal_timer.advance(elapsed_ms) {
                let _ = commands.try_push(command);
            }
        }

        if self.down_held {
            for _ in 0..self.down_timer.advance(elapsed_ms) {
                let _ = commands.try_push(Command::SoftDrop);
            }
        } else {
            self.down_timer.reset();
        }

        commands
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.last_key_time = std::time::Instant::now();
        self.horizontal_timer.reset();
        self.down_timer.reset();
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut router = InputRouter::with_config(100, 25);

        assert_eq!(
            router.handle_key_press(KeyCode::Left),
            Some(Command::MoveLeft)
        );

        // Before DAS expires: no repeats.
        let commands = router.update(99);
        assert!(commands.is_empty());

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        let commands = router.update(1);
        assert!(commands.is_empty());

        // First ARR interval after DAS: one repeat.
        let commands = router.update(25);
        assert_eq!(commands.as_slice(), &[Command::MoveLeft]);

        // Another ARR interval: one repeat again.
        let commands = router.update(25);
        assert_eq!(commands.as_slice(), &[Command::MoveLeft]);
    }

    #[test]
    fn test_repeated_press_while_held_is_swallowed() {
        let mut router = InputRouter::with_config(100, 25);

        assert_eq!(
            router.handle_key_press(KeyCode::Right),
            Some(Command::MoveRight)
        );
        assert_eq!(router.handle_key_press(KeyCode::Right), None);

        // Switching direction fires immediately and restarts DAS.
        router.update(90);
        assert_eq!(
            router.handle_key_press(KeyCode::Left),
            Some(Command::MoveLeft)
        );
        assert!(router.update(99).is_empty());
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut router = InputRouter::with_config(100, 25).with_key_release_timeout_ms(10_000);

        router.handle_key_press(KeyCode::Left);
        assert!(!router.update(200).is_empty());

        router.handle_key_release(KeyCode::Left);
        assert!(router.update(200).is_empty());
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut router = InputRouter::with_config(100, 25);
        router.key_release_timeout_ms = 50;

        assert_eq!(
            router.handle_key_press(KeyCode::Left),
            Some(Command::MoveLeft)
        );
        assert_eq!(router.horizontal, HorizontalDirection::Left);

        // Simulate no key-release events by moving the last key time into the past.
        router.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(51);

        let commands = router.update(0);
        assert!(commands.is_empty());
        assert_eq!(router.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut router = InputRouter::with_config(100, 25);
        router.key_release_timeout_ms = 50;

        assert_eq!(
            router.handle_key_press(KeyCode::Left),
            Some(Command::MoveLeft)
        );

        // Simulate a stuck key (no release event) and then press a non-movement key.
        router.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(51);
        assert_eq!(router.handle_key_press(KeyCode::Up), None);

        // The stale movement key should still auto-release.
        let commands = router.update(0);
        assert!(commands.is_empty());
        assert_eq!(router.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut router = InputRouter::new().with_key_release_timeout_ms(10_000);

        assert_eq!(
            router.handle_key_press(KeyCode::Down),
            Some(Command::SoftDrop)
        );

        // Before 50ms: no repeats.
        let commands = router.update(49);
        assert!(commands.is_empty());

        // At 50ms: exactly one repeat.
        let commands = router.update(1);
        assert_eq!(commands.as_slice(), &[Command::SoftDrop]);

        // Another 100ms: two repeats.
        let commands = router.update(100);
        assert_eq!(commands.as_slice(), &[Command::SoftDrop, Command::SoftDrop]);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut router = InputRouter::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(
            router.handle_key_press(KeyCode::Left),
            Some(Command::MoveLeft)
        );
        assert!(!router.update(200).is_empty(), "expected repeats before reset");

        router.reset();
        assert!(router.update(200).is_empty(), "reset should stop repeats");
    }
}

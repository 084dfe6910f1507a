//! Terminal blockfall runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blockfall::best_score::{load_best_score, save_best_score};
use tui_blockfall::core::{EngineConfig, GameSession};
use tui_blockfall::input::{map_key_event, should_quit, InputRouter};
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::{Command, GameEvent, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
        .wrapping_add(std::process::id());
    let mut session = GameSession::new(EngineConfig::default(), seed);
    session.start();

    let view = GameView::default();
    let mut router = InputRouter::new();
    let mut best = load_best_score();

    let mut snapshot = session.snapshot();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, best, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            best = persist_best(best, session.score())?;
                            return Ok(());
                        }

                        // Held movement keys go through the DAS/ARR router;
                        // everything else dispatches directly.
                        if let Some(command) = router.handle_key_press(key.code) {
                            best = apply(&mut session, &mut router, command, best)?;
                        } else if let Some(command) = map_key_event(key) {
                            match command {
                                Command::MoveLeft | Command::MoveRight | Command::SoftDrop => {}
                                _ => {
                                    best = apply(&mut session, &mut router, command, best)?;
                                }
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR handles repeats internally.
                    }
                    KeyEventKind::Release => {
                        router.handle_key_release(key.code);
                    }
                },
                Event::Resize(..) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for command in router.update(TICK_MS) {
                best = apply(&mut session, &mut router, command, best)?;
            }

            let events = session.tick(TICK_MS as f64);
            if events.contains(&GameEvent::GameOver) {
                best = persist_best(best, session.score())?;
            }
        }
    }
}

fn apply(
    session: &mut GameSession,
    router: &mut InputRouter,
    command: Command,
    best: u32,
) -> Result<u32> {
    let events = match command {
        Command::MoveLeft => session.move_piece(-1),
        Command::MoveRight => session.move_piece(1),
        Command::SoftDrop => session.soft_drop(),
        Command::Rotate => session.rotate(),
        Command::Pause => {
            if session.paused() {
                session.resume()
            } else {
                session.pause()
            }
        }
        Command::Restart => {
            let best = persist_best(best, session.score())?;
            router.reset();
            session.restart();
            return Ok(best);
        }
    };

    if events.contains(&GameEvent::GameOver) {
        return persist_best(best, session.score());
    }
    Ok(best)
}

/// Write the score through to disk when it beats the stored best.
fn persist_best(best: u32, score: u32) -> Result<u32> {
    if score > best {
        save_best_score(score)?;
        Ok(score)
    } else {
        Ok(best)
    }
}

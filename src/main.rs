//! Terminal runner (default binary).
//!
//! Reads config from the environment, loads the stored high score, then runs
//! the frame loop: poll keys until the next tick, feed actions and frames to the
//! engine, react to cues and redraw.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};

use blockfall::core::{GameEvent, GameSnapshot, GameState, SimpleRng};
use blockfall::input::{accepts, handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{Cue, TICK_MS};
use blockfall::{logging, Config, HighScoreStore};

fn main() -> Result<()> {
    let config = Config::from_env();
    if let Err(e) = logging::init(config.log_path.as_deref(), config.log_level) {
        eprintln!("logging disabled: {e:#}");
    }
    info!(seed = config.seed, welcome = config.welcome, progress = ?config.progress, "starting");

    let store = HighScoreStore::new(config.high_score_path.clone());
    let high_score = store.load().unwrap_or_else(|e| {
        warn!("could not load high score, starting from 0: {e:#}");
        0
    });

    let game = GameState::new(config.rules(), SimpleRng::new(config.seed), high_score);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, &store);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameState, store: &HighScoreStore) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut result_recorded = false;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key).filter(|&a| accepts(key, a)) {
                        if let Some(ev) = game.apply_action(action) {
                            on_event(term, &ev)?;
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if let Some(ev) = game.tick() {
                on_event(term, &ev)?;
            }
        }

        if game.game_over() {
            if !result_recorded {
                result_recorded = true;
                record_result(&mut game, store);
            }
        } else {
            result_recorded = false;
        }
    }
}

fn on_event(term: &mut TerminalRenderer, ev: &GameEvent) -> Result<()> {
    for cue in ev.cues() {
        debug!(?cue, "cue");
        if cue == Cue::Double {
            term.bell()?;
        }
    }
    match ev {
        GameEvent::Started => info!("game started"),
        GameEvent::Restarted => info!("game restarted"),
        GameEvent::Locked(lock) if lock.victory => info!(level = lock.level, "victory"),
        GameEvent::Locked(lock) if lock.topped_out => info!(level = lock.level, "topped out"),
        _ => {}
    }
    Ok(())
}

fn record_result(game: &mut GameState, store: &HighScoreStore) {
    info!(score = game.score(), level = game.level(), phase = ?game.phase(), "game finished");
    let Some(best) = game.settle_high_score() else {
        return;
    };
    match store.save(best) {
        Ok(true) => info!(high_score = best, path = %store.path().display(), "high score saved"),
        Ok(false) => {}
        Err(e) => warn!("could not save high score: {e:#}"),
    }
}

//! Stone board runner (default binary).
//!
//! Drives a board with the scripted [`Director`] and shows it through the
//! crossterm framebuffer renderer. With `--dump N` it runs headless instead
//! and prints the final board snapshot as JSON.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use stone_grid::cli::{parse_args, RunConfig};
use stone_grid::core::{BoardConfig, StoneBoard};
use stone_grid::director::{Director, Move};
use stone_grid::term::{BoardView, FrameBuffer, RedrawGate, TerminalRenderer, Viewport};
use stone_grid::types::TICK_MS;

/// Idle boards still repaint about once a second.
const IDLE_REDRAW_TICKS: u64 = 60;

/// Upper bound on ticks spent draining one move in headless mode.
const DUMP_TICK_LIMIT: u32 = 100_000;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = parse_args(&args, BoardConfig::from_env())?;

    if let Some(moves) = cfg.dump_moves {
        return dump(&cfg, moves);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cfg);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn new_board(cfg: &RunConfig) -> Result<(StoneBoard, Director)> {
    let board = StoneBoard::with_size(cfg.board.clone(), cfg.nx, cfg.ny)
        .with_context(|| format!("cannot create a {}x{} board", cfg.nx, cfg.ny))?;
    let director = Director::new(cfg.board.seed, cfg.kinds);
    Ok((board, director))
}

fn run(term: &mut TerminalRenderer, cfg: &RunConfig) -> Result<()> {
    let (mut board, mut director) = new_board(cfg)?;
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut gate = RedrawGate::new(IDLE_REDRAW_TICKS);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut tick: u64 = 0;
    let mut paused = false;

    loop {
        // Render.
        let fingerprint = board.snapshot().map_or(0, |s| s.fingerprint());
        if gate.should_redraw(tick, fingerprint) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&board, Viewport::new(w, h), &mut fb);
            term.present(&fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    KeyCode::Char('p') | KeyCode::Char(' ') => paused = !paused,
                    KeyCode::Char('r') => {
                        (board, director) = new_board(cfg)?;
                        gate.reset();
                    }
                    _ => {}
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                    gate.reset();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            tick += 1;
            if !paused {
                director.step(&mut board)?;
                board.update();
            }
        }
    }
}

fn dump(cfg: &RunConfig, moves: u32) -> Result<()> {
    let (mut board, mut director) = new_board(cfg)?;

    let mut issued = 0;
    while issued < moves {
        if director.step(&mut board)? != Move::Wait {
            issued += 1;
        }
        let mut ticks = 0;
        while board.is_playing_animation() {
            board.update();
            ticks += 1;
            anyhow::ensure!(ticks < DUMP_TICK_LIMIT, "animation queue never drained");
        }
    }

    let snapshot = board.snapshot().context("board is not initialized")?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

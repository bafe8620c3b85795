//! Terminal backdrop runner.
//!
//! Drives the simulation once per frame, feeds it pointer and resize events
//! from crossterm, and flushes the view. Quit with `q`, Esc, or Ctrl-C.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use tui_blockfall::core::Simulation;
use tui_blockfall::term::{BackdropView, TerminalRenderer, Viewport};
use tui_blockfall::types::{Config, FRAME_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let config = Config::default();
    let view = BackdropView::new(&config);

    let mut sim = Simulation::new(config, wall_clock_seed());
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    sim.resize(grid_cols(&config, cols), grid_rows(&config, rows));

    let epoch = Instant::now();
    let frame_duration = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();
    let mut first_frame = true;

    loop {
        if first_frame || last_frame.elapsed() >= frame_duration {
            first_frame = false;
            last_frame = Instant::now();

            sim.frame(epoch.elapsed().as_millis() as u64);

            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let fb = view.render(&sim, Viewport::new(w, h));
            term.draw(&fb)?;
        }

        // Wait for input until the next frame is due.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    if matches!(
                        mouse.kind,
                        MouseEventKind::Moved | MouseEventKind::Drag(_)
                    ) {
                        sim.pointer_moved(
                            (mouse.column / config.cell_w.max(1)) as i16,
                            (mouse.row / config.cell_h.max(1)) as i16,
                        );
                    }
                }
                Event::Resize(w, h) => {
                    sim.resize(grid_cols(&config, w), grid_rows(&config, h));
                    term.invalidate();
                }
                _ => {}
            }
        }
    }
}

fn grid_cols(config: &Config, terminal_cols: u16) -> i16 {
    (terminal_cols / config.cell_w.max(1)) as i16
}

fn grid_rows(config: &Config, terminal_rows: u16) -> i16 {
    (terminal_rows / config.cell_h.max(1)) as i16
}

fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

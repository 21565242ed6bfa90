//! Terminal Tetris runner (default binary).
//!
//! Runs the game at a fixed 60 frames per second: drain terminal input until
//! the frame deadline, advance the game clock once, then diff-render the
//! snapshot through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal;

use classic_tetris::cli::{wall_clock_seed, CliOptions, USAGE};
use classic_tetris::core::{GameConfig, GameSnapshot, GameState};
use classic_tetris::input::InputHandler;
use classic_tetris::term::{Banner, FrameBuffer, GameView, TerminalRenderer, Viewport};
use classic_tetris::types::FRAME_RATE;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = CliOptions::from_env()?.apply_args(&args)?;
    if opts.help {
        println!("{}", USAGE);
        return Ok(());
    }
    let config = opts.into_config(wall_clock_seed());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut game = GameState::new(config.with_start_ms(now_ms()));
    let mut input = InputHandler::new();
    let view = GameView::default();

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut banner: Option<Banner> = None;

    let frame = Duration::from_micros(1_000_000 / FRAME_RATE as u64);
    let mut deadline = Instant::now() + frame;

    loop {
        // Input until the frame deadline.
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if let Some(ev) = input.handle_key_event(key, now_ms()) {
                        game.handle_input(ev);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let frame_start = Instant::now();
        deadline = if frame_start > deadline + frame {
            // Fell behind (suspended terminal, slow draw): resync instead of bursting.
            frame_start + frame
        } else {
            deadline + frame
        };

        let now = now_ms();
        for ev in input.update(now) {
            game.handle_input(ev);
        }
        game.tick(now);
        if game.should_quit() {
            return Ok(());
        }

        for ev in game.take_events() {
            banner = Some(Banner::for_event(ev, now));
        }

        game.snapshot_into(&mut snap);
        let (w, h) = terminal::size().unwrap_or((80, 24));
        let text = banner.as_ref().and_then(|b| b.text_at(now));
        view.render_into(&snap, text, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}

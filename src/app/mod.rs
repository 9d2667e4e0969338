pub mod input;
pub mod render;
pub mod state;

pub use state::App;

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::{Duration, Instant};

use crate::ui::Tui;

impl App {
    /// Interactive frame loop: draw, pump input, advance the simulation on
    /// a fixed cadence, autosave on the configured cadence and on exit.
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let tick_rate = Duration::from_millis(1000 / self.config.timing.target_fps.max(1));
        let mut last_tick = Instant::now();

        while self.running {
            tui.terminal.draw(|f| {
                self.draw(f);
            })?;

            // 1 ms poll keeps input latency low without busy-waiting.
            while event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                // Real inter-frame interval; the first frame after a stall
                // is just as valid as a regular one.
                let dt_ms = last_tick.elapsed().as_secs_f64() * 1000.0;
                last_tick = Instant::now();
                if !self.paused {
                    self.advance(dt_ms);
                }
            }
        }

        self.save_state()?;
        Ok(())
    }

    /// Runs without a terminal for `ticks` fixed 16 ms steps, then saves.
    pub fn run_headless(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.advance(16.0);
        }
        self.save_state()?;
        Ok(())
    }

    fn advance(&mut self, dt_ms: f64) {
        let now_ms = Utc::now().timestamp_millis();
        self.sim.tick(dt_ms, now_ms, &mut self.rng);

        self.since_autosave_ms += dt_ms;
        if self.since_autosave_ms >= (self.config.timing.autosave_secs * 1000) as f64 {
            self.since_autosave_ms = 0.0;
            if let Err(e) = self.save_state() {
                tracing::error!("Autosave failed: {e:#}");
            }
        }
    }
}

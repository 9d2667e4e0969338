use anyhow::{Context, Result};
use rand::rngs::ThreadRng;
use ratatui::layout::Rect;
use ratatui::style::Color;
use std::collections::VecDeque;

use crate::model::config::AppConfig;
use crate::model::persistence::Storage;
use crate::model::simulation::Simulation;
use crate::model::species::Species;

pub struct App {
    pub running: bool,
    pub paused: bool,
    pub sim: Simulation,
    pub config: AppConfig,
    pub storage: Box<dyn Storage>,
    pub rng: ThreadRng,
    /// Simulated ms since the last autosave.
    pub since_autosave_ms: f64,
    /// Species the [U] upgrade key applies to.
    pub upgrade_target: Species,
    pub event_log: VecDeque<(String, Color)>,
    /// Yard rect of the last draw, for mouse-to-world mapping.
    pub last_yard_rect: Rect,
}

impl App {
    pub fn new(config: AppConfig, storage: Box<dyn Storage>) -> Result<Self> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let blob = storage.load();
        if blob.is_none() {
            tracing::info!("No save found, starting a fresh yard");
        }
        let sim = Simulation::restore(config.yard.clone(), blob.as_deref(), now_ms, &mut rng);

        Ok(Self {
            running: true,
            paused: false,
            sim,
            config,
            storage,
            rng,
            since_autosave_ms: 0.0,
            upgrade_target: Species::Beetle,
            event_log: VecDeque::new(),
            last_yard_rect: Rect::default(),
        })
    }

    pub fn save_state(&mut self) -> Result<()> {
        let blob = self.sim.serialize().context("Failed to serialize yard")?;
        self.storage
            .save(&blob)
            .context("Failed to write save blob")?;
        tracing::info!("Yard saved");
        Ok(())
    }

    pub fn push_event(&mut self, message: impl Into<String>, color: Color) {
        self.event_log.push_back((message.into(), color));
        if self.event_log.len() > 5 {
            self.event_log.pop_front();
        }
    }
}

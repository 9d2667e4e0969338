use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct YardConfig {
    /// Width of the strip in world pixels.
    pub width: f64,
    /// Vertical band creatures may occupy.
    pub band_top: f64,
    pub band_bottom: f64,
    /// Spawn cycle: (fraction of width, y). Indexed by creature count
    /// modulo the list length.
    pub spawn_points: Vec<(f64, f64)>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TimingConfig {
    pub target_fps: u64,
    /// Autosave cadence in simulated seconds.
    pub autosave_secs: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub yard: YardConfig,
    pub timing: TimingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            yard: YardConfig {
                width: 800.0,
                band_top: 30.0,
                band_bottom: 90.0,
                spawn_points: vec![
                    (0.2, 70.0),
                    (0.4, 50.0),
                    (0.6, 80.0),
                    (0.8, 60.0),
                    (0.3, 65.0),
                    (0.7, 75.0),
                ],
            },
            timing: TimingConfig {
                target_fps: 60,
                autosave_secs: 10,
            },
        }
    }
}

impl AppConfig {
    /// Loads `path`, falling back to defaults on a missing or unparsable
    /// file. Writes the default file when none exists so users have a
    /// template to edit.
    pub fn load(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => return config.validated(),
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}; using defaults");
                }
            },
            Err(_) => {
                let default = Self::default();
                if let Ok(toml_str) = toml::to_string(&default) {
                    let _ = fs::write(path, toml_str);
                }
                return default;
            }
        }
        Self::default()
    }

    /// Repairs values a hand-edited file may have broken. The spawn cycle
    /// must be non-empty: it is indexed modulo its length.
    fn validated(mut self) -> Self {
        if self.yard.spawn_points.is_empty() {
            tracing::warn!("spawn_points is empty; using the default cycle");
            self.yard.spawn_points = Self::default().yard.spawn_points;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.yard.width, config.yard.width);
        assert_eq!(parsed.yard.spawn_points.len(), 6);
    }

    #[test]
    fn test_empty_spawn_cycle_is_replaced_with_the_default() {
        let mut config = AppConfig::default();
        config.yard.spawn_points.clear();
        let repaired = config.validated();
        assert_eq!(repaired.yard.spawn_points.len(), 6);
    }

    #[test]
    fn test_band_is_ordered() {
        let config = AppConfig::default();
        assert!(config.yard.band_top < config.yard.band_bottom);
    }
}

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::prefs::default_prefs_path;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// How long the skeleton shows before the cards are loaded.
    pub load_delay: Duration,
    pub update_interval: Duration,
    pub frame_interval: Duration,
    pub skeleton_cards: usize,
    pub seed: Option<u64>,
    pub prefs_path: Option<PathBuf>,
    pub template_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            load_delay: Duration::from_millis(1500),
            update_interval: Duration::from_millis(3000),
            frame_interval: Duration::from_millis(33),
            skeleton_cards: 3,
            seed: None,
            prefs_path: None,
            template_path: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            load_delay: Duration::from_millis(clamped_u64(
                opt_env("CRICKET_LOAD_DELAY_MS").as_deref(),
                1500,
                0,
                10_000,
            )),
            update_interval: Duration::from_millis(clamped_u64(
                opt_env("CRICKET_UPDATE_MS").as_deref(),
                3000,
                250,
                60_000,
            )),
            frame_interval: Duration::from_millis(clamped_u64(
                opt_env("CRICKET_FRAME_MS").as_deref(),
                33,
                8,
                250,
            )),
            skeleton_cards: clamped_u64(opt_env("CRICKET_SKELETON_CARDS").as_deref(), 3, 1, 12)
                as usize,
            seed: opt_env("CRICKET_SEED").and_then(|val| val.trim().parse::<u64>().ok()),
            prefs_path: opt_env("CRICKET_PREFS_PATH")
                .map(PathBuf::from)
                .or_else(default_prefs_path),
            template_path: opt_env("CRICKET_TEMPLATE_PATH").map(PathBuf::from),
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}

fn clamped_u64(raw: Option<&str>, default: u64, min: u64, max: u64) -> u64 {
    raw.and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_u64_falls_back_and_clamps() {
        assert_eq!(clamped_u64(None, 3000, 250, 60_000), 3000);
        assert_eq!(clamped_u64(Some("abc"), 3000, 250, 60_000), 3000);
        assert_eq!(clamped_u64(Some(" 500 "), 3000, 250, 60_000), 500);
        assert_eq!(clamped_u64(Some("10"), 3000, 250, 60_000), 250);
        assert_eq!(clamped_u64(Some("999999"), 3000, 250, 60_000), 60_000);
    }

    #[test]
    fn defaults_match_dashboard_timing() {
        let config = DashboardConfig::default();
        assert_eq!(config.load_delay, Duration::from_millis(1500));
        assert_eq!(config.update_interval, Duration::from_millis(3000));
        assert!(config.template_path.is_none());
    }
}

pub mod animator;
pub mod config;
pub mod dashboard;
pub mod loader;
pub mod prefs;
pub mod scheduler;
pub mod score;
pub mod simulator;
pub mod state;
pub mod template;
pub mod theme;

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use crate::animator::ScoreAnimator;
use crate::config::DashboardConfig;
use crate::dashboard::{CardId, Container, Template};
use crate::loader;
use crate::prefs::PreferenceStore;
use crate::scheduler::{Scheduler, Task};
use crate::simulator::{LiveTicker, RandomSource, TickOutcome, UpdateSimulator};
use crate::theme::{self, Palette, ThemeState};

/// How long a freshly revealed card is drawn dimmed.
pub const ENTRANCE_FADE: Duration = Duration::from_millis(300);

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Its entrance delay has not elapsed yet.
    Hidden,
    Entering,
    Shown,
}

pub struct AppState {
    pub theme: ThemeState,
    pub container: Container,
    pub template: Option<Template>,
    pub scheduler: Scheduler,
    pub animator: ScoreAnimator,
    pub simulator: UpdateSimulator,
    pub ticker: LiveTicker,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub loaded_at: Option<Duration>,
    pub now: Duration,
    prefs: Box<dyn PreferenceStore>,
    rng: Box<dyn RandomSource>,
}

impl AppState {
    /// Applies the saved theme before anything else is scheduled, then arms
    /// the card load if there is a template to load from.
    pub fn new(
        config: &DashboardConfig,
        prefs: Box<dyn PreferenceStore>,
        template: Option<Template>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        let theme = theme::init_theme(prefs.as_ref())?;
        let mut scheduler = Scheduler::new();
        if template.is_some() {
            scheduler.set_timeout(Duration::ZERO, config.load_delay, Task::LoadCards);
        }

        Ok(Self {
            theme,
            container: Container::with_skeleton(config.skeleton_cards),
            template,
            scheduler,
            animator: ScoreAnimator::new(),
            simulator: UpdateSimulator::new(),
            ticker: LiveTicker::new(config.update_interval),
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            loaded_at: None,
            now: Duration::ZERO,
            prefs,
            rng,
        })
    }

    /// Runs every task due at `now`, then draws one animation frame.
    pub fn advance(&mut self, now: Duration) {
        self.now = now;
        while let Some(task) = self.scheduler.pop_due(now) {
            self.run_task(task, now);
        }
        self.animator.on_frame(now, &mut self.container);
    }

    pub fn run_task(&mut self, task: Task, now: Duration) {
        match task {
            Task::LoadCards => self.load_match_cards(now),
            Task::SimulateTick => {
                self.simulate_score_updates(now);
            }
            Task::ClearShimmer(card) => self.simulator.clear_shimmer(card),
        }
    }

    pub fn load_match_cards(&mut self, now: Duration) {
        let Some(template) = &self.template else {
            return;
        };
        let count = loader::load_match_cards(&mut self.container, template);
        self.loaded_at = Some(now);
        self.push_log(format!("[INFO] Loaded {count} match cards"));
        if self.ticker.start(now, &mut self.scheduler) {
            self.push_log(format!(
                "[INFO] Live updates every {:.1}s",
                self.ticker.period().as_secs_f64()
            ));
        }
    }

    pub fn simulate_score_updates(&mut self, now: Duration) -> TickOutcome {
        let outcome = self.simulator.simulate_score_updates(
            now,
            &self.container,
            self.rng.as_mut(),
            &mut self.scheduler,
            &mut self.animator,
        );
        match &outcome {
            TickOutcome::Scored { card, from, to } => {
                let teams = self
                    .container
                    .card(*card)
                    .map(|c| c.teams.clone())
                    .unwrap_or_default();
                self.push_log(format!("[INFO] {teams}: {from} -> {to}"));
            }
            TickOutcome::ParseFailed { error, .. } => {
                self.push_log(format!("[WARN] Could not parse score: {error}"));
            }
            _ => {}
        }
        outcome
    }

    pub fn toggle_theme(&mut self) -> Result<()> {
        let checked = !self.theme.toggle_checked;
        theme::on_toggle_change(&mut self.theme, checked, self.prefs.as_mut())
    }

    /// Pauses or resumes the update ticker. Does nothing before the cards load.
    pub fn toggle_live_updates(&mut self) {
        if self.loaded_at.is_none() {
            self.push_log("[INFO] Cards not loaded yet");
            return;
        }
        if self.ticker.stop(&mut self.scheduler) {
            self.push_log("[INFO] Live updates paused");
        } else if self.ticker.start(self.now, &mut self.scheduler) {
            self.push_log("[INFO] Live updates resumed");
        }
    }

    pub fn shutdown(&mut self) {
        self.ticker.stop(&mut self.scheduler);
    }

    pub fn palette(&self) -> Palette {
        self.theme.root_attr.palette()
    }

    pub fn card_phase(&self, card: CardId, now: Duration) -> CardPhase {
        let (Some(loaded_at), Some(c)) = (self.loaded_at, self.container.card(card)) else {
            return CardPhase::Hidden;
        };
        let shown_at = loaded_at + c.animation_delay;
        if now < shown_at {
            CardPhase::Hidden
        } else if now < shown_at + ENTRANCE_FADE {
            CardPhase::Entering
        } else {
            CardPhase::Shown
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

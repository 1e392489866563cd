use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use rand::Rng;

use crate::animator::ScoreAnimator;
use crate::dashboard::{CardId, Container};
use crate::scheduler::{Scheduler, Task, TimerId};
use crate::score::parse_score;

pub const SHIMMER_DURATION: Duration = Duration::from_millis(800);
pub const MAX_EXTRA_RUNS: u32 = 6;

/// Source of the two random draws a tick makes.
pub trait RandomSource {
    /// Index in `0..count`; `count` is never zero.
    fn pick_card(&mut self, count: usize) -> usize;
    /// Runs added to an open innings, in `1..=MAX_EXTRA_RUNS`.
    fn extra_runs(&mut self) -> u32;
}

pub struct RngSource<R: Rng>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_card(&mut self, count: usize) -> usize {
        self.0.gen_range(0..count)
    }

    fn extra_runs(&mut self) -> u32 {
        self.0.gen_range(1..=MAX_EXTRA_RUNS)
    }
}

/// Replays fixed draws; falls back to the first card and a single run once a
/// queue runs dry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    picks: VecDeque<usize>,
    runs: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(
        picks: impl IntoIterator<Item = usize>,
        runs: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            runs: runs.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_card(&mut self, count: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % count
    }

    fn extra_runs(&mut self) -> u32 {
        self.runs.pop_front().unwrap_or(1).clamp(1, MAX_EXTRA_RUNS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Idle,
    Shimmering,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    NoCards,
    NoScore(CardId),
    Busy(CardId),
    /// Shimmer without a numeric change: innings closed or wickets absent.
    Shimmer(CardId),
    Scored { card: CardId, from: u32, to: u32 },
    ParseFailed { card: CardId, error: String },
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSimulator {
    states: HashMap<CardId, CardState>,
}

impl UpdateSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_state(&self, card: CardId) -> CardState {
        self.states.get(&card).copied().unwrap_or_default()
    }

    pub fn is_shimmering(&self, card: CardId) -> bool {
        self.card_state(card) == CardState::Shimmering
    }

    pub fn clear_shimmer(&mut self, card: CardId) {
        self.states.insert(card, CardState::Idle);
    }

    pub fn simulate_score_updates(
        &mut self,
        now: Duration,
        container: &Container,
        rng: &mut dyn RandomSource,
        scheduler: &mut Scheduler,
        animator: &mut ScoreAnimator,
    ) -> TickOutcome {
        let count = container.card_count();
        if count == 0 {
            return TickOutcome::NoCards;
        }

        let card = CardId(rng.pick_card(count));
        let Some(text) = container.card(card).and_then(|c| c.score.as_deref()) else {
            return TickOutcome::NoScore(card);
        };
        if self.is_shimmering(card) {
            return TickOutcome::Busy(card);
        }

        self.states.insert(card, CardState::Shimmering);
        scheduler.set_timeout(now, SHIMMER_DURATION, Task::ClearShimmer(card));

        let score = match parse_score(text) {
            Ok(score) => score,
            Err(err) => {
                return TickOutcome::ParseFailed {
                    card,
                    error: format!("{err:#}"),
                };
            }
        };
        if !score.is_open() {
            return TickOutcome::Shimmer(card);
        }

        let to = score.runs.saturating_add(rng.extra_runs());
        animator.animate_score_update(card, i64::from(score.runs), i64::from(to), score.suffix);
        TickOutcome::Scored {
            card,
            from: score.runs,
            to,
        }
    }
}

/// Owns the repeating update timer so it can be stopped and restarted.
#[derive(Debug, Clone)]
pub struct LiveTicker {
    period: Duration,
    timer: Option<TimerId>,
}

impl LiveTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns false if the ticker was already running.
    pub fn start(&mut self, now: Duration, scheduler: &mut Scheduler) -> bool {
        if self.timer.is_some() {
            return false;
        }
        self.timer = Some(scheduler.set_interval(now, self.period, Task::SimulateTick));
        true
    }

    /// Returns false if the ticker was not running.
    pub fn stop(&mut self, scheduler: &mut Scheduler) -> bool {
        match self.timer.take() {
            Some(id) => {
                scheduler.clear(id);
                true
            }
            None => false,
        }
    }
}

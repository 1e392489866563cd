use std::time::Duration;

use crate::dashboard::{CardId, Container};

pub const SCORE_ANIMATION: Duration = Duration::from_millis(750);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreAnimation {
    pub target: CardId,
    pub start: i64,
    pub end: i64,
    pub suffix: String,
    started_at: Option<Duration>,
}

impl ScoreAnimation {
    pub fn new(target: CardId, start: i64, end: i64, suffix: impl Into<String>) -> Self {
        Self {
            target,
            start,
            end,
            suffix: suffix.into(),
            started_at: None,
        }
    }

    /// Text for the frame drawn at `timestamp` and whether this was the last
    /// frame. The first call pins the start time, so it always shows `start`.
    pub fn frame(&mut self, timestamp: Duration) -> (String, bool) {
        let started_at = *self.started_at.get_or_insert(timestamp);
        let elapsed = timestamp.saturating_sub(started_at);
        let progress = (elapsed.as_secs_f64() / SCORE_ANIMATION.as_secs_f64()).min(1.0);
        let value = if progress >= 1.0 {
            self.end
        } else {
            let range = (self.end - self.start) as f64;
            (progress * range + self.start as f64).floor() as i64
        };
        (format!("{value}{}", self.suffix), progress >= 1.0)
    }
}

/// Frame-synced counters for score displays. Animations cannot be cancelled,
/// and two animations on the same card are stepped independently; the one
/// registered last writes last on each frame.
#[derive(Debug, Clone, Default)]
pub struct ScoreAnimator {
    active: Vec<ScoreAnimation>,
}

impl ScoreAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animate_score_update(
        &mut self,
        target: CardId,
        start: i64,
        end: i64,
        suffix: impl Into<String>,
    ) {
        self.active.push(ScoreAnimation::new(target, start, end, suffix));
    }

    pub fn on_frame(&mut self, timestamp: Duration, container: &mut Container) {
        self.active.retain_mut(|anim| {
            let (text, finished) = anim.frame(timestamp);
            match container.card_mut(anim.target) {
                Some(card) if card.score.is_some() => {
                    card.score = Some(text);
                    !finished
                }
                _ => false,
            }
        });
    }

    pub fn is_animating(&self, target: CardId) -> bool {
        self.active.iter().any(|anim| anim.target == target)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::MatchCard;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn container_with_score(text: &str) -> Container {
        let mut container = Container::default();
        container.append(MatchCard {
            series: "S".to_string(),
            teams: "A vs B".to_string(),
            batting: None,
            score: Some(text.to_string()),
            status: String::new(),
            animation_delay: Duration::ZERO,
        });
        container
    }

    #[test]
    fn first_frame_shows_start_and_last_frame_shows_end() {
        let mut anim = ScoreAnimation::new(CardId(0), 45, 49, "/3");
        assert_eq!(anim.frame(ms(1000)), ("45/3".to_string(), false));
        assert_eq!(anim.frame(ms(1750)), ("49/3".to_string(), true));
    }

    #[test]
    fn counting_up_is_monotonic() {
        let mut anim = ScoreAnimation::new(CardId(0), 100, 106, "/2");
        let mut last = i64::MIN;
        for t in (0..=800).step_by(16) {
            let (text, _) = anim.frame(ms(t));
            let value: i64 = text.trim_end_matches("/2").parse().unwrap();
            assert!(value >= last);
            assert!((100..=106).contains(&value));
            last = value;
        }
        assert_eq!(last, 106);
    }

    #[test]
    fn midpoint_is_floored() {
        let mut anim = ScoreAnimation::new(CardId(0), 10, 13, "");
        anim.frame(ms(0));
        // 0.5 * 3 + 10 = 11.5
        assert_eq!(anim.frame(ms(375)).0, "11");
    }

    #[test]
    fn negative_range_counts_down() {
        let mut anim = ScoreAnimation::new(CardId(0), 10, 5, "/1");
        anim.frame(ms(0));
        let (mid, done) = anim.frame(ms(375));
        assert!(!done);
        assert_eq!(mid, "7/1");
        assert_eq!(anim.frame(ms(750)), ("5/1".to_string(), true));
    }

    #[test]
    fn animator_writes_into_card_and_retires_finished() {
        let mut container = container_with_score("45/3");
        let mut animator = ScoreAnimator::new();
        animator.animate_score_update(CardId(0), 45, 49, "/3");

        animator.on_frame(ms(0), &mut container);
        assert!(animator.is_animating(CardId(0)));
        animator.on_frame(ms(400), &mut container);
        animator.on_frame(ms(760), &mut container);

        assert_eq!(container.cards()[0].score.as_deref(), Some("49/3"));
        assert_eq!(animator.active_count(), 0);
    }

    #[test]
    fn animation_for_missing_card_is_dropped() {
        let mut container = Container::default();
        let mut animator = ScoreAnimator::new();
        animator.animate_score_update(CardId(4), 1, 2, "");
        animator.on_frame(ms(0), &mut container);
        assert_eq!(animator.active_count(), 0);
    }
}

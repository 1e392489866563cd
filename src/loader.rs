use std::time::Duration;

use crate::dashboard::{Container, Template};

/// Entrance delay added per card position.
pub const STAGGER_STEP: Duration = Duration::from_millis(100);

pub fn entrance_delay(index: usize) -> Duration {
    STAGGER_STEP * index as u32
}

/// Replaces whatever the container shows (normally the skeleton) with fresh
/// copies of the template's cards. Returns the number of cards appended.
pub fn load_match_cards(container: &mut Container, template: &Template) -> usize {
    container.clear();

    let mut count = 0;
    for (index, mut card) in template.match_cards().cloned().enumerate() {
        card.animation_delay = entrance_delay(index);
        container.append(card);
        count += 1;
    }
    count
}

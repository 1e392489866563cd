use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Position of a card in the container. Cards are never removed once loaded,
/// so the index is stable for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCard {
    pub series: String,
    pub teams: String,
    #[serde(default)]
    pub batting: Option<String>,
    /// Text of the score display; `None` when the card has no score element
    /// (e.g. a fixture that has not started).
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(skip)]
    pub animation_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerNode {
    Skeleton,
    Card(MatchCard),
}

#[derive(Debug, Clone, Default)]
pub struct Container {
    pub nodes: Vec<ContainerNode>,
}

impl Container {
    pub fn with_skeleton(count: usize) -> Self {
        Self {
            nodes: vec![ContainerNode::Skeleton; count],
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn append(&mut self, card: MatchCard) {
        self.nodes.push(ContainerNode::Card(card));
    }

    pub fn shows_skeleton(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, ContainerNode::Skeleton))
    }

    pub fn cards(&self) -> Vec<&MatchCard> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                ContainerNode::Card(card) => Some(card),
                ContainerNode::Skeleton => None,
            })
            .collect()
    }

    pub fn card_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, ContainerNode::Card(_)))
            .count()
    }

    pub fn card(&self, id: CardId) -> Option<&MatchCard> {
        self.cards().get(id.0).copied()
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut MatchCard> {
        self.nodes
            .iter_mut()
            .filter_map(|node| match node {
                ContainerNode::Card(card) => Some(card),
                ContainerNode::Skeleton => None,
            })
            .nth(id.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateNode {
    Card(MatchCard),
    Divider { label: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub nodes: Vec<TemplateNode>,
}

impl Template {
    /// Card nodes in document order; dividers and other nodes are skipped.
    pub fn match_cards(&self) -> impl Iterator<Item = &MatchCard> {
        self.nodes.iter().filter_map(|node| match node {
            TemplateNode::Card(card) => Some(card),
            TemplateNode::Divider { .. } => None,
        })
    }
}

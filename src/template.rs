use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::dashboard::{MatchCard, Template, TemplateNode};

pub fn load_template(path: &Path) -> Result<Template> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;
    parse_template_json(&raw).with_context(|| format!("invalid template {}", path.display()))
}

pub fn parse_template_json(raw: &str) -> Result<Template> {
    serde_json::from_str(raw).context("template json")
}

pub fn seed_template() -> Template {
    Template {
        nodes: vec![
            TemplateNode::Divider {
                label: "Live".to_string(),
            },
            TemplateNode::Card(card(
                "Border-Gavaskar Trophy, 2nd Test",
                "IND vs AUS",
                Some("IND"),
                Some("245/6"),
                "Day 2 - IND trail by 81 runs",
            )),
            TemplateNode::Card(card(
                "The Ashes, 4th Test",
                "ENG vs AUS",
                Some("ENG"),
                Some("312/4"),
                "Day 1 - Stumps",
            )),
            TemplateNode::Card(card(
                "ODI Series, 1st ODI",
                "PAK vs NZ",
                Some("PAK"),
                Some("187/8"),
                "42.3 ov - NZ need a wicket",
            )),
            TemplateNode::Card(card(
                "T20I Tri-Series",
                "SA vs WI",
                Some("WI"),
                Some("96/2"),
                "11.0 ov - Target 171",
            )),
            TemplateNode::Divider {
                label: "Recent".to_string(),
            },
            TemplateNode::Card(card(
                "Asia Cup, Super Four",
                "SL vs BAN",
                Some("BAN"),
                Some("180/10"),
                "SL won by 54 runs",
            )),
            TemplateNode::Divider {
                label: "Upcoming".to_string(),
            },
            TemplateNode::Card(card(
                "World Test Championship",
                "NZ vs ENG",
                None,
                None,
                "Starts tomorrow, 10:00 local",
            )),
        ],
    }
}

fn card(
    series: &str,
    teams: &str,
    batting: Option<&str>,
    score: Option<&str>,
    status: &str,
) -> MatchCard {
    MatchCard {
        series: series.to_string(),
        teams: teams.to_string(),
        batting: batting.map(str::to_string),
        score: score.map(str::to_string),
        status: status.to_string(),
        animation_delay: Duration::ZERO,
    }
}

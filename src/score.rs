use anyhow::{Context, Result, bail};

pub const MAX_WICKETS: u8 = 10;

/// A parsed `<runs>/<wickets>` score line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub runs: u32,
    pub wickets: Option<u8>,
    /// The `/wickets` tail exactly as it appeared, empty when wickets are absent.
    pub suffix: String,
}

impl Score {
    /// Runs can only move while a side is batting with wickets in hand.
    pub fn is_open(&self) -> bool {
        self.wickets.is_some_and(|w| w < MAX_WICKETS)
    }
}

pub fn parse_score(text: &str) -> Result<Score> {
    let trimmed = text.trim();
    let Some((runs_raw, wickets_raw)) = trimmed.split_once('/') else {
        bail!("missing '/' separator in {trimmed:?}");
    };

    let runs = runs_raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("invalid runs {runs_raw:?} in {trimmed:?}"))?;

    let wickets_text = wickets_raw;
    let wickets_raw = wickets_raw.trim();
    if wickets_raw.is_empty() {
        return Ok(Score {
            runs,
            wickets: None,
            suffix: String::new(),
        });
    }

    let wickets = wickets_raw
        .parse::<u8>()
        .with_context(|| format!("invalid wickets {wickets_raw:?} in {trimmed:?}"))?;
    if wickets > MAX_WICKETS {
        bail!("wickets out of range in {trimmed:?}");
    }

    Ok(Score {
        runs,
        wickets: Some(wickets),
        suffix: format!("/{wickets_text}"),
    })
}

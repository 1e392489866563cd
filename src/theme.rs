//! Light/dark theme preference.
//!
//! The preference lives in a [`PreferenceStore`] under [`THEME_KEY`] and is
//! mirrored onto two pieces of UI state: the root theme attribute the renderer
//! reads its palette from, and the checkbox shown in the header.

use anyhow::{Context, Result};
use ratatui::style::Color;

use crate::prefs::PreferenceStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The checkbox reads "light mode on".
    pub fn from_checked(checked: bool) -> Self {
        if checked { Theme::Light } else { Theme::Dark }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                bg: Color::Rgb(16, 20, 28),
                fg: Color::Rgb(226, 232, 240),
                muted: Color::Rgb(100, 116, 139),
                accent: Color::Rgb(56, 189, 248),
                border: Color::Rgb(51, 65, 85),
                skeleton: Color::Rgb(40, 48, 62),
                shimmer_fg: Color::Rgb(16, 20, 28),
                shimmer_bg: Color::Rgb(250, 204, 21),
            },
            Theme::Light => Palette {
                bg: Color::Rgb(248, 250, 252),
                fg: Color::Rgb(15, 23, 42),
                muted: Color::Rgb(100, 116, 139),
                accent: Color::Rgb(2, 132, 199),
                border: Color::Rgb(203, 213, 225),
                skeleton: Color::Rgb(226, 232, 240),
                shimmer_fg: Color::Rgb(15, 23, 42),
                shimmer_bg: Color::Rgb(253, 224, 71),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub skeleton: Color,
    pub shimmer_fg: Color,
    pub shimmer_bg: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub root_attr: Theme,
    pub toggle_checked: bool,
}

impl ThemeState {
    fn apply(&mut self, theme: Theme) {
        self.root_attr = theme;
        self.toggle_checked = theme == Theme::Light;
    }
}

pub fn init_theme(store: &dyn PreferenceStore) -> Result<ThemeState> {
    let saved = store
        .get(THEME_KEY)
        .context("failed to read theme preference")?
        .as_deref()
        .and_then(Theme::parse)
        .unwrap_or_default();
    let mut state = ThemeState {
        root_attr: Theme::Dark,
        toggle_checked: false,
    };
    state.apply(saved);
    Ok(state)
}

pub fn on_toggle_change(
    state: &mut ThemeState,
    checked: bool,
    store: &mut dyn PreferenceStore,
) -> Result<()> {
    let theme = Theme::from_checked(checked);
    state.apply(theme);
    store
        .set(THEME_KEY, theme.as_str())
        .context("failed to persist theme preference")
}

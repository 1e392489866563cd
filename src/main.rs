use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use cricket_pulse::config::DashboardConfig;
use cricket_pulse::dashboard::{CardId, MatchCard};
use cricket_pulse::prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
use cricket_pulse::simulator::{RandomSource, RngSource};
use cricket_pulse::state::{AppState, CardPhase};
use cricket_pulse::template::{load_template, seed_template};
use cricket_pulse::theme::{Palette, Theme};

const CARD_WIDTH: u16 = 38;
const CARD_HEIGHT: u16 = 6;

struct App {
    state: AppState,
    should_quit: bool,
    frame_interval: Duration,
}

impl App {
    fn on_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') | KeyCode::Char('T') => self.state.toggle_theme()?,
            KeyCode::Char('p') | KeyCode::Char('P') => self.state.toggle_live_updates(),
            KeyCode::Char('u') | KeyCode::Char('U') => {
                let now = self.state.now;
                self.state.simulate_score_updates(now);
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = DashboardConfig::from_env();
    let prefs: Box<dyn PreferenceStore> = match &config.prefs_path {
        Some(path) => Box::new(FilePreferences::open(path)?),
        None => Box::new(MemoryPreferences::new()),
    };

    let mut template_warning = None;
    let template = match &config.template_path {
        Some(path) => match load_template(path) {
            Ok(template) => template,
            Err(err) => {
                template_warning = Some(format!(
                    "[WARN] Template error: {err:#}; using built-in cards"
                ));
                seed_template()
            }
        },
        None => seed_template(),
    };

    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => Box::new(RngSource(StdRng::seed_from_u64(seed))),
        None => Box::new(RngSource(rand::thread_rng())),
    };

    let mut state = AppState::new(&config, prefs, Some(template), rng)?;
    if let Some(warning) = template_warning {
        state.push_log(warning);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App {
        state,
        should_quit: false,
        frame_interval: config.frame_interval,
    };
    let res = run_app(&mut terminal, &mut app);
    app.state.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err:#}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let started = Instant::now();

    loop {
        app.state.advance(started.elapsed());

        terminal.draw(|f| ui(f, &app.state))?;

        if event::poll(app.frame_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key)?;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let palette = state.palette();
    let base = Style::default().fg(palette.fg).bg(palette.bg);
    frame.render_widget(Block::default().style(base), frame.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .style(Style::default().fg(palette.accent))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.border)),
        );
    frame.render_widget(header, chunks[0]);

    if state.container.shows_skeleton() {
        render_skeleton(frame, chunks[1], state.container.nodes.len(), &palette);
    } else {
        render_cards(frame, chunks[1], state, &palette);
    }

    let console = Paragraph::new(console_text(state))
        .style(Style::default().fg(palette.muted))
        .block(
            Block::default()
                .title("Console")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text())
        .style(Style::default().fg(palette.muted))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(palette.border)),
        );
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size(), &palette);
    }
}

fn header_text(state: &AppState) -> String {
    let status = if state.loaded_at.is_none() {
        "LOADING"
    } else if state.ticker.is_running() {
        "LIVE"
    } else {
        "PAUSED"
    };
    let checkbox = if state.theme.toggle_checked { "[x]" } else { "[ ]" };
    let line1 = format!(
        "   ||    CRICKET PULSE | {status} | {checkbox} Light mode ({})",
        theme_label(state.theme.root_attr)
    );
    let line2 = format!("   ||    {}", Local::now().format("%H:%M:%S"));
    let line3 = "  (__) o".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text() -> String {
    "t Theme | p Pause/Resume | u Update now | ? Help | q Quit".to_string()
}

fn grid_columns(width: u16) -> u16 {
    (width / CARD_WIDTH).max(1)
}

fn cell_rect(area: Rect, index: usize, columns: u16) -> Option<Rect> {
    let row = (index as u16) / columns;
    let col = (index as u16) % columns;
    let cell_width = area.width / columns;
    let y = area.y + row * CARD_HEIGHT;
    if y + CARD_HEIGHT > area.y + area.height {
        return None;
    }
    Some(Rect {
        x: area.x + col * cell_width,
        y,
        width: cell_width,
        height: CARD_HEIGHT,
    })
}

fn render_skeleton(frame: &mut Frame, area: Rect, count: usize, palette: &Palette) {
    let columns = grid_columns(area.width);
    for idx in 0..count {
        let Some(cell) = cell_rect(area, idx, columns) else {
            break;
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.skeleton));
        let inner = block.inner(cell);
        frame.render_widget(block, cell);

        let width = inner.width as usize;
        let lines = [width * 2 / 3, width, width / 2]
            .into_iter()
            .map(|len| Line::from("░".repeat(len)))
            .collect::<Vec<_>>();
        let bars = Paragraph::new(lines).style(Style::default().fg(palette.skeleton));
        frame.render_widget(bars, inner);
    }
}

fn render_cards(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let cards = state.container.cards();
    if cards.is_empty() {
        let empty = Paragraph::new("No matches in the template")
            .style(Style::default().fg(palette.muted));
        frame.render_widget(empty, area);
        return;
    }

    let columns = grid_columns(area.width);
    for (idx, card) in cards.into_iter().enumerate() {
        let Some(cell) = cell_rect(area, idx, columns) else {
            break;
        };
        let id = CardId(idx);
        match state.card_phase(id, state.now) {
            CardPhase::Hidden => {}
            phase => render_card(
                frame,
                cell,
                card,
                state.simulator.is_shimmering(id),
                phase == CardPhase::Entering,
                palette,
            ),
        }
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    card: &MatchCard,
    shimmering: bool,
    entering: bool,
    palette: &Palette,
) {
    let mut border_style = Style::default().fg(if shimmering {
        palette.accent
    } else {
        palette.border
    });
    let mut body_style = Style::default().fg(palette.fg);
    if entering {
        border_style = border_style.add_modifier(Modifier::DIM);
        body_style = body_style.add_modifier(Modifier::DIM);
    }

    let block = Block::default()
        .title(card.series.as_str())
        .borders(Borders::ALL)
        .border_style(border_style);

    let score_line = match &card.score {
        Some(score) => {
            let score_style = if shimmering {
                Style::default()
                    .fg(palette.shimmer_fg)
                    .bg(palette.shimmer_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            };
            let batting = card
                .batting
                .as_deref()
                .map(|team| format!("{team} "))
                .unwrap_or_default();
            Line::from(vec![Span::raw(batting), Span::styled(score.clone(), score_style)])
        }
        None => Line::from(Span::styled(
            "Yet to start",
            Style::default().fg(palette.muted),
        )),
    };

    let lines = vec![
        Line::from(Span::styled(
            card.teams.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        score_line,
        Line::from(Span::styled(
            card.status.clone(),
            Style::default().fg(palette.muted),
        )),
    ];

    let paragraph = Paragraph::new(lines).style(body_style).block(block);
    frame.render_widget(paragraph, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No activity yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "LIGHT",
        Theme::Dark => "DARK",
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, palette: &Palette) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Cricket Pulse - Help",
        "",
        "  t            Toggle light/dark theme",
        "  p            Pause/resume live updates",
        "  u            Run one score update now",
        "  ?            Toggle help",
        "  Esc          Close help",
        "  q            Quit",
        "",
        "Scores are simulated. A highlighted score is mid-update.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        )
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

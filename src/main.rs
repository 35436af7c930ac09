use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use leaguele_terminal::config::{GameConfig, LEAGUE_CHOICES, league_label};
use leaguele_terminal::evaluate::{Column, Verdict};
use leaguele_terminal::player::Player;
use leaguele_terminal::provider::{self, Delta, EnrichPurpose, ProviderCommand};
use leaguele_terminal::select::strategy_from_env;
use leaguele_terminal::session::{self, GameSession, GuessOutcome, Phase};
use leaguele_terminal::stats::{GameStats, StatsLedger};
use leaguele_terminal::store::{KvStore, MemoryStore, SqliteStore};

const SUGGESTION_LIMIT: usize = 5;
const MAX_LOGS: usize = 200;

struct App {
    session: GameSession,
    ledger: StatsLedger,
    store: Arc<dyn KvStore>,
    league_idx: usize,
    input: String,
    message: Option<String>,
    suggestions: Vec<String>,
    suggestion_cursor: Option<usize>,
    show_stats: bool,
    stats_global: bool,
    /// Player id whose details lookup is in flight; input stays disabled so
    /// guesses are accepted strictly in submission order.
    enrich_pending: Option<String>,
    logs: VecDeque<String>,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    should_quit: bool,
}

impl App {
    fn new(league_idx: usize, store: Arc<dyn KvStore>, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        let config = GameConfig::for_league(LEAGUE_CHOICES[league_idx]);
        let ledger = StatsLedger::new(
            &config.game_id,
            config.max_attempts,
            config.history_limit,
            Arc::clone(&store),
        );
        let strategy = strategy_from_env(&config);
        let session = GameSession::new(config, Arc::clone(&store), strategy);
        let mut app = Self {
            session,
            ledger,
            store,
            league_idx,
            input: String::new(),
            message: None,
            suggestions: Vec::new(),
            suggestion_cursor: None,
            show_stats: false,
            stats_global: false,
            enrich_pending: None,
            logs: VecDeque::new(),
            cmd_tx,
            should_quit: false,
        };
        app.request_roster();
        app
    }

    fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn request_roster(&mut self) {
        let league_id = self.session.config.league_id.clone();
        self.push_log(format!(
            "[INFO] Loading roster for {}",
            league_label(&league_id)
        ));
        if self
            .cmd_tx
            .send(ProviderCommand::FetchRoster { league_id })
            .is_err()
        {
            self.push_log("[WARN] Provider unavailable");
        }
    }

    /// Discard the current session and rebuild from Loading for the given
    /// league scope. Used at startup, on league switch, and at day rollover.
    fn rebuild_session(&mut self) {
        let config = GameConfig::for_league(LEAGUE_CHOICES[self.league_idx]);
        let strategy = strategy_from_env(&config);
        self.session = GameSession::new(config, Arc::clone(&self.store), strategy);
        self.input.clear();
        self.message = None;
        self.suggestions.clear();
        self.suggestion_cursor = None;
        self.enrich_pending = None;
        self.request_roster();
    }

    fn cycle_league(&mut self) {
        self.league_idx = (self.league_idx + 1) % LEAGUE_CHOICES.len();
        self.push_log(format!(
            "[INFO] League scope: {}",
            league_label(LEAGUE_CHOICES[self.league_idx])
        ));
        self.rebuild_session();
    }

    /// Input stays disabled until the target's own details lookup settles:
    /// the country and age columns can only be scored against an enriched
    /// target.
    fn input_locked(&self) -> bool {
        self.session.phase != Phase::Ready
            || self.enrich_pending.is_some()
            || self
                .session
                .target()
                .is_some_and(|target| !target.is_enriched())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.show_stats {
            match key.code {
                KeyCode::Esc => self.show_stats = false,
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.show_stats = false;
                }
                KeyCode::Char('g') => self.stats_global = !self.stats_global,
                _ => {}
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('s') => self.show_stats = true,
                KeyCode::Char('l') => self.cycle_league(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => {
                if let Some(idx) = self.suggestion_cursor {
                    if let Some(name) = self.suggestions.get(idx).cloned() {
                        self.input = name;
                    }
                    self.suggestion_cursor = None;
                    self.suggestions.clear();
                } else {
                    self.submit_guess();
                }
            }
            KeyCode::Tab => {
                if let Some(name) = self.suggestions.first().cloned() {
                    self.input = name;
                    self.suggestion_cursor = None;
                    self.suggestions.clear();
                }
            }
            KeyCode::Down => {
                if !self.suggestions.is_empty() {
                    let next = match self.suggestion_cursor {
                        Some(idx) => (idx + 1).min(self.suggestions.len() - 1),
                        None => 0,
                    };
                    self.suggestion_cursor = Some(next);
                }
            }
            KeyCode::Up => {
                if let Some(idx) = self.suggestion_cursor {
                    self.suggestion_cursor = idx.checked_sub(1);
                }
            }
            KeyCode::Backspace => {
                if !self.input_locked() {
                    self.input.pop();
                    self.message = None;
                    self.refresh_suggestions();
                }
            }
            KeyCode::Char(c) => {
                if !self.input_locked() {
                    self.input.push(c);
                    self.message = None;
                    self.refresh_suggestions();
                }
            }
            _ => {}
        }
    }

    fn refresh_suggestions(&mut self) {
        self.suggestion_cursor = None;
        if self.input.trim().is_empty() {
            self.suggestions.clear();
            return;
        }
        self.suggestions = self.session.suggestions(&self.input, SUGGESTION_LIMIT);
    }

    fn submit_guess(&mut self) {
        if self.input_locked() {
            return;
        }
        let term = self.input.trim().to_string();
        if term.is_empty() {
            return;
        }
        match self.session.resolve_guess(&term) {
            Ok(player) => {
                self.input.clear();
                self.suggestions.clear();
                self.suggestion_cursor = None;
                if player.is_enriched() {
                    self.apply_guess(player);
                } else {
                    self.enrich_pending = Some(player.id.clone());
                    self.push_log(format!("[INFO] Looking up details for {}", player.name));
                    let _ = self.cmd_tx.send(ProviderCommand::EnrichPlayer {
                        player,
                        purpose: EnrichPurpose::Guess,
                    });
                }
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn apply_guess(&mut self, player: Player) {
        match self.session.accept_guess(player) {
            Ok(outcome) => self.handle_outcome(outcome),
            Err(err) => self.message = Some(err.to_string()),
        }
        self.drain_session_notices();
    }

    fn handle_outcome(&mut self, outcome: GuessOutcome) {
        if outcome == GuessOutcome::Continue {
            return;
        }
        let Some(result) = self.session.game_result() else {
            return;
        };
        self.message = Some(if result.won {
            let tries = if result.attempts_used == 1 { "try" } else { "tries" };
            format!("You won in {} {tries}!", result.attempts_used)
        } else {
            format!("Game over! The player was {}", result.target_name)
        });
        if let Err(err) = self.ledger.record_result(&result) {
            self.push_log(format!("[WARN] Stats not saved: {err:#}"));
        }
    }

    fn apply_delta(&mut self, delta: Delta) {
        match delta {
            Delta::Log(line) => self.push_log(line),
            Delta::Roster {
                league_id,
                players,
                fallback,
            } => {
                // A league switch may have raced the fetch; drop stale data.
                if league_id != self.session.config.league_id {
                    return;
                }
                let today = Local::now().date_naive();
                let count = players.len();
                match self.session.roster_loaded(players, today, fallback) {
                    Ok(()) => {
                        self.push_log(format!(
                            "[INFO] Roster ready: {count} players ({})",
                            league_label(&league_id)
                        ));
                        if self.ledger.has_played_today(&league_id, today) {
                            self.push_log("[INFO] Today's result is already recorded");
                        }
                        if self.session.phase == Phase::Over {
                            if let Some(result) = self.session.game_result() {
                                self.message = Some(if result.won {
                                    "Already solved today. Come back tomorrow!".to_string()
                                } else {
                                    format!("The player was {}", result.target_name)
                                });
                            }
                        }
                        if let Some(target) = self.session.target() {
                            if !target.is_enriched() {
                                let player = target.clone();
                                let _ = self.cmd_tx.send(ProviderCommand::EnrichPlayer {
                                    player,
                                    purpose: EnrichPurpose::Target,
                                });
                            }
                        }
                    }
                    Err(err) => {
                        self.push_log(format!("[WARN] No target available: {err:#}"));
                        self.message =
                            Some("No players available for this league today.".to_string());
                    }
                }
                self.drain_session_notices();
            }
            Delta::Enriched { player, purpose } => match purpose {
                EnrichPurpose::Target => {
                    // A rollover or league switch may have replaced the
                    // target; set_target ignores mismatched ids.
                    self.session.set_target(player);
                    self.drain_session_notices();
                }
                EnrichPurpose::Guess => {
                    if self.enrich_pending.as_deref() == Some(player.id.as_str()) {
                        self.enrich_pending = None;
                        self.apply_guess(player);
                    }
                }
            },
        }
    }

    fn drain_session_notices(&mut self) {
        for notice in self.session.drain_notices() {
            self.push_log(notice);
        }
    }

    /// Day boundary: discard the old session wholesale and rebuild.
    fn maybe_rollover(&mut self) {
        let today = Local::now().date_naive();
        if self.session.is_superseded(today) {
            self.push_log("[INFO] New day, new player");
            self.rebuild_session();
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let store: Arc<dyn KvStore> = match SqliteStore::open_default() {
        Ok(store) => Arc::new(store),
        Err(err) => {
            eprintln!("warning: persistent store unavailable ({err:#}), progress will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let league = std::env::var("LEAGUE")
        .unwrap_or_else(|_| "all".to_string())
        .to_lowercase();
    let league_idx = LEAGUE_CHOICES
        .iter()
        .position(|id| *id == league)
        .unwrap_or(0);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    provider::spawn_provider(tx, cmd_rx);

    let mut app = App::new(league_idx, store, cmd_tx);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            app.apply_delta(delta);
        }

        app.maybe_rollover();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(6),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, rows[0]);

    let input = Paragraph::new(input_text(app)).block(
        Block::default()
            .title("Guess (Enter submit, Tab complete, ^S stats, ^L league, Esc quit)")
            .borders(Borders::ALL),
    );
    frame.render_widget(input, rows[1]);

    render_body(frame, rows[2], app);

    let console = Paragraph::new(console_text(app))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, rows[3]);

    if app.show_stats {
        render_stats_overlay(frame, app);
    }
}

fn header_text(app: &App) -> String {
    let league = league_label(&app.session.config.league_id);
    let attempts = app
        .session
        .state
        .as_ref()
        .map(|state| state.attempts_used)
        .unwrap_or(0);
    let mut line = format!(
        "LEAGUE-LE — {league} — Attempts: {attempts}/{}",
        app.session.config.max_attempts
    );
    if app.session.fallback_data {
        line.push_str("  [fixture data]");
    }
    if app.session.phase == Phase::Loading {
        line.push_str("  loading…");
    }
    line
}

fn input_text(app: &App) -> String {
    if app.enrich_pending.is_some() {
        return format!("> {}  (looking up player…)", app.input);
    }
    match app.session.phase {
        Phase::Loading => "> (loading players…)".to_string(),
        Phase::Over => "> (game over)".to_string(),
        Phase::Ready if app.input_locked() => "> (looking up today's player…)".to_string(),
        Phase::Ready => format!("> {}_", app.input),
    }
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let suggestion_h = if app.suggestions.is_empty() {
        0
    } else {
        app.suggestions.len() as u16 + 2
    };
    let over_h = if app.session.phase == Phase::Over { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(suggestion_h),
            Constraint::Min(1),
            Constraint::Length(over_h),
        ])
        .split(area);

    if suggestion_h > 0 {
        let lines: Vec<Line> = app
            .suggestions
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let style = if app.suggestion_cursor == Some(idx) {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(name.clone(), style))
            })
            .collect();
        let list = Paragraph::new(lines)
            .block(Block::default().title("Suggestions").borders(Borders::ALL));
        frame.render_widget(list, chunks[0]);
    }

    render_guess_table(frame, chunks[1], app);

    if over_h > 0 {
        let countdown = Paragraph::new(format!(
            "New game available in {} (at midnight, local time)",
            countdown_text()
        ))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(countdown, chunks[2]);
    }
}

const COLUMN_WIDTHS: &[(Column, usize)] = &[
    (Column::Name, 18),
    (Column::Team, 20),
    (Column::League, 10),
    (Column::Role, 8),
    (Column::Country, 15),
    (Column::Age, 4),
];

fn render_guess_table(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    if let Some(message) = &app.message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    let header_spans: Vec<Span> = COLUMN_WIDTHS
        .iter()
        .map(|(column, width)| {
            Span::styled(
                pad(column.title(), *width),
                Style::default().add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    lines.push(Line::from(header_spans));

    if let Some(state) = &app.session.state {
        // Stored chronologically; show most recent first.
        for entry in state.guesses.iter().rev() {
            let spans: Vec<Span> = COLUMN_WIDTHS
                .iter()
                .map(|(column, width)| {
                    let text = pad(&cell_text(&entry.player, *column), *width);
                    match entry.evaluation.column(*column) {
                        Some(verdict) => Span::styled(text, verdict_style(verdict)),
                        None => Span::raw(text),
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn cell_text(player: &Player, column: Column) -> String {
    match column {
        Column::Name => player.name.clone(),
        Column::Team => player.team.clone(),
        Column::League => player.league.clone(),
        Column::Role => player.role.to_uppercase(),
        Column::Country => player.display_country().to_string(),
        Column::Age => player.display_age().to_string(),
    }
}

fn verdict_style(verdict: Verdict) -> Style {
    match verdict {
        Verdict::Exact => Style::default().bg(Color::Green).fg(Color::White),
        Verdict::Close => Style::default().bg(Color::Yellow).fg(Color::Black),
        Verdict::Miss => Style::default().bg(Color::Red).fg(Color::White),
    }
}

fn pad(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out.push(' ');
    out
}

fn countdown_text() -> String {
    let remaining = session::time_until_next_game(Local::now().naive_local());
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

fn render_stats_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 70, frame.size());
    frame.render_widget(Clear, area);

    let scope = if app.stats_global {
        "all".to_string()
    } else {
        app.session.config.league_id.clone()
    };
    let stats = app.ledger.stats_for(&scope);

    let block = Block::default()
        .title(format!(
            "Stats — {} (g toggles global, Esc closes)",
            league_label(&scope)
        ))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Min(1),
        ])
        .split(inner);

    let summary = Paragraph::new(summary_text(&stats));
    frame.render_widget(summary, chunks[0]);

    let bars: Vec<Bar> = stats
        .guess_distribution
        .iter()
        .enumerate()
        .map(|(idx, count)| {
            Bar::default()
                .label(format!("{}", idx + 1).into())
                .value(u64::from(*count))
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Guess distribution")
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .max(u64::from(stats.max_distribution_value()));
    frame.render_widget(chart, chunks[1]);

    let history = Paragraph::new(history_text(&stats))
        .block(Block::default().title("History").borders(Borders::ALL));
    frame.render_widget(history, chunks[2]);
}

fn summary_text(stats: &GameStats) -> String {
    format!(
        "Played: {}   Won: {}   Win rate: {}%\nCurrent streak: {}   Max streak: {}",
        stats.games_played,
        stats.games_won,
        stats.win_rate(),
        stats.current_streak,
        stats.max_streak
    )
}

fn history_text(stats: &GameStats) -> String {
    if stats.history.is_empty() {
        return "No games recorded yet".to_string();
    }
    let mut lines = Vec::new();
    for result in stats.history.iter().take(8) {
        let outcome = if result.won {
            format!("won in {}", result.attempts_used)
        } else {
            "lost".to_string()
        };
        lines.push(format!(
            "{} [{}] {} — {}",
            result.date.format("%Y-%m-%d"),
            league_label(&result.league_id),
            outcome,
            result.target_name
        ));
    }
    lines.join("\n")
}

fn console_text(app: &App) -> String {
    if app.logs.is_empty() {
        return String::new();
    }
    app.logs
        .iter()
        .rev()
        .take(4)
        .rev()
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
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

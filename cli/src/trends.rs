use std::{io, time::Duration};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, BorderType, Paragraph, Gauge, Padding},
};
use serviceboard_core::{
    repository::RecordStore,
    service::dto::{ComparisonSeriesEntry, YtdSummary},
    usecase::RevenueDashboard,
    MetricKey,
};

use crate::format::{lakhs, metric_value, pad_left, ytd_change};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    current: Color,
    previous: Color,
    behind: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    current: Color::Green,
    previous: Color::Blue,
    behind: Color::Red,
};

pub struct MetricTrend {
    pub metric: MetricKey,
    pub series: Vec<ComparisonSeriesEntry>,
    pub ytd: YtdSummary,
}

pub struct TrendsApp {
    pub trends: Vec<MetricTrend>,
    pub current_index: usize,
    pub current_year: i32,
    pub previous_year: i32,
}

impl TrendsApp {
    pub fn new(trends: Vec<MetricTrend>, start: MetricKey, current_year: i32, previous_year: i32) -> Self {
        let current_index = trends.iter().position(|t| t.metric == start).unwrap_or(0);
        Self {
            trends,
            current_index,
            current_year,
            previous_year,
        }
    }

    pub fn next_metric(&mut self) {
        if !self.trends.is_empty() && self.current_index < self.trends.len() - 1 {
            self.current_index += 1;
        }
    }

    pub fn previous_metric(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    pub fn current_data(&self) -> Option<&MetricTrend> {
        self.trends.get(self.current_index)
    }
}

pub fn run<S: RecordStore>(dashboard: &RevenueDashboard<'_, S>, start: MetricKey) -> Result<()> {
    // Data setup
    let mut trends = Vec::new();
    for &metric in MetricKey::ALL.iter() {
        trends.push(MetricTrend {
            metric,
            series: dashboard.comparison(metric)?,
            ytd: dashboard.ytd(metric)?.summary,
        });
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TrendsApp::new(trends, start, dashboard.current_year(), dashboard.previous_year());

    // Main loop
    let res = (|| -> Result<()> {
        loop {
            terminal.draw(|f| ui(f, &app))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                            KeyCode::Left | KeyCode::Char('h') => app.previous_metric(),
                            KeyCode::Right | KeyCode::Char('l') => app.next_metric(),
                            _ => {}
                        }
                    }
                }
            }
        }
    })();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn ui(frame: &mut Frame, app: &TrendsApp) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + Sidebar
            Constraint::Length(1), // Footer
        ])
        .split(size);

    let trend = match app.current_data() {
        Some(trend) => trend,
        None => {
            frame.render_widget(
                Paragraph::new("No data available").alignment(Alignment::Center),
                main_layout[1],
            );
            return;
        }
    };

    // --- Header ---
    let title = format!(" {} ", trend.metric.label());
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.muted));

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(1),
            Constraint::Length(36),
        ])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        "SERVICEBOARD TRENDS",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let last = app.trends.len() - 1;
    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(if app.current_index > 0 { THEME.text } else { THEME.muted })),
        Span::styled(title, Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(if app.current_index < last { THEME.text } else { THEME.muted })),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(header_block, main_layout[0]);

    // --- Main Content Split ---
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(72), // Chart
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(28), // Info Panel
        ])
        .split(main_layout[1]);

    draw_chart(frame, app, trend, content_chunks[0]);
    draw_info_panel(frame, app, trend, content_chunks[2]);

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled("METRIC: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .style(Style::default().fg(THEME.muted));
    frame.render_widget(footer, main_layout[2]);
}

/// Bar height: lakhs for rupee metrics, the count itself otherwise.
fn bar_value(metric: MetricKey, value: f64) -> u64 {
    let scaled = if metric.is_currency() { value / 100_000.0 } else { value };
    scaled.max(0.0).round() as u64
}

fn bar_text(metric: MetricKey, value: f64) -> String {
    if value <= 0.0 {
        String::new()
    } else if metric.is_currency() {
        lakhs(value)
    } else {
        format!("{:.0}", value)
    }
}

fn draw_chart(frame: &mut Frame, app: &TrendsApp, trend: &MetricTrend, area: Rect) {
    let groups: Vec<BarGroup> = trend
        .series
        .iter()
        .map(|entry| {
            let bars = vec![
                Bar::default()
                    .value(bar_value(trend.metric, entry.current))
                    .style(Style::default().fg(THEME.current))
                    .text_value(bar_text(trend.metric, entry.current)),
                Bar::default()
                    .value(bar_value(trend.metric, entry.previous))
                    .style(Style::default().fg(THEME.previous))
                    .text_value(bar_text(trend.metric, entry.previous)),
            ];
            BarGroup::default()
                .label(Line::from(entry.month.label()))
                .bars(&bars)
        })
        .collect();

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(format!(" {} vs {} ", app.current_year, app.previous_year));

    let mut chart = BarChart::default()
        .block(chart_block)
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2);
    for group in groups {
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}

fn draw_info_panel(frame: &mut Frame, app: &TrendsApp, trend: &MetricTrend, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // YTD card
            Constraint::Min(1),     // Target gauge
        ])
        .split(area);

    let ytd = &trend.ytd;
    let metric = trend.metric;
    let value_width = 14;
    let through = ytd.through.map_or_else(|| "no data yet".to_string(), |m| format!("through {}", m));

    let info_text = vec![
        Line::from(vec![Span::styled(
            format!("Year to date, {}", through),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{}: ", app.current_year), Style::default().fg(THEME.muted)),
            Span::styled(
                pad_left(&metric_value(metric, ytd.current), value_width),
                Style::default().fg(THEME.current).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", app.previous_year), Style::default().fg(THEME.muted)),
            Span::styled(
                pad_left(&metric_value(metric, ytd.previous), value_width),
                Style::default().fg(THEME.previous).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Target: ", Style::default().fg(THEME.muted)),
            Span::styled(pad_left(&metric_value(metric, ytd.target), value_width - 2), Style::default().fg(THEME.text)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Change: ", Style::default().fg(THEME.muted)),
            Span::styled(
                pad_left(&ytd_change(ytd), value_width - 2),
                Style::default().fg(match ytd.percent_change {
                    Some(change) if change < 0.0 => THEME.behind,
                    _ => THEME.current,
                }),
            ),
        ]),
    ];

    let info_block = Paragraph::new(info_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(info_block, chunks[0]);

    let ratio = if ytd.target > 0.0 { ytd.current / ytd.target } else { 0.0 };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Target Achievement ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted)),
        )
        .gauge_style(Style::default().fg(if ratio < 1.0 { THEME.behind } else { THEME.current }))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{:.0}% of target", ratio * 100.0));

    frame.render_widget(gauge, chunks[1]);
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Gauge, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use serviceboard_core::model::advisor::PerformanceMetric;
use serviceboard_core::model::complaint::{ComplaintStatus, Priority};
use serviceboard_core::repository::RecordStore;
use serviceboard_core::service::achievement::DISPLAY_CAP_PERCENT;
use serviceboard_core::service::projection::projected_total;

use crate::format::{inr, metric_value, number, optional, pad_right, percent, performance_value};
use crate::tui::app::{App, Tab};

pub fn draw<S: RecordStore>(f: &mut Frame, app: &mut App<'_, S>) {
    let size = f.area();

    // Header, tabs, content, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new(format!(
        "SERVICEBOARD  {} {} vs {}",
        app.month, app.current_year(), app.previous_year()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let selected = Tab::ALL.iter().position(|&t| t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, main_chunks[1]);

    match app.tab {
        Tab::Revenue => draw_revenue(f, app, main_chunks[2]),
        Tab::Advisors => draw_advisors(f, app, main_chunks[2]),
        Tab::Performance => draw_performance(f, app, main_chunks[2]),
        Tab::Complaints => draw_complaints(f, app, main_chunks[2]),
        Tab::Csi => draw_scorecard(f, app, main_chunks[2]),
    }

    let footer_text = match &app.status {
        Some(err) => Span::styled(err.clone(), Style::default().fg(Color::Red)),
        None => Span::raw("Tab/h/l: Switch | j/k: Navigate | [/]: Month | q: Quit"),
    };
    let footer = Paragraph::new(Line::from(footer_text))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn rounded(title: &str) -> Block<'_> {
    Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded)
}

fn change_style(change: Option<f64>) -> Style {
    match change {
        Some(value) if value < 0.0 => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Green),
    }
}

fn draw_revenue<S: RecordStore>(f: &mut Frame, app: &mut App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.data.cards.len() as u16 + 3),
            Constraint::Min(3),
        ])
        .split(area);

    let rows: Vec<Row> = app.data.cards.iter().map(|card| {
        Row::new(vec![
            Span::styled(card.metric.label(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(metric_value(card.metric, card.current)),
            Span::raw(metric_value(card.metric, card.previous)),
            Span::styled(percent(card.percent_change), change_style(card.percent_change)),
            Span::raw(metric_value(card.metric, card.mechanical)),
            Span::raw(metric_value(card.metric, card.body_paint)),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(22), // Metric
            Constraint::Length(16), // Current
            Constraint::Length(16), // Previous
            Constraint::Length(10), // Change
            Constraint::Length(16), // Mechanical
            Constraint::Min(12),    // Body & Paint
        ]
    )
    .header(
        Row::new(vec![
            "Metric".to_string(),
            app.current_year().to_string(),
            app.previous_year().to_string(),
            "Change".to_string(),
            "Mechanical".to_string(),
            "Body & Paint".to_string(),
        ])
        .style(Style::default().fg(Color::Yellow)),
    )
    .block(rounded(" Month to date "))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[0], &mut app.state);

    // One gauge per metric, capped at the display limit.
    let gauges = &app.data.achievements;
    if gauges.is_empty() {
        return;
    }
    let gauge_area = rounded(" Target achievement ").inner(chunks[1]);
    f.render_widget(rounded(" Target achievement "), chunks[1]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(gauges.iter().map(|_| Constraint::Length(1)).collect::<Vec<_>>())
        .split(gauge_area);

    for (achievement, row) in gauges.iter().zip(rows.iter()) {
        let label = format!(
            "{} {}",
            pad_right(achievement.metric.label(), 22),
            achievement.percent.map_or_else(|| "-".to_string(), |p| format!("{:.1}%", p)),
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(if achievement.display_percent >= 100.0 {
                Color::Green
            } else {
                Color::Blue
            }))
            .ratio((achievement.display_percent / DISPLAY_CAP_PERCENT).clamp(0.0, 1.0))
            .label(label);
        f.render_widget(gauge, *row);
    }
}

fn draw_advisors<S: RecordStore>(f: &mut Frame, app: &mut App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let rows: Vec<Row> = app.data.top_advisors.iter().enumerate().map(|(i, ranked)| {
        Row::new(vec![
            Span::raw(format!("{}", i + 1)),
            Span::styled(ranked.record.advisor_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(ranked.record.throughput.to_string()),
            Span::raw(inr(ranked.total_revenue)),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Rank
            Constraint::Min(14),    // Advisor
            Constraint::Length(6),  // Throughput
            Constraint::Length(14), // Revenue
        ]
    )
    .header(Row::new(vec!["#", "Advisor", "ROs", "Revenue"]).style(Style::default().fg(Color::Yellow)))
    .block(rounded(" Top advisors "))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let mut lines = Vec::new();
    match &app.data.period {
        Some((period, days)) => {
            lines.push(Line::from(Span::styled(
                format!("Day {} of {}", period.elapsed_days, days),
                Style::default().fg(Color::Blue),
            )));
            lines.push(Line::from(""));
            for projection in &app.data.advisor_projections {
                lines.push(Line::from(vec![
                    Span::raw(pad_right(&projection.advisor_name, 18)),
                    Span::styled(
                        inr(projected_total(&projection.points).unwrap_or(0.0)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}/day", inr(projection.run_rate)), Style::default().fg(Color::DarkGray)),
                ]));
            }
        }
        None => lines.push(Line::from("Month is closed; nothing to project.")),
    }
    let projection_block = Paragraph::new(lines)
        .block(rounded(" Month-end projection "))
        .wrap(Wrap { trim: true });
    f.render_widget(projection_block, chunks[1]);
}

fn draw_performance<S: RecordStore>(f: &mut Frame, app: &mut App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let rows: Vec<Row> = app.data.performance.iter().map(|advisor| {
        let mut cells = vec![Span::styled(advisor.name.clone(), Style::default().add_modifier(Modifier::BOLD))];
        cells.extend(
            PerformanceMetric::ALL
                .iter()
                .map(|&metric| Span::raw(performance_value(metric, advisor.value(metric)))),
        );
        Row::new(cells)
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(18),   // Advisor
            Constraint::Length(5), // RSA
            Constraint::Length(5), // EW
            Constraint::Length(6), // Alignment
            Constraint::Length(6), // Balancing
            Constraint::Length(8), // Upselling
            Constraint::Length(6), // Satisfaction
        ]
    )
    .header(
        Row::new(vec!["Advisor", "RSA", "EW", "Align", "Bal", "Upsell", "CSAT"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(rounded(" Service advisor performance "))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let overview = &app.data.performance_overview;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Advisors: ", Style::default().fg(Color::Blue)),
            Span::raw(overview.advisor_count.to_string()),
        ]),
        Line::from(""),
    ];
    for average in &overview.averages {
        lines.push(Line::from(vec![
            Span::styled(pad_right(&format!("Avg {}", average.metric.label()), 22), Style::default().fg(Color::Blue)),
            Span::raw(format!("{:.1}", average.average)),
        ]));
    }
    lines.push(Line::from(""));
    for ranking in &overview.rankings {
        if let Some(best) = ranking.advisors.first() {
            lines.push(Line::from(vec![
                Span::styled(pad_right(&format!("Top {}", ranking.metric.label()), 22), Style::default().fg(Color::Blue)),
                Span::styled(best.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" ({})", performance_value(ranking.metric, best.value))),
            ]));
        }
    }
    let summary = Paragraph::new(lines)
        .block(rounded(" Team "))
        .wrap(Wrap { trim: true });
    f.render_widget(summary, chunks[1]);
}

fn draw_complaints<S: RecordStore>(f: &mut Frame, app: &mut App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let rows: Vec<Row> = app.data.complaints.iter().map(|c| {
        let status_icon = match c.status {
            ComplaintStatus::Closed => "✔",
            ComplaintStatus::Pending => "…",
            ComplaintStatus::Open => "☐",
        };

        let priority_style = match c.priority {
            Priority::High => Style::default().fg(Color::Red),
            Priority::Medium => Style::default().fg(Color::Yellow),
            Priority::Low => Style::default().fg(Color::Green),
        };

        let pri_str = match c.priority {
            Priority::High => "H",
            Priority::Medium => "M",
            Priority::Low => "L",
        };

        Row::new(vec![
            Span::styled(status_icon, Style::default()),
            Span::styled(pri_str, priority_style),
            Span::raw(c.reported.format("%m-%d").to_string()),
            Span::raw(c.service_advisor.clone()),
            Span::styled(c.complaint_type.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(3),  // Priority
            Constraint::Length(6),  // Reported
            Constraint::Length(16), // Advisor
            Constraint::Min(10),    // Type
        ]
    )
    .header(Row::new(vec!["St", "Pr", "Date", "Advisor", "Type"]).style(Style::default().fg(Color::Yellow)))
    .block(rounded(" Complaints "))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let summary = &app.data.complaint_summary;
    let mut detail = vec![
        Line::from(vec![
            Span::styled("Total: ", Style::default().fg(Color::Blue)),
            Span::raw(summary.total.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Resolved: ", Style::default().fg(Color::Blue)),
            Span::raw(format!("{} ({}%)", summary.resolved, summary.resolution_rate)),
        ]),
        Line::from(vec![
            Span::styled("Pending: ", Style::default().fg(Color::Blue)),
            Span::raw(summary.pending.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Avg days to resolve: ", Style::default().fg(Color::Blue)),
            Span::raw(format!("{:.1}", summary.average_resolution_days)),
        ]),
        Line::from(""),
    ];

    if let Some(selected) = app.state.selected().and_then(|i| app.data.complaints.get(i)) {
        detail.push(Line::from(Span::styled(selected.id.clone(), Style::default().add_modifier(Modifier::BOLD))));
        detail.push(Line::from(format!("{} / {}", selected.customer, selected.vehicle)));
        detail.push(Line::from(selected.description.as_str()));
        if let Some(resolution) = &selected.resolution {
            detail.push(Line::from(Span::styled("Resolution:", Style::default().fg(Color::Blue))));
            detail.push(Line::from(resolution.as_str()));
        }
    }

    let detail_block = Paragraph::new(detail)
        .block(rounded(" Detail "))
        .wrap(Wrap { trim: true });
    f.render_widget(detail_block, side[0]);

    let mut counts = vec![Line::from(Span::styled("PSF by type", Style::default().fg(Color::Blue)))];
    if app.data.psf_counts.is_empty() {
        counts.push(Line::from("No PSF complaints"));
    }
    for entry in &app.data.psf_counts {
        counts.push(Line::from(format!("{} {}", pad_right(&entry.name, 20), entry.count)));
    }
    counts.push(Line::from(""));
    counts.push(Line::from(Span::styled(
        format!("Received in {}", app.current_year()),
        Style::default().fg(Color::Blue),
    )));
    for entry in app.data.complaint_trend.iter().filter(|e| e.total > 0) {
        counts.push(Line::from(format!(
            "{}  {} ({} resolved, {} pending)",
            entry.month, entry.total, entry.resolved, entry.pending
        )));
    }
    let counts_block = Paragraph::new(counts)
        .block(rounded(" Breakdown "))
        .wrap(Wrap { trim: true });
    f.render_widget(counts_block, side[1]);
}

fn draw_scorecard<S: RecordStore>(f: &mut Frame, app: &mut App<'_, S>, area: Rect) {
    let rows: Vec<Row> = app.data.scores.iter().map(|score| {
        let met_style = match score.meets_target {
            Some(true) => Style::default().fg(Color::Green),
            Some(false) => Style::default().fg(Color::Red),
            None => Style::default(),
        };
        let change = if score.ytd.is_some() && score.previous_ytd.is_some() {
            percent(score.ytd_change)
        } else {
            "-".to_string()
        };
        Row::new(vec![
            Span::styled(score.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(score.target_text.clone()),
            Span::styled(
                match (score.value, score.value_month) {
                    (Some(value), None) => format!("{} YTD", number(value)),
                    (value, _) => optional(value),
                },
                met_style,
            ),
            Span::raw(score.ytd.map(number).unwrap_or_else(|| "-".to_string())),
            Span::raw(optional(score.previous_ytd)),
            Span::raw(change),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),    // KPI
            Constraint::Length(16), // Target
            Constraint::Length(12), // Value
            Constraint::Length(10), // YTD
            Constraint::Length(10), // Prev YTD
            Constraint::Length(10), // Change
        ]
    )
    .header(
        Row::new(vec!["KPI", "Target", "Value", "YTD", "Prev YTD", "Change"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(rounded(" Customer satisfaction, selected month "))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, &mut app.state);
}

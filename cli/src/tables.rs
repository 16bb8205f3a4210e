use serviceboard_core::model::advisor::{AdvisorPerformance, PerformanceMetric};
use serviceboard_core::model::complaint::ComplaintRecord;
use serviceboard_core::model::dataset::PartialPeriod;
use serviceboard_core::service::dto::{
    Achievement, AdvisorProjection, ComparisonSeriesEntry, ComplaintSummary, ComplaintTrendEntry, CountEntry,
    KpiScore, MetricProjection, MonthlyTopRevenue, PerformanceOverview, PerformanceRanking, QuarterComparison,
    RankedAdvisor, StatCard, YtdReport,
};
use serviceboard_core::service::projection::projected_total;
use serviceboard_core::{MetricKey, Month};
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color, Modify};
use tabled::settings::object::{Rows};

use crate::format::{inr, metric_value, number, optional, percent, performance_value, ytd_change};

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    table.to_string()
}

fn heading(text: &str) {
    println!("\n\x1b[1;36m{}\x1b[0m", text);
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Previous")]
    previous: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Mechanical")]
    mechanical: String,
    #[tabled(rename = "Body & Paint")]
    body_paint: String,
}

pub fn show_stat_cards(cards: &[StatCard], current_year: i32, previous_year: i32) {
    let month = match cards.first() {
        Some(card) => card.month,
        None => return,
    };
    heading(&format!("{} {} vs {} {}", month, current_year, month, previous_year));

    let rows = cards
        .iter()
        .map(|card| StatRow {
            metric: card.metric.label().to_string(),
            current: metric_value(card.metric, card.current),
            previous: metric_value(card.metric, card.previous),
            change: percent(card.percent_change),
            mechanical: metric_value(card.metric, card.mechanical),
            body_paint: metric_value(card.metric, card.body_paint),
        })
        .collect();
    println!("{}", render::<StatRow>(rows));
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Previous")]
    previous: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Change")]
    change: String,
}

pub fn show_comparison(metric: MetricKey, series: &[ComparisonSeriesEntry]) {
    heading(&format!("{} by month", metric.label()));

    let rows = series
        .iter()
        .map(|entry| ComparisonRow {
            // Months with no record yet are marked rather than hidden.
            month: if entry.is_projected_or_missing {
                format!("{} *", entry.month)
            } else {
                entry.month.to_string()
            },
            current: metric_value(metric, entry.current),
            previous: metric_value(metric, entry.previous),
            target: metric_value(metric, entry.target),
            change: percent(entry.percent_change),
        })
        .collect();
    println!("{}", render::<ComparisonRow>(rows));
    println!("* no data recorded yet");
}

#[derive(Tabled)]
struct CumulativeRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Current YTD")]
    current: String,
    #[tabled(rename = "Previous YTD")]
    previous: String,
}

#[derive(Tabled)]
struct QuarterRow {
    #[tabled(rename = "Quarter")]
    quarter: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Previous")]
    previous: String,
    #[tabled(rename = "Change")]
    change: String,
}

pub fn show_ytd(report: &YtdReport, quarters: &[QuarterComparison]) {
    let summary = &report.summary;
    let metric = summary.metric;
    match summary.through {
        Some(month) => heading(&format!("{} year to date, through {}", metric.label(), month)),
        None => heading(&format!("{} year to date, no data yet", metric.label())),
    }
    println!(
        "  Current {}  Previous {}  Target {}  Change {}",
        metric_value(metric, summary.current),
        metric_value(metric, summary.previous),
        metric_value(metric, summary.target),
        ytd_change(summary),
    );

    let rows = report
        .series
        .iter()
        .map(|entry| CumulativeRow {
            month: entry.month.to_string(),
            current: if entry.current_plateaued {
                "-".to_string()
            } else {
                metric_value(metric, entry.current_cumulative)
            },
            previous: metric_value(metric, entry.previous_cumulative),
        })
        .collect();
    println!("{}", render::<CumulativeRow>(rows));

    let rows = quarters
        .iter()
        .map(|q| QuarterRow {
            quarter: format!("Q{}", q.quarter),
            current: metric_value(metric, q.current),
            previous: metric_value(metric, q.previous),
            change: percent(q.percent_change),
        })
        .collect();
    println!("{}", render::<QuarterRow>(rows));
}

#[derive(Tabled)]
struct AdvisorRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Advisor")]
    name: String,
    #[tabled(rename = "Throughput")]
    throughput: u32,
    #[tabled(rename = "Revenue")]
    revenue: String,
}

pub fn show_top_advisors(month: Month, ranked: &[RankedAdvisor]) {
    heading(&format!("Top advisors, {}", month));
    if ranked.is_empty() {
        println!("No advisor records for {}.", month);
        return;
    }
    let rows = ranked
        .iter()
        .enumerate()
        .map(|(i, r)| AdvisorRow {
            rank: i + 1,
            name: r.record.advisor_name.clone(),
            throughput: r.record.throughput,
            revenue: inr(r.total_revenue),
        })
        .collect();
    println!("{}", render::<AdvisorRow>(rows));
}

#[derive(Tabled)]
struct CombinedRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Advisors")]
    advisors: usize,
    #[tabled(rename = "Combined revenue")]
    revenue: String,
}

pub fn show_monthly_top_combined(n: usize, months: &[MonthlyTopRevenue]) {
    heading(&format!("Top {} advisors combined, by month", n));
    let rows = months
        .iter()
        .filter(|m| m.advisors_counted > 0)
        .map(|m| CombinedRow {
            month: m.month.to_string(),
            advisors: m.advisors_counted,
            revenue: inr(m.combined_revenue),
        })
        .collect();
    println!("{}", render::<CombinedRow>(rows));
}

#[derive(Tabled)]
struct AchievementRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Achieved")]
    achieved: String,
    #[tabled(rename = "Gap")]
    gap: String,
    #[tabled(rename = "Needed / day")]
    required: String,
}

pub fn show_achievements(month: Month, achievements: &[Achievement]) {
    heading(&format!("Targets, {}", month));
    let rows = achievements
        .iter()
        .map(|a| AchievementRow {
            metric: a.metric.label().to_string(),
            actual: metric_value(a.metric, a.actual),
            target: metric_value(a.metric, a.target),
            achieved: a.percent.map_or_else(|| "-".to_string(), |p| format!("{:.2}%", p)),
            gap: metric_value(a.metric, a.gap),
            required: metric_value(a.metric, a.required_run_rate),
        })
        .collect();
    println!("{}", render::<AchievementRow>(rows));
}

#[derive(Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "So far")]
    so_far: String,
    #[tabled(rename = "Per day")]
    run_rate: String,
    #[tabled(rename = "Projected")]
    projected: String,
}

pub fn show_projections(period: &PartialPeriod, days: u32, projections: &[MetricProjection]) {
    heading(&format!(
        "{} {} projection, day {} of {}",
        period.month, period.year, period.elapsed_days, days
    ));
    let rows = projections
        .iter()
        .map(|p| {
            let so_far = p.points.iter().rev().find_map(|pt| pt.actual).unwrap_or(0.0);
            ProjectionRow {
                metric: p.metric.label().to_string(),
                so_far: metric_value(p.metric, so_far),
                run_rate: metric_value(p.metric, p.run_rate),
                projected: metric_value(p.metric, projected_total(&p.points).unwrap_or(0.0)),
            }
        })
        .collect();
    println!("{}", render::<ProjectionRow>(rows));
}

#[derive(Tabled)]
struct AdvisorProjectionRow {
    #[tabled(rename = "Advisor")]
    name: String,
    #[tabled(rename = "Per day")]
    run_rate: String,
    #[tabled(rename = "Projected")]
    projected: String,
}

pub fn show_advisor_projections(projections: &[AdvisorProjection]) {
    heading("Advisor revenue projection");
    if projections.is_empty() {
        println!("No advisor records for the month in progress.");
        return;
    }
    let rows = projections
        .iter()
        .map(|p| AdvisorProjectionRow {
            name: p.advisor_name.clone(),
            run_rate: inr(p.run_rate),
            projected: inr(projected_total(&p.points).unwrap_or(0.0)),
        })
        .collect();
    println!("{}", render::<AdvisorProjectionRow>(rows));
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "")]
    name: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct ComplaintRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Reported")]
    reported: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Advisor")]
    advisor: String,
    #[tabled(rename = "Customer")]
    customer: String,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Received")]
    total: usize,
    #[tabled(rename = "Resolved")]
    resolved: usize,
    #[tabled(rename = "Pending")]
    pending: usize,
}

fn count_rows(entries: &[CountEntry]) -> Vec<CountRow> {
    entries
        .iter()
        .map(|c| CountRow { name: c.name.clone(), count: c.count })
        .collect()
}

pub fn show_complaints(
    summary: &ComplaintSummary,
    complaints: &[ComplaintRecord],
    psf_counts: &[CountEntry],
    trend_year: i32,
    trend: &[ComplaintTrendEntry],
) {
    heading("Complaints");
    println!(
        "  Total {}  Resolved {}  Pending {}  Resolution rate {}%  Avg days {:.1}",
        summary.total, summary.resolved, summary.pending, summary.resolution_rate, summary.average_resolution_days
    );

    heading("PSF complaints by type");
    if psf_counts.is_empty() {
        println!("No PSF complaints recorded.");
    } else {
        println!("{}", render(count_rows(psf_counts)));
    }

    heading(&format!("Complaints received in {}", trend_year));
    let rows: Vec<TrendRow> = trend
        .iter()
        .filter(|e| e.total > 0)
        .map(|e| TrendRow {
            month: e.month.to_string(),
            total: e.total,
            resolved: e.resolved,
            pending: e.pending,
        })
        .collect();
    if rows.is_empty() {
        println!("None.");
    } else {
        println!("{}", render(rows));
    }

    if complaints.is_empty() {
        println!("No complaints match.");
        return;
    }

    let mut counts = count_rows(&summary.by_type);
    counts.extend(summary.by_priority.iter().map(|p| CountRow {
        name: format!("{:?} priority", p.priority),
        count: p.count,
    }));
    counts.extend(summary.resolution_buckets.iter().map(|b| CountRow {
        name: format!("Resolved in {}", b.name),
        count: b.count,
    }));
    println!("{}", render(counts));

    let rows = complaints
        .iter()
        .map(|c| ComplaintRow {
            id: c.id.clone(),
            reported: c.reported.format("%Y-%m-%d").to_string(),
            kind: c.complaint_type.clone(),
            status: format!("{:?}", c.status),
            priority: format!("{:?}", c.priority),
            advisor: c.service_advisor.clone(),
            customer: c.customer.clone(),
        })
        .collect();
    println!("{}", render::<ComplaintRow>(rows));
}

#[derive(Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Advisor")]
    name: String,
    #[tabled(rename = "RSA")]
    rsa: String,
    #[tabled(rename = "EW")]
    ew: String,
    #[tabled(rename = "Wheel Alignment")]
    alignment: String,
    #[tabled(rename = "Wheel Balancing")]
    balancing: String,
    #[tabled(rename = "Upselling %")]
    upselling: String,
    #[tabled(rename = "Customer Satisfaction")]
    satisfaction: String,
}

pub fn show_performance(overview: &PerformanceOverview, advisors: &[AdvisorPerformance]) {
    heading("Service advisor performance");
    if advisors.is_empty() {
        println!("No advisor performance records.");
        return;
    }
    let averages: Vec<String> = overview
        .averages
        .iter()
        .map(|a| format!("Avg {} {:.1}", a.metric.label(), a.average))
        .collect();
    println!("  Advisors {}  {}", overview.advisor_count, averages.join("  "));

    let cell = |advisor: &AdvisorPerformance, metric| performance_value(metric, advisor.value(metric));
    let rows = advisors
        .iter()
        .map(|a| PerformanceRow {
            name: a.name.clone(),
            rsa: cell(a, PerformanceMetric::Rsa),
            ew: cell(a, PerformanceMetric::Ew),
            alignment: cell(a, PerformanceMetric::WheelAlignment),
            balancing: cell(a, PerformanceMetric::Balancing),
            upselling: cell(a, PerformanceMetric::Upselling),
            satisfaction: cell(a, PerformanceMetric::CustomerSatisfaction),
        })
        .collect();
    println!("{}", render::<PerformanceRow>(rows));

    for ranking in &overview.rankings {
        let leaders: Vec<String> = ranking
            .advisors
            .iter()
            .take(3)
            .map(|r| format!("{} ({})", r.name, performance_value(ranking.metric, r.value)))
            .collect();
        println!("  Top {}: {}", ranking.metric.label(), leaders.join(", "));
    }
}

#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Advisor")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn show_performance_ranking(ranking: &PerformanceRanking) {
    heading(&format!("Advisors by {}", ranking.metric.label()));
    let rows = ranking
        .advisors
        .iter()
        .enumerate()
        .map(|(i, r)| RankingRow {
            rank: i + 1,
            name: r.name.clone(),
            value: performance_value(ranking.metric, r.value),
        })
        .collect();
    println!("{}", render::<RankingRow>(rows));
}

#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "KPI")]
    name: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Met")]
    met: String,
    #[tabled(rename = "YTD")]
    ytd: String,
    #[tabled(rename = "Prev YTD")]
    previous_ytd: String,
    #[tabled(rename = "YTD change")]
    change: String,
}

pub fn show_scorecard(year: i32, scores: &[KpiScore]) {
    heading(&format!("Customer satisfaction {}", year));
    if scores.is_empty() {
        println!("No KPI data for {}.", year);
        return;
    }
    let rows = scores
        .iter()
        .map(|s| KpiRow {
            name: s.name.clone(),
            target: s.target_text.clone(),
            value: match (s.value_month, s.value) {
                (Some(month), Some(value)) => format!("{} ({})", number(value), month),
                (None, Some(value)) => format!("{} (YTD)", number(value)),
                _ => "-".to_string(),
            },
            met: match s.meets_target {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
            ytd: optional(s.ytd),
            previous_ytd: optional(s.previous_ytd),
            change: if s.ytd.is_some() && s.previous_ytd.is_some() {
                percent(s.ytd_change)
            } else {
                "-".to_string()
            },
        })
        .collect();
    println!("{}", render::<KpiRow>(rows));
}

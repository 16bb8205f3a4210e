mod format;
mod tables;
mod trends;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use serviceboard_core::model::advisor::PerformanceMetric;
use serviceboard_core::model::complaint::ComplaintRecord;
use serviceboard_core::repository::default_data_dir;
use serviceboard_core::service::csi::KpiPeriod;
use serviceboard_core::service::dto::{ComplaintSummary, ComplaintTrendEntry, CountEntry};
use serviceboard_core::{
    complaint_filter, parse_period, ComplaintsDashboard, CsiDashboard, DashboardConfig, FileRecordStore,
    MetricKey, Month, PerformanceDashboard, ProjectionDashboard, RecordStore, RevenueDashboard,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "serviceboard")]
#[command(about = "Service center performance dashboard", long_about = None)]
struct Cli {
    /// Directory holding dataset.json and config.toml (default ~/.serviceboard)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Year to report on; the comparison year defaults to the one before
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Print the view as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Month-to-date figures against the same month last year (usage: revenue Jun-25)
    Revenue {
        /// Month such as "Jun", "2025-06" or "Jun-25"; defaults to the latest month with data
        month: Option<String>,
    },
    /// One metric month by month against last year
    Compare {
        #[arg(default_value = "totalRevenue")]
        metric: String,
        /// Show as an interactive bar chart
        #[arg(long)]
        chart: bool,
    },
    /// Year-to-date totals and quarterly breakdown for a metric
    Ytd {
        #[arg(default_value = "totalRevenue")]
        metric: String,
    },
    /// Highest-revenue advisors for a month, and the top advisors' combined revenue by month
    Advisors {
        month: Option<String>,
    },
    /// Progress against monthly targets
    Targets {
        month: Option<String>,
    },
    /// Month-end projection for the month in progress
    Projection {
        /// Per-advisor projection instead of per metric
        #[arg(long)]
        advisors: bool,
    },
    /// Service advisor performance review: averages, details and rankings
    Performance {
        /// Rank every advisor by one metric (rsa, ew, wheelAlignment, balancing, upselling, customerSatisfaction)
        metric: Option<String>,
    },
    /// Complaints summary (usage: complaints year:2025 mo:jun st:open ajay)
    Complaints {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Customer satisfaction scorecard
    Csi {
        /// Month to show, or "ytd"; defaults to the latest reported month
        month: Option<String>,
    },
    /// Open the Terminal User Interface
    Tui {
        month: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct ComplaintsReport {
    summary: ComplaintSummary,
    psf_by_type: Vec<CountEntry>,
    trend: Vec<ComplaintTrendEntry>,
    complaints: Vec<ComplaintRecord>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_metric(key: &str) -> Result<MetricKey> {
    MetricKey::from_key(key).ok_or_else(|| {
        let known: Vec<&str> = MetricKey::ALL.iter().map(|m| m.key()).collect();
        anyhow!("Unknown metric '{}'. Known metrics: {}", key, known.join(", "))
    })
}

fn parse_performance_metric(key: &str) -> Result<PerformanceMetric> {
    PerformanceMetric::from_key(key).ok_or_else(|| {
        let known: Vec<&str> = PerformanceMetric::ALL.iter().map(|m| m.key()).collect();
        anyhow!("Unknown performance metric '{}'. Known metrics: {}", key, known.join(", "))
    })
}

fn parse_kpi_period(input: Option<&str>) -> Result<KpiPeriod> {
    match input {
        None => Ok(KpiPeriod::Latest),
        Some(text) if text.eq_ignore_ascii_case("ytd") => Ok(KpiPeriod::Ytd),
        Some(text) => Ok(KpiPeriod::Month(text.parse::<Month>()?)),
    }
}

/// A bare month name keeps the configured year; a full period such as
/// "2025-06" also moves the reporting year. Without input, the latest month
/// with data, else the calendar month.
fn resolve_month<S: RecordStore>(
    input: Option<&str>,
    store: &S,
    config: &mut DashboardConfig,
) -> Result<Month> {
    if let Some(input) = input {
        if let Ok((year, month)) = parse_period(input) {
            if year != config.current_year {
                config.current_year = year;
                config.previous_year = year - 1;
            }
            return Ok(month);
        }
        return input.parse::<Month>();
    }
    let revenue = RevenueDashboard::new(store, config)?;
    Ok(revenue
        .latest_month()?
        .unwrap_or_else(|| Month::of_date(Local::now().date_naive())))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let store = FileRecordStore::new(Some(data_dir.clone()))?;
    let mut config = DashboardConfig::load(&data_dir)?;
    if let Some(year) = cli.year {
        config.current_year = year;
        config.previous_year = year - 1;
    }
    debug!(path = %store.path().display(), ?config, "starting");

    match cli.command {
        Some(Commands::Revenue { month }) => {
            let month = resolve_month(month.as_deref(), &store, &mut config)?;
            let cards = RevenueDashboard::new(&store, &config)?.stat_cards(month)?;
            if cli.json {
                return print_json(&cards);
            }
            tables::show_stat_cards(&cards, config.current_year, config.previous_year);
        },
        Some(Commands::Compare { metric, chart }) => {
            let metric = parse_metric(&metric)?;
            let dashboard = RevenueDashboard::new(&store, &config)?;
            if chart {
                return trends::run(&dashboard, metric);
            }
            let series = dashboard.comparison(metric)?;
            if cli.json {
                return print_json(&series);
            }
            tables::show_comparison(metric, &series);
        },
        Some(Commands::Ytd { metric }) => {
            let metric = parse_metric(&metric)?;
            let dashboard = RevenueDashboard::new(&store, &config)?;
            let report = dashboard.ytd(metric)?;
            let quarters = dashboard.quarterly(metric)?;
            if cli.json {
                return print_json(&(report, quarters));
            }
            tables::show_ytd(&report, &quarters);
        },
        Some(Commands::Advisors { month }) => {
            let month = resolve_month(month.as_deref(), &store, &mut config)?;
            let ranked = RevenueDashboard::new(&store, &config)?.top_advisors(month)?;
            let combined = ProjectionDashboard::new(&store, &config).monthly_top_combined()?;
            if cli.json {
                return print_json(&(ranked, combined));
            }
            tables::show_top_advisors(month, &ranked);
            tables::show_monthly_top_combined(config.top_combined, &combined);
        },
        Some(Commands::Targets { month }) => {
            let month = resolve_month(month.as_deref(), &store, &mut config)?;
            let achievements = RevenueDashboard::new(&store, &config)?.achievements(month)?;
            if cli.json {
                return print_json(&achievements);
            }
            tables::show_achievements(month, &achievements);
        },
        Some(Commands::Projection { advisors }) => {
            let dashboard = ProjectionDashboard::new(&store, &config);
            let period = match dashboard.partial_period()? {
                Some(period) => period,
                None => {
                    println!("No month in progress.");
                    return Ok(());
                }
            };
            if advisors {
                let projections = dashboard.advisor_projections()?;
                if cli.json {
                    return print_json(&projections);
                }
                tables::show_advisor_projections(&projections);
            } else {
                let projections = dashboard.metric_projections()?;
                if cli.json {
                    return print_json(&projections);
                }
                let days = dashboard.period_days(&period)?;
                tables::show_projections(&period, days, &projections);
            }
        },
        Some(Commands::Performance { metric }) => {
            let dashboard = PerformanceDashboard::new(&store);
            if let Some(metric) = metric {
                let ranking = dashboard.ranking(parse_performance_metric(&metric)?)?;
                if cli.json {
                    return print_json(&ranking);
                }
                tables::show_performance_ranking(&ranking);
            } else {
                let overview = dashboard.overview()?;
                let advisors = dashboard.advisors()?;
                if cli.json {
                    return print_json(&(overview, advisors));
                }
                tables::show_performance(&overview, &advisors);
            }
        },
        Some(Commands::Complaints { args }) => {
            let mut filter = complaint_filter(&args)?;
            let dashboard = ComplaintsDashboard::new(&store);
            if let Some(advisor) = filter.advisor.take() {
                filter.advisor = Some(dashboard.resolve_advisor(&advisor)?);
            }
            let trend_year = filter.year.unwrap_or(config.current_year);
            let report = ComplaintsReport {
                summary: dashboard.summary(&filter)?,
                psf_by_type: dashboard.psf_type_counts(&filter)?,
                trend: dashboard.trend(trend_year)?,
                complaints: dashboard.complaints(&filter)?,
            };
            if cli.json {
                return print_json(&report);
            }
            tables::show_complaints(
                &report.summary,
                &report.complaints,
                &report.psf_by_type,
                trend_year,
                &report.trend,
            );
        },
        Some(Commands::Csi { month }) => {
            let period = parse_kpi_period(month.as_deref())?;
            let scores = CsiDashboard::new(&store).scorecard(config.current_year, period)?;
            if cli.json {
                return print_json(&scores);
            }
            tables::show_scorecard(config.current_year, &scores);
        },
        Some(Commands::Tui { month }) => {
            let month = resolve_month(month.as_deref(), &store, &mut config)?;
            tui::run(&store, &config, month)?;
        },
        None => {
            let month = resolve_month(None, &store, &mut config)?;
            tui::run(&store, &config, month)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serviceboard_core::InMemoryRecordStore;

    #[test]
    fn test_parse_metric() {
        assert_eq!(parse_metric("bpro").unwrap(), MetricKey::BpRo);
        assert!(parse_metric("lubricants").is_err());
    }

    #[test]
    fn test_parse_performance_metric() {
        assert_eq!(parse_performance_metric("ew").unwrap(), PerformanceMetric::Ew);
        assert!(parse_performance_metric("nps").is_err());
    }

    #[test]
    fn test_parse_kpi_period() {
        assert_eq!(parse_kpi_period(None).unwrap(), KpiPeriod::Latest);
        assert_eq!(parse_kpi_period(Some("YTD")).unwrap(), KpiPeriod::Ytd);
        assert_eq!(parse_kpi_period(Some("mar")).unwrap(), KpiPeriod::Month(Month::Mar));
        assert!(parse_kpi_period(Some("Smarch")).is_err());
    }

    #[test]
    fn test_resolve_month() {
        let store = InMemoryRecordStore::seeded();
        let mut config = DashboardConfig::default();

        assert_eq!(resolve_month(None, &store, &mut config).unwrap(), Month::Jun);
        assert_eq!(resolve_month(Some("mar"), &store, &mut config).unwrap(), Month::Mar);
        assert_eq!(config.current_year, 2025);

        assert_eq!(resolve_month(Some("Dec-24"), &store, &mut config).unwrap(), Month::Dec);
        assert_eq!((config.current_year, config.previous_year), (2024, 2023));

        assert!(resolve_month(Some("Smarch"), &store, &mut config).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["serviceboard", "--json", "complaints", "st:open", "Ajay", "Kumar"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Complaints { args }) => assert_eq!(args.len(), 3),
            _ => panic!("expected complaints"),
        }
    }
}

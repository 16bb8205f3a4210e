use anyhow::Result;
use ratatui::widgets::TableState;
use serviceboard_core::model::advisor::AdvisorPerformance;
use serviceboard_core::model::complaint::ComplaintRecord;
use serviceboard_core::model::dataset::PartialPeriod;
use serviceboard_core::repository::RecordStore;
use serviceboard_core::service::complaints::ComplaintFilter;
use serviceboard_core::service::csi::KpiPeriod;
use serviceboard_core::service::dto::{
    Achievement, AdvisorProjection, ComplaintSummary, ComplaintTrendEntry, CountEntry, KpiScore,
    PerformanceOverview, RankedAdvisor, StatCard,
};
use serviceboard_core::{
    ComplaintsDashboard, CsiDashboard, DashboardConfig, Month, PerformanceDashboard, ProjectionDashboard,
    RevenueDashboard,
};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Revenue,
    Advisors,
    Performance,
    Complaints,
    Csi,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Revenue, Tab::Advisors, Tab::Performance, Tab::Complaints, Tab::Csi];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Revenue => "Revenue",
            Tab::Advisors => "Advisors",
            Tab::Performance => "Performance",
            Tab::Complaints => "Complaints",
            Tab::Csi => "CSI",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }
}

/// Everything the screens show for one month.
#[derive(Debug, Default)]
pub struct DashboardData {
    pub cards: Vec<StatCard>,
    pub achievements: Vec<Achievement>,
    pub top_advisors: Vec<RankedAdvisor>,
    pub advisor_projections: Vec<AdvisorProjection>,
    /// The month in progress and its length in days.
    pub period: Option<(PartialPeriod, u32)>,
    pub performance: Vec<AdvisorPerformance>,
    pub performance_overview: PerformanceOverview,
    pub complaint_summary: ComplaintSummary,
    pub complaints: Vec<ComplaintRecord>,
    pub psf_counts: Vec<CountEntry>,
    pub complaint_trend: Vec<ComplaintTrendEntry>,
    /// Values for the selected month, YTD where the month is unreported.
    pub scores: Vec<KpiScore>,
}

pub struct App<'a, S: RecordStore> {
    store: &'a S,
    config: &'a DashboardConfig,
    pub tab: Tab,
    pub month: Month,
    pub data: DashboardData,
    pub state: TableState,
    /// Last load error, shown in the footer.
    pub status: Option<String>,
}

impl<'a, S: RecordStore> App<'a, S> {
    pub fn new(store: &'a S, config: &'a DashboardConfig, month: Month) -> Result<Self> {
        let data = load(store, config, month)?;
        Ok(App {
            store,
            config,
            tab: Tab::Revenue,
            month,
            data,
            state: TableState::default(),
            status: None,
        })
    }

    pub fn current_year(&self) -> i32 {
        self.config.current_year
    }

    pub fn previous_year(&self) -> i32 {
        self.config.previous_year
    }

    pub fn next_tab(&mut self) {
        let i = (self.tab.index() + 1) % Tab::ALL.len();
        self.select_tab(Tab::ALL[i]);
    }

    pub fn previous_tab(&mut self) {
        let i = (self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.select_tab(Tab::ALL[i]);
    }

    fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.state.select(if self.rows() > 0 { Some(0) } else { None });
    }

    pub fn next_month(&mut self) {
        if let Some(month) = self.month.next() {
            self.change_month(month);
        }
    }

    pub fn previous_month(&mut self) {
        if let Some(month) = self.month.previous() {
            self.change_month(month);
        }
    }

    fn change_month(&mut self, month: Month) {
        match load(self.store, self.config, month) {
            Ok(data) => {
                self.month = month;
                self.data = data;
                self.status = None;
                self.select_tab(self.tab);
            }
            Err(err) => {
                warn!(%month, error = %err, "failed to load dashboard data");
                self.status = Some(format!("{:#}", err));
            }
        }
    }

    /// Rows in the scrollable table of the current tab.
    fn rows(&self) -> usize {
        match self.tab {
            Tab::Revenue => self.data.cards.len(),
            Tab::Advisors => self.data.top_advisors.len(),
            Tab::Performance => self.data.performance.len(),
            Tab::Complaints => self.data.complaints.len(),
            Tab::Csi => self.data.scores.len(),
        }
    }

    pub fn next(&mut self) {
        let rows = self.rows();
        if rows == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= rows - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let rows = self.rows();
        if rows == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    rows - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }
}

fn load<S: RecordStore>(store: &S, config: &DashboardConfig, month: Month) -> Result<DashboardData> {
    let revenue = RevenueDashboard::new(store, config)?;
    let projection = ProjectionDashboard::new(store, config);
    let complaints = ComplaintsDashboard::new(store);
    let performance = PerformanceDashboard::new(store);
    let filter = ComplaintFilter {
        year: Some(config.current_year),
        month: Some(month),
        ..Default::default()
    };

    let period = match projection.partial_period()? {
        Some(period) if period.month == month && period.year == config.current_year => {
            let days = projection.period_days(&period)?;
            Some((period, days))
        }
        _ => None,
    };
    let advisor_projections = if period.is_some() {
        projection.advisor_projections()?
    } else {
        Vec::new()
    };

    Ok(DashboardData {
        cards: revenue.stat_cards(month)?,
        achievements: revenue.achievements(month)?,
        top_advisors: revenue.top_advisors(month)?,
        advisor_projections,
        period,
        performance: performance.advisors()?,
        performance_overview: performance.overview()?,
        complaint_summary: complaints.summary(&filter)?,
        complaints: complaints.complaints(&filter)?,
        psf_counts: complaints.psf_type_counts(&filter)?,
        complaint_trend: complaints.trend(config.current_year)?,
        scores: CsiDashboard::new(store).scorecard(config.current_year, KpiPeriod::Month(month))?,
    })
}

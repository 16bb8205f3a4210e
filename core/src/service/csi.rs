use serde::{Deserialize, Serialize};

use crate::model::csi::{KpiEntry, TargetDirection, YearlyKpiDataset};
use crate::model::month::Month;
use crate::service::dto::KpiScore;
use crate::service::percent::percent_change;

/// Names the same KPI carries in different years' survey exports.
const KPI_ALIASES: [&[&str]; 2] = [
    &["Handover and delivery", "Handover & Delivery"],
    &["Fix Right First Time", "SOP- Fix Right First Time"],
];

/// Which value a scorecard shows per KPI.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiPeriod {
    /// Latest month with a reported value.
    Latest,
    /// The given month, or the YTD figure when that month is unreported.
    Month(Month),
    Ytd,
}

impl Default for KpiPeriod {
    fn default() -> Self {
        KpiPeriod::Latest
    }
}

/// `name` in `dataset` ignoring case, else under one of its aliases.
pub fn find_kpi<'a>(dataset: &'a YearlyKpiDataset, name: &str) -> Option<&'a KpiEntry> {
    dataset.kpi(name).or_else(|| {
        KPI_ALIASES
            .iter()
            .find(|names| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
            .and_then(|names| names.iter().find_map(|alias| dataset.kpi(alias)))
    })
}

/// Numeric part of a survey target such as "(Tgt >=875)", "(Tgt <= 8days)",
/// "(Tgt > 90%)" or "5 Days". Reads the first number after the last
/// comparison operator, or the first number at all when there is none.
pub fn parse_target(text: &str) -> Option<f64> {
    let tail = match text.rfind(|c: char| matches!(c, '<' | '>' | '=')) {
        Some(pos) => &text[pos + 1..],
        None => text,
    };
    let start = tail.find(|c: char| c.is_ascii_digit())?;
    let number: String = tail[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    number.trim_end_matches('.').parse().ok()
}

/// Direction implied by the target text: a `<` operator means lower is better.
pub fn parse_direction(text: &str) -> TargetDirection {
    if text.contains('<') {
        TargetDirection::LowerIsBetter
    } else {
        TargetDirection::HigherIsBetter
    }
}

pub fn direction_of(entry: &KpiEntry) -> TargetDirection {
    entry
        .direction
        .unwrap_or_else(|| parse_direction(&entry.target_text))
}

/// Latest month with a reported, non-zero value. Unreported months are
/// zero-filled in the survey export.
pub fn latest_value(entry: &KpiEntry) -> Option<(Month, f64)> {
    Month::ALL
        .iter()
        .rev()
        .find_map(|&m| entry.value(m).filter(|v| *v != 0.0).map(|v| (m, v)))
}

/// The reported YTD figure, or the mean of the reported months.
pub fn ytd_value(entry: &KpiEntry) -> Option<f64> {
    if entry.ytd_value.is_some() {
        return entry.ytd_value;
    }
    let reported: Vec<f64> = entry
        .monthly_values
        .iter()
        .flatten()
        .copied()
        .filter(|v| *v != 0.0)
        .collect();
    if reported.is_empty() {
        return None;
    }
    Some(reported.iter().sum::<f64>() / reported.len() as f64)
}

/// The value shown for `period` and the month it belongs to.
pub fn period_value(entry: &KpiEntry, period: KpiPeriod) -> Option<(Option<Month>, f64)> {
    match period {
        KpiPeriod::Latest => latest_value(entry).map(|(m, v)| (Some(m), v)),
        KpiPeriod::Month(month) => match entry.value(month).filter(|v| *v != 0.0) {
            Some(value) => Some((Some(month), value)),
            None => ytd_value(entry).map(|v| (None, v)),
        },
        KpiPeriod::Ytd => ytd_value(entry).map(|v| (None, v)),
    }
}

pub fn meets_target(value: f64, target: f64, direction: TargetDirection) -> bool {
    match direction {
        TargetDirection::HigherIsBetter => value >= target,
        TargetDirection::LowerIsBetter => value <= target,
    }
}

pub fn score_kpi(entry: &KpiEntry, previous: Option<&KpiEntry>, period: KpiPeriod) -> KpiScore {
    let target = parse_target(&entry.target_text);
    let direction = direction_of(entry);
    let shown = period_value(entry, period);
    let ytd = ytd_value(entry);
    let previous_ytd = previous.and_then(ytd_value);

    KpiScore {
        name: entry.name.clone(),
        target_text: entry.target_text.clone(),
        target,
        direction,
        value_month: shown.and_then(|(m, _)| m),
        value: shown.map(|(_, v)| v),
        meets_target: match (shown, target) {
            (Some((_, v)), Some(t)) => Some(meets_target(v, t, direction)),
            _ => None,
        },
        ytd,
        previous_ytd,
        // None here with both YTDs present means growth from zero.
        ytd_change: match (ytd, previous_ytd) {
            (Some(c), Some(p)) => percent_change(c, p),
            _ => None,
        },
    }
}

/// One score per KPI of `current`, paired with `previous` by name or alias.
pub fn scorecard(
    current: &YearlyKpiDataset,
    previous: Option<&YearlyKpiDataset>,
    period: KpiPeriod,
) -> Vec<KpiScore> {
    current
        .kpis
        .iter()
        .map(|entry| score_kpi(entry, previous.and_then(|p| find_kpi(p, &entry.name)), period))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::csi::KpiUnit;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("(Tgt >=875)"), Some(875.0));
        assert_eq!(parse_target("(Tgt <= 27)"), Some(27.0));
        assert_eq!(parse_target("(Tgt > 90%)"), Some(90.0));
        assert_eq!(parse_target("(Tgt 90%)"), Some(90.0));
        assert_eq!(parse_target("(Tgt <= 8days)"), Some(8.0));
        assert_eq!(parse_target("(Tgt < 2.5%)"), Some(2.5));
        assert_eq!(parse_target("5 Days"), Some(5.0));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("n/a"), None);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("(Tgt < 2%)"), TargetDirection::LowerIsBetter);
        assert_eq!(parse_direction("(Tgt >=850)"), TargetDirection::HigherIsBetter);
    }

    #[test]
    fn test_latest_value_skips_zero_filled_months() {
        let entry = KpiEntry::new("CSI", "(Tgt >=875)", KpiUnit::Score)
            .with_values(&[884.0, 873.0, 867.0, 844.0, 859.0, 0.0, 0.0]);
        assert_eq!(latest_value(&entry), Some((Month::May, 859.0)));
        assert_eq!(ytd_value(&entry), Some(865.4));
    }

    #[test]
    fn test_scorecard_honours_direction() {
        let ccptv_2025 = KpiEntry::new("CCPTV", "(Tgt =27)", KpiUnit::Score)
            .with_direction(TargetDirection::LowerIsBetter)
            .with_values(&[25.0, 25.0, 27.0, 28.84, 26.44])
            .with_ytd(26.456);
        let csi_2025 = KpiEntry::new("CSI", "(Tgt >=875)", KpiUnit::Score)
            .with_values(&[884.0, 873.0, 867.0, 844.0, 859.0])
            .with_ytd(842.2);
        let csi_2024 = KpiEntry::new("CSI", "(Tgt >=875)", KpiUnit::Score).with_ytd(807.83);

        let current = YearlyKpiDataset { year: 2025, kpis: vec![ccptv_2025, csi_2025] };
        let previous = YearlyKpiDataset { year: 2024, kpis: vec![csi_2024] };

        let scores = scorecard(&current, Some(&previous), KpiPeriod::Latest);

        assert_eq!(scores[0].meets_target, Some(true));
        assert_eq!(scores[0].previous_ytd, None);
        assert_eq!(scores[0].ytd_change, None);

        assert_eq!(scores[1].value, Some(859.0));
        assert_eq!(scores[1].value_month, Some(Month::May));
        assert_eq!(scores[1].meets_target, Some(false));
        assert_eq!(scores[1].ytd_change, Some(4.25));
    }

    #[test]
    fn test_find_kpi_ignores_case_and_accepts_aliases() {
        let dataset = YearlyKpiDataset {
            year: 2024,
            kpis: vec![
                KpiEntry::new("MG NPS", "(Tgt >=70)", KpiUnit::Score),
                KpiEntry::new("Fix Right First Time", "(Tgt >=90%)", KpiUnit::Percentage),
                KpiEntry::new("Handover & Delivery", "(Tgt >=850)", KpiUnit::Score),
            ],
        };
        assert_eq!(find_kpi(&dataset, "mg nps").map(|k| k.name.as_str()), Some("MG NPS"));
        assert_eq!(
            find_kpi(&dataset, "SOP- Fix Right First Time").map(|k| k.name.as_str()),
            Some("Fix Right First Time")
        );
        assert_eq!(
            find_kpi(&dataset, "handover and delivery").map(|k| k.name.as_str()),
            Some("Handover & Delivery")
        );
        assert!(find_kpi(&dataset, "Washing Quality").is_none());
    }

    #[test]
    fn test_selected_month_falls_back_to_ytd() {
        let entry = KpiEntry::new("CSI", "(Tgt >=875)", KpiUnit::Score)
            .with_values(&[884.0, 873.0, 0.0])
            .with_ytd(878.5);

        assert_eq!(period_value(&entry, KpiPeriod::Month(Month::Feb)), Some((Some(Month::Feb), 873.0)));
        assert_eq!(period_value(&entry, KpiPeriod::Month(Month::Mar)), Some((None, 878.5)));
        assert_eq!(period_value(&entry, KpiPeriod::Month(Month::Sep)), Some((None, 878.5)));
        assert_eq!(period_value(&entry, KpiPeriod::Ytd), Some((None, 878.5)));

        let score = score_kpi(&entry, None, KpiPeriod::Month(Month::Jan));
        assert_eq!(score.value, Some(884.0));
        assert_eq!(score.meets_target, Some(true));
        let score = score_kpi(&entry, None, KpiPeriod::Ytd);
        assert_eq!(score.value_month, None);
        assert_eq!(score.meets_target, Some(true));

        let unreported = KpiEntry::new("Washing Quality", "(Tgt >=850)", KpiUnit::Score);
        assert_eq!(period_value(&unreported, KpiPeriod::Month(Month::Jan)), None);
    }
}

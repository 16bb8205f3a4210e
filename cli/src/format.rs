use serviceboard_core::model::advisor::PerformanceMetric;
use serviceboard_core::service::dto::YtdSummary;
use serviceboard_core::MetricKey;
use unicode_width::UnicodeWidthStr;

/// Groups digits the Indian way: the last three, then pairs (12,34,567).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

fn grouped_whole(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_indian(&format!("{:.0}", rounded.abs())))
}

/// Whole rupees, e.g. `₹12,34,568`.
pub fn inr(value: f64) -> String {
    if !value.is_finite() {
        return "₹0".to_string();
    }
    format!("₹{}", grouped_whole(value))
}

/// Rupees in lakhs for chart axes, e.g. `₹45L`.
pub fn lakhs(value: f64) -> String {
    format!("₹{:.0}L", value / 100_000.0)
}

/// Counts print whole, anything fractional with two decimals.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        grouped_whole(value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn metric_value(metric: MetricKey, value: f64) -> String {
    if metric.is_currency() {
        inr(value)
    } else {
        number(value)
    }
}

/// Signed percentage; growth from a zero base shows as "∞".
pub fn percent(change: Option<f64>) -> String {
    match change {
        None => "∞".to_string(),
        Some(value) if value > 0.0 => format!("+{:.2}%", value),
        Some(value) => format!("{:.2}%", value),
    }
}

/// Year-to-date change, "-" while the current year has no data.
pub fn ytd_change(summary: &YtdSummary) -> String {
    match summary.through {
        Some(_) => percent(summary.percent_change),
        None => "-".to_string(),
    }
}

pub fn performance_value(metric: PerformanceMetric, value: f64) -> String {
    if metric.is_percentage() {
        format!("{}%", number(value))
    } else {
        number(value)
    }
}

pub fn optional(value: Option<f64>) -> String {
    value.map(number).unwrap_or_else(|| "-".to_string())
}

/// Right-aligns `text` to `width` terminal columns.
pub fn pad_left(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", " ".repeat(width.saturating_sub(used)), text)
}

/// Left-aligns `text` to `width` terminal columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

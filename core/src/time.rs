use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::model::month::Month;

/// Calendar length of `month` in `year`.
pub fn days_in_month(year: i32, month: Month) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month.number(), 1)
        .ok_or_else(|| anyhow!("Invalid period: {} {}", month, year))?;
    let next = match month.next() {
        Some(next) => NaiveDate::from_ymd_opt(year, next.number(), 1),
        None => NaiveDate::from_ymd_opt(year + 1, 1, 1),
    }
    .ok_or_else(|| anyhow!("Invalid period: {} {}", month, year))?;
    Ok((next - first).num_days() as u32)
}

/// Parses a month-of-year such as "2025-06", "Jun-25", "Jun-2025" or
/// "june 2025".
pub fn parse_period(input: &str) -> Result<(i32, Month)> {
    let input = input.trim();
    let (left, right) = input
        .split_once(|c: char| c == '-' || c == '/' || c.is_whitespace())
        .ok_or_else(|| anyhow!("Could not parse period: {}", input))?;
    let (left, right) = (left.trim(), right.trim());

    // 2025-06
    if left.len() == 4 {
        if let Ok(year) = left.parse::<i32>() {
            return Ok((year, right.parse::<Month>()?));
        }
    }

    let month = left.parse::<Month>()?;
    let year = right
        .parse::<i32>()
        .map_err(|_| anyhow!("Invalid year in period: {}", input))?;
    let year = if right.len() == 2 { 2000 + year } else { year };
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, Month::Jun).unwrap(), 30);
        assert_eq!(days_in_month(2025, Month::Dec).unwrap(), 31);
        assert_eq!(days_in_month(2024, Month::Feb).unwrap(), 29);
        assert_eq!(days_in_month(2025, Month::Feb).unwrap(), 28);
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period("2025-06").unwrap(), (2025, Month::Jun));
        assert_eq!(parse_period("Jun-25").unwrap(), (2025, Month::Jun));
        assert_eq!(parse_period("Jun-2024").unwrap(), (2024, Month::Jun));
        assert_eq!(parse_period("june 2025").unwrap(), (2025, Month::Jun));
        assert_eq!(parse_period("2025/12").unwrap(), (2025, Month::Dec));

        assert!(parse_period("2025").is_err());
        assert!(parse_period("2025-13").is_err());
        assert!(parse_period("Jun-xx").is_err());
    }
}

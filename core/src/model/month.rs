use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month. Declaration order is the canonical Jan..Dec axis every
/// monthly series is laid out on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Zero-based position on the canonical axis.
    pub fn index(self) -> usize {
        self as usize
    }

    /// 1..=12
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Month> {
        let index = number.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn of_date(date: NaiveDate) -> Month {
        // chrono guarantees 1..=12
        Self::ALL[date.month0() as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Month::Jan => "January",
            Month::Feb => "February",
            Month::Mar => "March",
            Month::Apr => "April",
            Month::May => "May",
            Month::Jun => "June",
            Month::Jul => "July",
            Month::Aug => "August",
            Month::Sep => "September",
            Month::Oct => "October",
            Month::Nov => "November",
            Month::Dec => "December",
        }
    }

    /// 1..=4
    pub fn quarter(self) -> u32 {
        (self.index() / 3) as u32 + 1
    }

    pub fn next(self) -> Option<Month> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Month> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = anyhow::Error;

    /// Accepts "Jun", "june", "JUN", "6" and export-style labels like "Jun-25".
    fn from_str(input: &str) -> Result<Self> {
        let token = input.trim();
        let token = token.split('-').next().unwrap_or(token);

        if let Ok(number) = token.parse::<u32>() {
            return Month::from_number(number)
                .ok_or_else(|| anyhow!("Month number out of range: {}", number));
        }

        let lower = token.to_lowercase();
        if lower.len() < 3 {
            return Err(anyhow!("Could not parse month: {}", input));
        }
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.full_name().to_lowercase().starts_with(&lower))
            .ok_or_else(|| anyhow!("Could not parse month: {}", input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        assert_eq!(Month::ALL[0], Month::Jan);
        assert_eq!(Month::ALL[11], Month::Dec);
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.index(), i);
            assert_eq!(month.number(), i as u32 + 1);
        }
    }

    #[test]
    fn test_parse_month() {
        assert_eq!("Jun".parse::<Month>().unwrap(), Month::Jun);
        assert_eq!("june".parse::<Month>().unwrap(), Month::Jun);
        assert_eq!("SEP".parse::<Month>().unwrap(), Month::Sep);
        assert_eq!("6".parse::<Month>().unwrap(), Month::Jun);
        assert_eq!("Jan-25".parse::<Month>().unwrap(), Month::Jan);

        assert!("13".parse::<Month>().is_err());
        assert!("ju".parse::<Month>().is_err());
        assert!("smarch".parse::<Month>().is_err());
    }

    #[test]
    fn test_quarter_and_neighbours() {
        assert_eq!(Month::Mar.quarter(), 1);
        assert_eq!(Month::Apr.quarter(), 2);
        assert_eq!(Month::Dec.quarter(), 4);
        assert_eq!(Month::Jan.previous(), None);
        assert_eq!(Month::Dec.next(), None);
        assert_eq!(Month::Jun.next(), Some(Month::Jul));
    }
}

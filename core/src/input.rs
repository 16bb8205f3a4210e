use std::collections::HashMap;
use anyhow::{anyhow, Result};

use crate::model::month::Month;
use crate::service::complaints::{ComplaintFilter, StatusFilter};

const FILTER_KEYS: [&str; 4] = ["year", "month", "advisor", "status"];
const STATUS_VALUES: [&str; 6] = ["all", "resolved", "closed", "unresolved", "open", "pending"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut text_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        text_parts.push(arg.as_str());
    }

    ParsedInput {
        text: text_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Builds a complaint filter from `key:value` words, e.g.
/// `year:2025 mo:jun st:open Ajay Kumar`. Keys may be abbreviated. Free text
/// is taken as the advisor name unless `advisor:` is given.
pub fn complaint_filter(args: &[String]) -> Result<ComplaintFilter> {
    let parsed = parse_args(args);
    let mut filter = ComplaintFilter::default();

    for (key, value) in &parsed.metadata {
        match expand_key(key, &FILTER_KEYS)?.as_str() {
            "year" => {
                filter.year = Some(
                    value
                        .parse::<i32>()
                        .map_err(|_| anyhow!("Invalid year: '{}'", value))?,
                )
            }
            "month" => filter.month = Some(value.parse::<Month>()?),
            "advisor" => filter.advisor = Some(value.clone()),
            "status" => {
                filter.status = match expand_key(&value.to_lowercase(), &STATUS_VALUES)?.as_str() {
                    "all" => StatusFilter::All,
                    "resolved" | "closed" => StatusFilter::Resolved,
                    _ => StatusFilter::Unresolved,
                }
            }
            other => return Err(anyhow!("Unknown key: '{}'", other)),
        }
    }

    if filter.advisor.is_none() && !parsed.text.is_empty() {
        filter.advisor = Some(parsed.text);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        input.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&words("Ajay Kumar year:2025 month:Jun"));
        assert_eq!(parsed.text, "Ajay Kumar");
        assert_eq!(parsed.metadata.get("year"), Some(&"2025".to_string()));
        assert_eq!(parsed.metadata.get("month"), Some(&"Jun".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["month", "mode", "metric"];

        assert_eq!(expand_key("mon", &candidates).unwrap(), "month");
        assert_eq!(expand_key("mod", &candidates).unwrap(), "mode");
        assert_eq!(expand_key("metric", &candidates).unwrap(), "metric");

        // Ambiguous
        assert!(expand_key("m", &candidates).is_err());
        assert!(expand_key("mo", &candidates).is_err());

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_complaint_filter() {
        let filter = complaint_filter(&words("y:2025 mo:feb st:open Ajay Kumar")).unwrap();
        assert_eq!(filter.year, Some(2025));
        assert_eq!(filter.month, Some(Month::Feb));
        assert_eq!(filter.status, StatusFilter::Unresolved);
        assert_eq!(filter.advisor.as_deref(), Some("Ajay Kumar"));

        let filter = complaint_filter(&words("status:Closed advisor:Vikram ignored")).unwrap();
        assert_eq!(filter.status, StatusFilter::Resolved);
        assert_eq!(filter.advisor.as_deref(), Some("Vikram"));

        assert_eq!(complaint_filter(&[]).unwrap(), ComplaintFilter::default());
    }

    #[test]
    fn test_complaint_filter_errors() {
        assert!(complaint_filter(&words("year:twenty")).is_err());
        assert!(complaint_filter(&words("month:13")).is_err());
        assert!(complaint_filter(&words("colour:red")).is_err());
        assert!(complaint_filter(&words("st:x")).is_err());
    }
}

use crate::model::advisor::{AdvisorPerformance, PerformanceMetric};
use crate::service::dto::{PerformanceAverage, PerformanceOverview, PerformanceRanking, RankedPerformance};
use crate::service::ranking::sort_descending_by;

/// Mean of `metric` across advisors, 0 for an empty team.
pub fn team_average(advisors: &[AdvisorPerformance], metric: PerformanceMetric) -> f64 {
    if advisors.is_empty() {
        return 0.0;
    }
    advisors.iter().map(|a| a.value(metric)).sum::<f64>() / advisors.len() as f64
}

pub fn team_averages(advisors: &[AdvisorPerformance]) -> Vec<PerformanceAverage> {
    PerformanceMetric::AVERAGED
        .iter()
        .map(|&metric| PerformanceAverage {
            metric,
            average: team_average(advisors, metric),
        })
        .collect()
}

/// Every advisor, highest `metric` first; ties keep input order.
pub fn rank_by_metric(advisors: &[AdvisorPerformance], metric: PerformanceMetric) -> PerformanceRanking {
    let mut ranked: Vec<RankedPerformance> = advisors
        .iter()
        .map(|a| RankedPerformance {
            name: a.name.clone(),
            value: a.value(metric),
        })
        .collect();
    sort_descending_by(&mut ranked, |r| r.value);
    PerformanceRanking { metric, advisors: ranked }
}

pub fn overview(advisors: &[AdvisorPerformance]) -> PerformanceOverview {
    PerformanceOverview {
        advisor_count: advisors.len(),
        averages: team_averages(advisors),
        rankings: PerformanceMetric::AVERAGED
            .iter()
            .map(|&metric| rank_by_metric(advisors, metric))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor(name: &str, rsa: u32, ew: u32, wheel_alignment: u32, balancing: u32) -> AdvisorPerformance {
        AdvisorPerformance {
            name: name.to_string(),
            rsa,
            ew,
            wheel_alignment,
            balancing,
            upselling: 70.0,
            customer_satisfaction: 85.0,
        }
    }

    fn team() -> Vec<AdvisorPerformance> {
        vec![
            advisor("Ajay Kumar", 8, 5, 32, 28),
            advisor("Dhanesh Tripathi", 12, 9, 58, 45),
            advisor("Vikram", 7, 4, 41, 37),
            advisor("Rahul Sharma", 12, 7, 45, 40),
        ]
    }

    #[test]
    fn test_team_averages() {
        let averages = team_averages(&team());
        let values: Vec<(PerformanceMetric, f64)> = averages.iter().map(|a| (a.metric, a.average)).collect();
        assert_eq!(
            values,
            vec![
                (PerformanceMetric::Rsa, 9.75),
                (PerformanceMetric::Ew, 6.25),
                (PerformanceMetric::WheelAlignment, 44.0),
                (PerformanceMetric::Balancing, 37.5),
            ]
        );
        assert_eq!(team_average(&[], PerformanceMetric::Rsa), 0.0);
    }

    #[test]
    fn test_rank_by_metric_keeps_ties_in_order() {
        let ranking = rank_by_metric(&team(), PerformanceMetric::Rsa);
        let names: Vec<&str> = ranking.advisors.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Dhanesh Tripathi", "Rahul Sharma", "Ajay Kumar", "Vikram"]);

        let alignment = rank_by_metric(&team(), PerformanceMetric::WheelAlignment);
        assert_eq!(alignment.advisors[0].name, "Dhanesh Tripathi");
        assert_eq!(alignment.advisors[3].value, 32.0);
    }

    #[test]
    fn test_overview() {
        let overview = overview(&team());
        assert_eq!(overview.advisor_count, 4);
        assert_eq!(overview.averages.len(), 4);
        assert_eq!(overview.rankings.len(), 4);
        assert_eq!(overview.rankings[1].metric, PerformanceMetric::Ew);
        assert_eq!(overview.rankings[1].advisors[0].name, "Dhanesh Tripathi");

        let empty = super::overview(&[]);
        assert_eq!(empty.advisor_count, 0);
        assert!(empty.rankings.iter().all(|r| r.advisors.is_empty()));
    }
}

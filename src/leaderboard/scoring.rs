//! Joins attaching points and owners to finisher rows.
//!
//! Both joins are inner joins: a row without a partner disappears, a row with
//! several partners is repeated once per partner. Uniqueness of the keys is
//! enforced when the tables are loaded, not here.

use std::collections::HashMap;

use crate::types::{FinisherRow, OwnedRow, Rider, ScoredRow, ScoringRule};

/// Attach the points each row's rank earns; unscored ranks are dropped.
pub fn score(rows: &[FinisherRow], rules: &[ScoringRule]) -> Vec<ScoredRow> {
    let mut by_rank: HashMap<u32, Vec<f64>> = HashMap::new();
    for rule in rules {
        by_rank.entry(rule.rank).or_default().push(rule.points);
    }

    rows.iter()
        .flat_map(|row| {
            by_rank
                .get(&row.rank)
                .into_iter()
                .flatten()
                .map(move |&points| ScoredRow {
                    rider_name: row.rider_name.clone(),
                    rank: row.rank,
                    race: row.race.clone(),
                    points,
                })
        })
        .collect()
}

/// Attach the fantasy team owning each rider; riders not on the roster are dropped.
///
/// Names must match exactly, including case.
pub fn resolve(rows: &[ScoredRow], riders: &[Rider]) -> Vec<OwnedRow> {
    let mut by_name: HashMap<&str, Vec<&str>> = HashMap::new();
    for rider in riders {
        by_name
            .entry(rider.rider_name.as_str())
            .or_default()
            .push(rider.team.as_str());
    }

    rows.iter()
        .flat_map(|row| {
            by_name
                .get(row.rider_name.as_str())
                .into_iter()
                .flatten()
                .map(move |team| OwnedRow {
                    rider_name: row.rider_name.clone(),
                    rank: row.rank,
                    race: row.race.clone(),
                    points: row.points,
                    team: team.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finisher(name: &str, rank: u32, race: &str) -> FinisherRow {
        FinisherRow {
            rider_name: name.to_string(),
            rank,
            race: race.to_string(),
        }
    }

    fn rule(rank: u32, points: f64) -> ScoringRule {
        ScoringRule { rank, points }
    }

    fn rider(name: &str, team: &str) -> Rider {
        Rider {
            rider_name: name.to_string(),
            team: team.to_string(),
        }
    }

    #[test]
    fn test_score_attaches_points() {
        let rows = vec![finisher("A Rider", 1, "Stage 1"), finisher("B Rider", 2, "Stage 1")];
        let scored = score(&rows, &[rule(1, 10.0), rule(2, 5.0)]);

        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].points, 10.0);
        assert_eq!(scored[1].points, 5.0);
        assert_eq!(scored[1].race, "Stage 1");
    }

    #[test]
    fn test_score_drops_unscored_rank() {
        let rows = vec![finisher("A Rider", 1, "Stage 1"), finisher("K Rider", 11, "Stage 1")];
        let scored = score(&rows, &[rule(1, 10.0)]);

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].rider_name, "A Rider");
    }

    #[test]
    fn test_score_duplicate_rank_fans_out() {
        let rows = vec![finisher("A Rider", 1, "Stage 1")];
        let scored = score(&rows, &[rule(1, 10.0), rule(1, 3.0)]);

        let points: Vec<f64> = scored.iter().map(|r| r.points).collect();
        assert_eq!(points, vec![10.0, 3.0]);
    }

    #[test]
    fn test_score_keeps_row_order() {
        let rows = vec![
            finisher("A Rider", 2, "Stage 1"),
            finisher("B Rider", 1, "Stage 1"),
            finisher("A Rider", 1, "Stage 2"),
        ];
        let scored = score(&rows, &[rule(1, 10.0), rule(2, 5.0)]);

        let order: Vec<(&str, &str)> = scored
            .iter()
            .map(|r| (r.rider_name.as_str(), r.race.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("A Rider", "Stage 1"), ("B Rider", "Stage 1"), ("A Rider", "Stage 2")]
        );
    }

    #[test]
    fn test_resolve_drops_unowned() {
        let scored = score(
            &[finisher("A Rider", 1, "Stage 1"), finisher("B Rider", 2, "Stage 1")],
            &[rule(1, 10.0), rule(2, 5.0)],
        );
        let owned = resolve(&scored, &[rider("A Rider", "Team X")]);

        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].team, "Team X");
        assert_eq!(owned[0].points, 10.0);
    }

    #[test]
    fn test_resolve_is_exact_match() {
        let scored = score(&[finisher("a rider", 1, "Stage 1")], &[rule(1, 10.0)]);
        assert!(resolve(&scored, &[rider("A Rider", "Team X")]).is_empty());
    }

    #[test]
    fn test_resolve_duplicate_rider_fans_out() {
        let scored = score(&[finisher("A Rider", 1, "Stage 1")], &[rule(1, 10.0)]);
        let owned = resolve(&scored, &[rider("A Rider", "Team X"), rider("A Rider", "Team Y")]);

        let teams: Vec<&str> = owned.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["Team X", "Team Y"]);
    }
}

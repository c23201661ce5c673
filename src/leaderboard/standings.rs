//! Standings aggregation.

use std::collections::HashMap;

use crate::types::{BreakdownRow, OwnedRow, StandingEntry};

/// Sum points per (rider, team) and rank the totals.
///
/// Sorted by points descending; equal totals are ordered by rider name, then team.
pub fn aggregate(rows: &[OwnedRow]) -> Vec<StandingEntry> {
    let mut totals: HashMap<(&str, &str), f64> = HashMap::new();
    for row in rows {
        *totals
            .entry((row.rider_name.as_str(), row.team.as_str()))
            .or_insert(0.0) += row.points;
    }

    let mut standings: Vec<StandingEntry> = totals
        .into_iter()
        .map(|((rider_name, team), points)| StandingEntry {
            rider_name: rider_name.to_string(),
            team: team.to_string(),
            points,
        })
        .collect();

    standings.sort_by(|a, b| {
        b.points
            .total_cmp(&a.points)
            .then_with(|| a.rider_name.cmp(&b.rider_name))
            .then_with(|| a.team.cmp(&b.team))
    });

    standings
}

/// Per-row detail of where the points came from, in scrape order
pub fn breakdown(rows: &[OwnedRow]) -> Vec<BreakdownRow> {
    rows.iter().map(BreakdownRow::from).collect()
}

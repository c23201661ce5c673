//! Loading and validation of the three input tables.
//!
//! Every table is a headed CSV file. A missing or malformed table stops the
//! run before anything is fetched.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::config::SourcesConfig;
use crate::types::{Race, Rider, ScoringRule};

/// Race list, scoring table and rider roster for one run
#[derive(Debug, Clone)]
pub struct InputTables {
    pub races: Vec<Race>,
    pub scoring: Vec<ScoringRule>,
    pub riders: Vec<Rider>,
}

impl InputTables {
    /// Load and validate all three tables
    pub fn load(sources: &SourcesConfig) -> Result<Self> {
        let races = load_races(&sources.races)?;
        let scoring = load_scoring_rules(&sources.scoring)?;
        let riders = load_riders(&sources.riders)?;

        info!(
            "Loaded {} races, {} scoring rules, {} riders",
            races.len(),
            scoring.len(),
            riders.len()
        );

        Ok(Self {
            races,
            scoring,
            riders,
        })
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Could not open input table {}", path.display()))?;

    let mut rows = Vec::new();
    for (line_num, result) in reader.deserialize().enumerate() {
        // +2: 1-indexed plus the header row
        let row: T = result.with_context(|| {
            format!("Malformed row at line {} in {}", line_num + 2, path.display())
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load the race list (`pcs_slug`, `race_name`)
pub fn load_races(path: &Path) -> Result<Vec<Race>> {
    let races: Vec<Race> = read_table(path)?;
    if races.is_empty() {
        bail!("No races to process in {}", path.display());
    }
    Ok(races)
}

/// Load the scoring table (`rank`, `points`); ranks must be unique and at least 1
pub fn load_scoring_rules(path: &Path) -> Result<Vec<ScoringRule>> {
    let rules: Vec<ScoringRule> = read_table(path)?;

    let mut seen = HashSet::new();
    for rule in &rules {
        if rule.rank == 0 {
            bail!("Rank 0 in scoring table {}; ranks start at 1", path.display());
        }
        if !seen.insert(rule.rank) {
            bail!("Duplicate rank {} in scoring table {}", rule.rank, path.display());
        }
    }

    Ok(rules)
}

/// Load the rider roster (`rider_name`, `team`); rider names must be unique
pub fn load_riders(path: &Path) -> Result<Vec<Rider>> {
    let riders: Vec<Rider> = read_table(path)?;

    let mut seen = HashSet::new();
    for rider in &riders {
        if !seen.insert(rider.rider_name.as_str()) {
            bail!(
                "Duplicate rider '{}' in rider table {}",
                rider.rider_name,
                path.display()
            );
        }
    }

    Ok(riders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_races() {
        let file = csv_file(
            "pcs_slug,race_name\nrace/tour-down-under/2025/stage-1, TDU Stage 1\nrace/omloop/2025/result,Omloop\n",
        );
        let races = load_races(file.path()).unwrap();

        assert_eq!(races.len(), 2);
        assert_eq!(races[0].pcs_slug, "race/tour-down-under/2025/stage-1");
        assert_eq!(races[0].race_name, "TDU Stage 1");
        assert_eq!(races[1].race_name, "Omloop");
    }

    #[test]
    fn test_load_races_with_generic_headers() {
        let file = csv_file("source_identifier,display_name\nrace/1,Stage 1\n");
        let races = load_races(file.path()).unwrap();
        assert_eq!(races[0].pcs_slug, "race/1");
        assert_eq!(races[0].race_name, "Stage 1");
    }

    #[test]
    fn test_empty_race_list_is_fatal() {
        let file = csv_file("pcs_slug,race_name\n");
        assert!(load_races(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_riders(Path::new("does/not/exist/riders.csv")).unwrap_err();
        assert!(format!("{:#}", err).contains("riders.csv"));
    }

    #[test]
    fn test_load_scoring_rules() {
        let file = csv_file("rank,points\n1,10\n2,5.5\n");
        let rules = load_scoring_rules(file.path()).unwrap();
        assert_eq!(
            rules,
            vec![
                ScoringRule { rank: 1, points: 10.0 },
                ScoringRule { rank: 2, points: 5.5 },
            ]
        );
    }

    #[test]
    fn test_duplicate_rank_is_fatal() {
        let file = csv_file("rank,points\n1,10\n1,8\n");
        let err = load_scoring_rules(file.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate rank 1"));
    }

    #[test]
    fn test_non_numeric_points_is_fatal() {
        let file = csv_file("rank,points\n1,ten\n");
        let err = load_scoring_rules(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_duplicate_rider_is_fatal() {
        let file = csv_file("rider_name,team\nA Rider,Team X\nA Rider,Team Y\n");
        let err = load_riders(file.path()).unwrap_err();
        assert!(err.to_string().contains("A Rider"));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let file = csv_file("rider_name,team,nationality\nA Rider,Team X,BEL\n");
        let riders = load_riders(file.path()).unwrap();
        assert_eq!(riders[0].team, "Team X");
    }

    #[test]
    fn test_load_all_tables() {
        let races = csv_file("pcs_slug,race_name\nrace/1,Stage 1\n");
        let scoring = csv_file("rank,points\n1,10\n");
        let riders = csv_file("rider_name,team\nA Rider,Team X\n");
        let sources = SourcesConfig {
            races: races.path().to_path_buf(),
            scoring: scoring.path().to_path_buf(),
            riders: riders.path().to_path_buf(),
        };

        let tables = InputTables::load(&sources).unwrap();
        assert_eq!(tables.races.len(), 1);
        assert_eq!(tables.scoring.len(), 1);
        assert_eq!(tables.riders.len(), 1);
    }
}

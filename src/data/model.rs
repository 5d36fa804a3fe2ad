use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
///
/// Field names map to the column headers of the published launch CSV; any
/// other columns in the file are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    /// 1 = success, 0 = failure.
    #[serde(rename = "class")]
    pub outcome_class: u8,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

impl LaunchRecord {
    #[cfg(test)]
    pub fn new(site: &str, payload_mass_kg: f64, outcome_class: u8, booster: &str) -> Self {
        Self {
            launch_site: site.to_string(),
            payload_mass_kg,
            outcome_class,
            booster_version_category: booster.to_string(),
        }
    }

    fn validate(&self, row: usize) -> Result<(), RecordError> {
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(RecordError::InvalidPayload {
                row,
                value: self.payload_mass_kg,
            });
        }
        if self.outcome_class > 1 {
            return Err(RecordError::InvalidClass {
                row,
                value: self.outcome_class,
            });
        }
        if self.launch_site.trim().is_empty() {
            return Err(RecordError::EmptySite { row });
        }
        Ok(())
    }
}

/// A row that passed parsing but violates the launch table's value domain.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("row {row}: payload mass {value} is not a non-negative number")]
    InvalidPayload { row: usize, value: f64 },
    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: u8 },
    #[error("row {row}: launch site is empty")]
    EmptySite { row: usize },
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full validated dataset with pre-computed indices.
///
/// Built once and never mutated afterwards; the UI holds it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories, sorted.
    booster_categories: Vec<String>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Validate the records and build the site / category indices.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, RecordError> {
        let mut seen_sites: HashSet<&str> = HashSet::new();
        let mut sites = Vec::new();
        let mut categories: BTreeSet<&str> = BTreeSet::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for (row, rec) in records.iter().enumerate() {
            rec.validate(row)?;

            if seen_sites.insert(rec.launch_site.as_str()) {
                sites.push(rec.launch_site.clone());
            }
            categories.insert(rec.booster_version_category.as_str());

            let p = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(p), hi.max(p)),
                None => (p, p),
            });
        }

        let booster_categories = categories.into_iter().map(str::to_string).collect();

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// `(min, max)` payload mass over all rows, `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, 0, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 500.0, 0, "v1.1"),
            LaunchRecord::new("CCAFS LC-40", 2296.0, 1, "FT"),
            LaunchRecord::new("KSC LC-39A", 5300.0, 1, "FT"),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, 1, "B4"),
        ]
    }

    #[test]
    fn sites_are_indexed_in_first_appearance_order() {
        let ds = LaunchDataset::from_records(sample()).unwrap();
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn booster_categories_are_sorted_and_unique() {
        let ds = LaunchDataset::from_records(sample()).unwrap();
        assert_eq!(ds.booster_categories(), ["B4", "FT", "v1.0", "v1.1"]);
    }

    #[test]
    fn payload_bounds_cover_all_rows() {
        let ds = LaunchDataset::from_records(sample()).unwrap();
        assert_eq!(ds.payload_bounds(), Some((0.0, 9600.0)));

        let empty = LaunchDataset::from_records(Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.payload_bounds(), None);
    }

    #[test]
    fn rejects_negative_payload() {
        let mut rows = sample();
        rows.push(LaunchRecord::new("KSC LC-39A", -1.0, 1, "FT"));
        assert_eq!(
            LaunchDataset::from_records(rows),
            Err(RecordError::InvalidPayload { row: 5, value: -1.0 })
        );
    }

    #[test]
    fn rejects_non_binary_class() {
        let rows = vec![LaunchRecord::new("KSC LC-39A", 100.0, 2, "FT")];
        assert_eq!(
            LaunchDataset::from_records(rows),
            Err(RecordError::InvalidClass { row: 0, value: 2 })
        );
    }

    #[test]
    fn rejects_blank_site() {
        let rows = vec![LaunchRecord::new("  ", 100.0, 1, "FT")];
        assert_eq!(
            LaunchDataset::from_records(rows),
            Err(RecordError::EmptySite { row: 0 })
        );
    }
}

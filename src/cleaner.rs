//! Mean imputation of missing numeric values.

use crate::error::DataError;
use crate::model::{Column, Dataset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of missing values per column, in table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSummary {
    pub counts: Vec<(Column, usize)>,
}

impl MissingSummary {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, count)| count).sum()
    }
}

impl fmt::Display for MissingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (column, count) in &self.counts {
            writeln!(f, "{:<10} {count:>4}", column.name())?;
        }
        Ok(())
    }
}

/// Count the missing values of every column.
pub fn missing_summary(dataset: &Dataset) -> MissingSummary {
    let counts = Column::ALL
        .iter()
        .map(|&column| {
            let count = dataset
                .records()
                .iter()
                .filter(|record| record.is_missing(column))
                .count();
            (column, count)
        })
        .collect();
    MissingSummary { counts }
}

/// Fill every missing magnitude, depth and latitude with its column mean.
///
/// Means are computed on the input before any value is replaced,
/// and the input itself is left untouched.
///
/// # Errors
/// Returns [`DataError::AllMissing`] if a non-empty dataset has an
/// imputable column with no values present.
pub fn clean(dataset: &Dataset) -> Result<Dataset, DataError> {
    if dataset.is_empty() {
        return Ok(Dataset::default());
    }

    let mut records = dataset.records().to_vec();
    for column in Column::IMPUTABLE {
        let n_missing = dataset
            .records()
            .iter()
            .filter(|record| record.is_missing(column))
            .count();
        if n_missing == 0 {
            continue;
        }

        let mean = dataset.column_mean(column)?;
        for record in &mut records {
            if let Some(slot) = record.optional_mut(column) {
                if slot.is_none() {
                    *slot = Some(mean);
                }
            }
        }
        log::debug!("filled {n_missing} missing {column} values with {mean}");
    }

    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_catalog;
    use crate::model::Record;
    use chrono::NaiveDate;

    fn round4(val: f64) -> f64 {
        (val * 1e4).round() / 1e4
    }

    #[test]
    fn no_imputable_value_remains_missing() {
        let cleaned = clean(&sample_catalog().unwrap()).unwrap();
        for column in Column::IMPUTABLE {
            assert!(cleaned.records().iter().all(|r| !r.is_missing(column)));
        }
        assert_eq!(missing_summary(&cleaned).total(), 0);
    }

    #[test]
    fn fills_magnitude_and_depth_with_column_means() {
        let cleaned = clean(&sample_catalog().unwrap()).unwrap();
        let records = cleaned.records();
        assert_eq!(round4(records[1].magnitude.unwrap()), 5.5143);
        assert_eq!(round4(records[2].depth_km.unwrap()), 22.6857);
    }

    #[test]
    fn fill_value_is_mean_of_originally_present_values() {
        let dataset = sample_catalog().unwrap();
        let cleaned = clean(&dataset).unwrap();
        for column in Column::IMPUTABLE {
            let (observed, filled): (Vec<_>, Vec<_>) = dataset
                .records()
                .iter()
                .zip(cleaned.records())
                .partition(|(orig, _)| !orig.is_missing(column));
            let observed: Vec<f64> = observed
                .iter()
                .map(|(_, new)| new.numeric(column).unwrap().unwrap())
                .collect();
            let mean = observed.iter().sum::<f64>() / observed.len() as f64;
            for (_, new) in filled {
                let fill = new.numeric(column).unwrap().unwrap();
                assert!((fill - mean).abs() < 1e-12, "column {column}");
            }
        }
    }

    #[test]
    fn cleaning_is_idempotent_and_leaves_input_untouched() {
        let dataset = sample_catalog().unwrap();
        let once = clean(&dataset).unwrap();
        let twice = clean(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(dataset, sample_catalog().unwrap());
    }

    #[test]
    fn summary_counts_gaps_per_column() {
        let summary = missing_summary(&sample_catalog().unwrap());
        assert_eq!(
            summary.counts,
            vec![
                (Column::Date, 0),
                (Column::Latitude, 1),
                (Column::Longitude, 0),
                (Column::Magnitude, 1),
                (Column::DepthKm, 1),
                (Column::Location, 0),
            ]
        );
        assert_eq!(summary.total(), 3);
        assert!(summary.to_string().starts_with("date"));
    }

    #[test]
    fn all_missing_column_fails() {
        let record = Record {
            date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            latitude: Some(1.0),
            longitude: 2.0,
            magnitude: Some(5.0),
            depth_km: None,
            location: "Nowhere".to_string(),
        };
        let dataset = Dataset::from_records(vec![record.clone(), record]);
        let err = clean(&dataset).unwrap_err();
        assert!(matches!(err, DataError::AllMissing { column: Column::DepthKm }));
    }

    #[test]
    fn empty_dataset_cleans_to_empty() {
        assert!(clean(&Dataset::default()).unwrap().is_empty());
    }
}

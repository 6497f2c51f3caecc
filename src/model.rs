//! Earthquake catalog data types.

use crate::error::DataError;
use crate::stats::compute_mean;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column of the earthquake catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    Latitude,
    Longitude,
    Magnitude,
    DepthKm,
    Location,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Column; 6] = [
        Column::Date,
        Column::Latitude,
        Column::Longitude,
        Column::Magnitude,
        Column::DepthKm,
        Column::Location,
    ];

    /// Columns whose gaps are filled by the cleaner, in fill order.
    pub const IMPUTABLE: [Column; 3] = [Column::Magnitude, Column::DepthKm, Column::Latitude];

    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::Magnitude => "magnitude",
            Column::DepthKm => "depth_km",
            Column::Location => "location",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One earthquake observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub latitude: Option<f64>,
    pub longitude: f64,
    pub magnitude: Option<f64>,
    pub depth_km: Option<f64>,
    pub location: String,
}

impl Record {
    /// Get the value of a numeric column, `None` if it is missing.
    pub fn numeric(&self, column: Column) -> Result<Option<f64>, DataError> {
        match column {
            Column::Latitude => Ok(self.latitude),
            Column::Longitude => Ok(Some(self.longitude)),
            Column::Magnitude => Ok(self.magnitude),
            Column::DepthKm => Ok(self.depth_km),
            Column::Date | Column::Location => Err(DataError::NotNumeric { column }),
        }
    }

    pub fn is_missing(&self, column: Column) -> bool {
        match column {
            Column::Latitude => self.latitude.is_none(),
            Column::Magnitude => self.magnitude.is_none(),
            Column::DepthKm => self.depth_km.is_none(),
            Column::Date | Column::Longitude | Column::Location => false,
        }
    }

    /// Mutable access to an optional numeric field.
    pub(crate) fn optional_mut(&mut self, column: Column) -> Option<&mut Option<f64>> {
        match column {
            Column::Latitude => Some(&mut self.latitude),
            Column::Magnitude => Some(&mut self.magnitude),
            Column::DepthKm => Some(&mut self.depth_km),
            Column::Date | Column::Longitude | Column::Location => None,
        }
    }
}

/// Ordered sequence of earthquake records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values present in a numeric column, in record order.
    pub fn present_values(&self, column: Column) -> Result<Vec<f64>, DataError> {
        let mut vals = Vec::with_capacity(self.records.len());
        for record in &self.records {
            if let Some(val) = record.numeric(column)? {
                vals.push(val);
            }
        }
        Ok(vals)
    }

    /// Compute the mean of the values present in a numeric column.
    ///
    /// # Errors
    /// Fails if the dataset is empty, the column is not numeric,
    /// or every value of the column is missing.
    pub fn column_mean(&self, column: Column) -> Result<f64, DataError> {
        if self.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        let vals = self.present_values(column)?;
        if vals.is_empty() {
            return Err(DataError::AllMissing { column });
        }
        Ok(compute_mean(&vals))
    }
}

/// Calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(magnitude: Option<f64>) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            latitude: Some(1.0),
            longitude: 2.0,
            magnitude,
            depth_km: None,
            location: "Nowhere".to_string(),
        }
    }

    #[test]
    fn column_mean_skips_missing_values() {
        let dataset =
            Dataset::from_records(vec![record(Some(4.0)), record(None), record(Some(6.0))]);
        assert_eq!(dataset.column_mean(Column::Magnitude).unwrap(), 5.0);
    }

    #[test]
    fn column_mean_fails_on_empty_and_all_missing() {
        let empty = Dataset::default();
        assert!(matches!(
            empty.column_mean(Column::Magnitude),
            Err(DataError::EmptyDataset)
        ));

        let dataset = Dataset::from_records(vec![record(None)]);
        let err = dataset.column_mean(Column::DepthKm).unwrap_err();
        assert!(matches!(err, DataError::AllMissing { column: Column::DepthKm }));
    }

    #[test]
    fn text_columns_are_not_numeric() {
        let dataset = Dataset::from_records(vec![record(None)]);
        assert!(matches!(
            dataset.column_mean(Column::Location),
            Err(DataError::NotNumeric { column: Column::Location })
        ));
    }

    #[test]
    fn months_order_chronologically() {
        let dec = Month { year: 2022, month: 12 };
        let jan = Month { year: 2023, month: 1 };
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2023-01");
    }
}

use crate::error::DataError;
use crate::model::{Dataset, Record};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row of the built-in catalog before its date is parsed.
struct RawRecord {
    date: &'static str,
    latitude: Option<f64>,
    longitude: f64,
    magnitude: Option<f64>,
    depth_km: Option<f64>,
    location: &'static str,
}

#[rustfmt::skip]
const SAMPLE: [RawRecord; 8] = [
    RawRecord { date: "2023-01-02", latitude: Some(38.322), longitude: -118.443, magnitude: Some(5.2), depth_km: Some(7.0), location: "Nevada, USA" },
    RawRecord { date: "2023-02-15", latitude: Some(36.121), longitude: -117.865, magnitude: None, depth_km: Some(9.8), location: "California, USA" },
    RawRecord { date: "2023-03-01", latitude: Some(34.201), longitude: -116.491, magnitude: Some(4.9), depth_km: None, location: "California, USA" },
    RawRecord { date: "2023-04-12", latitude: None, longitude: -72.434, magnitude: Some(6.1), depth_km: Some(10.0), location: "Haiti" },
    RawRecord { date: "2023-05-05", latitude: Some(35.689), longitude: 139.692, magnitude: Some(5.8), depth_km: Some(40.0), location: "Tokyo, Japan" },
    RawRecord { date: "2023-06-17", latitude: Some(35.652), longitude: 140.084, magnitude: Some(6.0), depth_km: Some(45.0), location: "Chiba, Japan" },
    RawRecord { date: "2023-07-23", latitude: Some(37.774), longitude: -122.419, magnitude: Some(5.0), depth_km: Some(12.0), location: "San Francisco, USA" },
    RawRecord { date: "2023-08-29", latitude: Some(-33.448), longitude: -70.669, magnitude: Some(5.6), depth_km: Some(35.0), location: "Santiago, Chile" },
];

/// Build the built-in earthquake catalog.
///
/// # Errors
/// Returns [`DataError::MalformedDate`] if a date is not `YYYY-MM-DD`.
pub fn sample_catalog() -> Result<Dataset, DataError> {
    let records = SAMPLE
        .iter()
        .map(parse_record)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset::from_records(records))
}

fn parse_record(raw: &RawRecord) -> Result<Record, DataError> {
    Ok(Record {
        date: parse_date(raw.date)?,
        latitude: raw.latitude,
        longitude: raw.longitude,
        magnitude: raw.magnitude,
        depth_km: raw.depth_km,
        location: raw.location.to_string(),
    })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| DataError::MalformedDate {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    #[test]
    fn sample_catalog_has_eight_records() {
        let dataset = sample_catalog().unwrap();
        assert_eq!(dataset.len(), 8);
        assert_eq!(dataset.records()[3].location, "Haiti");
        assert_eq!(
            dataset.records()[7].date,
            NaiveDate::from_ymd_opt(2023, 8, 29).unwrap()
        );
    }

    #[test]
    fn sample_catalog_has_one_gap_per_imputable_column() {
        let dataset = sample_catalog().unwrap();
        for column in Column::IMPUTABLE {
            let n_missing = dataset
                .records()
                .iter()
                .filter(|record| record.is_missing(column))
                .count();
            assert_eq!(n_missing, 1, "column {column}");
        }
    }

    #[test]
    fn malformed_date_is_invalid_data() {
        let err = parse_date("2023-13-40").unwrap_err();
        assert!(matches!(err, DataError::MalformedDate { ref value, .. } if value == "2023-13-40"));
        assert!(parse_date("02/01/2023").is_err());
    }
}

//! Trip dataset loading and summary statistics.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::TrainError;

/// One historical trip: the features and the price that was charged.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TripRecord {
    pub distance: f64,
    pub weight: f64,
    pub volume: f64,
    pub price: f64,
}

impl TripRecord {
    pub fn features(&self) -> [f64; 3] {
        [self.distance, self.weight, self.volume]
    }
}

/// Reads a CSV with a `distance,weight,volume,price` header.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<TripRecord>, TrainError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| TrainError::Dataset(format!("{}: {}", path.display(), e)))?;
    read_records(reader)
}

/// Reads records from any CSV source. Used directly by tests.
pub fn read_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<TripRecord>, TrainError> {
    let records = reader
        .deserialize()
        .collect::<Result<Vec<TripRecord>, _>>()
        .map_err(|e| TrainError::Dataset(e.to_string()))?;

    if records.is_empty() {
        return Err(TrainError::EmptyDataset);
    }
    Ok(records)
}

/// Per-column descriptive statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `NaN` for a single row.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn from_values(name: &'static str, values: &[f64]) -> Self {
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Self {
            name,
            count,
            mean,
            std,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} count={} mean={:.3} std={:.3} min={:.3} max={:.3}",
            self.name, self.count, self.mean, self.std, self.min, self.max
        )
    }
}

/// Summarizes every column of a non-empty dataset.
pub fn describe(records: &[TripRecord]) -> Vec<ColumnSummary> {
    let column = |f: fn(&TripRecord) -> f64| records.iter().map(f).collect::<Vec<_>>();

    vec![
        ColumnSummary::from_values("distance", &column(|r| r.distance)),
        ColumnSummary::from_values("weight", &column(|r| r.weight)),
        ColumnSummary::from_values("volume", &column(|r| r.volume)),
        ColumnSummary::from_values("price", &column(|r| r.price)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "distance,weight,volume,price\n10,100,1.0,50\n20,200,2.5,90\n";

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn test_read_records() {
        let records = read_records(reader(SAMPLE)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1],
            TripRecord { distance: 20.0, weight: 200.0, volume: 2.5, price: 90.0 }
        );
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = read_records(reader("distance,weight,volume,price\n")).unwrap_err();
        assert!(matches!(err, TrainError::EmptyDataset));
    }

    #[test]
    fn test_bad_row_rejected() {
        let err = read_records(reader("distance,weight,volume,price\n10,abc,1.0,50\n")).unwrap_err();
        assert!(matches!(err, TrainError::Dataset(_)));
    }

    #[test]
    fn test_load_csv_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trips.csv");
        std::fs::write(&path, "distance, weight, volume, price\n 5, 20, 0.5, 12\n").unwrap();

        let records = load_csv(&path).unwrap();
        assert_eq!(records[0].features(), [5.0, 20.0, 0.5]);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_csv(dir.path().join("nope.csv")), Err(TrainError::Dataset(_))));
    }

    #[test]
    fn test_describe() {
        let records = read_records(reader(SAMPLE)).unwrap();
        let summary = describe(&records);

        assert_eq!(summary.len(), 4);
        let price = &summary[3];
        assert_eq!(price.name, "price");
        assert_eq!(price.count, 2);
        assert!((price.mean - 70.0).abs() < 1e-12);
        assert!((price.std - 800f64.sqrt()).abs() < 1e-9);
        assert_eq!(price.min, 50.0);
        assert_eq!(price.max, 90.0);
    }
}

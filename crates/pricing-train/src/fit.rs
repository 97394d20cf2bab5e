//! Train/test splitting, least-squares fitting and scoring.

use nalgebra::{DMatrix, DVector};
use pricing_core::{PriceMapping, PriceModel};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::TripRecord;
use crate::TrainError;

/// Singular values below this are treated as zero by the solver.
const SVD_EPS: f64 = 1e-10;

/// Shuffles `records` with a seeded RNG and holds out `ceil(test_size * n)` rows.
///
/// Returns `(train, test)`. The same seed always produces the same split.
pub fn train_test_split(
    records: &[TripRecord],
    test_size: f64,
    seed: u64,
) -> Result<(Vec<TripRecord>, Vec<TripRecord>), TrainError> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(TrainError::Split(format!(
            "test size must be in [0, 1), got {test_size}"
        )));
    }

    let n_test = (test_size * records.len() as f64).ceil() as usize;
    let n_train = records.len().saturating_sub(n_test);
    if n_train == 0 {
        return Err(TrainError::Split(format!(
            "{} rows leave nothing to train on with test size {test_size}",
            records.len()
        )));
    }

    let mut indices: Vec<usize> = (0..records.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    let pick = |idx: &[usize]| idx.iter().map(|&i| records[i]).collect::<Vec<_>>();
    Ok((pick(train_idx), pick(test_idx)))
}

/// Fits ordinary least squares with an intercept.
///
/// Features and target are centred, the system is solved through the SVD
/// pseudo-inverse (minimum-norm when under-determined), and the intercept is
/// recovered from the means.
pub fn fit(records: &[TripRecord]) -> Result<PriceModel, TrainError> {
    if records.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let n = records.len();
    let x = DMatrix::from_fn(n, 3, |i, j| records[i].features()[j]);
    let y = DVector::from_iterator(n, records.iter().map(|r| r.price));

    let x_mean: Vec<f64> = x.column_iter().map(|c| c.mean()).collect();
    let y_mean = y.mean();

    let xc = DMatrix::from_fn(n, 3, |i, j| x[(i, j)] - x_mean[j]);
    let yc = y.map(|v| v - y_mean);

    let coef = xc
        .svd(true, true)
        .solve(&yc, SVD_EPS)
        .map_err(|e| TrainError::Solver(e.to_string()))?;

    let coefficients = [coef[0], coef[1], coef[2]];
    let intercept = y_mean - coefficients.iter().zip(&x_mean).map(|(c, m)| c * m).sum::<f64>();

    let model = PriceModel::new(intercept, coefficients);
    model.check().map_err(|e| TrainError::Solver(e.to_string()))?;
    Ok(model.with_training_info(n, None))
}

/// Coefficient of determination of `model` on `records`.
///
/// Returns `None` when fewer than two rows are given or the target has no
/// variance, since R² is undefined there.
pub fn r2_score(model: &impl PriceMapping, records: &[TripRecord]) -> Result<Option<f64>, TrainError> {
    if records.len() < 2 {
        return Ok(None);
    }

    let y_mean = records.iter().map(|r| r.price).sum::<f64>() / records.len() as f64;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for record in records {
        let predicted = model
            .evaluate(record.features())
            .map_err(|e| TrainError::Scoring(e.to_string()))?;
        ss_res += (record.price - predicted).powi(2);
        ss_tot += (record.price - y_mean).powi(2);
    }

    if ss_tot == 0.0 {
        return Ok(None);
    }
    Ok(Some(1.0 - ss_res / ss_tot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::Features;

    fn trip(distance: f64, weight: f64, volume: f64, price: f64) -> TripRecord {
        TripRecord { distance, weight, volume, price }
    }

    fn linear_trips() -> Vec<TripRecord> {
        // price = 7 + 2*distance + 0.05*weight + 10*volume
        let rows = [
            (10.0, 100.0, 1.0),
            (20.0, 50.0, 2.5),
            (5.0, 300.0, 0.5),
            (40.0, 120.0, 3.0),
            (15.0, 80.0, 4.0),
            (8.0, 500.0, 1.5),
            (33.0, 10.0, 0.2),
            (12.0, 250.0, 2.0),
        ];
        rows.iter()
            .map(|&(d, w, v)| trip(d, w, v, 7.0 + 2.0 * d + 0.05 * w + 10.0 * v))
            .collect()
    }

    #[test]
    fn test_fit_two_sample_rows() {
        let records = [trip(10.0, 100.0, 1.0, 50.0), trip(20.0, 200.0, 2.5, 90.0)];
        let model = fit(&records).unwrap();

        let features = Features::new(10.0, 100.0, 1.0);
        let price = model.predict(&features).unwrap();
        assert!((price - 50.0).abs() < 1e-6, "price = {price}");

        let [c_distance, c_weight, c_volume] = model.coefficients;
        let direct = model.intercept + ((c_distance * 10.0 + c_weight * 100.0) + c_volume * 1.0);
        assert_eq!(price, direct);

        let other = model.predict(&Features::new(20.0, 200.0, 2.5)).unwrap();
        assert!((other - 90.0).abs() < 1e-6, "price = {other}");
        assert_eq!(model.trained_rows, 2);
    }

    #[test]
    fn test_fit_recovers_exact_relationship() {
        let model = fit(&linear_trips()).unwrap();

        assert!((model.intercept - 7.0).abs() < 1e-6);
        assert!((model.coefficients[0] - 2.0).abs() < 1e-8);
        assert!((model.coefficients[1] - 0.05).abs() < 1e-8);
        assert!((model.coefficients[2] - 10.0).abs() < 1e-8);
    }

    #[test]
    fn test_fit_single_row_predicts_its_price() {
        let model = fit(&[trip(10.0, 100.0, 1.0, 50.0)]).unwrap();
        assert_eq!(model.coefficients, [0.0, 0.0, 0.0]);
        assert_eq!(model.intercept, 50.0);
    }

    #[test]
    fn test_fit_empty() {
        assert!(matches!(fit(&[]), Err(TrainError::EmptyDataset)));
    }

    #[test]
    fn test_r2_perfect_fit() {
        let trips = linear_trips();
        let model = fit(&trips).unwrap();
        let r2 = r2_score(&model, &trips).unwrap().unwrap();
        assert!((r2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_r2_undefined() {
        let model = PriceModel::new(0.0, [1.0, 0.0, 0.0]);
        assert_eq!(r2_score(&model, &[trip(1.0, 1.0, 1.0, 5.0)]).unwrap(), None);

        let flat = [trip(1.0, 1.0, 1.0, 5.0), trip(2.0, 1.0, 1.0, 5.0)];
        assert_eq!(r2_score(&model, &flat).unwrap(), None);
    }

    #[test]
    fn test_r2_evaluation_failure_is_scoring_error() {
        let model = PriceModel::new(0.0, [f64::MAX, 0.0, 0.0]);
        let trips = [trip(10.0, 1.0, 1.0, 5.0), trip(20.0, 1.0, 1.0, 9.0)];

        let err = r2_score(&model, &trips).unwrap_err();
        assert!(matches!(err, TrainError::Scoring(_)));
        assert!(err.to_string().starts_with("Failed to score model"));
    }

    #[test]
    fn test_split_sizes() {
        let trips = linear_trips();
        let (train, test) = train_test_split(&trips, 0.2, 42).unwrap();
        assert_eq!(test.len(), 2);
        assert_eq!(train.len(), 6);

        let (train, test) = train_test_split(&trips[..2], 0.2, 42).unwrap();
        assert_eq!((train.len(), test.len()), (1, 1));
    }

    #[test]
    fn test_split_is_reproducible() {
        let trips = linear_trips();
        let first = train_test_split(&trips, 0.25, 42).unwrap();
        let second = train_test_split(&trips, 0.25, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_split_keeps_every_row_once() {
        let trips = linear_trips();
        let (train, test) = train_test_split(&trips, 0.4, 7).unwrap();

        let mut seen: Vec<f64> = train.iter().chain(&test).map(|r| r.price).collect();
        let mut expected: Vec<f64> = trips.iter().map(|r| r.price).collect();
        seen.sort_by(f64::total_cmp);
        expected.sort_by(f64::total_cmp);
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        let trips = linear_trips();
        assert!(matches!(train_test_split(&trips, 1.0, 42), Err(TrainError::Split(_))));
        assert!(matches!(train_test_split(&trips, -0.1, 42), Err(TrainError::Split(_))));
        assert!(matches!(train_test_split(&trips[..1], 0.5, 42), Err(TrainError::Split(_))));
    }

    #[test]
    fn test_split_zero_fraction_holds_nothing_out() {
        let trips = linear_trips();
        let (train, test) = train_test_split(&trips, 0.0, 42).unwrap();
        assert_eq!(train.len(), trips.len());
        assert!(test.is_empty());
    }
}

//! Stratified train/test partitioning

use std::collections::BTreeMap;

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::{PrepError, PrepResult};

pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;

/// Split parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Fraction of each class assigned to the test partition.
    pub test_size: f64,
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Row-aligned train and test partitions.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: DataFrame,
    pub x_test: DataFrame,
    pub y_train: Series,
    pub y_test: Series,
}

/// Partition `x`/`y` so every target class keeps its share in both halves.
///
/// The test partition holds `ceil(n * test_size)` rows in total, shared out
/// across classes in proportion to their size (see [`allocate_test_rows`]).
/// Each class is shuffled with a generator seeded from `options.seed` and
/// its first rows go to the test partition. Rows keep their original
/// relative order inside each partition.
pub fn stratified_split(
    x: &DataFrame,
    y: &Series,
    options: &SplitOptions,
) -> PrepResult<TrainTestSplit> {
    let test_size = options.test_size;
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PrepError::InvalidTestSize(test_size));
    }
    if x.height() != y.len() {
        return Err(PrepError::LengthMismatch {
            x_rows: x.height(),
            y_rows: y.len(),
        });
    }
    if y.null_count() > 0 {
        return Err(PrepError::NullTarget(y.null_count()));
    }

    let labels = y.strict_cast(&DataType::Int64).map_err(|source| PrepError::Cast {
        column: y.name().to_string(),
        target: "Int64",
        source,
    })?;

    let mut classes: BTreeMap<i64, Vec<IdxSize>> = BTreeMap::new();
    for (row, label) in labels.i64()?.into_iter().enumerate() {
        if let Some(label) = label {
            classes.entry(label).or_default().push(row as IdxSize);
        }
    }

    let counts: Vec<usize> = classes.values().map(Vec::len).collect();
    for (&class, rows) in &classes {
        if rows.len() < 2 {
            return Err(PrepError::ClassTooSmall {
                class,
                count: rows.len(),
            });
        }
    }
    let allocation = allocate_test_rows(&counts, test_size);

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut train_idx: Vec<IdxSize> = Vec::with_capacity(x.height());
    let mut test_idx: Vec<IdxSize> = Vec::new();

    for (mut rows, n_test) in classes.into_values().zip(allocation) {
        rows.shuffle(&mut rng);
        test_idx.extend_from_slice(&rows[..n_test]);
        train_idx.extend_from_slice(&rows[n_test..]);
    }

    train_idx.sort_unstable();
    test_idx.sort_unstable();

    let train_idx = IdxCa::from_vec("train_idx".into(), train_idx);
    let test_idx = IdxCa::from_vec("test_idx".into(), test_idx);

    Ok(TrainTestSplit {
        x_train: x.take(&train_idx)?,
        x_test: x.take(&test_idx)?,
        y_train: y.take(&train_idx)?,
        y_test: y.take(&test_idx)?,
    })
}

/// Number of test rows per class, in class order.
///
/// The total is `ceil(n * test_size)`. Each class first gets the floor of its
/// proportional quota; the rows left over go to the classes with the largest
/// fractional remainders, ties going to the earlier class. Every class keeps
/// at least one row on each side, so for classes of only a few rows the
/// total can move away from `ceil(n * test_size)`.
pub fn allocate_test_rows(counts: &[usize], test_size: f64) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return vec![0; counts.len()];
    }
    let n_test = ((n as f64 * test_size).ceil() as usize).min(n);

    let quotas: Vec<f64> = counts
        .iter()
        .map(|&count| n_test as f64 * count as f64 / n as f64)
        .collect();
    let mut allocation: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();

    let assigned: usize = allocation.iter().sum();
    let mut by_remainder: Vec<usize> = (0..counts.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let ra = quotas[a] - quotas[a].floor();
        let rb = quotas[b] - quotas[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for &class in by_remainder.iter().take(n_test.saturating_sub(assigned)) {
        allocation[class] += 1;
    }

    allocation
        .into_iter()
        .zip(counts)
        .map(|(n_test, &count)| {
            if count < 2 {
                n_test.min(count)
            } else {
                n_test.clamp(1, count - 1)
            }
        })
        .collect()
}

/// Share of rows with label 1.
pub fn positive_rate(y: &Series) -> PrepResult<f64> {
    if y.is_empty() {
        return Ok(0.0);
    }
    let labels = y.cast(&DataType::Float64)?;
    let positives = labels
        .f64()?
        .into_iter()
        .filter(|v| *v == Some(1.0))
        .count();
    Ok(positives as f64 / y.len() as f64)
}

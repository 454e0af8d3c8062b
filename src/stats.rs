use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::merge::concat_common;
use crate::data::model::{Dataset, Value};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Stats – the six-field summary record
// ---------------------------------------------------------------------------

/// Descriptive statistics for one distribution. `count` is the number of
/// non-missing entries; the numeric aggregates are `NaN` when there is
/// nothing to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Per-column statistics
// ---------------------------------------------------------------------------

/// Calculate common statistics for the named columns of the given datasets.
///
/// `std` is the sample standard deviation (n − 1 denominator). `count` is
/// the number of non-`Null` entries; entries that are present but not
/// numeric contribute to `count` and are skipped by the numeric aggregates.
///
/// Each column's record is recomputed per dataset in slice order, so with
/// several datasets the returned record describes the **last** dataset that
/// contains the column. Pass a single merged dataset (see
/// [`merge_and_calculate_stats`]) to aggregate across datasets.
///
/// Fails with [`Error::UnknownColumn`] when a requested column is absent
/// from any processed dataset.
pub fn calculate_stats<S: AsRef<str>>(
    datasets: &[Dataset],
    columns: &[S],
) -> Result<BTreeMap<String, Stats>, Error> {
    if datasets.is_empty() {
        return Err(Error::NoDatasets);
    }

    let mut statistics = BTreeMap::new();

    for column in columns {
        let name = column.as_ref();
        for ds in datasets {
            let values = ds
                .column(name)
                .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
            statistics.insert(name.to_string(), summarize_column(values));
        }
    }

    Ok(statistics)
}

/// Statistics for a single column of a single dataset.
pub fn column_stats(dataset: &Dataset, column: &str) -> Result<Stats, Error> {
    let values = dataset
        .column(column)
        .ok_or_else(|| Error::UnknownColumn(column.to_string()))?;
    Ok(summarize_column(values))
}

/// Merge the datasets row-wise (keeping only columns common to all of
/// them), then calculate statistics for the named columns of the merged
/// result.
pub fn merge_and_calculate_stats<S: AsRef<str>>(
    datasets: &[Dataset],
    columns: &[S],
) -> Result<BTreeMap<String, Stats>, Error> {
    let merged = concat_common(datasets)?;
    calculate_stats(std::slice::from_ref(&merged), columns)
}

// ---------------------------------------------------------------------------
// Cross-dataset statistics
// ---------------------------------------------------------------------------

/// Map an extraction function across the datasets and calculate statistics
/// over the resulting scalars.
///
/// `std` here is the population standard deviation (n denominator) and
/// `count` is the number of datasets. Extractor failures propagate
/// unmodified; there is no partial aggregation.
pub fn calculate_stats_across<F>(datasets: &[Dataset], mut extract: F) -> anyhow::Result<Stats>
where
    F: FnMut(&Dataset) -> anyhow::Result<f64>,
{
    let vals = datasets
        .iter()
        .map(&mut extract)
        .collect::<anyhow::Result<Vec<f64>>>()?;
    Ok(summarize_scalars(&vals))
}

// ---------------------------------------------------------------------------
// Aggregation primitives
// ---------------------------------------------------------------------------

fn summarize_column(values: &[Value]) -> Stats {
    let count = values.iter().filter(|v| !v.is_null()).count();
    let nums: Vec<f64> = values.iter().filter_map(Value::as_f64).collect();
    Stats {
        mean: mean(&nums),
        median: median(&nums),
        std: sample_std(&nums),
        min: minimum(&nums),
        max: maximum(&nums),
        count,
    }
}

fn summarize_scalars(vals: &[f64]) -> Stats {
    Stats {
        mean: mean(vals),
        median: median(vals),
        std: population_std(vals),
        min: minimum(vals),
        max: maximum(vals),
        count: vals.len(),
    }
}

fn mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

fn median(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    let mut sorted = vals.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_std(vals: &[f64]) -> f64 {
    if vals.len() < 2 {
        return f64::NAN;
    }
    let m = mean(vals);
    (vals.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (vals.len() - 1) as f64).sqrt()
}

fn population_std(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    let m = mean(vals);
    (vals.iter().map(|v| (v - m).powi(2)).sum::<f64>() / vals.len() as f64).sqrt()
}

fn minimum(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().copied().fold(f64::INFINITY, f64::min)
}

fn maximum(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

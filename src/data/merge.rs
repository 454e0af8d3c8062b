use super::model::Dataset;
use crate::error::Error;

// ---------------------------------------------------------------------------
// Row-wise concatenation with inner-join column semantics
// ---------------------------------------------------------------------------

/// Concatenate datasets row-wise, keeping only the columns present in every
/// input. Column order follows the first dataset.
///
/// Fails with [`Error::NoDatasets`] for an empty input and
/// [`Error::NoCommonColumns`] when the inputs share no column names; an
/// empty intersection is a caller mistake, not an empty table.
pub fn concat_common(datasets: &[Dataset]) -> Result<Dataset, Error> {
    let first = datasets.first().ok_or(Error::NoDatasets)?;

    let common: Vec<String> = first
        .column_names()
        .iter()
        .filter(|name| datasets[1..].iter().all(|ds| ds.column(name).is_some()))
        .cloned()
        .collect();

    if common.is_empty() {
        return Err(Error::NoCommonColumns);
    }

    let mut columns = Vec::with_capacity(common.len());
    for name in &common {
        let mut merged = Vec::new();
        for ds in datasets {
            if let Some(column) = ds.column(name) {
                merged.extend_from_slice(column);
            }
        }
        columns.push(merged);
    }

    Dataset::new(common, columns)
}

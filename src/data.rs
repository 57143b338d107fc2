//! Dataset loading

use crate::error::{CalhouseError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Load a tabular dataset from a CSV file with a header row.
///
/// Columns are addressed by name downstream; no column-order contract.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| CalhouseError::Data(format!("cannot read dataset {}: {}", path.display(), e)))?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| CalhouseError::Data(format!("cannot parse dataset {}: {}", path.display(), e)))
}

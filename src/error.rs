//! Domain errors raised while building or cleaning a dataset.

use crate::model::Column;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// The dataset has no records.
    #[error("dataset has no records")]
    EmptyDataset,

    /// Every value of a numeric column is missing, so its mean is undefined.
    #[error("column {column} has no values present")]
    AllMissing { column: Column },

    #[error("malformed date {value:?}")]
    MalformedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("column {column} is not numeric")]
    NotNumeric { column: Column },
}

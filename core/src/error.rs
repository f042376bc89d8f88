use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("Missing required column: `{column}`")]
    Schema { column: String },

    #[error("Invalid value {value:?} in column `{column}` at row {row}")]
    Coercion {
        column: String,
        row:    usize,
        value:  String,
    },

    #[error("No columns to parse from file")]
    EmptyData,

    #[error("Cost data cannot be empty")]
    EmptyInput,

    #[error("Invalid governance style {0:?}. Must be 'Reactive', 'Preventative', or 'Active'")]
    InvalidStyle(String),

    #[error("Invalid numeric entry {token:?}. Enter numeric values separated by commas")]
    Parse { token: String },

    #[error("Weight `{name}` must be within [0, 1], got {value}")]
    WeightOutOfRange { name: &'static str, value: f64 },

    #[error("`{field}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min:   i64,
        max:   i64,
        value: i64,
    },

    #[error("{n_rows} daily rows starting {start} run past the last representable date")]
    DateRange { start: String, n_rows: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type LabResult<T> = Result<T, LabError>;

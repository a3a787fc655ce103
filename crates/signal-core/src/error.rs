use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Negative volume for {field}: {value}")]
    NegativeVolume { field: &'static str, value: i64 },

    #[error("Invalid price for {field}: {value}")]
    InvalidPrice { field: &'static str, value: String },

    #[error("Inconsistent volume: call {call} + put {put} exceeds total {total}")]
    InconsistentVolume { call: u64, put: u64, total: u64 },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

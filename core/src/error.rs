use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommissionError {
    #[error("Cycle detected at member {member}")]
    Cycle { member: String },

    #[error("Member '{id}' not found in hierarchy")]
    UnknownMember { id: String },

    #[error("Invalid record at position {position}: {reason}")]
    InvalidRecord { position: usize, reason: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Cannot round {value} to {places} decimal places")]
    Rounding { value: f64, places: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CommissionResult<T> = Result<T, CommissionError>;

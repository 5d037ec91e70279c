use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaseVsBuyError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },
}

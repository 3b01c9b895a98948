use thiserror::Error;

#[derive(Error, Debug)]
pub enum IonError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Result not representable at stage {stage}: {message}")]
    NumericOverflow { stage: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),
}

pub type IonResult<T> = Result<T, IonError>;

impl IonError {
    /// Errors a user can fix by changing the inputs.
    pub fn is_validation(&self) -> bool {
        matches!(self, IonError::InvalidInput(_) | IonError::Config(_))
    }
}

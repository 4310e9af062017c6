pub mod analysts;
pub mod gateway;
pub mod ollama;
pub mod prompt;
pub mod types;

pub use analysts::*;
pub use gateway::*;
pub use ollama::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Model server is not running at {0}")]
    Connection(String),

    #[error("Model server returned error (status {status}): {body}")]
    Server { status: u16, body: String },

    #[error("No compatible analysis model available")]
    NoModelAvailable,

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Could not serialize analysis payload: {0}")]
    Payload(#[from] serde_json::Error),
}

//! Normalization error taxonomy

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    /// Exploded columns of one record disagree in length
    #[error("malformed record {filename}: {reason}")]
    MalformedRecord { filename: String, reason: String },
}

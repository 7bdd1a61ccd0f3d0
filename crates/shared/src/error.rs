use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("unrecognized puzzle variant tag '{tag}'")]
pub struct ParseVariantError {
    pub tag: String,
}

#[derive(Debug, Clone, Error)]
#[error("unrecognized penalty tag '{tag}'")]
pub struct ParsePenaltyError {
    pub tag: String,
}

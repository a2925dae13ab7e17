use crate::decompose::DecompositionError;

/// Translation errors. Skipped records are not errors; they are logged and
/// counted in the [`crate::TranslationReport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("decomposition failed: {0}")]
    Decomposition(#[from] DecompositionError),
}

pub type Result<T> = std::result::Result<T, TranslateError>;

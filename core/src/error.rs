use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Content produced no index terms (empty, whitespace, or only stopwords).
    #[error("document content has no indexable terms")]
    EmptyContent,
}

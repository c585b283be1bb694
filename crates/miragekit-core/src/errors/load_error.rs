/// Failures retrieving or parsing a source document. Terminal for a session.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {document} document from {path}: {reason}")]
    Read {
        document: &'static str,
        path: String,
        reason: String,
    },

    #[error("failed to parse {document} document: {reason}")]
    Parse {
        document: &'static str,
        reason: String,
    },
}

impl LoadError {
    /// Name of the document that failed to load.
    pub fn document(&self) -> &'static str {
        match self {
            Self::Read { document, .. } | Self::Parse { document, .. } => document,
        }
    }
}

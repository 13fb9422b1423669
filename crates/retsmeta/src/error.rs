use thiserror::Error;

use crate::metadata::MetadataKind;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("could not parse attribute '{attribute}' value {text:?} as {grammar}: {reason}")]
    Parse {
        attribute: String,
        grammar: &'static str,
        text: String,
        reason: String,
    },

    #[error("unable to fetch {kind} children of '{path}': {reason}")]
    Fetch {
        kind: MetadataKind,
        path: String,
        reason: String,
    },

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("{child} is not a permitted child of {parent}")]
    ChildKindNotPermitted {
        parent: MetadataKind,
        child: MetadataKind,
    },

    #[error("{0} entity has no value for its id attribute")]
    MissingId(MetadataKind),

    #[error("Unknown metadata kind: {0}")]
    UnknownKind(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MetadataError {
    /// Build a parse error for a grammar violation outside of any entity.
    pub(crate) fn parse(grammar: &'static str, text: &str, reason: impl Into<String>) -> Self {
        MetadataError::Parse {
            attribute: String::new(),
            grammar,
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach the attribute name to a parse error raised by a bare grammar.
    pub(crate) fn for_attribute(self, name: &str) -> Self {
        match self {
            MetadataError::Parse {
                grammar,
                text,
                reason,
                ..
            } => MetadataError::Parse {
                attribute: name.to_string(),
                grammar,
                text,
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;

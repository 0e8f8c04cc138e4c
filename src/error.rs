use std::path::PathBuf;

use thiserror::Error;

/// Every way a content build can fail. All variants abort the whole build.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{origin}: unknown field `{field}`")]
    UnknownField { origin: String, field: String },
    #[error("{origin}: missing required field `{field}`")]
    MissingField { origin: String, field: String },
    #[error("{origin}: invalid field `{field}`: {reason}")]
    InvalidField {
        origin: String,
        field: String,
        reason: String,
    },
    #[error("{origin}: slug `{slug}` does not match folder name")]
    SlugMismatch { origin: String, slug: String },
    #[error("{origin}: invalid status `{status}` (expected draft, published or archived)")]
    InvalidStatus { origin: String, status: String },
    #[error("{origin}: contentUri `{actual}` must be `{expected}`")]
    ContentUriMismatch {
        origin: String,
        expected: String,
        actual: String,
    },
    #[error("duplicate slug `{slug}`")]
    DuplicateSlug { slug: String },
    #[error("{slug}: lists its own slug as an alias")]
    SelfAlias { slug: String },
    #[error("alias `{alias}` is claimed by both `{existing}` and `{claimed_by}`")]
    AliasConflict {
        alias: String,
        existing: String,
        claimed_by: String,
    },
    #[error("{origin}: project record must be a JSON object")]
    InvalidRecord { origin: String },
    #[error("{origin}: malformed project.json")]
    Malformed {
        origin: String,
        #[source]
        err: serde_json::Error,
    },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

impl ContentError {
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }

    pub fn invalid(origin: &str, field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            origin: origin.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "UNKNOWN_FIELD",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::SlugMismatch { .. } => "SLUG_MISMATCH",
            Self::InvalidStatus { .. } => "INVALID_STATUS",
            Self::ContentUriMismatch { .. } => "CONTENT_URI_MISMATCH",
            Self::DuplicateSlug { .. } => "DUPLICATE_SLUG",
            Self::SelfAlias { .. } => "SELF_ALIAS",
            Self::AliasConflict { .. } => "ALIAS_CONFLICT",
            Self::InvalidRecord { .. } => "INVALID_RECORD",
            Self::Malformed { .. } => "MALFORMED_RECORD",
            Self::Io { .. } => "IO",
        }
    }

    /// The folder (or slug) the error is attributable to, when there is exactly one.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::UnknownField { origin, .. }
            | Self::MissingField { origin, .. }
            | Self::InvalidField { origin, .. }
            | Self::SlugMismatch { origin, .. }
            | Self::InvalidStatus { origin, .. }
            | Self::ContentUriMismatch { origin, .. }
            | Self::InvalidRecord { origin }
            | Self::Malformed { origin, .. } => Some(origin),
            Self::SelfAlias { slug } | Self::DuplicateSlug { slug } => Some(slug),
            Self::AliasConflict { .. } | Self::Io { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let err = ContentError::UnknownField {
            origin: "alpha".into(),
            field: "unexpectedField".into(),
        };
        assert_eq!(err.code(), "UNKNOWN_FIELD");
        assert_eq!(err.source_id(), Some("alpha"));
        assert_eq!(err.to_string(), "alpha: unknown field `unexpectedField`");
    }

    #[test]
    fn alias_conflict_names_both_claimants() {
        let err = ContentError::AliasConflict {
            alias: "x".into(),
            existing: "a".into(),
            claimed_by: "c".into(),
        };
        assert_eq!(err.code(), "ALIAS_CONFLICT");
        assert!(err.source_id().is_none());
        let msg = err.to_string();
        assert!(msg.contains("`a`"));
        assert!(msg.contains("`c`"));
    }
}

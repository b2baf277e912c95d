//! Error types for import resolution.
//!
//! The message of each variant starts with the stable identifier surfaced
//! at the boundary (`Import.recursion`, `Import.not_css`,
//! `Import.doesnt_exist`) so callers and logs can distinguish the kinds.

use std::path::PathBuf;

/// Errors that abort an import-inlining pass.
///
/// All are fatal to the current compile; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// An import target is already being expanded further up the chain.
    #[error("Import.recursion: {path} is already being imported")]
    Recursion {
        /// The target that closed the cycle.
        path: PathBuf,
    },

    /// An import target does not have a CSS extension.
    #[error("Import.not_css: {path} is not a CSS file")]
    NotCss {
        /// The offending target.
        path: PathBuf,
    },

    /// An import target does not exist on disk.
    #[error("Import.doesnt_exist: {path} does not exist")]
    DoesntExist {
        /// The missing target.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recursion_identifier() {
        let err = ImportError::Recursion {
            path: PathBuf::from("/css/a.css"),
        };
        assert!(format!("{err}").starts_with("Import.recursion:"));
    }

    #[test]
    fn not_css_identifier() {
        let err = ImportError::NotCss {
            path: PathBuf::from("/css/readme.txt"),
        };
        assert!(format!("{err}").starts_with("Import.not_css:"));
    }

    #[test]
    fn doesnt_exist_identifier() {
        let err = ImportError::DoesntExist {
            path: PathBuf::from("/css/missing.css"),
        };
        assert!(format!("{err}").starts_with("Import.doesnt_exist:"));
    }
}

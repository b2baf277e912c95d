//! Error types for pipeline compilation.

use scaffold_cache::CacheError;
use scaffold_import::ImportError;
use scaffold_resolve::ResolveError;

/// Errors that abort a compile run.
///
/// Any of these propagates to the top-level caller unchanged; no partial
/// buffer is cached or returned.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Import inlining failed (recursion, non-CSS target, missing file).
    #[error(transparent)]
    Import(#[from] ImportError),

    /// A required resource lookup failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The cache store rejected a write or its path is unusable.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A module hook failed.
    #[error("module '{module}' failed during {stage}: {reason}")]
    Module {
        /// Name of the failing module.
        module: String,
        /// The stage the hook was running in.
        stage: String,
        /// Description of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn import_error_message_passes_through() {
        let err = PipelineError::from(ImportError::NotCss {
            path: PathBuf::from("notes.txt"),
        });
        assert!(format!("{err}").starts_with("Import.not_css:"));
    }

    #[test]
    fn module_error_display() {
        let err = PipelineError::Module {
            module: "minify".to_string(),
            stage: "formatting".to_string(),
            reason: "unbalanced braces".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("minify"));
        assert!(msg.contains("formatting"));
        assert!(msg.contains("unbalanced braces"));
    }
}

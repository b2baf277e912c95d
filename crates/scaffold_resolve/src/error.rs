//! Error types for path resolution.

/// Errors that can occur during path resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A required resource was not found in any search root.
    #[error("cannot find the file: {path}")]
    NotFound {
        /// The composed path that was searched for.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = ResolveError::NotFound {
            path: "views/error.css".to_string(),
        };
        assert_eq!(format!("{err}"), "cannot find the file: views/error.css");
    }
}

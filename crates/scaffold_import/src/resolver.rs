//! Depth-first expansion of import directives.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use scaffold_common::{is_css_name, normalize_slashes};
use tracing::debug;

use crate::directive::find_directive;
use crate::error::ImportError;

/// Inlines `@include` directives in a CSS buffer.
///
/// Targets with a leading `/` are rooted at the configured document root;
/// all others are relative to the importing file's directory. Each target
/// is guarded in the order recursion → extension → existence, and a file
/// already inlined during the current pass is silently de-duplicated.
pub struct ImportResolver {
    /// Root directory for absolute (`/`-prefixed) import targets.
    doc_root: PathBuf,
}

impl ImportResolver {
    /// Creates a resolver with the given document root.
    pub fn new(doc_root: impl Into<PathBuf>) -> Self {
        Self {
            doc_root: doc_root.into(),
        }
    }

    /// Expands every import directive in the buffer.
    ///
    /// `origin` is the path of the file the buffer came from; it anchors
    /// relative targets and seeds the cycle check. A buffer with no origin
    /// (an ad-hoc string) resolves relative targets against the document
    /// root. Nested imports are expanded before control returns, so the
    /// result contains no directives.
    pub fn inline(&self, buffer: &str, origin: Option<&Path>) -> Result<String, ImportError> {
        let mut included = HashSet::new();
        let mut stack = Vec::new();

        let dir = origin
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.doc_root.clone());
        if let Some(origin) = origin {
            stack.push(origin.to_path_buf());
        }

        self.expand(buffer, &dir, &mut stack, &mut included)
    }

    /// Expands one buffer, splicing in (already-expanded) file contents.
    ///
    /// `stack` holds the chain of files currently being expanded; a target
    /// found on it closes a cycle. `included` holds every file inlined so
    /// far in this pass, for de-duplication.
    fn expand(
        &self,
        buffer: &str,
        dir: &Path,
        stack: &mut Vec<PathBuf>,
        included: &mut HashSet<PathBuf>,
    ) -> Result<String, ImportError> {
        let mut out = buffer.to_string();

        while let Some(directive) = find_directive(&out) {
            let target = normalize_slashes(&directive.target);
            let path = match target.strip_prefix('/') {
                Some(rooted) => self.doc_root.join(rooted),
                None => dir.join(&target),
            };

            if stack.contains(&path) {
                return Err(ImportError::Recursion { path });
            }
            if !is_css_name(&target) {
                return Err(ImportError::NotCss { path });
            }
            if !path.is_file() {
                return Err(ImportError::DoesntExist { path });
            }

            let replacement = if included.insert(path.clone()) {
                let raw = std::fs::read_to_string(&path).map_err(|_| {
                    ImportError::DoesntExist { path: path.clone() }
                })?;
                let parent = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.doc_root.clone());
                stack.push(path);
                let expanded = self.expand(&raw, &parent, stack, included)?;
                stack.pop();
                expanded
            } else {
                debug!(path = %path.display(), "already inlined, dropping directive");
                String::new()
            };

            out.replace_range(directive.span, &replacement);
        }

        Ok(out)
    }
}

//! The compile orchestrator.

use std::path::{Path, PathBuf};

use scaffold_cache::CacheStore;
use scaffold_import::ImportResolver;
use tracing::debug;

use crate::context::Context;
use crate::error::PipelineError;
use crate::module::{Module, Stage};

/// A CSS source buffer plus its originating path.
///
/// The path anchors relative import targets; a source without one (an
/// ad-hoc string) resolves imports against the document root. The buffer
/// has no identity beyond one compile run.
#[derive(Debug, Clone)]
pub struct Source {
    /// The raw CSS text.
    pub content: String,

    /// Where the text came from, if it came from a file.
    pub path: Option<PathBuf>,
}

impl Source {
    /// Creates a source from an in-memory string.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            path: None,
        }
    }

    /// Reads a source from a file, remembering its path.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            content: std::fs::read_to_string(path)?,
            path: Some(path.to_path_buf()),
        })
    }
}

/// Runs source buffers through the five fixed stages.
///
/// Modules execute in registration order within each stage, the output of
/// one feeding the next. Compiled results are cached keyed by a
/// fingerprint of the source content and the config tree; a fresh cache
/// entry short-circuits the whole stage sequence.
#[derive(Default)]
pub struct Pipeline {
    modules: Vec<Box<dyn Module>>,
}

impl Pipeline {
    /// Creates a pipeline with no modules registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a module to the registry.
    ///
    /// Registration order is execution order; it is fixed for the
    /// pipeline's lifetime.
    pub fn register(&mut self, module: Box<dyn Module>) {
        self.modules.push(module);
    }

    /// Returns the names of the registered modules in execution order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Compiles a source buffer to its final CSS text.
    ///
    /// Consults the cache first: a non-expired entry for this source and
    /// config is returned as-is, skipping all stages. Otherwise imports
    /// are inlined, every stage runs, and the result is cached. Any hook
    /// error aborts the compile; nothing partial is cached or returned.
    pub fn compile(&self, source: &Source, ctx: &mut Context) -> Result<String, PipelineError> {
        // The originating path is part of the input identity: relative
        // import targets resolve against it, so identical text in two
        // directories can compile to different output.
        let fingerprint = CacheStore::make_key_of(&(
            source.content.as_str(),
            source.path.as_deref(),
            ctx.config.root(),
        ))?;
        let lifetime = ctx.cache_lifetime();

        if let Some(payload) = ctx.cache.read(&fingerprint, lifetime) {
            if let Ok(text) = String::from_utf8(payload) {
                debug!(key = %fingerprint, "compile served from cache");
                return Ok(text);
            }
        }

        // Import syntax is a pipeline-level concern: the whole buffer is
        // inlined once, before any module hook runs.
        let importer = ImportResolver::new(ctx.doc_root());
        let mut css = importer.inline(&source.content, source.path.as_deref())?;

        for stage in Stage::ORDER {
            debug!(%stage, modules = self.modules.len(), "running stage");
            for module in &self.modules {
                css = module.run_stage(stage, css, ctx)?;
            }
        }

        // A non-positive lifetime disables the cache entirely; reads
        // already return absent, and writing would leave entries behind.
        if lifetime > 0 {
            ctx.cache.write(&fingerprint, css.as_bytes())?;
        }
        Ok(css)
    }

    /// Runs every module's `output` hook over an already-compiled buffer.
    ///
    /// This is outside the compile run and its result is never cached.
    pub fn output(&self, css: String, ctx: &mut Context) -> Result<String, PipelineError> {
        let mut css = css;
        for module in &self.modules {
            css = module.output(css, ctx)?;
        }
        Ok(css)
    }
}

//! The module interface and the fixed stage order.

use std::fmt;

use crate::context::Context;
use crate::error::PipelineError;

/// One of the five fixed points in a compile run where module hooks execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Import handling; the buffer is already fully inlined when module
    /// hooks run here.
    Import,
    /// Preprocessing: arranging the css, stripping comments, etc.
    Pre,
    /// The main grunt of the processing.
    Process,
    /// Post-processing of the transformed buffer.
    Post,
    /// Formatters, compressors and prettifiers.
    Formatting,
}

impl Stage {
    /// All stages in execution order.
    pub const ORDER: [Stage; 5] = [
        Stage::Import,
        Stage::Pre,
        Stage::Process,
        Stage::Post,
        Stage::Formatting,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Import => "import",
            Stage::Pre => "pre-process",
            Stage::Process => "process",
            Stage::Post => "post-process",
            Stage::Formatting => "formatting",
        };
        f.write_str(name)
    }
}

/// A unit of CSS transformation logic.
///
/// Every hook maps a buffer to a buffer and defaults to identity, so a
/// module only implements the stages it cares about. Modules are
/// registered once into an ordered list owned by the
/// [`Pipeline`](crate::Pipeline); within a stage they run in registration
/// order, the output of one feeding the next.
pub trait Module {
    /// A short name identifying the module in errors and logs.
    fn name(&self) -> &str;

    /// Runs after the pipeline has inlined all imports.
    fn import_process(&self, css: String, _ctx: &mut Context) -> Result<String, PipelineError> {
        Ok(css)
    }

    /// Preprocessing of the css: arranging, stripping comments, etc.
    fn pre_process(&self, css: String, _ctx: &mut Context) -> Result<String, PipelineError> {
        Ok(css)
    }

    /// The main transformation.
    fn process(&self, css: String, _ctx: &mut Context) -> Result<String, PipelineError> {
        Ok(css)
    }

    /// Post-processing of the transformed buffer.
    fn post_process(&self, css: String, _ctx: &mut Context) -> Result<String, PipelineError> {
        Ok(css)
    }

    /// Formatters, compressors and prettifiers.
    fn formatting_process(&self, css: String, _ctx: &mut Context) -> Result<String, PipelineError> {
        Ok(css)
    }

    /// For producing a response other than the compiled CSS.
    ///
    /// Not part of the compile run; callers invoke it through
    /// [`Pipeline::output`](crate::Pipeline::output) after compilation.
    fn output(&self, css: String, _ctx: &mut Context) -> Result<String, PipelineError> {
        Ok(css)
    }

    /// Dispatches the hook for the given stage.
    fn run_stage(
        &self,
        stage: Stage,
        css: String,
        ctx: &mut Context,
    ) -> Result<String, PipelineError> {
        match stage {
            Stage::Import => self.import_process(css, ctx),
            Stage::Pre => self.pre_process(css, ctx),
            Stage::Process => self.process(css, ctx),
            Stage::Post => self.post_process(css, ctx),
            Stage::Formatting => self.formatting_process(css, ctx),
        }
    }
}

//! `scaffold compile` — run a stylesheet through the pipeline.
//!
//! The full flow:
//!
//! 1. Load config (`--config` or `scaffold.toml` in the current directory)
//! 2. Open the cache store (`--cache-dir`, `cache.path`, or the temp dir)
//! 3. Register include paths (CLI first, then configured ones)
//! 4. Restore persisted state (resolver memo, flags)
//! 5. Compile and run the output hooks
//! 6. Emit the result and persist changed state

use scaffold_pipeline::{Context, Pipeline, Source};
use scaffold_resolve::PathResolver;

use crate::project::{config_include_paths, emit_output, load_project_config, open_cache_store};
use crate::{CompileArgs, GlobalArgs};

/// Runs the `scaffold compile` command.
///
/// Returns exit code 0 on success; compile errors propagate to the caller.
pub fn run(args: &CompileArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_project_config(global)?;
    let cache = open_cache_store(&config, None)?;

    let mut resolver = PathResolver::new();
    for path in &args.include {
        resolver.add_include_path(path.as_str());
    }
    for path in config_include_paths(&config) {
        resolver.add_include_path(path);
    }

    let mut ctx = Context::new(config, resolver, cache);
    if args.no_cache {
        ctx.config.set("cache.lifetime", 0i64);
    }
    for option in &args.option {
        ctx.set_option(option.as_str());
    }
    ctx.load_state();

    let source = Source::from_file(args.file.as_ref())?;
    let pipeline = Pipeline::new();

    let compiled = pipeline.compile(&source, &mut ctx)?;
    let rendered = pipeline.output(compiled, &mut ctx)?;

    emit_output(&rendered, args.output.as_deref())?;
    ctx.flush()?;

    if !global.quiet {
        if let Some(output) = &args.output {
            eprintln!("   Compiled {} -> {}", args.file, output);
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir) -> String {
        let cache_dir = dir.path().join("cache");
        let path = dir.path().join("scaffold.toml");
        fs::write(
            &path,
            format!("[cache]\npath = \"{}\"\n", cache_dir.display()),
        )
        .unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn compile_to_output_file() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir);

        fs::write(dir.path().join("reset.css"), "*{margin:0}").unwrap();
        let main = dir.path().join("main.css");
        fs::write(&main, "@include 'reset.css'; body{color:red}").unwrap();
        let out = dir.path().join("out.css");

        let args = CompileArgs {
            file: main.to_str().unwrap().to_string(),
            output: Some(out.to_str().unwrap().to_string()),
            include: Vec::new(),
            option: Vec::new(),
            no_cache: false,
        };
        let global = GlobalArgs {
            quiet: true,
            config: Some(config_path),
        };

        let code = run(&args, &global).unwrap();
        assert_eq!(code, 0);
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "*{margin:0} body{color:red}"
        );
    }

    #[test]
    fn missing_import_fails_the_run() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir);

        let main = dir.path().join("main.css");
        fs::write(&main, "@include 'missing.css';").unwrap();

        let args = CompileArgs {
            file: main.to_str().unwrap().to_string(),
            output: None,
            include: Vec::new(),
            option: Vec::new(),
            no_cache: false,
        };
        let global = GlobalArgs {
            quiet: true,
            config: Some(config_path),
        };

        let err = run(&args, &global).unwrap_err();
        assert!(err.to_string().starts_with("Import.doesnt_exist:"));
    }

    #[test]
    fn missing_source_file_errors() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir);

        let args = CompileArgs {
            file: dir.path().join("absent.css").to_str().unwrap().to_string(),
            output: None,
            include: Vec::new(),
            option: Vec::new(),
            no_cache: false,
        };
        let global = GlobalArgs {
            quiet: true,
            config: Some(config_path),
        };

        assert!(run(&args, &global).is_err());
    }
}

use std::path::{Path, PathBuf};

use clap::Args;
use scaffold_analysis::pipeline::{Batch, BatchReport};
use scaffold_analysis::scanner::changed_files;
use scaffold_core::config::{CliOverrides, TestFramework};
use scaffold_core::ScaffoldConfig;

use crate::error::{CliError, Result};
use crate::report::render_summary;

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Source files to scaffold. Without paths (and without --changed) the
    /// whole project is walked.
    pub paths: Vec<PathBuf>,

    /// Project root.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Only files changed in the git working tree.
    #[arg(long, conflicts_with = "paths")]
    pub changed: bool,

    /// Config file layered above `scaffold.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// `jest` or `vitest`.
    #[arg(long)]
    pub framework: Option<String>,

    /// Skip true/false variants for boolean props.
    #[arg(long)]
    pub no_variants: bool,

    /// Run the coverage feedback loop.
    #[arg(long, conflicts_with = "no_coverage")]
    pub coverage: bool,

    #[arg(long)]
    pub no_coverage: bool,

    /// Coverage percentage below which a file is regenerated.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Write the enriched pass directly.
    #[arg(long)]
    pub refine: bool,

    /// Print the batch report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit non-zero when any file failed.
    #[arg(long)]
    pub fail_on_error: bool,
}

impl GenerateArgs {
    pub fn overrides(&self) -> Result<CliOverrides> {
        let framework = match self.framework.as_deref() {
            Some(name) => Some(TestFramework::from_name(name).ok_or_else(|| {
                CliError::invalid(format!("unknown framework '{name}' (expected jest or vitest)"))
            })?),
            None => None,
        };
        let coverage_enabled = if self.coverage {
            Some(true)
        } else if self.no_coverage {
            Some(false)
        } else {
            None
        };
        Ok(CliOverrides {
            config_path: self.config.clone(),
            framework,
            variants: self.no_variants.then_some(false),
            coverage_enabled,
            coverage_threshold: self.threshold,
        })
    }
}

pub fn run_generate(args: GenerateArgs) -> Result<()> {
    let report = generate(&args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_summary(&report, &absolute_root(&args.root)));
    }

    if args.fail_on_error && report.has_failures() {
        return Err(CliError::BatchFailed {
            failed: report.counts().failed,
        });
    }
    Ok(())
}

/// Resolve the config and inputs, then run the batch.
pub fn generate(args: &GenerateArgs) -> Result<BatchReport> {
    let root = absolute_root(&args.root);
    let config = ScaffoldConfig::load(&root, Some(&args.overrides()?))?;
    let batch = Batch::new(config, &root)?.enriched(args.refine);

    let candidates = if args.changed {
        let changed = changed_files(&root)?;
        if changed.is_empty() {
            tracing::info!("no changed files");
            return Ok(BatchReport::default());
        }
        batch.candidates(&changed)
    } else {
        batch.candidates(&args.paths)
    };
    tracing::info!(count = candidates.len(), root = %root.display(), "candidates selected");

    Ok(batch.run(&candidates))
}

fn absolute_root(root: &Path) -> PathBuf {
    std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf())
}

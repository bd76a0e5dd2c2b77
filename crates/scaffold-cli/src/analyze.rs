use std::path::PathBuf;

use clap::Args;
use scaffold_analysis::{analyze, ComponentInfo, SourceContext};

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Component source file.
    pub file: PathBuf,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let components = analyze_file(&args)?;
    println!("{}", serde_json::to_string_pretty(&components)?);
    Ok(())
}

pub fn analyze_file(args: &AnalyzeArgs) -> Result<Vec<ComponentInfo>> {
    let context = SourceContext::new()?;
    let file = context.load_component_source(&args.file)?;
    Ok(analyze(&file, &context))
}

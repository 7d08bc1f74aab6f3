use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Args;
use efulist_manifest::scan_root;
use efulist_runtime::{Settings, default_config_path};
use log::error;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Config files naming the roots to index. Defaults to the
    /// per-user config when none are given.
    #[arg(value_name = "CONFIG")]
    pub config: Vec<PathBuf>,
}

pub fn run(args: ScanArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[scan] {e:#}");
            eprintln!("[scan] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ScanArgs) -> Result<ExitCode> {
    let config_paths = if args.config.is_empty() {
        vec![default_config_path()]
    } else {
        args.config
    };

    let roots = Settings::load_all(&config_paths).context("failed to load config")?;

    // One failed root does not stop the others; its previous manifest
    // stays published.
    let mut failures = 0usize;
    for root in &roots {
        if let Err(e) = scan_root(root) {
            error!("[scan] {} failed: {e}", root.display());
            eprintln!("[scan] {} failed: {e}", root.display());
            failures += 1;
        }
    }

    if failures > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

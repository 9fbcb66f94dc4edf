#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod logging;

use clap::Parser;
use miette::{miette, IntoDiagnostic, Result};
use soldeps_core::{paths, walk_imports, ResolvedFile, Resolver};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "soldeps")]
#[command(author, version, about = "Resolve Solidity imports across npm-style package layouts", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve entry files and print every reachable source
    Resolve {
        /// Entry files, absolute or relative to the working directory
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// User remapping (`[context:]prefix=target`), repeatable
        #[arg(long = "remap", value_name = "REMAPPING")]
        remappings: Vec<String>,
    },

    /// Print the remapping table derived from the given entry files
    Remappings {
        /// Entry files, absolute or relative to the working directory
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// User remapping (`[context:]prefix=target`), repeatable
        #[arg(long = "remap", value_name = "REMAPPING")]
        remappings: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().into_diagnostic()?,
    };

    match cli.command {
        Commands::Resolve { files, remappings } => {
            let (resolver, resolved) = resolve_all(&cwd, &files, &remappings).await?;
            print_resolution(&resolver, &resolved, cli.json);
        }
        Commands::Remappings { files, remappings } => {
            let (resolver, _) = resolve_all(&cwd, &files, &remappings).await?;
            print_remappings(&resolver, cli.json);
        }
    }

    Ok(())
}

/// Build a resolver for the project around `cwd` and walk the import graph
/// from `files`.
async fn resolve_all(
    cwd: &Path,
    files: &[PathBuf],
    remappings: &[String],
) -> Result<(Resolver, Vec<Arc<ResolvedFile>>)> {
    let project_root = paths::find_project_root(cwd)
        .ok_or_else(|| miette!("no package.json found above {}", cwd.display()))?;
    debug!(root = %project_root.display(), "project root");

    let mut resolver = Resolver::new(project_root, remappings, Some(cwd.to_path_buf()))
        .await
        .into_diagnostic()?;

    let entries: Vec<PathBuf> = files
        .iter()
        .map(|f| if f.is_absolute() { f.clone() } else { cwd.join(f) })
        .collect();

    let resolved = walk_imports(&mut resolver, &entries)
        .await
        .into_diagnostic()?;
    debug!(files = resolved.len(), "import graph walked");

    Ok((resolver, resolved))
}

fn print_resolution(resolver: &Resolver, resolved: &[Arc<ResolvedFile>], json: bool) {
    if json {
        let files: Vec<serde_json::Value> = resolved
            .iter()
            .map(|f| {
                serde_json::json!({
                    "source_name": f.source_name(),
                    "path": f.path().to_string_lossy(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "files": files,
            "remappings": resolver.remappings(),
        });
        println!("{output}");
        return;
    }

    for file in resolved {
        println!(
            "{} ({})",
            file.source_name(),
            resolver.display_path(file.path())
        );
    }

    let remappings = resolver.remappings();
    if !remappings.is_empty() {
        println!();
        println!("Remappings:");
        for remapping in remappings {
            println!("  {remapping}");
        }
    }
}

fn print_remappings(resolver: &Resolver, json: bool) {
    if json {
        let output = serde_json::json!({ "remappings": resolver.remappings() });
        println!("{output}");
        return;
    }

    for remapping in resolver.remappings() {
        println!("{remapping}");
    }
}

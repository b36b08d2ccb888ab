mod cli;

use mediashelf::{
    config::{self, Config},
    metadata::{MetadataProvider, TmdbProvider},
    pipeline::{LibraryRun, RunSummary},
    scanner::LibraryWalker,
};
use mediashelf_av::{tools, FfmpegRemuxer};
use mediashelf_common::RunMode;
use mediashelf_db::pool::init_pool;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::path::Path;
use std::process::ExitCode;

/// Exit status when the library root has nothing to scan or startup fails.
const EXIT_FAILURE: u8 = 1;
/// Exit status when a Check run found mismatched or missing fingerprints.
const EXIT_CHECK_FAILED: u8 = 2;

fn build_run(cli: &Cli, config: &Config, mode: RunMode) -> Result<LibraryRun> {
    let provider = TmdbProvider::new(&config.tmdb)?;
    if !provider.is_available() {
        anyhow::bail!("No TMDB API key configured. Set TMDB_API_KEY or API_KEY, or tmdb.api_key in the config file");
    }

    let mut run = LibraryRun::new(&cli.dir, mode, &config.scan, Box::new(provider));

    if mode.remuxes() {
        let remuxer = FfmpegRemuxer::locate(
            config.tools.ffmpeg_path.as_deref(),
            config.tools.remux_timeout(),
        )
        .context("ffmpeg is required to rename files")?;
        let ffmpeg = tools::inspect(remuxer.ffmpeg());
        if !ffmpeg.is_runnable() {
            anyhow::bail!("ffmpeg at {:?} does not run", ffmpeg.path);
        }
        tracing::debug!(
            path = %ffmpeg.path.display(),
            version = ffmpeg.version.as_deref().unwrap_or(""),
            "Using ffmpeg"
        );
        run = run.with_remuxer(Box::new(remuxer));
    }

    if mode.uses_ledger() {
        let ledger_path = match cli.db {
            Some(ref path) => path.clone(),
            None => config.ledger.resolve(&cli.dir),
        };
        if mode.verifies() && !ledger_path.exists() {
            anyhow::bail!("Ledger not found at {:?}; run with --hash first", ledger_path);
        }
        tracing::info!("Opening ledger at {}", ledger_path.display());
        let pool = init_pool(&ledger_path.to_string_lossy())
            .with_context(|| format!("Failed to open ledger at {:?}", ledger_path))?;
        run = run.with_ledger(pool);
    }

    Ok(run)
}

fn run_library(cli: &Cli) -> Result<ExitCode> {
    let config = config::load_config_or_default(cli.config.as_deref())?;
    let mode = RunMode::from_flags(cli.hash, cli.check);
    tracing::info!("Running in {} mode on {}", mode, cli.dir.display());

    if !cli.dir.is_dir() {
        anyhow::bail!("Media library directory does not exist: {:?}", cli.dir);
    }

    let dirs = LibraryWalker::new(config.scan.ignore.clone()).walk(&cli.dir)?;
    if dirs.is_empty() {
        println!(
            "No directories to scan in media library directory {}!",
            cli.dir.display()
        );
        return Ok(ExitCode::from(EXIT_FAILURE));
    }

    let run = build_run(cli, &config, mode)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = rt.block_on(run.process(&dirs))?;

    print_summary(&summary, run.root());
    if mode.verifies() && summary.has_check_failures() {
        return Ok(ExitCode::from(EXIT_CHECK_FAILED));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &RunSummary, root: &Path) {
    println!();
    println!("Finished {}", root.display());
    println!("  {}", summary);
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediashelf=trace,mediashelf_av=debug,mediashelf_db=debug,mediashelf_common=debug"
                .to_string()
        } else {
            "mediashelf=info,mediashelf_av=info,mediashelf_db=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run_library(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediashelf")]
#[command(
    author,
    version,
    about = "Rename media files and add metadata using an online catalog"
)]
pub struct Cli {
    /// The directory of the media library to scan
    pub dir: PathBuf,

    /// Hash every processed media file and store the hashes in a fresh ledger
    #[arg(long, conflicts_with = "check")]
    pub hash: bool,

    /// Check file hashes against the existing ledger without changing any file
    #[arg(long)]
    pub check: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ledger database file (overrides ledger.path)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

use anyhow::Result;
use clap::Parser;
use digits::app::{RunOptions, load_config, performance_line, run};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "digit-classifier",
    about = "Train a handwritten digit classifier and report its accuracy"
)]
struct Cli {
    /// Manifest of training scans, one `<digit> <path>` per line
    train_manifest: PathBuf,

    /// Manifest of test scans
    test_manifest: PathBuf,

    /// TOML file overriding segmentation, feature and training settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write segmentation snapshots of every scan to this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let options = RunOptions {
        config: load_config(cli.config.as_deref())?,
        train_manifest: cli.train_manifest,
        test_manifest: cli.test_manifest,
        debug_dir: cli.debug_dir,
    };
    let summary = run(&options)?;

    println!("{}", performance_line("Train", &summary.train));
    println!("{}", performance_line("Test", &summary.test));
    Ok(())
}

//! Train-then-evaluate driver behind the `digit-classifier` binary

use crate::inspect::SnapshotWriter;
use anyhow::{Context, Result};
use digits_recog::{
    Classifier, Dataset, Evaluation, Mlp, PipelineConfig, TrainReport, build_dataset_with,
    evaluate, load_manifest,
};
use log::info;
use std::path::{Path, PathBuf};

/// Inputs of one run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Manifest of the training scans
    pub train_manifest: PathBuf,
    /// Manifest of the test scans
    pub test_manifest: PathBuf,
    /// Pipeline settings
    pub config: PipelineConfig,
    /// Where to write segmentation snapshots, if anywhere
    pub debug_dir: Option<PathBuf>,
}

/// What a run produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// How training ended: epochs run and the final error
    pub report: TrainReport,
    /// Accuracy on the training set
    pub train: Evaluation,
    /// Accuracy on the held-out test set
    pub test: Evaluation,
}

/// Load the configuration file, or the defaults when there is none
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

/// Build both datasets, train on the first and evaluate on both
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    if let Some(dir) = &options.debug_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create debug directory {}", dir.display()))?;
    }

    let train = load_set("train", &options.train_manifest, options)?;
    let test = load_set("test", &options.test_manifest, options)?;

    let model = Mlp::train(train.features(), train.labels(), &options.config.mlp)
        .context("training failed")?;
    let report = model.report();
    info!(
        "trained {:?} network: {} epochs, final error {:.4}",
        model.layer_sizes(),
        report.iterations,
        report.final_error
    );

    Ok(RunSummary {
        report,
        train: evaluate(&model, &train).context("evaluating the training set")?,
        test: evaluate(&model, &test).context("evaluating the test set")?,
    })
}

fn load_set(set: &str, manifest_path: &Path, options: &RunOptions) -> Result<Dataset> {
    let manifest = load_manifest(manifest_path)?;
    info!(
        "{} manifest {}: {} entries, {} skipped",
        set,
        manifest_path.display(),
        manifest.len(),
        manifest.skipped
    );

    let writer = options
        .debug_dir
        .as_ref()
        .map(|dir| SnapshotWriter::new(dir, set));
    let dataset = build_dataset_with(&manifest, &options.config, |scan, builder| {
        match &writer {
            Some(writer) => writer.write(scan, builder),
            None => Ok(()),
        }
    })
    .with_context(|| format!("failed to build the {} set", set))?;
    Ok(dataset)
}

/// One accuracy line, ` Train Set Performance = 97.50% correct`
pub fn performance_line(set: &str, eval: &Evaluation) -> String {
    match eval.percent_correct() {
        Some(p) => format!(" {} Set Performance = {:.2}% correct", set, p),
        None => format!(" {} Set Performance = n/a% correct", set),
    }
}

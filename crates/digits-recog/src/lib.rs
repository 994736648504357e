//! digits-recog - Handwritten digit recognition
//!
//! This crate turns labeled scans into a dataset and trains a classifier
//! on it:
//!
//! - **Manifests**: `<digit> <path>` lines pairing a scan with its label
//! - **Features**: one fixed-size row per segmented glyph, plus a one-hot
//!   label row
//! - **Classifier**: the [`Classifier`] trait and its multilayer
//!   perceptron backend, [`Mlp`], trained with resilient backpropagation
//! - **Evaluation**: misses and percentage correct over a dataset
//!
//! # Quick Start
//!
//! ```no_run
//! use digits_recog::{Classifier, Mlp, PipelineConfig, build_dataset, evaluate, load_manifest};
//!
//! let config = PipelineConfig::default();
//! let train = build_dataset(&load_manifest("train.txt")?, &config)?;
//! let model = Mlp::train(train.features(), train.labels(), &config.mlp)?;
//! let eval = evaluate(&model, &train)?;
//! println!("{:?}% correct", eval.percent_correct());
//! # Ok::<(), digits_recog::RecogError>(())
//! ```
//!
//! # Modules
//!
//! - [`manifest`]: manifest parsing
//! - [`features`]: glyph crops to feature rows
//! - [`dataset`]: feature and label matrices
//! - [`mlp`]: the neural network backend
//! - [`pipeline`]: manifest to dataset

pub mod classifier;
pub mod config;
pub mod dataset;
mod error;
pub mod evaluate;
pub mod features;
pub mod manifest;
pub mod mlp;
pub mod pipeline;

pub use error::{RecogError, RecogResult};

pub use classifier::Classifier;
pub use config::PipelineConfig;
pub use dataset::{Dataset, Matrix, NUM_CLASSES, argmax, one_hot};
pub use evaluate::{Evaluation, evaluate};
pub use features::{FeatureBuilder, FeatureOptions};
pub use manifest::{Manifest, ManifestEntry, ManifestLineError, load_manifest, parse_line};
pub use mlp::{Mlp, MlpParams, TrainReport};
pub use pipeline::{SegmentedScan, build_dataset, build_dataset_with};

//! Multilayer perceptron trained with batch RPROP
//!
//! Fully connected layers with a symmetric sigmoid on every layer,
//! including the output. Inputs are standardized per column with
//! statistics from the training set; label rows in `{0, 1}` are mapped to
//! `{-target, +target}` for training and mapped back by
//! [`Classifier::predict`].
//!
//! Training minimizes half the sum of squared output errors over all
//! samples and stops after `max_iterations` epochs, or as soon as the
//! error changes by less than `epsilon` between two epochs.

mod activation;
mod rprop;
mod scaling;

pub use activation::SymmetricSigmoid;
pub use rprop::{Rprop, RpropParams};
pub use scaling::ColumnScaling;

use crate::classifier::Classifier;
use crate::dataset::Matrix;
use crate::{RecogError, RecogResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// Training parameters for [`Mlp`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MlpParams {
    /// Hidden layer sizes as fractions of the input size, rounded down
    pub hidden_ratios: Vec<f32>,
    /// Activation used by every layer
    pub activation: SymmetricSigmoid,
    /// Epoch limit
    pub max_iterations: usize,
    /// Stop when the training error changes by less than this
    pub epsilon: f64,
    /// Magnitude that label values 0 and 1 are mapped to (as -target and
    /// +target)
    pub target: f32,
    /// Step-size schedule
    pub rprop: RpropParams,
    /// Seed for weight initialization
    pub seed: u64,
}

impl Default for MlpParams {
    fn default() -> Self {
        Self {
            hidden_ratios: vec![0.75, 0.25],
            activation: SymmetricSigmoid::default(),
            max_iterations: 1000,
            epsilon: 0.1,
            target: 0.95,
            rprop: RpropParams::default(),
            seed: 42,
        }
    }
}

impl MlpParams {
    /// Check the parameters that do not depend on the data shape
    pub fn validate(&self) -> RecogResult<()> {
        if let Some(r) = self
            .hidden_ratios
            .iter()
            .find(|r| !(r.is_finite() && **r > 0.0))
        {
            return Err(RecogError::InvalidParameter(format!(
                "hidden ratios must be positive, got {}",
                r
            )));
        }
        let SymmetricSigmoid { alpha, beta } = self.activation;
        if !(alpha > 0.0 && beta > 0.0) {
            return Err(RecogError::InvalidParameter(format!(
                "activation parameters must be positive, got alpha={} beta={}",
                alpha, beta
            )));
        }
        if !(self.target > 0.0 && self.target < beta) {
            return Err(RecogError::InvalidParameter(format!(
                "target must lie in (0, {}), got {}",
                beta, self.target
            )));
        }
        if self.max_iterations == 0 {
            return Err(RecogError::InvalidParameter(
                "max_iterations must be > 0".to_string(),
            ));
        }
        if !(self.epsilon >= 0.0) {
            return Err(RecogError::InvalidParameter(format!(
                "epsilon must be >= 0, got {}",
                self.epsilon
            )));
        }
        self.rprop.validate()
    }

    /// Layer sizes from input to output
    ///
    /// # Errors
    ///
    /// Returns an error if any layer would be empty.
    pub fn layer_sizes(&self, inputs: usize, outputs: usize) -> RecogResult<Vec<usize>> {
        let mut sizes = Vec::with_capacity(self.hidden_ratios.len() + 2);
        sizes.push(inputs);
        sizes.extend(
            self.hidden_ratios
                .iter()
                .map(|&r| (inputs as f64 * r as f64).floor() as usize),
        );
        sizes.push(outputs);
        if sizes.contains(&0) {
            return Err(RecogError::InvalidParameter(format!(
                "layer sizes {:?} include an empty layer",
                sizes
            )));
        }
        Ok(sizes)
    }
}

/// Outcome of training
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrainReport {
    /// Epochs whose error was evaluated
    pub iterations: usize,
    /// Training error of the last evaluated epoch
    pub final_error: f64,
}

/// One fully connected layer; `weights` is `outputs x inputs`, row-major
#[derive(Debug, Clone)]
struct Layer {
    inputs: usize,
    outputs: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl Layer {
    /// Uniform initialization in `±1/sqrt(inputs)`
    fn random(inputs: usize, outputs: usize, rng: &mut StdRng) -> Self {
        let r = 1.0 / (inputs as f32).sqrt();
        let mut draw = |n: usize| (0..n).map(|_| rng.random_range(-r..r)).collect::<Vec<f32>>();
        let weights = draw(inputs * outputs);
        let bias = draw(outputs);
        Self {
            inputs,
            outputs,
            weights,
            bias,
        }
    }

    fn forward(&self, input: &[f32], act: &SymmetricSigmoid, out: &mut Vec<f32>) {
        out.clear();
        out.extend(
            self.weights
                .chunks_exact(self.inputs)
                .zip(&self.bias)
                .map(|(row, &b)| {
                    let z = row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b;
                    act.apply(z)
                }),
        );
    }
}

/// Gradient buffers matching one layer
struct LayerGrad {
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl LayerGrad {
    fn zeros(layer: &Layer) -> Self {
        Self {
            weights: vec![0.0; layer.weights.len()],
            bias: vec![0.0; layer.bias.len()],
        }
    }

    fn clear(&mut self) {
        self.weights.fill(0.0);
        self.bias.fill(0.0);
    }
}

/// Multilayer perceptron classifier
#[derive(Debug, Clone)]
pub struct Mlp {
    layers: Vec<Layer>,
    activation: SymmetricSigmoid,
    scaling: ColumnScaling,
    target: f32,
    report: TrainReport,
}

impl Mlp {
    /// Layer sizes from input to output
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.layers.iter().map(|l| l.inputs).collect();
        sizes.extend(self.layers.last().map(|l| l.outputs));
        sizes
    }

    /// How training went
    pub fn report(&self) -> TrainReport {
        self.report
    }

    /// Forward pass on an already scaled input, keeping every layer's output
    fn forward_all(&self, input: &[f32], acts: &mut Vec<Vec<f32>>) {
        acts.resize_with(self.layers.len() + 1, Vec::new);
        acts[0].clear();
        acts[0].extend_from_slice(input);
        for (l, layer) in self.layers.iter().enumerate() {
            let (done, rest) = acts.split_at_mut(l + 1);
            layer.forward(&done[l], &self.activation, &mut rest[0]);
        }
    }

    /// Add the gradients of every sample to `grads`; returns the error
    fn accumulate(
        &self,
        inputs: &[Vec<f32>],
        targets: &[Vec<f32>],
        grads: &mut [LayerGrad],
    ) -> f64 {
        let act = &self.activation;
        let mut acts = Vec::new();
        let mut delta = Vec::new();
        let mut prev_delta = Vec::new();
        let mut error = 0.0f64;

        for (input, target) in inputs.iter().zip(targets) {
            self.forward_all(input, &mut acts);

            let Some(output) = acts.last() else {
                continue;
            };
            delta.clear();
            for (&o, &t) in output.iter().zip(target) {
                let e = o - t;
                error += 0.5 * (e as f64) * (e as f64);
                delta.push(e * act.derivative_from_output(o));
            }

            for l in (0..self.layers.len()).rev() {
                let layer = &self.layers[l];
                let x = &acts[l];
                let grad = &mut grads[l];
                for (j, &d) in delta.iter().enumerate() {
                    let row = &mut grad.weights[j * layer.inputs..(j + 1) * layer.inputs];
                    for (g, &xi) in row.iter_mut().zip(x) {
                        *g += d * xi;
                    }
                    grad.bias[j] += d;
                }
                if l > 0 {
                    prev_delta.clear();
                    prev_delta.extend(x.iter().enumerate().map(|(i, &xi)| {
                        let back: f32 = delta
                            .iter()
                            .enumerate()
                            .map(|(j, &d)| layer.weights[j * layer.inputs + i] * d)
                            .sum();
                        back * act.derivative_from_output(xi)
                    }));
                    std::mem::swap(&mut delta, &mut prev_delta);
                }
            }
        }
        error
    }
}

impl Classifier for Mlp {
    type Params = MlpParams;

    fn train(features: &Matrix, labels: &Matrix, params: &MlpParams) -> RecogResult<Self> {
        params.validate()?;
        if features.rows() != labels.rows() {
            return Err(RecogError::DimensionMismatch {
                expected: features.rows(),
                actual: labels.rows(),
            });
        }
        if features.is_empty() {
            return Err(RecogError::EmptyTrainingSet);
        }
        let sizes = params.layer_sizes(features.cols(), labels.cols())?;

        let scaling = ColumnScaling::fit(features.iter_rows(), features.cols());
        let mut rng = StdRng::seed_from_u64(params.seed);
        let layers: Vec<Layer> = sizes
            .windows(2)
            .map(|w| Layer::random(w[0], w[1], &mut rng))
            .collect();
        let mut mlp = Mlp {
            layers,
            activation: params.activation,
            scaling,
            target: params.target,
            report: TrainReport::default(),
        };

        let inputs: Vec<Vec<f32>> = features
            .iter_rows()
            .map(|row| {
                let mut out = Vec::with_capacity(row.len());
                mlp.scaling.apply_into(row, &mut out);
                out
            })
            .collect();
        let t = params.target;
        let targets: Vec<Vec<f32>> = labels
            .iter_rows()
            .map(|row| row.iter().map(|&v| t * (2.0 * v - 1.0)).collect())
            .collect();

        let mut grads: Vec<LayerGrad> = mlp.layers.iter().map(LayerGrad::zeros).collect();
        let mut steps: Vec<(Rprop, Rprop)> = mlp
            .layers
            .iter()
            .map(|l| {
                (
                    Rprop::new(params.rprop, l.weights.len()),
                    Rprop::new(params.rprop, l.bias.len()),
                )
            })
            .collect();

        info!(
            "training MLP {:?} on {} samples (max {} epochs)",
            sizes,
            inputs.len(),
            params.max_iterations
        );
        let mut prev_error: Option<f64> = None;
        for epoch in 0..params.max_iterations {
            grads.iter_mut().for_each(LayerGrad::clear);
            let error = mlp.accumulate(&inputs, &targets, &mut grads);
            mlp.report = TrainReport {
                iterations: epoch + 1,
                final_error: error,
            };
            if epoch % 100 == 0 {
                debug!("epoch {}: error {:.4}", epoch, error);
            }
            if prev_error.is_some_and(|prev| (prev - error).abs() < params.epsilon) {
                break;
            }
            for ((layer, grad), (w_step, b_step)) in
                mlp.layers.iter_mut().zip(&grads).zip(steps.iter_mut())
            {
                w_step.update(&mut layer.weights, &grad.weights);
                b_step.update(&mut layer.bias, &grad.bias);
            }
            prev_error = Some(error);
        }
        info!(
            "training stopped after {} epochs, error {:.4}",
            mlp.report.iterations, mlp.report.final_error
        );
        Ok(mlp)
    }

    fn predict(&self, sample: &[f32]) -> RecogResult<Vec<f32>> {
        if sample.len() != self.scaling.len() {
            return Err(RecogError::DimensionMismatch {
                expected: self.scaling.len(),
                actual: sample.len(),
            });
        }
        let mut scaled = Vec::with_capacity(sample.len());
        self.scaling.apply_into(sample, &mut scaled);
        let mut acts = Vec::new();
        self.forward_all(&scaled, &mut acts);
        let t = self.target;
        Ok(acts
            .last()
            .map(|out| out.iter().map(|&o| (o + t) / (2.0 * t)).collect())
            .unwrap_or_default())
    }
}

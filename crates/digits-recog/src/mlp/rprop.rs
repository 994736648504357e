//! Resilient backpropagation
//!
//! Every weight has its own step size. The step grows while the gradient
//! keeps its sign and shrinks when the sign flips; only the sign of the
//! gradient moves the weight. After a sign flip the weight is left alone
//! for one epoch.

use crate::{RecogError, RecogResult};
use serde::Deserialize;

/// RPROP step-size schedule
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RpropParams {
    /// Initial step size
    pub dw0: f32,
    /// Growth factor while the gradient sign is stable
    pub dw_plus: f32,
    /// Shrink factor after a sign flip
    pub dw_minus: f32,
    /// Smallest step size
    pub dw_min: f32,
    /// Largest step size
    pub dw_max: f32,
}

impl Default for RpropParams {
    fn default() -> Self {
        Self {
            dw0: 0.01,
            dw_plus: 1.2,
            dw_minus: 0.5,
            dw_min: f32::EPSILON,
            dw_max: 50.0,
        }
    }
}

impl RpropParams {
    /// Check that the schedule is well-formed
    pub fn validate(&self) -> RecogResult<()> {
        if !(self.dw_plus > 1.0) {
            return Err(RecogError::InvalidParameter(format!(
                "dw_plus must be > 1, got {}",
                self.dw_plus
            )));
        }
        if !(self.dw_minus > 0.0 && self.dw_minus < 1.0) {
            return Err(RecogError::InvalidParameter(format!(
                "dw_minus must be in (0, 1), got {}",
                self.dw_minus
            )));
        }
        if !(self.dw_min > 0.0 && self.dw_min <= self.dw0 && self.dw0 <= self.dw_max) {
            return Err(RecogError::InvalidParameter(format!(
                "step sizes must satisfy 0 < dw_min <= dw0 <= dw_max, got {} / {} / {}",
                self.dw_min, self.dw0, self.dw_max
            )));
        }
        Ok(())
    }
}

/// Per-weight RPROP state for one parameter vector
#[derive(Debug, Clone)]
pub struct Rprop {
    params: RpropParams,
    step: Vec<f32>,
    prev_grad: Vec<f32>,
}

impl Rprop {
    /// State for `len` weights, every step at `dw0`
    pub fn new(params: RpropParams, len: usize) -> Self {
        Self {
            params,
            step: vec![params.dw0; len],
            prev_grad: vec![0.0; len],
        }
    }

    /// Apply one batch update to `weights` given the summed `grad`
    pub fn update(&mut self, weights: &mut [f32], grad: &[f32]) {
        let p = &self.params;
        for (((w, &g), step), prev) in weights
            .iter_mut()
            .zip(grad)
            .zip(self.step.iter_mut())
            .zip(self.prev_grad.iter_mut())
        {
            let s = *prev * g;
            if s > 0.0 {
                *step = (*step * p.dw_plus).min(p.dw_max);
                *w -= step.copysign(g);
                *prev = g;
            } else if s < 0.0 {
                *step = (*step * p.dw_minus).max(p.dw_min);
                *prev = 0.0;
            } else {
                if g != 0.0 {
                    *w -= step.copysign(g);
                }
                *prev = g;
            }
        }
    }
}

//! Symmetric sigmoid activation

use serde::Deserialize;

/// `f(x) = beta * (1 - exp(-alpha * x)) / (1 + exp(-alpha * x))`
///
/// Odd and bounded by `±beta`. Equal to `beta * tanh(alpha * x / 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymmetricSigmoid {
    /// Slope parameter
    pub alpha: f32,
    /// Output bound
    pub beta: f32,
}

impl Default for SymmetricSigmoid {
    fn default() -> Self {
        Self {
            alpha: 2.0 / 3.0,
            beta: 1.7159,
        }
    }
}

impl SymmetricSigmoid {
    /// Evaluate the activation
    #[inline]
    pub fn apply(&self, x: f32) -> f32 {
        self.beta * (0.5 * self.alpha * x).tanh()
    }

    /// Derivative expressed through the activation value `y = f(x)`
    #[inline]
    pub fn derivative_from_output(&self, y: f32) -> f32 {
        0.5 * self.alpha / self.beta * (self.beta * self.beta - y * y)
    }
}

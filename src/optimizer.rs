//! Adam optimizer.
//!
//! The optimizer itself only holds hyperparameters. Its state lives in an
//! [`AdamState`] value which [`Adam::step`] consumes and replaces, so the
//! owner of a run decides when to stop.

use nalgebra::DVector;

use crate::error::{Result, VqcError};

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_BETA1: f64 = 0.9;
pub const DEFAULT_BETA2: f64 = 0.999;
pub const DEFAULT_EPSILON: f64 = 1e-8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdamConfig {
    pub learning_rate: f64,
    /// Decay rate of the first moment estimate
    pub beta1: f64,
    /// Decay rate of the second moment estimate
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            beta1: DEFAULT_BETA1,
            beta2: DEFAULT_BETA2,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl AdamConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("learning_rate", self.learning_rate),
            ("epsilon", self.epsilon),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(VqcError::InvalidHyperparameter { name, value });
            }
        }

        for (name, value) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&value) {
                return Err(VqcError::InvalidHyperparameter { name, value });
            }
        }

        Ok(())
    }
}

/// Parameters and moment estimates after `t` updates.
#[derive(Clone, Debug, PartialEq)]
pub struct AdamState {
    params: DVector<f64>,
    /// First moment estimate (mean of gradients)
    m: DVector<f64>,
    /// Second moment estimate (uncentered variance of gradients)
    v: DVector<f64>,
    t: usize,
}

impl AdamState {
    /// Zero moments at step 0.
    pub fn new(params: DVector<f64>) -> Self {
        let n = params.len();
        Self {
            params,
            m: DVector::zeros(n),
            v: DVector::zeros(n),
            t: 0,
        }
    }

    pub fn params(&self) -> &DVector<f64> {
        &self.params
    }

    pub fn first_moment(&self) -> &DVector<f64> {
        &self.m
    }

    pub fn second_moment(&self) -> &DVector<f64> {
        &self.v
    }

    pub fn step_count(&self) -> usize {
        self.t
    }

    pub fn into_params(self) -> DVector<f64> {
        self.params
    }
}

#[derive(Clone, Debug)]
pub struct Adam {
    config: AdamConfig,
}

impl Adam {
    pub fn new(config: AdamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    /// Bias correction denominators `(1 - β1^t, 1 - β2^t)`.
    pub fn bias_correction(&self, t: usize) -> (f64, f64) {
        (
            1.0 - self.config.beta1.powi(t as i32),
            1.0 - self.config.beta2.powi(t as i32),
        )
    }

    /// Consumes `state` and returns the state after one update with `gradient`.
    pub fn step(&self, state: AdamState, gradient: &DVector<f64>) -> Result<AdamState> {
        if gradient.len() != state.params.len() {
            return Err(VqcError::DimensionMismatch {
                expected: state.params.len(),
                actual: gradient.len(),
            });
        }

        let AdamConfig {
            learning_rate,
            beta1,
            beta2,
            epsilon,
        } = self.config;

        let t = state.t + 1;
        let m = state.m * beta1 + gradient * (1.0 - beta1);
        let v = state.v * beta2 + gradient.component_mul(gradient) * (1.0 - beta2);

        let (bias_correction1, bias_correction2) = self.bias_correction(t);
        let m_hat = &m / bias_correction1;
        let v_hat = &v / bias_correction2;

        let update = m_hat.component_div(&v_hat.map(|x| x.sqrt() + epsilon));
        let params = state.params - update * learning_rate;

        Ok(AdamState { params, m, v, t })
    }
}

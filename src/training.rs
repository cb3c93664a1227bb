use anyhow::Result;
use argmin::core::{CostFunction, Gradient};
use log::{debug, info};
use nalgebra::DVector;

use crate::{
    error::VqcError,
    optimizer::{Adam, AdamConfig, AdamState},
};

pub const DEFAULT_ITERATIONS: usize = 400;
pub const DEFAULT_REPORT_EVERY: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainingConfig {
    pub iterations: usize,
    pub adam: AdamConfig,
    /// Log the cost every this many steps. Zero disables progress logs.
    pub report_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            adam: AdamConfig::default(),
            report_every: DEFAULT_REPORT_EVERY,
        }
    }
}

impl TrainingConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_adam(mut self, adam: AdamConfig) -> Self {
        self.adam = adam;
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }
}

/// Outcome of a finished run.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub params: DVector<f64>,
    /// Cost after every step, in order.
    pub loss_history: Vec<f64>,
}

impl TrainingReport {
    pub fn final_cost(&self) -> Option<f64> {
        self.loss_history.last().copied()
    }
}

/// Runs Adam for exactly `config.iterations` steps starting from `initial`.
///
/// Each step evaluates the gradient at the current parameters, updates the
/// optimizer state and records the cost at the new parameters. A non-finite
/// gradient or cost aborts the run.
pub fn train<P>(
    problem: &P,
    initial: DVector<f64>,
    config: &TrainingConfig,
) -> Result<TrainingReport>
where
    P: CostFunction<Param = DVector<f64>, Output = f64>
        + Gradient<Param = DVector<f64>, Gradient = DVector<f64>>,
{
    let adam = Adam::new(config.adam)?;
    let mut state = AdamState::new(initial);
    let mut loss_history = Vec::with_capacity(config.iterations);

    info!(
        "Training started: {} iterations, learning rate {}",
        config.iterations,
        adam.config().learning_rate
    );

    for step in 1..=config.iterations {
        let gradient = problem.gradient(state.params())?;
        if gradient.iter().any(|g| !g.is_finite()) {
            return Err(VqcError::NonFinite {
                step,
                quantity: "gradient",
            }
            .into());
        }

        state = adam.step(state, &gradient)?;

        let cost = problem.cost(state.params())?;
        if !cost.is_finite() {
            return Err(VqcError::NonFinite {
                step,
                quantity: "cost",
            }
            .into());
        }
        loss_history.push(cost);

        debug!(
            "Step {}: gradient {:?}, params {:?}",
            step,
            gradient.as_slice(),
            state.params().as_slice()
        );
        if config.report_every > 0 && step % config.report_every == 0 {
            info!("Step {}: cost {:.6}", step, cost);
        }
    }

    let report = TrainingReport {
        params: state.into_params(),
        loss_history,
    };
    if let Some(cost) = report.final_cost() {
        info!("Training completed: final cost {:.6}", cost);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_approx_eq, cost::VariationalProblem};

    #[test]
    fn test_reference_trajectory() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let report = train(&problem, DVector::zeros(3), &TrainingConfig::default())?;

        assert_eq!(400, report.loss_history.len());
        assert_approx_eq!(0.2627, report.loss_history[49], 1e-3);
        assert_approx_eq!(-0.9024, report.loss_history[199], 1e-3);
        assert_approx_eq!(-0.9999, report.loss_history[399], 1e-3);

        let final_cost = report.final_cost().unwrap();
        assert!(final_cost <= -0.999, "final cost {}", final_cost);
        assert_approx_eq!(final_cost, problem.cost(&report.params)?, 1e-12);

        Ok(())
    }

    #[test]
    fn test_loss_decreases_overall() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let config = TrainingConfig::default().with_iterations(100);
        let report = train(&problem, DVector::zeros(3), &config)?;

        let initial = problem.cost(&DVector::zeros(3))?;
        assert_eq!(100, report.loss_history.len());
        assert!(report.loss_history[0] < initial);
        assert!(report.final_cost().unwrap() < report.loss_history[0]);

        Ok(())
    }

    #[test]
    fn test_runs_are_deterministic_and_isolated() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let config = TrainingConfig::default().with_iterations(30);
        let initial = DVector::from_row_slice(&[0.2, -0.4, 1.0]);

        let first = train(&problem, initial.clone(), &config)?;
        let second = train(&problem, initial, &config)?;

        assert_eq!(first.loss_history, second.loss_history);
        assert_eq!(first.params, second.params);

        Ok(())
    }

    #[test]
    fn test_zero_iterations() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let initial = DVector::from_row_slice(&[0.1, 0.2, 0.3]);
        let config = TrainingConfig::default().with_iterations(0);
        let report = train(&problem, initial.clone(), &config)?;

        assert!(report.loss_history.is_empty());
        assert_eq!(None, report.final_cost());
        assert_eq!(initial, report.params);

        Ok(())
    }

    #[test]
    fn test_non_finite_parameters_abort() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let initial = DVector::from_row_slice(&[f64::NAN, 0.0, 0.0]);
        let err = train(&problem, initial, &TrainingConfig::default()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<VqcError>(),
            Some(VqcError::NonFinite {
                step: 1,
                quantity: "gradient"
            })
        ));

        Ok(())
    }

    #[test]
    fn test_wrong_parameter_count() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let result = train(&problem, DVector::zeros(4), &TrainingConfig::default());
        assert!(result.is_err());

        let adam = AdamConfig::default().with_learning_rate(-1.0);
        let config = TrainingConfig::default().with_adam(adam);
        assert!(train(&problem, DVector::zeros(3), &config).is_err());

        Ok(())
    }
}

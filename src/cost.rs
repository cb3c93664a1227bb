use anyhow::Result;
use argmin::core::CostFunction;
use nalgebra::{DVector, Matrix4};

use crate::{
    ansatz,
    dual::Real,
    error::VqcError,
    observable::{expectation, Observable, Pauli},
    Qbit,
};

/// Expectation value of `observable` in the state prepared by the reference circuit.
pub fn evaluate<T: Real>(params: &[T], observable: &Matrix4<Qbit>) -> Result<T, VqcError> {
    let state = ansatz::evolve(params)?;
    Ok(expectation(observable, state.amplitudes()))
}

/// The reference circuit paired with a fixed observable.
#[derive(Clone, Debug)]
pub struct VariationalProblem {
    pub(crate) observable: Matrix4<Qbit>,
}

impl VariationalProblem {
    pub fn new(observable: &Observable) -> Result<Self, VqcError> {
        Ok(Self {
            observable: observable.to_matrix()?,
        })
    }

    /// Pauli-Z on qubit 1, tensored with the identity on qubit 0.
    pub fn reference() -> Result<Self, VqcError> {
        let mut observable = Observable::new();
        observable.add_pauli_operator(1.0, &[(Pauli::Z, 1)]);
        Self::new(&observable)
    }

    pub fn observable(&self) -> &Matrix4<Qbit> {
        &self.observable
    }
}

impl CostFunction for VariationalProblem {
    type Param = DVector<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output> {
        Ok(evaluate(param.as_slice(), &self.observable)?)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{assert_approx_eq, qstate::QState};

    #[test]
    fn test_cost_at_zero() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let cost = problem.cost(&DVector::zeros(3))?;
        assert_approx_eq!(FRAC_1_SQRT_2, cost, 1e-12);

        Ok(())
    }

    #[test]
    fn test_cost_is_bounded() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let params = DVector::from_fn(3, |_, _| rng.random_range(-2.0 * PI..2.0 * PI));
            let cost = problem.cost(&params)?;
            assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&cost), "{}", cost);
        }

        Ok(())
    }

    #[test]
    fn test_cost_boundaries() -> Result<()> {
        let problem = VariationalProblem::reference()?;

        let ground = QState::<f64>::from_str("00")?;
        assert_approx_eq!(1.0, expectation(problem.observable(), ground.amplitudes()));

        let excited = QState::<f64>::from_str("10")?;
        assert_approx_eq!(-1.0, expectation(problem.observable(), excited.amplitudes()));

        Ok(())
    }

    #[test]
    fn test_wrong_parameter_count() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let err = problem.cost(&DVector::zeros(2)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VqcError>(),
            Some(VqcError::ParameterCount {
                expected: 3,
                actual: 2
            })
        ));

        Ok(())
    }
}

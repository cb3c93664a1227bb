use anyhow::Result;
use argmin::core::Gradient;
use nalgebra::DVector;

use crate::{
    ansatz::NUM_OF_PARAMETERS,
    cost::{evaluate, VariationalProblem},
    dual::Dual,
    error::VqcError,
};

/// Evaluates `f` at `params` together with its exact gradient.
///
/// Each parameter is seeded as an independent dual direction, so a single
/// forward pass through `f` yields every partial derivative.
pub fn value_and_gradient<const N: usize, F>(
    f: F,
    params: &DVector<f64>,
) -> Result<(f64, DVector<f64>), VqcError>
where
    F: Fn(&[Dual<N>]) -> Result<Dual<N>, VqcError>,
{
    if params.len() != N {
        return Err(VqcError::ParameterCount {
            expected: N,
            actual: params.len(),
        });
    }

    let seeded = params
        .iter()
        .enumerate()
        .map(|(i, &value)| Dual::variable(value, i))
        .collect::<Vec<_>>();
    let output = f(seeded.as_slice())?;

    Ok((output.real, DVector::from_row_slice(&output.tangent)))
}

pub fn gradient<const N: usize, F>(f: F, params: &DVector<f64>) -> Result<DVector<f64>, VqcError>
where
    F: Fn(&[Dual<N>]) -> Result<Dual<N>, VqcError>,
{
    value_and_gradient(f, params).map(|(_, gradient)| gradient)
}

impl Gradient for VariationalProblem {
    type Param = DVector<f64>;
    type Gradient = DVector<f64>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient> {
        let observable = &self.observable;
        Ok(gradient::<NUM_OF_PARAMETERS, _>(
            |params| evaluate(params, observable),
            param,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use argmin::core::CostFunction;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{assert_approx_eq, dual::Real};

    fn central_difference(
        problem: &VariationalProblem,
        params: &DVector<f64>,
    ) -> Result<DVector<f64>> {
        let h = 1e-6;
        let mut result = DVector::zeros(params.len());
        for i in 0..params.len() {
            let mut forward = params.clone();
            let mut backward = params.clone();
            forward[i] += h;
            backward[i] -= h;
            result[i] = (problem.cost(&forward)? - problem.cost(&backward)?) / (2.0 * h);
        }
        Ok(result)
    }

    #[test]
    fn test_gradient_at_zero() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let gradient = problem.gradient(&DVector::zeros(3))?;

        assert_approx_eq!(0.0, gradient[0], 1e-12);
        assert_approx_eq!(-FRAC_1_SQRT_2, gradient[1], 1e-12);
        assert_approx_eq!(0.0, gradient[2], 1e-12);

        Ok(())
    }

    #[test]
    fn test_gradient_matches_finite_difference() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let params = DVector::from_fn(3, |_, _| rng.random_range(-PI..PI));
            let exact = problem.gradient(&params)?;
            let approx = central_difference(&problem, &params)?;
            for (e, a) in exact.iter().zip(approx.iter()) {
                assert_approx_eq!(*a, *e, 1e-4);
            }
        }

        Ok(())
    }

    #[test]
    fn test_value_matches_cost() -> Result<()> {
        let problem = VariationalProblem::reference()?;
        let params = DVector::from_row_slice(&[0.4, -1.3, 2.2]);

        let (value, _) = value_and_gradient::<3, _>(
            |p| evaluate(p, problem.observable()),
            &params,
        )?;
        assert_approx_eq!(problem.cost(&params)?, value, 1e-12);

        Ok(())
    }

    #[test]
    fn test_gradient_of_polynomial() -> Result<()> {
        // f(x, y) = x^2 y + sin(y)
        let params = DVector::from_row_slice(&[1.5, 0.25]);
        let gradient = gradient::<2, _>(|p| Ok(p[0] * p[0] * p[1] + p[1].sin()), &params)?;

        assert_approx_eq!(2.0 * 1.5 * 0.25, gradient[0]);
        assert_approx_eq!(1.5 * 1.5 + 0.25f64.cos(), gradient[1]);

        Ok(())
    }

    #[test]
    fn test_gradient_shape_mismatch() {
        let result = gradient::<3, _>(|p| Ok(p[0]), &DVector::zeros(4));
        assert!(matches!(
            result,
            Err(VqcError::ParameterCount {
                expected: 3,
                actual: 4
            })
        ));
    }
}

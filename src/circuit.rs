use nalgebra::{Matrix2, Matrix4};
use num_complex::Complex;
use num_traits::{One, Zero};

use crate::dual::Real;
use crate::error::{Result, VqcError};
use crate::gates::x_dense_matrix;
use crate::qstate::QState;
use crate::NUM_OF_QBITS;

/// Ordered list of two-qubit operators, applied first to last.
#[derive(Clone, Debug)]
pub struct Circuit<T: Real = f64> {
    gates: Vec<Matrix4<Complex<T>>>,
}

impl<T: Real> Default for Circuit<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> Circuit<T> {
    pub fn new() -> Self {
        Self { gates: Vec::new() }
    }

    /// Converts a qubit index into its position in the Kronecker product.
    pub fn check_and_reverse_index(&self, index: usize) -> Result<usize> {
        if index >= NUM_OF_QBITS {
            return Err(VqcError::InvalidQubit(index, NUM_OF_QBITS));
        }
        Ok(NUM_OF_QBITS - 1 - index)
    }

    fn create_gate_for_index(
        &self,
        index: usize,
        gate: &Matrix2<Complex<T>>,
    ) -> Result<Matrix4<Complex<T>>> {
        let index = self.check_and_reverse_index(index)?;

        let mut factors = [Matrix2::identity(); NUM_OF_QBITS];
        factors[index] = *gate;
        Ok(kronecker_product(&factors[0], &factors[1]))
    }

    pub fn gate_at(mut self, index: usize, gate: Matrix2<Complex<T>>) -> Result<Self> {
        let gate = self.create_gate_for_index(index, &gate)?;
        self.add_gate(gate);
        Ok(self)
    }

    /// Applies `gates[i]` to qubit `i`, all within one layer.
    pub fn layer(mut self, gates: [Matrix2<Complex<T>>; NUM_OF_QBITS]) -> Self {
        self.add_gate(kronecker_product(&gates[1], &gates[0]));
        self
    }

    pub fn control(
        mut self,
        control: usize,
        target: usize,
        gate: &Matrix2<Complex<T>>,
    ) -> Result<Self> {
        let matrix = self.build_control_matrix(control, target, gate)?;
        self.add_gate(matrix);
        Ok(self)
    }

    fn build_control_matrix(
        &self,
        control: usize,
        target: usize,
        gate: &Matrix2<Complex<T>>,
    ) -> Result<Matrix4<Complex<T>>> {
        if control == target {
            return Err(VqcError::SameQubit(control));
        }
        let control = self.check_and_reverse_index(control)?;
        let target = self.check_and_reverse_index(target)?;

        let zero = Complex::zero();
        let one = Complex::one();
        // |0><0|
        let zero_zero = Matrix2::new(one, zero, zero, zero);
        // |1><1|
        let one_one = Matrix2::new(zero, zero, zero, one);

        let mut zero_factors = [Matrix2::identity(); NUM_OF_QBITS];
        let mut one_factors = [Matrix2::identity(); NUM_OF_QBITS];
        zero_factors[control] = zero_zero;
        one_factors[control] = one_one;
        one_factors[target] = *gate;

        Ok(kronecker_product(&zero_factors[0], &zero_factors[1])
            + kronecker_product(&one_factors[0], &one_factors[1]))
    }

    pub fn cnot(self, control: usize, target: usize) -> Result<Self> {
        self.control(control, target, &x_dense_matrix())
    }

    pub fn add_gate(&mut self, gate: Matrix4<Complex<T>>) {
        self.gates.push(gate);
    }

    pub fn num_of_gates(&self) -> usize {
        self.gates.len()
    }

    /// Product of all gates, the last applied gate leftmost.
    pub fn unitary(&self) -> Matrix4<Complex<T>> {
        self.gates
            .iter()
            .fold(Matrix4::identity(), |acc, gate| gate * acc)
    }

    pub fn apply(&self, state: &QState<T>) -> QState<T> {
        QState {
            state: self.unitary() * state.state,
        }
    }
}

pub fn kronecker_product<T: Real>(
    x: &Matrix2<Complex<T>>,
    y: &Matrix2<Complex<T>>,
) -> Matrix4<Complex<T>> {
    Matrix4::from_fn(|r, c| x[(r / 2, c / 2)] * y[(r % 2, c % 2)])
}

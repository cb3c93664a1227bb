use nalgebra::{Matrix4, Vector4};
use nalgebra_sparse::{convert::serial::convert_csr_dense, coo::CooMatrix, CsrMatrix};
use num_complex::Complex;

use crate::{
    dual::Real,
    error::{Result, VqcError},
    gates::{x_matrix, y_matrix, z_matrix},
    qstate::QState,
    Qbit, NUM_OF_QBITS,
};

/// Weighted sum of Pauli strings over the two qubits.
#[derive(Clone, Debug, Default)]
pub struct Observable {
    operators: Vec<PauliOperator>,
}

impl Observable {
    pub fn new() -> Self {
        Self {
            operators: Vec::new(),
        }
    }

    pub fn add_pauli_operator(&mut self, coefficient: f64, ops: &[(Pauli, usize)]) {
        let operator = PauliOperator {
            coefficient,
            ops: ops
                .iter()
                .map(|&(kind, index)| PauliMatrix { index, kind })
                .collect(),
        };
        self.operators.push(operator);
    }

    /// Dense Hermitian matrix of the observable. Build once and reuse.
    pub fn to_matrix(&self) -> Result<Matrix4<Qbit>> {
        let mut matrix = Matrix4::zeros();

        for operator in &self.operators {
            let mut kinds = [Pauli::I; NUM_OF_QBITS];
            for op in &operator.ops {
                if op.index >= NUM_OF_QBITS {
                    return Err(VqcError::InvalidQubit(op.index, NUM_OF_QBITS));
                }
                kinds[op.index] = op.kind;
            }

            let mut op = CsrMatrix::identity(1);
            for kind in kinds.iter().rev() {
                let pauli = match kind {
                    Pauli::I => CsrMatrix::identity(2),
                    Pauli::X => x_matrix(),
                    Pauli::Y => y_matrix(),
                    Pauli::Z => z_matrix(),
                };
                op = kronecker_product(&op, &pauli);
            }

            let dense = convert_csr_dense(&op);
            matrix += Matrix4::from_iterator(dense.iter().map(|v| *v * operator.coefficient));
        }

        Ok(matrix)
    }

    pub fn expectation_value<T: Real>(&self, qstate: &QState<T>) -> Result<T> {
        Ok(expectation(&self.to_matrix()?, qstate.amplitudes()))
    }

    /// Smallest and largest eigenvalue, bounding every expectation value.
    pub fn eigenvalue_range(&self) -> Result<(f64, f64)> {
        let eigenvalues = self.to_matrix()?.symmetric_eigenvalues();
        Ok((eigenvalues.min(), eigenvalues.max()))
    }
}

/// Re <ψ|O|ψ>. The imaginary part vanishes for a Hermitian `O`.
pub fn expectation<T: Real>(operator: &Matrix4<Qbit>, state: &Vector4<Complex<T>>) -> T {
    let operator = operator.map(|v| Complex::new(T::from_f64(v.re), T::from_f64(v.im)));
    let bra_state = state.map(|v| v.conj()).transpose();
    let value = bra_state * operator * state;
    value[0].re
}

fn kronecker_product(x: &CsrMatrix<Qbit>, y: &CsrMatrix<Qbit>) -> CsrMatrix<Qbit> {
    let mut result = CooMatrix::new(x.nrows() * y.nrows(), x.ncols() * y.ncols());

    for (rx, cx, value_x) in x.triplet_iter() {
        for (ry, cy, value_y) in y.triplet_iter() {
            let new_row = rx * y.nrows() + ry;
            let new_col = cx * y.ncols() + cy;
            let new_value = value_x * value_y;
            result.push(new_row, new_col, new_value);
        }
    }

    CsrMatrix::from(&result)
}

#[derive(Clone, Debug)]
struct PauliOperator {
    coefficient: f64,
    ops: Vec<PauliMatrix>,
}

#[derive(Clone, Debug)]
pub struct PauliMatrix {
    index: usize,
    kind: Pauli,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

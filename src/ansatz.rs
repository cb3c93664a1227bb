//! The reference variational circuit.
//!
//! Starting from |00>, the circuit applies
//!
//! ```text
//! RY(π/4) ⊗ RY(π/4) → CNOT → RX(θx) ⊗ I → CNOT → RY(θy) ⊗ RZ(θz)
//! ```
//!
//! where the left factor acts on qubit 1 (the control of both CNOTs) and the
//! right factor on qubit 0. Only the three angles `[θx, θy, θz]` are trainable.

use std::f64::consts::FRAC_PI_4;

use crate::circuit::Circuit;
use crate::dual::Real;
use crate::error::{Result, VqcError};
use crate::gates::{rx_matrix, ry_matrix, rz_matrix};
use crate::qstate::QState;

pub const NUM_OF_PARAMETERS: usize = 3;

/// Fails fast on a parameter vector that does not fit the circuit.
pub fn check_parameters<T>(params: &[T]) -> Result<()> {
    if params.len() != NUM_OF_PARAMETERS {
        return Err(VqcError::ParameterCount {
            expected: NUM_OF_PARAMETERS,
            actual: params.len(),
        });
    }
    Ok(())
}

pub fn build_circuit<T: Real>(params: &[T]) -> Result<Circuit<T>> {
    check_parameters(params)?;
    let (angle_x, angle_y, angle_z) = (params[0], params[1], params[2]);

    let symmetry_breaking = ry_matrix(T::from_f64(FRAC_PI_4));

    Ok(Circuit::new()
        .layer([symmetry_breaking, symmetry_breaking])
        .cnot(1, 0)?
        .gate_at(1, rx_matrix(angle_x))?
        .cnot(1, 0)?
        .layer([rz_matrix(angle_z), ry_matrix(angle_y)]))
}

/// Runs the reference circuit on |00>.
pub fn evolve<T: Real>(params: &[T]) -> Result<QState<T>> {
    let circuit = build_circuit(params)?;
    let initial = QState::ground()?;
    Ok(circuit.apply(&initial))
}

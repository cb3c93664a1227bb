use std::fmt::Display;

use nalgebra::{DVector, Vector4};
use num_complex::Complex;
use num_traits::{One, Zero};

use crate::dual::Real;
use crate::error::{Result, VqcError};
use crate::NUM_OF_QBITS;

/// Normalized standard basis vector `|index>` of the given dimension.
pub fn basis<T: Real>(dimension: usize, index: usize) -> Result<DVector<Complex<T>>> {
    if index >= dimension {
        return Err(VqcError::InvalidBasis { dimension, index });
    }

    let mut state = DVector::from_element(dimension, Complex::zero());
    state[index] = Complex::one();
    Ok(state)
}

/// Kronecker product of two state vectors.
pub fn tensor<T: Real>(x: &DVector<Complex<T>>, y: &DVector<Complex<T>>) -> DVector<Complex<T>> {
    DVector::from_fn(x.len() * y.len(), |i, _| x[i / y.len()] * y[i % y.len()])
}

/// Two-qubit state. Index 0 is the least significant qubit of a basis label.
#[derive(Clone, Debug, PartialEq)]
pub struct QState<T: Real = f64> {
    pub(crate) state: Vector4<Complex<T>>,
}

impl<T: Real> QState<T> {
    pub fn new(state: &[Complex<T>]) -> Result<Self> {
        if state.len() != 1 << NUM_OF_QBITS {
            return Err(VqcError::InvalidStateLength(state.len()));
        }

        Ok(Self {
            state: Vector4::from_column_slice(state),
        })
    }

    /// |00>, assembled as the tensor product of two single-qubit ground states.
    pub fn ground() -> Result<Self> {
        let zero = basis(2, 0)?;
        let joint = tensor(&zero, &zero);
        Self::new(joint.as_slice())
    }

    pub fn from_str(qbits: &str) -> Result<Self> {
        if qbits.len() != NUM_OF_QBITS {
            return Err(VqcError::InvalidBitString(qbits.to_string()));
        }
        let index = usize::from_str_radix(qbits, 2)
            .map_err(|_| VqcError::InvalidBitString(qbits.to_string()))?;
        let state = basis(1 << NUM_OF_QBITS, index)?;

        Self::new(state.as_slice())
    }

    pub fn num_of_qbits(&self) -> usize {
        self.state.len().ilog2() as usize
    }

    pub fn amplitudes(&self) -> &Vector4<Complex<T>> {
        &self.state
    }

    /// <ψ|ψ>
    pub fn norm_sqr(&self) -> T {
        self.state
            .iter()
            .fold(T::zero(), |acc, amplitude| acc + amplitude.norm_sqr())
    }
}

impl<T: Real> Display for QState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bin_width = self.num_of_qbits();

        for (i, value) in self.state.iter().enumerate() {
            let value = Complex::new(value.re.value(), value.im.value());
            writeln!(f, "|{:0width$b}>: {}", i, value, width = bin_width)?;
        }

        Ok(())
    }
}

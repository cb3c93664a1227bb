pub mod ansatz;
pub mod circuit;
pub mod cost;
pub mod dual;
pub mod error;
pub mod gates;
pub mod gradient;
pub mod observable;
pub mod optimizer;
pub mod qstate;
pub mod training;

#[cfg(test)]
mod test_util;

use num_complex::Complex;

pub use circuit::Circuit;
pub use error::VqcError;
pub use qstate::QState;

pub type Qbit = Complex<f64>;

/// Width of every circuit in this crate.
pub const NUM_OF_QBITS: usize = 2;

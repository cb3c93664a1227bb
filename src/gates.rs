use nalgebra::{Matrix2, Matrix4};
use nalgebra_sparse::{coo::CooMatrix, csr::CsrMatrix};
use num_complex::Complex;
use num_traits::{One, Zero};

use crate::dual::Real;
use crate::Qbit;

fn real<T: Real>(x: T) -> Complex<T> {
    Complex::new(x, T::zero())
}

fn imag<T: Real>(x: T) -> Complex<T> {
    Complex::new(T::zero(), x)
}

fn half_angle<T: Real>(angle: T) -> (T, T) {
    let half = angle / T::from_f64(2.0);
    (half.cos(), half.sin())
}

/// RX(θ) = exp(-iθX/2)
pub fn rx_matrix<T: Real>(angle: T) -> Matrix2<Complex<T>> {
    let (c, s) = half_angle(angle);
    Matrix2::new(real(c), imag(-s), imag(-s), real(c))
}

/// RY(θ) = exp(-iθY/2)
pub fn ry_matrix<T: Real>(angle: T) -> Matrix2<Complex<T>> {
    let (c, s) = half_angle(angle);
    Matrix2::new(real(c), real(-s), real(s), real(c))
}

/// RZ(θ) = exp(-iθZ/2)
pub fn rz_matrix<T: Real>(angle: T) -> Matrix2<Complex<T>> {
    let (c, s) = half_angle(angle);
    Matrix2::new(
        Complex::new(c, -s),
        Complex::zero(),
        Complex::zero(),
        Complex::new(c, s),
    )
}

/// CNOT with the most significant qubit as control: swaps the amplitudes of |10> and |11>.
pub fn cnot_matrix<T: Real>() -> Matrix4<Complex<T>> {
    let mut cnot = Matrix4::identity();
    cnot.swap_rows(2, 3);
    cnot
}

pub fn x_dense_matrix<T: Real>() -> Matrix2<Complex<T>> {
    Matrix2::new(Complex::zero(), real(T::one()), real(T::one()), Complex::zero())
}

pub fn x_matrix() -> CsrMatrix<Qbit> {
    let mut x_coo = CooMatrix::new(2, 2);
    x_coo.push(0, 1, Complex::new(1.0, 0.0));
    x_coo.push(1, 0, Complex::new(1.0, 0.0));
    CsrMatrix::from(&x_coo)
}

pub fn y_matrix() -> CsrMatrix<Qbit> {
    let mut y_coo = CooMatrix::new(2, 2);
    y_coo.push(0, 1, Complex::new(0.0, -1.0));
    y_coo.push(1, 0, Complex::new(0.0, 1.0));
    CsrMatrix::from(&y_coo)
}

pub fn z_matrix() -> CsrMatrix<Qbit> {
    let mut z_coo = CooMatrix::new(2, 2);
    z_coo.push(0, 0, Complex::new(1.0, 0.0));
    z_coo.push(1, 1, Complex::new(-1.0, 0.0));
    CsrMatrix::from(&z_coo)
}

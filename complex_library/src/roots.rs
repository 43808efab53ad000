use logger::{log, LogLevel};

use crate::complex::Complex;
use crate::error::{ComplexError, ComplexResult};

impl Complex {
    /// Roots of `a·x² + b·x + c = 0`.
    ///
    /// Two roots when the discriminant is non-zero (the `+√Δ` root first), a
    /// single root when it is exactly zero.
    pub fn find_quadratic_roots(a: f64, b: f64, c: f64) -> ComplexResult<Vec<Complex>> {
        if a == 0.0 {
            return Err(ComplexError::InvalidEquation.logged());
        }
        let discriminant = b * b - 4.0 * a * c;
        let denominator = 2.0 * a;
        let vertex = -b / denominator;
        if discriminant > 0.0 {
            log!(LogLevel::Debug, "complex_library", "discriminant {} > 0, two real roots", discriminant);
            let offset = discriminant.sqrt() / denominator;
            Ok(vec![Complex::from_real(vertex + offset), Complex::from_real(vertex - offset)])
        } else if discriminant == 0.0 {
            log!(LogLevel::Debug, "complex_library", "discriminant is 0, one real root");
            Ok(vec![Complex::from_real(vertex)])
        } else {
            log!(LogLevel::Debug, "complex_library", "discriminant {} < 0, conjugate pair", discriminant);
            let offset = (-discriminant).sqrt() / denominator;
            Ok(vec![Complex::from_cartesian(vertex, offset), Complex::from_cartesian(vertex, -offset)])
        }
    }
}

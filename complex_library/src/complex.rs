use std::f64::consts::{self, FRAC_PI_2, PI, TAU};
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{Inv, One, Pow, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{ComplexError, ComplexResult};
use crate::mode::PhaseMode;
use crate::resolver::{self, DEFAULT_EPSILON};

const HASH_DECIMALS: i32 = 10;

/// Immutable complex number carrying both its cartesian and its polar form.
///
/// The argument is always stored in the `[0, 2π)` convention. Equality is
/// tolerance based (`1e-12` per component). `Hash` rounds each component to
/// 10 decimals, so two values equal under the tolerance may still hash
/// differently when they straddle a rounding boundary. The tolerance also
/// makes equality non-transitive: `a == b` and `b == c` do not imply
/// `a == c`, so `Eq` only holds for values far apart relative to `1e-12`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "Cartesian", into = "Cartesian")]
pub struct Complex {
    real: f64,
    imaginary: f64,
    modulus: f64,
    argument: f64,
}

#[derive(Serialize, Deserialize)]
struct Cartesian {
    real: f64,
    imaginary: f64,
}

impl From<Cartesian> for Complex {
    fn from(value: Cartesian) -> Self {
        Complex::from_cartesian(value.real, value.imaginary)
    }
}

impl From<Complex> for Cartesian {
    fn from(value: Complex) -> Self {
        Cartesian { real: value.real, imaginary: value.imaginary }
    }
}

impl Complex {
    pub const E: f64 = consts::E;
    pub const PI: f64 = consts::PI;

    pub const ZERO: Complex = Complex { real: 0.0, imaginary: 0.0, modulus: 0.0, argument: 0.0 };
    pub const ONE: Complex = Complex { real: 1.0, imaginary: 0.0, modulus: 1.0, argument: 0.0 };
    pub const I: Complex = Complex { real: 0.0, imaginary: 1.0, modulus: 1.0, argument: FRAC_PI_2 };

    pub fn from_cartesian(real: f64, imaginary: f64) -> Self {
        if real == 0.0 && imaginary == 0.0 {
            return Complex { real, imaginary, modulus: 0.0, argument: 0.0 };
        }
        let modulus = real.hypot(imaginary);
        let quadrant = resolver::classify_quadrant(real, imaginary);
        let argument = resolver::resolve_phase(real, imaginary, quadrant);
        Complex { real, imaginary, modulus, argument }
    }

    /// Builds a value from a radius and an angle given in `mode`'s convention.
    /// The stored argument is re-resolved from the snapped cartesian components.
    pub fn from_polar(radius: f64, angle: f64, mode: PhaseMode) -> ComplexResult<Self> {
        if !(radius >= 0.0) {
            return Err(ComplexError::negative_radius());
        }
        if !mode.contains(angle) {
            return Err(ComplexError::phase_out_of_range(mode));
        }
        let real = resolver::snap_to_integer(radius * angle.cos());
        let imaginary = resolver::snap_to_integer(radius * angle.sin());
        let argument = Complex::from_cartesian(real, imaginary).argument;
        Ok(Complex { real, imaginary, modulus: radius, argument })
    }

    pub fn from_real(value: f64) -> Self {
        Complex::from_cartesian(value, 0.0)
    }

    pub fn real(&self) -> f64 {
        self.real
    }
    pub fn imaginary(&self) -> f64 {
        self.imaginary
    }
    pub fn modulus(&self) -> f64 {
        self.modulus
    }
    pub fn argument(&self) -> f64 {
        self.argument
    }

    /// Argument expressed in the requested convention.
    pub fn argument_in(&self, mode: PhaseMode) -> f64 {
        match mode {
            PhaseMode::Secondary => self.argument,
            PhaseMode::Primary if self.argument > PI => self.argument - TAU,
            PhaseMode::Primary => self.argument,
        }
    }

    pub fn to_polar(&self) -> (f64, f64) {
        (self.modulus, self.argument)
    }

    pub fn to_real(self) -> ComplexResult<f64> {
        if self.imaginary != 0.0 {
            return Err(ComplexError::InvalidConversion.logged());
        }
        Ok(self.real)
    }

    pub fn approx_eq(&self, other: &Complex, epsilon: f64) -> bool {
        (self.real - other.real).abs() <= epsilon && (self.imaginary - other.imaginary).abs() <= epsilon
    }

    pub fn add(self, other: Complex) -> Complex {
        Complex::from_cartesian(self.real + other.real, self.imaginary + other.imaginary)
    }

    pub fn add_real(self, value: f64) -> Complex {
        Complex::from_cartesian(self.real + value, self.imaginary)
    }

    pub fn subtract(self, other: Complex) -> Complex {
        Complex::from_cartesian(self.real - other.real, self.imaginary - other.imaginary)
    }

    pub fn subtract_real(self, value: f64) -> Complex {
        Complex::from_cartesian(self.real - value, self.imaginary)
    }

    /// `value - self`
    pub fn subtract_from_real(self, value: f64) -> Complex {
        Complex::from_cartesian(value - self.real, -self.imaginary)
    }

    pub fn negate(self) -> Complex {
        Complex::from_cartesian(-self.real, -self.imaginary)
    }

    pub fn multiply(self, other: Complex) -> Complex {
        // (a + bi)(c + di) = ac - bd + (ad + cb)i
        Complex::from_cartesian(
            self.real * other.real - self.imaginary * other.imaginary,
            self.real * other.imaginary + other.real * self.imaginary,
        )
    }

    pub fn scale(self, factor: f64) -> Complex {
        Complex::from_cartesian(factor * self.real, factor * self.imaginary)
    }

    pub fn divide(self, other: Complex) -> ComplexResult<Complex> {
        if other.modulus == 0.0 {
            return Err(ComplexError::DivideByZero.logged());
        }
        // multiply by the conjugate over |other|^2, one |other| folded into
        // the divisor's components so the products stay finite
        let cos = other.real / other.modulus;
        let sin = other.imaginary / other.modulus;
        let real = (self.real * cos + self.imaginary * sin) / other.modulus;
        let imaginary = (self.imaginary * cos - self.real * sin) / other.modulus;
        Ok(Complex::from_cartesian(real, imaginary))
    }

    pub fn divide_by_real(self, value: f64) -> ComplexResult<Complex> {
        if value == 0.0 {
            return Err(ComplexError::DivideByZero.logged());
        }
        Ok(Complex::from_cartesian(self.real / value, self.imaginary / value))
    }

    /// De Moivre power. A zero base with a negative exponent follows plain
    /// floating point rules and yields non-finite components.
    pub fn power(self, exponent: i32) -> Complex {
        let scale = self.modulus.powi(exponent);
        let angle = f64::from(exponent) * self.argument;
        let real = resolver::snap_to_integer(angle.cos() * scale);
        let imaginary = resolver::snap_to_integer(angle.sin() * scale);
        Complex::from_cartesian(real, imaginary)
    }

    pub fn conjugate(self) -> Complex {
        Complex::from_cartesian(self.real, -self.imaginary)
    }

    pub fn reciprocal(self) -> ComplexResult<Complex> {
        if self.modulus == 0.0 {
            return Err(ComplexError::DivideByZero.logged());
        }
        self.conjugate().divide_by_real(self.modulus)?.divide_by_real(self.modulus)
    }

    /// Principal square root, imaginary part never negative.
    pub fn sqrt(self) -> Complex {
        let half = self.argument / 2.0;
        let root = self.modulus.sqrt();
        let real = resolver::snap_to_integer(half.cos() * root);
        let imaginary = resolver::snap_to_integer(half.sin() * root);
        Complex::from_cartesian(real, imaginary)
    }
}

impl Default for Complex {
    fn default() -> Self {
        Complex::ZERO
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, DEFAULT_EPSILON)
    }
}

impl Eq for Complex {}

fn hash_component(value: f64) -> u64 {
    let scale = 10f64.powi(HASH_DECIMALS);
    let scaled = value * scale;
    let rounded = if scaled.is_finite() { scaled.round() / scale } else { value };
    (rounded + 0.0).to_bits()
}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_component(self.real).hash(state);
        hash_component(self.imaginary).hash(state);
    }
}

impl From<f64> for Complex {
    fn from(value: f64) -> Self {
        Complex::from_real(value)
    }
}

impl TryFrom<Complex> for f64 {
    type Error = ComplexError;

    fn try_from(value: Complex) -> Result<Self, Self::Error> {
        value.to_real()
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, other: Complex) -> Complex {
        Complex::add(self, other)
    }
}

impl Add<f64> for Complex {
    type Output = Complex;

    fn add(self, other: f64) -> Complex {
        self.add_real(other)
    }
}

impl Add<Complex> for f64 {
    type Output = Complex;

    fn add(self, other: Complex) -> Complex {
        other.add_real(self)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, other: Complex) {
        *self = Complex::add(*self, other);
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, other: Complex) -> Complex {
        self.subtract(other)
    }
}

impl Sub<f64> for Complex {
    type Output = Complex;

    fn sub(self, other: f64) -> Complex {
        self.subtract_real(other)
    }
}

impl Sub<Complex> for f64 {
    type Output = Complex;

    fn sub(self, other: Complex) -> Complex {
        other.subtract_from_real(self)
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, other: Complex) {
        *self = self.subtract(other);
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        self.negate()
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, other: Complex) -> Complex {
        self.multiply(other)
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, other: f64) -> Complex {
        self.scale(other)
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;

    fn mul(self, other: Complex) -> Complex {
        other.scale(self)
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, other: Complex) {
        *self = self.multiply(other);
    }
}

impl Div for Complex {
    type Output = ComplexResult<Complex>;

    fn div(self, other: Complex) -> ComplexResult<Complex> {
        self.divide(other)
    }
}

impl Div<f64> for Complex {
    type Output = ComplexResult<Complex>;

    fn div(self, other: f64) -> ComplexResult<Complex> {
        self.divide_by_real(other)
    }
}

impl Pow<i32> for Complex {
    type Output = Complex;

    fn pow(self, exponent: i32) -> Complex {
        self.power(exponent)
    }
}

impl Inv for Complex {
    type Output = ComplexResult<Complex>;

    fn inv(self) -> ComplexResult<Complex> {
        self.reciprocal()
    }
}

impl Zero for Complex {
    fn zero() -> Self {
        Complex::ZERO
    }

    fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imaginary == 0.0
    }
}

impl One for Complex {
    fn one() -> Self {
        Complex::ONE
    }
}

impl Sum for Complex {
    fn sum<I: Iterator<Item = Complex>>(iter: I) -> Self {
        iter.fold(Complex::ZERO, Complex::add)
    }
}

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::mode::ComplexFormat;
use crate::resolver::DEFAULT_EPSILON;

pub const DEFAULT_PRECISION: u8 = 4;
const MAX_PRECISION: u8 = 15;

// Checked in order, before the general cartesian layout.
const CARTESIAN_CASES: [(f64, f64, &str); 9] = [
    (0.0, 0.0, "0"),
    (0.0, 1.0, "i"),
    (0.0, -1.0, "-i"),
    (1.0, 0.0, "1"),
    (-1.0, 0.0, "-1"),
    (1.0, 1.0, "1 + i"),
    (1.0, -1.0, "1 - i"),
    (-1.0, 1.0, "-1 + i"),
    (-1.0, -1.0, "-1 - i"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub format: Option<ComplexFormat>,
    pub precision: u8,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            format: None,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl DisplayOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn round_to(value: f64, precision: u8) -> f64 {
    let scale = 10f64.powi(i32::from(precision.min(MAX_PRECISION)));
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    (scaled.round() / scale) + 0.0
}

fn settle(value: f64) -> f64 {
    if value.abs() < DEFAULT_EPSILON { 0.0 } else { value }
}

fn is_multiple_of(angle: f64, step: f64) -> bool {
    let remainder = angle.abs() % step;
    remainder < DEFAULT_EPSILON || step - remainder < DEFAULT_EPSILON
}

impl Complex {
    /// `(re, im)` with both components rounded to `precision` decimals.
    pub fn to_display_string(&self, precision: u8) -> String {
        format!("({}, {})",
                round_to(settle(self.real()), precision),
                round_to(settle(self.imaginary()), precision))
    }

    pub fn to_display_string_as(&self, format: ComplexFormat, precision: u8) -> String {
        match format {
            ComplexFormat::Cartesian => self.cartesian_string(precision),
            ComplexFormat::Polar => self.polar_string(precision),
            ComplexFormat::Exponential => self.exponential_string(precision),
        }
    }

    pub fn to_display_string_with(&self, options: &DisplayOptions) -> String {
        match options.format {
            Some(format) => self.to_display_string_as(format, options.precision),
            None => self.to_display_string(options.precision),
        }
    }

    fn cartesian_string(&self, precision: u8) -> String {
        let re = round_to(self.real(), precision);
        let im = round_to(self.imaginary(), precision);
        if let Some((_, _, text)) = CARTESIAN_CASES.iter().find(|(r, i, _)| *r == re && *i == im) {
            return text.to_string();
        }
        if re == 0.0 {
            format!("{}i", im)
        } else if im == 0.0 {
            format!("{}", re)
        } else if im == 1.0 {
            format!("{} + i", re)
        } else if im == -1.0 {
            format!("{} - i", re)
        } else if im > 0.0 {
            format!("{} + {}i", re, im)
        } else {
            format!("{} - {}i", re, -im)
        }
    }

    fn polar_string(&self, precision: u8) -> String {
        let modulus = round_to(self.modulus(), precision);
        if modulus == 0.0 {
            return "0".to_string();
        }
        let argument = round_to(self.argument(), precision);
        let unit = modulus == 1.0;
        if is_multiple_of(self.argument(), PI) {
            if unit {
                format!("cos({})", argument)
            } else {
                format!("{}·cos({})", modulus, argument)
            }
        } else if is_multiple_of(self.argument(), FRAC_PI_2) {
            if unit {
                format!("i·sin({})", argument)
            } else {
                format!("{}i·sin({})", modulus, argument)
            }
        } else if unit {
            format!("cos({0})+i·sin({0})", argument)
        } else {
            format!("{0}[cos({1})+i·sin({1})]", modulus, argument)
        }
    }

    fn exponential_string(&self, precision: u8) -> String {
        let modulus = round_to(self.modulus(), precision);
        if modulus == 0.0 {
            return "0".to_string();
        }
        let argument = round_to(self.argument(), precision);
        if argument == 0.0 {
            return modulus.to_string();
        }
        let exponent = if argument == 1.0 { "i".to_string() } else { format!("{}i", argument) };
        if modulus == 1.0 {
            format!("e^({})", exponent)
        } else {
            format!("{}·e^({})", modulus, exponent)
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let re = settle(self.real());
        let im = settle(self.imaginary());
        match f.precision() {
            Some(precision) => {
                let precision = precision.min(usize::from(MAX_PRECISION)) as u8;
                write!(f, "({}, {})", round_to(re, precision), round_to(im, precision))
            }
            None => write!(f, "({}, {})", re, im),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::PhaseMode;

    fn cartesian(re: f64, im: f64) -> String {
        Complex::from_cartesian(re, im).to_display_string_as(ComplexFormat::Cartesian, DEFAULT_PRECISION)
    }

    #[test]
    fn test_cartesian_special_cases() {
        assert_eq!(cartesian(0.0, 0.0), "0");
        assert_eq!(cartesian(0.0, 1.0), "i");
        assert_eq!(cartesian(0.0, -1.0), "-i");
        assert_eq!(cartesian(1.0, 0.0), "1");
        assert_eq!(cartesian(-1.0, 0.0), "-1");
        assert_eq!(cartesian(1.0, 1.0), "1 + i");
        assert_eq!(cartesian(1.0, -1.0), "1 - i");
        assert_eq!(cartesian(-1.0, 1.0), "-1 + i");
        assert_eq!(cartesian(-1.0, -1.0), "-1 - i");
        assert_eq!(cartesian(1.00000001, -0.00000001), "1");
    }

    #[test]
    fn test_cartesian_general() {
        assert_eq!(cartesian(3.0, -4.0), "3 - 4i");
        assert_eq!(cartesian(-3.0, 4.0), "-3 + 4i");
        assert_eq!(cartesian(0.0, -2.5), "-2.5i");
        assert_eq!(cartesian(-7.0, 0.0), "-7");
        assert_eq!(cartesian(2.0, 1.0), "2 + i");
        assert_eq!(cartesian(2.0, -1.0), "2 - i");
        assert_eq!(cartesian(1.0 / 3.0, 2.0 / 3.0), "0.3333 + 0.6667i");
        assert_eq!(
            Complex::from_cartesian(1.0 / 3.0, -2.0).to_display_string_as(ComplexFormat::Cartesian, 1),
            "0.3 - 2i"
        );
    }

    #[test]
    fn test_polar() {
        let polar = |z: Complex| z.to_display_string_as(ComplexFormat::Polar, DEFAULT_PRECISION);
        assert_eq!(polar(Complex::from_cartesian(3.0, 4.0)), "5[cos(0.9273)+i·sin(0.9273)]");
        assert_eq!(polar(Complex::from_cartesian(5.0, 0.0)), "5·cos(0)");
        assert_eq!(polar(Complex::from_cartesian(-1.0, 0.0)), "cos(3.1416)");
        assert_eq!(polar(Complex::from_cartesian(0.0, 4.0)), "4i·sin(1.5708)");
        assert_eq!(polar(Complex::from_cartesian(0.0, -1.0)), "i·sin(4.7124)");
        assert_eq!(polar(Complex::ZERO), "0");
        let unit = Complex::from_polar(1.0, 0.5, PhaseMode::Primary).unwrap();
        assert_eq!(polar(unit), "cos(0.5)+i·sin(0.5)");
    }

    #[test]
    fn test_exponential() {
        let exponential = |z: Complex| z.to_display_string_as(ComplexFormat::Exponential, DEFAULT_PRECISION);
        assert_eq!(exponential(Complex::from_cartesian(3.0, 4.0)), "5·e^(0.9273i)");
        assert_eq!(exponential(Complex::from_cartesian(5.0, 0.0)), "5");
        assert_eq!(exponential(Complex::ONE), "1");
        assert_eq!(exponential(Complex::ZERO), "0");
        assert_eq!(exponential(Complex::I), "e^(1.5708i)");
        let z = Complex::from_polar(1.0, 1.0, PhaseMode::Primary).unwrap();
        assert_eq!(exponential(z), "e^(i)");
        let z = Complex::from_polar(2.0, 1.0, PhaseMode::Secondary).unwrap();
        assert_eq!(exponential(z), "2·e^(i)");
    }

    #[test]
    fn test_default_display() {
        assert_eq!(Complex::from_cartesian(1.5, -2.0).to_string(), "(1.5, -2)");
        assert_eq!(Complex::from_cartesian(1e-13, -1e-13).to_string(), "(0, 0)");
        assert_eq!(Complex::from_cartesian(-0.0, 3.0).to_string(), "(0, 3)");
        assert_eq!(format!("{:.2}", Complex::from_cartesian(1.0 / 3.0, 2.0)), "(0.33, 2)");
        assert_eq!(Complex::from_cartesian(1.0 / 3.0, 2.0).to_display_string(2), "(0.33, 2)");
        assert_eq!(Complex::from_cartesian(-0.00001, 1.0).to_display_string(3), "(0, 1)");
    }

    #[test]
    fn test_display_options() {
        let z = Complex::from_cartesian(3.0, 4.0);
        let options = DisplayOptions::from_json(r#"{"format": "Polar", "precision": 2}"#).unwrap();
        assert_eq!(z.to_display_string_with(&options), "5[cos(0.93)+i·sin(0.93)]");
        let options = DisplayOptions::from_json("{}").unwrap();
        assert_eq!(options, DisplayOptions::default());
        assert_eq!(Complex::from_cartesian(1.0 / 3.0, 0.5).to_display_string_with(&options), "(0.3333, 0.5)");
        assert!(DisplayOptions::from_json(r#"{"format": "Spiral"}"#).is_err());
    }
}

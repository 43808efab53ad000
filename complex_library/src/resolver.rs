//! Quadrant detection, phase resolution and floating point clean up shared by
//! every constructor of [`Complex`](crate::Complex).

use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub const DEFAULT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

/// Positive imaginary axis belongs to the first quadrant and positive real
/// axis to the fourth; the origin and the two negative half axes give `None`.
pub fn classify_quadrant(re: f64, im: f64) -> Option<Quadrant> {
    if re >= 0.0 && im > 0.0 {
        Some(Quadrant::First)
    } else if re < 0.0 && im > 0.0 {
        Some(Quadrant::Second)
    } else if re < 0.0 && im < 0.0 {
        Some(Quadrant::Third)
    } else if re > 0.0 && im <= 0.0 {
        Some(Quadrant::Fourth)
    } else {
        None
    }
}

/// Phase of `re + i·im` in `[0, 2π)`. The origin is not handled here.
pub fn resolve_phase(re: f64, im: f64, quadrant: Option<Quadrant>) -> f64 {
    if im == 0.0 && re > 0.0 {
        return 0.0;
    }
    if im == 0.0 && re < 0.0 {
        return PI;
    }
    if re == 0.0 && im > 0.0 {
        return FRAC_PI_2;
    }
    if re == 0.0 && im < 0.0 {
        return 3.0 * FRAC_PI_2;
    }
    let base = (im / re).atan();
    match quadrant {
        Some(Quadrant::First) => base,
        Some(Quadrant::Second) | Some(Quadrant::Third) => PI + base,
        Some(Quadrant::Fourth) => {
            // -ε + 2π can round up to 2π itself
            let angle = TAU + base;
            if angle < TAU { angle } else { 0.0 }
        }
        None => base,
    }
}

pub fn snap_to_integer(value: f64) -> f64 {
    snap_to_integer_with(value, DEFAULT_EPSILON)
}

pub fn snap_to_integer_with(value: f64, epsilon: f64) -> f64 {
    let nearest = value.round();
    if (nearest - value).abs() < epsilon {
        // fold -0.0
        nearest + 0.0
    } else {
        value
    }
}

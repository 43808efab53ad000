use std::f64::consts::{PI, TAU};
use serde::{Deserialize, Serialize};

/// Convention a caller-supplied phase is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseMode {
    /// `(-π, π]`
    Primary,
    /// `[0, 2π)`
    Secondary,
}

impl PhaseMode {
    pub fn contains(&self, angle: f64) -> bool {
        match self {
            PhaseMode::Primary => angle > -PI && angle <= PI,
            PhaseMode::Secondary => angle >= 0.0 && angle < TAU,
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            PhaseMode::Primary => "(-π, π]",
            PhaseMode::Secondary => "[0, 2π)",
        }
    }
}

impl std::fmt::Display for PhaseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexFormat {
    Cartesian,
    Polar,
    Exponential,
}

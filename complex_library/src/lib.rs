pub mod complex;
pub mod error;
pub mod format;
pub mod mode;
pub mod resolver;
mod roots;

pub use complex::Complex;
pub use error::{ComplexError, ComplexResult};
pub use format::{DisplayOptions, DEFAULT_PRECISION};
pub use mode::{ComplexFormat, PhaseMode};
pub use resolver::Quadrant;

//! # miragekit-eval
//!
//! Evaluation layer over a loaded benchmark.
//!
//! - **Interpolation**: metrics for a policy at any retention in [0, 1],
//!   linear between adjacent benchmark levels and clamped outside them.
//! - **Derived signals**: raw validity, per-vector contradiction flag,
//!   session mirage warning, health state, contract badge, severity bands.
//! - **Evaluator**: both policies at one retention value, in one call.

pub mod derived;
pub mod evaluator;
pub mod interpolation;

pub use derived::{raw_validity, DerivedMetricEngine};
pub use evaluator::Evaluator;
pub use interpolation::{bracket, interpolate, Bracket};

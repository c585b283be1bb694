//! Linear interpolation of benchmark metrics across the retention axis.

use miragekit_core::errors::IntegrityError;
use miragekit_core::models::{MetricVector, PolicyTable, RetentionLevels};

/// Where a retention value falls relative to the benchmark levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket {
    /// At or below the lowest level.
    ClampLow(f64),
    /// At or above the highest level.
    ClampHigh(f64),
    /// Exactly on an interior level.
    Exact(f64),
    /// Strictly between two adjacent levels, `t` in (0, 1).
    Between { lower: f64, upper: f64, t: f64 },
}

/// Locate `retention` among `levels`.
pub fn bracket(retention: f64, levels: &RetentionLevels) -> Bracket {
    let lowest = levels.lowest();
    let highest = levels.highest();
    if retention <= lowest {
        return Bracket::ClampLow(lowest);
    }
    if retention >= highest {
        return Bracket::ClampHigh(highest);
    }
    for (lower, upper) in levels.adjacent_pairs() {
        if retention == lower {
            return Bracket::Exact(lower);
        }
        if retention == upper {
            return Bracket::Exact(upper);
        }
        if lower < retention && retention < upper {
            let t = (retention - lower) / (upper - lower);
            return Bracket::Between { lower, upper, t };
        }
    }
    // Unreachable for a finite retention strictly inside [lowest, highest].
    Bracket::ClampHigh(highest)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_vector(lower: &MetricVector, upper: &MetricVector, t: f64) -> MetricVector {
    MetricVector {
        pivot_preservation_rate: lerp(
            lower.pivot_preservation_rate,
            upper.pivot_preservation_rate,
            t,
        ),
        primary_full_rate: lerp(lower.primary_full_rate, upper.primary_full_rate, t),
        decoy_full_rate: lerp(lower.decoy_full_rate, upper.decoy_full_rate, t),
        contract_satisfied_rate: match (lower.contract_satisfied_rate, upper.contract_satisfied_rate)
        {
            (Some(a), Some(b)) => Some(lerp(a, b, t)),
            _ => None,
        },
    }
}

/// Metrics for one policy at `retention`.
///
/// Clamps to the lowest/highest level outside the benchmark range and
/// interpolates each stored field independently between adjacent levels.
/// Returns a fresh vector; the table is never modified.
pub fn interpolate(
    retention: f64,
    levels: &RetentionLevels,
    table: &PolicyTable,
) -> Result<MetricVector, IntegrityError> {
    if !retention.is_finite() {
        return Err(IntegrityError::InvalidRetention { value: retention });
    }
    match bracket(retention, levels) {
        Bracket::ClampLow(level) | Bracket::ClampHigh(level) | Bracket::Exact(level) => {
            table.lookup(level).copied()
        }
        Bracket::Between { lower, upper, t } => {
            let lo = table.lookup(lower)?;
            let hi = table.lookup(upper)?;
            Ok(lerp_vector(lo, hi, t))
        }
    }
}

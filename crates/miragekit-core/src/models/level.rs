//! Benchmark retention levels and their table-key representation.

use serde::Serialize;

use crate::errors::IntegrityError;

/// Canonical table key for a retention level.
///
/// Stored keys always carry a decimal point, so an integral level renders
/// with a trailing `.0` (`1` → `"1.0"`), while `0.2` stays `"0.2"`.
/// Negative zero shares the `"0.0"` key.
pub fn level_key(level: f64) -> String {
    let mut key = (level + 0.0).to_string();
    if !key.contains('.') {
        key.push_str(".0");
    }
    key
}

/// Non-empty, ascending, de-duplicated set of benchmark retention fractions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RetentionLevels(Vec<f64>);

impl RetentionLevels {
    /// Build a level set from fixture order. Input may arrive unsorted; it is
    /// sorted here so every consumer sees ascending levels.
    pub fn new(mut levels: Vec<f64>) -> Result<Self, IntegrityError> {
        if levels.is_empty() {
            return Err(IntegrityError::EmptyLevels);
        }
        if let Some(&bad) = levels
            .iter()
            .find(|l| !l.is_finite() || !(0.0..=1.0).contains(*l))
        {
            return Err(IntegrityError::LevelOutOfRange { level: bad });
        }
        for level in &mut levels {
            *level += 0.0;
        }
        levels.sort_by(f64::total_cmp);
        levels.dedup();
        Ok(Self(levels))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Lowest level. The set is never empty.
    pub fn lowest(&self) -> f64 {
        self.0[0]
    }

    /// Highest level. The set is never empty.
    pub fn highest(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Adjacent `(lower, upper)` pairs in ascending order.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_levels_gain_a_decimal_point() {
        assert_eq!(level_key(1.0), "1.0");
        assert_eq!(level_key(0.0), "0.0");
        assert_eq!(level_key(0.2), "0.2");
        assert_eq!(level_key(0.65), "0.65");
    }

    #[test]
    fn levels_are_sorted_and_deduplicated() {
        let levels = RetentionLevels::new(vec![1.0, 0.2, 0.8, 0.5, 0.8]).unwrap();
        assert_eq!(levels.as_slice(), &[0.2, 0.5, 0.8, 1.0]);
        assert_eq!(levels.lowest(), 0.2);
        assert_eq!(levels.highest(), 1.0);
        assert_eq!(levels.adjacent_pairs().count(), 3);
    }

    #[test]
    fn empty_or_out_of_range_levels_are_rejected() {
        assert_eq!(RetentionLevels::new(vec![]), Err(IntegrityError::EmptyLevels));
        assert!(matches!(
            RetentionLevels::new(vec![0.2, 1.5]),
            Err(IntegrityError::LevelOutOfRange { level }) if level == 1.5
        ));
        assert!(RetentionLevels::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn negative_zero_is_the_zero_level() {
        assert_eq!(level_key(-0.0), "0.0");
        let levels = RetentionLevels::new(vec![0.0, -0.0, 1.0]).unwrap();
        assert_eq!(levels.len(), 2);
        assert!(levels.lowest().is_sign_positive());
    }
}

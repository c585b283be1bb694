//! Identifier naming conventions: `<prefix>_...` or `<prefix>-...`, case-insensitive.

use regex::{Regex, RegexBuilder};

/// A compiled set of id prefixes that mark a chunk's role.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    prefixes: Vec<String>,
    /// `None` when no prefixes are configured; such a convention matches nothing.
    pattern: Option<Regex>,
}

impl NamingConvention {
    /// Compile `prefixes` into one anchored, case-insensitive pattern.
    /// Prefixes are matched literally; regex metacharacters carry no meaning.
    pub fn new<S: AsRef<str>>(prefixes: &[S]) -> Result<Self, regex::Error> {
        let prefixes: Vec<String> = prefixes
            .iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        let pattern = if prefixes.is_empty() {
            None
        } else {
            let alternation = prefixes
                .iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = RegexBuilder::new(&format!("^(?:{alternation})[_-]"))
                .case_insensitive(true)
                .build()?;
            Some(pattern)
        };
        Ok(Self { prefixes, pattern })
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn matches(&self, id: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_requires_separator() {
        let convention = NamingConvention::new(&["hc", "pred"]).unwrap();
        assert!(convention.matches("hc_003"));
        assert!(convention.matches("HC-7"));
        assert!(convention.matches("Pred_x"));
        assert!(!convention.matches("hcx_1"));
        assert!(!convention.matches("hc"));
        assert!(!convention.matches("x_hc_1"));
    }

    #[test]
    fn prefixes_are_literal() {
        let convention = NamingConvention::new(&["a.b"]).unwrap();
        assert!(convention.matches("a.b_1"));
        assert!(!convention.matches("axb_1"));
    }

    #[test]
    fn empty_prefix_list_matches_nothing() {
        let convention = NamingConvention::new::<&str>(&[]).unwrap();
        assert!(!convention.matches("_1"));
        assert!(!convention.matches("n_1"));
        assert!(convention.prefixes().is_empty());
    }
}

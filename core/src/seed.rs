use core::fmt;
use serde::{Deserialize, Serialize};

/// Opaque seed string controlling mine placement.
///
/// Canonical form is `<base>-<iteration>`: the deterministic layout depends
/// only on `base`, while `iteration` counts how many times the same layout
/// has been retried (1 for a fresh game). Callers may also supply a bare
/// string such as `"abc"`, which parses as iteration 1.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(String);

impl Seed {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Mints a fresh random seed at iteration 1.
    pub fn generate() -> Self {
        use rand::RngExt;
        let base: u32 = rand::rng().random();
        Self(format!("{base:08x}-1"))
    }

    /// The layout-determining part of the seed.
    pub fn base(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Retry ordinal carried in the seed suffix; 1 when absent or malformed.
    pub fn iteration(&self) -> u32 {
        self.0
            .splitn(2, '-')
            .nth(1)
            .and_then(|suffix| suffix.parse().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(1)
    }

    /// Same layout, next retry ordinal.
    pub fn next_iteration(&self) -> Seed {
        Seed(format!("{}-{}", self.base(), self.iteration() + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Seed {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_seed_parses_as_iteration_one() {
        let seed = Seed::new("abc");
        assert_eq!(seed.base(), "abc");
        assert_eq!(seed.iteration(), 1);
    }

    #[test]
    fn suffixed_seed_splits_base_and_iteration() {
        let seed = Seed::new("c0ffee12-3");
        assert_eq!(seed.base(), "c0ffee12");
        assert_eq!(seed.iteration(), 3);
    }

    #[test]
    fn next_iteration_keeps_the_base() {
        let seed = Seed::new("abc");
        let retried = seed.next_iteration();
        assert_eq!(retried.as_str(), "abc-2");
        assert_eq!(retried.base(), seed.base());
        assert_eq!(retried.next_iteration().iteration(), 3);
    }

    #[test]
    fn malformed_suffix_falls_back_to_one() {
        assert_eq!(Seed::new("abc-").iteration(), 1);
        assert_eq!(Seed::new("abc-x").iteration(), 1);
        assert_eq!(Seed::new("abc-0").iteration(), 1);
    }

    #[test]
    fn generated_seeds_are_canonical() {
        let seed = Seed::generate();
        assert_eq!(seed.iteration(), 1);
        assert_eq!(seed.base().len(), 8);
        assert!(seed.base().chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn serializes_as_the_raw_string() {
        let json = serde_json::to_string(&Seed::new("abc-2")).unwrap();
        assert_eq!(json, "\"abc-2\"");
        let back: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Seed::new("abc-2"));
    }
}

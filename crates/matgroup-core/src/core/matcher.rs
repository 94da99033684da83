use crate::core::models::composition::Composition;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// The pairwise structural-fit capability.
///
/// Geometric structure matching (lattice, site, and angle alignment under
/// tolerances) is supplied by an external backend; this crate only requires
/// a symmetric yes/no fit test between two structure payloads. Closures
/// implement the trait directly, so a backend can be plugged in without a
/// wrapper type.
pub trait StructureMatcher<S> {
    /// Returns true when the two structures are equivalent under the
    /// matcher's tolerances. Implementations must be symmetric.
    fn fit(&self, a: &S, b: &S) -> bool;
}

impl<S, F> StructureMatcher<S> for F
where
    F: Fn(&S, &S) -> bool,
{
    fn fit(&self, a: &S, b: &S) -> bool {
        self(a, b)
    }
}

#[derive(Debug, Error)]
pub enum MatcherConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Tolerances and species handling for the structural-fit predicate.
///
/// The numeric fields are forwarded verbatim to the matching backend; the
/// defaults are the conventional values for primitive-cell matching of
/// database entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Fractional length tolerance.
    pub ltol: f64,
    /// Site position tolerance, normalized by the average free length.
    pub stol: f64,
    /// Angle tolerance in degrees.
    pub angle_tol: f64,
    /// Species removed from both structures before comparison, e.g. mobile
    /// ions in an electrode framework.
    pub ignored_species: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            ltol: 0.2,
            stol: 0.3,
            angle_tol: 5.0,
            ignored_species: Vec::new(),
        }
    }
}

impl MatcherConfig {
    /// Loads a configuration from a TOML file; absent keys keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, MatcherConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| MatcherConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| MatcherConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

/// A purely compositional fit test.
///
/// Two entries fit when their compositions reduce to the same formula after
/// the ignored species are removed. This carries no geometric information
/// and is the fallback comparator for runs without an external structure
/// backend; within a framework bucket it groups all entries together.
#[derive(Debug, Clone, Default)]
pub struct CompositionMatcher {
    ignored_species: Vec<String>,
}

impl CompositionMatcher {
    pub fn new(ignored_species: Vec<String>) -> Self {
        Self { ignored_species }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.ignored_species.clone())
    }
}

impl StructureMatcher<Composition> for CompositionMatcher {
    fn fit(&self, a: &Composition, b: &Composition) -> bool {
        a.without(&self.ignored_species).reduced_formula()
            == b.without(&self.ignored_species).reduced_formula()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_tolerances_match_the_conventional_values() {
        let config = MatcherConfig::default();
        assert_eq!(config.ltol, 0.2);
        assert_eq!(config.stol, 0.3);
        assert_eq!(config.angle_tol, 5.0);
        assert!(config.ignored_species.is_empty());
    }

    #[test]
    fn load_reads_partial_toml_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matcher.toml");
        fs::write(
            &path,
            r#"
            stol = 0.5
            ignored_species = ["Li", "Mg"]
            "#,
        )
        .unwrap();

        let config = MatcherConfig::load(&path).unwrap();
        assert_eq!(config.ltol, 0.2);
        assert_eq!(config.stol, 0.5);
        assert_eq!(
            config.ignored_species,
            vec!["Li".to_string(), "Mg".to_string()]
        );
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = MatcherConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(MatcherConfigError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = MatcherConfig::load(&path);
        assert!(matches!(result, Err(MatcherConfigError::Toml { .. })));
    }

    #[test]
    fn closures_are_matchers() {
        let always = |_: &i32, _: &i32| true;
        assert!(always.fit(&1, &2));
    }

    #[test]
    fn composition_matcher_ignores_the_configured_species() {
        let matcher = CompositionMatcher::new(vec!["Li".to_string()]);
        let lithiated = Composition::from_formula("LiFePO4").unwrap();
        let empty_host = Composition::from_formula("FePO4").unwrap();
        let other = Composition::from_formula("FeO").unwrap();
        assert!(matcher.fit(&lithiated, &empty_host));
        assert!(matcher.fit(&lithiated, &lithiated));
        assert!(!matcher.fit(&lithiated, &other));
    }
}

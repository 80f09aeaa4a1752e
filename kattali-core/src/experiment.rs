//! Sticky A/B variant assignment.
//!
//! A visitor is bucketed once per experiment; the choice is written to a [`VariantStore`]
//! under `ab_test_<experiment key>` and returned unchanged on every later call, as long as
//! it is still one of the experiment's variants. Randomness is supplied by the caller so
//! assignments are reproducible under a seeded RNG.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const STORAGE_PREFIX: &str = "ab_test_";

/// Key-value persistence for assignments (one namespace per visitor).
pub trait VariantStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn keys(&self) -> Vec<String>;
}

pub fn storage_key(test_key: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, test_key)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experiment {
    pub key: String,
    pub variants: Vec<String>,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

impl Experiment {
    pub fn new(key: &str, variants: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
            weights: None,
        }
    }

    pub fn with_weights(mut self, weights: &[f64]) -> Self {
        self.weights = Some(weights.to_vec());
        self
    }

    pub fn hero_cta() -> Self {
        Self::new("hero_cta", &["explore_products", "get_quote"]).with_weights(&[0.5, 0.5])
    }

    pub fn pricing_display() -> Self {
        Self::new("pricing_display", &["table", "cards"]).with_weights(&[0.6, 0.4])
    }

    pub fn builtin() -> Vec<Self> {
        vec![Self::hero_cta(), Self::pricing_display()]
    }

    pub fn has_variant(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }

    /// Draws a fresh variant. Weights apply only when there is exactly one per variant;
    /// unusable weights (all zero, negative, NaN) fall back to the first variant.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.variants.is_empty() {
            return None;
        }

        match &self.weights {
            Some(weights) if weights.len() == self.variants.len() => {
                match WeightedIndex::new(weights) {
                    Ok(dist) => Some(self.variants[dist.sample(rng)].as_str()),
                    Err(e) => {
                        tracing::warn!("Experiment {} has unusable weights: {}", self.key, e);
                        Some(self.variants[0].as_str())
                    }
                }
            }
            _ => self.variants.choose(rng).map(String::as_str),
        }
    }
}

/// Returns the visitor's variant for `experiment`, assigning and storing one if needed.
pub fn assign_variant<R: Rng + ?Sized>(
    store: &dyn VariantStore,
    rng: &mut R,
    experiment: &Experiment,
) -> Option<String> {
    let key = storage_key(&experiment.key);

    if let Some(existing) = store.get(&key) {
        if experiment.has_variant(&existing) {
            return Some(existing);
        }
    }

    let chosen = experiment.choose(rng)?.to_string();
    store.set(&key, &chosen);
    tracing::debug!("Assigned experiment {} variant {}", experiment.key, chosen);
    Some(chosen)
}

pub fn is_variant(store: &dyn VariantStore, test_key: &str, variant: &str) -> bool {
    store.get(&storage_key(test_key)).as_deref() == Some(variant)
}

/// Pins an assignment, e.g. for QA sessions.
pub fn force_variant(store: &dyn VariantStore, test_key: &str, variant: &str) {
    store.set(&storage_key(test_key), variant);
}

/// Drops every experiment assignment, leaving unrelated keys alone. Returns how many went.
pub fn clear_assignments(store: &dyn VariantStore) -> usize {
    let keys: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|k| k.starts_with(STORAGE_PREFIX))
        .collect();
    for key in &keys {
        store.remove(key);
    }
    keys.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<String, String>>);

    impl VariantStore for MapStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
        }
        fn remove(&self, key: &str) {
            self.0.lock().unwrap().remove(key);
        }
        fn keys(&self) -> Vec<String> {
            self.0.lock().unwrap().keys().cloned().collect()
        }
    }

    #[test]
    fn test_assignment_is_sticky() {
        let store = MapStore::default();
        let mut rng = StdRng::seed_from_u64(7);
        let experiment = Experiment::hero_cta();

        let first = assign_variant(&store, &mut rng, &experiment).unwrap();
        assert!(experiment.has_variant(&first));
        for _ in 0..20 {
            assert_eq!(assign_variant(&store, &mut rng, &experiment).unwrap(), first);
        }
        assert!(is_variant(&store, "hero_cta", &first));
        assert_eq!(store.get("ab_test_hero_cta"), Some(first));
    }

    #[test]
    fn test_stale_assignment_is_replaced() {
        let store = MapStore::default();
        let mut rng = StdRng::seed_from_u64(1);
        force_variant(&store, "pricing_display", "carousel");

        let assigned = assign_variant(&store, &mut rng, &Experiment::pricing_display()).unwrap();
        assert!(assigned == "table" || assigned == "cards");
        assert!(!is_variant(&store, "pricing_display", "carousel"));
    }

    #[test]
    fn test_forced_variant_wins() {
        let store = MapStore::default();
        let mut rng = StdRng::seed_from_u64(3);
        force_variant(&store, "hero_cta", "get_quote");
        for _ in 0..10 {
            assert_eq!(
                assign_variant(&store, &mut rng, &Experiment::hero_cta()).as_deref(),
                Some("get_quote")
            );
        }
    }

    #[test]
    fn test_weights_bias_selection() {
        let experiment = Experiment::new("skewed", &["a", "b"]).with_weights(&[0.9, 0.1]);
        let mut rng = StdRng::seed_from_u64(42);
        let a_count = (0..2000)
            .filter(|_| experiment.choose(&mut rng) == Some("a"))
            .count();
        assert!(a_count > 1600, "a chosen {} times", a_count);
    }

    #[test]
    fn test_weight_edge_cases() {
        let mut rng = StdRng::seed_from_u64(9);

        let zero = Experiment::new("zero", &["first", "second"]).with_weights(&[0.0, 0.0]);
        assert_eq!(zero.choose(&mut rng), Some("first"));

        // Mismatched weight count falls back to uniform choice
        let mismatched = Experiment::new("mismatch", &["x", "y", "z"]).with_weights(&[1.0]);
        let picked = mismatched.choose(&mut rng).unwrap();
        assert!(mismatched.has_variant(picked));

        let empty = Experiment::new("empty", &[]);
        let store = MapStore::default();
        assert_eq!(assign_variant(&store, &mut rng, &empty), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_clear_only_touches_experiment_keys() {
        let store = MapStore::default();
        force_variant(&store, "hero_cta", "get_quote");
        force_variant(&store, "pricing_display", "cards");
        store.set("kattali-ui-store", "{}");

        assert_eq!(clear_assignments(&store), 2);
        assert_eq!(store.keys(), vec!["kattali-ui-store".to_string()]);
    }
}

use kattali_core::experiment::VariantStore;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

/// Process-local `VariantStore`. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryVariantStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryVariantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VariantStore for InMemoryVariantStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect()
    }
}

pub const DEFAULT_MAX_VISITORS: usize = 10_000;

/// One `InMemoryVariantStore` per visitor id, created on first use.
///
/// Holds at most `capacity` visitors. Past that the earliest-seen visitor is dropped and
/// will be bucketed afresh on their next request.
#[derive(Debug)]
pub struct VisitorVariantStores {
    capacity: usize,
    visitors: Mutex<Visitors>,
}

#[derive(Debug, Default)]
struct Visitors {
    stores: HashMap<String, Arc<InMemoryVariantStore>>,
    arrival: VecDeque<String>,
}

impl Default for VisitorVariantStores {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_VISITORS)
    }
}

impl VisitorVariantStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            visitors: Mutex::new(Visitors::default()),
        }
    }

    pub fn for_visitor(&self, visitor_id: &str) -> Arc<InMemoryVariantStore> {
        let mut visitors = self
            .visitors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(store) = visitors.stores.get(visitor_id) {
            return store.clone();
        }

        while visitors.stores.len() >= self.capacity {
            let Some(oldest) = visitors.arrival.pop_front() else {
                break;
            };
            visitors.stores.remove(&oldest);
            tracing::debug!("Evicted experiment assignments for visitor {}", oldest);
        }

        let store = Arc::new(InMemoryVariantStore::new());
        visitors.stores.insert(visitor_id.to_string(), store.clone());
        visitors.arrival.push_back(visitor_id.to_string());
        store
    }

    pub fn visitor_count(&self) -> usize {
        self.visitors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .stores
            .len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kattali_core::experiment::{assign_variant, clear_assignments, Experiment};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_store_roundtrip() {
        let store = InMemoryVariantStore::new();
        assert_eq!(store.get("ab_test_hero_cta"), None);

        store.set("ab_test_hero_cta", "get_quote");
        assert_eq!(store.get("ab_test_hero_cta").as_deref(), Some("get_quote"));
        assert_eq!(store.keys(), vec!["ab_test_hero_cta".to_string()]);

        store.remove("ab_test_hero_cta");
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_visitors_are_isolated() {
        let stores = VisitorVariantStores::new();
        stores.for_visitor("v-1").set("ab_test_hero_cta", "get_quote");

        assert_eq!(
            stores.for_visitor("v-1").get("ab_test_hero_cta").as_deref(),
            Some("get_quote")
        );
        assert_eq!(stores.for_visitor("v-2").get("ab_test_hero_cta"), None);
        assert_eq!(stores.visitor_count(), 2);
    }

    #[test]
    fn test_visitor_map_is_bounded() {
        let stores = VisitorVariantStores::with_capacity(3);
        stores.for_visitor("v-1").set("ab_test_hero_cta", "get_quote");
        for id in 0..50_000 {
            stores.for_visitor(&format!("drive-by-{}", id));
        }

        assert_eq!(stores.visitor_count(), 3);
        assert_eq!(stores.for_visitor("v-1").get("ab_test_hero_cta"), None);
    }

    #[test]
    fn test_returning_visitor_keeps_store_within_capacity() {
        let stores = VisitorVariantStores::with_capacity(2);
        stores.for_visitor("v-1").set("ab_test_hero_cta", "get_quote");
        stores.for_visitor("v-2");
        stores.for_visitor("v-1");

        assert_eq!(stores.visitor_count(), 2);
        assert_eq!(
            stores.for_visitor("v-1").get("ab_test_hero_cta").as_deref(),
            Some("get_quote")
        );
        assert_eq!(VisitorVariantStores::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_assignment_through_store() {
        let store = InMemoryVariantStore::new();
        let mut rng = StdRng::seed_from_u64(11);
        let experiment = Experiment::pricing_display();

        let first = assign_variant(&store, &mut rng, &experiment).unwrap();
        let second = assign_variant(&store, &mut rng, &experiment).unwrap();
        assert_eq!(first, second);
        assert_eq!(clear_assignments(&store), 1);
    }
}

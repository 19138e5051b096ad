//! Ordered, keyed collection of registered breakpoints.
//!
//! Pure domain logic - the host width is always passed in.

use crate::breakpoint::Breakpoint;
use crate::error::{BreakpointError, BreakpointResult};
use std::collections::HashMap;
use std::sync::Arc;

/// All live breakpoints, both by key and sorted by descending width.
///
/// The two views always have identical membership.
#[derive(Debug, Default)]
pub struct BreakpointRegistry {
    by_key: HashMap<String, Arc<Breakpoint>>,
    ordered: Vec<Arc<Breakpoint>>,
}

impl BreakpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a breakpoint. Fails without side effects if the key is taken.
    pub fn add(
        &mut self,
        breakpoint: impl Into<Arc<Breakpoint>>,
    ) -> BreakpointResult<Arc<Breakpoint>> {
        let breakpoint = breakpoint.into();
        if self.by_key.contains_key(breakpoint.key()) {
            return Err(BreakpointError::duplicate(breakpoint.key()));
        }

        self.by_key
            .insert(breakpoint.key().to_string(), Arc::clone(&breakpoint));
        self.ordered.push(Arc::clone(&breakpoint));
        // total_cmp keeps NaN widths from breaking the sort.
        self.ordered.sort_by(|a, b| b.width().total_cmp(&a.width()));

        tracing::debug!(
            key = breakpoint.key(),
            width = breakpoint.width(),
            "breakpoint added"
        );
        Ok(breakpoint)
    }

    /// Unregister a breakpoint by key.
    pub fn remove(&mut self, key: &str) -> BreakpointResult<Arc<Breakpoint>> {
        let breakpoint = self
            .by_key
            .remove(key)
            .ok_or_else(|| BreakpointError::not_found(key))?;
        self.ordered.retain(|entry| !Arc::ptr_eq(entry, &breakpoint));

        tracing::debug!(key, "breakpoint removed");
        Ok(breakpoint)
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Breakpoint>> {
        self.by_key.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Apply `f` to every breakpoint, largest width first.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&Arc<Breakpoint>),
    {
        for breakpoint in &self.ordered {
            f(breakpoint);
        }
    }

    /// Iterate in descending width order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Breakpoint>> {
        self.ordered.iter()
    }

    /// Cloned handles in descending width order.
    pub fn snapshot(&self) -> Vec<Arc<Breakpoint>> {
        self.ordered.clone()
    }

    /// The widest breakpoint that fits into `viewport_width`, if any.
    pub fn current(&self, viewport_width: f64) -> Option<Arc<Breakpoint>> {
        self.ordered
            .iter()
            .find(|breakpoint| breakpoint.is_active_at(viewport_width))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrap() -> BreakpointRegistry {
        let mut registry = BreakpointRegistry::new();
        let unordered = [
            ("md", 768.0),
            ("xs", 1.0),
            ("xl", 1200.0),
            ("sm", 576.0),
            ("lg", 992.0),
        ];
        for (key, width) in unordered {
            registry.add(Breakpoint::new(key, width)).unwrap();
        }
        registry
    }

    fn keys(registry: &BreakpointRegistry) -> Vec<String> {
        registry.iter().map(|b| b.key().to_string()).collect()
    }

    #[test]
    fn test_sorted_descending() {
        let registry = bootstrap();
        assert_eq!(keys(&registry), ["xl", "lg", "md", "sm", "xs"]);

        let widths: Vec<f64> = registry.iter().map(|b| b.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut registry = bootstrap();
        let err = registry.add(Breakpoint::new("sm", 600.0)).unwrap_err();

        assert_eq!(err, BreakpointError::DuplicateKey { key: "sm".to_string() });
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("sm").unwrap().width(), 576.0);
    }

    #[test]
    fn test_remove() {
        let mut registry = bootstrap();
        let removed = registry.remove("md").unwrap();
        assert_eq!(removed.key(), "md");

        assert!(!registry.contains("md"));
        assert_eq!(keys(&registry), ["xl", "lg", "sm", "xs"]);

        let err = registry.remove("md").unwrap_err();
        assert_eq!(err, BreakpointError::NotFound { key: "md".to_string() });
    }

    #[test]
    fn test_current_resolution() {
        let registry = bootstrap();

        assert_eq!(registry.current(600.0).unwrap().key(), "sm");
        assert_eq!(registry.current(768.0).unwrap().key(), "md");
        assert_eq!(registry.current(5000.0).unwrap().key(), "xl");
        assert_eq!(registry.current(1.0).unwrap().key(), "xs");
        assert!(registry.current(0.0).is_none());
    }

    #[test]
    fn test_current_skips_removed() {
        let mut registry = bootstrap();
        registry.remove("sm").unwrap();
        assert_eq!(registry.current(600.0).unwrap().key(), "xs");
    }

    #[test]
    fn test_equal_widths_do_not_crash() {
        let mut registry = BreakpointRegistry::new();
        registry.add(Breakpoint::new("a", 500.0)).unwrap();
        registry.add(Breakpoint::new("b", 500.0)).unwrap();
        registry.add(Breakpoint::new("c", 900.0)).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.iter().next().unwrap().key(), "c");
        let current = registry.current(600.0).unwrap();
        assert!(current.key() == "a" || current.key() == "b");
    }

    #[test]
    fn test_nan_width_never_current() {
        let mut registry = BreakpointRegistry::new();
        registry.add(Breakpoint::new("nan", f64::NAN)).unwrap();
        registry.add(Breakpoint::new("sm", 576.0)).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.current(600.0).unwrap().key(), "sm");
    }

    #[test]
    fn test_each_visits_in_order() {
        let registry = bootstrap();
        let mut seen = Vec::new();
        registry.each(|b| seen.push(b.key().to_string()));
        assert_eq!(seen, keys(&registry));
    }

    #[test]
    fn test_views_stay_consistent() {
        let mut registry = bootstrap();
        registry.remove("xl").unwrap();
        registry.add(Breakpoint::new("xxl", 1400.0)).unwrap();
        let _ = registry.add(Breakpoint::new("lg", 1.0));

        assert_eq!(registry.len(), registry.by_key.len());
        for breakpoint in registry.iter() {
            assert!(Arc::ptr_eq(breakpoint, registry.get(breakpoint.key()).unwrap()));
        }
    }
}

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

use investor_common::{InvestorError, KeySelection, Result};

/// Read-only pool of API keys with a per-call selection policy.
#[derive(Debug)]
pub struct KeyPool {
    keys: Vec<String>,
    selection: KeySelection,
    cursor: AtomicUsize,
}

impl KeyPool {
    pub fn new(keys: Vec<String>, selection: KeySelection) -> Result<Self> {
        if keys.is_empty() {
            return Err(InvestorError::Config("API key pool is empty".to_string()));
        }
        Ok(Self {
            keys,
            selection,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Draw the key for the next call.
    pub fn next_key(&self) -> &str {
        let index = match self.selection {
            KeySelection::Random => rand::rng().random_range(0..self.keys.len()),
            KeySelection::RoundRobin => self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len(),
        };
        &self.keys[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("key-{i}")).collect()
    }

    #[test]
    fn empty_pool_is_a_config_error() {
        assert!(matches!(
            KeyPool::new(Vec::new(), KeySelection::Random),
            Err(InvestorError::Config(_))
        ));
    }

    #[test]
    fn round_robin_cycles_in_order() {
        let pool = KeyPool::new(keys(3), KeySelection::RoundRobin).unwrap();
        let drawn: Vec<&str> = (0..4).map(|_| pool.next_key()).collect();
        assert_eq!(drawn, vec!["key-0", "key-1", "key-2", "key-0"]);
    }

    #[test]
    fn random_draws_stay_in_pool() {
        let pool = KeyPool::new(keys(4), KeySelection::Random).unwrap();
        let valid: HashSet<String> = keys(4).into_iter().collect();
        for _ in 0..200 {
            assert!(valid.contains(pool.next_key()));
        }
    }

    #[test]
    fn single_key_pool_always_returns_it() {
        let pool = KeyPool::new(keys(1), KeySelection::Random).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.next_key(), "key-0");
    }
}

use std::collections::HashMap;
use std::hash::Hash;

/// Running frequency table over discrete values.
#[derive(Clone, Debug, PartialEq)]
pub struct Multinomial<K: Eq + Hash + Clone> {
    counts: HashMap<K, f64>,
    total: f64,
}

impl<K: Eq + Hash + Clone> Default for Multinomial<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> Multinomial<K> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0.0,
        }
    }

    pub fn update(&mut self, key: &K) {
        *self.counts.entry(key.clone()).or_insert(0.0) += 1.0;
        self.total += 1.0;
    }

    pub fn merge(&mut self, other: &Multinomial<K>) {
        for (key, count) in &other.counts {
            *self.counts.entry(key.clone()).or_insert(0.0) += count;
        }
        self.total += other.total;
    }

    /// Removes the counts of `other`, which must be a subset of `self`.
    /// Keys whose count drops to zero are forgotten.
    pub fn subtract(&mut self, other: &Multinomial<K>) {
        for (key, count) in &other.counts {
            if let Some(own) = self.counts.get_mut(key) {
                *own -= count;
                if *own <= 0.0 {
                    self.counts.remove(key);
                }
            }
        }
        self.total = self.counts.values().sum();
    }

    pub fn count(&self, key: &K) -> f64 {
        self.counts.get(key).copied().unwrap_or(0.0)
    }

    pub fn pmf(&self, key: &K) -> f64 {
        if self.total == 0.0 {
            return 0.0;
        }
        self.count(key) / self.total
    }

    /// Number of distinct observed values.
    pub fn n_values(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn mode(&self) -> Option<&K> {
        self.counts
            .iter()
            .max_by(|(_, c1), (_, c2)| c1.total_cmp(c2))
            .map(|(key, _)| key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.counts.iter().map(|(key, &count)| (key, count))
    }
}

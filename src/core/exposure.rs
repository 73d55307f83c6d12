//! Share exposure maps and the errors resolution can produce

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExposureError {
    #[error("Fund '{0}' was not found")]
    NotFound(String),

    #[error("Cyclic holdings detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Aggregated exposure of a root fund to each leaf share, keyed by share name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExposureMap {
    weights: HashMap<String, f64>,
}

impl ExposureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the share's running exposure, starting from zero.
    pub fn add_exposure(&mut self, share: &str, amount: f64) {
        match self.weights.get_mut(share) {
            Some(weight) => *weight += amount,
            None => {
                self.weights.insert(share.to_string(), amount);
            }
        }
    }

    /// Merges every entry of `other`, multiplied by `scale`, into this map.
    pub fn merge_scaled(&mut self, other: &ExposureMap, scale: f64) {
        for (share, weight) in &other.weights {
            self.add_exposure(share, weight * scale);
        }
    }

    pub fn get(&self, share: &str) -> Option<f64> {
        self.weights.get(share).copied()
    }

    pub fn contains(&self, share: &str) -> bool {
        self.weights.contains_key(share)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Share names in lexical order.
    pub fn shares(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.weights.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Entries sorted by exposure descending, ties broken by name.
    pub fn sorted_by_weight(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|(a_name, a), (b_name, b)| b.total_cmp(a).then_with(|| a_name.cmp(b_name)));
        entries
    }
}

impl FromIterator<(String, f64)> for ExposureMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut map = ExposureMap::new();
        for (share, amount) in iter {
            map.add_exposure(&share, amount);
        }
        map
    }
}

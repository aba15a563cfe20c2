//! Measurement histograms and execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A measurement histogram: bitstring → observed count.
///
/// Keys are strings over the measured classical bits, character `i` being
/// bit `i` (leftmost first). Outcomes that were never observed are simply
/// absent; the sum of counts equals the shot count of the producing job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self(FxHashMap::default())
    }

    /// Add observations for a bitstring.
    ///
    /// Accumulates: inserting the same key twice sums the counts.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Get the count for a bitstring (zero if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the histogram is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (bitstring, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequently observed outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// All outcomes sorted by descending count.
    ///
    /// Ties break lexicographically so the ordering is deterministic.
    pub fn sorted_by_count(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<_> = self.0.iter().map(|(k, &v)| (k.clone(), v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

/// The result of executing a circuit on a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement histogram.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Backend-reported execution time in milliseconds, if the backend
    /// provides one. Callers fall back to their own wall-clock measurement
    /// when this is `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<f64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach a backend-reported execution time in milliseconds.
    #[must_use]
    pub fn with_execution_time(mut self, millis: f64) -> Self {
        self.execution_time_ms = Some(millis);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 1);
        counts.insert("01", 1);
        counts.insert("10", 5);

        assert_eq!(counts.get("01"), 2);
        assert_eq!(counts.get("10"), 5);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent() {
        let mut counts = Counts::new();
        counts.insert("00", 10);
        counts.insert("11", 30);
        counts.insert("01", 5);

        assert_eq!(counts.most_frequent(), Some(("11", 30)));
    }

    #[test]
    fn test_sorted_by_count_is_descending_and_deterministic() {
        let mut counts = Counts::new();
        counts.insert("10", 4);
        counts.insert("01", 4);
        counts.insert("11", 9);

        let sorted = counts.sorted_by_count();
        assert_eq!(sorted[0].0, "11");
        // equal counts break lexicographically
        assert_eq!(sorted[1].0, "01");
        assert_eq!(sorted[2].0, "10");
    }

    #[test]
    fn test_execution_result() {
        let mut counts = Counts::new();
        counts.insert("0", 100);
        let result = ExecutionResult::new(counts, 100).with_execution_time(12.5);

        assert_eq!(result.shots, 100);
        assert_eq!(result.execution_time_ms, Some(12.5));
    }
}

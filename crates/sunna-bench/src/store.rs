//! Persisted runtime sequences, one JSON file per benchmark point.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Compose the run identifier for one benchmark point.
///
/// Format: `<problem>-<backend>-size-<zero-padded-size>-p<depth>`.
pub fn run_id(problem: &str, backend: &str, size: usize, p: usize) -> String {
    format!("{problem}-{backend}-size-{size:02}-p{p}")
}

/// A directory of per-run runtime files.
pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    /// Open (creating if needed) a store at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path(&self, run_id: &str) -> PathBuf {
        self.dir.join(format!("{run_id}.json"))
    }

    /// Whether this benchmark point has already been recorded.
    pub fn exists(&self, run_id: &str) -> bool {
        self.path(run_id).is_file()
    }

    /// Persist the runtime sequence for a run.
    pub fn save(&self, run_id: &str, runtimes_ms: &[f64]) -> anyhow::Result<()> {
        let path = self.path(run_id);
        let json = serde_json::to_string_pretty(runtimes_ms)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Load the runtime sequence of a recorded run.
    pub fn load(&self, run_id: &str) -> anyhow::Result<Vec<f64>> {
        let path = self.path(run_id);
        let json =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store() -> RunStore {
        let dir = std::env::temp_dir().join(format!("sunna-bench-test-{}", std::process::id()));
        RunStore::new(dir).unwrap()
    }

    #[test]
    fn test_run_id_format() {
        assert_eq!(run_id("maxcut", "aer", 5, 1), "maxcut-aer-size-05-p1");
        assert_eq!(
            run_id("tsp", "ibm:ibmq_qasm_simulator", 13, 2),
            "tsp-ibm:ibmq_qasm_simulator-size-13-p2"
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = scratch_store();
        let id = run_id("maxcut", "sim", 7, 1);

        assert!(!store.exists(&format!("{id}-missing")));

        let runtimes = vec![1.25, 3.5, 2.0];
        store.save(&id, &runtimes).unwrap();
        assert!(store.exists(&id));
        assert_eq!(store.load(&id).unwrap(), runtimes);
    }
}

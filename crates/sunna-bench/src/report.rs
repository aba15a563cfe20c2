//! Runtime summaries per backend and graph size.

use std::fmt;

use serde::Serialize;

use crate::store::{RunStore, run_id};

/// Replace interior zero runtimes with the average of their neighbors.
///
/// Remote services occasionally report a zero execution time for a job
/// that demonstrably ran; a zero would poison the means, so it is patched
/// from the surrounding evaluations. Leading and trailing zeros have only
/// one neighbor and are left as recorded.
pub fn smooth_zero_runtimes(runtimes: &mut [f64]) {
    for i in 1..runtimes.len().saturating_sub(1) {
        if runtimes[i] == 0.0 {
            runtimes[i] = (runtimes[i - 1] + runtimes[i + 1]) / 2.0;
        }
    }
}

/// Summary of one backend across the benchmark sizes.
#[derive(Debug, Clone, Serialize)]
pub struct BackendSeries {
    /// Backend identifier.
    pub backend: String,
    /// Graph sizes with recorded data.
    pub sizes: Vec<usize>,
    /// Mean job runtime per size (ms).
    pub mean_runtime_ms: Vec<f64>,
    /// Optimizer evaluations per size.
    pub evaluations: Vec<usize>,
    /// Total optimization runtime per size (s).
    pub total_runtime_s: Vec<f64>,
    /// Raw runtime sequences per size (ms).
    pub runtimes_ms: Vec<Vec<f64>>,
}

/// Collect recorded runs of one problem into per-backend series.
pub fn collect(
    store: &RunStore,
    problem: &str,
    backends: &[String],
    sizes: &[usize],
    p: usize,
) -> anyhow::Result<Vec<BackendSeries>> {
    let mut series = vec![];

    for backend in backends {
        let mut entry = BackendSeries {
            backend: backend.clone(),
            sizes: vec![],
            mean_runtime_ms: vec![],
            evaluations: vec![],
            total_runtime_s: vec![],
            runtimes_ms: vec![],
        };

        for &size in sizes {
            let id = run_id(problem, backend, size, p);
            if !store.exists(&id) {
                continue;
            }
            let runtimes = store.load(&id)?;
            if runtimes.is_empty() {
                continue;
            }
            let total: f64 = runtimes.iter().sum();
            entry.sizes.push(size);
            entry.mean_runtime_ms.push(total / runtimes.len() as f64);
            entry.evaluations.push(runtimes.len());
            entry.total_runtime_s.push(total / 1e3);
            entry.runtimes_ms.push(runtimes);
        }

        series.push(entry);
    }

    Ok(series)
}

/// Persist the aggregated series for one problem.
pub fn write_summary(
    store: &RunStore,
    problem: &str,
    p: usize,
    series: &[BackendSeries],
) -> anyhow::Result<()> {
    let path = store.dir().join(format!("data_{problem}_p{p}.json"));
    std::fs::write(&path, serde_json::to_string_pretty(series)?)?;
    Ok(())
}

/// A printable runtime report for one problem.
pub struct RuntimeReport {
    /// Report heading.
    pub title: String,
    /// Per-backend series.
    pub series: Vec<BackendSeries>,
}

impl RuntimeReport {
    /// Create a report.
    pub fn new(title: impl Into<String>, series: Vec<BackendSeries>) -> Self {
        Self {
            title: title.into(),
            series,
        }
    }
}

impl fmt::Display for RuntimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "-".repeat(72))?;
        writeln!(
            f,
            "{:<28} {:>6} {:>14} {:>8} {:>12}",
            "backend", "nodes", "mean [ms]", "evals", "total [s]"
        )?;

        for series in &self.series {
            for (((size, mean), evals), total) in series
                .sizes
                .iter()
                .zip(&series.mean_runtime_ms)
                .zip(&series.evaluations)
                .zip(&series.total_runtime_s)
            {
                writeln!(
                    f,
                    "{:<28} {:>6} {:>14.3} {:>8} {:>12.3}",
                    series.backend, size, mean, evals, total
                )?;
            }
        }

        Ok(())
    }
}

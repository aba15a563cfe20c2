//! Backend id resolution.

use std::sync::Arc;

use anyhow::bail;

use sunna_adapter_ibm::IbmBackend;
use sunna_adapter_ionq::IonqBackend;
use sunna_adapter_sim::SimulatorBackend;
use sunna_hal::Backend;

/// Resolve a backend identifier into a live backend.
///
/// Accepted ids:
/// - `sim` (aliases `aer`, `qsim`, `qpp`) — the local statevector
///   simulator
/// - `ibm:<device>` — an IBM Quantum device, token from
///   `IBM_QUANTUM_TOKEN`
/// - `ionq` / `ionq:<target>` — IonQ, key from `IONQ_API_KEY`
///
/// Unknown ids are fatal: a benchmark sweep over a misspelled backend
/// would silently record nothing.
pub fn resolve(id: &str) -> anyhow::Result<Arc<dyn Backend>> {
    match id.split_once(':') {
        None => match id {
            "sim" | "aer" | "qsim" | "qpp" => Ok(Arc::new(SimulatorBackend::new())),
            "ionq" => Ok(Arc::new(IonqBackend::new()?)),
            _ => bail!("unknown backend id '{id}' (expected sim, ibm:<device>, or ionq)"),
        },
        Some(("ibm", device)) if !device.is_empty() => {
            Ok(Arc::new(IbmBackend::with_target(device)?))
        }
        Some(("ionq", target)) if !target.is_empty() => {
            Ok(Arc::new(IonqBackend::with_target(target)?))
        }
        Some(_) => bail!("unknown backend id '{id}' (expected sim, ibm:<device>, or ionq)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_aliases_resolve() {
        for id in ["sim", "aer", "qsim", "qpp"] {
            let backend = resolve(id).unwrap();
            assert!(backend.capabilities().is_simulator);
        }
    }

    #[test]
    fn test_unknown_id_is_fatal() {
        assert!(resolve("nope").is_err());
        assert!(resolve("braket:foo").is_err());
    }
}

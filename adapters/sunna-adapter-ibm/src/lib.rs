//! IBM Quantum backend adapter.
//!
//! Implements the Sunna HAL against the IBM Quantum REST API:
//! sampler-style job submission carrying the serialized kernel text,
//! status polling, counts retrieval, and per-job runtime extraction from
//! the job step timestamps (RUNNING → COMPLETED delta).
//!
//! The timestamp fetch is retried with exponential backoff up to a fixed
//! attempt budget — the completion timestamp occasionally lags the
//! completion status — and surfaces a timeout error if the budget is
//! exhausted.
//!
//! # Authentication
//!
//! The token comes from the `IBM_QUANTUM_TOKEN` environment variable or
//! an explicit [`sunna_hal::BackendConfig`]; there is no ambient provider
//! state.

mod api;
mod backend;
mod error;

pub use api::IbmClient;
pub use backend::IbmBackend;
pub use error::{IbmError, IbmResult};

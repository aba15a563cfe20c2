//! IonQ backend adapter.
//!
//! Implements the Sunna HAL against the IonQ v0.1 REST API: job
//! submission in the IonQ JSON gate format (converted from the IR),
//! status polling, histogram retrieval, and runtime extraction via the
//! most-recent-job listing (`limit=1`, `execution_time` field) when the
//! job record itself carries none.
//!
//! # Authentication
//!
//! `Authorization: apiKey <key>`, with the key taken from the
//! `IONQ_API_KEY` environment variable or an explicit
//! [`sunna_hal::BackendConfig`].

mod api;
mod backend;
mod error;

pub use api::IonqClient;
pub use backend::IonqBackend;
pub use error::{IonqError, IonqResult};

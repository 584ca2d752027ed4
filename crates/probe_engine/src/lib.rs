//! Probe engine: HTTP transport and effect execution.
mod engine;
mod fetch;
mod types;

pub use engine::EngineHandle;
pub use fetch::{FetchSettings, ReqwestTransport, Transport};
pub use types::{
    EngineError, EngineEvent, FailureKind, FetchError, ProbeId, ProbeRequest, ProbeResponse,
};

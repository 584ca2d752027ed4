//! Probe core: pure state machine and view-model helpers.
mod config;
mod debug_log;
mod effect;
mod msg;
mod outcome;
mod response;
mod state;
mod update;
mod view_model;

pub use config::{
    normalize_base_url, target_url, ProbeConfig, Variant, BASE_URL_VAR, DEFAULT_UI_ORIGIN,
    UNDEFINED,
};
pub use debug_log::{DebugLog, DEBUG_LOG_CAPACITY};
pub use effect::{Effect, ProbeRequest};
pub use msg::{FailureSource, Msg};
pub use outcome::{
    FailureKind, ProbeFailure, ProbeOutcome, FAILED_FETCH_HINT, GENERIC_FAILURE,
    MISSING_BASE_URL, MINIMAL_FAILURE,
};
pub use response::{
    body_preview, extract_message, parse_payload, RawResponse, BODY_PREVIEW_CHARS, RAW_BODY_KEY,
};
pub use state::{AppState, Clock, ProbeId};
pub use update::update;
pub use view_model::ProbeViewModel;

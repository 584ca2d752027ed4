use crate::config::{normalize_base_url, target_url, BASE_URL_VAR, UNDEFINED};
use crate::outcome::{FailureKind, ProbeFailure};
use crate::response::{body_preview, extract_message, parse_payload, pretty_json, BODY_PREVIEW_CHARS};
use crate::{AppState, Effect, FailureSource, Msg, ProbeRequest, RawResponse};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded => {
            log_environment(&mut state);
            Vec::new()
        }
        Msg::ProbeClicked => {
            // The button is disabled while a probe is outstanding.
            if state.is_in_flight() {
                return (state, Vec::new());
            }
            start_probe(&mut state)
        }
        Msg::ResponseReceived { probe_id, response } => {
            if state.is_current(probe_id) {
                apply_response(&mut state, &response);
                state.log("Done.");
            }
            Vec::new()
        }
        Msg::ProbeFailed {
            probe_id,
            source,
            message,
        } => {
            if state.is_current(probe_id) {
                apply_failure(&mut state, source, &message);
                state.log("Done.");
            }
            Vec::new()
        }
        Msg::ToggleDebugPanel => {
            state.toggle_debug_panel();
            Vec::new()
        }
    };

    (state, effects)
}

fn log_environment(state: &mut AppState) {
    let config = state.config().clone();
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    state.log("Page loaded.");
    state.log(format!("ui origin = {}", config.ui_origin_display()));
    state.log(format!("build profile = {profile}"));
    state.log(format!("variant = {}", config.variant.label()));
    state.log(format!("{BASE_URL_VAR} = {}", config.base_url_display()));
}

fn start_probe(state: &mut AppState) -> Vec<Effect> {
    let probe_id = state.begin_probe();
    let config = state.config().clone();
    state.log("Button clicked.");
    state.log(format!(
        "Raw {BASE_URL_VAR} = {}",
        config.base_url.as_deref().unwrap_or(UNDEFINED)
    ));

    let Some(raw) = config.resolved_base_url() else {
        state.log(format!(
            "{BASE_URL_VAR} is undefined in this build. \
             (This usually means the env var was not injected at build time.)"
        ));
        record_failure(state, ProbeFailure::configuration_missing(), None);
        return Vec::new();
    };

    let base_url = normalize_base_url(raw);
    let url = target_url(&base_url);
    state.log(format!("Normalized base URL = {base_url}"));
    state.log(format!("Final request URL = {url}"));

    vec![Effect::SendProbe {
        probe_id,
        request: ProbeRequest {
            url,
            origin: config.ui_origin,
        },
    }]
}

fn apply_response(state: &mut AppState, response: &RawResponse) {
    state.log(format!("Fetch completed. status = {}", response.status));
    state.log(format!("Response ok = {}", response.is_ok()));
    state.log(format!(
        "Response headers = {}",
        pretty_json(&response.headers_json())
    ));
    state.log(format!("content-type = {}", response.content_type()));
    state.log(format!(
        "Raw response body (first {BODY_PREVIEW_CHARS} chars) = {}",
        body_preview(&response.body)
    ));

    if !response.is_ok() {
        record_failure(state, ProbeFailure::http_status(response.status), None);
        return;
    }

    let payload = parse_payload(&response.body);
    state.log(format!("Parsed data = {}", pretty_json(&payload)));
    state.succeed(extract_message(&payload));
}

fn apply_failure(state: &mut AppState, source: FailureSource, message: &str) {
    let kind = match source {
        FailureSource::Transport => FailureKind::Transport,
        FailureSource::Other => FailureKind::Unexpected,
    };
    let failure = ProbeFailure::from_error_text(kind, message);
    record_failure(state, failure, Some(message));
}

/// Logs the failure with its kind and the raw error text, when there is any.
fn record_failure(state: &mut AppState, failure: ProbeFailure, raw: Option<&str>) {
    let caught = raw
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(failure.detail.as_str());
    state.log(format!("ERROR caught ({}) = {caught}", failure.kind));
    state.fail(failure);
}


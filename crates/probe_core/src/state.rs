use chrono::{DateTime, Utc};

use crate::outcome::{ProbeFailure, ProbeOutcome};
use crate::view_model::ProbeViewModel;
use crate::{DebugLog, ProbeConfig, Variant};

pub type ProbeId = u64;
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Debug, Clone)]
pub struct AppState {
    config: ProbeConfig,
    outcome: Option<ProbeOutcome>,
    in_flight: Option<ProbeId>,
    last_probe_id: ProbeId,
    log: DebugLog,
    debug_open: bool,
    clock: Clock,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ProbeConfig::default())
    }
}

impl AppState {
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            config,
            outcome: None,
            in_flight: None,
            last_probe_id: 0,
            log: DebugLog::new(),
            debug_open: false,
            clock: Utc::now,
            dirty: false,
        }
    }

    /// Replaces the wall clock used to stamp debug lines.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<&ProbeOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn debug_log(&self) -> &DebugLog {
        &self.log
    }

    pub fn view(&self) -> ProbeViewModel {
        let variant = self.config.variant;
        let (success, error) = match &self.outcome {
            Some(ProbeOutcome::Success(message)) => (Some(format!("✅ Response: {message}")), None),
            Some(ProbeOutcome::Failure(failure)) => (
                None,
                Some(format!("❌ Error: {}", failure.display_text(variant))),
            ),
            None => (None, None),
        };
        let show_debug_panel = variant == Variant::Verbose;
        ProbeViewModel {
            button_label: if self.is_in_flight() {
                "Calling..."
            } else {
                "Call Backend"
            },
            button_enabled: !self.is_in_flight(),
            base_url_display: self.config.base_url_display().to_string(),
            ui_origin_display: self.config.ui_origin_display().to_string(),
            success,
            error,
            show_debug_panel,
            debug_open: self.debug_open,
            debug_line_count: if show_debug_panel { self.log.len() } else { 0 },
            debug_text: if show_debug_panel {
                self.log.render()
            } else {
                String::new()
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Appends to the debug trail; the minimal variant keeps none.
    pub(crate) fn log(&mut self, text: impl AsRef<str>) {
        if self.config.variant == Variant::Verbose {
            let now = (self.clock)();
            self.log.push(now, text.as_ref());
            self.mark_dirty();
        }
    }

    /// Clears the previous outcome and marks a new probe in flight.
    pub(crate) fn begin_probe(&mut self) -> ProbeId {
        self.last_probe_id += 1;
        self.in_flight = Some(self.last_probe_id);
        self.outcome = None;
        self.mark_dirty();
        self.last_probe_id
    }

    pub(crate) fn is_current(&self, probe_id: ProbeId) -> bool {
        self.in_flight == Some(probe_id)
    }

    pub(crate) fn succeed(&mut self, message: String) {
        self.finish(ProbeOutcome::Success(message));
    }

    pub(crate) fn fail(&mut self, failure: ProbeFailure) {
        self.finish(ProbeOutcome::Failure(failure));
    }

    pub(crate) fn toggle_debug_panel(&mut self) {
        self.debug_open = !self.debug_open;
        self.mark_dirty();
    }

    fn finish(&mut self, outcome: ProbeOutcome) {
        self.outcome = Some(outcome);
        self.in_flight = None;
        self.mark_dirty();
    }
}

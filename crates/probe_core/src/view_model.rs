#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeViewModel {
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub base_url_display: String,
    pub ui_origin_display: String,
    /// Formatted success line, e.g. `✅ Response: pong`.
    pub success: Option<String>,
    /// Formatted error line, e.g. `❌ Error: HTTP 503`.
    pub error: Option<String>,
    pub show_debug_panel: bool,
    pub debug_open: bool,
    pub debug_line_count: usize,
    /// Panel body, newest entry first.
    pub debug_text: String,
    pub dirty: bool,
}

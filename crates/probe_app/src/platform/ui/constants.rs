pub const TITLE: &str = "Backend Probe";

/// An empty line (plain Enter) presses the probe button.
pub const KEY_PROBE: &str = "";
pub const KEY_TOGGLE_DEBUG: &str = "d";
pub const KEY_QUIT: &str = "q";

pub const DEBUG_PANEL_TITLE: &str = "Debug log (latest first)";

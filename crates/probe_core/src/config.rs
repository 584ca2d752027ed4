/// Name of the build-time variable holding the backend base URL.
pub const BASE_URL_VAR: &str = "PROBE_API_BASE_URL";
/// Origin used when the build does not set one.
pub const DEFAULT_UI_ORIGIN: &str = "http://localhost:3000";
/// Placeholder shown wherever an unset variable is displayed.
pub const UNDEFINED: &str = "(undefined)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Full diagnostic trail and per-cause error messages.
    #[default]
    Verbose,
    /// Same flow, one collapsed error message and no debug log.
    Minimal,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::Verbose => "verbose",
            Variant::Minimal => "minimal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub base_url: Option<String>,
    /// `None` sends plain requests with no cross-origin check.
    pub ui_origin: Option<String>,
    pub variant: Variant,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            ui_origin: Some(DEFAULT_UI_ORIGIN.to_string()),
            variant: Variant::default(),
        }
    }
}

impl ProbeConfig {
    /// Returns the configured base URL, or `None` when it is unset or blank.
    pub fn resolved_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
    }

    pub fn base_url_display(&self) -> &str {
        self.base_url.as_deref().unwrap_or(UNDEFINED)
    }

    pub fn ui_origin_display(&self) -> &str {
        self.ui_origin.as_deref().unwrap_or(UNDEFINED)
    }
}

/// Trims whitespace and every trailing slash.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// The probe always targets the service root.
pub fn target_url(normalized: &str) -> String {
    format!("{normalized}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_collapse_to_one() {
        for raw in [
            "https://api.example.com",
            "https://api.example.com/",
            "https://api.example.com///",
            "  https://api.example.com//  ",
        ] {
            let normalized = normalize_base_url(raw);
            assert_eq!(normalized, "https://api.example.com");
            assert_eq!(target_url(&normalized), "https://api.example.com/");
        }
    }

    #[test]
    fn nested_path_keeps_inner_slashes() {
        let normalized = normalize_base_url("https://host/api/v1//");
        assert_eq!(target_url(&normalized), "https://host/api/v1/");
    }

    #[test]
    fn blank_base_url_counts_as_missing() {
        let mut config = ProbeConfig {
            base_url: Some("   ".to_string()),
            ..ProbeConfig::default()
        };
        assert_eq!(config.resolved_base_url(), None);
        config.base_url = None;
        assert_eq!(config.resolved_base_url(), None);
        assert_eq!(config.base_url_display(), UNDEFINED);
    }

    #[test]
    fn default_config_presents_local_origin() {
        let config = ProbeConfig::default();
        assert_eq!(config.ui_origin.as_deref(), Some(DEFAULT_UI_ORIGIN));
        assert_eq!(config.variant, Variant::Verbose);
    }
}

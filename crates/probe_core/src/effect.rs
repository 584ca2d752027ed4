#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendProbe {
        probe_id: crate::ProbeId,
        request: ProbeRequest,
    },
}

/// One GET against the service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: String,
    /// Present when the request runs in cross-origin mode.
    pub origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session started; records the environment in the debug log.
    PageLoaded,
    /// User pressed the probe button.
    ProbeClicked,
    /// Engine read a response, whatever its status.
    ResponseReceived {
        probe_id: crate::ProbeId,
        response: crate::RawResponse,
    },
    /// Engine could not produce a response.
    ProbeFailed {
        probe_id: crate::ProbeId,
        source: FailureSource,
        message: String,
    },
    /// User expanded or collapsed the debug panel.
    ToggleDebugPanel,
}

/// Where a failed probe broke down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSource {
    /// The request never reached a server, or was rejected cross-origin.
    Transport,
    /// Anything else: bad URL, body read error, engine gone.
    Other,
}

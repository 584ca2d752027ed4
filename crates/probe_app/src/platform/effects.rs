use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use probe_core::{Effect, FailureSource, Msg, RawResponse};
use probe_engine::{EngineEvent, EngineHandle, ProbeRequest};
use probe_logging::{probe_error, probe_info};

use super::input::AppEvent;

const ENGINE_STOPPED: &str = "probe engine is not running";

pub struct EffectRunner {
    engine: EngineHandle,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { engine, event_tx };
        runner.spawn_event_loop();
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendProbe { probe_id, request } => {
                    probe_info!("SendProbe probe_id={} url={}", probe_id, request.url);
                    let request = ProbeRequest {
                        url: request.url,
                        origin: request.origin,
                    };
                    if !self.engine.submit(probe_id, request) {
                        probe_error!("Engine rejected probe {}", probe_id);
                        let _ = self.event_tx.send(AppEvent::Dispatch(Msg::ProbeFailed {
                            probe_id,
                            source: FailureSource::Other,
                            message: ENGINE_STOPPED.to_string(),
                        }));
                    }
                }
            }
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let event_tx = self.event_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if event_tx.send(AppEvent::Dispatch(map_event(event))).is_err() {
                    return;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProbeCompleted { probe_id, result } => match result {
            Ok(response) => Msg::ResponseReceived {
                probe_id,
                response: RawResponse {
                    status: response.status,
                    headers: response.headers,
                    body: response.body,
                },
            },
            Err(err) => Msg::ProbeFailed {
                probe_id,
                source: if err.is_transport() {
                    FailureSource::Transport
                } else {
                    FailureSource::Other
                },
                message: err.message,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_engine::{FailureKind, FetchError, ProbeResponse};

    fn failed(kind: FailureKind, message: &str) -> EngineEvent {
        EngineEvent::ProbeCompleted {
            probe_id: 3,
            result: Err(FetchError {
                kind,
                message: message.to_string(),
            }),
        }
    }

    #[test]
    fn responses_map_to_received() {
        let event = EngineEvent::ProbeCompleted {
            probe_id: 3,
            result: Ok(ProbeResponse {
                status: 503,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: r#"{"error":"down"}"#.to_string(),
            }),
        };
        match map_event(event) {
            Msg::ResponseReceived { probe_id, response } => {
                assert_eq!(probe_id, 3);
                assert_eq!(response.status, 503);
                assert_eq!(response.content_type(), "application/json");
            }
            other => panic!("unexpected msg {other:?}"),
        }
    }

    #[test]
    fn failures_keep_their_source() {
        assert_eq!(
            map_event(failed(FailureKind::CorsRejected, "Failed to fetch: no header")),
            Msg::ProbeFailed {
                probe_id: 3,
                source: FailureSource::Transport,
                message: "Failed to fetch: no header".to_string(),
            }
        );
        assert_eq!(
            map_event(failed(FailureKind::InvalidUrl, "relative URL without a base")),
            Msg::ProbeFailed {
                probe_id: 3,
                source: FailureSource::Other,
                message: "relative URL without a base".to_string(),
            }
        );
    }
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use probe_engine::{
    EngineEvent, EngineHandle, FetchError, FetchSettings, ProbeRequest, ProbeResponse, Transport,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn next_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "engine produced no event");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Transport for CountingTransport {
    async fn get(&self, request: &ProbeRequest) -> Result<ProbeResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProbeResponse {
            status: 200,
            headers: Vec::new(),
            body: request.url.clone(),
        })
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_reports_completion_with_probe_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("access-control-allow-origin", "*")
                .set_body_raw(r#"{"message":"pong"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let engine = EngineHandle::new(FetchSettings::default()).expect("engine starts");
    assert!(engine.submit(
        7,
        ProbeRequest {
            url: format!("{}/", server.uri()),
            origin: Some("http://localhost:3000".to_string()),
        },
    ));

    match next_event(&engine).await {
        EngineEvent::ProbeCompleted { probe_id, result } => {
            assert_eq!(probe_id, 7);
            let response = result.expect("probe ok");
            assert_eq!(response.status, 200);
            assert_eq!(response.body, r#"{"message":"pong"}"#);
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_runs_each_submission_through_transport() {
    let transport = Arc::new(CountingTransport::default());
    let engine = EngineHandle::with_transport(transport.clone()).expect("engine starts");

    for probe_id in 1..=2 {
        engine.submit(
            probe_id,
            ProbeRequest {
                url: format!("http://probe.invalid/{probe_id}"),
                origin: None,
            },
        );
        let EngineEvent::ProbeCompleted { probe_id: done, .. } = next_event(&engine).await;
        assert_eq!(done, probe_id);
    }

    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
}

use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use probe_logging::{probe_info, probe_warn};

use crate::fetch::{FetchSettings, ReqwestTransport, Transport};
use crate::{EngineError, EngineEvent, ProbeId, ProbeRequest};

enum EngineCommand {
    Probe {
        probe_id: ProbeId,
        request: ProbeRequest,
    },
}

/// Runs probes on a background tokio runtime and reports completions.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(&settings)?;
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), command, event_tx).await;
                });
            }
            probe_info!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    /// Queues one probe. Returns `false` when the engine thread is gone.
    pub fn submit(&self, probe_id: ProbeId, request: ProbeRequest) -> bool {
        self.cmd_tx
            .send(EngineCommand::Probe { probe_id, request })
            .is_ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        let rx = self.event_rx.lock().ok()?;
        rx.try_recv().ok()
    }
}

async fn handle_command(
    transport: &dyn Transport,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Probe { probe_id, request } => {
            let result = transport.get(&request).await;
            if let Err(err) = &result {
                probe_warn!("Probe {} failed: {}", probe_id, err);
            }
            let _ = event_tx.send(EngineEvent::ProbeCompleted { probe_id, result });
        }
    }
}

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use probe_core::Msg;
use probe_logging::probe_info;

use super::ui::constants::{KEY_PROBE, KEY_QUIT, KEY_TOGGLE_DEBUG};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Dispatch(Msg),
    QuitRequested,
    Unrecognized(String),
}

/// Maps one line typed at the prompt to an app event.
pub fn event_for_line(line: &str) -> AppEvent {
    match line.trim() {
        KEY_PROBE => AppEvent::Dispatch(Msg::ProbeClicked),
        KEY_TOGGLE_DEBUG => AppEvent::Dispatch(Msg::ToggleDebugPanel),
        KEY_QUIT => AppEvent::QuitRequested,
        other => AppEvent::Unrecognized(other.to_string()),
    }
}

/// Reads stdin on its own thread; end of input counts as quit.
pub fn spawn_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(event_for_line(&line)).is_err() {
                return;
            }
        }
        probe_info!("stdin closed");
        let _ = event_tx.send(AppEvent::QuitRequested);
    });
}

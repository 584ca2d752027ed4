use std::process::ExitCode;
use std::sync::mpsc;

use probe_core::{update, AppState, Msg, ProbeOutcome, ProbeViewModel, Variant};
use probe_engine::{EngineError, EngineHandle};
use probe_logging::{probe_info, probe_warn};

use super::effects::EffectRunner;
use super::input::{self, AppEvent};
use super::logging::{self, LogDestination};
use super::options::{self, OptionsError, USAGE};
use super::ui;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub fn run_app() -> Result<ExitCode, AppError> {
    let options = options::parse_args(std::env::args().skip(1))?;
    if options.help {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    logging::initialize(
        LogDestination::from_option(options.log_file.as_deref()),
        probe_logging::level_for(options.variant == Variant::Verbose),
    );

    let config = options::build_config(options.variant);
    probe_info!(
        "Starting backend probe: variant={} base_url={} ui_origin={}",
        config.variant.label(),
        config.base_url_display(),
        config.ui_origin_display()
    );

    let engine = EngineHandle::new(options.fetch_settings())?;
    let (event_tx, event_rx) = mpsc::channel();
    let runner = EffectRunner::new(engine, event_tx.clone());
    let mut controller = AppController::new(AppState::new(config), runner);
    controller.dispatch(Msg::PageLoaded);

    if options.once {
        let succeeded = controller.run_once(&event_rx);
        println!("{}", ui::render::render(&controller.final_report()));
        return Ok(if succeeded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    input::spawn_reader(event_tx);
    draw(&controller.view());
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Dispatch(msg) => {
                if controller.dispatch(msg) {
                    draw(&controller.view());
                }
            }
            AppEvent::QuitRequested => break,
            AppEvent::Unrecognized(command) => {
                probe_warn!("Ignoring unknown command {:?}", command);
                println!("Unknown command '{command}'.");
            }
        }
    }

    probe_info!("Backend probe exiting");
    Ok(ExitCode::SUCCESS)
}

fn draw(view: &ProbeViewModel) {
    println!("{CLEAR_SCREEN}{}", ui::render::render(view));
}

/// Owns the state and feeds effects produced by `update` to the engine.
struct AppController {
    state: AppState,
    runner: EffectRunner,
}

impl AppController {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn view(&self) -> ProbeViewModel {
        self.state.view()
    }

    /// Applies one message; returns whether the screen needs redrawing.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty
    }

    /// Presses the button once and waits for the outcome.
    fn run_once(&mut self, event_rx: &mpsc::Receiver<AppEvent>) -> bool {
        self.dispatch(Msg::ProbeClicked);
        while self.state.is_in_flight() {
            match event_rx.recv() {
                Ok(AppEvent::Dispatch(msg)) => {
                    self.dispatch(msg);
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
        self.state.outcome().is_some_and(ProbeOutcome::is_success)
    }

    /// Last screen of a non-interactive run: the debug panel is expanded,
    /// since nobody is left to press the toggle key.
    fn final_report(&mut self) -> ProbeViewModel {
        let view = self.view();
        if view.show_debug_panel && !view.debug_open {
            self.dispatch(Msg::ToggleDebugPanel);
            return self.view();
        }
        view
    }
}

use probe_core::{ProbeViewModel, BASE_URL_VAR};

use super::constants::*;

/// Draws the whole screen for one view model.
pub fn render(view: &ProbeViewModel) -> String {
    let mut lines = Vec::new();

    lines.push(format!("== {TITLE} =="));
    lines.push(format!("UI Origin: {}", view.ui_origin_display));
    lines.push(format!("{BASE_URL_VAR}: {}", view.base_url_display));
    lines.push(String::new());
    lines.push(button_line(view));

    if let Some(success) = &view.success {
        lines.push(String::new());
        lines.push(success.clone());
    }
    if let Some(error) = &view.error {
        lines.push(String::new());
        lines.push(error.clone());
    }

    if view.show_debug_panel {
        lines.push(String::new());
        if view.debug_open {
            lines.push(format!("▾ {DEBUG_PANEL_TITLE}"));
            lines.push(view.debug_text.clone());
        } else {
            lines.push(format!(
                "▸ {DEBUG_PANEL_TITLE} ({} lines, '{KEY_TOGGLE_DEBUG}' to expand)",
                view.debug_line_count
            ));
        }
    }

    lines.push(String::new());
    lines.push(key_help(view.show_debug_panel));
    lines.join("\n")
}

fn button_line(view: &ProbeViewModel) -> String {
    if view.button_enabled {
        format!("[Enter] {}", view.button_label)
    } else {
        format!("[busy] {}", view.button_label)
    }
}

fn key_help(with_debug_panel: bool) -> String {
    if with_debug_panel {
        format!("Keys: Enter = call backend, {KEY_TOGGLE_DEBUG} = toggle debug log, {KEY_QUIT} = quit")
    } else {
        format!("Keys: Enter = call backend, {KEY_QUIT} = quit")
    }
}

use gridline_types::TerminalCapabilities;
use is_terminal::IsTerminal;
use std::collections::HashMap;

/// Probe what the attached terminal can display.
///
/// Everything is derived from the environment snapshot plus a tty check,
/// so the probe stays consistent with the detection engine's
/// snapshot-based purity. Explicit user signals (`NO_COLOR`,
/// `FORCE_COLOR`, `NERD_FONT`) always beat heuristics.
pub fn probe(env: &HashMap<String, String>) -> TerminalCapabilities {
    TerminalCapabilities {
        color: detect_color(env),
        emoji: detect_emoji(env),
        nerd_font: detect_nerd_font(env),
    }
}

fn detect_color(env: &HashMap<String, String>) -> bool {
    if env.contains_key("NO_COLOR") {
        return false;
    }
    if env.contains_key("FORCE_COLOR") {
        return true;
    }
    if env.get("TERM").is_some_and(|term| term == "dumb") {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn detect_emoji(env: &HashMap<String, String>) -> bool {
    let utf8_locale = env
        .get("LC_ALL")
        .or_else(|| env.get("LANG"))
        .is_some_and(|locale| locale.to_uppercase().contains("UTF-8") || locale.to_uppercase().contains("UTF8"));

    // Terminals known to render emoji regardless of locale hints.
    let known_program = env.get("TERM_PROGRAM").is_some_and(|program| {
        matches!(
            program.as_str(),
            "iTerm.app" | "WezTerm" | "Apple_Terminal" | "vscode" | "ghostty"
        )
    });

    utf8_locale || known_program
}

fn detect_nerd_font(env: &HashMap<String, String>) -> bool {
    // No reliable probe exists; opt-in only.
    env.get("NERD_FONT")
        .is_some_and(|value| !value.is_empty() && value != "0")
}

/// Current terminal width in columns, when one is attached.
pub fn width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

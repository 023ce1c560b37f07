use serde::{Deserialize, Serialize};

/// What the attached terminal can display, as decided by the probe in the
/// CLI layer. Widgets and theme renderers only read these flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerminalCapabilities {
    pub color: bool,
    pub emoji: bool,
    pub nerd_font: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            color: true,
            emoji: true,
            nerd_font: false,
        }
    }
}

/// Icon encoding preference order: richest glyph set first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    NerdFont,
    Emoji,
    Text,
}

impl TerminalCapabilities {
    pub fn icon_mode(&self) -> IconMode {
        if self.nerd_font {
            IconMode::NerdFont
        } else if self.emoji {
            IconMode::Emoji
        } else {
            IconMode::Text
        }
    }

    /// Plain-text-only environment (CI logs, dumb terminals).
    pub fn plain() -> Self {
        Self {
            color: false,
            emoji: false,
            nerd_font: false,
        }
    }
}

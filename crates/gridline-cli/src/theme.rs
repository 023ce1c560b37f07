use crate::git::GitStatus;
use gridline_types::{IconMode, InputData, TerminalCapabilities};
use owo_colors::{AnsiColors, OwoColorize};

/// How the primary line should be drawn.
pub struct ThemeOptions<'a> {
    pub theme: &'a str,
    pub separator: &'a str,
    pub color: bool,
    pub width: Option<usize>,
}

struct Segment {
    icon: String,
    text: String,
    accent: AnsiColors,
}

/// Render the single primary status line from the ordered component
/// list. Components with nothing to show are dropped; an unknown
/// component name is simply skipped.
pub fn render_primary(
    order: &[String],
    input: &InputData,
    git: Option<&GitStatus>,
    caps: &TerminalCapabilities,
    opts: &ThemeOptions<'_>,
) -> String {
    let segments: Vec<Segment> = order
        .iter()
        .filter_map(|name| build_segment(name, input, git, caps))
        .collect();

    if segments.is_empty() {
        return String::new();
    }

    let line = match opts.theme {
        "powerline" => render_powerline(&segments, caps, opts.color),
        "capsule" => render_capsule(&segments, caps, opts.color),
        _ => render_classic(&segments, opts),
    };

    cap_width(line, opts)
}

fn build_segment(
    name: &str,
    input: &InputData,
    git: Option<&GitStatus>,
    caps: &TerminalCapabilities,
) -> Option<Segment> {
    match name {
        "model" => Some(Segment {
            icon: icon(caps, "\u{e26d}", "🤖", "M:"),
            text: input.model_name()?.to_string(),
            accent: AnsiColors::Blue,
        }),
        "directory" => Some(Segment {
            icon: icon(caps, "\u{e5fe}", "📁", "D:"),
            text: input.display_dir_name()?,
            accent: AnsiColors::Cyan,
        }),
        "git" => {
            let status = git?;
            Some(Segment {
                icon: icon(caps, "\u{e725}", "🌿", "G:"),
                text: git_text(status, caps),
                accent: AnsiColors::Green,
            })
        }
        "cost" => {
            let cost = input.cost.as_ref()?;
            Some(Segment {
                icon: icon(caps, "\u{f155}", "💰", "$:"),
                text: cost_text(cost)?,
                accent: AnsiColors::Yellow,
            })
        }
        "session" => Some(Segment {
            icon: icon(caps, "\u{f2d0}", "🪪", "S:"),
            text: input.session_id.as_deref().map(short_id)?,
            accent: AnsiColors::Magenta,
        }),
        _ => None,
    }
}

fn icon(caps: &TerminalCapabilities, nerd: &str, emoji: &str, text: &str) -> String {
    match caps.icon_mode() {
        IconMode::NerdFont => nerd,
        IconMode::Emoji => emoji,
        IconMode::Text => text,
    }
    .to_string()
}

fn git_text(status: &GitStatus, caps: &TerminalCapabilities) -> String {
    let mut text = status.branch.clone();
    if status.dirty {
        text.push('*');
    }
    let unicode = caps.emoji || caps.nerd_font;
    if status.ahead > 0 {
        text.push_str(&format!(
            " {}{}",
            if unicode { "↑" } else { "+" },
            status.ahead
        ));
    }
    if status.behind > 0 {
        text.push_str(&format!(
            " {}{}",
            if unicode { "↓" } else { "-" },
            status.behind
        ));
    }
    text
}

fn cost_text(cost: &gridline_types::CostInfo) -> Option<String> {
    let usd = cost.total_cost_usd?;
    let mut text = format!("${:.2}", usd);
    if let Some(ms) = cost.total_duration_ms {
        text.push_str(&format!(" {}", format_duration(ms)));
    }
    Some(text)
}

fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    if minutes >= 60 {
        format!("{}h{}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn render_classic(segments: &[Segment], opts: &ThemeOptions<'_>) -> String {
    segments
        .iter()
        .map(|segment| {
            let body = format!("{} {}", segment.icon, segment.text);
            paint(&body, segment.accent, opts.color)
        })
        .collect::<Vec<_>>()
        .join(opts.separator)
}

fn render_powerline(segments: &[Segment], caps: &TerminalCapabilities, color: bool) -> String {
    let arrow = if caps.nerd_font { "\u{e0b0}" } else { ">" };
    let mut out = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let body = format!(" {} {} ", segment.icon, segment.text);
        if color {
            out.push_str(&body.black().on_color(segment.accent).to_string());
            let joint = match segments.get(i + 1) {
                Some(next) => arrow
                    .color(segment.accent)
                    .on_color(next.accent)
                    .to_string(),
                None => arrow.color(segment.accent).to_string(),
            };
            out.push_str(&joint);
        } else {
            out.push_str(&body);
            out.push_str(arrow);
        }
    }

    out
}

fn render_capsule(segments: &[Segment], caps: &TerminalCapabilities, color: bool) -> String {
    let (open, close) = if caps.nerd_font {
        ("\u{e0b6}", "\u{e0b4}")
    } else {
        ("(", ")")
    };

    segments
        .iter()
        .map(|segment| {
            let body = format!("{} {}", segment.icon, segment.text);
            if color {
                format!(
                    "{}{}{}",
                    open.color(segment.accent),
                    body.black().on_color(segment.accent),
                    close.color(segment.accent)
                )
            } else {
                format!("{}{}{}", open, body, close)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn paint(text: &str, accent: AnsiColors, enabled: bool) -> String {
    if enabled {
        text.color(accent).to_string()
    } else {
        text.to_string()
    }
}

/// Cap the line to the terminal width. Only plain output is truncated:
/// cutting an ANSI sequence mid-way garbles the terminal, and visible
/// width accounting is out of scope.
fn cap_width(line: String, opts: &ThemeOptions<'_>) -> String {
    if opts.color {
        return line;
    }
    match opts.width {
        Some(width) if line.chars().count() > width => line.chars().take(width).collect(),
        _ => line,
    }
}

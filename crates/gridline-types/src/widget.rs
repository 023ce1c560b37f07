use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const MIN_API_TIMEOUT_MS: u64 = 1_000;
pub const MAX_API_TIMEOUT_MS: u64 = 30_000;

/// One widget entry inside a component file.
///
/// `type` stays a free string here; the engine's factory is the one place
/// that knows the supported set, so an unknown type skips that widget
/// instead of rejecting the whole file. Grid placement is 1-based rows
/// and 0-based columns. Three icon encodings are carried so the terminal
/// probe can pick the richest one the terminal displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Force-on / force-off / unset (use detection).
    #[serde(default)]
    pub force: Option<bool>,

    #[serde(rename = "type")]
    pub widget_type: String,

    #[serde(default = "default_row")]
    pub row: u32,

    #[serde(default)]
    pub col: u32,

    #[serde(default)]
    pub nerd_icon: Option<String>,

    #[serde(default)]
    pub emoji_icon: Option<String>,

    #[serde(default)]
    pub text_icon: Option<String>,

    /// Fixed display text (static widgets).
    #[serde(default)]
    pub content: Option<String>,

    /// Template string run through the evaluator.
    #[serde(default)]
    pub template: Option<String>,

    #[serde(default)]
    pub api: Option<ApiDescriptor>,

    #[serde(default)]
    pub detection: Option<DetectionRule>,
}

fn default_enabled() -> bool {
    true
}

fn default_row() -> u32 {
    1
}

impl WidgetConfig {
    /// Structural checks beyond what serde can express: the content source
    /// must match the declared type. Types the engine does not recognize
    /// pass through here; the factory deals with them.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.row < 1 {
            return Err(Error::InvalidWidget(format!(
                "widget '{}': row must be >= 1",
                name
            )));
        }
        match self.widget_type.as_str() {
            "static" => {
                if self.content.is_none() && self.template.is_none() {
                    return Err(Error::InvalidWidget(format!(
                        "widget '{}': static widgets need 'content' or 'template'",
                        name
                    )));
                }
            }
            "api" => {
                if self.api.is_none() {
                    return Err(Error::InvalidWidget(format!(
                        "widget '{}': api widgets need a [widgets.{}.api] table",
                        name, name
                    )));
                }
                if self.template.is_none() && self.content.is_none() {
                    return Err(Error::InvalidWidget(format!(
                        "widget '{}': api widgets need a 'template' to format the response",
                        name
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Remote data source for an api widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiDescriptor {
    /// May contain `${VAR}` placeholders, resolved at render time.
    pub base_url: String,

    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Header values may contain `${VAR}` placeholders.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// `$`-rooted dotted path into the parsed response body.
    #[serde(default = "default_data_path")]
    pub data_path: String,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_timeout() -> u64 {
    5_000
}

fn default_data_path() -> String {
    "$".to_string()
}

impl ApiDescriptor {
    /// Declared timeout clamped into the supported range.
    pub fn bounded_timeout_ms(&self) -> u64 {
        self.timeout_ms.clamp(MIN_API_TIMEOUT_MS, MAX_API_TIMEOUT_MS)
    }
}

/// `env` accepts a single name or an ordered list of names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvProbe {
    One(String),
    Many(Vec<String>),
}

impl EnvProbe {
    pub fn names(&self) -> Vec<&str> {
        match self {
            EnvProbe::One(name) => vec![name.as_str()],
            EnvProbe::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Environment-based activation rule. At most one matcher applies; when
/// several are declared, precedence is equals > contains > pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionRule {
    pub env: EnvProbe,

    #[serde(default)]
    pub equals: Option<String>,

    #[serde(default)]
    pub contains: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultilineMeta {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// One component file: optional meta block plus named widgets.
///
/// BTreeMap keeps widget iteration order stable across renders, which the
/// last-wins grid policy depends on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentMultilineConfig {
    #[serde(default)]
    pub meta: Option<MultilineMeta>,

    #[serde(default)]
    pub widgets: BTreeMap<String, WidgetConfig>,
}

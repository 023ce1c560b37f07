use crate::{detect, template, Error, Result};
use async_trait::async_trait;
use gridline_config::substitute;
use gridline_types::{ApiDescriptor, IconMode, RenderContext, WidgetConfig};
use serde_json::Value;
use std::time::Duration;

/// A widget renders one grid cell, or nothing.
///
/// Render failures of any kind collapse to `None`: one broken widget must
/// never take the status line down with it.
#[async_trait]
pub trait Widget: Send + Sync {
    fn name(&self) -> &str;

    /// (row, col) grid placement.
    fn position(&self) -> (u32, u32);

    /// Enabled flag combined with environment detection.
    fn should_render(&self, ctx: &RenderContext) -> bool;

    async fn render(&self, ctx: &RenderContext) -> Option<String>;
}

/// Build a widget from its config, dispatching on the declared `type`.
/// The supported set is closed; extending it means adding an arm here.
pub fn build_widget(name: &str, config: &WidgetConfig) -> Result<Box<dyn Widget>> {
    match config.widget_type.as_str() {
        "static" => Ok(Box::new(StaticWidget::new(name, config.clone()))),
        "api" => {
            let api = config.api.clone().ok_or_else(|| {
                Error::Widget(format!(
                    "widget '{}' declares type api without an api table",
                    name
                ))
            })?;
            Ok(Box::new(ApiWidget::new(name, config.clone(), api)))
        }
        other => Err(Error::UnknownWidgetType {
            widget: name.to_string(),
            declared: other.to_string(),
        }),
    }
}

fn is_active(config: &WidgetConfig, ctx: &RenderContext) -> bool {
    config.enabled && detect::is_active(config.detection.as_ref(), config.force, &ctx.env)
}

/// Pick the richest icon encoding the terminal can display, falling back
/// down the preference order when a richer encoding is not configured.
fn select_icon(config: &WidgetConfig, ctx: &RenderContext) -> Option<String> {
    let candidates: &[&Option<String>] = match ctx.caps.icon_mode() {
        IconMode::NerdFont => &[&config.nerd_icon, &config.emoji_icon, &config.text_icon],
        IconMode::Emoji => &[&config.emoji_icon, &config.text_icon],
        IconMode::Text => &[&config.text_icon],
    };
    candidates.iter().find_map(|icon| (*icon).clone())
}

fn decorate(icon: Option<String>, body: String) -> String {
    match icon {
        Some(icon) => format!("{} {}", icon, body),
        None => body,
    }
}

/// Fixed or templated text, no I/O.
pub struct StaticWidget {
    name: String,
    config: WidgetConfig,
}

impl StaticWidget {
    pub fn new(name: &str, config: WidgetConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
        }
    }
}

#[async_trait]
impl Widget for StaticWidget {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> (u32, u32) {
        (self.config.row, self.config.col)
    }

    fn should_render(&self, ctx: &RenderContext) -> bool {
        is_active(&self.config, ctx)
    }

    async fn render(&self, ctx: &RenderContext) -> Option<String> {
        let body = if let Some(tpl) = &self.config.template {
            template::render(tpl, &ctx.input)
        } else if let Some(content) = &self.config.content {
            template::restore_dollars(content)
        } else {
            return None;
        };

        let body = body.trim().to_string();
        if body.is_empty() {
            return None;
        }
        Some(decorate(select_icon(&self.config, ctx), body))
    }
}

/// One bounded HTTP fetch, a path extraction, then the evaluator.
pub struct ApiWidget {
    name: String,
    config: WidgetConfig,
    api: ApiDescriptor,
}

impl ApiWidget {
    pub fn new(name: &str, config: WidgetConfig, api: ApiDescriptor) -> Self {
        Self {
            name: name.to_string(),
            config,
            api,
        }
    }

    async fn fetch(&self, ctx: &RenderContext) -> Option<Value> {
        let url_raw = format!("{}{}", self.api.base_url, self.api.endpoint);
        let url = substitute(&url_raw, &ctx.env).text;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(self.api.bounded_timeout_ms()))
            .build()
            .ok()?;

        let method = reqwest::Method::from_bytes(self.api.method.to_uppercase().as_bytes())
            .unwrap_or(reqwest::Method::GET);

        let mut request = client.request(method, url);
        for (key, value) in &self.api.headers {
            request = request.header(key.as_str(), substitute(value, &ctx.env).text);
        }

        let response = request.send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.json::<Value>().await.ok()
    }
}

#[async_trait]
impl Widget for ApiWidget {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> (u32, u32) {
        (self.config.row, self.config.col)
    }

    fn should_render(&self, ctx: &RenderContext) -> bool {
        is_active(&self.config, ctx)
    }

    async fn render(&self, ctx: &RenderContext) -> Option<String> {
        let body = self.fetch(ctx).await?;
        let extracted = extract_data(&body, &self.api.data_path)?;
        let context = context_with_api(&ctx.input, extracted);

        let rendered = match (&self.config.template, &self.config.content) {
            (Some(tpl), _) => template::render(tpl, &context),
            (None, Some(content)) => template::restore_dollars(content),
            (None, None) => return None,
        };

        let rendered = rendered.trim().to_string();
        if rendered.is_empty() {
            return None;
        }
        Some(decorate(select_icon(&self.config, ctx), rendered))
    }
}

/// Pull the value at a `$`-rooted dotted path out of a response body.
/// A bare `$` selects the whole body.
fn extract_data(body: &Value, data_path: &str) -> Option<Value> {
    let trimmed = data_path.trim();
    let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    if rest.is_empty() {
        return Some(body.clone());
    }
    template::resolve_path(body, rest)
}

/// Ambient context plus the fetched value under the `api` namespace.
fn context_with_api(input: &Value, api_value: Value) -> Value {
    let mut map = match input {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    map.insert("api".to_string(), api_value);
    Value::Object(map)
}

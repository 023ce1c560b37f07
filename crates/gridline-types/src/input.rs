use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session payload delivered on stdin by the host program.
///
/// Every field is optional-tolerant: hosts evolve their payloads without
/// notice, and a missing block must never prevent a render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputData {
    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default)]
    pub transcript_path: Option<String>,

    #[serde(default)]
    pub cwd: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub model: ModelInfo,

    #[serde(default)]
    pub workspace: WorkspaceInfo,

    #[serde(default)]
    pub cost: Option<CostInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    #[serde(default)]
    pub current_dir: Option<String>,

    #[serde(default)]
    pub project_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostInfo {
    #[serde(default)]
    pub total_cost_usd: Option<f64>,

    #[serde(default)]
    pub total_duration_ms: Option<u64>,

    #[serde(default)]
    pub total_api_duration_ms: Option<u64>,

    #[serde(default)]
    pub total_lines_added: Option<u64>,

    #[serde(default)]
    pub total_lines_removed: Option<u64>,
}

impl InputData {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Snapshot of the payload as a JSON value, the form templates resolve
    /// paths against.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Directory to display: workspace current_dir, falling back to cwd.
    pub fn display_dir(&self) -> Option<&str> {
        self.workspace.current_dir.as_deref().or(self.cwd.as_deref())
    }

    /// Basename of the display directory, for compact rendering.
    pub fn display_dir_name(&self) -> Option<String> {
        self.display_dir().map(|dir| {
            Path::new(dir)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.to_string())
        })
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.display_name.as_deref().or(self.model.id.as_deref())
    }
}

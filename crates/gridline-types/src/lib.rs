mod capabilities;
mod context;
mod error;
mod input;
mod widget;

pub use capabilities::{IconMode, TerminalCapabilities};
pub use context::RenderContext;
pub use error::{Error, Result};
pub use input::{CostInfo, InputData, ModelInfo, WorkspaceInfo};
pub use widget::{
    ApiDescriptor, ComponentMultilineConfig, DetectionRule, EnvProbe, MultilineMeta, WidgetConfig,
    MAX_API_TIMEOUT_MS, MIN_API_TIMEOUT_MS,
};

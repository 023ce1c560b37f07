use anyhow::{bail, Result};
use std::path::Path;

const STARTER_CONFIG: &str = r#"# gridline main configuration.

theme = "classic"

[style]
separator = " | "
# color = true        # uncomment to force color on or off

[components]
order = ["model", "directory", "git", "cost"]

[multiline]
enabled = true
separator = "  "
# components_dir = "components"
# components = ["system"]   # explicit list; omit to scan the directory
"#;

const SAMPLE_COMPONENT: &str = r#"[meta]
description = "Sample gridline widgets"
version = "1"

[widgets.hello]
type = "static"
row = 1
col = 0
emoji_icon = "👋"
text_icon = "*"
content = "gridline"

# Shows only inside a Kubernetes-flavored shell.
[widgets.kube]
type = "static"
row = 1
col = 1
text_icon = "k8s"
content = "kube"

[widgets.kube.detection]
env = ["KUBECONFIG", "KUBERNETES_SERVICE_HOST"]

# Remote sample: point at any JSON endpoint and pick a field.
# [widgets.cpu]
# type = "api"
# row = 2
# col = 0
# template = "CPU {api:.1f}%"
#
# [widgets.cpu.api]
# base_url = "${MONITOR_URL:-http://localhost:9100}"
# endpoint = "/load"
# timeout_ms = 2000
# data_path = "$.cpu"
"#;

/// Write a commented starter config plus one sample component file.
pub fn handle(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, STARTER_CONFIG)?;

    let components_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("components");
    std::fs::create_dir_all(&components_dir)?;

    let sample_path = components_dir.join("system.toml");
    if !sample_path.exists() || force {
        std::fs::write(&sample_path, SAMPLE_COMPONENT)?;
    }

    println!("Wrote {}", config_path.display());
    println!("Wrote {}", sample_path.display());
    Ok(())
}

use crate::cache::ComponentCache;
use crate::{Error, Result};
use gridline_types::ComponentMultilineConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One successfully parsed component file.
#[derive(Debug, Clone)]
pub struct LoadedComponent {
    pub name: String,
    pub path: PathBuf,
    pub config: ComponentMultilineConfig,
}

/// Outcome of loading a set of component files. Files that fail to parse
/// are isolated: they become warnings, not errors.
#[derive(Debug, Default)]
pub struct ComponentScan {
    pub components: Vec<LoadedComponent>,
    pub warnings: Vec<String>,
}

/// Parse a single component file, validating every widget entry.
pub fn load_component(path: &Path) -> Result<ComponentMultilineConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ComponentMultilineConfig = toml::from_str(&content)?;

    for (name, widget) in &config.widgets {
        widget
            .validate(name)
            .map_err(|err| Error::Config(err.to_string()))?;
    }

    Ok(config)
}

/// Load the declared components, or scan the directory when no explicit
/// list is configured. Scanning picks up every `.toml` file directly in
/// `dir`, sorted by file name for deterministic order.
pub fn load_components(
    dir: &Path,
    declared: Option<&[String]>,
    cache: &ComponentCache,
) -> ComponentScan {
    let mut scan = ComponentScan::default();

    let paths: Vec<(String, PathBuf)> = match declared {
        Some(names) => names
            .iter()
            .map(|name| (name.clone(), dir.join(format!("{}.toml", name))))
            .collect(),
        None => scan_component_files(dir),
    };

    for (name, path) in paths {
        match cache.load(&path) {
            Ok(config) => scan.components.push(LoadedComponent { name, path, config }),
            Err(err) => scan
                .warnings
                .push(format!("component '{}' skipped: {}", name, err)),
        }
    }

    scan
}

fn scan_component_files(dir: &Path) -> Vec<(String, PathBuf)> {
    let mut files: Vec<(String, PathBuf)> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.path().to_path_buf();
            if path.extension().is_some_and(|ext| ext == "toml") {
                let name = path.file_stem()?.to_string_lossy().into_owned();
                Some((name, path))
            } else {
                None
            }
        })
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    const VALID: &str = r#"
[meta]
description = "test widgets"

[widgets.tag]
type = "static"
row = 1
col = 0
content = "hello"
"#;

    const INVALID: &str = r#"
[widgets.broken]
type = "static"
row = 1
"#;

    fn cache() -> ComponentCache {
        ComponentCache::new(Duration::from_secs(5))
    }

    #[test]
    fn test_load_component_validates_widgets() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, INVALID).unwrap();

        let err = load_component(&path).unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn test_scan_isolates_broken_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("alpha.toml"), VALID).unwrap();
        std::fs::write(temp.path().join("beta.toml"), INVALID).unwrap();
        std::fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let scan = load_components(temp.path(), None, &cache());
        assert_eq!(scan.components.len(), 1);
        assert_eq!(scan.components[0].name, "alpha");
        assert_eq!(scan.warnings.len(), 1);
        assert!(scan.warnings[0].contains("beta"));
    }

    #[test]
    fn test_declared_list_overrides_scan() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("alpha.toml"), VALID).unwrap();
        std::fs::write(temp.path().join("omega.toml"), VALID).unwrap();

        let declared = vec!["omega".to_string()];
        let scan = load_components(temp.path(), Some(&declared), &cache());
        assert_eq!(scan.components.len(), 1);
        assert_eq!(scan.components[0].name, "omega");
    }

    #[test]
    fn test_declared_missing_file_becomes_warning() {
        let temp = TempDir::new().unwrap();
        let declared = vec!["ghost".to_string()];
        let scan = load_components(temp.path(), Some(&declared), &cache());
        assert!(scan.components.is_empty());
        assert_eq!(scan.warnings.len(), 1);
        assert!(scan.warnings[0].contains("ghost"));
    }
}

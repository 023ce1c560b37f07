use crate::components::load_component;
use crate::Result;
use gridline_types::ComponentMultilineConfig;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_COMPONENT_TTL: Duration = Duration::from_secs(5);

struct CacheEntry {
    config: ComponentMultilineConfig,
    loaded_at: Instant,
}

/// Read-through cache of parsed component files, keyed by canonical path.
///
/// Entries expire purely by elapsed time; there is no file watching. The
/// cache is an optimization for hosts that re-invoke the renderer on a
/// short interval within one process. Any cache-side failure (poisoned
/// lock) falls through to a direct load.
pub struct ComponentCache {
    ttl: Duration,
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl ComponentCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn load(&self, path: &Path) -> Result<ComponentMultilineConfig> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Ok(entries) = self.entries.lock() {
            if let Some(entry) = entries.get(&key) {
                if entry.loaded_at.elapsed() < self.ttl {
                    return Ok(entry.config.clone());
                }
            }
        }

        let config = load_component(path)?;

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key,
                CacheEntry {
                    config: config.clone(),
                    loaded_at: Instant::now(),
                },
            );
        }

        Ok(config)
    }

    #[cfg(test)]
    fn entry_count(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

/// Process-wide cache with the default TTL.
pub fn shared_cache() -> &'static ComponentCache {
    static CACHE: Lazy<ComponentCache> =
        Lazy::new(|| ComponentCache::new(DEFAULT_COMPONENT_TTL));
    &CACHE
}

mod cache;
mod components;
mod env_subst;
mod error;
mod main_config;

pub use cache::{shared_cache, ComponentCache, DEFAULT_COMPONENT_TTL};
pub use components::{load_component, load_components, ComponentScan, LoadedComponent};
pub use env_subst::{substitute, Substitution};
pub use error::{Error, Result};
pub use main_config::{
    ComponentsConfig, Config, LoadedConfig, MultilineConfig, StyleConfig,
};

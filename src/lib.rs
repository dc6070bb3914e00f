//! Extension-dispatched configuration file loading.

pub mod config;
pub mod error;
pub mod observability;

pub use config::{ConfigFactory, ConfigHandler, ConfigValues, JsonConfigHandler, Schema};
pub use error::{ConfigError, RegistryError};

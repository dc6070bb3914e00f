//! Configuration loading subsystem.
//!
//! # Data Flow
//! ```text
//! config file (any registered extension)
//!     → factory.rs (resolve path, pick handler by extension)
//!     → registry.rs (extension → handler factory)
//!     → handler (json.rs, ...) reads & parses the file
//!     → validation.rs (optional schema check)
//!     → values.rs (top-level keys, lower-cased)
//! ```
//!
//! # Design Decisions
//! - The dispatch extension is an associated const; a handler cannot exist without one
//! - Registering two handlers for one extension is an error, not a silent override
//! - Ingestion is all-or-nothing: values are swapped in only after parse and validation succeed

pub mod factory;
pub mod handler;
pub mod json;
pub mod registry;
pub mod schema;
pub mod validation;
pub mod values;

pub use factory::ConfigFactory;
pub use handler::{ConfigHandler, HandlerType, SourcePath};
pub use json::JsonConfigHandler;
pub use registry::{get_allowed_types, register_factory, register_handler, HandlerRegistry};
pub use schema::{FieldType, Schema};
pub use values::ConfigValues;

//! Observability subsystem.
//!
//! The library only emits `tracing` events (debug/trace); installing a
//! subscriber is left to the binary through [`logging::init`].

pub mod logging;

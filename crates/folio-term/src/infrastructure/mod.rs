//! Infrastructure layer providing external integrations.
//!
//! This module contains the backend client wiring and the log file sink.

pub mod clients;
pub mod logging;

//! # Registrar Sample App Library
//!
//! This library exposes the SDK integrations and the application harness
//! for integration testing.

pub mod clients;
pub mod lifecycle;

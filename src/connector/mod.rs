//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Text generation (Gemini, OpenAI, mock)
//! - Listing log (Google Sheets, in-memory)
//! - Secrets (process environment, static map)
//! - Delivery (axum web form, CLI controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::{build_router, Container, ContainerConfig, Provider};

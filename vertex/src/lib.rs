pub mod auth;
pub mod config;
pub mod models;
pub mod service;

pub use auth::{Authenticator, ServiceAccountKey};
pub use config::VertexConfig;
pub use models::*;
pub use service::{GeminiService, ModelError, TextModel};

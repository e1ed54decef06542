pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;

pub use error::{AppError, Result};
pub use models::{FollowingNetwork, Post};
pub use repository::{GraphRepository, PostgresGraphRepository};

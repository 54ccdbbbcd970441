mod alert;
mod api;
mod app;
mod config;
mod validation;

#[cfg(test)]
mod test_support;

pub use alert::{AlertError, AlertField};
pub use api::ApiError;
pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use validation::ValidationError;

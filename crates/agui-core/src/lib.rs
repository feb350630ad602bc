pub mod config;
pub mod error;

pub use config::AguiConfig;
pub use error::{AguiError, Result};

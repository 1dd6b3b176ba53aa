pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod figma;
pub mod llm;
pub mod prompt;
pub mod publish;
pub mod server;
pub mod spec;

pub use config::Config;
pub use error::AppError;

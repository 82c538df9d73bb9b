pub mod config;
pub mod export;
pub mod leave;
pub mod resolve;

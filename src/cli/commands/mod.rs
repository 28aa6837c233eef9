//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod init;
mod read;
mod render;
mod search;
mod serve;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use init::run_init;
pub use read::run_read;
pub use render::run_render;
pub use search::run_search;
pub use serve::run_serve;

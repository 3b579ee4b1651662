pub mod conversation;
pub mod errors;
pub mod generators;
pub mod models;
pub mod prompt_template;
pub mod providers;
pub mod render;
pub mod session;

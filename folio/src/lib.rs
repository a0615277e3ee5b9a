pub mod celebration;
pub mod commands;
pub mod environment;

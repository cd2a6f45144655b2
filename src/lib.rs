pub mod commands;
pub mod database;
pub mod error;
pub mod package;
pub mod resolver;
pub mod runtime;

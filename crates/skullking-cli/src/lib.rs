#![deny(warnings)]
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
pub mod session;
pub mod store;

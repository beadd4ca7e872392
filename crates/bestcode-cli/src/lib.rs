pub mod commands;
pub mod config;
pub mod trace_init;

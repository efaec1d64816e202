pub mod analyze;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod predict;
pub mod progress;
pub mod render;
pub mod report;
pub mod scanner;
pub mod session;
pub mod storage;

pub mod app;
pub mod config;
pub mod error;
pub mod providers;
pub mod state;
pub mod storage;

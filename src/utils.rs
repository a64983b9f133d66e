pub mod config;
pub mod errors;
pub mod registry;
pub mod worker_utils;

pub mod aggregate;
pub mod backup;
pub mod config;
pub mod filter;
pub mod import;
pub mod log;
pub mod logic;
pub mod tracker;

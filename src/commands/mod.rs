pub mod config;
pub mod export;
pub mod goals;
pub mod import;
pub mod monthly;
pub mod report;

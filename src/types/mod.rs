pub mod config;
pub mod decision;
pub mod report;

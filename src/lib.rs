pub mod api; // HTTP surface: router, error mapping, server lifecycle
pub mod catalog;
pub mod config;
pub mod engine; // Prediction strategies: table match + AI gateway
pub mod history;
pub mod models;

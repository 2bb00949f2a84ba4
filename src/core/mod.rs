pub mod aggregate;
pub mod client;
pub mod config;
pub mod formatter;
pub mod models;
pub mod normalize;
pub mod providers;

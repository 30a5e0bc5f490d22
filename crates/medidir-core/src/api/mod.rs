pub mod client;
pub mod endpoints;
pub mod filters;
pub mod models;
pub mod query;

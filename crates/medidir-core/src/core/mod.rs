pub mod auth;
pub mod controllers;
pub mod services;

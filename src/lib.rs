pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod og;
pub mod routes;
pub mod state;

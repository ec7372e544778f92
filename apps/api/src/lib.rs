pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod leads;
pub mod models;
pub mod notifier;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;

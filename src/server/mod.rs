pub mod app;
pub mod error_handlers;
pub mod pagination;
mod routes;

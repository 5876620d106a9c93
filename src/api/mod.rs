pub mod api;
mod docs;
pub(crate) mod dtos;
pub(crate) mod errors;
mod todos_handler;

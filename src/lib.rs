pub mod api;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod forms;
pub mod models;
pub mod state;
pub mod templates;

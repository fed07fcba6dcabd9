pub mod api;
pub mod composer;
pub mod config;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod scrapper;
pub mod trigger;

//! Tuvalix turns a Steam user's played library into a playtime mosaic.
//!
//! A handle is resolved to a canonical account id, the owned games are fetched,
//! unplayed titles dropped and the rest ranked by playtime. Each title is then
//! bucketed into one of seven size tiers and packed into a grid image.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod mosaic;
pub mod steam;
pub mod web;

pub use config::Config;
pub use error::AppError;

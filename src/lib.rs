// Terminal browser for a Figma team's projects, files, and pages.
// Listings are shown from the on-disk cache first and refreshed in the background.

pub mod actions;
pub mod app;
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod fetcher;
pub mod figma;
pub mod format;
pub mod logging;
pub mod notify;
pub mod state;
pub mod ui;

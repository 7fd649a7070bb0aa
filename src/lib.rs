//! Weather Uncle - Singapore weather, air quality and traffic assistant.

pub mod ai;
pub mod analysis;
pub mod bot;
pub mod config;
pub mod display;
pub mod feeds;
pub mod present;

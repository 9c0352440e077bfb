//! DCSS Shell Library
//!
//! Core of a native shell around the Dungeon Crawl Stone Soup WebTiles page:
//! the script bridge that turns key commands and text into page scripts, the
//! command bar, keyboard-driven layout and the container controller, plus a
//! terminal host and CLI built on top of them.

// Module declarations
pub mod app;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod shell;
pub mod tui;

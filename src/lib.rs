//! Campaign transparency tracker
//!
//! Polls a spreadsheet-backed transaction feed, keeps animated totals of
//! on-chain donations and expenses, and lets a contributor check that their
//! transaction was recorded.

pub mod api;
pub mod commands;
pub mod config;
pub mod display;
pub mod models;
pub mod services;
pub mod utils;

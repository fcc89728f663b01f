//! Internal modules for the tournament console.
//!
//! This library provides command parsing, configuration, the session that
//! drives a tournament, and the HTTP narrative adapter used by the st_cli
//! binary.

pub mod commands;
pub mod config;
pub mod http_narrator;
pub mod session;

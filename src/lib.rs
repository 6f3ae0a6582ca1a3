//! Hosts file manager with tag metadata.
//!
//! Lists, adds, edits and removes hosts file entries while keeping a JSON
//! map of hostname tags alongside the file. Every write is preceded by a
//! timestamped backup.
//!
//! The public API is organised into these layers:
//!
//! - **[`hosts`]**: entry parsing, the tag store, backups, the repository
//!   and the list view
//! - **[`config`]**: validated per-command options and resolved settings
//! - **[`commands`]**: subcommand orchestration over a [`hosts::HostsRepository`]
//! - **[`logging`]**: console and per-command log file output
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod platform;

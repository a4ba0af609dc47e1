//! Plumbing between the command line and the library crates.
//!
//! `data_pipeline` picks a statement source and fetches with a progress
//! spinner, `presenter` turns a report into text, files and exports, and
//! `commands` drives the subcommands on top of both.

pub(crate) mod commands;
pub(crate) mod data_pipeline;
pub(crate) mod presenter;

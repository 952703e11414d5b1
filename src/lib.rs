//! coursetree: course catalog lookup backed by an unbalanced binary search tree.
//!
//! Layers, innermost first:
//! - `domain`: course records, the line parser and the course tree
//! - `application`: the catalog service owning the live tree
//! - `infrastructure`: I/O boundary traits and service wiring
//! - `cli`: argument parsing, interactive menu, command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

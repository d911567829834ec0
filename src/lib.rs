//! foldersort - sort the files of a directory into category folders
//!
//! This library classifies the direct children of a directory by file
//! extension, moves them into per-category subdirectories (renaming on
//! collision), and reports what happened. The category table and exclusion
//! rules can be configured through a TOML file.

pub mod category_table;
pub mod cli;
pub mod config;
pub mod mover;
pub mod organizer;
pub mod output;

pub use category_table::{CategoryTable, OTHERS, TableError};
pub use config::{CompiledFilters, Config, ConfigError};
pub use mover::{FileMover, FsMover};
pub use organizer::{FileOutcome, MoveResult, OrganizeError, Organizer};

pub use cli::{Cli, run_cli, run_cli_with_output};

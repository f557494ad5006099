// SPDX-License-Identifier: MPL-2.0

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod naming;
pub mod parse;
pub mod print;
pub mod roster;
pub mod schema;

pub use error::{Error, Result};

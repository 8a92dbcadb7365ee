// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal front end for Jungle: command parsing, rendering, player names,
//! configuration and the interactive controller.

#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod controller;
pub mod names;
pub mod render;

pub use command::{parse_command, Command, CommandError};
pub use config::CliConfig;
pub use controller::{GameController, Outcome};

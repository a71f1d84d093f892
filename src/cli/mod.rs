//! Command-line interface: argument parsing and the interactive menu.

pub mod args;
pub mod menu;

pub use args::{Args, Command, DownloadArgs};
pub use menu::{parse_yes_no, Menu, MenuChoice};

//! A contact book driven by one-line text commands.
//!
//! The [`Assistant`] owns a [`session::Session`] (the contact book plus the
//! exit flag) and a list of [`command::CommandFactory`] objects that turn a
//! command name and its arguments into something executable. Built-in
//! commands parse their arguments with [`argh`], so a wrong argument count
//! is a format error. Argument tokens are always data, never flags.

mod builtin;
pub mod book;
pub mod command;
pub mod error;
mod interpreter;
pub mod session;

pub use error::BotError;
pub use interpreter::Assistant;

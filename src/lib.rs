//! Four small command-line exercises sharing one crate.
//!
//! - [`salary`] sums and averages a `name,salary` file.
//! - [`cats`] reads an `id,name,age` file into [`CatRecord`]s.
//! - [`tree`] prints a directory tree with depth indentation.
//! - [`bot`] is an interactive contact book driven by text commands.
//!
//! Each exercise has a matching binary under `src/bin`. The library side
//! never prints: it returns values and typed errors, and the binaries
//! decide how to render them through [`render::Palette`].

pub mod amount;
pub mod bot;
pub mod cats;
pub mod error;
pub mod lines;
pub mod logging;
pub mod render;
pub mod salary;
pub mod tree;

pub use bot::Assistant;
pub use cats::{CatRecord, get_cats_info, get_cats_info_or_empty};
pub use error::DataFileError;
pub use salary::{SalaryReport, total_salary};

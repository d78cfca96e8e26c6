use anyhow::{Context, Result};
use argh::FromArgs;
use course_tasks::logging;
use course_tasks::render::Palette;
use course_tasks::tree::{TreeError, print_tree};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(FromArgs)]
/// Print a directory tree, one entry per line, indented by depth.
struct Args {
    #[argh(positional)]
    /// directory to print; defaults to the current directory.
    path: Option<PathBuf>,

    #[argh(option, default = "String::from(\"warn\")")]
    /// log level: error, warn, info, debug or trace.
    log_level: String,

    #[argh(switch)]
    /// disable colored output.
    no_color: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    logging::init(&args.log_level);
    let palette = Palette::detect(args.no_color);

    let root = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("can't read the current directory")?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match print_tree(&root, &mut out, &palette) {
        Ok(()) => {}
        Err(err @ TreeError::NotFound { .. }) => {
            writeln!(out, "{}", palette.error(&format!("Error: {}", err)))?;
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to walk {}", root.display()));
        }
    }
    Ok(())
}

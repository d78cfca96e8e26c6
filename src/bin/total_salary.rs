use anyhow::Result;
use argh::FromArgs;
use course_tasks::render::Palette;
use course_tasks::{DataFileError, logging, total_salary};
use std::path::PathBuf;

#[derive(FromArgs)]
/// Sum and average the salaries of a `name,salary` file.
struct Args {
    #[argh(positional)]
    /// file with one `name,salary` record per line.
    path: PathBuf,

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

    match total_salary(&args.path) {
        Ok(report) => {
            for line in &report.malformed {
                println!("{}", palette.error(&line.message()));
            }
            println!(
                "Total salary: {}, Average salary: {}",
                report.total, report.average
            );
        }
        Err(err @ DataFileError::NotFound { .. }) => {
            println!("{}", palette.error(&format!("Error: {}", err)));
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

use anyhow::Result;
use argh::FromArgs;
use course_tasks::lines::Parsed;
use course_tasks::render::Palette;
use course_tasks::{DataFileError, get_cats_info, logging};
use std::path::PathBuf;

#[derive(FromArgs)]
/// Print the cats listed in an `id,name,age` file.
struct Args {
    #[argh(positional)]
    /// file with one `id,name,age` record per line.
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

    let parsed = match get_cats_info(&args.path) {
        Ok(parsed) => parsed,
        Err(err @ DataFileError::NotFound { .. }) => {
            println!("{}", palette.error(&format!("Error: {}", err)));
            Parsed::default()
        }
        Err(err) => return Err(err.into()),
    };

    for line in &parsed.malformed {
        println!("{}", palette.error(&line.message()));
    }
    let cats: Vec<String> = parsed.records.iter().map(ToString::to_string).collect();
    println!("[{}]", cats.join(", "));
    Ok(())
}

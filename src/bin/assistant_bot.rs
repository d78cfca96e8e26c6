use anyhow::{Context, Result};
use argh::FromArgs;
use course_tasks::render::Palette;
use course_tasks::{Assistant, logging};
use crossterm::tty::IsTty;
use std::io;

#[derive(FromArgs)]
/// Interactive contact book. Type `help` once it starts.
struct Args {
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

    let mut bot = Assistant::default();
    if io::stdin().is_tty() {
        bot.repl(&palette).context("line editor failed")?;
    } else {
        bot.run(io::stdin().lock(), &mut io::stdout(), &palette)
            .context("can't talk over stdin/stdout")?;
    }
    Ok(())
}

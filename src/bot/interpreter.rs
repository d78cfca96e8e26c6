use crate::bot::book::ContactBook;
use crate::bot::command::{CommandFactory, CommandResult, Reply};
use crate::bot::error::BotError;
use crate::bot::session::Session;
use crate::render::Palette;
use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};

const WELCOME: &str = "Welcome to the assistant bot!";
const FAREWELL: &str = "Good bye!";
const PROMPT: &str = "Enter a command: ";
const IDENT: &str = " ";
const NO_ITEMS: &str = "There are no items yet.";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The contact assistant: a session plus the commands that act on it.
///
/// Example
/// ```
/// use course_tasks::Assistant;
/// let mut bot = Assistant::default();
/// bot.handle("add alice 1234567890").unwrap().unwrap();
/// assert!(bot.handle("phone ALICE").unwrap().is_ok());
/// ```
pub struct Assistant {
    session: Session,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Assistant {
    /// Create an assistant with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        let help = commands
            .iter()
            .map(|factory| {
                let (usage, description) = factory.usage();
                (usage.to_string(), description.to_string())
            })
            .collect();
        Self {
            session: Session::new(help),
            commands,
        }
    }

    pub fn book(&self) -> &ContactBook {
        &self.session.book
    }

    /// True once `exit` or `close` ran.
    pub fn is_finished(&self) -> bool {
        self.session.should_exit
    }

    /// Run one input line. Blank lines give `None`.
    ///
    /// The first word is the command, matched case-insensitively; the rest
    /// are its arguments.
    pub fn handle(&mut self, line: &str) -> Option<CommandResult> {
        let (name, args) = parse_input(line)?;
        debug!("command {:?} with {} argument(s)", name, args.len());
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&name, &args) {
                return Some(cmd.execute(&mut self.session));
            }
        }
        Some(Err(BotError::InvalidCommand))
    }

    /// Interactive loop on the terminal with line editing and history.
    ///
    /// Ends on `exit`/`close`, Ctrl-C or end of input.
    pub fn repl(&mut self, palette: &Palette) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;
        println!("{}", palette.success(WELCOME));

        while !self.is_finished() {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    for out in self.respond(&line, palette) {
                        println!("{}", out);
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{}", palette.success(FAREWELL));
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Same loop over any line source, without prompts. Used when stdin is
    /// not a terminal.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
        palette: &Palette,
    ) -> io::Result<()> {
        writeln!(output, "{}", palette.success(WELCOME))?;
        for line in input.lines() {
            let line = line?;
            for out in self.respond(&line, palette) {
                writeln!(output, "{}", out)?;
            }
            if self.is_finished() {
                return Ok(());
            }
        }
        writeln!(output, "{}", palette.success(FAREWELL))
    }

    fn respond(&mut self, line: &str, palette: &Palette) -> Vec<String> {
        match self.handle(line) {
            Some(result) => render(&result, palette),
            None => Vec::new(),
        }
    }
}

impl Default for Assistant {
    /// Create an assistant with every built-in command:
    /// `hello`, `add`, `change`, `phone`, `all`, `help`, `exit`/`close`.
    fn default() -> Self {
        use crate::bot::builtin::*;
        Self::new(vec![
            Box::new(Factory::<Hello>::default()),
            Box::new(Factory::<Add>::default()),
            Box::new(Factory::<Change>::default()),
            Box::new(Factory::<PhoneOf>::default()),
            Box::new(Factory::<All>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Exit>::default()),
        ])
    }
}

/// Split a line into a lower-case command name and its arguments.
fn parse_input(line: &str) -> Option<(String, Vec<&str>)> {
    let mut words = line.split_whitespace();
    let name = words.next()?.to_lowercase();
    Some((name, words.collect()))
}

/// Turn a command outcome into output lines.
fn render(result: &CommandResult, palette: &Palette) -> Vec<String> {
    match result {
        Ok(Reply::Message(text)) => vec![format!("{}{}", IDENT, palette.success(text))],
        Ok(Reply::Listing(rows)) if rows.is_empty() => {
            vec![format!("{}{}", IDENT, palette.error(NO_ITEMS))]
        }
        Ok(Reply::Listing(rows)) => rows
            .iter()
            .map(|(key, value)| {
                format!("{}{}: {}", IDENT, palette.key(key), palette.value(value))
            })
            .collect(),
        Err(err) => vec![format!("{}{}", IDENT, palette.error(&err.to_string()))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::book::Username;
    use std::io::Cursor;

    fn run_script(script: &str) -> (Assistant, String) {
        let mut bot = Assistant::default();
        let mut out = Vec::new();
        bot.run(Cursor::new(script.to_string()), &mut out, &Palette::plain())
            .unwrap();
        (bot, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(
            parse_input("add   Alice   1234567890"),
            Some(("add".to_string(), vec!["Alice", "1234567890"]))
        );
        assert_eq!(parse_input("HELLO"), Some(("hello".to_string(), vec![])));
        assert_eq!(
            parse_input("AdD Alice 123"),
            Some(("add".to_string(), vec!["Alice", "123"]))
        );
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("   "), None);
    }

    #[test]
    fn test_unknown_command() {
        let mut bot = Assistant::default();
        assert_eq!(bot.handle("fly away"), Some(Err(BotError::InvalidCommand)));
        assert!(!bot.is_finished());
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let mut bot = Assistant::default();
        assert_eq!(bot.handle("  "), None);
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        let mut bot = Assistant::default();
        assert!(bot.handle("ADD alice 1234567890").unwrap().is_ok());
        assert_eq!(
            bot.handle("Phone ALICE"),
            Some(Ok(Reply::Message("Alice's phone is 1234567890".into())))
        );
    }

    #[test]
    fn test_complete_workflow() {
        let (bot, out) = run_script(
            "hello\n\
             add Alice 1234567890\n\
             phone alice\n\
             change alice 9876543210\n\
             phone Alice\n\
             all\n\
             exit\n\
             add Late 1111111111\n",
        );

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Welcome to the assistant bot!",
                " How can I help you?",
                " Contact added.",
                " Alice's phone is 1234567890",
                " Contact updated.",
                " Alice's phone is 9876543210",
                " Alice: 9876543210",
                " Good bye!",
            ]
        );
        assert!(bot.is_finished());
        assert!(bot.book().phone(&Username::new("late")).is_none());
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (bot, out) = run_script(
            "all\n\
             add Alice\n\
             add Alice 123\n\
             change Bob 1234567890\n\
             phone Bob\n\
             jump\n\
             add Alice 1234567890\n",
        );

        assert!(out.contains(" There are no items yet."));
        assert!(out.contains("Command's format is wrong"));
        assert!(out.contains("Phone '123' is not matching valid format"));
        assert!(out.contains("User with username 'Bob' doesn't exist"));
        assert!(out.contains("There is no user with name Bob"));
        assert!(out.contains("Invalid command"));
        assert!(out.contains(" Contact added."));
        // input ran out without exit
        assert!(out.trim_end().ends_with("Good bye!"));
        assert!(!bot.is_finished());
        assert_eq!(bot.book().len(), 1);
    }

    #[test]
    fn test_close_is_an_alias_for_exit() {
        let (bot, out) = run_script("close\n");
        assert!(bot.is_finished());
        assert!(out.contains("Good bye!"));
    }

    #[test]
    fn test_exit_ignores_extra_arguments() {
        for script in ["exit -f\nadd Late 1111111111\n", "close --help\nall\n", "EXIT now please\n"] {
            let (bot, out) = run_script(script);
            assert!(bot.is_finished(), "{script:?} should stop the loop");
            assert!(bot.book().is_empty());
            assert_eq!(out.lines().last(), Some(" Good bye!"));
            assert!(!out.contains("format is wrong"));
        }
    }

    #[test]
    fn test_flag_like_arguments_are_data() {
        let (bot, out) = run_script(
            "add help 1234567890\n\
             phone help\n\
             add bob -123-456-7890\n\
             add a -- 1234567890\n\
             all\n",
        );

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Welcome to the assistant bot!",
                " Contact added.",
                " Help's phone is 1234567890",
                " Contact added.",
                " Command's format is wrong. Please use 'help' to check list of commands",
                " Bob: -123-456-7890",
                " Help: 1234567890",
                "Good bye!",
            ]
        );
        assert_eq!(bot.book().len(), 2);
        assert!(bot.book().phone(&Username::new("a")).is_none());
    }

    #[test]
    fn test_help_lists_every_command() {
        let (_, out) = run_script("help\n");
        for usage in [
            "hello",
            "add <username> <phone number>",
            "change <username> <phone number>",
            "phone <username>",
            "all",
            "help",
            "exit or close",
        ] {
            assert!(out.contains(&format!(" {}: ", usage)), "missing {usage}");
        }
    }

    #[test]
    fn test_lookups_are_idempotent() {
        let mut bot = Assistant::default();
        let _ = bot.handle("add bob 2222222222");
        let _ = bot.handle("add alice 1111111111");
        let first = (bot.handle("all"), bot.handle("phone bob"));
        let second = (bot.handle("all"), bot.handle("phone bob"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_colored_error() {
        let lines = render(&Err(BotError::InvalidCommand), &Palette::colored());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\u{1b}["));
        assert!(lines[0].contains("Invalid command"));
    }
}

use crate::bot::book::{Phone, Username};
use crate::bot::command::{CommandFactory, CommandResult, ExecutableCommand, Reply};
use crate::bot::error::BotError;
use crate::bot::interpreter::Factory;
use crate::bot::session::Session;
use argh::{EarlyExit, FromArgs};
use log::{debug, info};

/// Commands known to the assistant at compile time.
///
/// Arguments are parsed with [`argh`] (`FromArgs`), so arity is checked
/// before `execute` ever runs. User tokens are never read as flags.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Lower-case names the command answers to.
    fn names() -> &'static [&'static str];

    /// `(usage, description)` for `help`.
    fn usage() -> (&'static str, &'static str);

    fn execute(self, session: &mut Session) -> CommandResult;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, session: &mut Session) -> CommandResult {
        T::execute(*self, session)
    }
}

/// Stand-in for a command whose arguments did not parse.
struct InvalidArgs {
    output: String,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, _session: &mut Session) -> CommandResult {
        debug!("rejected arguments: {}", self.output.trim_end());
        Err(BotError::WrongFormat)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if T::names().contains(&name) {
            // Everything the user typed is data: `help`, `--` or `-123...`
            // must reach the command as plain positionals.
            let mut argv = Vec::with_capacity(args.len() + 1);
            argv.push("--");
            argv.extend_from_slice(args);
            Some(match T::from_args(&[name], &argv) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, .. }) => Box::new(InvalidArgs { output }),
            })
        } else {
            None
        }
    }

    fn usage(&self) -> (&'static str, &'static str) {
        T::usage()
    }
}

#[derive(FromArgs)]
/// Say hello.
pub struct Hello {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Hello {
    fn names() -> &'static [&'static str] {
        &["hello"]
    }

    fn usage() -> (&'static str, &'static str) {
        ("hello", "just to get a nice greeting :)")
    }

    fn execute(self, _session: &mut Session) -> CommandResult {
        Ok(Reply::Message("How can I help you?".to_string()))
    }
}

#[derive(FromArgs)]
/// Add a new contact.
pub struct Add {
    #[argh(positional)]
    /// contact name; case does not matter.
    pub username: String,

    #[argh(positional)]
    /// 10 to 15 digits, optionally with spaces, dashes, dots, parentheses or a plus.
    pub phone: String,
}

impl BuiltinCommand for Add {
    fn names() -> &'static [&'static str] {
        &["add"]
    }

    fn usage() -> (&'static str, &'static str) {
        ("add <username> <phone number>", "to add a user with their phone.")
    }

    fn execute(self, session: &mut Session) -> CommandResult {
        let username = Username::new(&self.username);
        let phone = Phone::parse(&self.phone)?;
        session.book.add(username.clone(), phone)?;
        info!("added contact {}", username);
        Ok(Reply::Message("Contact added.".to_string()))
    }
}

#[derive(FromArgs)]
/// Change the phone of an existing contact.
pub struct Change {
    #[argh(positional)]
    /// contact name; case does not matter.
    pub username: String,

    #[argh(positional)]
    /// the new phone number.
    pub phone: String,
}

impl BuiltinCommand for Change {
    fn names() -> &'static [&'static str] {
        &["change"]
    }

    fn usage() -> (&'static str, &'static str) {
        ("change <username> <phone number>", "to update the user's phone.")
    }

    fn execute(self, session: &mut Session) -> CommandResult {
        let username = Username::new(&self.username);
        let phone = Phone::parse(&self.phone)?;
        session.book.change(&username, phone)?;
        info!("changed contact {}", username);
        Ok(Reply::Message("Contact updated.".to_string()))
    }
}

#[derive(FromArgs)]
/// Show the phone of a contact.
pub struct PhoneOf {
    #[argh(positional)]
    /// contact name; case does not matter.
    pub username: String,
}

impl BuiltinCommand for PhoneOf {
    fn names() -> &'static [&'static str] {
        &["phone"]
    }

    fn usage() -> (&'static str, &'static str) {
        ("phone <username>", "to get the phone of the user.")
    }

    fn execute(self, session: &mut Session) -> CommandResult {
        let username = Username::new(&self.username);
        match session.book.phone(&username) {
            Some(phone) => Ok(Reply::Message(format!("{}'s phone is {}", username, phone))),
            None => Err(BotError::NoSuchUser(username.to_string())),
        }
    }
}

#[derive(FromArgs)]
/// List every contact.
pub struct All {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for All {
    fn names() -> &'static [&'static str] {
        &["all"]
    }

    fn usage() -> (&'static str, &'static str) {
        ("all", "to get the list of all users and their phones.")
    }

    fn execute(self, session: &mut Session) -> CommandResult {
        let rows = session
            .book
            .iter()
            .map(|(username, phone)| (username.to_string(), phone.to_string()))
            .collect();
        Ok(Reply::Listing(rows))
    }
}

#[derive(FromArgs)]
/// List the available commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn names() -> &'static [&'static str] {
        &["help"]
    }

    fn usage() -> (&'static str, &'static str) {
        ("help", "to see this list.")
    }

    fn execute(self, session: &mut Session) -> CommandResult {
        Ok(Reply::Listing(session.help.clone()))
    }
}

#[derive(FromArgs)]
/// Stop the assistant.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn names() -> &'static [&'static str] {
        &["exit", "close"]
    }

    fn usage() -> (&'static str, &'static str) {
        ("exit or close", "to stop the assistant.")
    }

    fn execute(self, session: &mut Session) -> CommandResult {
        session.should_exit = true;
        Ok(Reply::Message("Good bye!".to_string()))
    }
}

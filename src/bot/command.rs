use crate::bot::error::BotError;
use crate::bot::session::Session;

/// What a successful command hands back to the loop for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A single line of regular output.
    Message(String),
    /// `name: value` rows. An empty listing is shown as "no items".
    Listing(Vec<(String, String)>),
}

/// Outcome of one command. Errors are reported and the loop goes on.
pub type CommandResult = Result<Reply, BotError>;

/// Object-safe trait for anything the assistant can run.
///
/// Implemented for every built-in via a blanket impl.
pub trait ExecutableCommand {
    fn execute(self: Box<Self>, session: &mut Session) -> CommandResult;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize `name`. `name` is
/// already lower-case.
pub trait CommandFactory {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;

    /// `(usage, description)` shown by `help`.
    fn usage(&self) -> (&'static str, &'static str);
}

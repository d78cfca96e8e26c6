use thiserror::Error;

/// Everything a single command can fail with. None of these end the loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    /// Wrong number of arguments or an unparseable argument list.
    #[error("Command's format is wrong. Please use 'help' to check list of commands")]
    WrongFormat,

    #[error("Phone '{0}' is not matching valid format. Should be digits only 10 to 15 length.")]
    InvalidPhone(String),

    #[error("User '{username}' already exists with phone {phone}. Use 'change' to update it.")]
    AlreadyExists { username: String, phone: String },

    #[error("User with username '{0}' doesn't exist")]
    DoesNotExist(String),

    #[error("There is no user with name {0}")]
    NoSuchUser(String),

    #[error("Invalid command. Please use 'help' to check list of commands")]
    InvalidCommand,
}

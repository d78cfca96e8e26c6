use crate::bot::book::ContactBook;

/// State owned by one running assistant.
///
/// - `book`: the contacts, created empty and dropped with the session.
/// - `should_exit`: set by `exit`/`close`; the loop stops once it is true.
/// - `help`: `(usage, description)` rows shown by `help`, one per command.
///
/// Fields are public so commands can reach them directly.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub book: ContactBook,
    pub should_exit: bool,
    pub help: Vec<(String, String)>,
}

impl Session {
    pub fn new(help: Vec<(String, String)>) -> Self {
        Self {
            book: ContactBook::new(),
            should_exit: false,
            help,
        }
    }
}

//! Classification of driver errors into [`DeckhandError`].

use deckhand_common::error::DeckhandError;

/// What the failing statement was doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Statement {
    /// Establishing or probing a connection.
    Connect,
    /// A select, update or delete.
    Query,
    /// An insert.
    Insert,
}

pub(crate) fn from_sqlx(err: &sqlx::Error, statement: Statement) -> DeckhandError {
    let message = err.to_string();
    match err {
        sqlx::Error::Configuration(_) => DeckhandError::config(message),
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => DeckhandError::Connection { message },
        _ if statement == Statement::Connect => DeckhandError::Connection { message },
        sqlx::Error::Database(_) if statement == Statement::Insert => {
            DeckhandError::Write { message }
        }
        _ => DeckhandError::Query { message },
    }
}

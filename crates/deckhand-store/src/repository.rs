//! The operations every table exposes.

use deckhand_common::error::{DeckhandError, Result};

/// Single-table CRUD over rows of one entity type.
///
/// Mutations target one row by primary key and run as one auto-committed
/// statement. There is no existence check before an update or delete: a
/// statement that reports zero affected rows fails with
/// [`DeckhandError::NotFound`](deckhand_common::error::DeckhandError::NotFound).
pub trait Repository {
    /// Row type.
    type Entity;
    /// Primary key type.
    type Id: ?Sized;
    /// Status column type.
    type Status;

    /// Returns at most `limit` rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns a connection or query error if the statement fails.
    fn list(&self, limit: u32) -> Result<Vec<Self::Entity>>;

    /// Returns the row with primary key `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::NotFound`](deckhand_common::error::DeckhandError::NotFound)
    /// if no row matches.
    fn get(&self, id: &Self::Id) -> Result<Self::Entity>;

    /// Inserts a fully specified row.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::Write`](deckhand_common::error::DeckhandError::Write)
    /// if the database rejects the row, e.g. on a duplicate id.
    fn create(&self, entity: &Self::Entity) -> Result<()>;

    /// Sets the status column of row `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::NotFound`](deckhand_common::error::DeckhandError::NotFound)
    /// if no row was affected.
    fn update_status(&self, id: &Self::Id, status: Self::Status) -> Result<()>;

    /// Deletes row `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::NotFound`](deckhand_common::error::DeckhandError::NotFound)
    /// if no row was affected.
    fn delete(&self, id: &Self::Id) -> Result<()>;
}

/// Fails with `NotFound` when a keyed mutation touched no row.
pub(crate) fn expect_affected(rows_affected: u64, kind: &'static str, id: &str) -> Result<()> {
    if rows_affected == 0 {
        return Err(DeckhandError::NotFound {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use deckhand_common::error::ErrorKind;

    use super::*;

    #[test]
    fn zero_rows_is_not_found() {
        let err = expect_affected(0, "container", "abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "container not found: abc");
    }

    #[test]
    fn any_affected_row_succeeds() {
        expect_affected(1, "container", "abc").unwrap();
    }
}

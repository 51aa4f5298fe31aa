//! Database initialization for the application.

use rusqlite::Connection;

use crate::{Error, category::create_category_table};

/// Create the application's tables if they do not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_category_table(connection)?;

    Ok(())
}

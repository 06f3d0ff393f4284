pub mod schema;

use crate::error::AppError;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// File name of the client database inside the data directory
pub const DATABASE_FILE: &str = "memeverse.db";

/// Returns the path to the database file for a data directory
pub fn get_database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

/// Opens (or creates) the database with the full schema
pub fn init_database(data_dir: &Path) -> Result<Connection, AppError> {
    let db_path = get_database_path(data_dir);

    // Make sure the directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(&db_path)?;
    schema::init_schema(&conn)?;

    log::debug!("Database ready at {}", db_path.display());
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path() {
        let path = get_database_path(Path::new("./data"));
        assert_eq!(path, PathBuf::from("./data/memeverse.db"));
    }
}

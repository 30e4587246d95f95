use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use std::path::Path;

use crate::error::HubError;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Create a read-only SQLite connection pool for the given database file.
///
/// The trade store is this service's only data source, so a missing or
/// unopenable file is an error the caller treats as fatal at startup.
pub fn open_ro_pool(path: &Path, max_size: u32) -> Result<DbPool, HubError> {
    if !path.exists() {
        return Err(HubError::Db(format!("trades DB not found: {}", path.display())));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;
    let manager = SqliteConnectionManager::file(path).with_flags(flags);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(Into::into)
}

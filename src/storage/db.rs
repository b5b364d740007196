use chrono::Utc;
use redb::{Database as RedbDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use thiserror::Error;

use super::models::RefreshRecord;
use super::{CredentialStore, StoreError};

/// Refresh records: user_id -> RefreshRecord (bincode)
const CREDENTIALS: TableDefinition<&str, &[u8]> = TableDefinition::new("credentials");

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),
}

pub struct Database {
    db: RedbDatabase,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(data_dir.as_ref())?;
        let db_path = data_dir.as_ref().join("token-mint.redb");
        let db = RedbDatabase::create(db_path)?;

        // Create the table if it doesn't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CREDENTIALS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Store a refresh record, replacing any prior record for the user
    pub fn put_record(&self, record: &RefreshRecord) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CREDENTIALS)?;
            let data = bincode::serialize(record)?;
            table.insert(record.user_id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get the current refresh record for a user
    pub fn get_record(&self, user_id: &str) -> Result<Option<RefreshRecord>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CREDENTIALS)?;

        match table.get(user_id)? {
            Some(data) => {
                let record: RefreshRecord = bincode::deserialize(data.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}

impl CredentialStore for Database {
    fn save(&self, user_id: &str, secret_hash: &str, origin: &str) -> Result<(), StoreError> {
        let record = RefreshRecord {
            origin: origin.to_string(),
            rotated_at: Utc::now(),
            secret_hash: secret_hash.to_string(),
            user_id: user_id.to_string(),
        };
        self.put_record(&record)?;
        Ok(())
    }

    fn fetch(&self, user_id: &str) -> Result<RefreshRecord, StoreError> {
        self.get_record(user_id)?.ok_or(StoreError::NotFound)
    }
}

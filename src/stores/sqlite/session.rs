//! Implements a SQLite backed session store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Session, UserID},
    stores::SessionStore,
};

/// Stores sessions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteSessionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSessionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl SessionStore for SQLiteSessionStore {
    fn create(&mut self, user_id: UserID, ttl: Duration) -> Result<Session, Error> {
        let session = Session {
            user_id,
            token: Uuid::new_v4().to_string(),
            expires_at: OffsetDateTime::now_utc() + ttl,
        };

        self.connection.lock().unwrap().execute(
            "INSERT INTO session (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
            (
                &session.token,
                session.user_id.as_i64(),
                session.expires_at,
            ),
        )?;

        Ok(session)
    }

    fn get_by_token(&self, token: &str) -> Result<Session, Error> {
        let session = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT token, user_id, expires_at FROM session WHERE token = :token")?
            .query_row(&[(":token", &token)], Self::map_row)?;

        Ok(session)
    }

    fn delete(&mut self, token: &str) -> Result<(), Error> {
        self.connection
            .lock()
            .unwrap()
            .execute("DELETE FROM session WHERE token = ?1", (token,))?;

        Ok(())
    }
}

impl CreateTable for SQLiteSessionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS session (
                token TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL,
                expires_at TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteSessionStore {
    type ReturnType = Session;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Session {
            token: row.get(offset)?,
            user_id: UserID::new(row.get(offset + 1)?),
            expires_at: row.get(offset + 2)?,
        })
    }
}

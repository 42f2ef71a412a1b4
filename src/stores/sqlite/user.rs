//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{User, UserID, UserProfile},
    stores::UserStore,
};

/// Stores users in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const USER_COLUMNS: &str = "id, external_id, email, name, picture, created_at";

impl UserStore for SQLiteUserStore {
    fn upsert(&mut self, profile: UserProfile) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO user (external_id, email, name, picture, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(external_id) DO UPDATE SET
                    email = excluded.email,
                    name = excluded.name,
                    picture = excluded.picture
                 RETURNING id, external_id, email, name, picture, created_at",
            )?
            .query_row(
                (
                    profile.external_id,
                    profile.email,
                    profile.name,
                    profile.picture,
                    OffsetDateTime::now_utc(),
                ),
                Self::map_row,
            )?;

        Ok(user)
    }

    fn get(&self, user_id: UserID) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE id = :id"))?
            .query_row(&[(":id", &user_id.as_i64())], Self::map_row)?;

        Ok(user)
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                external_id TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL,
                name TEXT NOT NULL,
                picture TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(User {
            id: UserID::new(row.get(offset)?),
            external_id: row.get(offset + 1)?,
            email: row.get(offset + 2)?,
            name: row.get(offset + 3)?,
            picture: row.get(offset + 4)?,
            created_at: row.get(offset + 5)?,
        })
    }
}

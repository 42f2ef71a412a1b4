//! Implements a SQLite backed category store.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, DatabaseID, NewCategory, UserID},
    stores::CategoryStore,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const CATEGORY_COLUMNS: &str = "id, user_id, name, icon, color, is_default, created_at";

impl CategoryStore for SQLiteCategoryStore {
    fn create(&mut self, category: NewCategory) -> Result<Category, Error> {
        let created = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO category (user_id, name, icon, color, is_default, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING {CATEGORY_COLUMNS}"
            ))?
            .query_row(
                (
                    category.user_id.map(|user_id| user_id.as_i64()),
                    category.name.as_ref(),
                    category.icon,
                    category.color,
                    category.is_default,
                    OffsetDateTime::now_utc(),
                ),
                Self::map_row,
            )?;

        Ok(created)
    }

    fn get(&self, category_id: DatabaseID) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category WHERE id = :id"
            ))?
            .query_row(&[(":id", &category_id)], Self::map_row)?;

        Ok(category)
    }

    fn get_by_ids(&self, ids: &HashSet<DatabaseID>) -> Result<Vec<Category>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let parameters: Vec<Value> = ids.iter().map(|id| Value::Integer(*id)).collect();

        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category WHERE id IN ({placeholders})"
            ))?
            .query_map(params_from_iter(parameters.iter()), Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::from))
            .collect()
    }

    fn get_defaults(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category WHERE is_default = 1"
            ))?
            .query_map([], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::from))
            .collect()
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category WHERE user_id = :user_id"
            ))?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::from))
            .collect()
    }

    fn delete(&mut self, user_id: UserID, category_id: DatabaseID) -> Result<(), Error> {
        // The predicate excludes built-ins in the same statement so a default
        // ID reads as not found no matter which user asks.
        let affected = self.connection.lock().unwrap().execute(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2 AND is_default = 0",
            (category_id, user_id.as_i64()),
        )?;

        if affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER,
                name TEXT NOT NULL,
                icon TEXT NOT NULL,
                color TEXT NOT NULL,
                is_default INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let user_id: Option<i64> = row.get(offset + 1)?;
        let raw_name: String = row.get(offset + 2)?;

        Ok(Category {
            id: row.get(offset)?,
            user_id: user_id.map(UserID::new),
            name: CategoryName::new_unchecked(&raw_name),
            icon: row.get(offset + 3)?,
            color: row.get(offset + 4)?,
            is_default: row.get(offset + 5)?,
            created_at: row.get(offset + 6)?,
        })
    }
}

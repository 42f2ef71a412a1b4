//! Implements a SQLite backed transaction store.
//!
//! Every read and mutation of an existing row carries the owner's ID in the
//! WHERE clause, so "not mine" and "does not exist" are the same outcome at
//! the SQL level.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{
        DatabaseID, NewTransaction, Transaction, TransactionKind, TransactionUpdate, UserID,
    },
    pagination::PageParams,
    stores::{TransactionPage, TransactionStore},
    summary::{CategoryTotal, DateWindow, MonthlyAggregate, MonthlyRow, merge_monthly_rows},
};

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction depends on the [User](crate::models::User)
/// model, the user table must be set up in the database. The category
/// reference is deliberately weak (no foreign key): deleting a category
/// leaves its transactions in place.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const TRANSACTION_COLUMNS: &str =
    "id, user_id, category_id, kind, amount, description, date, created_at, updated_at";

impl TransactionStore for SQLiteTransactionStore {
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let now = OffsetDateTime::now_utc();

        let created = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO \"transaction\"
                    (user_id, category_id, kind, amount, description, date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    transaction.user_id.as_i64(),
                    transaction.category_id,
                    transaction.kind,
                    transaction.amount,
                    transaction.description,
                    transaction.date,
                    now,
                ),
                Self::map_row,
            )?;

        Ok(created)
    }

    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        changes: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let updated = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET category_id = ?1, kind = ?2, amount = ?3, description = ?4, date = ?5,
                     updated_at = ?6
                 WHERE id = ?7 AND user_id = ?8
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    changes.category_id,
                    changes.kind,
                    changes.amount,
                    changes.description,
                    changes.date,
                    OffsetDateTime::now_utc(),
                    id,
                    user_id.as_i64(),
                ),
                Self::map_row,
            )?;

        Ok(updated)
    }

    fn delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error> {
        let affected = self.connection.lock().unwrap().execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn get_page(&self, user_id: UserID, params: PageParams) -> Result<TransactionPage, Error> {
        let connection = self.connection.lock().unwrap();

        let total: i64 = connection.query_row(
            "SELECT COUNT(id) FROM \"transaction\" WHERE user_id = ?1",
            (user_id.as_i64(),),
            |row| row.get(0),
        )?;

        // SQLite binds integers as i64; paging values past that range can
        // only ever address empty pages, so they are clamped.
        let limit = i64::try_from(params.page_size).unwrap_or(i64::MAX);
        let offset = i64::try_from(params.offset()).unwrap_or(i64::MAX);

        let transactions = connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
                 WHERE user_id = ?1
                 ORDER BY date DESC, id DESC
                 LIMIT ?2 OFFSET ?3"
            ))?
            .query_map((user_id.as_i64(), limit, offset), Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TransactionPage {
            transactions,
            total: total as u64,
        })
    }

    fn monthly_aggregate(
        &self,
        user_id: UserID,
        window: DateWindow,
    ) -> Result<Vec<MonthlyAggregate>, Error> {
        let connection = self.connection.lock().unwrap();

        let map = |row: &Row| -> Result<MonthlyRow, rusqlite::Error> {
            Ok(MonthlyRow {
                year: row.get(0)?,
                month: row.get(1)?,
                kind: row.get(2)?,
                total: row.get(3)?,
            })
        };

        let rows: Vec<MonthlyRow> = match window.until {
            Some(until) => connection
                .prepare(
                    "SELECT CAST(strftime('%Y', date) AS INTEGER) AS year,
                            CAST(strftime('%m', date) AS INTEGER) AS month,
                            kind, SUM(amount)
                     FROM \"transaction\"
                     WHERE user_id = ?1 AND date >= ?2 AND date < ?3
                     GROUP BY year, month, kind",
                )?
                .query_map((user_id.as_i64(), window.since, until), map)?
                .collect::<Result<_, _>>()?,
            None => connection
                .prepare(
                    "SELECT CAST(strftime('%Y', date) AS INTEGER) AS year,
                            CAST(strftime('%m', date) AS INTEGER) AS month,
                            kind, SUM(amount)
                     FROM \"transaction\"
                     WHERE user_id = ?1 AND date >= ?2
                     GROUP BY year, month, kind",
                )?
                .query_map((user_id.as_i64(), window.since), map)?
                .collect::<Result<_, _>>()?,
        };

        Ok(merge_monthly_rows(rows))
    }

    fn category_totals(
        &self,
        user_id: UserID,
        kind: TransactionKind,
        window: DateWindow,
    ) -> Result<Vec<CategoryTotal>, Error> {
        let connection = self.connection.lock().unwrap();

        let map = |row: &Row| -> Result<CategoryTotal, rusqlite::Error> {
            Ok(CategoryTotal {
                category_id: row.get(0)?,
                total: row.get(1)?,
            })
        };

        let totals: Vec<CategoryTotal> = match window.until {
            Some(until) => connection
                .prepare(
                    "SELECT category_id, SUM(amount) AS total
                     FROM \"transaction\"
                     WHERE user_id = ?1 AND kind = ?2 AND date >= ?3 AND date < ?4
                     GROUP BY category_id
                     ORDER BY total DESC",
                )?
                .query_map((user_id.as_i64(), kind, window.since, until), map)?
                .collect::<Result<_, _>>()?,
            None => connection
                .prepare(
                    "SELECT category_id, SUM(amount) AS total
                     FROM \"transaction\"
                     WHERE user_id = ?1 AND kind = ?2 AND date >= ?3
                     GROUP BY category_id
                     ORDER BY total DESC",
                )?
                .query_map((user_id.as_i64(), kind, window.since), map)?
                .collect::<Result<_, _>>()?,
        };

        Ok(totals)
    }

    fn exists_for_category(&self, user_id: UserID, category_id: DatabaseID) -> Result<bool, Error> {
        let exists: bool = self.connection.lock().unwrap().query_row(
            "SELECT EXISTS(
                SELECT 1 FROM \"transaction\" WHERE user_id = ?1 AND category_id = ?2
             )",
            (user_id.as_i64(), category_id),
            |row| row.get(0),
        )?;

        Ok(exists)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
            )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transaction_user_date
             ON \"transaction\" (user_id, date)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            user_id: UserID::new(row.get(offset + 1)?),
            category_id: row.get(offset + 2)?,
            kind: row.get(offset + 3)?,
            amount: row.get(offset + 4)?,
            description: row.get(offset + 5)?,
            date: row.get(offset + 6)?,
            created_at: row.get(offset + 7)?,
            updated_at: row.get(offset + 8)?,
        })
    }
}

//! In-memory store fakes and sample-data builders shared by unit tests.
//!
//! The fakes share their state across clones so they can be handed to axum
//! routers and inspected from the test afterwards.

use std::{
    collections::HashSet,
    sync::{
        Arc, Mutex,
        atomic::{AtomicI64, AtomicUsize, Ordering},
    },
};

use time::{Date, Duration, Month, OffsetDateTime};
use uuid::Uuid;

use crate::{
    Error,
    models::{
        Category, CategoryName, DatabaseID, NewCategory, NewTransaction, Session, Transaction,
        TransactionKind, TransactionUpdate, User, UserID, UserProfile,
    },
    pagination::PageParams,
    stores::{CategoryStore, SessionStore, TransactionPage, TransactionStore, UserStore},
    summary::{CategoryTotal, DateWindow, MonthlyAggregate},
};

/// A category with placeholder display metadata.
pub fn sample_category(id: DatabaseID, name: &str) -> Category {
    Category {
        id,
        user_id: None,
        name: CategoryName::new_unchecked(name),
        icon: "📦".to_string(),
        color: "#B2BEC3".to_string(),
        is_default: true,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

/// A custom category owned by `user_id`.
pub fn sample_user_category(id: DatabaseID, user_id: UserID, name: &str) -> Category {
    Category {
        user_id: Some(user_id),
        is_default: false,
        ..sample_category(id, name)
    }
}

/// An outflow transaction referencing `category_id`.
pub fn sample_transaction(id: DatabaseID, category_id: DatabaseID) -> Transaction {
    Transaction {
        id,
        user_id: UserID::new(1),
        category_id,
        kind: TransactionKind::Outflow,
        amount: 12.5,
        description: format!("test transaction {id}"),
        date: Date::from_calendar_date(2024, Month::June, 1).expect("hard-coded date is valid"),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

fn injected_error(slot: &Mutex<Option<Error>>) -> Error {
    slot.lock()
        .expect("fake store lock poisoned")
        .take()
        .unwrap_or(Error::SqlError(rusqlite::Error::InvalidQuery))
}

/// A [CategoryStore] backed by a shared vector, with a counter for bulk
/// lookups and an optional injected failure.
#[derive(Debug, Clone, Default)]
pub struct FakeCategoryStore {
    categories: Arc<Mutex<Vec<Category>>>,
    next_id: Arc<AtomicI64>,
    bulk_lookups: Arc<AtomicUsize>,
    error: Arc<Mutex<Option<Error>>>,
    fail: bool,
}

impl FakeCategoryStore {
    /// A store preloaded with `categories`.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let next_id = categories
            .iter()
            .map(|category| category.id)
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            categories: Arc::new(Mutex::new(categories)),
            next_id: Arc::new(AtomicI64::new(next_id)),
            ..Self::default()
        }
    }

    /// A store whose operations fail with `error` (later calls fail with a
    /// generic SQL error).
    pub fn failing(error: Error) -> Self {
        Self {
            error: Arc::new(Mutex::new(Some(error))),
            fail: true,
            ..Self::default()
        }
    }

    /// How many times [CategoryStore::get_by_ids] was called.
    pub fn bulk_lookup_count(&self) -> usize {
        self.bulk_lookups.load(Ordering::SeqCst)
    }

    fn categories(&self) -> std::sync::MutexGuard<'_, Vec<Category>> {
        self.categories.lock().expect("fake store lock poisoned")
    }
}

impl CategoryStore for FakeCategoryStore {
    fn create(&mut self, category: NewCategory) -> Result<Category, Error> {
        if self.fail {
            return Err(injected_error(&self.error));
        }

        let created = Category {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: category.user_id,
            name: category.name,
            icon: category.icon,
            color: category.color,
            is_default: category.is_default,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        self.categories().push(created.clone());

        Ok(created)
    }

    fn get(&self, category_id: DatabaseID) -> Result<Category, Error> {
        if self.fail {
            return Err(injected_error(&self.error));
        }

        self.categories()
            .iter()
            .find(|category| category.id == category_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_by_ids(&self, ids: &HashSet<DatabaseID>) -> Result<Vec<Category>, Error> {
        self.bulk_lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(injected_error(&self.error));
        }

        Ok(self
            .categories()
            .iter()
            .filter(|category| ids.contains(&category.id))
            .cloned()
            .collect())
    }

    fn get_defaults(&self) -> Result<Vec<Category>, Error> {
        if self.fail {
            return Err(injected_error(&self.error));
        }

        Ok(self
            .categories()
            .iter()
            .filter(|category| category.is_default)
            .cloned()
            .collect())
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        if self.fail {
            return Err(injected_error(&self.error));
        }

        Ok(self
            .categories()
            .iter()
            .filter(|category| category.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    fn delete(&mut self, user_id: UserID, category_id: DatabaseID) -> Result<(), Error> {
        if self.fail {
            return Err(injected_error(&self.error));
        }

        let mut categories = self.categories();
        let before = categories.len();
        categories.retain(|category| {
            !(category.id == category_id
                && category.user_id == Some(user_id)
                && !category.is_default)
        });

        if categories.len() == before {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// A [TransactionStore] backed by a shared vector, with canned aggregate
/// results and per-query failure switches.
#[derive(Debug, Clone, Default)]
pub struct FakeTransactionStore {
    transactions: Arc<Mutex<Vec<Transaction>>>,
    next_id: Arc<AtomicI64>,
    monthly: Vec<MonthlyAggregate>,
    category_totals: Vec<CategoryTotal>,
    fail_monthly: bool,
    fail_category_totals: bool,
}

impl FakeTransactionStore {
    /// A store preloaded with `transactions`.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            transactions: Arc::new(Mutex::new(transactions)),
            next_id: Arc::new(AtomicI64::new(next_id)),
            ..Self::default()
        }
    }

    /// Set the canned result of [TransactionStore::monthly_aggregate].
    pub fn with_monthly(mut self, monthly: Vec<MonthlyAggregate>) -> Self {
        self.monthly = monthly;
        self
    }

    /// Set the canned result of [TransactionStore::category_totals].
    pub fn with_category_totals(mut self, totals: Vec<CategoryTotal>) -> Self {
        self.category_totals = totals;
        self
    }

    /// Make [TransactionStore::monthly_aggregate] fail.
    pub fn with_failing_monthly(mut self) -> Self {
        self.fail_monthly = true;
        self
    }

    /// Make [TransactionStore::category_totals] fail.
    pub fn with_failing_category_totals(mut self) -> Self {
        self.fail_category_totals = true;
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Transaction>> {
        self.transactions.lock().expect("fake store lock poisoned")
    }
}

impl TransactionStore for FakeTransactionStore {
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let created = Transaction {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: transaction.user_id,
            category_id: transaction.category_id,
            kind: transaction.kind,
            amount: transaction.amount,
            description: transaction.description,
            date: transaction.date,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        self.lock().push(created.clone());

        Ok(created)
    }

    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        changes: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let mut transactions = self.lock();
        let transaction = transactions
            .iter_mut()
            .find(|transaction| transaction.id == id && transaction.user_id == user_id)
            .ok_or(Error::NotFound)?;

        transaction.category_id = changes.category_id;
        transaction.kind = changes.kind;
        transaction.amount = changes.amount;
        transaction.description = changes.description;
        transaction.date = changes.date;

        Ok(transaction.clone())
    }

    fn delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error> {
        let mut transactions = self.lock();
        let before = transactions.len();
        transactions
            .retain(|transaction| !(transaction.id == id && transaction.user_id == user_id));

        if transactions.len() == before {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn get_page(&self, user_id: UserID, params: PageParams) -> Result<TransactionPage, Error> {
        let mut owned: Vec<Transaction> = self
            .lock()
            .iter()
            .filter(|transaction| transaction.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date.cmp(&a.date));

        let total = owned.len() as u64;
        let transactions = owned
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.page_size as usize)
            .collect();

        Ok(TransactionPage {
            transactions,
            total,
        })
    }

    fn monthly_aggregate(
        &self,
        _user_id: UserID,
        _window: DateWindow,
    ) -> Result<Vec<MonthlyAggregate>, Error> {
        if self.fail_monthly {
            return Err(Error::SqlError(rusqlite::Error::InvalidQuery));
        }

        Ok(self.monthly.clone())
    }

    fn category_totals(
        &self,
        _user_id: UserID,
        _kind: TransactionKind,
        _window: DateWindow,
    ) -> Result<Vec<CategoryTotal>, Error> {
        if self.fail_category_totals {
            return Err(Error::SqlError(rusqlite::Error::InvalidQuery));
        }

        Ok(self.category_totals.clone())
    }

    fn exists_for_category(&self, user_id: UserID, category_id: DatabaseID) -> Result<bool, Error> {
        Ok(self.lock().iter().any(|transaction| {
            transaction.user_id == user_id && transaction.category_id == category_id
        }))
    }
}

/// A [UserStore] backed by a shared vector.
#[derive(Debug, Clone, Default)]
pub struct FakeUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl UserStore for FakeUserStore {
    fn upsert(&mut self, profile: UserProfile) -> Result<User, Error> {
        let mut users = self.users.lock().expect("fake store lock poisoned");

        if let Some(user) = users
            .iter_mut()
            .find(|user| user.external_id == profile.external_id)
        {
            user.email = profile.email;
            user.name = profile.name;
            user.picture = profile.picture;

            return Ok(user.clone());
        }

        let user = User {
            id: UserID::new(users.len() as i64 + 1),
            external_id: profile.external_id,
            email: profile.email,
            name: profile.name,
            picture: profile.picture,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        users.push(user.clone());

        Ok(user)
    }

    fn get(&self, user_id: UserID) -> Result<User, Error> {
        self.users
            .lock()
            .expect("fake store lock poisoned")
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }
}

/// A [SessionStore] backed by a shared vector.
#[derive(Debug, Clone, Default)]
pub struct FakeSessionStore {
    sessions: Arc<Mutex<Vec<Session>>>,
}

impl SessionStore for FakeSessionStore {
    fn create(&mut self, user_id: UserID, ttl: Duration) -> Result<Session, Error> {
        let session = Session {
            user_id,
            token: Uuid::new_v4().to_string(),
            expires_at: OffsetDateTime::now_utc() + ttl,
        };
        self.sessions
            .lock()
            .expect("fake store lock poisoned")
            .push(session.clone());

        Ok(session)
    }

    fn get_by_token(&self, token: &str) -> Result<Session, Error> {
        self.sessions
            .lock()
            .expect("fake store lock poisoned")
            .iter()
            .find(|session| session.token == token)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn delete(&mut self, token: &str) -> Result<(), Error> {
        self.sessions
            .lock()
            .expect("fake store lock poisoned")
            .retain(|session| session.token != token);

        Ok(())
    }
}

//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).

mod category;
mod session;
mod transaction;
mod user;

pub mod sqlite;

pub use category::CategoryStore;
pub use session::SessionStore;
pub use transaction::{TransactionPage, TransactionStore};
pub use user::UserStore;

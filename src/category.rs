//! This file defines the category routes: listing, creation and deletion.
//!
//! A user sees the shared built-in categories plus their own custom ones.
//! Deletion is guarded two ways: built-ins are excluded by the store's
//! ownership predicate, and a custom category that still has transactions
//! referencing it is refused with a conflict.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID, NewCategory, UserID},
    state::CategoryState,
    stores::{CategoryStore, TransactionStore},
};

/// The catch-all category name that is always listed last.
const OTHER_CATEGORY: &str = "Other";

/// The body of a create category request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryForm {
    /// The name of the category. Must not be empty.
    pub name: String,
    /// An icon glyph displayed next to the name.
    pub icon: String,
    /// A color token used when charting this category.
    pub color: String,
}

/// Sort categories by name for listing, with the catch-all "Other" category
/// pinned to the end.
fn sorted_for_listing(mut categories: Vec<Category>) -> Vec<Category> {
    categories.sort_by(|a, b| {
        let a_is_other = a.name.as_ref() == OTHER_CATEGORY;
        let b_is_other = b.name.as_ref() == OTHER_CATEGORY;

        a_is_other
            .cmp(&b_is_other)
            .then_with(|| a.name.as_ref().cmp(b.name.as_ref()))
    });

    categories
}

/// Handler for listing the categories visible to the logged-in user: the
/// built-in defaults plus their own custom categories.
pub async fn list_categories_endpoint<C, T>(
    State(state): State<CategoryState<C, T>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let mut categories = match state.category_store.get_defaults() {
        Ok(categories) => categories,
        Err(error) => return error.into_response(),
    };

    match state.category_store.get_by_user(user_id) {
        Ok(custom) => categories.extend(custom),
        Err(error) => return error.into_response(),
    }

    Json(sorted_for_listing(categories)).into_response()
}

/// Handler for creating a custom category owned by the logged-in user.
pub async fn create_category_endpoint<C, T>(
    State(mut state): State<CategoryState<C, T>>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<CategoryForm>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    let new_category = NewCategory {
        user_id: Some(user_id),
        name,
        icon: form.icon,
        color: form.color,
        is_default: false,
    };

    match state.category_store.create(new_category) {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handler for deleting a custom category.
///
/// The reference check and the delete are separate statements, so a
/// transaction created in between can leave a dangling reference. That is
/// already the accepted state of the world: transactions hold weak category
/// references and render undecorated when the category is gone.
pub async fn delete_category_endpoint<C, T>(
    State(mut state): State<CategoryState<C, T>>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<DatabaseID>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    match state
        .transaction_store
        .exists_for_category(user_id, category_id)
    {
        Ok(true) => return Error::CategoryInUse.into_response(),
        Ok(false) => {}
        Err(error) => return error.into_response(),
    }

    match state.category_store.delete(user_id, category_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

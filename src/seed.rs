//! Seeds the built-in categories that every user sees.

use std::collections::HashSet;

use crate::{
    Error,
    models::{CategoryName, NewCategory},
    stores::CategoryStore,
};

/// The built-in categories, as (name, icon, color) triples.
const DEFAULT_CATEGORIES: [(&str, &str, &str); 15] = [
    ("Food & Dining", "🍕", "#FF6B6B"),
    ("Transportation", "🚗", "#4ECDC4"),
    ("Shopping", "🛍️", "#45B7D1"),
    ("Entertainment", "🎬", "#96CEB4"),
    ("Health & Medical", "🏥", "#FFEAA7"),
    ("Utilities", "⚡", "#DDA0DD"),
    ("Housing", "🏠", "#98D8C8"),
    ("Personal Care", "💆", "#F7D794"),
    ("Education", "📚", "#A29BFE"),
    ("Travel", "✈️", "#FD79A8"),
    ("Gifts & Donations", "🎁", "#55EFC4"),
    ("Interest", "🏦", "#74B9FF"),
    ("Dividends", "📈", "#00B894"),
    ("Investment Sales", "💹", "#6C5CE7"),
    ("Other", "📦", "#B2BEC3"),
];

/// Insert any built-in categories not yet in the store, matched by name, so
/// adding new entries to the catalog is safe on existing databases.
pub fn seed_default_categories<C: CategoryStore>(store: &mut C) -> Result<(), Error> {
    let present: HashSet<String> = store
        .get_defaults()?
        .into_iter()
        .map(|category| category.name.to_string())
        .collect();

    for (name, icon, color) in DEFAULT_CATEGORIES {
        if present.contains(name) {
            continue;
        }

        store.create(NewCategory {
            user_id: None,
            name: CategoryName::new_unchecked(name),
            icon: icon.to_string(),
            color: color.to_string(),
            is_default: true,
        })?;
    }

    Ok(())
}

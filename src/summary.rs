//! This file defines the cashflow summary route and the aggregation engine
//! behind it.
//!
//! A summary is assembled from two independent grouped queries, a monthly
//! inflow/outflow rollup and a per-category outflow ranking, computed over a
//! half-open date window and merged at response-assembly time. Summaries are
//! recomputed from scratch on every request; nothing here is persisted.

use std::collections::{BTreeMap, HashSet};

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime, util::days_in_month};

use crate::{
    Error,
    enrichment::CategoryIndex,
    models::{DatabaseID, TransactionKind, UserID},
    state::TransactionState,
    stores::{CategoryStore, TransactionStore},
};

/// A half-open date window `[since, until)`.
///
/// `until` of `None` means no upper bound: events through now are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// The first date included in the window.
    pub since: Date,
    /// The first date excluded from the window, if any.
    pub until: Option<Date>,
}

impl DateWindow {
    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: Date) -> bool {
        date >= self.since && self.until.is_none_or(|until| date < until)
    }
}

/// One raw grouped row from the store: the summed amount for one
/// (year, month, kind) bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    /// The calendar year of the bucket.
    pub year: i32,
    /// The 1-based calendar month of the bucket.
    pub month: u8,
    /// The transaction kind this bucket sums.
    pub kind: TransactionKind,
    /// The summed amount.
    pub total: f64,
}

/// Summed inflow and outflow for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// The calendar year of the month.
    pub year: i32,
    /// The 1-based calendar month.
    pub month: u8,
    /// The total money received in the month.
    pub inflow: f64,
    /// The total money spent in the month.
    pub outflow: f64,
}

/// The summed amount for one category, as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category the transactions were summed for.
    pub category_id: DatabaseID,
    /// The summed amount.
    pub total: f64,
}

/// A category's outflow total enriched with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    /// The raw category reference, kept even when the category is gone.
    pub category_id: DatabaseID,
    /// The category's name, if it still exists.
    pub category_name: Option<String>,
    /// The category's color token, if it still exists.
    pub category_color: Option<String>,
    /// The category's icon glyph, if it still exists.
    pub category_icon: Option<String>,
    /// The summed outflow for the category.
    pub total: f64,
}

/// The response for the cashflow summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowSummary {
    /// Inflow and outflow per calendar month, ascending.
    pub monthly: Vec<MonthlyAggregate>,
    /// Outflow per category, largest first.
    pub by_category: Vec<CategoryAggregate>,
}

/// Fold raw per-(year, month, kind) grouped rows into one entry per month,
/// ascending by (year, month).
///
/// A month that only saw one kind gets 0 for the other. The totals are summed
/// in the representation the store returned them in, so no extra rounding is
/// introduced here.
pub fn merge_monthly_rows(rows: Vec<MonthlyRow>) -> Vec<MonthlyAggregate> {
    // (year, month) pairs are unique keys; a BTreeMap gives the ascending
    // order for free.
    let mut months: BTreeMap<(i32, u8), MonthlyAggregate> = BTreeMap::new();

    for row in rows {
        let entry = months
            .entry((row.year, row.month))
            .or_insert(MonthlyAggregate {
                year: row.year,
                month: row.month,
                inflow: 0.0,
                outflow: 0.0,
            });

        match row.kind {
            TransactionKind::Inflow => entry.inflow += row.total,
            TransactionKind::Outflow => entry.outflow += row.total,
        }
    }

    months.into_values().collect()
}

/// Compute the cashflow summary for `user_id` over `window`.
///
/// The monthly rollup and the category ranking are independent queries merged
/// only at assembly time. A failure in either fails the whole summary; only a
/// failure of the category-metadata batch lookup degrades gracefully (the
/// ranking is returned without display metadata).
pub fn get_cashflow_summary<T, C>(
    transaction_store: &T,
    category_store: &C,
    user_id: UserID,
    window: DateWindow,
) -> Result<CashflowSummary, Error>
where
    T: TransactionStore,
    C: CategoryStore,
{
    let monthly = transaction_store.monthly_aggregate(user_id, window)?;

    let mut totals =
        transaction_store.category_totals(user_id, TransactionKind::Outflow, window)?;
    // The store declares a descending sort but the ranking is re-imposed here
    // rather than trusted.
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));

    let ids: HashSet<DatabaseID> = totals.iter().map(|total| total.category_id).collect();
    let index = CategoryIndex::load(category_store, &ids);

    let by_category = totals
        .into_iter()
        .map(|total| {
            let category = index.get(total.category_id);

            CategoryAggregate {
                category_id: total.category_id,
                category_name: category.map(|category| category.name.to_string()),
                category_color: category.map(|category| category.color.clone()),
                category_icon: category.map(|category| category.icon.clone()),
                total: total.total,
            }
        })
        .collect();

    Ok(CashflowSummary {
        monthly,
        by_category,
    })
}

/// The query parameters of the summary endpoint.
///
/// `year` selects a calendar-year window; otherwise `months` selects a
/// trailing window with no upper bound (default 12, clamped to 1..=24).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SummaryQuery {
    /// A calendar year to summarise, e.g. `?year=2024`.
    pub year: Option<i32>,
    /// How many trailing months to summarise when no year is given.
    pub months: Option<i64>,
}

const DEFAULT_TRAILING_MONTHS: i64 = 12;
const MAX_TRAILING_MONTHS: i64 = 24;

/// Turn the summary query parameters into a date window anchored at `today`.
///
/// # Errors
/// Returns [Error::InvalidYear] if `year` is outside 2000..=2100.
pub fn window_from_query(query: SummaryQuery, today: Date) -> Result<DateWindow, Error> {
    if let Some(year) = query.year {
        if !(2000..=2100).contains(&year) {
            return Err(Error::InvalidYear);
        }

        let since = Date::from_calendar_date(year, Month::January, 1)
            .map_err(|_| Error::InvalidYear)?;
        let until = Date::from_calendar_date(year + 1, Month::January, 1)
            .map_err(|_| Error::InvalidYear)?;

        return Ok(DateWindow {
            since,
            until: Some(until),
        });
    }

    let months = query
        .months
        .unwrap_or(DEFAULT_TRAILING_MONTHS)
        .clamp(1, MAX_TRAILING_MONTHS);

    Ok(DateWindow {
        since: months_before(today, months),
        until: None,
    })
}

/// The date `months` calendar months before `date`, with the day-of-month
/// clamped to the target month's length.
fn months_before(date: Date, months: i64) -> Date {
    let total_months = (date.year() as i64) * 12 + (date.month() as i64 - 1) - months;
    let year = total_months.div_euclid(12) as i32;
    let month = Month::try_from((total_months.rem_euclid(12) + 1) as u8)
        .expect("month index is always in 1..=12");

    let day = date.day().min(days_in_month(month, year));

    Date::from_calendar_date(year, month, day)
        .expect("clamped day is always valid for the target month")
}

/// Handler for the cashflow summary endpoint.
pub async fn get_summary_endpoint<C, T>(
    State(state): State<TransactionState<C, T>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<SummaryQuery>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let today = OffsetDateTime::now_utc().date();
    let window = match window_from_query(query, today) {
        Ok(window) => window,
        Err(error) => return error.into_response(),
    };

    match get_cashflow_summary(
        &state.transaction_store,
        &state.category_store,
        user_id,
        window,
    ) {
        Ok(summary) => Json(summary).into_response(),
        Err(error) => error.into_response(),
    }
}


#[cfg(test)]
mod summary_tests {
    use time::macros::date;

    use crate::{
        Error,
        models::UserID,
        test_utils::{FakeCategoryStore, FakeTransactionStore, sample_category},
    };

    use super::{
        CategoryTotal, DateWindow, MonthlyAggregate, get_cashflow_summary,
    };

    fn any_window() -> DateWindow {
        DateWindow {
            since: date!(2024 - 01 - 01),
            until: None,
        }
    }

    #[test]
    fn ranks_categories_descending_with_metadata() {
        let transaction_store = FakeTransactionStore::default()
            .with_monthly(vec![MonthlyAggregate {
                year: 2024,
                month: 1,
                inflow: 0.0,
                outflow: 450.0,
            }])
            // The store returns catA's rows already summed but unsorted.
            .with_category_totals(vec![
                CategoryTotal {
                    category_id: 1,
                    total: 150.0,
                },
                CategoryTotal {
                    category_id: 2,
                    total: 300.0,
                },
            ]);
        let category_store =
            FakeCategoryStore::with_categories(vec![sample_category(1, "Groceries")]);

        let summary = get_cashflow_summary(
            &transaction_store,
            &category_store,
            UserID::new(1),
            any_window(),
        )
        .unwrap();

        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category_id, 2);
        assert_eq!(summary.by_category[0].total, 300.0);
        assert_eq!(summary.by_category[1].category_id, 1);
        assert_eq!(summary.by_category[1].total, 150.0);
        assert_eq!(
            summary.by_category[1].category_name.as_deref(),
            Some("Groceries")
        );
        assert_eq!(
            summary.by_category[0].category_name, None,
            "a deleted category ranks undecorated"
        );
        assert_eq!(
            category_store.bulk_lookup_count(),
            1,
            "want exactly one bulk category lookup, got {}",
            category_store.bulk_lookup_count()
        );
    }

    #[test]
    fn fails_entirely_when_category_query_fails() {
        let transaction_store = FakeTransactionStore::default()
            .with_monthly(vec![MonthlyAggregate {
                year: 2024,
                month: 1,
                inflow: 500.0,
                outflow: 0.0,
            }])
            .with_failing_category_totals();
        let category_store = FakeCategoryStore::with_categories(vec![]);

        let result = get_cashflow_summary(
            &transaction_store,
            &category_store,
            UserID::new(1),
            any_window(),
        );

        assert!(
            result.is_err(),
            "a failed aggregate query must not yield a half-populated summary"
        );
    }

    #[test]
    fn fails_entirely_when_monthly_query_fails() {
        let transaction_store = FakeTransactionStore::default().with_failing_monthly();
        let category_store = FakeCategoryStore::with_categories(vec![]);

        let result = get_cashflow_summary(
            &transaction_store,
            &category_store,
            UserID::new(1),
            any_window(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn metadata_lookup_failure_degrades_to_undecorated_ranking() {
        let transaction_store =
            FakeTransactionStore::default().with_category_totals(vec![CategoryTotal {
                category_id: 1,
                total: 42.0,
            }]);
        let category_store =
            FakeCategoryStore::failing(Error::SqlError(rusqlite::Error::InvalidQuery));

        let summary = get_cashflow_summary(
            &transaction_store,
            &category_store,
            UserID::new(1),
            any_window(),
        )
        .unwrap();

        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].total, 42.0);
        assert_eq!(summary.by_category[0].category_name, None);
    }

    #[test]
    fn empty_ranking_skips_the_metadata_lookup() {
        let transaction_store = FakeTransactionStore::default();
        let category_store = FakeCategoryStore::with_categories(vec![]);

        let summary = get_cashflow_summary(
            &transaction_store,
            &category_store,
            UserID::new(1),
            any_window(),
        )
        .unwrap();

        assert!(summary.by_category.is_empty());
        assert_eq!(category_store.bulk_lookup_count(), 0);
    }
}

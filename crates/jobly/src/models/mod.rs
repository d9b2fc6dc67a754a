//! Repositories for companies and jobs.
//!
//! Every method takes `&impl GenericClient`, so a plain client, a pooled
//! connection, or a transaction can be passed.

mod company;
mod job;


pub use company::{Company, NewCompany};
pub use job::{Job, NewJob};

use crate::fragment::Fragment;

/// `SELECT <columns> FROM <table> [WHERE <cond>] ORDER BY <order_by>`.
///
/// An empty condition yields the unfiltered listing.
pub(crate) fn select_statement(
    columns: &str,
    table: &str,
    cond: &Fragment,
    order_by: &str,
) -> String {
    if cond.is_empty() {
        format!("SELECT {columns} FROM {table} ORDER BY {order_by}")
    } else {
        format!(
            "SELECT {columns} FROM {table} WHERE {} ORDER BY {order_by}",
            cond.sql()
        )
    }
}

/// `UPDATE <table> SET <set> WHERE <key> = $<n+1> RETURNING <columns>`.
///
/// The key is bound after the SET values.
pub(crate) fn update_statement(table: &str, set: &Fragment, key: &str, columns: &str) -> String {
    format!(
        "UPDATE {table} SET {} WHERE {key} = ${} RETURNING {columns}",
        set.sql(),
        set.next_placeholder()
    )
}

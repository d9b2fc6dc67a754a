//! Parameterized SQL fragments.
//!
//! A [`Fragment`] is a piece of SQL text (a `SET` list or a `WHERE` condition)
//! together with the values bound to its `$1, $2, ...` placeholders. The
//! builders here are pure: no I/O, no shared state, same input -> same output.
//!
//! ```ignore
//! use jobly::fragment::{build_set_clause, Filter};
//!
//! let set = build_set_clause(&bag, &fields)?;
//! let sql = format!(
//!     "UPDATE companies SET {} WHERE handle = ${}",
//!     set.sql(),
//!     set.next_placeholder()
//! );
//!
//! let filter = CompanyFilter::new().name("gray").min_employees(45);
//! let cond = filter.where_clause()?;
//! ```

mod filter;
mod update;

#[cfg(test)]
mod tests;

pub use filter::{ClauseKind, CompanyFilter, Filter, FilterRule, JobFilter};
pub use update::build_set_clause;

use crate::value::Value;
use tokio_postgres::types::ToSql;

/// SQL text with positional placeholders and the values they refer to.
///
/// Placeholder `$k` always refers to `values()[k - 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    sql: String,
    values: Vec<Value>,
}

impl Fragment {
    /// The fragment text, without any leading keyword.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values, in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// True when no clause was produced (e.g. a filter with no keys set).
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Number of bound values.
    pub fn param_count(&self) -> usize {
        self.values.len()
    }

    /// Index of the next free placeholder, for parameters appended after this fragment.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Accumulates clauses and numbers placeholders as values are bound.
pub(crate) struct ClauseList {
    clauses: Vec<String>,
    values: Vec<Value>,
    separator: &'static str,
}

impl ClauseList {
    pub(crate) fn new(separator: &'static str) -> Self {
        Self {
            clauses: Vec::new(),
            values: Vec::new(),
            separator,
        }
    }

    /// Append `<prefix>$n`, binding `value` to the next placeholder.
    pub(crate) fn push_bound(&mut self, prefix: &str, value: Value) {
        self.values.push(value);
        self.clauses.push(format!("{}${}", prefix, self.values.len()));
    }

    /// Append a clause that binds nothing and leaves the counter alone.
    pub(crate) fn push_raw(&mut self, clause: &str) {
        self.clauses.push(clause.to_string());
    }

    pub(crate) fn finish(self) -> Fragment {
        Fragment {
            sql: self.clauses.join(self.separator),
            values: self.values,
        }
    }
}

//! Filter bags and the rule tables that turn them into `WHERE` conditions.

use super::{ClauseList, Fragment};
use crate::error::{JoblyError, JoblyResult};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// How a recognized filter key renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    /// `<column> ~* $n`, value bound as given (case-insensitive partial match)
    Matches(&'static str),
    /// `<column> >= $n`, value coerced to a number
    AtLeast(&'static str),
    /// `<column> <= $n`, value coerced to a number
    AtMost(&'static str),
    /// Fixed SQL emitted only when the value reads as `"true"`. Binds nothing
    /// and does not advance the placeholder counter.
    Flag(&'static str),
}

/// One recognized key of a filter bag.
pub struct FilterRule<F> {
    /// Key name as callers spell it (used in error messages).
    pub key: &'static str,
    pub kind: ClauseKind,
    /// Reads the key from the bag; `None` means absent or unset.
    pub get: fn(&F) -> Option<&Value>,
}

/// A filter bag with a fixed, ordered table of recognized keys.
pub trait Filter: Sized + 'static {
    /// Rules in evaluation order. Output order follows this table, not the
    /// order the caller filled the bag in.
    fn rules() -> &'static [FilterRule<Self>];

    /// Cross-field checks run before any clause is assembled.
    fn validate(&self) -> JoblyResult<()> {
        Ok(())
    }

    /// Build the `WHERE` condition (without the `WHERE` keyword).
    ///
    /// An empty fragment means "no filtering"; the caller must then omit the
    /// `WHERE` keyword entirely.
    fn where_clause(&self) -> JoblyResult<Fragment> {
        self.validate()?;

        let mut cond = ClauseList::new(" AND ");
        for rule in Self::rules() {
            let Some(value) = (rule.get)(self) else {
                continue;
            };
            match rule.kind {
                ClauseKind::Matches(column) => {
                    cond.push_bound(&format!("{column} ~* "), value.clone());
                }
                ClauseKind::AtLeast(column) => {
                    cond.push_bound(&format!("{column} >= "), numeric(rule.key, value)?);
                }
                ClauseKind::AtMost(column) => {
                    cond.push_bound(&format!("{column} <= "), numeric(rule.key, value)?);
                }
                ClauseKind::Flag(sql) => {
                    if value.to_string() == "true" {
                        cond.push_raw(sql);
                    }
                }
            }
        }

        let fragment = cond.finish();
        tracing::trace!(
            target: "jobly.fragment",
            sql = %fragment.sql(),
            param_count = fragment.param_count(),
            "built WHERE clause"
        );
        Ok(fragment)
    }
}

fn numeric(key: &str, value: &Value) -> JoblyResult<Value> {
    value
        .to_number()
        .ok_or_else(|| JoblyError::validation(format!("{key} must be a number, got '{value}'")))
}

/// `None` and an explicit `null` both mean "unset".
fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}

// ==================== Companies ====================

/// Search filter for companies.
///
/// - `name`: case-insensitive partial match on `name`
/// - `minEmployees` / `maxEmployees`: inclusive bounds on `num_employees`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyFilter {
    pub name: Option<Value>,
    pub min_employees: Option<Value>,
    pub max_employees: Option<Value>,
}

impl CompanyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<Value>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn min_employees(mut self, min: impl Into<Value>) -> Self {
        self.min_employees = Some(min.into());
        self
    }

    pub fn max_employees(mut self, max: impl Into<Value>) -> Self {
        self.max_employees = Some(max.into());
        self
    }
}

static COMPANY_RULES: [FilterRule<CompanyFilter>; 3] = [
    FilterRule {
        key: "name",
        kind: ClauseKind::Matches("name"),
        get: company_name,
    },
    FilterRule {
        key: "minEmployees",
        kind: ClauseKind::AtLeast("num_employees"),
        get: company_min_employees,
    },
    FilterRule {
        key: "maxEmployees",
        kind: ClauseKind::AtMost("num_employees"),
        get: company_max_employees,
    },
];

fn company_name(f: &CompanyFilter) -> Option<&Value> {
    present(&f.name)
}

fn company_min_employees(f: &CompanyFilter) -> Option<&Value> {
    present(&f.min_employees)
}

fn company_max_employees(f: &CompanyFilter) -> Option<&Value> {
    present(&f.max_employees)
}

impl Filter for CompanyFilter {
    fn rules() -> &'static [FilterRule<Self>] {
        &COMPANY_RULES
    }

    fn validate(&self) -> JoblyResult<()> {
        let (Some(min), Some(max)) = (company_min_employees(self), company_max_employees(self))
        else {
            return Ok(());
        };
        let min = numeric("minEmployees", min)?;
        let max = numeric("maxEmployees", max)?;
        if min.as_f64() > max.as_f64() {
            return Err(JoblyError::invalid_employee_range());
        }
        Ok(())
    }
}

// ==================== Jobs ====================

/// Search filter for jobs.
///
/// - `title`: case-insensitive partial match on `title`
/// - `minSalary`: inclusive lower bound on `salary`
/// - `hasEquity`: when it reads exactly `"true"`, keep jobs with non-zero
///   equity
///
/// `hasEquity` is not tri-state: `"false"` (or any other text) does not select
/// zero-equity jobs, it simply adds no condition. A JSON boolean `true` is
/// accepted as well, as an extension of the query-string form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilter {
    pub title: Option<Value>,
    pub min_salary: Option<Value>,
    pub has_equity: Option<Value>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<Value>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn min_salary(mut self, min: impl Into<Value>) -> Self {
        self.min_salary = Some(min.into());
        self
    }

    pub fn has_equity(mut self, flag: impl Into<Value>) -> Self {
        self.has_equity = Some(flag.into());
        self
    }
}

static JOB_RULES: [FilterRule<JobFilter>; 3] = [
    FilterRule {
        key: "title",
        kind: ClauseKind::Matches("title"),
        get: job_title,
    },
    FilterRule {
        key: "minSalary",
        kind: ClauseKind::AtLeast("salary"),
        get: job_min_salary,
    },
    FilterRule {
        key: "hasEquity",
        kind: ClauseKind::Flag("equity != '0'"),
        get: job_has_equity,
    },
];

fn job_title(f: &JobFilter) -> Option<&Value> {
    present(&f.title)
}

fn job_min_salary(f: &JobFilter) -> Option<&Value> {
    present(&f.min_salary)
}

fn job_has_equity(f: &JobFilter) -> Option<&Value> {
    present(&f.has_equity)
}

impl Filter for JobFilter {
    fn rules() -> &'static [FilterRule<Self>] {
        &JOB_RULES
    }
}

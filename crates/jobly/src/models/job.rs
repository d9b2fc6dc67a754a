use super::{select_statement, update_statement};
use crate::bag::{FieldMap, UpdateBag};
use crate::client::{GenericClient, log_sql};
use crate::error::{JoblyError, JoblyResult};
use crate::fragment::{Filter, JobFilter, build_set_clause};
use crate::row::{FromRow, RowExt};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

const TABLE: &str = "jobs";
const COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Fields a job update may touch. The owning company is fixed at creation.
pub(crate) const UPDATABLE: &[&str] = &["title", "salary", "equity"];

/// A job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Input for [`Job::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

impl Job {
    /// Job fields share their column names.
    pub fn field_map() -> FieldMap {
        FieldMap::new()
    }

    /// Insert a job. An unknown `companyHandle` surfaces as a foreign key
    /// violation.
    pub async fn create(conn: &impl GenericClient, data: &NewJob) -> JoblyResult<Job> {
        let sql = format!(
            "INSERT INTO {TABLE} (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );
        log_sql("job.create", &sql, 4);
        let row = conn
            .query_one(
                &sql,
                &[&data.title, &data.salary, &data.equity, &data.company_handle],
            )
            .await?;
        Job::from_row(&row)
    }

    /// All jobs, ordered by title.
    pub async fn find_all(conn: &impl GenericClient) -> JoblyResult<Vec<Job>> {
        Self::filter_by(conn, &JobFilter::default()).await
    }

    /// Jobs matching `filter`, ordered by title.
    ///
    /// A filter that produces no condition (including `hasEquity: "false"`
    /// alone) lists every job.
    pub async fn filter_by(conn: &impl GenericClient, filter: &JobFilter) -> JoblyResult<Vec<Job>> {
        let cond = filter.where_clause()?;
        let sql = select_statement(COLUMNS, TABLE, &cond, "title");
        log_sql("job.filter_by", &sql, cond.param_count());
        let rows = conn.query(&sql, &cond.params_ref()).await?;
        rows.iter().map(Job::from_row).collect()
    }

    /// Jobs posted by one company, ordered by id.
    pub async fn find_by_company(
        conn: &impl GenericClient,
        company_handle: &str,
    ) -> JoblyResult<Vec<Job>> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} WHERE company_handle = $1 ORDER BY id");
        log_sql("job.find_by_company", &sql, 1);
        let rows = conn.query(&sql, &[&company_handle]).await?;
        rows.iter().map(Job::from_row).collect()
    }

    /// Look up a job by id.
    pub async fn get(conn: &impl GenericClient, id: i32) -> JoblyResult<Job> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        log_sql("job.get", &sql, 1);
        match conn.query_opt(&sql, &[&id]).await? {
            Some(row) => Job::from_row(&row),
            None => Err(JoblyError::not_found(format!("No job: {id}"))),
        }
    }

    /// Partially update a job.
    ///
    /// `data` may contain `title`, `salary` and `equity`; `null` clears a
    /// column.
    pub async fn update(conn: &impl GenericClient, id: i32, data: &UpdateBag) -> JoblyResult<Job> {
        data.ensure_only(UPDATABLE)?;
        let set = build_set_clause(data, &Self::field_map())?;
        let sql = update_statement(TABLE, &set, "id", COLUMNS);

        let mut params: Vec<&(dyn ToSql + Sync)> = set.params_ref();
        params.push(&id);
        log_sql("job.update", &sql, params.len());

        match conn.query_opt(&sql, &params).await? {
            Some(row) => Job::from_row(&row),
            None => Err(JoblyError::not_found(format!("No job: {id}"))),
        }
    }

    /// Delete a job.
    pub async fn remove(conn: &impl GenericClient, id: i32) -> JoblyResult<()> {
        let sql = format!("DELETE FROM {TABLE} WHERE id = $1 RETURNING id");
        log_sql("job.remove", &sql, 1);
        match conn.query_opt(&sql, &[&id]).await? {
            Some(_) => Ok(()),
            None => Err(JoblyError::not_found(format!("No job: {id}"))),
        }
    }
}

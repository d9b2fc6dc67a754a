use super::{select_statement, update_statement};
use crate::bag::{FieldMap, UpdateBag};
use crate::client::{GenericClient, log_sql};
use crate::error::{JoblyError, JoblyResult};
use crate::fragment::{CompanyFilter, Filter, build_set_clause};
use crate::row::{FromRow, RowExt};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

const TABLE: &str = "companies";
const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Fields a company update may touch.
pub(crate) const UPDATABLE: &[&str] = &["name", "description", "numEmployees", "logoUrl"];

/// A company record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Input for [`Company::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

impl Company {
    /// Logical field -> column mapping used by [`Company::update`].
    pub fn field_map() -> FieldMap {
        FieldMap::new()
            .rename("numEmployees", "num_employees")
            .rename("logoUrl", "logo_url")
    }

    /// Insert a company.
    ///
    /// Returns [`JoblyError::Duplicate`] if the handle is taken.
    pub async fn create(conn: &impl GenericClient, data: &NewCompany) -> JoblyResult<Company> {
        let check = "SELECT handle FROM companies WHERE handle = $1";
        log_sql("company.create", check, 1);
        if conn.query_opt(check, &[&data.handle]).await?.is_some() {
            return Err(JoblyError::Duplicate(format!("company: {}", data.handle)));
        }

        let sql = format!(
            "INSERT INTO {TABLE} (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        );
        log_sql("company.create", &sql, 5);
        let row = conn
            .query_one(
                &sql,
                &[
                    &data.handle,
                    &data.name,
                    &data.description,
                    &data.num_employees,
                    &data.logo_url,
                ],
            )
            .await
            .map_err(|e| match e {
                JoblyError::UniqueViolation(_) => {
                    JoblyError::Duplicate(format!("company: {}", data.handle))
                }
                other => other,
            })?;
        Company::from_row(&row)
    }

    /// All companies, ordered by name.
    pub async fn find_all(conn: &impl GenericClient) -> JoblyResult<Vec<Company>> {
        Self::filter_by(conn, &CompanyFilter::default()).await
    }

    /// Companies matching `filter`, ordered by name.
    ///
    /// A filter with no keys set lists every company.
    pub async fn filter_by(
        conn: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> JoblyResult<Vec<Company>> {
        let cond = filter.where_clause()?;
        let sql = select_statement(COLUMNS, TABLE, &cond, "name");
        log_sql("company.filter_by", &sql, cond.param_count());
        let rows = conn.query(&sql, &cond.params_ref()).await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Look up a company by handle.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<Company> {
        let sql = format!("SELECT {COLUMNS} FROM {TABLE} WHERE handle = $1");
        log_sql("company.get", &sql, 1);
        match conn.query_opt(&sql, &[&handle]).await? {
            Some(row) => Company::from_row(&row),
            None => Err(JoblyError::not_found(format!("No company: {handle}"))),
        }
    }

    /// Partially update a company.
    ///
    /// `data` may contain `name`, `description`, `numEmployees` and `logoUrl`;
    /// only the fields present are changed.
    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        data: &UpdateBag,
    ) -> JoblyResult<Company> {
        data.ensure_only(UPDATABLE)?;
        let set = build_set_clause(data, &Self::field_map())?;
        let sql = update_statement(TABLE, &set, "handle", COLUMNS);

        let mut params: Vec<&(dyn ToSql + Sync)> = set.params_ref();
        params.push(&handle);
        log_sql("company.update", &sql, params.len());

        match conn.query_opt(&sql, &params).await? {
            Some(row) => Company::from_row(&row),
            None => Err(JoblyError::not_found(format!("No company: {handle}"))),
        }
    }

    /// Delete a company (its jobs go with it via `ON DELETE CASCADE`).
    pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<()> {
        let sql = format!("DELETE FROM {TABLE} WHERE handle = $1 RETURNING handle");
        log_sql("company.remove", &sql, 1);
        match conn.query_opt(&sql, &[&handle]).await? {
            Some(_) => Ok(()),
            None => Err(JoblyError::not_found(format!("No company: {handle}"))),
        }
    }
}

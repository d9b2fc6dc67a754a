//! # jobly
//!
//! Jobs and companies over PostgreSQL, with safe dynamic SQL fragments.
//!
//! ## Fragments
//!
//! Partial updates and optional search filters are turned into parameterized
//! SQL pieces whose `$n` placeholders always line up with their bound values:
//!
//! ```ignore
//! use jobly::{build_set_clause, CompanyFilter, FieldMap, Filter, UpdateBag};
//!
//! // SET
//! let bag = UpdateBag::new().with("numEmployees", 20).with("name", "Gray LLC");
//! let fields = FieldMap::new().rename("numEmployees", "num_employees");
//! let set = build_set_clause(&bag, &fields)?;
//! // "num_employees"=$1, "name"=$2
//!
//! // WHERE
//! let cond = CompanyFilter::new().name("gray").min_employees(45).where_clause()?;
//! // name ~* $1 AND num_employees >= $2
//! ```
//!
//! ## Repositories
//!
//! ```ignore
//! let pool = jobly::create_pool(&DbConfig::from_env()?)?;
//! let client = pool.get().await?;
//!
//! let jobs = Job::filter_by(&client, &JobFilter::new().title("engineer").has_equity("true")).await?;
//! let job = Job::update(&client, jobs[0].id, &UpdateBag::new().with("salary", 78000)).await?;
//! ```

pub mod bag;
pub mod client;
pub mod config;
pub mod error;
pub mod fragment;
pub mod models;
pub mod row;
pub mod value;

pub use bag::{FieldMap, UpdateBag};
pub use client::GenericClient;
pub use config::DbConfig;
pub use error::{JoblyError, JoblyResult};
pub use fragment::{CompanyFilter, Filter, Fragment, JobFilter, build_set_clause};
pub use models::{Company, Job, NewCompany, NewJob};
pub use row::{FromRow, RowExt};
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::create_pool;

use super::{ClauseList, Fragment};
use crate::bag::{FieldMap, UpdateBag};
use crate::error::{JoblyError, JoblyResult};

/// Build the `SET` list for a partial update.
///
/// Each entry of `bag`, in insertion order, becomes `"<column>"=$i` where the
/// column is looked up in `fields` (falling back to the field name). Entries
/// are joined with `, ` and their values bound in the same order.
///
/// ```ignore
/// let bag = UpdateBag::new().with("firstName", "John").with("lastName", "Smith");
/// let fields = FieldMap::new()
///     .rename("firstName", "first_name")
///     .rename("lastName", "last_name");
///
/// let set = build_set_clause(&bag, &fields)?;
/// assert_eq!(set.sql(), r#""first_name"=$1, "last_name"=$2"#);
/// ```
///
/// Returns [`JoblyError::EmptyUpdate`] if `bag` is empty.
pub fn build_set_clause(bag: &UpdateBag, fields: &FieldMap) -> JoblyResult<Fragment> {
    if bag.is_empty() {
        return Err(JoblyError::EmptyUpdate);
    }

    let mut set = ClauseList::new(", ");
    for (field, value) in bag.iter() {
        set.push_bound(&format!("{}=", quote_ident(fields.column(field))), value.clone());
    }

    let fragment = set.finish();
    tracing::trace!(
        target: "jobly.fragment",
        sql = %fragment.sql(),
        param_count = fragment.param_count(),
        "built SET clause"
    );
    Ok(fragment)
}

/// Double-quote a column name, escaping embedded quotes as `""`.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

use super::*;
use crate::bag::{FieldMap, UpdateBag};
use crate::error::JoblyError;
use crate::value::Value;

// ==================== SET clause ====================

#[test]
fn set_clause_maps_fields_to_columns() {
    let bag = UpdateBag::new()
        .with("firstName", "John")
        .with("lastName", "Smith");
    let fields = FieldMap::new()
        .rename("firstName", "first_name")
        .rename("lastName", "last_name");

    let set = build_set_clause(&bag, &fields).unwrap();
    assert_eq!(set.sql(), r#""first_name"=$1, "last_name"=$2"#);
    assert_eq!(set.values(), &[Value::from("John"), Value::from("Smith")]);
}

#[test]
fn set_clause_falls_back_to_field_name() {
    let bag = UpdateBag::new().with("age", 5);
    let set = build_set_clause(&bag, &FieldMap::new()).unwrap();
    assert_eq!(set.sql(), r#""age"=$1"#);
    assert_eq!(set.values(), &[Value::Int(5)]);
}

#[test]
fn set_clause_rejects_empty_bag() {
    let fields = FieldMap::new().rename("firstName", "first_name");
    let err = build_set_clause(&UpdateBag::new(), &fields).unwrap_err();
    assert!(matches!(err, JoblyError::EmptyUpdate));
    assert_eq!(err.to_string(), "No data");
}

#[test]
fn set_clause_binds_nulls() {
    let bag = UpdateBag::new()
        .with("title", "Web Developer")
        .with("salary", Value::Null)
        .with("equity", Option::<String>::None);
    let set = build_set_clause(&bag, &FieldMap::new()).unwrap();
    assert_eq!(set.sql(), r#""title"=$1, "salary"=$2, "equity"=$3"#);
    assert_eq!(
        set.values(),
        &[Value::from("Web Developer"), Value::Null, Value::Null]
    );
}

#[test]
fn set_clause_placeholders_are_contiguous() {
    let bag: UpdateBag = (0..12).map(|i| (format!("f{i}"), i)).collect();
    let set = build_set_clause(&bag, &FieldMap::new()).unwrap();

    assert_eq!(set.param_count(), 12);
    assert_eq!(set.next_placeholder(), 13);
    for (i, part) in set.sql().split(", ").enumerate() {
        assert_eq!(part, format!("\"f{i}\"=${}", i + 1));
        assert_eq!(set.values()[i], Value::Int(i as i64));
    }
}

#[test]
fn set_clause_escapes_quotes_in_columns() {
    let bag = UpdateBag::new().with("odd\"name", 1);
    let set = build_set_clause(&bag, &FieldMap::new()).unwrap();
    assert_eq!(set.sql(), r#""odd""name"=$1"#);
}

// ==================== Company filter ====================

#[test]
fn company_filter_all_keys() {
    let filter = CompanyFilter::new()
        .name("gray")
        .min_employees(45)
        .max_employees(100);
    let cond = filter.where_clause().unwrap();
    assert_eq!(
        cond.sql(),
        "name ~* $1 AND num_employees >= $2 AND num_employees <= $3"
    );
    assert_eq!(
        cond.values(),
        &[Value::from("gray"), Value::Int(45), Value::Int(100)]
    );
}

#[test]
fn company_filter_two_keys() {
    let cond = CompanyFilter::new()
        .name("gray")
        .min_employees(45)
        .where_clause()
        .unwrap();
    assert_eq!(cond.sql(), "name ~* $1 AND num_employees >= $2");
    assert_eq!(cond.values(), &[Value::from("gray"), Value::Int(45)]);
}

#[test]
fn company_filter_single_key() {
    let cond = CompanyFilter::new().min_employees(45).where_clause().unwrap();
    assert_eq!(cond.sql(), "num_employees >= $1");
    assert_eq!(cond.values(), &[Value::Int(45)]);
}

#[test]
fn company_filter_max_only_starts_at_one() {
    let cond = CompanyFilter::new().max_employees(10).where_clause().unwrap();
    assert_eq!(cond.sql(), "num_employees <= $1");
}

#[test]
fn company_filter_coerces_numeric_strings() {
    let cond = CompanyFilter::new()
        .min_employees("45")
        .max_employees("100")
        .where_clause()
        .unwrap();
    assert_eq!(cond.values(), &[Value::Int(45), Value::Int(100)]);
}

#[test]
fn company_filter_rejects_inverted_range() {
    let err = CompanyFilter::new()
        .min_employees(10)
        .max_employees(1)
        .where_clause()
        .unwrap_err();
    assert!(matches!(err, JoblyError::InvalidRange(_)));
    assert_eq!(
        err.to_string(),
        "minEmployees cannot be greater than maxEmployees"
    );
    assert_eq!(err.status_code(), 400);
}

#[test]
fn company_filter_range_compares_numerically() {
    // "9" > "10" as text, but not as numbers
    let cond = CompanyFilter::new()
        .min_employees("9")
        .max_employees("10")
        .where_clause()
        .unwrap();
    assert_eq!(cond.param_count(), 2);

    let err = CompanyFilter::new()
        .min_employees("10")
        .max_employees("9")
        .where_clause()
        .unwrap_err();
    assert!(matches!(err, JoblyError::InvalidRange(_)));
}

#[test]
fn company_filter_equal_bounds_are_allowed() {
    let cond = CompanyFilter::new()
        .min_employees(5)
        .max_employees(5)
        .where_clause()
        .unwrap();
    assert_eq!(cond.sql(), "num_employees >= $1 AND num_employees <= $2");
}

#[test]
fn company_filter_rejects_non_numeric_bound() {
    let err = CompanyFilter::new()
        .min_employees("lots")
        .where_clause()
        .unwrap_err();
    assert!(matches!(err, JoblyError::Validation(_)));
    assert!(err.to_string().contains("minEmployees"));
}

#[test]
fn company_filter_empty_is_no_filtering() {
    let cond = CompanyFilter::new().where_clause().unwrap();
    assert!(cond.is_empty());
    assert_eq!(cond.sql(), "");
    assert!(cond.values().is_empty());
}

#[test]
fn company_filter_null_is_unset() {
    let filter: CompanyFilter =
        serde_json::from_str(r#"{"name": null, "maxEmployees": 300}"#).unwrap();
    let cond = filter.where_clause().unwrap();
    assert_eq!(cond.sql(), "num_employees <= $1");

    let explicit = CompanyFilter {
        name: Some(Value::Null),
        ..CompanyFilter::default()
    };
    assert!(explicit.where_clause().unwrap().is_empty());
}

#[test]
fn company_filter_order_ignores_bag_order() {
    let filter: CompanyFilter =
        serde_json::from_str(r#"{"maxEmployees": "100", "name": "gray", "minEmployees": "45"}"#)
            .unwrap();
    let cond = filter.where_clause().unwrap();
    assert_eq!(
        cond.sql(),
        "name ~* $1 AND num_employees >= $2 AND num_employees <= $3"
    );
    assert_eq!(
        cond.values(),
        &[Value::from("gray"), Value::Int(45), Value::Int(100)]
    );
}

// ==================== Job filter ====================

#[test]
fn job_filter_has_equity_true() {
    let cond = JobFilter::new()
        .title("engineer")
        .min_salary(70000)
        .has_equity("true")
        .where_clause()
        .unwrap();
    assert_eq!(
        cond.sql(),
        "title ~* $1 AND salary >= $2 AND equity != '0'"
    );
    assert_eq!(cond.values(), &[Value::from("engineer"), Value::Int(70000)]);
}

#[test]
fn job_filter_has_equity_false_adds_nothing() {
    let cond = JobFilter::new()
        .title("engineer")
        .min_salary(70000)
        .has_equity("false")
        .where_clause()
        .unwrap();
    assert_eq!(cond.sql(), "title ~* $1 AND salary >= $2");
    assert_eq!(cond.values(), &[Value::from("engineer"), Value::Int(70000)]);
}

#[test]
fn job_filter_has_equity_garbage_adds_nothing() {
    let cond = JobFilter::new()
        .title("engineer")
        .min_salary(70000)
        .has_equity("sdfsdfsdf")
        .where_clause()
        .unwrap();
    assert_eq!(cond.sql(), "title ~* $1 AND salary >= $2");
    assert_eq!(cond.param_count(), 2);
}

#[test]
fn job_filter_has_equity_is_case_sensitive() {
    let cond = JobFilter::new().has_equity("TRUE").where_clause().unwrap();
    assert!(cond.is_empty());

    let filter: JobFilter = serde_json::from_str(r#"{"hasEquity": true}"#).unwrap();
    assert_eq!(filter.where_clause().unwrap().sql(), "equity != '0'");
}

#[test]
fn job_filter_equity_only_binds_nothing() {
    let cond = JobFilter::new().has_equity(true).where_clause().unwrap();
    assert_eq!(cond.sql(), "equity != '0'");
    assert!(cond.values().is_empty());
    assert_eq!(cond.next_placeholder(), 1);
}

#[test]
fn job_filter_title_only() {
    let cond = JobFilter::new().title("ist").where_clause().unwrap();
    assert_eq!(cond.sql(), "title ~* $1");
    assert_eq!(cond.values(), &[Value::from("ist")]);
}

#[test]
fn job_filter_coerces_salary_string() {
    let filter: JobFilter =
        serde_json::from_str(r#"{"minSalary": "70000", "hasEquity": "true"}"#).unwrap();
    let cond = filter.where_clause().unwrap();
    assert_eq!(cond.sql(), "salary >= $1 AND equity != '0'");
    assert_eq!(cond.values(), &[Value::Int(70000)]);
}

#[test]
fn filter_rule_tables_are_ordered() {
    let keys: Vec<_> = JobFilter::rules().iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!["title", "minSalary", "hasEquity"]);
    let keys: Vec<_> = CompanyFilter::rules().iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!["name", "minEmployees", "maxEmployees"]);
}

// ==================== Purity ====================

#[test]
fn builders_are_idempotent() {
    let bag = UpdateBag::new().with("numEmployees", 10).with("name", "C1");
    let fields = FieldMap::new().rename("numEmployees", "num_employees");
    assert_eq!(
        build_set_clause(&bag, &fields).unwrap(),
        build_set_clause(&bag, &fields).unwrap()
    );

    let filter = JobFilter::new().title("a").has_equity("true").min_salary(1);
    assert_eq!(filter.where_clause().unwrap(), filter.where_clause().unwrap());
}

#[test]
fn params_ref_matches_values() {
    let cond = CompanyFilter::new()
        .name("gray")
        .min_employees(1)
        .where_clause()
        .unwrap();
    assert_eq!(cond.params_ref().len(), cond.values().len());
}

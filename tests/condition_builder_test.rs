mod common;

use common::parse;
use sea_orm::sea_query::{
    Alias, Asterisk, PostgresQueryBuilder, Query, QueryBuilder, SqliteQueryBuilder,
};
use searchcrate::{
    ConditionFragment, FilterOperator, FilterSpec, FilterValue, SortDirection, SortFragment,
    SortSpec, build_condition, build_sort_condition,
};

/// SQL with parentheses stripped, plus the number of bound values
fn render_with<B: QueryBuilder>(fragment: ConditionFragment, builder: B) -> (String, usize) {
    let (sql, values) = Query::select()
        .column(Asterisk)
        .from(Alias::new("todos"))
        .and_where(fragment.into_expr())
        .build(builder);
    (sql.replace(['(', ')'], ""), values.0.len())
}

fn render(fragment: ConditionFragment) -> (String, usize) {
    render_with(fragment, SqliteQueryBuilder)
}

#[test]
fn test_json_path_fields_use_text_accessor() {
    for (field, accessor) in [
        ("meta.tier", "meta ->> 'tier'"),
        ("settings.theme", "settings ->> 'theme'"),
        ("data.o'brien", "data ->> 'o''brien'"),
    ] {
        let filter = FilterSpec::new(field, FilterOperator::Eq, "x").unwrap();
        let fragment = build_condition(&filter);
        assert!(
            fragment.template.contains(accessor),
            "{field}: {}",
            fragment.template
        );
    }
}

#[test]
fn test_plain_fields_use_bare_name() {
    for field in ["status", "created_at", "a.b.c"] {
        let filter = FilterSpec::new(field, FilterOperator::Lt, "x").unwrap();
        let fragment = build_condition(&filter);
        assert_eq!(fragment.template, format!("{field} < (?)"));
    }
}

#[test]
fn test_json_path_literals_serialize_as_json_text() {
    let request = parse(&[
        ("meta.vip", "true"),
        ("meta.trial", "false"),
        ("meta.deleted", "null"),
        ("active", "true"),
    ]);
    let values: Vec<FilterValue> = request
        .conditions()
        .into_iter()
        .flat_map(|fragment| fragment.values)
        .collect();

    assert_eq!(
        values,
        vec![
            FilterValue::Text("true".to_string()),
            FilterValue::Text("false".to_string()),
            FilterValue::Text("null".to_string()),
            FilterValue::Bool(true),
        ]
    );
}

#[test]
fn test_placeholders_match_values() {
    let request = parse(&[(
        "filters",
        "status:eq:active,role:in:[admin,editor],score:btw:[1,9],meta.tier:neq:free",
    )]);
    let combined = request.where_fragment().unwrap();

    assert_eq!(
        combined.template,
        "status = (?) AND role IN (?) AND score BETWEEN ? AND ? AND meta ->> 'tier' != (?)"
    );
    assert_eq!(combined.template.matches('?').count(), combined.values.len());
}

#[test]
fn test_sea_query_binds_parameters() {
    let filter = FilterSpec::new("title", FilterOperator::Eq, "'; DROP TABLE todos; --").unwrap();
    let (sql, bound) = render(build_condition(&filter));
    assert!(sql.contains("title = ?"), "got: {sql}");
    assert!(!sql.contains("DROP"), "value leaked into SQL: {sql}");
    assert_eq!(bound, 1);
}

#[test]
fn test_sea_query_expands_in_lists() {
    let filter = FilterSpec::new("role", FilterOperator::NotIn, vec!["a", "b", "c"]).unwrap();
    let (sql, bound) = render(build_condition(&filter));
    assert!(sql.contains("role NOT IN ?, ?, ?"), "got: {sql}");
    assert_eq!(bound, 3);
}

#[test]
fn test_sea_query_between() {
    let filter = FilterSpec::new("score", FilterOperator::Between, vec!["10", "20"]).unwrap();
    let (sql, bound) = render(build_condition(&filter));
    assert!(sql.contains("score BETWEEN ? AND ?"), "got: {sql}");
    assert_eq!(bound, 2);
}

#[test]
fn test_sea_query_combined_where() {
    let request = parse(&[("filters", "status:eq:active,role:in:[a,b]")]);
    let (sql, bound) = render(request.where_fragment().unwrap());
    assert!(sql.contains("status = ? AND role IN ?, ?"), "got: {sql}");
    assert_eq!(bound, 3);
}

#[test]
fn test_postgres_binds_every_value() {
    let request = parse(&[
        ("meta.vip", "true"),
        ("role:in", "[a,b]"),
        ("score:btw", "[10,20]"),
    ]);
    let (sql, bound) = render_with(request.where_fragment().unwrap(), PostgresQueryBuilder);

    assert!(
        sql.contains("meta ->> 'vip' = $1 AND role IN $2, $3 AND score BETWEEN $4 AND $5"),
        "got: {sql}"
    );
    assert!(!sql.contains('?'), "unbound placeholder left in: {sql}");
    assert_eq!(bound, 5);
}

#[test]
fn test_postgres_and_sqlite_bind_the_same_values() {
    let request = parse(&[("filters", "status:neq:done,meta.tier:in:[gold,silver]")]);
    let fragment = request.where_fragment().unwrap();

    let (pg_sql, pg_bound) = render_with(fragment.clone(), PostgresQueryBuilder);
    let (sqlite_sql, sqlite_bound) = render(fragment);

    assert_eq!(pg_bound, 3);
    assert_eq!(sqlite_bound, 3);
    assert!(pg_sql.contains("meta ->> 'tier' IN $2, $3"), "got: {pg_sql}");
    assert!(sqlite_sql.contains("meta ->> 'tier' IN ?, ?"), "got: {sqlite_sql}");
}

#[test]
fn test_sort_fragments() {
    let raw = build_sort_condition(&SortSpec {
        field: "meta.rank".to_string(),
        direction: SortDirection::Desc,
    });
    assert_eq!(raw.sql().as_deref(), Some("meta ->> 'rank' DESC"));

    let structured = build_sort_condition(&SortSpec {
        field: "created_at".to_string(),
        direction: SortDirection::Asc,
    });
    assert_eq!(
        structured,
        SortFragment::Column {
            field: "created_at".to_string(),
            direction: SortDirection::Asc,
        }
    );
}

#[test]
fn test_sort_applies_to_select() {
    let (expr, order) = build_sort_condition(&SortSpec {
        field: "meta.rank".to_string(),
        direction: SortDirection::Asc,
    })
    .to_order_by();

    let sql = Query::select()
        .column(Asterisk)
        .from(Alias::new("todos"))
        .order_by_expr(expr, order)
        .to_string(SqliteQueryBuilder);
    assert!(sql.contains("ORDER BY meta ->> 'rank' ASC"), "got: {sql}");
}

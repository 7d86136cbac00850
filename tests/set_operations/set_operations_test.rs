//! Set operations: UNION, INTERSECT, EXCEPT and their dialect gates.

use queryset::{Entity, QueryError, QuerySet, RenderContext, SchemaGraph};

fn schema() -> SchemaGraph {
    SchemaGraph::builder()
        .entity(Entity::new("User").columns(["id", "first_name", "last_name"]))
        .build()
        .unwrap()
}

fn users() -> QuerySet {
    QuerySet::new(schema(), "User").unwrap()
}

#[test]
fn union_parenthesizes_both_sides() {
    let left = users().filter([("first_name", "Julius")]).unwrap();
    let right = users().filter([("first_name", "Marcus")]).unwrap();
    let sql = left.union(right).render(&RenderContext::postgres()).unwrap();
    assert_eq!(
        sql,
        "(SELECT users.*\nFROM users\nWHERE users.first_name = 'Julius')\n\
         UNION\n\
         (SELECT users.*\nFROM users\nWHERE users.first_name = 'Marcus')"
    );
}

#[test]
fn intersect_and_except_keywords() {
    let ctx = RenderContext::postgres();
    let sql = users()
        .filter([("first_name", "Julius")])
        .unwrap()
        .intersection(users().filter([("last_name", "Caesar")]).unwrap())
        .render(&ctx)
        .unwrap();
    assert!(sql.contains("\nINTERSECT\n"));

    let sql = users()
        .filter([("first_name", "Julius")])
        .unwrap()
        .difference(users().filter([("last_name", "Brutus")]).unwrap())
        .render(&ctx)
        .unwrap();
    assert!(sql.contains("\nEXCEPT\n"));
}

#[test]
fn mysql_supports_union_only() {
    let ctx = RenderContext::mysql();
    assert!(users().union(users()).render(&ctx).is_ok());
    assert!(matches!(
        users().intersection(users()).render(&ctx),
        Err(QueryError::UnsupportedSetOperation { .. })
    ));
    assert!(matches!(
        users().difference(users()).render(&ctx),
        Err(QueryError::UnsupportedSetOperation { .. })
    ));
}

#[test]
fn sqlite_supports_all_three() {
    let ctx = RenderContext::sqlite();
    assert!(users().union(users()).render(&ctx).is_ok());
    assert!(users().intersection(users()).render(&ctx).is_ok());
    assert!(users().difference(users()).render(&ctx).is_ok());
}

#[test]
fn sides_keep_their_own_clauses() {
    use queryset::Direction;
    let left = users()
        .filter([("first_name", "Julius")])
        .unwrap()
        .order_by(&[("last_name", Direction::Asc)])
        .unwrap();
    let right = users().filter([("first_name", "Marcus")]).unwrap().limit(5, 0);
    let sql = left.union(right).render(&RenderContext::postgres()).unwrap();
    assert!(sql.contains("ORDER BY users.last_name ASC)"));
    assert!(sql.contains("LIMIT 5 OFFSET 0)"));
}

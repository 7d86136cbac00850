//! Local filter conditions: implicit AND groups, OR groups, exclusions.

use queryset::{Entity, Filter, QuerySet, RenderContext, SchemaGraph, Value};

fn schema() -> SchemaGraph {
    SchemaGraph::builder()
        .entity(
            Entity::new("User")
                .columns(["id", "first_name", "last_name", "bio", "stars", "created_at"]),
        )
        .build()
        .unwrap()
}

fn users() -> QuerySet {
    QuerySet::new(schema(), "User").unwrap()
}

#[test]
fn unfiltered_queryset_selects_everything() {
    let sql = users().render_select(&RenderContext::postgres()).unwrap();
    assert_eq!(sql, "SELECT users.*\nFROM users");
}

#[test]
fn single_condition_renders_bare() {
    let sql = users()
        .filter([("first_name", "Julius")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(
        sql,
        "SELECT users.*\nFROM users\nWHERE users.first_name = 'Julius'"
    );
}

#[test]
fn multi_pair_filter_is_one_parenthesized_and_group() {
    let sql = users()
        .filter([("first_name", "Julius"), ("last_name", "Caesar")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "WHERE (users.first_name = 'Julius' AND users.last_name = 'Caesar')"
    ));
}

#[test]
fn successive_filters_are_anded() {
    let sql = users()
        .filter([("first_name", "Julius")])
        .unwrap()
        .filter([("last_name", "Caesar")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "WHERE users.first_name = 'Julius' AND users.last_name = 'Caesar'"
    ));
}

#[test]
fn any_filter_ors_its_groups() {
    let sql = users()
        .filter(Filter::any([
            vec![("first_name", "Julius")],
            vec![("first_name", "Marcus")],
        ]))
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "WHERE (users.first_name = 'Julius' OR users.first_name = 'Marcus')"
    ));
}

#[test]
fn any_groups_with_multiple_pairs_keep_inner_parens() {
    let sql = users()
        .filter(Filter::any([
            vec![("first_name", "Julius"), ("last_name", "Caesar")],
            vec![("first_name", "Marcus")],
        ]))
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "WHERE ((users.first_name = 'Julius' AND users.last_name = 'Caesar') \
         OR users.first_name = 'Marcus')"
    ));
}

#[test]
fn exclude_wraps_the_group_in_not() {
    let sql = users()
        .exclude([("bio", Value::Null), ("last_name", Value::from("Caesar"))])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "WHERE NOT (users.bio IS NULL AND users.last_name = 'Caesar')"
    ));
}

#[test]
fn filters_and_excludes_combine_with_and() {
    let sql = users()
        .filter([("first_name", "Julius")])
        .unwrap()
        .exclude([("last_name", "Brutus")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "WHERE users.first_name = 'Julius' AND NOT (users.last_name = 'Brutus')"
    ));
}

#[test]
fn none_renders_a_contradiction() {
    let sql = users()
        .none()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(sql, "SELECT users.*\nFROM users\nWHERE 1 = 0");
}

#[test]
fn in_list_renders_comma_separated_literals() {
    let sql = users()
        .filter([("first_name__in", vec!["Julius", "Marcus"])])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains("WHERE users.first_name IN ('Julius', 'Marcus')"));
}

#[test]
fn numeric_comparisons() {
    let sql = users()
        .filter([("stars__gte", 10)])
        .unwrap()
        .filter([("stars__lt", 100)])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains("WHERE users.stars >= 10 AND users.stars < 100"));
}

#[test]
fn boolean_literals_follow_the_dialect() {
    let qs = users().filter([("bio__isnull", true)]).unwrap();
    let pg = qs.render_select(&RenderContext::postgres()).unwrap();
    assert!(pg.contains("users.bio IS NULL"));

    let truthy = users().filter([("stars", true)]).unwrap();
    assert!(truthy
        .render_select(&RenderContext::postgres())
        .unwrap()
        .contains("users.stars = TRUE"));
    assert!(truthy
        .render_select(&RenderContext::mysql())
        .unwrap()
        .contains("users.stars = 1"));
}

#[test]
fn same_queryset_renders_identically_twice() {
    let qs = users().filter([("first_name", "Julius")]).unwrap();
    let ctx = RenderContext::postgres();
    assert_eq!(qs.render_select(&ctx).unwrap(), qs.render_select(&ctx).unwrap());
}

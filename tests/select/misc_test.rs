//! Distinct, limits, row locking, eager loading and clause ordering.

use queryset::{
    Direction, Entity, QueryError, QuerySet, RenderContext, SchemaGraph,
};

fn schema() -> SchemaGraph {
    SchemaGraph::builder()
        .entity(
            Entity::new("User")
                .columns(["id", "first_name", "last_name", "zone_id"])
                .belongs_to("zone", "GeoZone"),
        )
        .entity(Entity::new("GeoZone").columns(["id", "name"]))
        .build()
        .unwrap()
}

fn users() -> QuerySet {
    QuerySet::new(schema(), "User").unwrap()
}

#[test]
fn distinct_prefixes_the_select_list() {
    let sql = users()
        .distinct()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(sql, "SELECT DISTINCT users.*\nFROM users");
}

#[test]
fn limit_always_prints_both_parts() {
    let sql = users()
        .limit(10, 0)
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(sql, "SELECT users.*\nFROM users\nLIMIT 10 OFFSET 0");

    let sql = users()
        .limit(5, 20)
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.ends_with("LIMIT 5 OFFSET 20"));
}

#[test]
fn for_update_renders_on_engines_with_row_locks() {
    let qs = users().filter([("first_name", "Julius")]).unwrap().for_update();
    let pg = qs.render_select(&RenderContext::postgres()).unwrap();
    assert!(pg.ends_with("\nFOR UPDATE"));
    let my = qs.render_select(&RenderContext::mysql()).unwrap();
    assert!(my.ends_with("\nFOR UPDATE"));
}

#[test]
fn for_update_fails_on_sqlite_at_render_time() {
    let qs = users().for_update();
    assert!(matches!(
        qs.render_select(&RenderContext::sqlite()),
        Err(QueryError::UnsupportedOnDialect { .. })
    ));
}

#[test]
fn select_related_widens_the_select_list() {
    let sql = users()
        .select_related(&["zone"])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(
        sql,
        "SELECT users.*, users__zone_0.id AS zone__id, users__zone_0.name AS zone__name\n\
         FROM users\n\
         LEFT JOIN geo_zones users__zone_0 ON users__zone_0.id = users.zone_id"
    );
}

#[test]
fn select_related_rejects_to_many_hops() {
    let schema = SchemaGraph::builder()
        .entity(
            Entity::new("User")
                .columns(["id"])
                .has_many("posts", "Post", "author_id"),
        )
        .entity(Entity::new("Post").columns(["id", "author_id"]))
        .build()
        .unwrap();
    let err = QuerySet::new(schema, "User")
        .unwrap()
        .select_related(&["posts"])
        .unwrap_err();
    assert!(matches!(err, QueryError::MalformedPath { .. }));
}

#[test]
fn clauses_appear_in_statement_order() {
    let sql = users()
        .filter([("zone::name", "Rome")])
        .unwrap()
        .order_by(&[("first_name", Direction::Asc)])
        .unwrap()
        .limit(10, 0)
        .for_update()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(
        sql,
        "SELECT users.*\n\
         FROM users\n\
         LEFT JOIN geo_zones users__zone_0 ON users__zone_0.id = users.zone_id\n\
         WHERE users__zone_0.name = 'Rome'\n\
         ORDER BY users.first_name ASC\n\
         LIMIT 10 OFFSET 0\n\
         FOR UPDATE"
    );
}

//! Ordering: local and foreign terms, direction inversion.

use queryset::{Direction, Entity, QueryError, QuerySet, RenderContext, SchemaGraph};

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
fn single_term() {
    let sql = users()
        .order_by(&[("first_name", Direction::Asc)])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(
        sql,
        "SELECT users.*\nFROM users\nORDER BY users.first_name ASC"
    );
}

#[test]
fn multiple_terms_keep_their_order() {
    let sql = users()
        .order_by(&[("last_name", Direction::Asc), ("first_name", Direction::Desc)])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.ends_with("ORDER BY users.last_name ASC, users.first_name DESC"));
}

#[test]
fn foreign_term_joins_and_qualifies() {
    let sql = users()
        .order_by(&[("zone::name", Direction::Desc)])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "LEFT JOIN geo_zones users__zone_0 ON users__zone_0.id = users.zone_id"
    ));
    assert!(sql.ends_with("ORDER BY users__zone_0.name DESC"));
}

#[test]
fn inversion_flips_every_direction() {
    let sql = users()
        .order_by(&[("last_name", Direction::Asc), ("first_name", Direction::Desc)])
        .unwrap()
        .invert_order()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.ends_with("ORDER BY users.last_name DESC, users.first_name ASC"));
}

#[test]
fn inversion_is_involutive() {
    let ordered = users()
        .order_by(&[("first_name", Direction::Asc)])
        .unwrap();
    let ctx = RenderContext::postgres();
    let plain = ordered.clone().render_select(&ctx).unwrap();
    let twice = ordered.invert_order().invert_order().render_select(&ctx).unwrap();
    assert_eq!(plain, twice);
}

#[test]
fn inversion_without_an_ordering_is_a_noop() {
    let sql = users()
        .invert_order()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(!sql.contains("ORDER BY"));
}

#[test]
fn later_order_by_replaces_the_earlier_one() {
    let sql = users()
        .order_by(&[("first_name", Direction::Asc)])
        .unwrap()
        .order_by(&[("last_name", Direction::Desc)])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.ends_with("ORDER BY users.last_name DESC"));
    assert!(!sql.contains("first_name"));
}

#[test]
fn unknown_order_field_is_rejected() {
    let err = users().order_by(&[("nope", Direction::Asc)]).unwrap_err();
    assert!(matches!(err, QueryError::UnknownField { .. }));
}

//! Querysets as comparison values: IN subselects.

use queryset::{col, Entity, QuerySet, RenderContext, SchemaGraph, Value};

fn schema() -> SchemaGraph {
    SchemaGraph::builder()
        .entity(
            Entity::new("User")
                .columns(["id", "first_name", "zone_id"])
                .belongs_to("zone", "GeoZone"),
        )
        .entity(Entity::new("GeoZone").columns(["id", "name", "mainland"]))
        .build()
        .unwrap()
}

#[test]
fn queryset_value_renders_as_an_in_subselect() {
    let schema = schema();
    let mainland_ids = QuerySet::new(schema.clone(), "GeoZone")
        .unwrap()
        .filter([("mainland", true)])
        .unwrap()
        .project([col("id")])
        .unwrap();

    let sql = QuerySet::new(schema, "User")
        .unwrap()
        .filter([("zone_id__in", Value::from(mainland_ids))])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(
        sql,
        "SELECT users.*\n\
         FROM users\n\
         WHERE users.zone_id IN (SELECT geo_zones.id\n\
         FROM geo_zones\n\
         WHERE geo_zones.mainland = TRUE)"
    );
}

#[test]
fn equality_against_a_queryset_becomes_in() {
    let schema = schema();
    let zones = QuerySet::new(schema.clone(), "GeoZone")
        .unwrap()
        .filter([("name", "Rome")])
        .unwrap()
        .project([col("id")])
        .unwrap();

    let sql = QuerySet::new(schema, "User")
        .unwrap()
        .filter([("zone_id", Value::from(zones))])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains("users.zone_id IN (SELECT geo_zones.id"));
    assert!(!sql.contains("zone_id ="));
}

#[test]
fn subselect_follows_the_outer_dialect() {
    let schema = schema();
    let zones = QuerySet::new(schema.clone(), "GeoZone")
        .unwrap()
        .filter([("mainland", true)])
        .unwrap()
        .project([col("id")])
        .unwrap();
    let qs = QuerySet::new(schema, "User")
        .unwrap()
        .filter([("zone_id__in", Value::from(zones))])
        .unwrap();

    let my = qs.render_select(&RenderContext::mysql()).unwrap();
    assert!(my.contains("geo_zones.mainland = 1"));
    let pg = qs.render_select(&RenderContext::postgres()).unwrap();
    assert!(pg.contains("geo_zones.mainland = TRUE"));
}

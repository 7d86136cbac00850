//! Schema declaration and validation through the public surface.

use queryset::{Entity, QueryError, QuerySet, RenderContext, SchemaGraph};

fn blog_schema() -> SchemaGraph {
    SchemaGraph::builder()
        .entity(
            Entity::new("User")
                .columns(["id", "first_name", "zone_id"])
                .belongs_to("zone", "GeoZone")
                .has_many("posts", "Post", "author_id"),
        )
        .entity(Entity::new("GeoZone").columns(["id", "name"]))
        .entity(
            Entity::new("Post")
                .columns(["id", "title", "author_id"])
                .has_and_belongs_to_many("categories", "Category"),
        )
        .entity(Entity::new("Category").columns(["id", "name"]))
        .build()
        .unwrap()
}

#[test]
fn table_names_default_to_pluralized_snake_case() {
    let schema = blog_schema();
    assert_eq!(schema.entity("GeoZone").unwrap().table, "geo_zones");
    assert_eq!(schema.entity("User").unwrap().table, "users");
}

#[test]
fn explicit_table_and_primary_key_override_the_defaults() {
    let schema = SchemaGraph::builder()
        .entity(
            Entity::new("Legacy")
                .table("tbl_legacy")
                .primary_key("legacy_no")
                .columns(["legacy_no", "name"]),
        )
        .build()
        .unwrap();
    let sql = QuerySet::new(schema, "Legacy")
        .unwrap()
        .render_delete(&RenderContext::postgres())
        .unwrap();
    assert!(sql.starts_with("DELETE FROM tbl_legacy\nWHERE tbl_legacy.legacy_no IN"));
}

#[test]
fn relationship_to_an_undeclared_entity_fails_at_build() {
    let err = SchemaGraph::builder()
        .entity(Entity::new("User").belongs_to("zone", "Missing"))
        .build()
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidSchema(_)));
}

#[test]
fn duplicate_entities_fail_at_build() {
    let err = SchemaGraph::builder()
        .entity(Entity::new("User"))
        .entity(Entity::new("User"))
        .build()
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidSchema(_)));
}

#[test]
fn through_relationship_must_name_declared_legs() {
    let err = SchemaGraph::builder()
        .entity(
            Entity::new("Post")
                .columns(["id"])
                .has_many_through("tags", "post_tags", "tag"),
        )
        .build()
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidSchema(_)));
}

#[test]
fn unknown_entity_is_reported_by_name() {
    let err = QuerySet::new(blog_schema(), "Ghost").unwrap_err();
    assert_eq!(
        err,
        QueryError::UnknownEntity {
            entity: "Ghost".into()
        }
    );
}

#[test]
fn unknown_field_is_reported_against_its_entity() {
    let err = QuerySet::new(blog_schema(), "User")
        .unwrap()
        .filter([("nope", 1)])
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::UnknownField {
            entity: "User".into(),
            field: "nope".into(),
        }
    );
}

#[test]
fn unknown_hop_reports_path_entity_and_hop() {
    let err = QuerySet::new(blog_schema(), "User")
        .unwrap()
        .filter([("mayor::name", "Rome")])
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::UnknownRelationship {
            path: "mayor::name".into(),
            entity: "User".into(),
            hop: "mayor".into(),
        }
    );
}

#[test]
fn keyless_many_to_many_is_declarable_but_not_traversable() {
    let err = QuerySet::new(blog_schema(), "Post")
        .unwrap()
        .filter([("categories::name", "history")])
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::UnsupportedRelationship {
            entity: "Post".into(),
            relationship: "categories".into(),
        }
    );
}

#[test]
fn empty_path_segments_are_malformed() {
    let qs = QuerySet::new(blog_schema(), "User").unwrap();
    assert!(matches!(
        qs.clone().filter([("", 1)]).unwrap_err(),
        QueryError::MalformedPath { .. }
    ));
    assert!(matches!(
        qs.filter([("zone::", 1)]).unwrap_err(),
        QueryError::MalformedPath { .. }
    ));
}

#[test]
fn schema_round_trips_through_serde() {
    let schema = blog_schema();
    let json = serde_json::to_string(&schema).unwrap();
    let back: SchemaGraph = serde_json::from_str(&json).unwrap();
    let sql_a = QuerySet::new(schema, "User")
        .unwrap()
        .filter([("zone::name", "Rome")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    let sql_b = QuerySet::new(back, "User")
        .unwrap()
        .filter([("zone::name", "Rome")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(sql_a, sql_b);
}

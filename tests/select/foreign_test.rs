//! Conditions over relationship paths: joins, aliases, deduplication.

use queryset::{Entity, QuerySet, RenderContext, SchemaGraph};

fn schema() -> SchemaGraph {
    SchemaGraph::builder()
        .entity(
            Entity::new("User")
                .columns(["id", "first_name", "zone_id"])
                .belongs_to("zone", "GeoZone")
                .has_many("posts", "Post", "author_id"),
        )
        .entity(
            Entity::new("GeoZone")
                .columns(["id", "name", "parent_zone_id"])
                .belongs_to("parent_zone", "GeoZone"),
        )
        .entity(
            Entity::new("Post")
                .columns(["id", "title", "stars", "author_id"])
                .belongs_to_keyed("author", "User", "author_id")
                .has_many("post_tags", "PostTag", "post_id")
                .has_many_through("tags", "post_tags", "tag"),
        )
        .entity(
            Entity::new("PostTag")
                .columns(["id", "post_id", "tag_id"])
                .belongs_to("tag", "Tag"),
        )
        .entity(Entity::new("Tag").columns(["id", "name"]))
        .build()
        .unwrap()
}

fn users() -> QuerySet {
    QuerySet::new(schema(), "User").unwrap()
}

#[test]
fn single_hop_condition_joins_and_qualifies() {
    let sql = users()
        .filter([("zone::name", "Rome")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(
        sql,
        "SELECT users.*\n\
         FROM users\n\
         LEFT JOIN geo_zones users__zone_0 ON users__zone_0.id = users.zone_id\n\
         WHERE users__zone_0.name = 'Rome'"
    );
}

#[test]
fn recursive_hops_chain_their_aliases() {
    let sql = users()
        .filter([("zone::parent_zone::name", "Latium")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "LEFT JOIN geo_zones users__zone_0 ON users__zone_0.id = users.zone_id\n\
         LEFT JOIN geo_zones geo_zones__parent_zone_1 ON \
         geo_zones__parent_zone_1.id = users__zone_0.parent_zone_id"
    ));
    assert!(sql.contains("WHERE geo_zones__parent_zone_1.name = 'Latium'"));
}

#[test]
fn through_relationship_expands_to_two_joins() {
    let sql = users()
        .filter([("posts::tags::name", "history")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "LEFT JOIN posts users__posts_0 ON users__posts_0.author_id = users.id\n\
         LEFT JOIN post_tags posts__post_tags_1 ON \
         posts__post_tags_1.post_id = users__posts_0.id\n\
         LEFT JOIN tags post_tags__tag_2 ON post_tags__tag_2.id = posts__post_tags_1.tag_id"
    ));
    assert!(sql.contains("WHERE post_tags__tag_2.name = 'history'"));
}

#[test]
fn reverse_relationship_is_traversable() {
    let posts = QuerySet::new(schema(), "Post").unwrap();
    let sql = posts
        .filter([("author::first_name", "Julius")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert!(sql.contains(
        "LEFT JOIN users posts__author_0 ON posts__author_0.id = posts.author_id"
    ));
    assert!(sql.contains("WHERE posts__author_0.first_name = 'Julius'"));
}

#[test]
fn repeated_paths_share_one_join() {
    let sql = users()
        .filter([("zone::name", "Rome")])
        .unwrap()
        .filter([("zone::name__different", "Carthago")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(sql.matches("LEFT JOIN").count(), 1);
    assert!(sql.contains(
        "WHERE users__zone_0.name = 'Rome' AND users__zone_0.name <> 'Carthago'"
    ));
}

#[test]
fn condition_and_order_share_joins() {
    use queryset::Direction;
    let sql = users()
        .filter([("posts::stars__gte", 3)])
        .unwrap()
        .order_by(&[("posts::title", Direction::Asc)])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(sql.matches("LEFT JOIN").count(), 1);
    assert!(sql.contains("ORDER BY users__posts_0.title ASC"));
}

#[test]
fn join_order_follows_first_use() {
    let sql = users()
        .filter([("posts::title", "Ave"), ("zone::name", "Rome")])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    let posts_at = sql.find("LEFT JOIN posts").unwrap();
    let zones_at = sql.find("LEFT JOIN geo_zones").unwrap();
    assert!(posts_at < zones_at);
}

#[test]
fn relationship_name_as_local_field_compares_foreign_key() {
    let sql = users()
        .filter([("zone", 7)])
        .unwrap()
        .render_select(&RenderContext::postgres())
        .unwrap();
    assert_eq!(sql, "SELECT users.*\nFROM users\nWHERE users.zone_id = 7");
}

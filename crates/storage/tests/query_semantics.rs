#![forbid(unsafe_code)]

use orbit_storage::{Data, Database, Record};
use serde_json::{Value, json};

fn record(value: Value) -> Record {
    Record::try_from(value).expect("record object")
}

async fn seeded_tasks() -> Database {
    let db = Database::in_memory();
    let rows = [
        json!({"id": "t1", "project_id": "p1", "status": "todo", "order_index": 2}),
        json!({"id": "t2", "project_id": "p2", "status": "done", "order_index": 1}),
        json!({"id": "t3", "project_id": "p1", "status": "done", "order_index": 1}),
        json!({"id": "t4", "project_id": "p1", "status": "todo", "order_index": 3}),
        json!({"id": "t5", "project_id": "p1", "status": "todo", "order_index": 1}),
    ];
    let inserted = db
        .from("tasks")
        .insert_many(rows.into_iter().map(record))
        .await;
    assert!(inserted.is_ok(), "seed failed: {:?}", inserted.error);
    db
}

fn ids(rows: &[Record]) -> Vec<&str> {
    rows.iter().filter_map(Record::id).collect()
}

#[tokio::test]
async fn eq_returns_matching_subset_in_insertion_order() {
    let db = seeded_tasks().await;
    let response = db.from("tasks").select("*").eq("project_id", "p1").await;
    assert!(response.is_ok());
    assert_eq!(ids(response.rows()), vec!["t1", "t3", "t4", "t5"]);
}

#[tokio::test]
async fn predicates_are_and_combined() {
    let db = seeded_tasks().await;
    let response = db
        .from("tasks")
        .select("*")
        .eq("project_id", "p1")
        .neq("status", "done")
        .eq("order_index", 1)
        .await;
    assert_eq!(ids(response.rows()), vec!["t5"]);
}

#[tokio::test]
async fn order_is_stable_for_equal_keys() {
    let db = seeded_tasks().await;

    let ascending = db.from("tasks").select("*").order_by("order_index").await;
    assert_eq!(ids(ascending.rows()), vec!["t2", "t3", "t5", "t1", "t4"]);

    let descending = db
        .from("tasks")
        .select("*")
        .order("order_index", false)
        .await;
    assert_eq!(ids(descending.rows()), vec!["t4", "t1", "t2", "t3", "t5"]);
}

#[tokio::test]
async fn ordering_by_missing_field_keeps_stored_order() {
    let db = seeded_tasks().await;
    let response = db.from("tasks").select("*").order_by("no_such_field").await;
    assert!(response.is_ok());
    assert_eq!(ids(response.rows()), vec!["t1", "t2", "t3", "t4", "t5"]);
}

#[tokio::test]
async fn limit_applies_after_filter_and_order() {
    let db = seeded_tasks().await;

    let two = db
        .from("tasks")
        .select("*")
        .eq("project_id", "p1")
        .order("order_index", false)
        .limit(2)
        .await;
    assert_eq!(ids(two.rows()), vec!["t4", "t1"]);

    let more_than_available = db.from("tasks").select("*").limit(50).await;
    assert_eq!(more_than_available.rows().len(), 5);

    let zero = db.from("tasks").select("*").limit(0).await;
    assert!(zero.is_ok());
    assert_eq!(zero.data, Some(Data::Rows(Vec::new())));
}

#[tokio::test]
async fn single_and_maybe_single_collapse_to_first_row() {
    let db = seeded_tasks().await;

    let first = db
        .from("tasks")
        .select("*")
        .eq("status", "done")
        .single()
        .await;
    assert!(matches!(first.data, Some(Data::Row(ref row)) if row.id() == Some("t2")));

    let none = db.from("tasks").select("*").eq("id", "nope").maybe_single().await;
    assert!(none.is_ok());
    assert!(none.data.is_none());

    let strict = db.from("tasks").select("*").eq("id", "nope").single().await;
    assert!(strict.is_ok());
    assert!(strict.data.is_none());
}

#[tokio::test]
async fn column_list_restricts_returned_fields() {
    let db = seeded_tasks().await;
    let response = db
        .from("tasks")
        .select("id, status")
        .eq("id", "t1")
        .maybe_single()
        .await;
    let row = response.row().expect("row");
    assert_eq!(Value::from(row.clone()), json!({"id": "t1", "status": "todo"}));
}

#[tokio::test]
async fn is_null_matches_absent_and_null_fields() {
    let db = Database::in_memory();
    let rows = [
        json!({"id": "n1", "app_id": null}),
        json!({"id": "n2", "app_id": "a1"}),
        json!({"id": "n3"}),
    ];
    db.from("research_notes")
        .insert_many(rows.into_iter().map(record))
        .await;

    let general = db
        .from("research_notes")
        .select("*")
        .is("app_id", Value::Null)
        .await;
    assert_eq!(ids(general.rows()), vec!["n1", "n3"]);

    let strict_null = db
        .from("research_notes")
        .select("*")
        .eq("app_id", Value::Null)
        .await;
    assert_eq!(ids(strict_null.rows()), vec!["n1"]);
}

#[tokio::test]
async fn selecting_an_empty_collection_is_not_an_error() {
    let db = Database::in_memory();
    let response = db.from("projects").select("*").await;
    assert!(response.is_ok());
    assert!(response.rows().is_empty());
    assert!(db.collections().expect("collections").is_empty());
}

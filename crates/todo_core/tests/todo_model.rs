use chrono::{TimeZone, Utc};
use todo_core::{Todo, TodoId};

#[test]
fn todo_new_sets_defaults() {
    let before = Utc::now();
    let todo = Todo::new(TodoId::from("42"), "hello");

    assert_eq!(todo.id().as_str(), "42");
    assert_eq!(todo.text(), "hello");
    assert!(!todo.is_completed());
    assert!(todo.created_at() >= before);
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let created_at = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    let todo = Todo::with_created_at(TodoId::from("abc"), "ship it", created_at);

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], "abc");
    assert_eq!(json["text"], "ship it");
    assert_eq!(json["completed"], false);
    assert_eq!(json["createdAt"], "2026-02-13T10:00:00Z");
    assert_eq!(json.as_object().unwrap().len(), 4);

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn todo_deserializes_browser_written_records() {
    let value = serde_json::json!({
        "id": "1700000000000",
        "text": "legacy item",
        "completed": true,
        "createdAt": "2023-11-14T22:13:20.000Z"
    });

    let todo: Todo = serde_json::from_value(value).unwrap();
    assert_eq!(todo.id().as_str(), "1700000000000");
    assert!(todo.is_completed());
    assert_eq!(
        todo.created_at(),
        Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()
    );
}

#[test]
fn todo_deserialize_rejects_missing_fields() {
    let value = serde_json::json!({ "id": "1", "text": "no flag" });
    assert!(serde_json::from_value::<Todo>(value).is_err());
}

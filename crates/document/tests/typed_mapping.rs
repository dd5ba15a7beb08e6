use std::collections::BTreeSet;

use arango_document::{
    deserialize, document_enum, equivalent_documents, mapped, to_typed_with, Document,
    DocumentError, Enumerant, Mapped, MapperOptions, RawRecord, Shape, Value,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

document_enum! {
    /// Collection kind as reported by the server.
    pub enum CollectionType {
        Document = 2,
        Edge = 3,
    }
}

document_enum! {
    enum Status {
        Unknown = 0,
        Loaded = 3,
        Deleted = 5,
    }
}

#[derive(Debug, Default, PartialEq)]
struct Person {
    name: String,
    age: i64,
    tags: Vec<String>,
}

mapped!(Person { name, age, tags });

#[derive(Debug, Default, PartialEq)]
struct Collection {
    key: String,
    name: String,
    kind: CollectionType,
    status: Status,
    wait_for_sync: bool,
    journal_size: u64,
    created: Option<DateTime<Utc>>,
    shard_keys: BTreeSet<String>,
    owners: Vec<Person>,
    extra: Document,
    cached_count: u32,
}

mapped!(Collection {
    #[alias = "_key"]
    key,
    name,
    #[alias = "type"]
    kind,
    status,
    #[alias = "waitForSync"]
    wait_for_sync,
    #[alias = "properties.journalSize"]
    journal_size,
    created,
    #[alias = "shardKeys"]
    shard_keys,
    owners,
    extra,
    #[skip]
    cached_count,
});

fn doc(value: serde_json::Value) -> Document {
    match Value::from(value) {
        Value::Document(doc) => doc,
        other => panic!("expected an object, got {other:?}"),
    }
}

#[test]
fn person_round_trip() {
    let source = doc(json!({ "name": "Ann", "age": 41, "tags": ["x", "y"] }));
    let person: Person = source.to_typed().unwrap();
    assert_eq!(
        person,
        Person {
            name: "Ann".into(),
            age: 41,
            tags: vec!["x".into(), "y".into()],
        }
    );

    let back = Document::from_typed(&person).unwrap();
    assert!(equivalent_documents(&back, &source));
}

#[test]
fn collection_from_server_response() {
    let source = deserialize(
        r#"{
            "_key": "9871",
            "_rev": "_hV2",
            "name": "routes",
            "type": 3,
            "status": "Loaded",
            "waitForSync": "true",
            "properties": { "journalSize": 33554432 },
            "created": "2024-05-01T08:00:00.000Z",
            "shardKeys": ["_key", "_key", "region"],
            "owners": [{ "name": "Ann", "age": 41, "tags": [] }],
            "extra": { "a": { "j": 1 } },
            "cached_count": 99
        }"#,
    )
    .unwrap();

    let collection: Collection = source.to_typed().unwrap();
    assert_eq!(collection.key, "9871");
    assert_eq!(collection.kind, CollectionType::Edge);
    assert_eq!(collection.status, Status::Loaded);
    assert!(collection.wait_for_sync);
    assert_eq!(collection.journal_size, 33_554_432);
    assert_eq!(
        collection.created,
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
    );
    assert_eq!(
        collection.shard_keys.iter().collect::<Vec<_>>(),
        vec!["_key", "region"]
    );
    assert_eq!(collection.owners[0].name, "Ann");
    assert_eq!(collection.extra.int("a.j").unwrap(), 1);
    assert_eq!(collection.cached_count, 0);
}

#[test]
fn collection_to_request_body() {
    let collection = Collection {
        key: "k".into(),
        name: "routes".into(),
        kind: CollectionType::Edge,
        journal_size: 1024,
        cached_count: 5,
        ..Collection::default()
    };

    let body = Document::from_typed(&collection).unwrap();
    assert_eq!(body.key(), Some("k"));
    assert_eq!(body.get("type"), Some(&Value::Integer(3)));
    assert_eq!(body.get("status"), Some(&Value::Integer(0)));
    assert_eq!(body.int("properties.journalSize").unwrap(), 1024);
    assert_eq!(body.get("created"), Some(&Value::Null));
    assert!(matches!(body.get("shardKeys"), Some(Value::Set(set)) if set.is_empty()));
    assert!(!body.has_field("cached_count"));

    let again: Collection = body.to_typed().unwrap();
    assert_eq!(
        again,
        Collection {
            cached_count: 0,
            ..collection
        }
    );
}

#[test]
fn enum_lookup() {
    assert_eq!(CollectionType::default(), CollectionType::Document);
    assert_eq!(CollectionType::from_ordinal(3), Some(CollectionType::Edge));
    assert_eq!(Status::from_name("Deleted"), Some(Status::Deleted));
    assert_eq!(Status::Deleted.ordinal(), 5);
    assert_eq!(Status::Loaded.name(), "Loaded");

    let source = doc(json!({ "type": 7 }));
    let err = source.to_typed::<Collection>().unwrap_err();
    assert_eq!(
        err,
        DocumentError::conversion("CollectionType", "integer").in_field("kind")
    );

    let source = doc(json!({ "status": "3" }));
    assert_eq!(
        source.to_typed::<Collection>().unwrap().status,
        Status::Loaded
    );
}

#[test]
fn descriptor_shapes() {
    let shapes: Vec<(&str, &Shape)> = Collection::descriptors()
        .iter()
        .map(|field| (field.effective_name(), field.shape()))
        .collect();

    assert_eq!(shapes[2], ("type", &Shape::Enum));
    assert_eq!(shapes[6], ("created", &Shape::Optional(Box::new(Shape::Date))));
    assert_eq!(shapes[7], ("shardKeys", &Shape::Set(Box::new(Shape::Scalar))));
    assert_eq!(
        shapes[8],
        ("owners", &Shape::Sequence(Box::new(Shape::Compound)))
    );
    assert_eq!(shapes[9], ("extra", &Shape::Raw));
}

#[test]
fn raw_record_keeps_every_field() {
    let source = doc(json!({ "_key": "1", "anything": [1, { "deep": true }] }));
    let record: RawRecord = source.to_typed().unwrap();
    assert_eq!(record.0, source);
    assert_eq!(record.key(), Some("1"));
}

#[test]
fn mapping_depth_limit() {
    let source = doc(json!({ "owners": [{ "name": "Ann" }] }));
    let err = to_typed_with::<Collection>(&source, &MapperOptions { max_depth: 2 }).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &DocumentError::DepthLimitExceeded { limit: 2 }
    );
    assert!(to_typed_with::<Collection>(&source, &MapperOptions { max_depth: 3 }).is_ok());
}

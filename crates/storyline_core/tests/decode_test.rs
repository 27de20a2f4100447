use chrono::{DateTime, FixedOffset};
use serde_json::{Value, json};
use storyline_core::{JsonRecord, Record, decode_chapter, decode_story};
use storyline_error::{DecodeErrorKind, FieldType};

fn record(value: Value) -> JsonRecord {
    JsonRecord::try_from(value).expect("test value is an object")
}

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid timestamp")
}

fn chapter_json(id: i32, position: i32) -> Value {
    json!({
        "id": id,
        "story_id": 1,
        "title": format!("Part {}", position),
        "text": "Once upon a time",
        "position": position,
        "created_at": "2023-05-01T00:00:00Z",
    })
}

/// A story row as a row-backed record would expose it: `chapters` is the raw
/// JSON text of the aggregate column.
struct RawRow {
    scalars: JsonRecord,
    chapters: Option<&'static str>,
}

impl Record for RawRow {
    fn string(&self, key: &str) -> storyline_core::DecodeResult<Option<String>> {
        self.scalars.string(key)
    }

    fn int(&self, key: &str) -> storyline_core::DecodeResult<Option<i32>> {
        self.scalars.int(key)
    }

    fn timestamp(&self, key: &str) -> storyline_core::DecodeResult<Option<DateTime<FixedOffset>>> {
        self.scalars.timestamp(key)
    }

    fn nested_records(&self, key: &str) -> storyline_core::DecodeResult<Option<Vec<JsonRecord>>> {
        self.chapters
            .map(|raw| JsonRecord::parse_array(key, raw.as_bytes()))
            .transpose()
    }
}

fn raw_row(chapters: Option<&'static str>) -> RawRow {
    RawRow {
        scalars: record(json!({"id": 1, "title": "T", "created_at": "2023-05-01T00:00:00Z"})),
        chapters,
    }
}

#[test]
fn scenario_row_decodes_to_story() {
    let row = raw_row(Some(
        r#"[{"id":10,"story_id":1,"title":null,"text":"hello world","position":1,"created_at":"2023-05-01T00:00:00Z"}]"#,
    ));

    let story = decode_story(&row).unwrap();

    assert_eq!(*story.id(), 1);
    assert_eq!(story.title(), "T");
    assert_eq!(*story.created_at(), ts("2023-05-01T00:00:00Z"));
    assert_eq!(story.chapters().len(), 1);

    let chapter = &story.chapters()[0];
    assert_eq!(*chapter.id(), 10);
    assert_eq!(*chapter.position(), 1);
    assert_eq!(*chapter.story_id(), 1);
    assert_eq!(*chapter.title(), None);
    assert_eq!(chapter.text(), "hello world");
    assert_eq!(*chapter.created_at(), ts("2023-05-01T00:00:00Z"));
}

#[test]
fn empty_chapter_array_is_valid() {
    let story = decode_story(&raw_row(Some("[]"))).unwrap();
    assert!(story.chapters().is_empty());
}

#[test]
fn absent_chapters_fail() {
    let err = decode_story(&raw_row(None)).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::RequiredFieldMissing("chapters".to_string())
    );
}

#[test]
fn null_chapters_in_json_row_fail() {
    let row = record(json!({"id": 1, "title": "T", "created_at": "2023-05-01T00:00:00Z", "chapters": null}));
    let err = decode_story(&row).unwrap_err();
    assert_eq!(err.kind.field(), "chapters");
}

#[test]
fn chapter_without_text_fails_whole_story() {
    let row = raw_row(Some(
        r#"[{"id":10,"story_id":1,"title":"A","text":"ok","position":1,"created_at":"2023-05-01T00:00:00Z"},
            {"id":11,"story_id":1,"title":"B","position":2,"created_at":"2023-05-01T00:00:00Z"}]"#,
    ));

    let err = decode_story(&row).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::RequiredFieldMissing("text".to_string())
    );
}

#[test]
fn malformed_chapters_column_is_malformed_source() {
    let err = decode_story(&raw_row(Some("[{\"id\": 1"))).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::MalformedSource { .. }));
}

#[test]
fn chapters_count_excludes_non_objects() {
    let row = record(json!({
        "id": 1,
        "title": "T",
        "created_at": "2023-05-01T00:00:00Z",
        "chapters": [chapter_json(10, 1), 5, "noise", null, chapter_json(11, 2), [1, 2]],
    }));

    let story = decode_story(&row).unwrap();
    assert_eq!(story.chapters().len(), 2);
}

#[test]
fn chapter_order_follows_aggregate() {
    let row = record(json!({
        "id": 1,
        "title": "T",
        "created_at": "2023-05-01T00:00:00Z",
        "chapters": [chapter_json(12, 3), chapter_json(10, 1), chapter_json(11, 2)],
    }));

    let story = decode_story(&row).unwrap();
    let ids: Vec<i32> = story.chapters().iter().map(|c| *c.id()).collect();
    assert_eq!(ids, vec![12, 10, 11]);

    let sorted = story.sorted_by_position();
    let ids: Vec<i32> = sorted.chapters().iter().map(|c| *c.id()).collect();
    assert_eq!(ids, vec![10, 11, 12]);
}

#[test]
fn missing_title_is_absent_not_error() {
    let mut chapter = chapter_json(10, 4);
    chapter.as_object_mut().unwrap().remove("title");

    let decoded = decode_chapter(&record(chapter)).unwrap();
    assert_eq!(*decoded.title(), None);
}

#[test]
fn each_required_chapter_field_is_reported() {
    for field in ["id", "story_id", "text", "position", "created_at"] {
        let mut chapter = chapter_json(10, 1);
        chapter.as_object_mut().unwrap().remove(field);

        let err = decode_chapter(&record(chapter)).unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::RequiredFieldMissing(field.to_string()),
            "field {field}"
        );
    }
}

#[test]
fn missing_field_reports_the_line_that_required_it() {
    let mut lines = Vec::new();
    for field in ["id", "story_id", "text", "position", "created_at"] {
        let mut chapter = chapter_json(10, 1);
        chapter.as_object_mut().unwrap().remove(field);

        let err = decode_chapter(&record(chapter)).unwrap_err();
        assert!(err.file.contains("storyline_core"), "file {}", err.file);
        lines.push(err.line);
    }

    let mut distinct = lines.clone();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), lines.len(), "lines {lines:?}");
}

#[test]
fn wrong_type_is_type_mismatch() {
    let mut chapter = chapter_json(10, 1);
    chapter["position"] = json!("first");

    let err = decode_chapter(&record(chapter)).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::TypeMismatch {
            field: "position".to_string(),
            expected: FieldType::Int,
        }
    );
}

#[test]
fn scalar_fields_survive_json_encoding() {
    let created_at = ts("2021-12-31T23:59:58.5-05:00");
    let source = json!({
        "name": "Chapter Ω",
        "count": -42,
        "when": created_at.to_rfc3339(),
    });

    let r = record(source);
    assert_eq!(r.string("name").unwrap().as_deref(), Some("Chapter Ω"));
    assert_eq!(r.int("count").unwrap(), Some(-42));
    assert_eq!(r.timestamp("when").unwrap(), Some(created_at));
}

#[test]
fn decoding_twice_is_equal() {
    let row = record(json!({
        "id": 7,
        "title": "Twice",
        "created_at": "2023-05-01T00:00:00+09:00",
        "chapters": [chapter_json(1, 1), chapter_json(2, 2)],
    }));

    assert_eq!(decode_story(&row).unwrap(), decode_story(&row).unwrap());
}

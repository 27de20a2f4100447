use serde_json::json;
use storyline_core::{
    ChapterOrder, DecodePolicy, DecodeResult, JsonRecord, Story, collect_stories, decode_story,
};
use storyline_error::DecodeErrorKind;

fn decode(value: serde_json::Value) -> DecodeResult<Story> {
    decode_story(&JsonRecord::try_from(value).unwrap())
}

fn rows() -> Vec<DecodeResult<Story>> {
    vec![
        decode(json!({"id": 1, "title": "One", "created_at": "2023-01-01T00:00:00Z", "chapters": []})),
        decode(json!({"id": 2, "created_at": "2023-01-01T00:00:00Z", "chapters": []})),
        decode(json!({"id": 3, "title": "Three", "created_at": "2023-01-01T00:00:00Z", "chapters": []})),
    ]
}

#[test]
fn fail_fast_is_default() {
    assert_eq!(DecodePolicy::default(), DecodePolicy::FailFast);
}

#[test]
fn fail_fast_returns_first_error() {
    let err = collect_stories(rows(), DecodePolicy::FailFast).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::RequiredFieldMissing("title".to_string())
    );
}

#[test]
fn skip_invalid_keeps_good_rows_in_order() {
    let stories = collect_stories(rows(), DecodePolicy::SkipInvalid).unwrap();
    let ids: Vec<i32> = stories.iter().map(|s| *s.id()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn chapter_order_position_sorts() {
    let story = decode(json!({
        "id": 1,
        "title": "T",
        "created_at": "2023-01-01T00:00:00Z",
        "chapters": [
            {"id": 2, "story_id": 1, "text": "b", "position": 20, "created_at": "2023-01-01T00:00:00Z"},
            {"id": 1, "story_id": 1, "text": "a", "position": 10, "created_at": "2023-01-01T00:00:00Z"},
        ],
    }))
    .unwrap();

    let kept = ChapterOrder::Aggregate.apply(story.clone());
    assert_eq!(*kept.chapters()[0].id(), 2);

    let sorted = ChapterOrder::Position.apply(story);
    assert_eq!(*sorted.chapters()[0].id(), 1);
}

#[test]
fn policies_deserialize_from_snake_case() {
    let policy: DecodePolicy = serde_json::from_str("\"skip_invalid\"").unwrap();
    assert_eq!(policy, DecodePolicy::SkipInvalid);

    let order: ChapterOrder = serde_json::from_str("\"position\"").unwrap();
    assert_eq!(order, ChapterOrder::Position);
}

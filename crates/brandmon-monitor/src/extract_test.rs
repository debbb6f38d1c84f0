use super::*;
use serde_json::json;

fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

// -----------------------------------------------------------------------
// extract
// -----------------------------------------------------------------------

#[test]
fn linkedin_renames_user_id_and_keeps_values() {
    let raw = record(json!({
        "url": "https://www.linkedin.com/posts/acme-1",
        "headline": "Acme ships v2",
        "post_text": "We are proud to announce...",
        "hashtags": ["#acme"],
        "user_id": "jane-doe",
        "num_likes": 40
    }));

    let out = extract(Platform::LinkedIn, &raw);

    assert_eq!(out["url"], json!("https://www.linkedin.com/posts/acme-1"));
    assert_eq!(out["headline"], json!("Acme ships v2"));
    assert_eq!(out["hashtags"], json!(["#acme"]));
    assert_eq!(out["tagged_companies"], json!([]));
    assert_eq!(out["original_poster"], json!("jane-doe"));
    assert!(!out.contains_key("user_id"));
    assert!(!out.contains_key("num_likes"));
}

#[test]
fn instagram_defaults_when_fields_absent() {
    let out = extract(Platform::Instagram, &RawRecord::new());

    assert_eq!(out["url"], json!(""));
    assert_eq!(out["description"], json!("No description available"));
    assert_eq!(out["likes"], json!("0"));
    assert_eq!(out["num_comments"], json!("0"));
    assert_eq!(out["followers"], json!("0"));
    assert_eq!(out["is_paid_partnership"], json!(false));
    assert_eq!(out["original_poster"], json!("Unknown user"));
}

#[test]
fn youtube_defaults_and_renames_youtuber() {
    let raw = record(json!({
        "url": "https://www.youtube.com/watch?v=1",
        "youtuber": "@acmetv",
        "views": 1200
    }));

    let out = extract(Platform::YouTube, &raw);

    assert_eq!(out["title"], json!("No Title"));
    assert_eq!(out["original_poster"], json!("@acmetv"));
    assert_eq!(out["views"], json!(1200));
    assert_eq!(out["likes"], json!("0"));
    assert_eq!(out["verified"], json!(false));
    assert_eq!(out["transcript"], json!("No transcript available"));
}

#[test]
fn x_field_set_is_fixed() {
    let out = extract(Platform::X, &record(json!({"url": "https://x.com/a/status/1"})));
    let mut keys: Vec<&str> = out.keys().map(String::as_str).collect();
    let mut expected = vec![
        "url",
        "views",
        "likes",
        "replies",
        "reposts",
        "hashtags",
        "quotes",
        "bookmarks",
        "description",
        "tagged_users",
        "original_poster",
    ];
    keys.sort_unstable();
    expected.sort_unstable();
    assert_eq!(keys, expected);
}

#[test]
fn null_values_take_the_default() {
    let raw = record(json!({"url": null, "likes": null, "description": null}));
    let out = extract(Platform::Instagram, &raw);
    assert_eq!(out["url"], json!(""));
    assert_eq!(out["likes"], json!("0"));
    assert_eq!(out["description"], json!("No description available"));
}

#[test]
fn extract_is_idempotent() {
    let raw = record(json!({
        "url": "https://www.instagram.com/p/1",
        "likes": 7,
        "user_posted": "acme"
    }));
    let first = extract(Platform::Instagram, &raw);
    let second = extract(Platform::Instagram, &raw);
    assert_eq!(first, second);
}

// -----------------------------------------------------------------------
// extract_all
// -----------------------------------------------------------------------

#[test]
fn extract_all_drops_provider_error_entries() {
    let records = vec![
        record(json!({"url": "https://x.com/a/status/1", "likes": 3})),
        record(json!({"error": "Page not found", "error_code": "dead_page", "input": {"url": "https://x.com/a/status/2"}})),
        record(json!({"url": "https://x.com/a/status/3", "error": null})),
    ];

    let out = extract_all(Platform::X, &records);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0]["url"], json!("https://x.com/a/status/1"));
    assert_eq!(out[1]["url"], json!("https://x.com/a/status/3"));
}

#[test]
fn extract_all_keeps_records_that_carry_a_url() {
    let records = vec![record(json!({
        "url": "https://www.youtube.com/watch?v=1",
        "error": "transcript unavailable"
    }))];
    assert_eq!(extract_all(Platform::YouTube, &records).len(), 1);
}

use ocr_series::pipeline::{extract_pairs, extract_time_series};

#[test]
fn text_without_series_key_is_returned_unchanged() {
    let input = r#"{"series": [{"timestamp": "2024-01-01T00:00:00Z", "value": 1}]}"#;
    assert_eq!(extract_time_series(input), input);
}

#[test]
fn surplus_timestamps_are_truncated_to_value_count() {
    let input = concat!(
        r#"{"time_series":[{"timestamp": "2024-01-01T00:00:00Z", "value": 1}"#,
        r#"{"timestamp": "2024-01-01T01:00:00Z", "value": 2}"#,
        r#"{"timestamp": "2024-01-01T02:00:00Z"}]}"#,
    );

    let pairs = extract_pairs(input);
    assert_eq!(pairs.timestamps.len(), 3);
    assert_eq!(pairs.values.len(), 2);
    assert_eq!(pairs.paired_len(), 2);

    let canonical = extract_time_series(input);
    assert_eq!(canonical.matches("\"timestamp\"").count(), 2);
    assert!(canonical.contains(r#"{"timestamp": "2024-01-01T01:00:00Z", "value": 2}"#));
    assert!(!canonical.contains("2024-01-01T02:00:00Z"));
}

#[test]
fn surplus_values_are_dropped() {
    let input = r#""time_series" "timestamp": "2024-01-01T00:00:00Z" "value": 1 "value": 2"#;
    let canonical = extract_time_series(input);
    assert_eq!(
        canonical,
        "{\n    \"time_series\": [\n        {\"timestamp\": \"2024-01-01T00:00:00Z\", \"value\": 1}\n    ]\n}"
    );
}

#[test]
fn pairing_is_positional_in_document_order() {
    let input = concat!(
        r#"{"time_series": "value": 7, "timestamp": "2024-05-05T05:05:05Z", "#,
        r#""timestamp": "2024-06-06T06:06:06Z" "value": 8}"#,
    );
    let pairs: Vec<(String, String)> = extract_pairs(input)
        .pairs()
        .map(|(ts, value)| (ts.to_owned(), value.to_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("2024-05-05T05:05:05Z".to_owned(), "7".to_owned()),
            ("2024-06-06T06:06:06Z".to_owned(), "8".to_owned()),
        ]
    );
}

#[test]
fn colon_spacing_is_tolerated() {
    let pairs = extract_pairs(r#""timestamp":"2024-01-01T00:00:00Z","value":3.5"#);
    assert_eq!(pairs.timestamps, vec!["2024-01-01T00:00:00Z".to_owned()]);
    assert_eq!(pairs.values, vec!["3.5".to_owned()]);
}

#[test]
fn fractional_seconds_and_signed_values_are_not_scraped() {
    let pairs = extract_pairs(
        r#""timestamp": "2024-01-01T00:00:00.5Z", "value": -3, "timestamp": "2024-01-01+00:00""#,
    );
    assert!(pairs.timestamps.is_empty());
    assert!(pairs.values.is_empty());
}

#[test]
fn lexically_shaped_but_invalid_timestamps_are_still_scraped() {
    let pairs = extract_pairs(r#""timestamp": "2024-13-40T99:99:99Z", "value": 1"#);
    assert_eq!(pairs.timestamps, vec!["2024-13-40T99:99:99Z".to_owned()]);
}

#[test]
fn no_matches_render_an_empty_array() {
    assert_eq!(
        extract_time_series(r#"{"time_series": "unreadable"}"#),
        "{\n    \"time_series\": [\n    ]\n}"
    );
}

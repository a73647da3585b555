//! End-to-end tests for the string algorithms.

use similar_asserts::assert_eq;
use stringcore::{Range, String};

#[test]
fn search_and_replace_weather_report() {
    let report = String::from("Mostly cloudy, 46F");
    assert_eq!(report.replace("cloudy", "sunny"), "Mostly sunny, 46F");
}

#[test]
fn replace_both_occurrences_left_to_right() {
    let s = String::from("warm day, warm night");
    assert_eq!(s.replace("warm", "cold"), "cold day, cold night");
    // Inserted text is never rescanned.
    assert_eq!(String::from("aa").replace("a", "ab"), "abab");
}

#[test]
fn range_of_license_text() {
    let license = String::from("Permission is hereby granted");
    assert_eq!(license.range_of("hereby"), Some(Range::new(14, 6)));
    assert_eq!(license.substring(Range::new(14, 6)).unwrap(), "hereby");
}

#[test]
fn ranges_of_finds_every_match() {
    let s = String::from("the dog ate the homework ... the food");
    let matches = s.ranges_of("the");
    assert_eq!(
        matches,
        vec![Range::new(0, 3), Range::new(12, 3), Range::new(29, 3)]
    );
    // Matches never overlap.
    for pair in matches.windows(2) {
        assert!(pair[0].end() <= pair[1].position);
    }
}

#[test]
fn split_drops_boundary_and_adjacent_empties() {
    let s = String::from(", lead, , trail,");
    let parts = s.split(", ");
    assert_eq!(parts, vec![String::from("lead"), String::from("trail,")]);

    let s = String::from("a::b::c");
    assert_eq!(
        s.split("::"),
        vec![String::from("a"), String::from("b"), String::from("c")]
    );
    assert_eq!(String::from("::::").split("::"), Vec::<String>::new());
}

#[test]
fn split_excluding_range_returns_complement() {
    let s = String::from("the dog ate");
    let pieces = s.split_excluding_range(Range::new(4, 4)).unwrap();
    assert_eq!(pieces, vec![String::from("the "), String::from("ate")]);

    // A range touching either end yields a single piece.
    assert_eq!(
        s.split_excluding_range(Range::new(0, 4)).unwrap(),
        vec![String::from("dog ate")]
    );
    assert_eq!(
        s.split_excluding_range(Range::new(7, 4)).unwrap(),
        vec![String::from("the dog")]
    );
}

#[test]
fn substring_from_bounds() {
    let s = String::from("abc");
    assert!(s.substring_from(4).is_err());
    assert_eq!(s.substring_from(3).unwrap(), "");
    assert_eq!(s.substring_to(0).unwrap(), "");
    assert_eq!(s.substring_to(3).unwrap(), "abc");
}

#[test]
fn uppercase_is_idempotent() {
    let s = String::from("MiXeD cAsE téxt");
    assert_eq!(s.to_uppercase().to_uppercase(), s.to_uppercase());
    assert_eq!(s.to_lowercase().to_lowercase(), s.to_lowercase());
}

#[test]
fn replace_range_splices() {
    let s = String::from("Mostly cloudy, 46F");
    let range = s.range_of("cloudy").unwrap();
    assert_eq!(
        s.replace_range(range, "sunny").unwrap(),
        "Mostly sunny, 46F"
    );
    assert!(s.replace_range(Range::new(17, 5), "x").is_err());
}

#[test]
fn indexing_and_iteration_agree() {
    let s = String::from("a⎇z");
    assert_eq!(s[1], 0x2387);
    let collected: Vec<u32> = s.chars().collect();
    assert_eq!(collected, s.as_codepoints());
    let indices: Vec<(usize, u32)> = s.char_indices().collect();
    assert_eq!(indices, vec![(0, 0x61), (1, 0x2387), (2, 0x7A)]);
}

#[test]
fn concurrent_readers_share_one_buffer() {
    let s = String::from("shared across threads");
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let s = s.clone();
            std::thread::spawn(move || s.ranges_of("a").len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}

#[test]
fn format_scenarios() {
    assert_eq!(stringcore::sprintf!("%d", -1).unwrap(), "-1");
    assert_eq!(stringcore::sprintf!("%04d", 1).unwrap(), "0001");
    assert_eq!(stringcore::sprintf!("%x", -16).unwrap(), "fffffff0");
}

#[test]
fn format_inlines_string_objects() {
    let city = String::from("Portland");
    let line = stringcore::sprintf!("%@: %.1f°", &city, 15.5).unwrap();
    assert_eq!(line, "Portland: 15.5°");
}

#[test]
fn json_escapes_feed_string_algorithms() {
    let s = String::from_json_escaped(r#"line one\nline two"#).unwrap();
    let lines = s.split(&'\n');
    assert_eq!(lines, vec![String::from("line one"), String::from("line two")]);
}

//! Tests for breadcrumb trail behavior
//!
//! Clicking a segment consults the listener before anything is removed:
//! a rejected navigation must leave the trail exactly as it was, otherwise
//! the visible path and the listing drift apart.
//!
//! Trail used throughout:
//! home > Storage > docs > reports

use filepick::model::{BreadcrumbTrail, NavigationDecision, SegmentTag};

fn path(tag: &str) -> SegmentTag {
    SegmentTag::Path(tag.to_string())
}

/// Helper: home, one storage root and two nested folders
fn sample_trail() -> BreadcrumbTrail {
    let mut trail = BreadcrumbTrail::new();
    trail.add_home();
    trail.add_root_segment("Storage", "/storage");
    trail.add_segment("docs");
    trail.add_segment("reports");
    trail
}

fn names(trail: &BreadcrumbTrail) -> Vec<&str> {
    trail.segments().iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn test_segments_accumulate_paths() {
    let trail = sample_trail();

    assert_eq!(names(&trail), vec!["home", "Storage", "docs", "reports"]);
    assert_eq!(trail.last().map(|s| s.tag.clone()), Some(path("/storage/docs/reports")));

    let positions: Vec<u32> = trail.segments().iter().map(|s| s.position).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_rejected_click_leaves_trail_unchanged() {
    let mut trail = sample_trail();
    let before = trail.clone();
    let mut notified = Vec::new();

    let decision = trail.select_segment(&path("/storage"), |tag| {
        notified.push(tag.clone());
        NavigationDecision::Reject
    });

    assert_eq!(decision, NavigationDecision::Reject);
    assert_eq!(notified, vec![path("/storage")]);
    assert_eq!(trail, before);
}

#[test]
fn test_accepted_click_truncates_after_segment() {
    let mut trail = sample_trail();
    let mut notified = Vec::new();

    let decision = trail.select_segment(&path("/storage/docs"), |tag| {
        notified.push(tag.clone());
        NavigationDecision::Proceed
    });

    assert_eq!(decision, NavigationDecision::Proceed);
    assert_eq!(notified, vec![path("/storage/docs")]);
    assert_eq!(names(&trail), vec!["home", "Storage", "docs"]);
}

#[test]
fn test_click_on_first_folder_keeps_home_and_folder() {
    let mut trail = BreadcrumbTrail::new();
    trail.add_home();
    trail.add_segment("a");
    trail.add_segment("b");
    let mut notified = Vec::new();

    trail.select_segment(&path("a"), |tag| {
        notified.push(tag.clone());
        NavigationDecision::Proceed
    });

    assert_eq!(notified, vec![path("a")]);
    assert_eq!(names(&trail), vec!["home", "a"]);
    assert!(trail.segments()[0].tag.is_home());
}

#[test]
fn test_click_on_last_segment_removes_nothing_but_notifies() {
    let mut trail = sample_trail();
    let mut notified = Vec::new();

    let decision = trail.select_segment(&path("/storage/docs/reports"), |tag| {
        notified.push(tag.clone());
        NavigationDecision::Proceed
    });

    assert_eq!(decision, NavigationDecision::Proceed);
    assert_eq!(notified, vec![path("/storage/docs/reports")]);
    assert_eq!(trail.len(), 4);
    assert_eq!(names(&trail), vec!["home", "Storage", "docs", "reports"]);
}

#[test]
fn test_home_click_notifies_with_home_tag() {
    let mut trail = sample_trail();
    let mut notified = Vec::new();

    trail.select_segment(&SegmentTag::Home, |tag| {
        notified.push(tag.clone());
        NavigationDecision::Proceed
    });

    assert_eq!(notified, vec![SegmentTag::Home]);
    assert!(trail.is_empty());
}

#[test]
fn test_home_click_clears_trail() {
    let mut trail = sample_trail();

    trail.select_segment(&SegmentTag::Home, |_| NavigationDecision::Proceed);

    assert!(trail.is_empty());
}

#[test]
fn test_rejected_home_click_keeps_segments() {
    let mut trail = sample_trail();

    trail.select_segment(&SegmentTag::Home, |_| NavigationDecision::Reject);

    assert_eq!(trail.len(), 4);
}

#[test]
fn test_unknown_tag_reported_but_nothing_removed() {
    let mut trail = sample_trail();
    let mut called = false;

    trail.select_segment(&path("/elsewhere"), |_| {
        called = true;
        NavigationDecision::Proceed
    });

    assert!(called);
    assert_eq!(trail.len(), 4);
}

#[test]
fn test_segments_after_truncation_continue_positions() {
    let mut trail = sample_trail();
    trail.truncate_after(&path("/storage"));
    trail.add_segment("music");

    assert_eq!(names(&trail), vec!["home", "Storage", "music"]);
    assert_eq!(trail.last().map(|s| s.tag.clone()), Some(path("/storage/music")));
    let positions: Vec<u32> = trail.segments().iter().map(|s| s.position).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_json_state_restores_same_trail() {
    let trail = sample_trail();

    let json = trail.to_json().unwrap();
    let restored = BreadcrumbTrail::from_json(&json).unwrap();

    assert_eq!(restored, trail);
}

#[test]
fn test_garbage_state_is_an_error() {
    assert!(BreadcrumbTrail::from_json("not json").is_err());
}

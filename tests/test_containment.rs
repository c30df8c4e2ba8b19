mod common;

use common::*;
use retext::{filter, filter_regions};

#[test]
fn test_identical_boxes_keep_exactly_one() {
    let a = bbox(0.0, 0.0, 10.0, 10.0);
    let b = bbox(0.0, 0.0, 10.0, 10.0);
    assert_eq!(filter(&[a, b]), vec![a]);

    let kept = filter(&[a, a, a]);
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_first_duplicate_survives() {
    let kept = filter_regions(&[
        region(0.0, 0.0, 10.0, 10.0, "first"),
        region(0.0, 0.0, 10.0, 10.0, "second"),
    ]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].text, "first");
}

#[test]
fn test_nested_box_is_removed() {
    let inner = bbox(10.0, 10.0, 20.0, 20.0);
    let other = bbox(200.0, 0.0, 240.0, 20.0);
    let outer = bbox(0.0, 0.0, 100.0, 50.0);

    // Survivors keep their relative order
    assert_eq!(filter(&[inner, other, outer]), vec![other, outer]);
}

#[test]
fn test_shared_edges_count_as_contained() {
    let outer = bbox(0.0, 0.0, 100.0, 20.0);
    let flush = bbox(0.0, 0.0, 40.0, 20.0);
    assert_eq!(filter(&[flush, outer]), vec![outer]);
}

#[test]
fn test_partial_overlap_is_kept() {
    let a = bbox(0.0, 0.0, 50.0, 20.0);
    let b = bbox(40.0, 5.0, 90.0, 25.0);
    assert_eq!(filter(&[a, b]), vec![a, b]);
}

#[test]
fn test_duplicates_inside_a_larger_box_all_go() {
    let outer = bbox(0.0, 0.0, 100.0, 100.0);
    let dup = bbox(10.0, 10.0, 20.0, 20.0);
    assert_eq!(filter(&[dup, dup, outer]), vec![outer]);
}

#[test]
fn test_no_survivor_is_inside_another() {
    let boxes = vec![
        bbox(0.0, 0.0, 10.0, 10.0),
        bbox(0.0, 0.0, 10.0, 10.0),
        bbox(2.0, 2.0, 8.0, 8.0),
        bbox(5.0, 5.0, 30.0, 12.0),
        bbox(5.0, 5.0, 30.0, 12.0),
        bbox(-5.0, -5.0, 4.0, 4.0),
        bbox(50.0, 50.0, 60.0, 60.0),
        bbox(0.0, 0.0, 60.0, 60.0),
    ];

    let kept = filter(&boxes);
    assert!(!kept.is_empty());
    for (i, inner) in kept.iter().enumerate() {
        for (j, outer) in kept.iter().enumerate() {
            if i != j {
                assert!(!outer.contains(inner), "{inner:?} is inside {outer:?}");
            }
        }
    }
}

#[test]
fn test_empty_input() {
    assert!(filter(&[]).is_empty());
}

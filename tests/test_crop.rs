mod common;

use common::*;
use image::Rgba;
use retext::crop;

#[test]
fn test_crop_adds_white_border() -> anyhow::Result<()> {
    let mut bitmap = solid_bitmap(50, 50, Rgba([0, 0, 200, 255]));
    bitmap.put_pixel(5, 5, INK);

    let cropped = crop(&bitmap, &bbox(5.0, 5.0, 15.0, 25.0), 10)?;
    assert_eq!(cropped.dimensions(), (30, 40));

    assert_eq!(*cropped.get_pixel(0, 0), WHITE);
    assert_eq!(*cropped.get_pixel(9, 9), WHITE);
    assert_eq!(*cropped.get_pixel(29, 39), WHITE);

    // Source (5, 5) lands at (padding, padding)
    assert_eq!(*cropped.get_pixel(10, 10), INK);
    assert_eq!(*cropped.get_pixel(19, 29), Rgba([0, 0, 200, 255]));
    assert_eq!(*cropped.get_pixel(20, 30), WHITE);
    Ok(())
}

#[test]
fn test_crop_without_padding() -> anyhow::Result<()> {
    let bitmap = page_with_glyphs(40, 40, &[(10, 10, 20, 20)]);
    let cropped = crop(&bitmap, &bbox(10.0, 10.0, 20.0, 20.0), 0)?;
    assert_eq!(cropped.dimensions(), (10, 10));
    assert_eq!(*cropped.get_pixel(0, 0), WHITE);
    assert_eq!(*cropped.get_pixel(5, 5), INK);
    Ok(())
}

#[test]
fn test_crop_outside_bitmap_stays_white() -> anyhow::Result<()> {
    let bitmap = solid_bitmap(20, 20, INK);

    // Half of the box hangs off the left edge
    let cropped = crop(&bitmap, &bbox(-10.0, 0.0, 10.0, 10.0), 2)?;
    assert_eq!(cropped.dimensions(), (24, 14));
    assert_eq!(*cropped.get_pixel(5, 5), WHITE);
    assert_eq!(*cropped.get_pixel(12, 5), INK);

    let cropped = crop(&bitmap, &bbox(100.0, 100.0, 110.0, 110.0), 2)?;
    assert!(cropped.pixels().all(|px| *px == WHITE));
    Ok(())
}

#[test]
fn test_transparent_source_shows_white() -> anyhow::Result<()> {
    let bitmap = solid_bitmap(20, 20, TRANSPARENT);
    let cropped = crop(&bitmap, &bbox(2.0, 2.0, 12.0, 12.0), 10)?;
    assert!(cropped.pixels().all(|px| *px == WHITE));
    Ok(())
}

#[test]
fn test_crop_rejects_degenerate_box() {
    let bitmap = solid_bitmap(20, 20, WHITE);
    let result = crop(&bitmap, &bbox(5.0, 5.0, 5.0, 15.0), 10);
    assert!(matches!(result, Err(RegionError::DegenerateBox(_))));

    // Collapses to zero width once snapped to pixels
    let result = crop(&bitmap, &bbox(5.1, 5.0, 5.3, 15.0), 10);
    assert!(matches!(result, Err(RegionError::DegenerateBox(_))));

    let result = crop(&bitmap, &bbox(15.0, 5.0, 5.0, 15.0), 10);
    assert!(matches!(result, Err(RegionError::InvalidBox { .. })));
}

#[test]
fn test_crop_rejects_boxes_too_large_for_a_canvas() {
    let bitmap = solid_bitmap(100, 20, WHITE);

    // Wider than u32::MAX once snapped
    let result = crop(&bitmap, &bbox(0.0, 0.0, 4294967301.0, 10.0), 10);
    assert!(matches!(result, Err(RegionError::OversizedBox(_))));

    let result = crop(&bitmap, &bbox(-1e300, 0.0, 1e300, 10.0), 0);
    assert!(matches!(result, Err(RegionError::OversizedBox(_))));

    // Padding overflows the canvas width
    let result = crop(&bitmap, &bbox(0.0, 0.0, 10.0, 10.0), u32::MAX);
    assert!(matches!(result, Err(RegionError::OversizedBox(_))));

    // Fits u32 but would need far more than the allocation cap
    let result = crop(&bitmap, &bbox(0.0, 0.0, 1e9, 10.0), 0);
    assert!(matches!(result, Err(RegionError::OversizedBox(_))));
}

use tracing::debug;

use crate::models::{BoundingBox, DetectedRegion};
use crate::regions::merge::Mergeable;

/// Drop every box enclosed by another box; survivors keep their input order.
pub fn filter(boxes: &[BoundingBox]) -> Vec<BoundingBox> {
    filter_contained(boxes.to_vec())
}

/// Same as [`filter`], for detections.
pub fn filter_regions(regions: &[DetectedRegion]) -> Vec<DetectedRegion> {
    filter_contained(regions.to_vec())
}

pub fn filter_contained<T: Mergeable>(items: Vec<T>) -> Vec<T> {
    let boxes: Vec<BoundingBox> = items.iter().map(|item| *item.bbox()).collect();
    let before = items.len();

    let kept: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !is_enclosed(&boxes, *i))
        .map(|(_, item)| item)
        .collect();

    debug!(before, after = kept.len(), "containment filter");
    kept
}

/// A box is enclosed when another box contains it. Of identical boxes only the
/// earliest survives.
fn is_enclosed(boxes: &[BoundingBox], index: usize) -> bool {
    let inner = &boxes[index];
    boxes.iter().enumerate().any(|(j, outer)| {
        if j == index || !outer.contains(inner) {
            return false;
        }
        outer != inner || j < index
    })
}

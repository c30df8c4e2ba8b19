use tracing::debug;

use crate::config::MergeParams;
use crate::error::{RegionError, Result};
use crate::models::{BoundingBox, DetectedRegion};

/// Something the adaptive merger can consolidate.
pub trait Mergeable: Sized {
    fn bbox(&self) -> &BoundingBox;

    /// Combine two items into one covering the union of their boxes.
    fn absorb(self, other: Self) -> Self;
}

impl Mergeable for BoundingBox {
    fn bbox(&self) -> &BoundingBox {
        self
    }

    fn absorb(self, other: Self) -> Self {
        self.union(&other)
    }
}

impl Mergeable for DetectedRegion {
    fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    fn absorb(self, other: Self) -> Self {
        let bbox = self.bbox.union(&other.bbox);
        let confidence = self.confidence.min(other.confidence);

        // Reading order within a line is left to right
        let (left, right) = if other.bbox.x0 < self.bbox.x0 {
            (other.text, self.text)
        } else {
            (self.text, other.text)
        };
        let text = match (left.is_empty(), right.is_empty()) {
            (true, _) => right,
            (_, true) => left,
            _ => format!("{left} {right}"),
        };

        DetectedRegion {
            bbox,
            text,
            confidence,
        }
    }
}

/// Adaptive adjacency test: similar heights, same line, small horizontal gap.
pub fn should_merge(a: &BoundingBox, b: &BoundingBox, params: &MergeParams) -> bool {
    let (ha, hb) = (a.height(), b.height());
    let min_h = ha.min(hb);
    let max_h = ha.max(hb);
    if max_h <= 0.0 || min_h / max_h < params.height_similarity {
        return false;
    }

    if a.vertical_overlap(b) <= params.vertical_overlap * min_h {
        return false;
    }

    a.horizontal_gap(b) < params.horizontal_gap * (ha + hb) / 2.0
}

/// Merge raw boxes to a fixed point.
pub fn merge(boxes: &[BoundingBox]) -> Result<Vec<BoundingBox>> {
    merge_with(boxes.to_vec(), &MergeParams::default())
}

/// Merge detections to a fixed point, carrying their text and confidence.
pub fn merge_regions(regions: &[DetectedRegion]) -> Result<Vec<DetectedRegion>> {
    merge_with(regions.to_vec(), &MergeParams::default())
}

/// Run merge passes until one of them finds nothing to merge.
///
/// Fails on the first invalid or degenerate box; nothing is merged in that case.
pub fn merge_with<T: Mergeable>(items: Vec<T>, params: &MergeParams) -> Result<Vec<T>> {
    for item in &items {
        let bbox = item.bbox();
        bbox.validate()?;
        if bbox.is_degenerate() {
            return Err(RegionError::DegenerateBox(*bbox));
        }
    }

    let mut current = items;
    let mut pass = 0usize;
    loop {
        pass += 1;
        sort_reading_order(&mut current);
        let before = current.len();
        let (next, merges) = merge_pass(current, params);
        debug!(pass, before, after = next.len(), merges, "merge pass");
        current = next;
        if merges == 0 {
            break;
        }
    }

    Ok(current)
}

fn sort_reading_order<T: Mergeable>(items: &mut [T]) {
    items.sort_by(|a, b| {
        let (a, b) = (a.bbox(), b.bbox());
        a.y0.total_cmp(&b.y0).then(a.x0.total_cmp(&b.x0))
    });
}

/// One sweep: every surviving item absorbs all later items it is adjacent to,
/// testing against its grown box as it goes.
fn merge_pass<T: Mergeable>(items: Vec<T>, params: &MergeParams) -> (Vec<T>, usize) {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut merged = Vec::with_capacity(slots.len());
    let mut merges = 0;

    for i in 0..slots.len() {
        let Some(mut current) = slots[i].take() else {
            continue;
        };

        for slot in slots.iter_mut().skip(i + 1) {
            let adjacent = slot
                .as_ref()
                .is_some_and(|candidate| should_merge(current.bbox(), candidate.bbox(), params));
            if adjacent {
                if let Some(candidate) = slot.take() {
                    current = current.absorb(candidate);
                    merges += 1;
                }
            }
        }

        merged.push(current);
    }

    (merged, merges)
}

//! Splitting one polyline into two at a chosen point.

use crate::model::Vertex;
use crate::validate;

/// Partition a vertex sequence at `split_x`, inserting `(split_x, split_y)`
/// as the shared boundary vertex of both halves.
///
/// Vertices on the starting side of the cut (relative to the feature's
/// traversal direction) form the first half, the rest the second. The cut
/// point is appended to the first half and prepended to the second, so the
/// two polylines stay contiguous with the original at the cut. If every
/// vertex lies on one side, the other half degenerates to just the cut
/// point.
pub fn partition_at(vertices: &[Vertex], split_x: f64, split_y: f64) -> (Vec<Vertex>, Vec<Vertex>) {
    // A degenerate (zero) direction is treated as increasing.
    let direction = validate::traversal_direction(vertices);
    let before = |v: &Vertex| {
        if direction >= 0 {
            v.x <= split_x
        } else {
            v.x >= split_x
        }
    };

    let cut = Vertex::new(split_x, split_y);
    let mut first: Vec<Vertex> = vertices.iter().copied().filter(before).collect();
    let mut second: Vec<Vertex> = vertices.iter().copied().filter(|v| !before(v)).collect();

    first.push(cut);
    second.insert(0, cut);
    (first, second)
}

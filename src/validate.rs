//! Monotonic-traversal validation of drawn polylines.
//!
//! A digitized layer should move through the radargram in one horizontal
//! direction. The direction is fixed by the first-to-last displacement, and
//! any vertex stepping back against it is an overhang. Overhangs are
//! detected, never rejected: the annotator keeps drawing, and the submit
//! gate is where they become blocking.

use std::fmt;

use crate::model::Vertex;

/// A violation of the monotonic-traversal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Vertex `vertex` moves against the feature's traversal direction.
    Overhang { vertex: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Overhang { vertex } => write!(f, "overhang at vertex {vertex}"),
        }
    }
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Sign of the first-to-last horizontal displacement: 1, -1 or 0.
pub fn traversal_direction(vertices: &[Vertex]) -> i8 {
    match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) => sign(last.x - first.x),
        _ => 0,
    }
}

/// Check a vertex sequence against the monotonic-traversal rule.
///
/// Pure with respect to the vertices; callers re-invoke it after any
/// vertex-affecting mutation. Sequences with fewer than two vertices are
/// trivially valid. A zero-length horizontal step is not an overhang
/// (stacked vertices at the same x are allowed), only a step whose sign
/// opposes the traversal direction is.
pub fn validate(vertices: &[Vertex]) -> Vec<ValidationIssue> {
    if vertices.len() < 2 {
        return Vec::new();
    }

    let direction = traversal_direction(vertices);
    let mut issues = Vec::new();

    for i in 1..vertices.len() {
        let step = sign(vertices[i].x - vertices[i - 1].x);
        if step != 0 && step != direction {
            issues.push(ValidationIssue::Overhang { vertex: i });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verts(coords: &[(f64, f64)]) -> Vec<Vertex> {
        coords.iter().map(|&(x, y)| Vertex::new(x, y)).collect()
    }

    #[test]
    fn test_increasing_line_is_valid() {
        assert!(validate(&verts(&[(0.0, 0.0), (5.0, 0.0)])).is_empty());
    }

    #[test]
    fn test_backtrack_is_flagged() {
        let issues = validate(&verts(&[(0.0, 0.0), (5.0, 0.0), (3.0, 0.0)]));
        assert_eq!(issues, vec![ValidationIssue::Overhang { vertex: 2 }]);
    }

    #[test]
    fn test_decreasing_line_is_valid() {
        assert!(validate(&verts(&[(9.0, 0.0), (4.0, 1.0), (1.0, 2.0)])).is_empty());
    }

    #[test]
    fn test_decreasing_line_backtrack() {
        let issues = validate(&verts(&[(9.0, 0.0), (4.0, 1.0), (6.0, 2.0), (1.0, 0.0)]));
        assert_eq!(issues, vec![ValidationIssue::Overhang { vertex: 2 }]);
    }

    #[test]
    fn test_vertical_step_is_allowed() {
        // Duplicate x values stack vertically; that is not a backtrack.
        assert!(validate(&verts(&[(0.0, 0.0), (2.0, 5.0), (2.0, 9.0), (4.0, 3.0)])).is_empty());
    }

    #[test]
    fn test_degenerate_direction_flags_any_movement() {
        // First and last vertex share an x, so every horizontal step opposes
        // the (zero) traversal direction.
        let issues = validate(&verts(&[(2.0, 0.0), (5.0, 1.0), (2.0, 2.0)]));
        assert_eq!(
            issues,
            vec![
                ValidationIssue::Overhang { vertex: 1 },
                ValidationIssue::Overhang { vertex: 2 },
            ]
        );
    }

    #[test]
    fn test_short_sequences_are_valid() {
        assert!(validate(&[]).is_empty());
        assert!(validate(&verts(&[(3.0, 3.0)])).is_empty());
    }

    #[test]
    fn test_issue_message() {
        let issue = ValidationIssue::Overhang { vertex: 7 };
        assert_eq!(issue.to_string(), "overhang at vertex 7");
    }
}

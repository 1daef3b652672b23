//! Stateless 2D helpers shared by the integrator and the collision resolver.

/// Euclidean distance between two points.
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

/// True when a circle at (px, py) overlaps another circle, strictly.
pub fn circles_overlap(px: f32, py: f32, pr: f32, qx: f32, qy: f32, qr: f32) -> bool {
    distance(px, py, qx, qy) < pr + qr
}

/// Unit vector for an angle in radians.
pub fn unit(angle: f32) -> (f32, f32) {
    (angle.cos(), angle.sin())
}

/// A point projected onto a finite ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Distance along the ray from its origin.
    pub t: f32,
    pub closest_x: f32,
    pub closest_y: f32,
    /// Perpendicular distance from the point to `closest`.
    pub distance: f32,
}

/// Projects (px, py) onto the segment that starts at (ox, oy) and runs
/// `length` units along `angle`.
///
/// Returns `None` when the projection falls before the origin or past the
/// far end. Points beyond either end are not measured against the end caps.
pub fn project_onto_segment(
    px: f32,
    py: f32,
    ox: f32,
    oy: f32,
    angle: f32,
    length: f32,
) -> Option<Projection> {
    let (dx, dy) = unit(angle);
    let t = (px - ox) * dx + (py - oy) * dy;
    if !(0.0..=length).contains(&t) {
        return None;
    }
    let closest_x = ox + dx * t;
    let closest_y = oy + dy * t;
    Some(Projection {
        t,
        closest_x,
        closest_y,
        distance: distance(px, py, closest_x, closest_y),
    })
}

/// Places a point exactly `radius` away from (cx, cy), along the direction
/// from the centre to (px, py). Returns the new position and the angle used.
pub fn push_out(cx: f32, cy: f32, px: f32, py: f32, radius: f32) -> (f32, f32, f32) {
    let angle = (py - cy).atan2(px - cx);
    let (ux, uy) = unit(angle);
    (cx + ux * radius, cy + uy * radius, angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_distance() {
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < EPS);
        assert_eq!(distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(0.0, 0.0, 5.0, 9.0, 0.0, 5.0));
        assert!(!circles_overlap(0.0, 0.0, 5.0, 10.0, 0.0, 5.0));
    }

    #[test]
    fn test_projection_inside_segment() {
        let p = project_onto_segment(5.0, 3.0, 0.0, 0.0, 0.0, 10.0).unwrap();
        assert!((p.t - 5.0).abs() < EPS);
        assert!((p.closest_x - 5.0).abs() < EPS);
        assert!(p.closest_y.abs() < EPS);
        assert!((p.distance - 3.0).abs() < EPS);
    }

    #[test]
    fn test_projection_outside_segment() {
        assert!(project_onto_segment(-1.0, 0.5, 0.0, 0.0, 0.0, 10.0).is_none());
        assert!(project_onto_segment(10.5, 0.5, 0.0, 0.0, 0.0, 10.0).is_none());
    }

    #[test]
    fn test_push_out_lands_on_radius() {
        let (x, y, angle) = push_out(10.0, 10.0, 12.0, 11.0, 7.0);
        assert!((distance(x, y, 10.0, 10.0) - 7.0).abs() < EPS);
        assert!((angle - (1.0f32).atan2(2.0)).abs() < EPS);
    }
}

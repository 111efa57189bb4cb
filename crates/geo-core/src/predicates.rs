//! Geometric predicates for 2D triangulation: sideness and in-circle tests.

use crate::vec2::Vec2;

/// Result of the [`side`] predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Left,
    Right,
}

/// Result of the [`in_circle`] predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    On,
    Inside,
    Outside,
}

/// Determines which side of the directed line `(a, b)` the point `c` lies
/// on.
pub fn side(a: Vec2, b: Vec2, c: Vec2) -> Orientation {
    let area = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
    if area > 0.0 {
        Orientation::Left
    } else if area < 0.0 {
        Orientation::Right
    } else {
        Orientation::Collinear
    }
}

/// Determines `d`'s position relative to the circle through `a`, `b`, `c`.
///
/// `a`, `b`, `c` must be given in counter-clockwise order, or the opposite
/// result is returned.
pub fn in_circle(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Position {
    let adx = a.x - d.x;
    let ady = a.y - d.y;
    let bdx = b.x - d.x;
    let bdy = b.y - d.y;
    let cdx = c.x - d.x;
    let cdy = c.y - d.y;

    let ab_det = adx * bdy - bdx * ady;
    let bc_det = bdx * cdy - cdx * bdy;
    let ca_det = cdx * ady - adx * cdy;

    let a_lift = adx * adx + ady * ady;
    let b_lift = bdx * bdx + bdy * bdy;
    let c_lift = cdx * cdx + cdy * cdy;

    let retval = a_lift * bc_det + b_lift * ca_det + c_lift * ab_det;
    if retval > 0.0 {
        Position::Inside
    } else if retval == 0.0 {
        Position::On
    } else {
        Position::Outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_left_right_collinear() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        assert_eq!(side(a, b, Vec2::new(0.5, 1.0)), Orientation::Left);
        assert_eq!(side(a, b, Vec2::new(0.5, -1.0)), Orientation::Right);
        assert_eq!(side(a, b, Vec2::new(2.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn in_circle_unit_circle() {
        // CCW triangle inscribed in the unit circle.
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        let c = Vec2::new(-1.0, 0.0);
        assert_eq!(in_circle(a, b, c, Vec2::new(0.0, 0.0)), Position::Inside);
        assert_eq!(in_circle(a, b, c, Vec2::new(0.0, 10.0)), Position::Outside);
        assert_eq!(in_circle(a, b, c, Vec2::new(0.0, -1.0)), Position::On);
    }

    use proptest::prelude::*;

    fn point() -> impl Strategy<Value = Vec2> {
        (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn swapping_the_line_endpoints_flips_side(a in point(), b in point(), c in point()) {
            let forward = side(a, b, c);
            let backward = side(b, a, c);
            match forward {
                Orientation::Left => prop_assert_eq!(backward, Orientation::Right),
                Orientation::Right => prop_assert_eq!(backward, Orientation::Left),
                Orientation::Collinear => prop_assert_eq!(backward, Orientation::Collinear),
            }
        }

        #[test]
        fn in_circle_is_invariant_under_cyclic_permutation(a in point(), b in point(), c in point(), d in point()) {
            prop_assume!(side(a, b, c) != Orientation::Collinear);
            prop_assert_eq!(in_circle(a, b, c, d), in_circle(b, c, a, d));
            prop_assert_eq!(in_circle(a, b, c, d), in_circle(c, a, b, d));
        }
    }
}

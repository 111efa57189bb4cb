//! Index-addressed triangle mesh and the divide-and-conquer Delaunay
//! triangulation algorithm that builds it.
//!
//! Internally every triangle tracks its 3 vertices and 3 neighbors by
//! index, in counter-clockwise order. For an existent (non-ghost)
//! triangle, neighbor `i` is the triangle opposite the edge between
//! vertices `i` and `(i + 1) % 3`. Ghost triangles sit on the hull: vertex
//! 2 is `None`, neighbor 0 is the existent triangle across the hull edge,
//! and neighbors 1/2 are the ghost triangles clockwise/counter-clockwise
//! around the hull.

use std::collections::{HashSet, VecDeque};

use crate::error::GeoError;
use crate::predicates::{self, Orientation, Position};
use crate::vec2::Vec2;

#[derive(Debug, Clone, Copy)]
pub(super) struct RawTriangle {
    pub v: [Option<usize>; 3],
    pub n: [usize; 3],
}

impl RawTriangle {
    fn new(v: [Option<usize>; 3], n: [usize; 3]) -> Self {
        Self { v, n }
    }

    pub fn is_ghost(&self) -> bool {
        self.v[2].is_none()
    }
}

fn side(verts: &[Vec2], a: usize, b: usize, c: usize) -> Orientation {
    predicates::side(verts[a], verts[b], verts[c])
}

fn in_circle(verts: &[Vec2], tris: &[RawTriangle], t: usize, d: Vec2) -> Position {
    let tri = &tris[t];
    let a = verts[tri.v[0].unwrap()];
    let b = verts[tri.v[1].unwrap()];
    let c = verts[tri.v[2].unwrap()];
    predicates::in_circle(a, b, c, d)
}

/// Trivially triangulates 2 or 3 vertices in `[begin, end)`.
///
/// Returns the indices of triangles 2, 3, 6, and 7 as used by
/// [`merge_arbitrary`] and [`find_ghosts`].
pub(super) fn trivial_triangulation(
    tris: &mut Vec<RawTriangle>,
    verts: &[Vec2],
    begin: usize,
    end: usize,
) -> (usize, usize, usize, usize) {
    let num = end - begin;
    let num_t = tris.len();

    if num < 3 {
        // Two vertices: a single edge with a ghost triangle on either side.
        tris.push(RawTriangle::new(
            [Some(begin), Some(begin + 1), None],
            [num_t + 1, num_t + 1, num_t + 1],
        ));
        tris.push(RawTriangle::new(
            [Some(begin + 1), Some(begin), None],
            [num_t, num_t, num_t],
        ));
        return (num_t, num_t + 1, num_t + 1, num_t);
    }

    match side(verts, begin, begin + 1, begin + 2) {
        Orientation::Left => {
            let (end_pt, left_pt) = (begin + 1, begin + 2);
            push_trivial_fan(tris, begin, end_pt, left_pt, num_t);
            (num_t + 3, num_t + 1, num_t + 2, num_t + 3)
        }
        Orientation::Right => {
            let (end_pt, left_pt) = (begin + 2, begin + 1);
            push_trivial_fan(tris, begin, end_pt, left_pt, num_t);
            (num_t + 3, num_t + 1, num_t + 1, num_t + 2)
        }
        Orientation::Collinear => {
            tris.push(RawTriangle::new(
                [Some(begin), Some(begin + 1), None],
                [num_t + 1, num_t + 2, num_t + 1],
            ));
            tris.push(RawTriangle::new(
                [Some(begin + 1), Some(begin), None],
                [num_t, num_t, num_t + 3],
            ));
            tris.push(RawTriangle::new(
                [Some(begin + 1), Some(begin + 2), None],
                [num_t + 3, num_t + 3, num_t],
            ));
            tris.push(RawTriangle::new(
                [Some(begin + 2), Some(begin + 1), None],
                [num_t + 2, num_t + 1, num_t + 2],
            ));
            (num_t, num_t + 1, num_t + 3, num_t + 2)
        }
    }
}

fn push_trivial_fan(tris: &mut Vec<RawTriangle>, begin: usize, end_pt: usize, left_pt: usize, num_t: usize) {
    tris.push(RawTriangle::new(
        [Some(begin), Some(end_pt), Some(left_pt)],
        [num_t + 1, num_t + 2, num_t + 3],
    ));
    tris.push(RawTriangle::new(
        [Some(end_pt), Some(begin), None],
        [num_t, num_t + 3, num_t + 2],
    ));
    tris.push(RawTriangle::new(
        [Some(left_pt), Some(end_pt), None],
        [num_t, num_t + 1, num_t + 3],
    ));
    tris.push(RawTriangle::new(
        [Some(begin), Some(left_pt), None],
        [num_t, num_t + 2, num_t + 1],
    ));
}

/// Stitches the right hull of the left triangulation to the left hull of
/// the right triangulation, producing non-Delaunay (but valid) triangles.
pub(super) fn merge_arbitrary(
    tris: &mut Vec<RawTriangle>,
    verts: &[Vec2],
    tri_l6: usize,
    tri_l7: usize,
    tri_r2: usize,
    tri_r3: usize,
) {
    log::debug!("stitching hulls: {} triangles so far", tris.len());
    let lr_v = tris[tri_l6].v[0].unwrap();
    let lru_v = tris[tri_l7].v[0].unwrap();
    let lrd_v = tris[tri_l6].v[1].unwrap();
    let rl_v = tris[tri_r2].v[0].unwrap();
    let rlu_v = tris[tri_r2].v[1].unwrap();
    let rld_v = tris[tri_r3].v[0].unwrap();

    let (initial_tri, initial_v, initial_based_left, initial_opposite_tri, later_opposite_tri);
    if side(verts, lru_v, lr_v, rl_v) == Orientation::Left {
        initial_tri = tri_l7;
        initial_v = rl_v;
        initial_based_left = true;
        initial_opposite_tri = tri_r2;
        later_opposite_tri = tri_r3;
    } else if side(verts, lrd_v, lr_v, rl_v) == Orientation::Right {
        initial_tri = tri_l6;
        initial_v = rl_v;
        initial_based_left = true;
        initial_opposite_tri = tri_r2;
        later_opposite_tri = tri_r3;
    } else if side(verts, lr_v, rl_v, rlu_v) == Orientation::Left {
        initial_tri = tri_r2;
        initial_v = lr_v;
        initial_based_left = false;
        initial_opposite_tri = tri_l7;
        later_opposite_tri = tri_l6;
    } else if side(verts, lr_v, rl_v, rld_v) == Orientation::Right {
        initial_tri = tri_r3;
        initial_v = lr_v;
        initial_based_left = false;
        initial_opposite_tri = tri_l7;
        later_opposite_tri = tri_l6;
    } else {
        // Both halves are collinear hulls: join them with a single edge.
        let num_t = tris.len();
        tris[tri_l7].n[1] = num_t;
        tris[tri_r2].n[2] = num_t;
        tris[tri_l6].n[2] = num_t + 1;
        tris[tri_r3].n[1] = num_t + 1;
        tris.push(RawTriangle::new([Some(lr_v), Some(rl_v), None], [num_t + 1, tri_r2, tri_l7]));
        tris.push(RawTriangle::new([Some(rl_v), Some(lr_v), None], [num_t, tri_l6, tri_r3]));
        return;
    }

    tris[initial_tri].v[2] = Some(initial_v);

    // Stitch above the initial triangle.
    let mut based_left = initial_based_left;
    let mut current_tri = initial_tri;
    let mut opposite_tri = initial_opposite_tri;
    loop {
        let (l_v, r_v, lg_tri, rg_tri, lu_v, ru_v, c_tri_neighbor);
        if based_left {
            l_v = tris[current_tri].v[0].unwrap();
            r_v = tris[current_tri].v[2].unwrap();
            lg_tri = tris[current_tri].n[2];
            rg_tri = opposite_tri;
            lu_v = tris[lg_tri].v[0].unwrap();
            ru_v = tris[opposite_tri].v[1].unwrap();
            c_tri_neighbor = 2;
        } else {
            l_v = tris[current_tri].v[2].unwrap();
            r_v = tris[current_tri].v[1].unwrap();
            lg_tri = opposite_tri;
            rg_tri = tris[current_tri].n[1];
            lu_v = tris[opposite_tri].v[0].unwrap();
            ru_v = tris[rg_tri].v[1].unwrap();
            c_tri_neighbor = 1;
        }

        if side(verts, lu_v, l_v, r_v) == Orientation::Left {
            tris[lg_tri].v[2] = Some(r_v);
            tris[lg_tri].n[1] = current_tri;
            tris[current_tri].n[c_tri_neighbor] = lg_tri;
            if !based_left {
                opposite_tri = rg_tri;
            }
            based_left = true;
            current_tri = lg_tri;
        } else if side(verts, ru_v, r_v, l_v) == Orientation::Right {
            tris[rg_tri].v[2] = Some(l_v);
            tris[rg_tri].n[2] = current_tri;
            tris[current_tri].n[c_tri_neighbor] = rg_tri;
            if based_left {
                opposite_tri = lg_tri;
            }
            based_left = false;
            current_tri = rg_tri;
        } else {
            let num_tri = tris.len();
            let (rg_tri, lg_tri);
            if based_left {
                rg_tri = opposite_tri;
                lg_tri = tris[current_tri].n[2];
                tris[current_tri].n[2] = num_tri;
            } else {
                rg_tri = tris[current_tri].n[1];
                lg_tri = opposite_tri;
                tris[current_tri].n[1] = num_tri;
            }
            tris[rg_tri].n[2] = num_tri;
            tris[lg_tri].n[1] = num_tri;
            tris.push(RawTriangle::new([Some(l_v), Some(r_v), None], [current_tri, rg_tri, lg_tri]));
            break;
        }
    }

    // Stitch below the initial triangle.
    based_left = initial_based_left;
    current_tri = initial_tri;
    opposite_tri = later_opposite_tri;
    loop {
        let (l_v, r_v, lg_tri, rg_tri, ld_v, rd_v, c_tri_neighbor);
        if based_left {
            l_v = tris[current_tri].v[1].unwrap();
            r_v = tris[current_tri].v[2].unwrap();
            lg_tri = tris[current_tri].n[1];
            rg_tri = opposite_tri;
            ld_v = tris[lg_tri].v[1].unwrap();
            rd_v = tris[opposite_tri].v[0].unwrap();
            c_tri_neighbor = 1;
        } else {
            l_v = tris[current_tri].v[2].unwrap();
            r_v = tris[current_tri].v[0].unwrap();
            lg_tri = opposite_tri;
            rg_tri = tris[current_tri].n[2];
            ld_v = tris[opposite_tri].v[1].unwrap();
            rd_v = tris[rg_tri].v[0].unwrap();
            c_tri_neighbor = 2;
        }

        if side(verts, ld_v, l_v, r_v) == Orientation::Right {
            tris[lg_tri].v[2] = Some(r_v);
            tris[lg_tri].n[2] = current_tri;
            tris[current_tri].n[c_tri_neighbor] = lg_tri;
            if !based_left {
                opposite_tri = rg_tri;
            }
            based_left = true;
            current_tri = lg_tri;
        } else if side(verts, rd_v, r_v, l_v) == Orientation::Left {
            tris[rg_tri].v[2] = Some(l_v);
            tris[rg_tri].n[1] = current_tri;
            tris[current_tri].n[c_tri_neighbor] = rg_tri;
            if based_left {
                opposite_tri = lg_tri;
            }
            based_left = false;
            current_tri = rg_tri;
        } else {
            let num_tri = tris.len();
            let (rg_tri, lg_tri);
            if based_left {
                rg_tri = tris[current_tri].n[1];
                lg_tri = opposite_tri;
                tris[current_tri].n[1] = num_tri;
            } else {
                rg_tri = opposite_tri;
                lg_tri = tris[current_tri].n[2];
                tris[current_tri].n[2] = num_tri;
            }
            tris[rg_tri].n[2] = num_tri;
            tris[lg_tri].n[1] = num_tri;
            tris.push(RawTriangle::new([Some(r_v), Some(l_v), None], [current_tri, rg_tri, lg_tri]));
            break;
        }
    }
}

/// Walks from each of the pre-merge ghost triangles 2, 3, 6, 7 towards the
/// hull until a ghost triangle (one not resurrected by the merge) is found.
pub(super) fn find_ghosts(
    tris: &[RawTriangle],
    mut tri_l2: usize,
    mut tri_l3: usize,
    mut tri_r6: usize,
    mut tri_r7: usize,
) -> (usize, usize, usize, usize) {
    let mut first_done = false;
    while tris[tri_l2].v[2].is_some() {
        tri_l2 = if first_done { tris[tri_l2].n[1] } else { tris[tri_l2].n[2] };
        first_done = true;
    }
    first_done = false;
    while tris[tri_l3].v[2].is_some() {
        tri_l3 = if first_done { tris[tri_l3].n[2] } else { tris[tri_l3].n[1] };
        first_done = true;
    }
    first_done = false;
    while tris[tri_r6].v[2].is_some() {
        tri_r6 = if first_done { tris[tri_r6].n[1] } else { tris[tri_r6].n[2] };
        first_done = true;
    }
    first_done = false;
    while tris[tri_r7].v[2].is_some() {
        tri_r7 = if first_done { tris[tri_r7].n[2] } else { tris[tri_r7].n[1] };
        first_done = true;
    }
    (tri_l2, tri_l3, tri_r6, tri_r7)
}

/// Recursive vertical-cut divide-and-conquer triangulation of vertices
/// `[begin, end)`, assumed sorted x-then-y increasing.
///
/// Returns the post-merge ghost triangles 2, 3, 6, 7 for use by an
/// enclosing call's merge step.
pub(super) fn divide_and_conquer(
    tris: &mut Vec<RawTriangle>,
    verts: &[Vec2],
    begin: usize,
    end: usize,
) -> (usize, usize, usize, usize) {
    if end - begin < 4 {
        return trivial_triangulation(tris, verts, begin, end);
    }
    let divider = ((end - begin) >> 1) + begin;

    let (tri_l2, tri_l3, tri_l6, tri_l7) = divide_and_conquer(tris, verts, begin, divider);
    let (tri_r2, tri_r3, tri_r6, tri_r7) = divide_and_conquer(tris, verts, divider, end);

    merge_arbitrary(tris, verts, tri_l6, tri_l7, tri_r2, tri_r3);

    find_ghosts(tris, tri_l2, tri_l3, tri_r6, tri_r7)
}

/// Repeatedly flips non-locally-Delaunay edges until the triangulation is
/// (fully) Delaunay. A no-op on a triangulation with no existent triangles.
pub(super) fn enforce_delaunay(tris: &mut Vec<RawTriangle>, verts: &[Vec2]) -> Result<(), GeoError> {
    let mut edge_set: HashSet<(usize, usize)> = HashSet::new();
    let mut edge_queue: VecDeque<((usize, usize), usize, usize)> = VecDeque::new();

    for (t_i, t) in tris.iter().enumerate() {
        if t.is_ghost() {
            continue;
        }
        for n_i in 0..3 {
            if tris[t.n[n_i]].is_ghost() {
                continue;
            }
            let edge = ordered(t.v[n_i].unwrap(), t.v[(n_i + 1) % 3].unwrap());
            if edge_set.insert(edge) {
                edge_queue.push_back((edge, t_i, n_i));
            }
        }
    }

    while let Some((edge, t_index_i, t_n_index_i)) = edge_queue.pop_front() {
        if tris[t_index_i].is_ghost() {
            continue;
        }
        let triangle_i = tris[t_index_i];
        let edge_i = ordered(
            triangle_i.v[t_n_index_i].unwrap(),
            triangle_i.v[(t_n_index_i + 1) % 3].unwrap(),
        );
        if edge != edge_i {
            continue;
        }

        let t_index_j = triangle_i.n[t_n_index_i];
        let triangle_j = tris[t_index_j];
        let t_n_index_j = (0..3)
            .find(|&j| {
                ordered(triangle_j.v[j].unwrap(), triangle_j.v[(j + 1) % 3].unwrap()) == edge_i
            })
            .ok_or_else(|| {
                GeoError::InvariantViolation(
                    "source triangle index missing in neighbor triangle".to_string(),
                )
            })?;

        let v_index_i = triangle_i.v[(t_n_index_i + 2) % 3].unwrap();
        let v_index_j = triangle_j.v[(t_n_index_j + 2) % 3].unwrap();
        let vertex_j = verts[v_index_j];

        if in_circle(verts, tris, t_index_i, vertex_j) != Position::Inside {
            continue;
        }
        log::debug!("flipping edge ({}, {})", edge.0, edge.1);

        let t_index_i1 = triangle_i.n[(t_n_index_i + 1) % 3];
        let t_index_i2 = triangle_i.n[(t_n_index_i + 2) % 3];
        let t_index_j1 = triangle_j.n[(t_n_index_j + 1) % 3];
        let t_index_j2 = triangle_j.n[(t_n_index_j + 2) % 3];
        let triangle_i1 = tris[t_index_i1];
        let triangle_j1 = tris[t_index_j1];
        let triangle_i2 = tris[t_index_i2];
        let triangle_j2 = tris[t_index_j2];

        if let Some(i) = (0..3).find(|&i| triangle_i1.n[i] == t_index_i) {
            tris[t_index_i1].n[i] = t_index_j;
        }
        if let Some(i) = (0..3).find(|&i| triangle_j1.n[i] == t_index_j) {
            tris[t_index_j1].n[i] = t_index_i;
        }

        tris[t_index_i].n = [t_index_j, t_index_i2, t_index_j1];
        tris[t_index_j].n = [t_index_i, t_index_j2, t_index_i1];
        if triangle_i.v[t_n_index_i].unwrap() == edge.0 {
            tris[t_index_i].v = [Some(v_index_j), Some(v_index_i), Some(edge.0)];
            tris[t_index_j].v = [Some(v_index_i), Some(v_index_j), Some(edge.1)];
        } else {
            tris[t_index_i].v = [Some(v_index_j), Some(v_index_i), Some(edge.1)];
            tris[t_index_j].v = [Some(v_index_i), Some(v_index_j), Some(edge.0)];
        }

        if !triangle_i2.is_ghost() {
            let e = ordered(tris[t_index_i].v[1].unwrap(), tris[t_index_i].v[2].unwrap());
            edge_queue.push_back((e, t_index_i, 1));
        }
        if !triangle_j1.is_ghost() {
            let e = ordered(tris[t_index_i].v[0].unwrap(), tris[t_index_i].v[2].unwrap());
            edge_queue.push_back((e, t_index_i, 2));
        }
        if !triangle_j2.is_ghost() {
            let e = ordered(tris[t_index_j].v[1].unwrap(), tris[t_index_j].v[2].unwrap());
            edge_queue.push_back((e, t_index_j, 1));
        }
        if !triangle_i1.is_ghost() {
            let e = ordered(tris[t_index_j].v[0].unwrap(), tris[t_index_j].v[2].unwrap());
            edge_queue.push_back((e, t_index_j, 2));
        }
    }

    Ok(())
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

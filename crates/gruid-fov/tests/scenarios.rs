//! End-to-end scenarios and cross-algorithm invariants.

use gruid_core::Point;
use gruid_fov::{compute_fov, walk, Algorithm, Map};

fn open_map(w: i32, h: i32) -> Map {
    let mut map = Map::new(w, h).unwrap();
    map.clear(true, true);
    map
}

#[test]
fn scenario_a_empty_map_shadow() {
    let mut map = open_map(5, 5);
    compute_fov(&mut map, Point::new(2, 2), 0, true, Algorithm::Shadow).unwrap();
    for y in 0..5 {
        for x in 0..5 {
            assert!(map.is_in_fov(Point::new(x, y)), "({x},{y})");
        }
    }
}

#[test]
fn scenario_b_single_wall_shadow() {
    let mut map = open_map(5, 5);
    map.set_properties(Point::new(3, 2), false, true);
    compute_fov(&mut map, Point::new(2, 2), 0, true, Algorithm::Shadow).unwrap();
    assert!(map.is_in_fov(Point::new(3, 2)));
    assert!(!map.is_in_fov(Point::new(4, 2)));
    for y in 0..5 {
        for x in 0..5 {
            if (x, y) == (4, 2) {
                continue;
            }
            assert!(map.is_in_fov(Point::new(x, y)), "({x},{y})");
        }
    }
}

#[test]
fn scenario_c_diagonal_corner_restrictive_light_walls_true() {
    let mut map = open_map(5, 5);
    map.set_properties(Point::new(3, 1), false, true);
    map.set_properties(Point::new(3, 2), false, true);
    compute_fov(&mut map, Point::new(2, 2), 0, true, Algorithm::Restrictive).unwrap();
    assert!(!map.is_in_fov(Point::new(4, 1)));
    assert!(map.is_in_fov(Point::new(3, 2)));
}

#[test]
fn scenario_c_diagonal_corner_restrictive_light_walls_false() {
    let mut map = open_map(5, 5);
    map.set_properties(Point::new(3, 1), false, true);
    map.set_properties(Point::new(3, 2), false, true);
    compute_fov(&mut map, Point::new(2, 2), 0, false, Algorithm::Restrictive).unwrap();
    assert!(!map.is_in_fov(Point::new(4, 1)));
    assert!(!map.is_in_fov(Point::new(3, 2)));
}

#[test]
fn scenario_d_radius_bound_basic() {
    let mut map = open_map(5, 5);
    compute_fov(&mut map, Point::new(2, 2), 1, true, Algorithm::Basic).unwrap();
    for y in 0..5 {
        for x in 0..5 {
            let expected = (1..=3).contains(&x) && (1..=3).contains(&y);
            assert_eq!(map.is_in_fov(Point::new(x, y)), expected, "({x},{y})");
        }
    }
}

#[test]
fn scenario_e_corridor_symmetric_shadowcast() {
    let mut map = open_map(7, 1);
    compute_fov(&mut map, Point::new(0, 0), 3, false, Algorithm::SymmetricShadowcast).unwrap();
    for x in 0..=3 {
        assert!(map.is_in_fov(Point::new(x, 0)), "({x},0) should be lit");
    }
    for x in 4..=6 {
        assert!(!map.is_in_fov(Point::new(x, 0)), "({x},0) should be unlit");
    }
}

#[test]
fn scenario_f_bresenham_line() {
    let mut pts = Vec::new();
    let completed = walk(0, 0, 3, 1, |p| {
        pts.push(p);
        true
    });
    assert!(completed);
    assert_eq!(pts, vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 1), Point::new(3, 1)]);
}

const ALL_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::Basic,
    Algorithm::Diamond,
    Algorithm::Shadow,
    Algorithm::Permissive(4),
    Algorithm::Restrictive,
    Algorithm::SymmetricShadowcast,
];

#[test]
fn invariant_new_is_all_false() {
    let map = Map::new(6, 4).unwrap();
    for y in 0..4 {
        for x in 0..6 {
            let p = Point::new(x, y);
            assert!(!map.is_transparent(p));
            assert!(!map.is_walkable(p));
            assert!(!map.is_in_fov(p));
        }
    }
}

#[test]
fn invariant_compute_fov_never_touches_transparency_or_walkability() {
    for algorithm in ALL_ALGORITHMS {
        let mut map = open_map(7, 7);
        map.set_properties(Point::new(4, 4), false, true);
        map.set_properties(Point::new(1, 1), true, false);
        compute_fov(&mut map, Point::new(3, 3), 0, true, algorithm).unwrap();
        assert!(!map.is_transparent(Point::new(4, 4)), "{algorithm:?}");
        assert!(map.is_transparent(Point::new(1, 1)), "{algorithm:?}");
        assert!(!map.is_walkable(Point::new(1, 1)), "{algorithm:?}");
    }
}

#[test]
fn invariant_pov_always_lit() {
    for algorithm in ALL_ALGORITHMS {
        let mut map = open_map(9, 9);
        compute_fov(&mut map, Point::new(4, 4), 0, true, algorithm).unwrap();
        assert!(map.is_in_fov(Point::new(4, 4)), "{algorithm:?}");
    }
}

#[test]
fn invariant_radius_bound_excludes_far_transparent_cells() {
    for algorithm in ALL_ALGORITHMS {
        let mut map = open_map(15, 15);
        compute_fov(&mut map, Point::new(7, 7), 3, true, algorithm).unwrap();
        assert!(!map.is_in_fov(Point::new(0, 0)), "{algorithm:?}");
        assert!(!map.is_in_fov(Point::new(14, 14)), "{algorithm:?}");
    }
}

#[test]
fn invariant_light_walls_false_hides_opaque_on_algorithms_that_honor_it_natively() {
    for algorithm in [Algorithm::Shadow, Algorithm::Restrictive, Algorithm::Permissive(4), Algorithm::SymmetricShadowcast] {
        let mut map = open_map(7, 7);
        map.set_properties(Point::new(5, 3), false, true);
        compute_fov(&mut map, Point::new(3, 3), 0, false, algorithm).unwrap();
        assert!(!map.is_in_fov(Point::new(5, 3)), "{algorithm:?}");
    }
}

#[test]
fn invariant_determinism() {
    for algorithm in ALL_ALGORITHMS {
        let mut map_a = open_map(9, 9);
        map_a.set_properties(Point::new(6, 4), false, true);
        compute_fov(&mut map_a, Point::new(4, 4), 5, true, algorithm).unwrap();

        let mut map_b = open_map(9, 9);
        map_b.set_properties(Point::new(6, 4), false, true);
        compute_fov(&mut map_b, Point::new(4, 4), 5, true, algorithm).unwrap();

        assert_eq!(map_a, map_b, "{algorithm:?}");
    }
}

#[test]
fn invariant_copy_matches_source() {
    let mut src = Map::new(6, 5).unwrap();
    src.clear(true, true);
    src.set_properties(Point::new(2, 2), false, true);
    compute_fov(&mut src, Point::new(0, 0), 0, true, Algorithm::Shadow).unwrap();

    let mut dest = Map::new(1, 1).unwrap();
    Map::copy(&src, &mut dest).unwrap();

    assert_eq!(dest.width(), src.width());
    assert_eq!(dest.height(), src.height());
    for y in 0..src.height() {
        for x in 0..src.width() {
            let p = Point::new(x, y);
            assert_eq!(dest.is_transparent(p), src.is_transparent(p));
            assert_eq!(dest.is_walkable(p), src.is_walkable(p));
            assert_eq!(dest.is_in_fov(p), src.is_in_fov(p));
        }
    }
}

#[test]
fn property_symmetry_on_open_maps() {
    for algorithm in [Algorithm::Basic, Algorithm::Shadow, Algorithm::Diamond, Algorithm::SymmetricShadowcast] {
        let p = Point::new(2, 3);
        let q = Point::new(8, 6);

        let mut map_p = open_map(11, 11);
        compute_fov(&mut map_p, p, 0, true, algorithm).unwrap();
        let q_from_p = map_p.is_in_fov(q);

        let mut map_q = open_map(11, 11);
        compute_fov(&mut map_q, q, 0, true, algorithm).unwrap();
        let p_from_q = map_q.is_in_fov(p);

        assert_eq!(q_from_p, p_from_q, "{algorithm:?}");
    }
}

#[test]
fn property_line_walker_visit_count_and_ordering() {
    let x0 = -3;
    let y0 = 4;
    let x1 = 6;
    let y1 = -1;
    let mut pts = Vec::new();
    walk(x0, y0, x1, y1, |p| {
        pts.push(p);
        true
    });
    assert_eq!(pts.first(), Some(&Point::new(x0, y0)));
    assert_eq!(pts.last(), Some(&Point::new(x1, y1)));
    let expected_len = (x1 - x0).abs().max((y1 - y0).abs()) + 1;
    assert_eq!(pts.len() as i32, expected_len);
}

#[test]
fn property_line_walker_reentrancy() {
    use gruid_fov::Bresenham;

    let mut a = Bresenham::new(0, 0, 5, 2);
    let mut b = Bresenham::new(10, 10, 4, 13);
    let mut interleaved_a = vec![Point::new(0, 0)];
    let mut interleaved_b = vec![Point::new(10, 10)];
    loop {
        let sa = a.step();
        let sb = b.step();
        if let Some(p) = sa {
            interleaved_a.push(p);
        }
        if let Some(p) = sb {
            interleaved_b.push(p);
        }
        if sa.is_none() && sb.is_none() {
            break;
        }
    }

    let mut sequential_a = vec![Point::new(0, 0)];
    let mut seq_a = Bresenham::new(0, 0, 5, 2);
    while let Some(p) = seq_a.step() {
        sequential_a.push(p);
    }
    let mut sequential_b = vec![Point::new(10, 10)];
    let mut seq_b = Bresenham::new(10, 10, 4, 13);
    while let Some(p) = seq_b.step() {
        sequential_b.push(p);
    }

    assert_eq!(interleaved_a, sequential_a);
    assert_eq!(interleaved_b, sequential_b);
}

#[test]
fn large_map_smoke_test_shadow_and_symmetric() {
    for algorithm in [Algorithm::Shadow, Algorithm::SymmetricShadowcast] {
        let mut map = open_map(301, 301);
        let pov = Point::new(150, 150);
        compute_fov(&mut map, pov, 150, true, algorithm).unwrap();
        assert!(map.is_in_fov(pov), "{algorithm:?}");
        assert!(!map.is_in_fov(Point::new(0, 0)), "{algorithm:?}");
        assert!(map.is_in_fov(Point::new(150, 0)), "{algorithm:?} radius-edge cell should be lit");
    }
}

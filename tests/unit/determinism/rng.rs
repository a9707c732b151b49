use super::*;

#[test]
fn same_seed_same_sequence() {
    let mut a = SeededRng::new(42);
    let mut b = SeededRng::new(42);
    for _ in 0..64 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
    assert_eq!(a.next_f32(), b.next_f32());
    assert_eq!(a.range_i32(-5, 5), b.range_i32(-5, 5));
}

#[test]
fn set_seed_restarts_sequence() {
    let mut rng = SeededRng::new(7);
    let first: Vec<u64> = (0..4).map(|_| rng.next_u64()).collect();
    rng.set_seed(7);
    let again: Vec<u64> = (0..4).map(|_| rng.next_u64()).collect();
    assert_eq!(first, again);
}

#[test]
fn unit_floats_stay_in_half_open_range() {
    let mut rng = SeededRng::new(1);
    for _ in 0..10_000 {
        let f = rng.next_f32();
        assert!((0.0..1.0).contains(&f));
        let d = rng.next_f64();
        assert!((0.0..1.0).contains(&d));
    }
}

#[test]
fn ranges_respect_bounds_and_degenerate_inputs() {
    let mut rng = SeededRng::new(99);
    for _ in 0..1_000 {
        let i = rng.range_i32(-3, 3);
        assert!((-3..=3).contains(&i));
        let u = rng.range_usize(2, 5);
        assert!((2..5).contains(&u));
        let f = rng.range_f32(10.0, 20.0);
        assert!((10.0..20.0).contains(&f));
    }
    assert_eq!(rng.range_i32(4, 4), 4);
    assert_eq!(rng.range_usize(3, 1), 3);
    assert_eq!(rng.range_f32(2.0, 1.0), 2.0);
}

#[test]
fn chance_extremes() {
    let mut rng = SeededRng::new(5);
    for _ in 0..256 {
        assert!(rng.chance(1.0));
        assert!(!rng.chance(0.0));
    }
}

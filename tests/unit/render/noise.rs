use super::*;

#[test]
fn permutation_is_a_shuffle_of_all_bytes() {
    let p = Perlin::new(42);
    let mut seen = [false; 256];
    for &v in &p.perm[..256] {
        seen[v as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
    assert_eq!(&p.perm[..256], &p.perm[256..]);
}

#[test]
fn lattice_points_are_zero() {
    let p = Perlin::new(1);
    for (x, y, z) in [(0.0, 0.0, 0.0), (3.0, 7.0, 0.0), (12.0, 1.0, 5.0)] {
        assert_eq!(p.sample(x, y, z, 1), 0.0);
    }
}

#[test]
fn samples_are_bounded_and_deterministic() {
    let a = Perlin::new(9);
    let b = Perlin::new(9);
    let mut nonzero = 0;
    for i in 0..200 {
        let x = i as f64 * 0.137;
        let y = i as f64 * 0.071;
        let z = 0.5 + i as f64 * 0.013;
        let v = a.sample(x, y, z, 4);
        assert!(v.abs() <= 1.1, "sample {v} out of range");
        assert_eq!(v.to_bits(), b.sample(x, y, z, 4).to_bits());
        if v != 0.0 {
            nonzero += 1;
        }
    }
    assert!(nonzero > 100);
}

#[test]
fn seeds_change_the_field() {
    let a = Perlin::new(1);
    let b = Perlin::new(2);
    let differs = (0..50).any(|i| {
        let x = 0.3 + i as f64 * 0.21;
        a.sample(x, 0.4, 0.7, 1) != b.sample(x, 0.4, 0.7, 1)
    });
    assert!(differs);
}

#[test]
fn field_is_continuous_in_time() {
    let p = Perlin::default();
    let v0 = p.sample(1.3, 2.7, 0.50, 3);
    let v1 = p.sample(1.3, 2.7, 0.51, 3);
    assert!((v0 - v1).abs() < 0.1);
}

#[test]
fn sample_row_matches_pointwise_sampling() {
    let p = Perlin::new(5);
    let xs = [0.1, 0.6, 1.9, 4.25];
    let mut out = [0.0; 4];
    p.sample_row(&xs, 0.8, 0.2, 2, &mut out);
    for (x, v) in xs.iter().zip(out) {
        assert_eq!(v, p.sample(*x, 0.8, 0.2, 2));
    }
}

#![allow(dead_code)]

use crate::placement::Vector;
use crate::rotation::Rotation;

pub fn assert_approx_eq_float(a: f64, b: f64, tol: f64) {
    assert!(
        (a - b).abs() < tol,
        "Floats {a} and {b} are not approximately equal within tolerance {tol}"
    );
}

pub fn assert_approx_eq_vec(a: Vector, b: Vector, tol: f64) {
    assert!(
        (a - b).norm() < tol,
        "Vectors {a:?} and {b:?} are not approximately equal within tolerance {tol}"
    );
}

/// Two rotations are close when they move every basis vector to nearly the same place.
pub fn assert_approx_eq_rotation(a: Rotation, b: Rotation, tol: f64) {
    for unit in [Vector::new(1.0, 0.0, 0.0), Vector::new(0.0, 1.0, 0.0), Vector::new(0.0, 0.0, 1.0)] {
        assert!(
            (a.apply(unit) - b.apply(unit)).norm() < tol,
            "Rotations {a:?} and {b:?} disagree on {unit:?} beyond tolerance {tol}"
        );
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Calculate the normal of a triangle given three vertices.
/// Counter-clockwise vertices give the normal facing the viewer.
pub fn calculate_triangle_normal(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
) -> Vector3<f64> {
    let v1 = p1 - p0;
    let v2 = p2 - p0;
    v1.cross(&v2).normalize()
}

/// Format a real number exactly, with the shortest round-trip digits.
/// Negative zero prints as `0`.
pub fn format_real(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Space-separated coordinates of a point
pub fn format_point(point: &Point3<f64>) -> String {
    format!(
        "{} {} {}",
        format_real(point.x),
        format_real(point.y),
        format_real(point.z)
    )
}

/// Space-separated components of a vector
pub fn format_vector(vector: &Vector3<f64>) -> String {
    format!(
        "{} {} {}",
        format_real(vector.x),
        format_real(vector.y),
        format_real(vector.z)
    )
}

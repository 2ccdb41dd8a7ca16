// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linear hexahedron (C3D8) helpers
//!
//! Node order follows the C3D8 convention: nodes 0-3 form the bottom face
//! (ζ = -1) counter-clockwise, nodes 4-7 the top face (ζ = +1) in the same
//! order. Face S4 is the face through nodes 1, 5, 6, 2 (ξ = +1).

use nalgebra::{Matrix3, Point3, Vector3};

/// Natural coordinates (ξ, η, ζ) of the eight corner nodes
pub const NODE_NATURAL_COORDS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const MAX_NEWTON_ITERATIONS: usize = 25;
const NEWTON_TOLERANCE: f64 = 1e-10;

/// Trilinear shape functions evaluated at natural coordinates
pub fn shape_functions(natural: &Vector3<f64>) -> [f64; 8] {
    let mut n = [0.0; 8];
    for (i, c) in NODE_NATURAL_COORDS.iter().enumerate() {
        n[i] = 0.125
            * (1.0 + c[0] * natural.x)
            * (1.0 + c[1] * natural.y)
            * (1.0 + c[2] * natural.z);
    }
    n
}

/// Shape function derivatives, one row (dN/dξ, dN/dη, dN/dζ) per node
pub fn shape_function_derivatives(natural: &Vector3<f64>) -> [[f64; 3]; 8] {
    let mut d = [[0.0; 3]; 8];
    for (i, c) in NODE_NATURAL_COORDS.iter().enumerate() {
        let a = 1.0 + c[0] * natural.x;
        let b = 1.0 + c[1] * natural.y;
        let g = 1.0 + c[2] * natural.z;
        d[i] = [
            0.125 * c[0] * b * g,
            0.125 * c[1] * a * g,
            0.125 * c[2] * a * b,
        ];
    }
    d
}

/// Jacobian dx/dξ of the isoparametric mapping
pub fn jacobian(nodes: &[Point3<f64>; 8], natural: &Vector3<f64>) -> Matrix3<f64> {
    let derivatives = shape_function_derivatives(natural);
    let mut j = Matrix3::zeros();
    for (node, d) in nodes.iter().zip(derivatives.iter()) {
        for row in 0..3 {
            for col in 0..3 {
                j[(row, col)] += node[row] * d[col];
            }
        }
    }
    j
}

/// Map natural coordinates to a global position
pub fn global_position(nodes: &[Point3<f64>; 8], natural: &Vector3<f64>) -> Point3<f64> {
    let n = shape_functions(natural);
    let mut p = Vector3::zeros();
    for (node, weight) in nodes.iter().zip(n.iter()) {
        p += node.coords * *weight;
    }
    Point3::from(p)
}

/// Invert the isoparametric mapping with Newton iterations
///
/// # Returns
/// The natural coordinates of `point`, or `None` if the Jacobian becomes
/// singular or the iteration does not converge
pub fn natural_coordinates(nodes: &[Point3<f64>; 8], point: &Point3<f64>) -> Option<Vector3<f64>> {
    let mut natural = Vector3::zeros();
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let residual = global_position(nodes, &natural) - point;
        let inverse = jacobian(nodes, &natural).try_inverse()?;
        let step = inverse * residual;
        natural -= step;
        if step.norm() < NEWTON_TOLERANCE {
            return Some(natural);
        }
    }
    None
}

/// Check whether a point lies inside the element
pub fn contains(nodes: &[Point3<f64>; 8], point: &Point3<f64>, tolerance: f64) -> bool {
    let limit = 1.0 + tolerance;
    natural_coordinates(nodes, point)
        .map(|n| n.x.abs() <= limit && n.y.abs() <= limit && n.z.abs() <= limit)
        .unwrap_or(false)
}

/// Interpolate nodal values at natural coordinates
pub fn interpolate(natural: &Vector3<f64>, values: &[f64; 8]) -> f64 {
    shape_functions(natural)
        .iter()
        .zip(values.iter())
        .map(|(n, v)| n * v)
        .sum()
}

/// Element volume from a 2x2x2 Gauss rule
pub fn volume(nodes: &[Point3<f64>; 8]) -> f64 {
    let g = 1.0 / 3.0_f64.sqrt();
    let mut volume = 0.0;
    for xi in [-g, g] {
        for eta in [-g, g] {
            for zeta in [-g, g] {
                volume += jacobian(nodes, &Vector3::new(xi, eta, zeta)).determinant();
            }
        }
    }
    volume
}

fn average(points: &[Point3<f64>]) -> Point3<f64> {
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

pub fn centroid(nodes: &[Point3<f64>; 8]) -> Point3<f64> {
    average(nodes)
}

/// Center of the bottom face (nodes 0-3)
pub fn bottom_face_center(nodes: &[Point3<f64>; 8]) -> Point3<f64> {
    average(&nodes[0..4])
}

/// Center of the top face (nodes 4-7)
pub fn top_face_center(nodes: &[Point3<f64>; 8]) -> Point3<f64> {
    average(&nodes[4..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cube() -> [Point3<f64>; 8] {
        NODE_NATURAL_COORDS.map(|c| Point3::new((c[0] + 1.0) / 2.0, (c[1] + 1.0) / 2.0, (c[2] + 1.0) / 2.0))
    }

    fn skewed_hex() -> [Point3<f64>; 8] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.1, 0.0),
            Point3::new(2.2, 1.5, 0.1),
            Point3::new(0.1, 1.2, 0.0),
            Point3::new(0.0, 0.2, 1.0),
            Point3::new(2.1, 0.0, 1.3),
            Point3::new(2.0, 1.4, 1.2),
            Point3::new(0.0, 1.3, 1.1),
        ]
    }

    #[test]
    fn test_shape_functions_partition_of_unity() {
        let n = shape_functions(&Vector3::new(0.3, -0.7, 0.1));
        assert_relative_eq!(n.iter().sum::<f64>(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_shape_functions_at_nodes() {
        for (i, c) in NODE_NATURAL_COORDS.iter().enumerate() {
            let n = shape_functions(&Vector3::new(c[0], c[1], c[2]));
            for (j, value) in n.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(*value, expected, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_unit_cube_volume() {
        assert_relative_eq!(volume(&unit_cube()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_natural_coordinates_roundtrip_skewed() {
        let nodes = skewed_hex();
        let natural = Vector3::new(0.25, -0.4, 0.6);
        let point = global_position(&nodes, &natural);

        let found = natural_coordinates(&nodes, &point).unwrap();
        assert_relative_eq!(found, natural, epsilon = 1e-8);
    }

    #[test]
    fn test_contains() {
        let nodes = unit_cube();
        assert!(contains(&nodes, &Point3::new(0.5, 0.5, 0.5), 1e-6));
        assert!(contains(&nodes, &Point3::new(1.0, 0.0, 1.0), 1e-6));
        assert!(!contains(&nodes, &Point3::new(1.5, 0.5, 0.5), 1e-6));
    }

    #[test]
    fn test_interpolate_linear_field() {
        let nodes = skewed_hex();
        let values = nodes.map(|p| 2.0 * p.x - p.y + 3.0 * p.z);
        let natural = Vector3::new(-0.2, 0.5, 0.1);
        let point = global_position(&nodes, &natural);

        // Trilinear elements reproduce linear fields exactly
        let expected = 2.0 * point.x - point.y + 3.0 * point.z;
        assert_relative_eq!(interpolate(&natural, &values), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_face_centers() {
        let nodes = unit_cube();
        assert_relative_eq!(bottom_face_center(&nodes), Point3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(top_face_center(&nodes), Point3::new(0.5, 0.5, 1.0));
        assert_relative_eq!(centroid(&nodes), Point3::new(0.5, 0.5, 0.5));
    }
}

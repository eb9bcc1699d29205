use nalgebra::{Point3, Vector3};

/// Angle between two vectors in radians, in `[0, π]`. Zero-length input yields
/// `π / 2` so degenerate geometry never passes a tight angular gate by accident.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return std::f64::consts::FRAC_PI_2;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Component of `v` lying in the plane with the given normal.
pub fn project_onto_plane(v: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    let norm_sq = normal.norm_squared();
    if norm_sq == 0.0 {
        return *v;
    }
    v - normal * (v.dot(normal) / norm_sq)
}

/// Plane normal through the first three points, `(p1 - p2) × (p1 - p3)`.
pub fn plane_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    match points {
        [p1, p2, p3, ..] => Some((p1 - p2).cross(&(p1 - p3))),
        _ => None,
    }
}

pub fn midpoint(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::from((a.coords + b.coords) * 0.5)
}

/// Arithmetic mean of the points, `None` for an empty slice.
pub fn centroid<'a, I>(points: I) -> Option<Point3<f64>>
where
    I: IntoIterator<Item = &'a Point3<f64>>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    (count > 0).then(|| Point3::from(sum / count as f64))
}

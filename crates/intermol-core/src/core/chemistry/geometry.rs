use crate::core::models::ids::AtomIndex;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::angle_between;
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;

/// Ideal coordination geometry of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Geometry {
    Spherical,
    Terminal,
    Linear,
    Trigonal,
    Tetrahedral,
    Octahedral,
    #[default]
    Unknown,
}

impl Geometry {
    /// Ideal bond angle in radians. Geometries without a defined angle use the
    /// trigonal value.
    pub fn ideal_angle(&self) -> f64 {
        match self {
            Geometry::Linear => 180.0f64.to_radians(),
            Geometry::Trigonal => 120.0f64.to_radians(),
            Geometry::Tetrahedral => 109.4721f64.to_radians(),
            Geometry::Octahedral => 90.0f64.to_radians(),
            _ => 120.0f64.to_radians(),
        }
    }

    /// Number of electron domains of a fully coordinated centre, if defined.
    pub fn coordination(&self) -> Option<usize> {
        match self {
            Geometry::Linear => Some(2),
            Geometry::Trigonal => Some(3),
            Geometry::Tetrahedral => Some(4),
            Geometry::Octahedral => Some(6),
            _ => None,
        }
    }
}

/// Maps a total coordination count (bonds + lone pairs + implicit H) to a geometry.
pub fn assign_geometry(total_coordination: i32) -> Geometry {
    match total_coordination {
        0 => Geometry::Spherical,
        1 => Geometry::Terminal,
        2 => Geometry::Linear,
        3 => Geometry::Trigonal,
        4 => Geometry::Tetrahedral,
        _ => Geometry::Unknown,
    }
}

/// Angles x-`center`-`other` in radians for every heavy atom x bonded to `center`.
pub fn calc_angles(system: &MolecularSystem, center: AtomIndex, other: AtomIndex) -> Vec<f64> {
    let origin = system.position(center);
    let d1 = system.position(other) - origin;
    system
        .heavy_neighbors(center)
        .map(|x| angle_between(&d1, &(system.position(x) - origin)))
        .collect()
}

/// Angle in radians between the plane spanned by two heavy neighbours of
/// `center` and the direction to `other`.
///
/// When `center` has a single heavy neighbour, the plane is completed with a
/// heavy neighbour of that neighbour. Returns `None` if no plane can be found.
pub fn calc_plane_angle(system: &MolecularSystem, center: AtomIndex, other: AtomIndex) -> Option<f64> {
    let origin = system.position(center);
    let v12 = system.position(other) - origin;

    let mut vectors: Vec<Vector3<f64>> = Vec::with_capacity(2);
    let mut last = None;
    for x in system.heavy_neighbors(center).take(2) {
        vectors.push(system.position(x) - origin);
        last = Some(x);
    }
    if let (1, Some(first)) = (vectors.len(), last) {
        if let Some(x) = system.heavy_neighbors(first).find(|&x| x != center) {
            vectors.push(system.position(x) - origin);
        }
    }
    if vectors.len() != 2 {
        return None;
    }

    let cp = vectors[0].cross(&vectors[1]);
    Some((FRAC_PI_2 - angle_between(&cp, &v12)).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::elements::Element;
    use crate::core::models::atom::Atom;
    use crate::core::models::chain::ChainType;
    use crate::core::models::topology::BondOrder;
    use nalgebra::Point3;

    const EPS: f64 = 1e-6;

    fn add(system: &mut MolecularSystem, res: usize, name: &str, el: Element, p: [f64; 3]) -> usize {
        let atom = Atom::new(name, el, Point3::new(p[0], p[1], p[2]));
        system.add_atom_to_residue(res, atom).unwrap()
    }

    #[test]
    fn assign_geometry_maps_small_counts() {
        assert_eq!(assign_geometry(0), Geometry::Spherical);
        assert_eq!(assign_geometry(1), Geometry::Terminal);
        assert_eq!(assign_geometry(2), Geometry::Linear);
        assert_eq!(assign_geometry(3), Geometry::Trigonal);
        assert_eq!(assign_geometry(4), Geometry::Tetrahedral);
        assert_eq!(assign_geometry(5), Geometry::Unknown);
        assert_eq!(assign_geometry(-1), Geometry::Unknown);
    }

    #[test]
    fn ideal_angles_default_to_trigonal() {
        assert!((Geometry::Linear.ideal_angle().to_degrees() - 180.0).abs() < EPS);
        assert!((Geometry::Tetrahedral.ideal_angle().to_degrees() - 109.4721).abs() < EPS);
        assert!((Geometry::Unknown.ideal_angle().to_degrees() - 120.0).abs() < EPS);
        assert_eq!(Geometry::Trigonal.coordination(), Some(3));
        assert_eq!(Geometry::Terminal.coordination(), None);
    }

    #[test]
    fn calc_angles_skips_hydrogen_neighbours() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain(0, 'A', ChainType::Ligand);
        let res = system.add_residue(chain, 1, "LIG").unwrap();
        let o = add(&mut system, res, "O", Element::O, [0.0, 0.0, 0.0]);
        let c = add(&mut system, res, "C", Element::C, [1.0, 0.0, 0.0]);
        let h = add(&mut system, res, "H", Element::H, [0.0, 1.0, 0.0]);
        let target = add(&mut system, res, "N", Element::N, [0.0, 3.0, 0.0]);
        system.add_bond(o, c, BondOrder::Single).unwrap();
        system.add_bond(o, h, BondOrder::Single).unwrap();

        let angles = calc_angles(&system, o, target);
        assert_eq!(angles.len(), 1);
        assert!((angles[0].to_degrees() - 90.0).abs() < EPS);
    }

    #[test]
    fn calc_plane_angle_uses_second_shell_when_needed() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain(0, 'A', ChainType::Ligand);
        let res = system.add_residue(chain, 1, "LIG").unwrap();
        let o = add(&mut system, res, "O", Element::O, [0.0, 0.0, 0.0]);
        let c = add(&mut system, res, "C", Element::C, [1.2, 0.0, 0.0]);
        let c2 = add(&mut system, res, "C2", Element::C, [2.0, 1.0, 0.0]);
        system.add_bond(o, c, BondOrder::Double).unwrap();
        system.add_bond(c, c2, BondOrder::Single).unwrap();

        let in_plane = add(&mut system, res, "N1", Element::N, [-2.0, 1.0, 0.0]);
        let above = add(&mut system, res, "N2", Element::N, [0.0, 0.0, 3.0]);

        let a = calc_plane_angle(&system, o, in_plane).unwrap();
        assert!(a.abs() < EPS);
        let b = calc_plane_angle(&system, o, above).unwrap();
        assert!((b.to_degrees() - 90.0).abs() < EPS);
    }

    #[test]
    fn calc_plane_angle_is_none_without_plane() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain(0, 'A', ChainType::Ligand);
        let res = system.add_residue(chain, 1, "LIG").unwrap();
        let o = add(&mut system, res, "O", Element::O, [0.0, 0.0, 0.0]);
        let c = add(&mut system, res, "C", Element::C, [1.4, 0.0, 0.0]);
        let n = add(&mut system, res, "N", Element::N, [0.0, 3.0, 0.0]);
        system.add_bond(o, c, BondOrder::Single).unwrap();

        assert!(calc_plane_angle(&system, o, n).is_none());
        assert!(calc_plane_angle(&system, n, o).is_none());
    }
}

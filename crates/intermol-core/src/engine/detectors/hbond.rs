use super::{ContactDetector, DetectionContext};
use crate::core::chemistry::elements::Element;
use crate::core::chemistry::geometry::{Geometry, calc_angles, calc_plane_angle};
use crate::core::models::ids::{AtomIndex, FeatureIndex};
use crate::core::models::system::MolecularSystem;
use crate::engine::config::ContactParams;
use crate::engine::contacts::{Contact, ContactType};
use crate::engine::features::FeatureType;

/// Strong and weak hydrogen bonds between donor and acceptor atoms.
///
/// Hydrogen positions are never used. The donor and acceptor angles are
/// measured against the heavy atoms bonded to each partner and compared with
/// the ideal angle of the partner's perceived geometry.
#[derive(Debug, Clone)]
pub struct HydrogenBondDetector {
    max_dist_sq: f64,
    max_acc_angle: f64,
    max_don_angle: f64,
    max_acc_plane_angle: f64,
    max_don_plane_angle: f64,
    radius: f64,
}

impl HydrogenBondDetector {
    pub fn new(params: &ContactParams) -> Self {
        Self {
            max_dist_sq: params.max_hbond_dist.powi(2),
            max_acc_angle: params.max_hbond_acc_angle.to_radians(),
            max_don_angle: params.max_hbond_don_angle.to_radians(),
            max_acc_plane_angle: params.max_hbond_acc_plane_angle.to_radians(),
            max_don_plane_angle: params.max_hbond_don_plane_angle.to_radians(),
            radius: params.max_hbond_dist.max(params.max_hbond_sulfur_dist),
        }
    }

    fn geometry_allows(&self, ctx: &DetectionContext<'_>, donor: AtomIndex, acceptor: AtomIndex) -> bool {
        let system = ctx.system;
        let donor_geometry = ctx.valence.ideal_geometry[donor];
        let ideal = donor_geometry.ideal_angle();
        if calc_angles(system, donor, acceptor)
            .iter()
            .any(|a| (ideal - a).abs() > self.max_don_angle)
        {
            return false;
        }
        if donor_geometry == Geometry::Trigonal
            && calc_plane_angle(system, donor, acceptor).is_some_and(|a| a > self.max_don_plane_angle)
        {
            return false;
        }

        let acceptor_geometry = ctx.valence.ideal_geometry[acceptor];
        let ideal = acceptor_geometry.ideal_angle();
        // large acceptor angles are not limited
        if calc_angles(system, acceptor, donor)
            .iter()
            .any(|a| ideal - a > self.max_acc_angle)
        {
            return false;
        }
        !(acceptor_geometry == Geometry::Trigonal
            && calc_plane_angle(system, acceptor, donor).is_some_and(|a| a > self.max_acc_plane_angle))
    }
}

fn strong_bond_type(system: &MolecularSystem, donor: AtomIndex, acceptor: AtomIndex) -> ContactType {
    if system.is_water(donor) && system.is_water(acceptor) {
        ContactType::WaterHydrogenBond
    } else if system.is_backbone(donor) && system.is_backbone(acceptor) {
        ContactType::BackboneHydrogenBond
    } else {
        ContactType::HydrogenBond
    }
}

impl ContactDetector for HydrogenBondDetector {
    fn name(&self) -> &'static str {
        "hydrogen_bond"
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>, i: FeatureIndex, j: FeatureIndex, dist_sq: f64) -> Option<Contact> {
        use FeatureType::{HydrogenAcceptor, HydrogenDonor, WeakHydrogenDonor};

        let features = ctx.features;
        let (ti, tj) = (features.feature_type(i), features.feature_type(j));
        let weak = matches!(
            (ti, tj),
            (WeakHydrogenDonor, HydrogenAcceptor) | (HydrogenAcceptor, WeakHydrogenDonor)
        );
        let strong = matches!(
            (ti, tj),
            (HydrogenDonor, HydrogenAcceptor) | (HydrogenAcceptor, HydrogenDonor)
        );
        if !weak && !strong {
            return None;
        }

        let (l, k) = if tj == HydrogenAcceptor { (i, j) } else { (j, i) };
        let donor = features.representative(l);
        let acceptor = features.representative(k);
        if donor == acceptor {
            return None;
        }
        let system = ctx.system;
        let sulfur = system.element(donor) == Element::S || system.element(acceptor) == Element::S;
        if !sulfur && dist_sq > self.max_dist_sq {
            return None;
        }
        if system.connected(donor, acceptor) || !self.geometry_allows(ctx, donor, acceptor) {
            return None;
        }

        let contact_type = if weak {
            ContactType::WeakHydrogenBond
        } else {
            strong_bond_type(system, donor, acceptor)
        };
        Some(Contact::new(l, k, contact_type))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::detect;
    use super::*;
    use crate::engine::features::test_support::Mol;

    fn detector() -> HydrogenBondDetector {
        HydrogenBondDetector::new(&ContactParams::default())
    }

    /// Methanol oxygen at the origin with its carbon placed so that the
    /// C-O...acceptor angle is `angle` degrees for an acceptor on +x.
    fn methanol(mol: &mut Mol, angle: f64) -> AtomIndex {
        let res = mol.residue("MOH");
        let rad = angle.to_radians();
        let c = mol.atom(res, "C1", Element::C, [1.43 * rad.cos(), 1.43 * rad.sin(), 0.0]);
        let o = mol.atom(res, "O1", Element::O, [0.0, 0.0, 0.0]);
        mol.bond(c, o);
        o
    }

    /// Acetone carbonyl oxygen at `(x, 0, 0)` pointing away from the origin.
    fn acetone(mol: &mut Mol, x: f64) -> AtomIndex {
        let res = mol.residue("ACN");
        let o = mol.atom(res, "O", Element::O, [x, 0.0, 0.0]);
        let c1 = mol.atom(res, "C1", Element::C, [x + 1.23, 0.0, 0.0]);
        let c2 = mol.atom(res, "C2", Element::C, [x + 1.9, 1.1, 0.0]);
        let c3 = mol.atom(res, "C3", Element::C, [x + 1.9, -1.1, 0.0]);
        mol.double(o, c1);
        mol.bond(c1, c2);
        mol.bond(c1, c3);
        o
    }

    fn hydrogen_bonds(mol: &Mol) -> Vec<(AtomIndex, AtomIndex, ContactType)> {
        let detected = detect(mol, &detector());
        detected
            .contacts
            .iter()
            .filter(|c| c.contact_type != ContactType::WeakHydrogenBond)
            .map(|c| {
                (
                    detected.features.representative(c.index1),
                    detected.features.representative(c.index2),
                    c.contact_type,
                )
            })
            .collect()
    }

    #[test]
    fn hydroxyl_to_carbonyl_within_tolerances() {
        let mut mol = Mol::new();
        let donor = methanol(&mut mol, 110.0);
        let acceptor = acetone(&mut mol, 2.8);
        let bonds = hydrogen_bonds(&mol);
        assert_eq!(bonds.len(), 1);
        let (a, b, t) = bonds[0];
        assert_eq!(t, ContactType::HydrogenBond);
        assert_eq!([a.min(b), a.max(b)], [donor, acceptor]);
    }

    #[test]
    fn donor_angle_far_from_ideal_is_rejected() {
        let mut mol = Mol::new();
        methanol(&mut mol, 180.0);
        acetone(&mut mol, 2.8);
        assert!(hydrogen_bonds(&mol).is_empty());
    }

    #[test]
    fn distance_gate_without_sulfur() {
        let mut mol = Mol::new();
        methanol(&mut mol, 110.0);
        acetone(&mut mol, 3.6);
        assert!(hydrogen_bonds(&mol).is_empty());
    }

    #[test]
    fn sulfur_uses_the_longer_distance() {
        let mut mol = Mol::new();
        let cys = mol.residue("CYS");
        mol.atom(cys, "SG", Element::S, [0.0, 0.0, 0.0]);
        let hoh = mol.residue("HOH");
        mol.atom(hoh, "O", Element::O, [3.8, 0.0, 0.0]);
        let bonds = hydrogen_bonds(&mol);
        assert!(!bonds.is_empty());
        assert!(bonds.iter().all(|&(_, _, t)| t == ContactType::HydrogenBond));
    }

    #[test]
    fn waters_form_water_hydrogen_bonds_both_ways() {
        let mut mol = Mol::new();
        let w1 = mol.residue("HOH");
        mol.atom(w1, "O", Element::O, [0.0, 0.0, 0.0]);
        let w2 = mol.residue("HOH");
        mol.atom(w2, "O", Element::O, [2.8, 0.0, 0.0]);
        let bonds = hydrogen_bonds(&mol);
        assert_eq!(bonds.len(), 2);
        assert!(bonds.iter().all(|&(_, _, t)| t == ContactType::WaterHydrogenBond));
    }

    #[test]
    fn backbone_pairs_are_classified() {
        let mut mol = Mol::new();
        let gly = mol.residue("GLY");
        let ca = mol.atom(gly, "CA", Element::C, [-0.5, 1.4, 0.0]);
        let n = mol.atom(gly, "N", Element::N, [0.0, 0.0, 0.0]);
        let c0 = mol.atom(gly, "CD", Element::C, [-0.5, -1.4, 0.0]);
        mol.bond(ca, n);
        mol.bond(c0, n);
        let ala = mol.residue("ALA");
        let o = mol.atom(ala, "O", Element::O, [2.9, 0.0, 0.0]);
        let c = mol.atom(ala, "C", Element::C, [4.13, 0.0, 0.0]);
        let ca2 = mol.atom(ala, "CA", Element::C, [4.8, 1.1, 0.0]);
        mol.double(o, c);
        mol.bond(c, ca2);

        let bonds = hydrogen_bonds(&mol);
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].2, ContactType::BackboneHydrogenBond);
    }

    #[test]
    fn weak_donor_pairs_become_weak_hydrogen_bonds() {
        let mut mol = Mol::new();
        let res = mol.residue("MOH");
        let c = mol.atom(res, "C1", Element::C, [0.0, 0.0, 0.0]);
        let o = mol.atom(res, "O1", Element::O, [-0.489, 1.344, 0.0]);
        mol.bond(c, o);
        acetone(&mut mol, 3.3);

        let detected = detect(&mol, &detector());
        let weak = detected.of_type(ContactType::WeakHydrogenBond);
        assert_eq!(weak.len(), 1);
        let donor_feature = if detected.features.feature_type(weak[0].index1) == FeatureType::WeakHydrogenDonor {
            weak[0].index1
        } else {
            weak[0].index2
        };
        assert_eq!(detected.features.representative(donor_feature), c);
    }
}

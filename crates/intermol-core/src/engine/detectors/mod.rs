//! Pairwise contact detectors.
//!
//! Every interaction family is a [`ContactDetector`]: a search radius plus a
//! predicate over one candidate feature pair. [`scan`] drives all of them the
//! same way, querying the feature spatial hash around each feature center and
//! offering every valid pair `i < j` to the detector.

mod charged;
mod halogen;
mod hbond;
mod hydrophobic;
mod metal;

pub use charged::ChargedDetector;
pub use halogen::HalogenBondDetector;
pub use hbond::HydrogenBondDetector;
pub use hydrophobic::HydrophobicDetector;
pub use metal::MetalCoordinationDetector;

use super::contacts::{Contact, invalid_atom_contact};
use super::features::Features;
use crate::core::chemistry::valence::ValenceModel;
use crate::core::models::ids::FeatureIndex;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::spatial_hash::SpatialHash;
use std::ops::ControlFlow;
use tracing::trace;

/// Read-only inputs shared by all detectors of one run.
#[derive(Clone, Copy)]
pub struct DetectionContext<'a> {
    pub system: &'a MolecularSystem,
    pub valence: &'a ValenceModel,
    pub features: &'a Features,
    pub feature_hash: &'a SpatialHash,
    pub master_model_index: Option<usize>,
}

pub trait ContactDetector: Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Search radius around each feature center.
    fn radius(&self) -> f64;

    /// Judges one candidate pair. `i < j`, the pair is model-valid and
    /// `dist_sq` is the squared distance between the feature centers.
    fn evaluate(&self, ctx: &DetectionContext<'_>, i: FeatureIndex, j: FeatureIndex, dist_sq: f64) -> Option<Contact>;
}

/// Runs one detector over all feature pairs and returns its contacts in
/// discovery order.
pub fn scan(ctx: &DetectionContext<'_>, detector: &dyn ContactDetector) -> Vec<Contact> {
    let features = ctx.features;
    let radius = detector.radius();
    let mut found = Vec::new();
    for i in 0..features.len() {
        let a = features.representative(i);
        ctx.feature_hash.each_within(features.center(i), radius, |j, dist_sq| {
            if j <= i {
                return ControlFlow::Continue(());
            }
            let b = features.representative(j);
            if invalid_atom_contact(ctx.system, a, b, ctx.master_model_index) {
                return ControlFlow::Continue(());
            }
            if let Some(contact) = detector.evaluate(ctx, i, j, dist_sq) {
                trace!(
                    detector = detector.name(),
                    feature1 = contact.index1,
                    feature2 = contact.index2,
                    "Contact detected."
                );
                found.push(contact);
            }
            ControlFlow::Continue(())
        });
    }
    found
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::elements::Element;
    use crate::core::chemistry::valence::ValenceParams;
    use crate::engine::config::ContactParams;
    use crate::engine::contacts::ContactType;
    use crate::core::models::atom::Atom;
    use crate::engine::features::test_support::{Mol, hexagon};
    use nalgebra::Point3;

    /// Methanol, acetone, two stacked benzenes, bromomethane, ammonium,
    /// chloride and a zinc ion packed within a few ångströms.
    fn mixed() -> Mol {
        let mut mol = Mol::new();
        let moh = mol.residue("MOH");
        let c = mol.atom(moh, "C1", Element::C, [0.0, 0.0, 0.0]);
        let o = mol.atom(moh, "O1", Element::O, [1.43, 0.0, 0.0]);
        let h = mol.atom(moh, "HO", Element::H, [1.75, 0.9, 0.0]);
        mol.bond(c, o);
        mol.bond(o, h);

        let acn = mol.residue("ACN");
        let c1 = mol.atom(acn, "C1", Element::C, [3.2, 2.4, 0.0]);
        let o1 = mol.atom(acn, "O1", Element::O, [2.6, 1.4, 0.0]);
        let c2 = mol.atom(acn, "C2", Element::C, [4.7, 2.4, 0.0]);
        let c3 = mol.atom(acn, "C3", Element::C, [2.5, 3.7, 0.0]);
        mol.double(c1, o1);
        mol.bond(c1, c2);
        mol.bond(c1, c3);

        for z in [3.5, 7.3] {
            let res = mol.residue("BNZ");
            let atoms: Vec<_> = hexagon([2.0, 1.0, z], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])
                .into_iter()
                .enumerate()
                .map(|(k, p)| mol.atom(res, &format!("C{k}"), Element::C, p))
                .collect();
            mol.ring(res, &atoms, true);
        }

        let mbr = mol.residue("MBR");
        let cb = mol.atom(mbr, "C1", Element::C, [0.0, -3.5, 0.0]);
        let br = mol.atom(mbr, "BR", Element::BR, [1.2, -2.3, 0.0]);
        mol.bond(cb, br);

        let nh4 = mol.residue("NH4");
        mol.atom_with(
            nh4,
            Atom::new("N", Element::N, Point3::new(2.0, 1.0, -3.5)).with_formal_charge(1),
        );
        let cl = mol.residue("CL");
        mol.atom(cl, "CL", Element::CL, [5.0, 1.0, -3.5]);
        let zn = mol.residue("ZN");
        mol.atom(zn, "ZN", Element::ZN, [3.6, -0.6, 0.0]);
        mol
    }

    #[test]
    fn every_detector_is_symmetric_in_its_pair() {
        let mol = mixed();
        let params = ContactParams::default();
        let valence = ValenceModel::compute(&mol.system, &ValenceParams::default());
        let features = Features::extract(&mol.system, &valence);
        let hash = SpatialHash::new(features.centers()).unwrap();
        let ctx = DetectionContext {
            system: &mol.system,
            valence: &valence,
            features: &features,
            feature_hash: &hash,
            master_model_index: None,
        };
        let charged = ChargedDetector::new(&params);
        let hbond = HydrogenBondDetector::new(&params);
        let metal = MetalCoordinationDetector::new(&params);
        let hydrophobic = HydrophobicDetector::new(&params);
        let halogen = HalogenBondDetector::new(&params);
        let detectors: [&dyn ContactDetector; 5] = [&charged, &hbond, &metal, &hydrophobic, &halogen];

        let mut found = 0;
        for detector in detectors {
            for i in 0..features.len() {
                for j in 0..features.len() {
                    if i == j
                        || invalid_atom_contact(&mol.system, features.representative(i), features.representative(j), None)
                    {
                        continue;
                    }
                    let dist_sq = (features.center(i) - features.center(j)).norm_squared();
                    let forward = detector.evaluate(&ctx, i, j, dist_sq);
                    let backward = detector.evaluate(&ctx, j, i, dist_sq);
                    assert_eq!(forward, backward, "{} differs for ({i}, {j})", detector.name());
                    found += usize::from(forward.is_some());
                }
            }
        }
        assert!(found > 0);
    }

    #[test]
    fn scan_skips_same_residue_pairs_and_emits_each_pair_once() {
        let mut mol = Mol::new();
        let r1 = mol.residue("LIG");
        mol.atom(r1, "C1", Element::C, [0.0, 0.0, 0.0]);
        mol.atom(r1, "C2", Element::C, [1.0, 0.0, 0.0]);
        let r2 = mol.residue("LIG");
        mol.atom(r2, "C1", Element::C, [0.0, 3.0, 0.0]);

        let detector = HydrophobicDetector::new(&ContactParams::default());
        let detected = test_support::detect(&mol, &detector);
        // C1-C2 share a residue; both reach the third carbon
        assert_eq!(detected.contacts.len(), 2);
        for c in &detected.contacts {
            assert!(c.index1 < c.index2);
            assert_eq!(c.contact_type, ContactType::Hydrophobic);
        }
    }

    #[test]
    fn master_model_enables_cross_model_pairs() {
        let mut mol = Mol::new();
        let r1 = mol.residue("LIG");
        mol.atom(r1, "C1", Element::C, [0.0, 0.0, 0.0]);
        let r2 = mol.residue_in_model(1, 'B', "LIG");
        mol.atom(r2, "C1", Element::C, [3.5, 0.0, 0.0]);

        let valence = ValenceModel::compute(&mol.system, &ValenceParams::default());
        let features = Features::extract(&mol.system, &valence);
        let hash = SpatialHash::new(features.centers()).unwrap();
        let detector = HydrophobicDetector::new(&ContactParams::default());
        let mut ctx = DetectionContext {
            system: &mol.system,
            valence: &valence,
            features: &features,
            feature_hash: &hash,
            master_model_index: None,
        };
        assert!(scan(&ctx, &detector).is_empty());
        ctx.master_model_index = Some(0);
        assert_eq!(scan(&ctx, &detector).len(), 1);
    }
}

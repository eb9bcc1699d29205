use super::{ContactDetector, DetectionContext};
use crate::core::chemistry::geometry::calc_angles;
use crate::core::models::ids::FeatureIndex;
use crate::engine::config::ContactParams;
use crate::engine::contacts::{Contact, ContactType};
use crate::engine::features::FeatureType;
use std::f64::consts::PI;

/// Optimal C-X...A angle. Set to 180 degrees rather than the observed ~165
/// because the angular distribution is spherical.
const OPTIMAL_HALOGEN_ANGLE: f64 = PI;
const OPTIMAL_ACCEPTOR_ANGLE: f64 = 2.0 * PI / 3.0;

#[derive(Debug, Clone)]
pub struct HalogenBondDetector {
    max_halogen_bond_dist: f64,
    max_halogen_bond_angle: f64,
}

impl HalogenBondDetector {
    pub fn new(params: &ContactParams) -> Self {
        Self {
            max_halogen_bond_dist: params.max_halogen_bond_dist,
            max_halogen_bond_angle: params.max_halogen_bond_angle.to_radians(),
        }
    }
}

impl ContactDetector for HalogenBondDetector {
    fn name(&self) -> &'static str {
        "halogen_bond"
    }

    fn radius(&self) -> f64 {
        self.max_halogen_bond_dist
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>, i: FeatureIndex, j: FeatureIndex, _dist_sq: f64) -> Option<Contact> {
        use FeatureType::{HalogenAcceptor, HalogenDonor};

        let features = ctx.features;
        let (halogen, acceptor) = match (features.feature_type(i), features.feature_type(j)) {
            (HalogenDonor, HalogenAcceptor) => (features.representative(i), features.representative(j)),
            (HalogenAcceptor, HalogenDonor) => (features.representative(j), features.representative(i)),
            _ => return None,
        };

        // a singly bonded halogen, never a free halide
        let halogen_angles = calc_angles(ctx.system, halogen, acceptor);
        match halogen_angles.as_slice() {
            [angle] if OPTIMAL_HALOGEN_ANGLE - angle <= self.max_halogen_bond_angle => {}
            _ => return None,
        }

        // acceptor needs a defined angle, which rules out water
        let acceptor_angles = calc_angles(ctx.system, acceptor, halogen);
        if acceptor_angles.is_empty()
            || acceptor_angles
                .iter()
                .any(|a| OPTIMAL_ACCEPTOR_ANGLE - a > self.max_halogen_bond_angle)
        {
            return None;
        }
        Some(Contact::new(i, j, ContactType::HalogenBond))
    }
}

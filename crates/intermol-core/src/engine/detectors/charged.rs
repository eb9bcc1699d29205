use super::{ContactDetector, DetectionContext};
use crate::core::models::ids::{AtomIndex, FeatureIndex};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::{angle_between, plane_normal, project_onto_plane};
use crate::engine::config::ContactParams;
use crate::engine::contacts::{Contact, ContactType};
use crate::engine::features::{FeatureType, Features};
use itertools::Itertools;
use nalgebra::Vector3;

/// Ionic interactions, pi-stacking and cation-pi, all between charged or
/// aromatic features.
#[derive(Debug, Clone)]
pub struct ChargedDetector {
    max_ionic_dist: f64,
    max_pi_stacking_dist_sq: f64,
    max_pi_stacking_offset: f64,
    max_pi_stacking_angle: f64,
    max_cation_pi_dist_sq: f64,
    max_cation_pi_offset: f64,
    radius: f64,
}

impl ChargedDetector {
    pub fn new(params: &ContactParams) -> Self {
        Self {
            max_ionic_dist: params.max_ionic_dist,
            max_pi_stacking_dist_sq: params.max_pi_stacking_dist.powi(2),
            max_pi_stacking_offset: params.max_pi_stacking_offset,
            max_pi_stacking_angle: params.max_pi_stacking_angle,
            max_cation_pi_dist_sq: params.max_cation_pi_dist.powi(2),
            max_cation_pi_offset: params.max_cation_pi_offset,
            // ionic gating is on atoms, so centers may lie further apart
            radius: (params.max_ionic_dist + 2.0)
                .max(params.max_pi_stacking_dist)
                .max(params.max_cation_pi_dist),
        }
    }

    fn is_stacked(&self, ctx: &DetectionContext<'_>, i: FeatureIndex, j: FeatureIndex) -> bool {
        let features = ctx.features;
        let (Some(n1), Some(n2)) = (
            ring_normal(ctx.system, features.atoms(i)),
            ring_normal(ctx.system, features.atoms(j)),
        ) else {
            return false;
        };
        let offset = in_plane_offset(features, i, j, &n2).min(in_plane_offset(features, j, i, &n1));
        if offset > self.max_pi_stacking_offset {
            return false;
        }
        let angle = angle_between(&n1, &n2).to_degrees();
        let a = self.max_pi_stacking_angle;
        let parallel = angle <= a || angle >= 180.0 - a;
        let t_shaped = angle <= 90.0 + a && angle >= 90.0 - a;
        parallel || t_shaped
    }
}

/// Normal of the plane through the first three ring atoms.
fn ring_normal(system: &MolecularSystem, atoms: &[AtomIndex]) -> Option<Vector3<f64>> {
    let points: Vec<_> = atoms.iter().take(3).map(|&a| system.position(a)).collect();
    plane_normal(&points)
}

/// Length of the in-plane component of the vector from center `j` to center `i`.
fn in_plane_offset(features: &Features, i: FeatureIndex, j: FeatureIndex, normal: &Vector3<f64>) -> f64 {
    let d = features.center(i) - features.center(j);
    project_onto_plane(&d, normal).norm()
}

fn atom_sets_within(system: &MolecularSystem, s1: &[AtomIndex], s2: &[AtomIndex], max_dist: f64) -> bool {
    s1.iter()
        .cartesian_product(s2)
        .any(|(&a, &b)| (system.position(a) - system.position(b)).norm() <= max_dist)
}

impl ContactDetector for ChargedDetector {
    fn name(&self) -> &'static str {
        "charged"
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>, i: FeatureIndex, j: FeatureIndex, dist_sq: f64) -> Option<Contact> {
        use FeatureType::{AromaticRing, NegativeCharge, PositiveCharge};

        let features = ctx.features;
        match (features.feature_type(i), features.feature_type(j)) {
            (NegativeCharge, PositiveCharge) | (PositiveCharge, NegativeCharge) => {
                atom_sets_within(ctx.system, features.atoms(i), features.atoms(j), self.max_ionic_dist)
                    .then(|| Contact::new(i, j, ContactType::IonicInteraction))
            }
            (AromaticRing, AromaticRing) => (dist_sq <= self.max_pi_stacking_dist_sq
                && self.is_stacked(ctx, i, j))
            .then(|| Contact::new(i, j, ContactType::PiStacking)),
            (AromaticRing, PositiveCharge) | (PositiveCharge, AromaticRing) => {
                if dist_sq > self.max_cation_pi_dist_sq {
                    return None;
                }
                let (ring, cation) = if features.feature_type(i) == AromaticRing {
                    (i, j)
                } else {
                    (j, i)
                };
                let normal = ring_normal(ctx.system, features.atoms(ring))?;
                (in_plane_offset(features, cation, ring, &normal) <= self.max_cation_pi_offset)
                    .then(|| Contact::new(ring, cation, ContactType::CationPi))
            }
            _ => None,
        }
    }
}

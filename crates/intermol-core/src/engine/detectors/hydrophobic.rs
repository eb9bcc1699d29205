use super::{ContactDetector, DetectionContext};
use crate::core::chemistry::elements::Element;
use crate::core::models::ids::FeatureIndex;
use crate::engine::config::ContactParams;
use crate::engine::contacts::{Contact, ContactType};
use crate::engine::features::FeatureType;

#[derive(Debug, Clone)]
pub struct HydrophobicDetector {
    max_hydrophobic_dist: f64,
}

impl HydrophobicDetector {
    pub fn new(params: &ContactParams) -> Self {
        Self {
            max_hydrophobic_dist: params.max_hydrophobic_dist,
        }
    }
}

impl ContactDetector for HydrophobicDetector {
    fn name(&self) -> &'static str {
        "hydrophobic"
    }

    fn radius(&self) -> f64 {
        self.max_hydrophobic_dist
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>, i: FeatureIndex, j: FeatureIndex, _dist_sq: f64) -> Option<Contact> {
        let features = ctx.features;
        if features.feature_type(i) != FeatureType::Hydrophobic || features.feature_type(j) != FeatureType::Hydrophobic {
            return None;
        }
        let a = features.representative(i);
        let b = features.representative(j);
        let system = ctx.system;
        if system.element(a) == Element::F && system.element(b) == Element::F {
            return None;
        }
        if system.connected(a, b) {
            return None;
        }
        Some(Contact::new(i, j, ContactType::Hydrophobic))
    }
}

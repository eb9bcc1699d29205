use crate::engine::config::ContactParams;
use crate::engine::contacts::Contact;
use crate::engine::detectors::{
    ChargedDetector, ContactDetector, DetectionContext, HalogenBondDetector, HydrogenBondDetector,
    HydrophobicDetector, MetalCoordinationDetector, scan,
};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs every detector family and concatenates their contacts in the fixed
/// family order: charged, hydrogen bonds, metal, hydrophobic, halogen.
///
/// With the `parallel` feature the families run concurrently; the output is
/// identical to the sequential run.
#[instrument(skip_all, name = "contact_detection_task")]
pub fn run(ctx: &DetectionContext<'_>, params: &ContactParams, reporter: &ProgressReporter) -> Vec<Contact> {
    let charged = ChargedDetector::new(params);
    let hbond = HydrogenBondDetector::new(params);
    let metal = MetalCoordinationDetector::new(params);
    let hydrophobic = HydrophobicDetector::new(params);
    let halogen = HalogenBondDetector::new(params);
    let detectors: [&dyn ContactDetector; 5] = [&charged, &hbond, &metal, &hydrophobic, &halogen];

    reporter.report(Progress::TaskStart {
        total_steps: detectors.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = detectors.iter();

    #[cfg(feature = "parallel")]
    let iterator = detectors.par_iter();

    let per_family: Vec<Vec<Contact>> = iterator
        .map(|detector| {
            let found = scan(ctx, *detector);
            debug!(detector = detector.name(), contacts = found.len(), "Detector finished.");
            reporter.report(Progress::TaskIncrement);
            found
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let contacts: Vec<Contact> = per_family.into_iter().flatten().collect();
    info!(
        features = ctx.features.len(),
        contacts = contacts.len(),
        "Contact detection complete."
    );
    contacts
}

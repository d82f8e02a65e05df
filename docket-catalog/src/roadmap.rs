//! The default litigation roadmap shipped with the product.

use crate::{Catalog, CatalogBuilder};
use docket_core::{Phase, Stage, StageId, Substage, SubstageId, SubstageKind};
use once_cell::sync::Lazy;

static DEFAULT: Lazy<Catalog> = Lazy::new(build_default);

/// The default roadmap: six stages across the three phases. Filing the
/// complaint moves the case into Litigation; the final pretrial conference
/// moves it into Trial.
pub fn default_roadmap() -> &'static Catalog {
    &DEFAULT
}

fn substage(
    id: &str,
    name: &str,
    description: &str,
    coins: u32,
    kind: SubstageKind,
) -> Substage {
    Substage {
        id: SubstageId::from(id),
        name: name.to_string(),
        description: Some(description.to_string()),
        coins,
        kind,
    }
}

fn stage(
    id: &str,
    name: &str,
    description: &str,
    bonus_coins: u32,
    phase: Phase,
    substages: Vec<Substage>,
) -> Stage {
    Stage {
        id: StageId::from(id),
        name: name.to_string(),
        description: Some(description.to_string()),
        bonus_coins,
        substages,
        phase,
    }
}

fn build_default() -> Catalog {
    CatalogBuilder::new()
        .stage(stage(
            "intake",
            "Intake & Retainer",
            "Gather the facts of the case and sign the retainer agreement.",
            15,
            Phase::PreLitigation,
            vec![
                substage(
                    "in-1",
                    "Describe your case",
                    "Tell us what happened, in your own words.",
                    25,
                    SubstageKind::DataEntryRequired,
                ),
                substage(
                    "in-2",
                    "Upload signed retainer",
                    "Upload the signed retainer agreement.",
                    40,
                    SubstageKind::UploadRequired,
                ),
            ],
        ))
        .stage(stage(
            "demand",
            "Demand Letter",
            "Send the demand letter to the opposing party.",
            20,
            Phase::PreLitigation,
            vec![
                substage(
                    "dm-1",
                    "Upload supporting documents",
                    "Bills, photos, correspondence - anything that supports the demand.",
                    30,
                    SubstageKind::UploadRequired,
                ),
                substage(
                    "dm-2",
                    "Demand letter sent",
                    "Confirm the demand letter went out.",
                    35,
                    SubstageKind::Simple,
                ),
            ],
        ))
        .stage(stage(
            "complaint-filed",
            "Complaint Filed",
            "File the complaint with the court.",
            25,
            Phase::Litigation,
            vec![
                substage(
                    "cf-1",
                    "Complaint drafted",
                    "Review and approve the draft complaint.",
                    50,
                    SubstageKind::Simple,
                ),
                substage(
                    "cf-2",
                    "Complaint filed with court",
                    "Confirm the complaint was filed and record the case number.",
                    50,
                    SubstageKind::DataEntryRequired,
                ),
            ],
        ))
        .stage(stage(
            "discovery",
            "Discovery",
            "Exchange evidence and testimony with the opposing party.",
            30,
            Phase::Litigation,
            vec![
                substage(
                    "ds-1",
                    "Answer interrogatories",
                    "Provide written answers to the opposing party's questions.",
                    40,
                    SubstageKind::DataEntryRequired,
                ),
                substage(
                    "ds-2",
                    "Produce documents",
                    "Upload the documents requested in discovery.",
                    40,
                    SubstageKind::UploadRequired,
                ),
                substage(
                    "ds-3",
                    "Deposition completed",
                    "Confirm your deposition took place.",
                    45,
                    SubstageKind::Simple,
                ),
            ],
        ))
        .stage(stage(
            "pretrial",
            "Pretrial Preparation",
            "Motions, conferences, and trial readiness.",
            35,
            Phase::Litigation,
            vec![
                substage(
                    "pt-1",
                    "Pretrial motions resolved",
                    "Confirm all pretrial motions have been heard.",
                    45,
                    SubstageKind::Simple,
                ),
                substage(
                    "pt-2",
                    "Final pretrial conference",
                    "Record the trial date set at the final conference.",
                    55,
                    SubstageKind::DataEntryRequired,
                ),
            ],
        ))
        .stage(stage(
            "trial",
            "Trial",
            "Present the case in court.",
            50,
            Phase::Trial,
            vec![
                substage(
                    "tr-1",
                    "Trial started",
                    "Confirm the trial has begun.",
                    60,
                    SubstageKind::Simple,
                ),
                substage(
                    "tr-2",
                    "Verdict recorded",
                    "Record the verdict or settlement outcome.",
                    75,
                    SubstageKind::DataEntryRequired,
                ),
            ],
        ))
        // Filing the complaint promotes to Litigation; the final pretrial
        // conference promotes to Trial.
        .litigation_transition("cf-2")
        .trial_transition("pt-2")
        .build()
}

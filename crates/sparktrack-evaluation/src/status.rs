use std::fmt;

use sparktrack_core::models::evaluation::GroupStatuses;
use sparktrack_core::models::group::YearPrefix;
use sparktrack_core::models::review::ReviewType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    Copyright,
    Patent,
    ResearchPaper,
}

impl StatusField {
    pub fn label(&self) -> &'static str {
        match self {
            StatusField::Copyright => "copyright",
            StatusField::Patent => "patent",
            StatusField::ResearchPaper => "research paper",
        }
    }
}

/// Status fields still at `"NA"` that keep a group's marks closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReason {
    pub missing: Vec<StatusField>,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.missing.iter().map(StatusField::label).collect();
        write!(f, "set {} status before entering marks", names.join(" and "))
    }
}

/// Second-year groups need a copyright status; third- and final-year groups
/// need both patent and research paper statuses. Review 1 never blocks.
pub fn block_reason(
    review: ReviewType,
    year: YearPrefix,
    statuses: &GroupStatuses,
) -> Option<BlockReason> {
    if !review.has_status_fields() {
        return None;
    }

    let mut missing = Vec::new();
    match year {
        YearPrefix::SY => {
            if !statuses.copyright.is_set() {
                missing.push(StatusField::Copyright);
            }
        }
        YearPrefix::TY | YearPrefix::LY => {
            if !statuses.patent.is_set() {
                missing.push(StatusField::Patent);
            }
            if !statuses.research_paper.is_set() {
                missing.push(StatusField::ResearchPaper);
            }
        }
    }

    if missing.is_empty() {
        None
    } else {
        Some(BlockReason { missing })
    }
}

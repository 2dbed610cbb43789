use std::sync::LazyLock;

use sparktrack_core::models::group::YearPrefix;
use sparktrack_core::models::review::ReviewType;

use crate::Rubric;
use crate::scoring::{Criterion, criterion};

/// PBL Review 1: problem identification. Five lettered criteria, 10 marks each.
pub struct PblReview1 {
    pub year: YearPrefix,
}

static SY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("A", "Problem identification", 10),
        criterion("B", "Literature survey", 10),
        criterion("C", "Objectives and scope", 10),
        criterion("D", "Presentation", 10),
        criterion("E", "Question and answer", 10),
    ]
});

static TY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("A", "Problem definition and relevance", 10),
        criterion("B", "Literature survey and gap analysis", 10),
        criterion("C", "Proposed methodology", 10),
        criterion("D", "Presentation", 10),
        criterion("E", "Viva", 10),
    ]
});

static LY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("A", "Problem statement and industry relevance", 10),
        criterion("B", "Review of existing systems", 10),
        criterion("C", "System architecture", 10),
        criterion("D", "Project planning", 10),
        criterion("E", "Presentation and viva", 10),
    ]
});

impl Rubric for PblReview1 {
    fn review(&self) -> ReviewType {
        ReviewType::Review1
    }

    fn year(&self) -> YearPrefix {
        self.year
    }

    fn criteria(&self) -> &[Criterion] {
        match self.year {
            YearPrefix::SY => &SY,
            YearPrefix::TY => &TY,
            YearPrefix::LY => &LY,
        }
    }
}

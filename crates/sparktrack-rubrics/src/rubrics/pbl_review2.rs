use std::sync::LazyLock;

use sparktrack_core::models::group::YearPrefix;
use sparktrack_core::models::review::ReviewType;

use crate::Rubric;
use crate::scoring::{Criterion, criterion};

/// PBL Review 2: design and implementation progress.
/// Same lettered field set as review 1.
pub struct PblReview2 {
    pub year: YearPrefix,
}

static SY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("A", "Design", 10),
        criterion("B", "Implementation progress", 10),
        criterion("C", "Teamwork", 10),
        criterion("D", "Documentation", 10),
        criterion("E", "Presentation", 10),
    ]
});

static TY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("A", "Detailed design", 10),
        criterion("B", "Implementation (50%)", 10),
        criterion("C", "Testing strategy", 10),
        criterion("D", "Paper and patent progress", 10),
        criterion("E", "Presentation and viva", 10),
    ]
});

static LY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("A", "Implementation (70%)", 10),
        criterion("B", "Results and analysis", 10),
        criterion("C", "Research paper and patent progress", 10),
        criterion("D", "Project report", 10),
        criterion("E", "Presentation and viva", 10),
    ]
});

impl Rubric for PblReview2 {
    fn review(&self) -> ReviewType {
        ReviewType::Review2
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

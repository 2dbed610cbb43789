use std::sync::LazyLock;

use sparktrack_core::models::group::YearPrefix;
use sparktrack_core::models::review::ReviewType;

use crate::Rubric;
use crate::scoring::{Criterion, criterion};

/// PBL Review 3: final evaluation. Six numbered criteria, 50 marks in total.
pub struct PblReview3 {
    pub year: YearPrefix,
}

static SY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("m1", "Project log book", 5),
        criterion("m2", "Project report", 5),
        criterion("m3", "Working model", 10),
        criterion("m4", "Testing", 10),
        criterion("m5", "Presentation", 10),
        criterion("m6", "Viva", 10),
    ]
});

static TY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("m1", "Project log book", 5),
        criterion("m2", "Project report", 5),
        criterion("m3", "Implementation completeness", 10),
        criterion("m4", "Testing and results", 10),
        criterion("m5", "Presentation", 10),
        criterion("m6", "Viva", 10),
    ]
});

static LY: LazyLock<Vec<Criterion>> = LazyLock::new(|| {
    vec![
        criterion("m1", "Project log book", 5),
        criterion("m2", "Project report", 5),
        criterion("m3", "Implementation completeness", 10),
        criterion("m4", "Results and publication", 10),
        criterion("m5", "Presentation", 10),
        criterion("m6", "Viva", 10),
    ]
});

impl Rubric for PblReview3 {
    fn review(&self) -> ReviewType {
        ReviewType::Review3
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

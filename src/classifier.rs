//! Hypertension severity classification
//!
//! Maps a patient's average systolic/diastolic reading to a severity
//! category and alert color. The rules form a strict priority-ordered list
//! evaluated top-down, first match wins; the categories deliberately overlap
//! (a low systolic with an elevated diastolic satisfies Stage 1 before
//! Normal is ever considered), so the order is load-bearing.
//!
//! Thresholds follow the ACC/AHA staging used by the upstream charting UI.

use crate::types::{BpCategory, Classification, ColorTier};

/// One priority-ordered classification rule
struct Rule {
    applies: fn(i64, i64) -> bool,
    category: BpCategory,
    tier: ColorTier,
}

fn crisis(systolic: i64, diastolic: i64) -> bool {
    systolic > 180 || diastolic > 120
}

fn stage2(systolic: i64, diastolic: i64) -> bool {
    systolic >= 140 || diastolic >= 90
}

fn stage1(systolic: i64, diastolic: i64) -> bool {
    (130..140).contains(&systolic) || (80..90).contains(&diastolic)
}

fn elevated(systolic: i64, diastolic: i64) -> bool {
    (120..130).contains(&systolic) && diastolic < 80
}

fn normal(systolic: i64, diastolic: i64) -> bool {
    systolic < 120 && diastolic < 80
}

/// Evaluation order is the contract; do not reorder.
static RULES: &[Rule] = &[
    Rule {
        applies: crisis,
        category: BpCategory::Crisis,
        tier: ColorTier::Red,
    },
    Rule {
        applies: stage2,
        category: BpCategory::Stage2,
        tier: ColorTier::Red,
    },
    Rule {
        applies: stage1,
        category: BpCategory::Stage1,
        tier: ColorTier::Yellow,
    },
    Rule {
        applies: elevated,
        category: BpCategory::Elevated,
        tier: ColorTier::Yellow,
    },
    Rule {
        applies: normal,
        category: BpCategory::Normal,
        tier: ColorTier::Green,
    },
];

/// Stateless first-match-wins rule evaluator
pub struct ClassificationEngine;

impl ClassificationEngine {
    /// Classify a rounded average reading.
    ///
    /// Inputs are the arithmetic means over the whole reading set, rounded
    /// by the caller; an empty set is classified as `(0, 0)` and lands on
    /// Normal. Total over all inputs: anything no rule matches falls back
    /// to Normal/Green.
    pub fn classify(avg_systolic: i64, avg_diastolic: i64) -> Classification {
        for rule in RULES {
            if (rule.applies)(avg_systolic, avg_diastolic) {
                return Classification {
                    category: rule.category,
                    tier: rule.tier,
                };
            }
        }

        Classification {
            category: BpCategory::Normal,
            tier: ColorTier::Green,
        }
    }
}

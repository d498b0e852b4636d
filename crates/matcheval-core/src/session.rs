//! Per-evaluator session state and the blind left/right assignment.
//!
//! A session owns whichever record is currently on screen. The swap
//! decision — which comparison table lands on which side — is drawn once
//! per served record, the first time a presentation is requested, and then
//! held until the next record replaces it. Holding it matters twice: the
//! display must not re-shuffle while the evaluator is looking at it, and
//! the submitted scores must be mapped back through the same decision so
//! the ledger columns stay attributed to the right method.

use rand::Rng;
use uuid::Uuid;

use crate::course::CourseCell;
use crate::model::{EvaluatorIdentity, SourceRecord};

/// One record as currently shown to the evaluator.
#[derive(Debug, Clone)]
pub struct ServedRecord {
    /// The record being rated.
    pub record: SourceRecord,
    /// Parsed SBERT table, displayed in full structured form.
    pub table_a: Vec<Vec<CourseCell>>,
    /// Parsed SBERT_LLM table, displayed as a single-column list.
    pub table_b: Vec<Vec<CourseCell>>,
    /// Key skills parsed from the record; empty when none were supplied.
    pub key_skills: Vec<String>,
    /// Left/right swap decision; unset until the first presentation.
    swap: Option<bool>,
}

impl ServedRecord {
    pub fn new(
        record: SourceRecord,
        table_a: Vec<Vec<CourseCell>>,
        table_b: Vec<Vec<CourseCell>>,
    ) -> Self {
        let key_skills = record.key_skills_list();
        Self {
            record,
            table_a,
            table_b,
            key_skills,
            swap: None,
        }
    }

    /// The swap decision, if one has been drawn yet.
    pub fn swap_decision(&self) -> Option<bool> {
        self.swap
    }

    /// Resolves the left/right layout for display.
    ///
    /// With randomization enabled the first call draws a fair coin flip and
    /// stores it; every later call reuses the stored decision. One side
    /// always shows the full structured table, the other only the first
    /// column of its table — the blinding hides which method produced which
    /// side, not the difference in detail the two roles carry by design.
    pub fn presentation<R: Rng>(
        &mut self,
        headers: &[String],
        randomize: bool,
        rng: &mut R,
    ) -> Presentation {
        let swapped = if randomize {
            *self.swap.get_or_insert_with(|| rng.gen_bool(0.5))
        } else {
            false
        };

        let full = TableView {
            headers: headers.to_vec(),
            rows: self.table_a.clone(),
        };
        let single = TableView {
            headers: headers.first().cloned().into_iter().collect(),
            rows: first_column(&self.table_b),
        };

        if swapped {
            Presentation {
                left: single,
                right: full,
            }
        } else {
            Presentation {
                left: full,
                right: single,
            }
        }
    }

    /// Maps positional (left, right) scores back to method-attributed
    /// (score_a, score_b). Under an active swap the left side showed
    /// table_b, so the scores cross back.
    pub fn resolve_scores(&self, left: u8, right: u8) -> (u8, u8) {
        if self.swap.unwrap_or(false) {
            (right, left)
        } else {
            (left, right)
        }
    }
}

/// The two tables as placed on screen.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub left: TableView,
    pub right: TableView,
}

/// One displayable table: headers plus flagged rows.
#[derive(Debug, Clone)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CourseCell>>,
}

/// Mutable state for one evaluator session. The served record is replaced
/// wholesale when the next record loads, which is what resets the swap
/// decision — there is no path that re-randomizes a record mid-display.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: Uuid,
    pub identity: EvaluatorIdentity,
    pub served: Option<ServedRecord>,
}

impl SessionState {
    pub fn new(identity: EvaluatorIdentity) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            identity,
            served: None,
        }
    }

    /// Puts the next record on screen, dropping the previous one and its
    /// swap decision.
    pub fn serve(&mut self, served: ServedRecord) -> &mut ServedRecord {
        self.served.insert(served)
    }

    /// Clears the display, e.g. when the queue runs out.
    pub fn finish(&mut self) {
        self.served = None;
    }
}

/// Projects each row onto its first cell; rows that have no cells vanish.
fn first_column(rows: &[Vec<CourseCell>]) -> Vec<Vec<CourseCell>> {
    rows.iter()
        .filter_map(|row| row.first().cloned())
        .map(|cell| vec![cell])
        .collect()
}

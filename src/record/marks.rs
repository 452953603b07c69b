//! Subject marks
//!
//! Subject names are trimmed before use as keys; scores live in [0, 100].

use std::collections::BTreeMap;

use super::{finite, non_empty};
use crate::error::{RegistrarError, Result};

/// Lowest accepted score
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score
pub const MAX_SCORE: f64 = 100.0;

/// Scores per subject, iterated in subject order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Marks {
    scores: BTreeMap<String, f64>,
}

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(subject, score)` pairs, validating each one
    pub fn from_scores<I, S>(scores: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut marks = Self::new();
        for (subject, score) in scores {
            marks.set_mark(subject.as_ref(), score)?;
        }
        Ok(marks)
    }

    /// Set or overwrite the score for `subject`
    pub fn set_mark(&mut self, subject: &str, score: f64) -> Result<()> {
        let subject = non_empty(subject, "Subject name")?;
        let score = check_score(score)?;
        self.scores.insert(subject, score);
        Ok(())
    }

    /// Remove the mark for `subject`. Absent subjects are a no-op.
    ///
    /// Returns whether a mark was removed.
    pub fn remove_mark(&mut self, subject: &str) -> bool {
        self.scores.remove(subject.trim()).is_some()
    }

    pub fn get(&self, subject: &str) -> Option<f64> {
        self.scores.get(subject.trim()).copied()
    }

    /// Mean of all scores, `0.0` when there are none
    pub fn average(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.values().sum::<f64>() / self.scores.len() as f64
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(subject, score)| (subject.as_str(), *score))
    }

    /// Re-check every stored entry
    pub fn validate(&self) -> Result<()> {
        for (subject, score) in &self.scores {
            non_empty(subject, "Subject name")?;
            check_score(*score)?;
        }
        Ok(())
    }
}

fn check_score(score: f64) -> Result<f64> {
    let score = finite(score, "Score")?;
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(RegistrarError::invalid(format!(
            "Score must be between 0 and 100. Got: {score}."
        )));
    }
    Ok(score)
}

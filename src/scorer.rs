//! Pairwise coreference evaluation.
//!
//! Scores a predicted partition against a document's gold partition by
//! counting mention pairs. Recall asks how many same-gold-cluster pairs the
//! prediction also puts together; precision asks the mirror question of the
//! predicted clusters against gold membership. Denominators count every
//! pair on their own side unconditionally, so missing mentions on the other
//! side cost score rather than shrinking the test set.
//!
//! A [`PairwiseScorer`] accumulates raw `u64` counts across documents and
//! turns them into [`PairwiseScores`] on demand. Partial scorers combine
//! with [`PairwiseScorer::merge`], which is what [`score_documents`] uses to
//! reduce a slice in parallel.
//!
//! # Example
//!
//! ```
//! use corefer::{PairwiseScorer, Document, Sentence, Token, Mention};
//!
//! let mut doc = Document::new();
//! doc.add_sentence(Sentence::new(vec![Token::new("Obama", "NNP")]));
//! doc.add_sentence(Sentence::new(vec![Token::new("he", "PRP")]));
//! let s0 = doc.sentences[0].clone();
//! let s1 = doc.sentences[1].clone();
//! doc.add_mention(Mention::new(0, 0, 0, 1, 0, &s0)?)?;
//! doc.add_mention(Mention::new(1, 1, 0, 1, 0, &s1)?)?;
//! doc.add_gold_cluster(0, &[0, 1]);
//! doc.seed_singleton_clusters();
//!
//! let mut scorer = PairwiseScorer::new();
//! let scores = scorer.score_document(&doc);
//! assert_eq!(scores.recall, 0.0, "singletons recover no gold pair");
//! # Ok::<(), corefer::Error>(())
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::Document;
use crate::mention::MentionId;

// ============================================================================
// Scores
// ============================================================================

/// Precision, recall and their harmonic mean, each in `0.0..=1.0`.
///
/// Empty denominators (a document with only singletons on one side) score
/// `0.0` rather than poisoning cumulative sums with NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PairwiseScores {
    /// Fraction of predicted pairs that are gold pairs.
    pub precision: f64,
    /// Fraction of gold pairs that are predicted pairs.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

impl fmt::Display for PairwiseScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P: {:.2}% R: {:.2}% F1: {:.2}%",
            self.precision * 100.0,
            self.recall * 100.0,
            self.f1 * 100.0
        )
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

// ============================================================================
// Scorer
// ============================================================================

/// Accumulating pairwise scorer.
///
/// Each [`score_document`](Self::score_document) call adds a document's pair
/// counts to the running numerators and denominators, so one scorer value
/// carries corpus-level totals. Numerators never exceed denominators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseScorer {
    precision_numerator: u64,
    precision_denominator: u64,
    recall_numerator: u64,
    recall_denominator: u64,
}

impl PairwiseScorer {
    /// Fresh scorer with all counts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one document and fold its counts into the running totals.
    /// Returns the document's own scores.
    pub fn score_document(&mut self, doc: &Document) -> PairwiseScores {
        let mut partial = PairwiseScorer::new();
        for members in doc.gold_clusters().values() {
            let (num, den) = recovered_pairs(members, |id1, id2| {
                match (doc.mention(id1), doc.mention(id2)) {
                    (Some(m1), Some(m2)) => match (m1.cluster, m2.cluster) {
                        (Some(c1), Some(c2)) => c1 == c2,
                        _ => false,
                    },
                    _ => false,
                }
            });
            partial.recall_numerator += num;
            partial.recall_denominator += den;
        }
        for predicted in doc.clusters() {
            let (num, den) = recovered_pairs(predicted.members(), |id1, id2| {
                match (doc.gold_cluster_of(id1), doc.gold_cluster_of(id2)) {
                    (Some(g1), Some(g2)) => g1 == g2,
                    _ => false,
                }
            });
            partial.precision_numerator += num;
            partial.precision_denominator += den;
        }
        self.merge(&partial);
        partial.scores()
    }

    /// Scores for everything accumulated so far.
    #[must_use]
    pub fn scores(&self) -> PairwiseScores {
        let precision = ratio(self.precision_numerator, self.precision_denominator);
        let recall = ratio(self.recall_numerator, self.recall_denominator);
        PairwiseScores {
            precision,
            recall,
            f1: harmonic_mean(precision, recall),
        }
    }

    /// Fold another scorer's counts into this one.
    pub fn merge(&mut self, other: &PairwiseScorer) {
        self.precision_numerator += other.precision_numerator;
        self.precision_denominator += other.precision_denominator;
        self.recall_numerator += other.recall_numerator;
        self.recall_denominator += other.recall_denominator;
    }
}

/// Count a cluster's mention pairs: total pairs, and how many the `together`
/// test recovers on the other side of the evaluation.
fn recovered_pairs<F>(members: &[MentionId], together: F) -> (u64, u64)
where
    F: Fn(MentionId, MentionId) -> bool,
{
    let n = members.len() as u64;
    let denominator = n * n.saturating_sub(1) / 2;
    let mut numerator = 0;
    for (i, &id1) in members.iter().enumerate() {
        for &id2 in &members[i + 1..] {
            if together(id1, id2) {
                numerator += 1;
            }
        }
    }
    (numerator, denominator)
}

/// Score a slice of documents in parallel, one partial scorer per rayon
/// task, reduced with [`PairwiseScorer::merge`].
#[must_use]
pub fn score_documents(docs: &[Document]) -> PairwiseScorer {
    docs.par_iter()
        .map(|doc| {
            let mut scorer = PairwiseScorer::new();
            scorer.score_document(doc);
            scorer
        })
        .reduce(PairwiseScorer::new, |mut acc, partial| {
            acc.merge(&partial);
            acc
        })
}

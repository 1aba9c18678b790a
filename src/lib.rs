//! # corefer
//!
//! Deterministic coreference-resolution primitives for Rust.
//!
//! - **Mentions**: typed attribute model (number, gender, animacy, person)
//!   extracted from POS, NER and curated dictionaries
//! - **Predicates**: the pair and cluster compatibility tests deterministic
//!   rule-based resolvers are built from
//! - **Clusters**: entity aggregation with attribute-set union and wildcard
//!   pruning
//! - **Evaluation**: pairwise precision/recall/F1 against a gold partition
//!
//! No statistical models and no scheduling: this crate is the substrate a
//! multi-pass resolver calls, not the resolver itself. Callers supply
//! tokenized, tagged sentences (with optional dependency graphs and
//! Penn-bracketed parse trees), register mentions, and drive merges with
//! whatever pass ordering they choose. Every operation is deterministic.
//!
//! ## Quick Start
//!
//! ```
//! use corefer::{AttributeExtractor, CorefConfig, Dictionaries, Document,
//!               Mention, Sentence, Token};
//!
//! let dict = Dictionaries::default();
//! let mut doc = Document::new();
//! doc.add_sentence(Sentence::new(vec![
//!     Token::new("Obama", "NNP").with_ner("PERSON"),
//! ]));
//! doc.add_sentence(Sentence::new(vec![Token::new("he", "PRP")]));
//! let s0 = doc.sentences[0].clone();
//! doc.add_mention(Mention::new(0, 0, 0, 1, 0, &s0)?)?;
//! let s1 = doc.sentences[1].clone();
//! doc.add_mention(Mention::new(1, 1, 0, 1, 0, &s1)?)?;
//!
//! let config = CorefConfig::default();
//! doc.extract_attributes(&AttributeExtractor::new(&dict, config))?;
//! doc.seed_singleton_clusters();
//!
//! // the name and the pronoun are compatible in animacy and number
//! let obama = doc.mention(0).unwrap();
//! let he = doc.mention(1).unwrap();
//! assert!(he.animacies_agree(obama) && he.numbers_agree(obama));
//!
//! doc.merge_clusters(0, 1, &config)?;
//! let resolution = doc.resolution();
//! assert_eq!(resolution.assignments, vec![(0, 0), (1, 0)]);
//! assert_eq!(resolution.representatives, vec![(0, 0)], "the name represents");
//! # Ok::<(), corefer::Error>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`document`] | tokens, sentences, parse trees, registries, the document |
//! | [`mention`] | the mention model, attribute enums, pairwise tests |
//! | [`attributes`] | dictionary-driven attribute extraction |
//! | [`cluster`] | cluster aggregation and wildcard-aware attribute sets |
//! | [`predicates`] | pair- and cluster-level compatibility predicates |
//! | [`scorer`] | pairwise evaluation against a gold partition |
//! | [`dictionaries`] | pronoun inventories, demonyms, gender counts |
//! | [`semantics`] | optional alias-resolution capability |
//!
//! ## Design Notes
//!
//! - Attribute enums are closed with an explicit `Unknown` that acts as a
//!   wildcard only through named predicates, never bare equality.
//! - Missing annotations degrade: no parse tree disables the structural
//!   tests, an unresolvable speaker reads as disagreement, an absent
//!   semantic backend skips the alias test. Nothing here panics on input.
//! - Mention/cluster membership lives in id-keyed registries on
//!   [`Document`], so predicates borrow one document instead of chasing
//!   object graphs.

#![warn(missing_docs)]

pub mod attributes;
pub mod cluster;
pub mod dictionaries;
pub mod document;
mod error;
pub mod mention;
pub mod predicates;
pub mod scorer;
pub mod semantics;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```
    //! use corefer::prelude::*;
    //!
    //! let mut doc = Document::new();
    //! doc.add_sentence(Sentence::new(vec![Token::new("it", "PRP")]));
    //! assert_eq!(doc.mention_count(), 0);
    //! ```
    pub use crate::attributes::{AttributeExtractor, CorefConfig};
    pub use crate::cluster::{Cluster, ClusterId, Resolution};
    pub use crate::dictionaries::Dictionaries;
    pub use crate::document::{Document, Sentence, Token};
    pub use crate::error::{Error, Result};
    pub use crate::mention::{Mention, MentionId, MentionKind};
    pub use crate::predicates;
    pub use crate::scorer::{PairwiseScorer, PairwiseScores};
    pub use crate::semantics::{AliasResolver, Semantics};
}

// Re-exports
pub use attributes::{AttributeExtractor, CorefConfig};
pub use cluster::{Attribute, AttributeSet, Cluster, ClusterId, NerLabel, Resolution};
pub use dictionaries::{Dictionaries, GenderCounts};
pub use document::{
    DependencyGraph, Document, NodeId, ParseTree, RelationRegistry, Sentence, Token,
};
pub use error::{Error, Result};
pub use mention::{
    Animacy, Gender, GrammaticalRole, Mention, MentionId, MentionKind, Number, Person,
};
pub use scorer::{score_documents, PairwiseScorer, PairwiseScores};
pub use semantics::{AliasResolver, Semantics};

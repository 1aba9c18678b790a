//! Cluster model: merged entities with aggregated attribute sets.
//!
//! A [`Cluster`] is one (partial) entity: the ids of its member mentions
//! plus everything merge decisions consult in aggregate form. Per-attribute
//! value sets are [`AttributeSet`]s, small unordered sets whose union prunes
//! wildcard values as soon as a concrete value is present. Pruning keeps a
//! lone wildcard in place, so an all-unknown cluster still matches anything.
//!
//! Two member slots are folded rather than recomputed: the first mention in
//! document order and the representative mention. The representative fold
//! uses [`Mention::more_representative_than`], a challenger-versus-incumbent
//! test that is not transitive; clusters therefore keep the fold result and
//! never sort members by it.
//!
//! # Example
//!
//! ```
//! use corefer::cluster::{Attribute, AttributeSet};
//! use corefer::mention::Number;
//!
//! let mut numbers = AttributeSet::new();
//! numbers.insert(Number::Unknown);
//! numbers.insert(Number::Singular);
//! numbers.prune_wildcards();
//!
//! assert!(numbers.contains(&Number::Singular));
//! assert!(!numbers.contains(&Number::Unknown));
//! ```

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::mention::{Animacy, Gender, Mention, MentionId, Number};

/// Identifier of a cluster, unique within a document.
pub type ClusterId = u64;

// ============================================================================
// Attribute values and sets
// ============================================================================

/// A value that can live in an [`AttributeSet`] and knows its wildcards.
pub trait Attribute: Clone + Eq + Hash {
    /// True when this value stands for "no information".
    fn is_wildcard(&self) -> bool;

    /// The wildcard values for this attribute, in pruning order.
    fn wildcards() -> Vec<Self>;
}

impl Attribute for Number {
    fn is_wildcard(&self) -> bool {
        self.is_unknown()
    }

    fn wildcards() -> Vec<Self> {
        vec![Number::Unknown]
    }
}

impl Attribute for Gender {
    fn is_wildcard(&self) -> bool {
        self.is_unknown()
    }

    fn wildcards() -> Vec<Self> {
        vec![Gender::Unknown]
    }
}

impl Attribute for Animacy {
    fn is_wildcard(&self) -> bool {
        self.is_unknown()
    }

    fn wildcards() -> Vec<Self> {
        vec![Animacy::Unknown]
    }
}

/// An NER label as an attribute value. `"O"` and `"MISC"` are wildcards,
/// pruned in that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NerLabel(pub String);

impl NerLabel {
    /// Wrap a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Attribute for NerLabel {
    fn is_wildcard(&self) -> bool {
        self.0 == "O" || self.0 == "MISC"
    }

    fn wildcards() -> Vec<Self> {
        vec![NerLabel::new("O"), NerLabel::new("MISC")]
    }
}

/// Small unordered set of attribute values with wildcard pruning.
///
/// `prune_wildcards` removes each wildcard in order, but only while more
/// than one value remains, so information is only dropped when a concrete
/// value supersedes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet<T: Attribute> {
    values: HashSet<T>,
}

impl<T: Attribute> Default for AttributeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Attribute> AttributeSet<T> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashSet::new(),
        }
    }

    /// Insert a value, returning whether it was new.
    pub fn insert(&mut self, value: T) -> bool {
        self.values.insert(value)
    }

    /// Union in more values. Call [`prune_wildcards`](Self::prune_wildcards)
    /// afterwards when merging clusters.
    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) {
        self.values.extend(values);
    }

    /// Drop wildcard values while more than one value remains, in the
    /// order given by [`Attribute::wildcards`].
    pub fn prune_wildcards(&mut self) {
        for wildcard in T::wildcards() {
            if self.values.len() > 1 {
                self.values.remove(&wildcard);
            }
        }
    }

    /// True when the set holds the value.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    /// True when any held value is a wildcard.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.values.iter().any(Attribute::is_wildcard)
    }

    /// Number of held values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for an empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the held values, order unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: Attribute> IntoIterator for AttributeSet<T> {
    type Item = T;
    type IntoIter = std::collections::hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

// ============================================================================
// Cluster
// ============================================================================

/// One partial entity: member mention ids plus aggregated attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster identifier.
    pub id: ClusterId,
    members: Vec<MentionId>,
    /// Numbers observed across members.
    pub numbers: AttributeSet<Number>,
    /// Genders observed across members.
    pub genders: AttributeSet<Gender>,
    /// Animacies observed across members.
    pub animacies: AttributeSet<Animacy>,
    /// NER labels observed across members.
    pub ner_labels: AttributeSet<NerLabel>,
    /// Head strings of all members.
    pub heads: HashSet<String>,
    /// Lowercased span words of all non-pronominal members.
    pub words: HashSet<String>,
    first: Option<MentionId>,
    representative: Option<MentionId>,
}

impl Cluster {
    /// Build a cluster over the given mentions, aggregating attributes.
    /// The first slot folds by document order; the representative starts
    /// from that first mention and is then challenged by every member in
    /// the given order.
    #[must_use]
    pub fn from_mentions<'a, I>(id: ClusterId, mentions: I) -> Self
    where
        I: IntoIterator<Item = &'a Mention>,
    {
        let mut cluster = Cluster {
            id,
            ..Cluster::default()
        };
        let mentions: Vec<&Mention> = mentions.into_iter().collect();
        let mut first: Option<&Mention> = None;
        for &mention in &mentions {
            cluster.members.push(mention.id);
            cluster.numbers.insert(mention.number);
            cluster.genders.insert(mention.gender);
            cluster.animacies.insert(mention.animacy);
            cluster.ner_labels.insert(NerLabel::new(mention.ner.clone()));
            cluster.heads.insert(mention.head_string.clone());
            if !mention.is_pronominal() {
                for token in &mention.span {
                    cluster.words.insert(token.text.to_lowercase());
                }
            }
            if first.map_or(true, |f| mention.appear_earlier_than(f)) {
                first = Some(mention);
            }
        }
        let mut representative = first;
        for &mention in &mentions {
            if mention.more_representative_than(representative) {
                representative = Some(mention);
            }
        }
        cluster.first = first.map(|m| m.id);
        cluster.representative = representative.map(|m| m.id);
        cluster
    }

    /// Member mention ids, in insertion order.
    #[must_use]
    pub fn members(&self) -> &[MentionId] {
        &self.members
    }

    /// First member in document order.
    #[must_use]
    pub fn first_mention(&self) -> Option<MentionId> {
        self.first
    }

    /// Representative member, per the representativeness fold.
    #[must_use]
    pub fn representative(&self) -> Option<MentionId> {
        self.representative
    }

    /// Absorb another cluster. Members, heads and words always union;
    /// attribute sets union and prune only when `share_attributes` is on.
    /// The first slot moves to the source's first mention when that one
    /// comes earlier and is not pronominal; the representative slot moves
    /// when the source's representative wins the pairwise test.
    pub fn absorb(
        &mut self,
        source: Cluster,
        mentions: &HashMap<MentionId, Mention>,
        share_attributes: bool,
    ) {
        if share_attributes {
            self.numbers.extend(source.numbers);
            self.numbers.prune_wildcards();
            self.genders.extend(source.genders);
            self.genders.prune_wildcards();
            self.animacies.extend(source.animacies);
            self.animacies.prune_wildcards();
            self.ner_labels.extend(source.ner_labels);
            self.ner_labels.prune_wildcards();
        }
        self.heads.extend(source.heads);
        self.members.extend(source.members);
        self.words.extend(source.words);

        if self.first.is_none() {
            self.first = source.first;
        } else if let (Some(source_first), Some(target_first)) = (
            source.first.and_then(|id| mentions.get(&id)),
            self.first.and_then(|id| mentions.get(&id)),
        ) {
            if source_first.appear_earlier_than(target_first) && !source_first.is_pronominal() {
                self.first = Some(source_first.id);
            }
        }

        if self.representative.is_none() {
            self.representative = source.representative;
        } else if let Some(source_rep) = source.representative.and_then(|id| mentions.get(&id)) {
            let target_rep = self.representative.and_then(|id| mentions.get(&id));
            if source_rep.more_representative_than(target_rep) {
                self.representative = Some(source_rep.id);
            }
        }
    }
}

// ============================================================================
// Resolution output
// ============================================================================

/// Final output of a resolution run, sorted for deterministic consumption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Mention id to final cluster id, sorted by mention id.
    pub assignments: Vec<(MentionId, ClusterId)>,
    /// Cluster id to representative mention id, sorted by cluster id.
    pub representatives: Vec<(ClusterId, MentionId)>,
}

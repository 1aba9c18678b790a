//! Input model and document-level registries.
//!
//! A [`Document`] owns everything resolution operates on: sentences (tokens,
//! dependency graph, constituency tree), the mention registry, the cluster
//! registry, the symmetric relation registry (appositions, predicate
//! nominatives, relative pronouns), speaker maps, and the gold partition used
//! for scoring. Mentions and clusters refer to each other exclusively by id;
//! there are no ownership cycles.
//!
//! | Type | Role |
//! |------|------|
//! | [`Token`] | surface form + POS/NER/speaker annotations |
//! | [`DependencyGraph`] | labeled child-to-governor edges per sentence |
//! | [`ParseTree`] | arena-indexed constituency tree with a bracket reader |
//! | [`Sentence`] | tokens + optional graph/tree + paragraph index |
//! | [`RelationRegistry`] | symmetric mention relations recorded on both sides |
//! | [`Document`] | the registries plus merge and seeding operations |

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeExtractor, CorefConfig};
use crate::cluster::{Cluster, ClusterId, Resolution};
use crate::error::{Error, Result};
use crate::mention::{Mention, MentionId};

// ============================================================================
// Tokens
// ============================================================================

/// One token of a sentence with its annotations.
///
/// `ner` uses `"O"` for "no entity". `entity_type` carries a gold
/// entity-type annotation (`"PRO"`, `"NAM"`, `"NOM"`) when the corpus
/// provides one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text.
    pub text: String,
    /// Part-of-speech tag.
    pub pos: String,
    /// Named-entity tag, `"O"` when none.
    pub ner: String,
    /// Gold entity-type annotation, when the corpus provides one.
    pub entity_type: Option<String>,
    /// Utterance index for dialogue documents.
    pub utterance: u32,
    /// Speaker annotation: a name, or a mention id rendered as digits.
    pub speaker: Option<String>,
}

impl Token {
    /// Create a token with the given text and POS tag and no other
    /// annotations.
    #[must_use]
    pub fn new(text: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: pos.into(),
            ner: "O".to_string(),
            entity_type: None,
            utterance: 0,
            speaker: None,
        }
    }

    /// Set the named-entity tag.
    #[must_use]
    pub fn with_ner(mut self, ner: impl Into<String>) -> Self {
        self.ner = ner.into();
        self
    }

    /// Set a gold entity-type annotation.
    #[must_use]
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Set the utterance index.
    #[must_use]
    pub fn with_utterance(mut self, utterance: u32) -> Self {
        self.utterance = utterance;
        self
    }

    /// Set the speaker annotation.
    #[must_use]
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }
}

// ============================================================================
// Dependency graph
// ============================================================================

/// One labeled dependency edge, indices into the sentence's tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Relation label ("nsubj", "dobj", ...).
    pub relation: String,
    /// Governor token index.
    pub governor: usize,
    /// Dependent token index.
    pub dependent: usize,
}

/// Labeled dependency edges for one sentence.
///
/// Lookup is dependent-to-governor; when a token has several governors the
/// first inserted edge wins, so edge insertion order is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge from `governor` to `dependent` with the given label.
    pub fn add_edge(&mut self, relation: impl Into<String>, governor: usize, dependent: usize) {
        self.edges.push(DependencyEdge {
            relation: relation.into(),
            governor,
            dependent,
        });
    }

    /// Chainable [`add_edge`](Self::add_edge).
    #[must_use]
    pub fn with_edge(mut self, relation: impl Into<String>, governor: usize, dependent: usize) -> Self {
        self.add_edge(relation, governor, dependent);
        self
    }

    /// First governor of `token`, with the relation label.
    #[must_use]
    pub fn governor(&self, token: usize) -> Option<(&str, usize)> {
        self.edges
            .iter()
            .find(|e| e.dependent == token)
            .map(|e| (e.relation.as_str(), e.governor))
    }

    /// All governors of `token` in insertion order, with relation labels.
    pub fn governors(&self, token: usize) -> impl Iterator<Item = (&str, usize)> {
        self.edges
            .iter()
            .filter(move |e| e.dependent == token)
            .map(|e| (e.relation.as_str(), e.governor))
    }

    /// All edges of the graph.
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }
}

// ============================================================================
// Constituency tree
// ============================================================================

/// Node handle into a [`ParseTree`] arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ParseNode {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Token index for leaf (word) nodes.
    token: Option<usize>,
}

/// Arena-indexed constituency tree.
///
/// Nodes are referred to by [`NodeId`]; leaves appear in token order. Word
/// leaves carry their token index, so tree navigation and token spans stay
/// aligned without back-pointers into the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
    leaves: Vec<NodeId>,
    root: NodeId,
}

#[derive(Debug)]
enum BracketToken {
    Open,
    Close,
    Word(String),
}

impl ParseTree {
    /// Read a Penn-bracketed tree, e.g.
    /// `(ROOT (S (NP (DT the) (NN dog)) (VP (VBD barked))))`.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = Self::lex(input);
        let mut nodes: Vec<ParseNode> = Vec::new();
        let mut leaves: Vec<NodeId> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;

        let mut iter = tokens.into_iter().peekable();
        while let Some(tok) = iter.next() {
            match tok {
                BracketToken::Open => {
                    let label = match iter.next() {
                        Some(BracketToken::Word(w)) => w,
                        _ => {
                            return Err(Error::malformed_tree("expected label after '('"));
                        }
                    };
                    let id = nodes.len();
                    let parent = stack.last().copied();
                    nodes.push(ParseNode {
                        label,
                        parent,
                        children: Vec::new(),
                        token: None,
                    });
                    match parent {
                        Some(p) => nodes[p].children.push(id),
                        None => {
                            if root.is_some() {
                                return Err(Error::malformed_tree("multiple root nodes"));
                            }
                            root = Some(id);
                        }
                    }
                    stack.push(id);
                }
                BracketToken::Close => {
                    if stack.pop().is_none() {
                        return Err(Error::malformed_tree("unbalanced ')'"));
                    }
                }
                BracketToken::Word(w) => {
                    let Some(&parent) = stack.last() else {
                        return Err(Error::malformed_tree(format!("word {w:?} outside any node")));
                    };
                    let id = nodes.len();
                    nodes.push(ParseNode {
                        label: w,
                        parent: Some(parent),
                        children: Vec::new(),
                        token: Some(leaves.len()),
                    });
                    nodes[parent].children.push(id);
                    leaves.push(id);
                }
            }
        }

        if !stack.is_empty() {
            return Err(Error::malformed_tree("unbalanced '('"));
        }
        let root = root.ok_or_else(|| Error::malformed_tree("empty input"))?;
        Ok(Self {
            nodes,
            leaves,
            root,
        })
    }

    fn lex(input: &str) -> Vec<BracketToken> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        for ch in input.chars() {
            match ch {
                '(' | ')' => {
                    if !current.is_empty() {
                        tokens.push(BracketToken::Word(std::mem::take(&mut current)));
                    }
                    tokens.push(if ch == '(' {
                        BracketToken::Open
                    } else {
                        BracketToken::Close
                    });
                }
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(BracketToken::Word(std::mem::take(&mut current)));
                    }
                }
                c => current.push(c),
            }
        }
        if !current.is_empty() {
            tokens.push(BracketToken::Word(current));
        }
        tokens
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node label; for word leaves this is the word itself.
    #[must_use]
    pub fn label(&self, node: NodeId) -> &str {
        &self.nodes[node].label
    }

    /// Parent of `node`, `None` at the root.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Leaf node for a token index.
    #[must_use]
    pub fn leaf(&self, token: usize) -> Option<NodeId> {
        self.leaves.get(token).copied()
    }

    /// Number of word leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// True when `ancestor` dominates `node` (ancestor-or-self).
    #[must_use]
    pub fn dominates(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Token indices of the leaves under `node`, in order.
    #[must_use]
    pub fn leaves_under(&self, node: NodeId) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let n = &self.nodes[id];
            if let Some(tok) = n.token {
                out.push(tok);
            }
            // preserve left-to-right order with a LIFO stack
            for &child in n.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Inclusive token span covered by `node`, `None` for empty phrases.
    #[must_use]
    pub fn token_span(&self, node: NodeId) -> Option<(usize, usize)> {
        let leaves = self.leaves_under(node);
        match (leaves.first(), leaves.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }

    /// Top-down search for the phrase node covering exactly the token range
    /// `start..end`. The highest NP-labeled match wins, then the highest
    /// match of any label; word leaves never match.
    #[must_use]
    pub fn subtree_for_span(&self, start: usize, end: usize) -> Option<NodeId> {
        if end <= start {
            return None;
        }
        let want = (start, end - 1);
        let mut fallback = None;
        let mut stack = vec![self.root];
        let mut ordered = Vec::new();
        while let Some(id) = stack.pop() {
            ordered.push(id);
            for &child in self.nodes[id].children.iter().rev() {
                stack.push(child);
            }
        }
        for id in ordered {
            let n = &self.nodes[id];
            if n.token.is_some() {
                continue;
            }
            if self.token_span(id) == Some(want) {
                if n.label.starts_with("NP") {
                    return Some(id);
                }
                if fallback.is_none() {
                    fallback = Some(id);
                }
            }
        }
        fallback
    }
}

// ============================================================================
// Sentences
// ============================================================================

/// One sentence: tokens plus optional syntactic annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// The tokens in order.
    pub tokens: Vec<Token>,
    /// Dependency edges, empty when the corpus carries none.
    pub dependencies: DependencyGraph,
    /// Constituency tree, when the corpus carries one.
    pub parse: Option<ParseTree>,
    /// Paragraph index within the document.
    pub paragraph: u32,
}

impl Sentence {
    /// Create a sentence from tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ..Default::default()
        }
    }

    /// Attach a dependency graph.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: DependencyGraph) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Attach a constituency tree.
    #[must_use]
    pub fn with_parse(mut self, parse: ParseTree) -> Self {
        self.parse = Some(parse);
        self
    }

    /// Set the paragraph index.
    #[must_use]
    pub fn with_paragraph(mut self, paragraph: u32) -> Self {
        self.paragraph = paragraph;
        self
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the sentence has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// ============================================================================
// Relation registry
// ============================================================================

/// Symmetric mention relations, recorded on both sides when discovered.
///
/// Holding these in one document-level registry keeps mentions free of
/// mention-to-mention references; predicates look relations up by id pair.
/// The role set is unary: mentions marked as role phrases are excluded from
/// the exact-string-match predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRegistry {
    appositions: HashMap<MentionId, HashSet<MentionId>>,
    predicate_nominatives: HashMap<MentionId, HashSet<MentionId>>,
    relative_pronouns: HashMap<MentionId, HashSet<MentionId>>,
    roles: HashSet<MentionId>,
}

impl RelationRegistry {
    /// Record an apposition between two mentions.
    pub fn add_apposition(&mut self, a: MentionId, b: MentionId) {
        self.appositions.entry(a).or_default().insert(b);
        self.appositions.entry(b).or_default().insert(a);
    }

    /// Record a predicate-nominative relation between two mentions.
    pub fn add_predicate_nominative(&mut self, a: MentionId, b: MentionId) {
        self.predicate_nominatives.entry(a).or_default().insert(b);
        self.predicate_nominatives.entry(b).or_default().insert(a);
    }

    /// Record a relative-pronoun relation between two mentions.
    pub fn add_relative_pronoun(&mut self, a: MentionId, b: MentionId) {
        self.relative_pronouns.entry(a).or_default().insert(b);
        self.relative_pronouns.entry(b).or_default().insert(a);
    }

    /// True when `a` and `b` stand in an apposition.
    #[must_use]
    pub fn is_apposition(&self, a: MentionId, b: MentionId) -> bool {
        self.appositions.get(&a).is_some_and(|s| s.contains(&b))
    }

    /// True when `a` and `b` stand in a predicate-nominative relation.
    #[must_use]
    pub fn is_predicate_nominative(&self, a: MentionId, b: MentionId) -> bool {
        self.predicate_nominatives
            .get(&a)
            .is_some_and(|s| s.contains(&b))
    }

    /// True when `a` and `b` stand in a relative-pronoun relation.
    #[must_use]
    pub fn is_relative_pronoun(&self, a: MentionId, b: MentionId) -> bool {
        self.relative_pronouns
            .get(&a)
            .is_some_and(|s| s.contains(&b))
    }

    /// Mark a mention as a role phrase ("President Clinton"'s "President").
    pub fn mark_role(&mut self, mention: MentionId) {
        self.roles.insert(mention);
    }

    /// True when the mention was marked as a role phrase.
    #[must_use]
    pub fn is_role(&self, mention: MentionId) -> bool {
        self.roles.contains(&mention)
    }
}

// ============================================================================
// Document
// ============================================================================

/// A document under resolution: sentences, registries, speakers, gold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier, informational only.
    pub id: String,
    /// Sentences in order.
    pub sentences: Vec<Sentence>,
    /// Symmetric mention relations.
    pub relations: RelationRegistry,
    /// Utterance index to speaker annotation.
    pub speakers: HashMap<u32, String>,
    /// Mention id pairs known to stand in a speaker relation.
    pub speaker_pairs: HashSet<(MentionId, MentionId)>,
    mentions: HashMap<MentionId, Mention>,
    clusters: HashMap<ClusterId, Cluster>,
    gold_clusters: HashMap<ClusterId, Vec<MentionId>>,
    gold_membership: HashMap<MentionId, ClusterId>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Append a sentence, returning its index.
    pub fn add_sentence(&mut self, sentence: Sentence) -> usize {
        self.sentences.push(sentence);
        self.sentences.len() - 1
    }

    /// Register a mention. Ids must be unique within the document.
    pub fn add_mention(&mut self, mention: Mention) -> Result<()> {
        if mention.sentence >= self.sentences.len() {
            return Err(Error::SentenceOutOfRange {
                index: mention.sentence,
                len: self.sentences.len(),
            });
        }
        if self.mentions.contains_key(&mention.id) {
            return Err(Error::DuplicateMention(mention.id));
        }
        self.mentions.insert(mention.id, mention);
        Ok(())
    }

    /// Look up a mention by id.
    #[must_use]
    pub fn mention(&self, id: MentionId) -> Option<&Mention> {
        self.mentions.get(&id)
    }

    /// Iterate over all mentions, order unspecified.
    pub fn mentions(&self) -> impl Iterator<Item = &Mention> {
        self.mentions.values()
    }

    /// Number of registered mentions.
    #[must_use]
    pub fn mention_count(&self) -> usize {
        self.mentions.len()
    }

    /// Look up a cluster by id.
    #[must_use]
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    /// Iterate over all clusters, order unspecified.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.values()
    }

    /// Member mentions of a cluster that resolve in this document.
    pub fn cluster_mentions<'a>(&'a self, cluster: &'a Cluster) -> impl Iterator<Item = &'a Mention> {
        cluster.members().iter().filter_map(|id| self.mentions.get(id))
    }

    /// Cluster a mention currently belongs to.
    #[must_use]
    pub fn cluster_of(&self, mention: MentionId) -> Option<&Cluster> {
        let id = self.mentions.get(&mention)?.cluster?;
        self.clusters.get(&id)
    }

    /// Record that two mentions stand in a speaker relation.
    pub fn add_speaker_pair(&mut self, a: MentionId, b: MentionId) {
        self.speaker_pairs.insert((a, b));
    }

    /// True when a speaker relation was recorded for the pair, either order.
    #[must_use]
    pub fn has_speaker_pair(&self, a: MentionId, b: MentionId) -> bool {
        self.speaker_pairs.contains(&(a, b)) || self.speaker_pairs.contains(&(b, a))
    }

    /// Run attribute extraction over every registered mention.
    pub fn extract_attributes(&mut self, extractor: &AttributeExtractor<'_>) -> Result<()> {
        for mention in self.mentions.values_mut() {
            let sentence = self
                .sentences
                .get(mention.sentence)
                .ok_or(Error::SentenceOutOfRange {
                    index: mention.sentence,
                    len: self.sentences.len(),
                })?;
            extractor.extract(mention, sentence);
        }
        Ok(())
    }

    /// Create the initial partition: one cluster per mention, cluster id
    /// equal to mention id.
    pub fn seed_singleton_clusters(&mut self) {
        self.clusters.clear();
        let ids: Vec<MentionId> = self.mentions.keys().copied().collect();
        for id in ids {
            let Some(mention) = self.mentions.get(&id) else {
                continue;
            };
            let cluster = Cluster::from_mentions(id, std::iter::once(mention));
            self.clusters.insert(id, cluster);
            if let Some(mention) = self.mentions.get_mut(&id) {
                mention.cluster = Some(id);
            }
        }
    }

    /// Merge cluster `from` into cluster `to`: member mentions are
    /// reassigned, attribute sets union (wildcards pruned) when
    /// `config.share_attributes` is on, and the first/representative slots
    /// are re-folded. Merging a cluster into itself is a no-op.
    pub fn merge_clusters(&mut self, to: ClusterId, from: ClusterId, config: &CorefConfig) -> Result<()> {
        if to == from {
            log::debug!("merge of cluster {to} into itself ignored");
            return Ok(());
        }
        if !self.clusters.contains_key(&to) {
            return Err(Error::UnknownCluster(to));
        }
        let source = self
            .clusters
            .remove(&from)
            .ok_or(Error::UnknownCluster(from))?;
        for id in source.members() {
            if let Some(mention) = self.mentions.get_mut(id) {
                mention.cluster = Some(to);
            }
        }
        log::debug!(
            "merging cluster {from} ({} mentions) into cluster {to}",
            source.members().len()
        );
        if let Some(target) = self.clusters.get_mut(&to) {
            target.absorb(source, &self.mentions, config.share_attributes);
        }
        Ok(())
    }

    /// Register a gold cluster. Re-registering an id replaces its members;
    /// duplicate member ids collapse to one entry.
    pub fn add_gold_cluster(&mut self, id: ClusterId, members: &[MentionId]) {
        if let Some(old) = self.gold_clusters.remove(&id) {
            for m in old {
                if self.gold_membership.get(&m) == Some(&id) {
                    self.gold_membership.remove(&m);
                    if let Some(mention) = self.mentions.get_mut(&m) {
                        mention.gold_cluster = None;
                    }
                }
            }
        }
        let mut seen = HashSet::with_capacity(members.len());
        let members: Vec<MentionId> =
            members.iter().copied().filter(|m| seen.insert(*m)).collect();
        for &m in &members {
            self.gold_membership.insert(m, id);
            if let Some(mention) = self.mentions.get_mut(&m) {
                mention.gold_cluster = Some(id);
            }
        }
        self.gold_clusters.insert(id, members);
    }

    /// Gold partition: cluster id to member mention ids.
    #[must_use]
    pub fn gold_clusters(&self) -> &HashMap<ClusterId, Vec<MentionId>> {
        &self.gold_clusters
    }

    /// Gold cluster of a mention id, if the gold partition names it.
    #[must_use]
    pub fn gold_cluster_of(&self, mention: MentionId) -> Option<ClusterId> {
        self.gold_membership.get(&mention).copied()
    }

    /// True when the gold partition names this mention id.
    #[must_use]
    pub fn has_gold_mention(&self, mention: MentionId) -> bool {
        self.gold_membership.contains_key(&mention)
    }

    /// Final assignments and per-cluster representatives, sorted by id for
    /// deterministic output.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        let mut assignments: Vec<(MentionId, ClusterId)> = self
            .mentions
            .values()
            .filter_map(|m| m.cluster.map(|c| (m.id, c)))
            .collect();
        assignments.sort_unstable();
        let mut representatives: Vec<(ClusterId, MentionId)> = self
            .clusters
            .values()
            .filter_map(|c| c.representative().map(|r| (c.id, r)))
            .collect();
        representatives.sort_unstable();
        Resolution {
            assignments,
            representatives,
        }
    }
}

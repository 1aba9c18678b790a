//! Mention model: typed attributes and pairwise compatibility tests.
//!
//! A [`Mention`] is a contiguous token span inside one sentence with a
//! designated head token. Construction copies the span out of the sentence
//! and validates the indices; everything else (attributes, discourse role,
//! governing verb) is filled in by
//! [`AttributeExtractor`](crate::attributes::AttributeExtractor).
//!
//! Attributes are closed enums with an explicit `Unknown` variant. `Unknown`
//! acts as a wildcard in the non-strict agreement tests: an unknown value is
//! compatible with anything, so sparse annotations never veto a merge on
//! their own.
//!
//! The pairwise tests here need no document context. Tests that consult
//! recorded relations, speaker state, or the predicted partition live in
//! [`predicates`](crate::predicates).
//!
//! # Example
//!
//! ```
//! use corefer::document::{Sentence, Token};
//! use corefer::mention::Mention;
//!
//! let sentence = Sentence::new(vec![
//!     Token::new("American", "NNP"),
//!     Token::new("Broadcasting", "NNP"),
//!     Token::new("Company", "NNP"),
//! ]);
//! let long = Mention::new(0, 0, 0, 3, 2, &sentence).unwrap();
//!
//! let abbreviated = Sentence::new(vec![Token::new("ABC", "NNP")]);
//! let short = Mention::new(1, 0, 0, 1, 0, &abbreviated).unwrap();
//!
//! assert!(short.is_acronym(&long));
//! assert_eq!(long.head_string, "company");
//! ```

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterId;
use crate::dictionaries::Dictionaries;
use crate::document::{NodeId, ParseTree, Sentence, Token};
use crate::error::{Error, Result};

/// Identifier of a mention, unique within a document.
pub type MentionId = u64;

// ============================================================================
// Attribute enums
// ============================================================================

/// Surface category of a mention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionKind {
    /// A pronoun, or a one-word span the pronoun inventory recognizes.
    Pronominal,
    /// A named entity or NNP-headed span.
    Proper,
    /// Everything else.
    #[default]
    Nominal,
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Number {
    /// Singular.
    Singular,
    /// Plural.
    Plural,
    /// Not determined; acts as a wildcard in agreement tests.
    #[default]
    Unknown,
}

impl Number {
    /// True for the wildcard value.
    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, Number::Unknown)
    }
}

/// Natural gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Neutral.
    Neutral,
    /// Not determined; acts as a wildcard in agreement tests.
    #[default]
    Unknown,
}

impl Gender {
    /// True for the wildcard value.
    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, Gender::Unknown)
    }
}

/// Animacy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Animacy {
    /// Animate.
    Animate,
    /// Inanimate.
    Inanimate,
    /// Not determined; acts as a wildcard in agreement tests.
    #[default]
    Unknown,
}

impl Animacy {
    /// True for the wildcard value.
    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, Animacy::Unknown)
    }
}

/// Grammatical person, resolved from the pronoun inventories plus number,
/// gender and animacy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Person {
    /// First person singular.
    I,
    /// First person plural.
    We,
    /// Second person.
    You,
    /// Third person male singular.
    He,
    /// Third person female singular.
    She,
    /// Third person neutral or inanimate singular.
    It,
    /// Third person plural.
    They,
    /// Not determined.
    #[default]
    Unknown,
}

impl Person {
    /// True for the wildcard value.
    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, Person::Unknown)
    }
}

/// Grammatical role of a mention relative to its governing verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammaticalRole {
    /// Nominal or clausal subject.
    Subject,
    /// Direct object.
    DirectObject,
    /// Indirect object.
    IndirectObject,
    /// Object of a preposition.
    PrepositionObject,
}

impl GrammaticalRole {
    /// Map a dependency relation label to a role, `None` for labels that
    /// carry no role information.
    #[must_use]
    pub fn from_relation(relation: &str) -> Option<Self> {
        match relation {
            "nsubj" | "csubj" => Some(GrammaticalRole::Subject),
            "dobj" => Some(GrammaticalRole::DirectObject),
            "iobj" => Some(GrammaticalRole::IndirectObject),
            "pobj" => Some(GrammaticalRole::PrepositionObject),
            _ => None,
        }
    }
}

// ============================================================================
// Mention
// ============================================================================

/// One mention: a token span with a head, plus extracted attributes.
///
/// `start..end` and `head_index` index into the owning sentence; `span`
/// holds a copy of the covered tokens so pair tests never reach back into
/// the document. Cluster membership is tracked by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    /// Unique id within the document.
    pub id: MentionId,
    /// Index of the owning sentence.
    pub sentence: usize,
    /// First token index, inclusive.
    pub start: usize,
    /// Last token index, exclusive.
    pub end: usize,
    /// Head token index, within `start..end`.
    pub head_index: usize,
    /// Copy of the covered tokens.
    pub span: Vec<Token>,
    /// Copy of the head token.
    pub head_word: Token,
    /// Lowercased head text, with trailing corporate suffixes stripped for
    /// named entities.
    pub head_string: String,
    /// Surface category.
    pub kind: MentionKind,
    /// NER label of the head, `"O"` when none.
    pub ner: String,
    /// Grammatical number.
    pub number: Number,
    /// Natural gender.
    pub gender: Gender,
    /// Animacy.
    pub animacy: Animacy,
    /// Grammatical person.
    pub person: Person,
    /// Role relative to the governing verb, when one was found.
    pub role: Option<GrammaticalRole>,
    /// Token index of the governing verb in the owning sentence.
    pub governing_verb: Option<usize>,
    /// Utterance index, taken from the head token.
    pub utterance: u32,
    /// Speaker annotation, taken from the head token.
    pub speaker: Option<String>,
    /// Paragraph index, taken from the owning sentence.
    pub paragraph: u32,
    /// Covering phrase node in the sentence's parse tree.
    pub subtree: Option<NodeId>,
    /// Predicted cluster, assigned by the document partition.
    pub cluster: Option<ClusterId>,
    /// Gold cluster, when the gold partition names this mention.
    pub gold_cluster: Option<ClusterId>,
}

impl Mention {
    /// Create a mention over `start..end` of `sentence` with the head at
    /// `head_index`. Fails when the range is empty, exceeds the sentence,
    /// or does not contain the head.
    pub fn new(
        id: MentionId,
        sentence_index: usize,
        start: usize,
        end: usize,
        head_index: usize,
        sentence: &Sentence,
    ) -> Result<Self> {
        if start >= end {
            return Err(Error::invalid_span(format!(
                "empty or reversed token range {start}..{end}"
            )));
        }
        if end > sentence.len() {
            return Err(Error::invalid_span(format!(
                "token range {start}..{end} exceeds sentence length {}",
                sentence.len()
            )));
        }
        if head_index < start || head_index >= end {
            return Err(Error::invalid_span(format!(
                "head index {head_index} outside token range {start}..{end}"
            )));
        }
        let span: Vec<Token> = sentence.tokens[start..end].to_vec();
        let head_word = span[head_index - start].clone();
        let head_string = head_word.text.to_lowercase();
        let subtree = sentence
            .parse
            .as_ref()
            .and_then(|tree| tree.subtree_for_span(start, end));
        Ok(Self {
            id,
            sentence: sentence_index,
            start,
            end,
            head_index,
            utterance: head_word.utterance,
            speaker: head_word.speaker.clone(),
            paragraph: sentence.paragraph,
            span,
            head_string,
            head_word,
            kind: MentionKind::default(),
            ner: "O".to_string(),
            number: Number::default(),
            gender: Gender::default(),
            animacy: Animacy::default(),
            person: Person::default(),
            role: None,
            governing_verb: None,
            subtree,
            cluster: None,
            gold_cluster: None,
        })
    }

    /// True for pronominal mentions.
    #[must_use]
    pub fn is_pronominal(&self) -> bool {
        self.kind == MentionKind::Pronominal
    }

    /// The span as a space-joined string.
    #[must_use]
    pub fn span_text(&self) -> String {
        let words: Vec<&str> = self.span.iter().map(|t| t.text.as_str()).collect();
        words.join(" ")
    }

    fn span_prefix_text(&self, words: usize) -> String {
        let words: Vec<&str> = self.span[..words].iter().map(|t| t.text.as_str()).collect();
        words.join(" ")
    }

    // ========================================================================
    // Document order and representativeness
    // ========================================================================

    /// Strict document order: earlier sentence, then earlier start; at the
    /// same start the longer span counts as earlier.
    #[must_use]
    pub fn appear_earlier_than(&self, other: &Mention) -> bool {
        (self.sentence, self.start, Reverse(self.end))
            < (other.sentence, other.start, Reverse(other.end))
    }

    /// Challenger-versus-incumbent test used when folding a cluster's
    /// representative. Proper mentions beat everything else and nominal
    /// mentions beat pronominal ones; within a kind, more pre-head
    /// modifiers win, then earlier position. Not transitive, so the fold
    /// order is part of the contract; never replace it with a sort.
    #[must_use]
    pub fn more_representative_than(&self, incumbent: Option<&Mention>) -> bool {
        let Some(other) = incumbent else {
            return true;
        };
        if self.kind != other.kind {
            return (self.kind == MentionKind::Proper && other.kind != MentionKind::Proper)
                || (self.kind == MentionKind::Nominal && other.kind == MentionKind::Pronominal);
        }
        if self.head_index - self.start > other.head_index - other.start {
            return true;
        }
        self.sentence < other.sentence
            || (self.sentence == other.sentence && self.head_index < other.head_index)
    }

    // ========================================================================
    // Attribute agreement
    // ========================================================================

    /// Head match, relaxed for same-category named entities: "George"
    /// agrees with "George Bush" when both are tagged the same entity
    /// category and one head is a word (or word prefix) of the other span.
    #[must_use]
    pub fn heads_agree(&self, other: &Mention) -> bool {
        if self.ner != "O"
            && other.ner != "O"
            && self.ner == other.ner
            && (included(&self.head_word, &other.span) || included(&other.head_word, &self.span))
        {
            return true;
        }
        self.head_string == other.head_string
    }

    /// Number agreement; `Unknown` on either side is compatible.
    #[must_use]
    pub fn numbers_agree(&self, other: &Mention) -> bool {
        self.number.is_unknown() || other.number.is_unknown() || self.number == other.number
    }

    /// Gender agreement; `Unknown` on either side is compatible.
    #[must_use]
    pub fn genders_agree(&self, other: &Mention) -> bool {
        self.gender.is_unknown() || other.gender.is_unknown() || self.gender == other.gender
    }

    /// Animacy agreement; `Unknown` on either side is compatible.
    #[must_use]
    pub fn animacies_agree(&self, other: &Mention) -> bool {
        self.animacy.is_unknown() || other.animacy.is_unknown() || self.animacy == other.animacy
    }

    /// NER-category agreement. For a pronominal receiver the antecedent's
    /// category must admit this pronoun according to the per-category
    /// compatibility inventories; hyphenated labels are matched by prefix
    /// against the fine-grained inventories. For everything else, `"O"` on
    /// either side or equal labels agree.
    #[must_use]
    pub fn entity_types_agree(&self, other: &Mention, dict: &Dictionaries) -> bool {
        if self.is_pronominal() {
            if self.ner.contains('-') || other.ner.contains('-') {
                return if other.ner == "O" {
                    true
                } else if other.ner.starts_with("ORG") {
                    dict.organization_pronouns.contains(&self.head_string)
                } else if other.ner.starts_with("PER") {
                    dict.person_pronouns.contains(&self.head_string)
                } else if other.ner.starts_with("LOC") {
                    dict.location_pronouns.contains(&self.head_string)
                } else if other.ner.starts_with("GPE") {
                    dict.gpe_pronouns.contains(&self.head_string)
                } else if other.ner.starts_with("VEH")
                    || other.ner.starts_with("FAC")
                    || other.ner.starts_with("WEA")
                {
                    dict.facility_vehicle_weapon_pronouns.contains(&self.head_string)
                } else {
                    false
                };
            }
            return match other.ner.as_str() {
                "O" | "MISC" => true,
                "ORGANIZATION" => dict.organization_pronouns.contains(&self.head_string),
                "PERSON" => dict.person_pronouns.contains(&self.head_string),
                "LOCATION" => dict.location_pronouns.contains(&self.head_string),
                "DATE" | "TIME" => dict.date_time_pronouns.contains(&self.head_string),
                "MONEY" | "PERCENT" | "NUMBER" => {
                    dict.money_percent_number_pronouns.contains(&self.head_string)
                }
                _ => false,
            };
        }
        self.ner == "O" || other.ner == "O" || self.ner == other.ner
    }

    /// Conjunction of animacy, NER-category, gender and number agreement.
    #[must_use]
    pub fn attributes_agree(&self, other: &Mention, dict: &Dictionaries) -> bool {
        self.animacies_agree(other)
            && self.entity_types_agree(other, dict)
            && self.genders_agree(other)
            && self.numbers_agree(other)
    }

    // ========================================================================
    // Span geometry
    // ========================================================================

    /// True when this mention's phrase node sits under `outer`'s phrase
    /// node in the given parse tree. Requires the same sentence, index
    /// containment, and both subtrees; without a tree the test is false.
    #[must_use]
    pub fn included_in(&self, outer: &Mention, parse: Option<&ParseTree>) -> bool {
        if self.sentence != outer.sentence {
            return false;
        }
        if self.start < outer.start || self.end > outer.end {
            return false;
        }
        match (parse, self.subtree, outer.subtree) {
            (Some(tree), Some(inner), Some(outer_node)) => tree.dominates(outer_node, inner),
            _ => false,
        }
    }

    /// Pure index containment within the same sentence, no tree consulted.
    #[must_use]
    pub fn inside_in(&self, other: &Mention) -> bool {
        self.sentence == other.sentence && other.start <= self.start && self.end <= other.end
    }

    // ========================================================================
    // String-shape tests
    // ========================================================================

    /// Symmetric acronym test: the shorter span must equal the sequence of
    /// ASCII capitals of the longer span, and must not occur verbatim
    /// inside it ("ABC" and "American Broadcasting Company").
    #[must_use]
    pub fn is_acronym(&self, other: &Mention) -> bool {
        let s1 = self.span_text();
        let s2 = other.span_text();
        let (short, long) = if s1.len() > s2.len() { (s2, s1) } else { (s1, s2) };
        let acronym: String = long.chars().filter(char::is_ascii_uppercase).collect();
        acronym == short && !long.contains(short.as_str())
    }

    /// True when this mention is a role phrase opening `other`, as in
    /// "[president] Xyz" against "[president Xyz]": person-or-untagged on
    /// both sides, span prefix, compatible animacy and number, neither
    /// side neutral or a demonym.
    #[must_use]
    pub fn is_role_appositive(&self, other: &Mention, dict: &Dictionaries) -> bool {
        let self_string = self.span_text();
        if self.is_pronominal() || dict.all_pronouns.contains(&self_string.to_lowercase()) {
            return false;
        }
        if !other.ner.starts_with("PER") && other.ner != "O" {
            return false;
        }
        if !self.ner.starts_with("PER") && self.ner != "O" {
            return false;
        }
        let other_string = other.span_text();
        if self.sentence != other.sentence || !other_string.starts_with(&self_string) {
            return false;
        }
        if other_string.contains('\'') || other_string.contains(" and ") {
            return false;
        }
        if !self.animacies_agree(other)
            || self.animacy == Animacy::Inanimate
            || self.gender == Gender::Neutral
            || other.gender == Gender::Neutral
            || !self.numbers_agree(other)
        {
            return false;
        }
        if dict.demonym_set.contains(&self_string.to_lowercase())
            || dict.demonym_set.contains(&other_string.to_lowercase())
        {
            return false;
        }
        true
    }

    /// Demonym relation ("Israel" and "Israeli"), also covering state
    /// abbreviations ("Ala." and "Alabama"). A leading article is ignored.
    #[must_use]
    pub fn is_demonym(&self, other: &Mention, dict: &Dictionaries) -> bool {
        let self_raw = self.span_text();
        let other_raw = other.span_text();
        let self_lower = self_raw.to_lowercase();
        let other_lower = other_raw.to_lowercase();
        let self_string = self_lower.strip_prefix("the ").unwrap_or(&self_lower);
        let other_string = other_lower.strip_prefix("the ").unwrap_or(&other_lower);

        if dict
            .states_abbreviation
            .get(&other_raw)
            .is_some_and(|full| *full == self_raw)
            || dict
                .states_abbreviation
                .get(&self_raw)
                .is_some_and(|full| *full == other_raw)
        {
            return true;
        }

        if let Some(demonyms) = dict.demonyms.get(self_string) {
            if demonyms.contains(other_string) {
                return true;
            }
        } else if let Some(demonyms) = dict.demonyms.get(other_string) {
            if demonyms.contains(self_string) {
                return true;
            }
        }
        false
    }

    /// True when this mention carries a content modifier the antecedent
    /// lacks, or the antecedent carries a directional modifier this
    /// mention lacks. Only applies to same-head pairs.
    #[must_use]
    pub fn have_incompatible_modifier(&self, antecedent: &Mention, dict: &Dictionaries) -> bool {
        if !self.head_string.eq_ignore_ascii_case(&antecedent.head_string) {
            return false;
        }
        let mut self_words: HashSet<String> = HashSet::new();
        for token in &self.span {
            let pos = token.pos.as_str();
            let content = pos.starts_with('N')
                || pos.starts_with("JJ")
                || pos == "CD"
                || pos.starts_with('V');
            let word = token.text.to_lowercase();
            if !content || word == self.head_string {
                continue;
            }
            self_words.insert(word);
        }
        let antecedent_words: HashSet<String> = antecedent
            .span
            .iter()
            .map(|t| t.text.to_lowercase())
            .collect();
        let has_extra = self_words.iter().any(|w| !antecedent_words.contains(w));
        let directional = dict
            .directional_modifiers
            .iter()
            .any(|l| antecedent_words.contains(l) && !self_words.contains(l));
        has_extra || directional
    }

    /// True when the two mentions name distinct locations: any directional
    /// modifier on either side, a state-versus-"country" head, or each
    /// side carrying a location word the other's span lacks.
    #[must_use]
    pub fn have_different_location(&self, antecedent: &Mention, dict: &Dictionaries) -> bool {
        let ant_raw = antecedent.span_text();
        if (dict.states_abbreviation.contains_key(&ant_raw) || dict.is_state_name(&ant_raw))
            && (self.head_string.eq_ignore_ascii_case("country")
                || self.head_string.eq_ignore_ascii_case("nation"))
        {
            return true;
        }

        let self_string = self.span_text().to_lowercase();
        let ant_string = ant_raw.to_lowercase();
        let mut self_locations: Vec<String> = Vec::new();
        let mut ant_locations: Vec<String> = Vec::new();
        for token in &self.span {
            if dict.location_modifiers.contains(&token.text.to_lowercase()) {
                return true;
            }
            if token.ner == "LOCATION" {
                self_locations.push(normalize_state(dict, &token.text));
            }
        }
        for token in &antecedent.span {
            if dict.location_modifiers.contains(&token.text.to_lowercase()) {
                return true;
            }
            if token.ner == "LOCATION" {
                ant_locations.push(normalize_state(dict, &token.text));
            }
        }
        let self_extra = self_locations
            .iter()
            .any(|loc| !ant_string.contains(&loc.to_lowercase()));
        let ant_extra = ant_locations
            .iter()
            .any(|loc| !self_string.contains(&loc.to_lowercase()));
        self_extra && ant_extra
    }

    /// Proper-head match ("George Bush" and "Bush") that vetoes pairs where
    /// both sides carry their own distinct proper pre-modifiers ("George
    /// Bush" against "Jeb Bush").
    #[must_use]
    pub fn same_proper_head_last_word(&self, other: &Mention) -> bool {
        if !self.head_string.eq_ignore_ascii_case(&other.head_string)
            || !self.head_word.pos.starts_with("NNP")
            || !other.head_word.pos.starts_with("NNP")
        {
            return false;
        }
        if !self
            .remove_phrase_after_head()
            .to_lowercase()
            .ends_with(&self.head_string)
            || !other
                .remove_phrase_after_head()
                .to_lowercase()
                .ends_with(&other.head_string)
        {
            return false;
        }
        let self_proper: HashSet<&str> = self.span[..self.head_index - self.start]
            .iter()
            .filter(|t| t.pos.starts_with("NNP"))
            .map(|t| t.text.as_str())
            .collect();
        let other_proper: HashSet<&str> = other.span[..other.head_index - other.start]
            .iter()
            .filter(|t| t.pos.starts_with("NNP"))
            .map(|t| t.text.as_str())
            .collect();
        let self_extra = self_proper.iter().any(|s| !other_proper.contains(s));
        let other_extra = other_proper.iter().any(|s| !self_proper.contains(s));
        !(self_extra && other_extra)
    }

    /// True when this mention introduces a numeric or spelled-out number
    /// word absent from the antecedent's span.
    #[must_use]
    pub fn number_in_later_mention(&self, antecedent: &Mention, dict: &Dictionaries) -> bool {
        let antecedent_words: HashSet<&str> =
            antecedent.span.iter().map(|t| t.text.as_str()).collect();
        for token in &self.span {
            let word = token.text.as_str();
            if word.parse::<f64>().is_ok() {
                if !antecedent_words.contains(word) {
                    return true;
                }
            } else if dict.number_words.contains(&word.to_lowercase())
                && !antecedent_words.contains(word)
            {
                return true;
            }
        }
        false
    }

    /// True when both spans carry a proper noun that neither occurs in the
    /// other's text nor is excepted (for alias-driven exceptions).
    #[must_use]
    pub fn have_extra_proper_noun(&self, other: &Mention, except: &HashSet<String>) -> bool {
        let self_string = self.span_text();
        let other_string = other.span_text();
        let self_proper: Vec<&str> = self
            .span
            .iter()
            .filter(|t| t.pos.starts_with("NNP"))
            .map(|t| t.text.as_str())
            .collect();
        let other_proper: Vec<&str> = other
            .span
            .iter()
            .filter(|t| t.pos.starts_with("NNP"))
            .map(|t| t.text.as_str())
            .collect();
        let self_extra = self_proper
            .iter()
            .any(|s| !other_string.contains(s) && !except.contains(&s.to_lowercase()));
        let other_extra = other_proper
            .iter()
            .any(|s| !self_string.contains(s) && !except.contains(&s.to_lowercase()));
        self_extra && other_extra
    }

    // ========================================================================
    // Search-term extraction
    // ========================================================================

    /// The span truncated before the first comma or WH-clause following the
    /// head; the full span when neither occurs; empty when the head itself
    /// falls after the cut point.
    #[must_use]
    pub fn remove_phrase_after_head(&self) -> String {
        let mut pos_comma = None;
        let mut pos_wh = None;
        for (i, token) in self.span.iter().enumerate() {
            if pos_comma.is_none() && token.pos == "," {
                pos_comma = Some(self.start + i);
            }
            if pos_wh.is_none() && token.pos.starts_with('W') {
                pos_wh = Some(self.start + i);
            }
        }
        match (pos_comma, pos_wh) {
            (Some(comma), _) if self.head_index < comma => self.span_prefix_text(comma - self.start),
            (None, Some(wh)) if self.head_index < wh => self.span_prefix_text(wh - self.start),
            (None, None) => self.span_text(),
            _ => String::new(),
        }
    }

    /// Longest run of NNP-tagged words ending at the head, in surface
    /// order; empty when the head itself is not NNP-tagged.
    #[must_use]
    pub fn longest_nnp_ends_with_head(&self) -> String {
        let mut words: Vec<&str> = Vec::new();
        let mut i = self.head_index;
        loop {
            let token = &self.span[i - self.start];
            if !token.pos.starts_with("NNP") {
                break;
            }
            words.push(token.text.as_str());
            if i == self.start {
                break;
            }
            i -= 1;
        }
        words.reverse();
        words.join(" ")
    }

    /// Text of the lowest NP above the head leaf in the sentence's parse
    /// tree. Falls back to the head word when the phrase escapes the span,
    /// and to an empty string without a usable tree.
    #[must_use]
    pub fn lowest_np_includes_head(&self, sentence: &Sentence) -> String {
        let Some(tree) = sentence.parse.as_ref() else {
            return String::new();
        };
        let Some(head_leaf) = tree.leaf(self.head_index) else {
            return String::new();
        };
        let mut node = head_leaf;
        loop {
            let label = tree.label(node);
            if label == "NP" || label == "ROOT" {
                break;
            }
            match tree.parent(node) {
                Some(parent) => node = parent,
                None => return String::new(),
            }
        }
        if tree.label(node) == "ROOT" {
            node = head_leaf;
        }
        let words: Vec<&str> = tree
            .leaves_under(node)
            .into_iter()
            .filter_map(|t| sentence.tokens.get(t))
            .map(|t| t.text.as_str())
            .collect();
        let text = words.join(" ");
        if !self.span_text().contains(&text) {
            return self.head_word.text.clone();
        }
        text
    }

    /// Deduplicated lookup strings for semantic backends, most specific
    /// first. A state abbreviation span short-circuits to the full state
    /// name; otherwise candidates are the comma-truncated span, the lowest
    /// covering NP, the NNP run, and the bare head, each with a leading
    /// article stripped; the bare head is dropped when an NNP run exists.
    #[must_use]
    pub fn search_terms(&self, sentence: &Sentence, dict: &Dictionaries) -> Vec<String> {
        let span = self.span_text();
        if let Some(full_name) = dict.states_abbreviation.get(&span) {
            return vec![full_name.clone()];
        }
        let nnp_run = strip_article(&self.longest_nnp_ends_with_head()).to_string();
        let candidates = [
            strip_article(&self.remove_phrase_after_head()).to_string(),
            strip_article(&self.lowest_np_includes_head(sentence)).to_string(),
            nnp_run.clone(),
            self.head_string.clone(),
        ];
        let mut terms: Vec<String> = Vec::new();
        for term in candidates {
            if term.is_empty() || terms.contains(&term) {
                continue;
            }
            if term == self.head_string && !nnp_run.is_empty() {
                continue;
            }
            terms.push(term);
        }
        terms
    }

    /// True for a two-word "the <noun>" nominal.
    #[must_use]
    pub fn is_the_common_noun(&self) -> bool {
        self.kind == MentionKind::Nominal
            && self.span_text().to_lowercase().starts_with("the ")
            && self.span.len() == 2
    }
}

/// Word-level inclusion for named-entity heads: the head must be NNP and
/// must equal, or be a longer-than-two-character prefix of, some word of
/// the other span.
fn included(head: &Token, span: &[Token]) -> bool {
    if head.pos != "NNP" {
        return false;
    }
    span.iter().any(|w| {
        w.text == head.text || (head.text.len() > 2 && w.text.starts_with(&head.text))
    })
}

fn normalize_state(dict: &Dictionaries, word: &str) -> String {
    dict.states_abbreviation
        .get(word)
        .cloned()
        .unwrap_or_else(|| word.to_string())
}

fn strip_article(text: &str) -> &str {
    for article in ["a ", "A ", "an ", "An ", "the ", "The "] {
        if let Some(rest) = text.strip_prefix(article) {
            return rest;
        }
    }
    text
}

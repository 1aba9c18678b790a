//! Deterministic mention attribute extraction.
//!
//! [`AttributeExtractor`] fills in everything a registered mention needs
//! before pair tests run: the normalized head string, the surface category,
//! the NER label, and the number/gender/animacy/person attributes, plus the
//! grammatical role and governing verb read off the dependency graph. The
//! passes run in a fixed order because later passes read earlier results
//! (person reads number, gender and animacy; gender reads number).
//!
//! Extraction is infallible. Words missing from every inventory come out as
//! `Unknown`, which the agreement tests treat as a wildcard, so a sparse
//! [`Dictionaries`] degrades recall rather than failing.
//!
//! # Example
//!
//! ```
//! use corefer::attributes::{AttributeExtractor, CorefConfig};
//! use corefer::dictionaries::Dictionaries;
//! use corefer::document::{Sentence, Token};
//! use corefer::mention::{Mention, MentionKind, Number};
//!
//! let dict = Dictionaries::default();
//! let extractor = AttributeExtractor::new(&dict, CorefConfig::default());
//!
//! let sentence = Sentence::new(vec![Token::new("they", "PRP")]);
//! let mut mention = Mention::new(0, 0, 0, 1, 0, &sentence).unwrap();
//! extractor.extract(&mut mention, &sentence);
//!
//! assert_eq!(mention.kind, MentionKind::Pronominal);
//! assert_eq!(mention.number, Number::Plural);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dictionaries::{Dictionaries, GenderCounts};
use crate::document::Sentence;
use crate::mention::{Animacy, Gender, GrammaticalRole, Mention, MentionKind, Number, Person};

// ============================================================================
// Configuration
// ============================================================================

/// Switches controlling attribute extraction and cluster merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorefConfig {
    /// Union attribute sets when clusters merge.
    pub share_attributes: bool,
    /// Consult the gender word lists for non-pronominal mentions.
    pub use_gender_list: bool,
    /// Consult the number word lists for non-pronominal mentions.
    pub use_number_list: bool,
    /// Consult the animacy word lists for non-pronominal mentions.
    pub use_animacy_list: bool,
}

impl Default for CorefConfig {
    fn default() -> Self {
        Self {
            share_attributes: true,
            use_gender_list: true,
            use_number_list: true,
            use_animacy_list: true,
        }
    }
}

impl CorefConfig {
    /// Toggle attribute sharing on merge.
    #[must_use]
    pub fn with_share_attributes(mut self, on: bool) -> Self {
        self.share_attributes = on;
        self
    }

    /// Toggle the gender word lists.
    #[must_use]
    pub fn with_gender_list(mut self, on: bool) -> Self {
        self.use_gender_list = on;
        self
    }

    /// Toggle the number word lists.
    #[must_use]
    pub fn with_number_list(mut self, on: bool) -> Self {
        self.use_number_list = on;
        self
    }

    /// Toggle the animacy word lists.
    #[must_use]
    pub fn with_animacy_list(mut self, on: bool) -> Self {
        self.use_animacy_list = on;
        self
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Runs the attribute passes over one mention at a time.
#[derive(Debug, Clone)]
pub struct AttributeExtractor<'d> {
    dict: &'d Dictionaries,
    config: CorefConfig,
}

impl<'d> AttributeExtractor<'d> {
    /// Create an extractor over the given inventories.
    #[must_use]
    pub fn new(dict: &'d Dictionaries, config: CorefConfig) -> Self {
        Self { dict, config }
    }

    /// Fill in every derived field of `mention`. The sentence must be the
    /// one the mention was created over.
    pub fn extract(&self, mention: &mut Mention, sentence: &Sentence) {
        self.set_head_string(mention);
        self.set_kind(mention);
        self.set_ner(mention);
        let counts = self.gender_counts(mention);
        self.set_number(mention);
        self.set_gender(mention, counts);
        self.set_animacy(mention);
        self.set_person(mention);
        self.set_discourse(mention, sentence);
    }

    /// Lowercase the head; for named entities, back off over trailing
    /// corporate suffixes so "Apple Inc." heads as "apple".
    fn set_head_string(&self, mention: &mut Mention) {
        let mut head_string = mention.head_word.text.to_lowercase();
        if mention.head_word.ner != "O" {
            let mut index = mention.head_index - mention.start;
            loop {
                let candidate = &mention.span[index].text;
                if !self.dict.is_corporate_suffix(candidate) {
                    head_string = candidate.to_lowercase();
                    break;
                }
                if index == 0 {
                    break;
                }
                index -= 1;
            }
        }
        mention.head_string = head_string;
    }

    /// Surface category. A gold entity-type annotation wins; otherwise a
    /// PRP tag or a one-word untagged pronoun is pronominal, and an NER
    /// label or NNP tag is proper.
    fn set_kind(&self, mention: &mut Mention) {
        if let Some(entity_type) = mention.head_word.entity_type.as_deref() {
            mention.kind = match entity_type {
                "PRO" => MentionKind::Pronominal,
                "NAM" => MentionKind::Proper,
                _ => MentionKind::Nominal,
            };
            return;
        }
        let pos = mention.head_word.pos.as_str();
        if pos.starts_with("PRP")
            || (mention.span.len() == 1
                && mention.head_word.ner == "O"
                && (self.dict.all_pronouns.contains(&mention.head_string)
                    || self.dict.relative_pronouns.contains(&mention.head_string)))
        {
            mention.kind = MentionKind::Pronominal;
        } else if mention.head_word.ner != "O" || pos.starts_with("NNP") {
            mention.kind = MentionKind::Proper;
        } else {
            mention.kind = MentionKind::Nominal;
        }
    }

    /// NER label of the head. Under a gold entity-type annotation only
    /// names keep their label.
    fn set_ner(&self, mention: &mut Mention) {
        mention.ner = match mention.head_word.entity_type.as_deref() {
            Some("NAM") | None => mention.head_word.ner.clone(),
            Some(_) => "O".to_string(),
        };
    }

    /// Census-count lookup over the tokens up to the head. Person names
    /// back off through suffixes of the name, then the first-name slot
    /// (skipping a middle initial); everything else backs off through
    /// suffixes, then a head-only wildcard key.
    fn gender_counts(&self, mention: &Mention) -> Option<GenderCounts> {
        let head_offset = mention.head_index - mention.start;
        let words: Vec<String> = mention.span[..=head_offset]
            .iter()
            .map(|t| t.text.to_lowercase())
            .collect();
        let len = words.len();
        let head_capitalized = mention
            .head_word
            .text
            .chars()
            .next()
            .is_some_and(char::is_uppercase);

        if len > 1 && head_capitalized && mention.ner.starts_with("PER") {
            let mut first_name_index = len - 2;
            let second_to_last = &words[first_name_index];
            if first_name_index > 1
                && (second_to_last.len() == 1
                    || (second_to_last.len() == 2 && second_to_last.ends_with('.')))
            {
                first_name_index -= 1;
            }
            for i in 0..=first_name_index {
                if let Some(counts) = self.dict.gender_counts(&words[i..]) {
                    return Some(counts);
                }
            }
            let first_name = words[first_name_index].clone();
            if let Some(counts) = self
                .dict
                .gender_counts(&[first_name.clone(), "!".to_string()])
            {
                return Some(counts);
            }
            if let Some(counts) = self.dict.gender_counts(&[first_name]) {
                return Some(counts);
            }
        }

        if len > 1 {
            for i in 0..len - 1 {
                if let Some(counts) = self.dict.gender_counts(&words[i..]) {
                    return Some(counts);
                }
            }
            let last = words[len - 1].clone();
            if let Some(counts) = self.dict.gender_counts(&["!".to_string(), last]) {
                return Some(counts);
            }
        }
        self.dict.gender_counts(&words[len - 1..])
    }

    fn set_number(&self, mention: &mut Mention) {
        if mention.is_pronominal() {
            mention.number = if self.dict.plural_pronouns.contains(&mention.head_string) {
                Number::Plural
            } else if self.dict.singular_pronouns.contains(&mention.head_string) {
                Number::Singular
            } else {
                Number::Unknown
            };
        } else if mention.ner != "O" && mention.kind != MentionKind::Nominal {
            // organizations can act as both singular and plural
            mention.number =
                if mention.ner == "ORGANIZATION" || mention.ner.starts_with("ORG") {
                    Number::Unknown
                } else {
                    Number::Singular
                };
        } else {
            let pos = mention.head_word.pos.as_str();
            mention.number = if pos.starts_with('N') && pos.ends_with('S') {
                Number::Plural
            } else if pos.starts_with('N') {
                Number::Singular
            } else {
                Number::Unknown
            };
        }
        if !mention.is_pronominal()
            && self.config.use_number_list
            && mention.number == Number::Unknown
        {
            if self.dict.singular_words.contains(&mention.head_string) {
                mention.number = Number::Singular;
            } else if self.dict.plural_words.contains(&mention.head_string) {
                mention.number = Number::Plural;
            }
        }
    }

    /// Pronouns resolve through the gender inventories; everything else
    /// through the word lists, with census counts overriding when decisive
    /// and the mention is not plural.
    fn set_gender(&self, mention: &mut Mention, counts: Option<GenderCounts>) {
        mention.gender = Gender::Unknown;
        if mention.is_pronominal() {
            if self.dict.male_pronouns.contains(&mention.head_string) {
                mention.gender = Gender::Male;
            } else if self.dict.female_pronouns.contains(&mention.head_string) {
                mention.gender = Gender::Female;
            }
            return;
        }
        if self.config.use_gender_list {
            if self.dict.male_words.contains(&mention.head_string) {
                mention.gender = Gender::Male;
            } else if self.dict.female_words.contains(&mention.head_string) {
                mention.gender = Gender::Female;
            } else if self.dict.neutral_words.contains(&mention.head_string) {
                mention.gender = Gender::Neutral;
            }
        }
        if mention.number != Number::Plural {
            if let Some(counts) = counts {
                let male = f64::from(counts.male);
                let female = f64::from(counts.female);
                let neutral = f64::from(counts.neutral);
                if male * 0.5 > female + neutral && male > 2.0 {
                    mention.gender = Gender::Male;
                } else if female * 0.5 > male + neutral && female > 2.0 {
                    mention.gender = Gender::Female;
                } else if neutral * 0.5 > male + female && neutral > 2.0 {
                    mention.gender = Gender::Neutral;
                }
            }
        }
    }

    fn set_animacy(&self, mention: &mut Mention) {
        if mention.is_pronominal() {
            mention.animacy = if self.dict.animate_pronouns.contains(&mention.head_string) {
                Animacy::Animate
            } else if self.dict.inanimate_pronouns.contains(&mention.head_string) {
                Animacy::Inanimate
            } else {
                Animacy::Unknown
            };
        } else {
            let ner = mention.ner.as_str();
            mention.animacy = if ner == "PERSON" || ner.starts_with("PER") {
                Animacy::Animate
            } else if ner == "LOCATION"
                || ner.starts_with("LOC")
                || ner == "MONEY"
                || ner == "NUMBER"
                || ner == "PERCENT"
                || ner == "DATE"
                || ner == "TIME"
            {
                Animacy::Inanimate
            } else if ner == "MISC" || ner.starts_with("VEH") {
                Animacy::Unknown
            } else if ner.starts_with("FAC") || ner.starts_with("GPE") || ner.starts_with("WEA")
                || ner.starts_with("ORG")
            {
                Animacy::Inanimate
            } else {
                Animacy::Unknown
            };
        }
        if !mention.is_pronominal()
            && self.config.use_animacy_list
            && mention.animacy == Animacy::Unknown
        {
            if self.dict.animate_words.contains(&mention.head_string) {
                mention.animacy = Animacy::Animate;
            } else if self.dict.inanimate_words.contains(&mention.head_string) {
                mention.animacy = Animacy::Inanimate;
            }
        }
    }

    /// Person from the full lowercased span. The lookup also runs for
    /// non-pronominal mentions, covering pronoun spans that got another
    /// category.
    fn set_person(&self, mention: &mut Mention) {
        let span = mention.span_text().to_lowercase();
        mention.person = if self.dict.first_person_pronouns.contains(&span) {
            match mention.number {
                Number::Singular => Person::I,
                Number::Plural => Person::We,
                Number::Unknown => Person::Unknown,
            }
        } else if self.dict.second_person_pronouns.contains(&span) {
            Person::You
        } else if self.dict.third_person_pronouns.contains(&span) {
            if mention.gender == Gender::Male && mention.number == Number::Singular {
                Person::He
            } else if mention.gender == Gender::Female && mention.number == Number::Singular {
                Person::She
            } else if (mention.gender == Gender::Neutral
                || mention.animacy == Animacy::Inanimate)
                && mention.number == Number::Singular
            {
                Person::It
            } else if mention.number == Number::Plural {
                Person::They
            } else {
                Person::Unknown
            }
        } else {
            Person::Unknown
        };
    }

    /// Grammatical role and governing verb, walking governor edges up from
    /// the head until a verb (or the top) is reached. The recorded relation
    /// is the first edge seen anywhere on the walk. A revisited node stops
    /// the walk with no verb.
    fn set_discourse(&self, mention: &mut Mention, sentence: &Sentence) {
        let graph = &sentence.dependencies;
        let mut relation: Option<&str> = None;
        let mut verb: Option<usize> = None;
        let mut current = mention.head_index;
        let mut visited: HashSet<usize> = HashSet::new();
        loop {
            if !visited.insert(current) {
                break;
            }
            let mut parent: Option<usize> = None;
            for (rel, governor) in graph.governors(current) {
                if relation.is_none() {
                    relation = Some(rel);
                }
                parent = Some(governor);
            }
            let Some(p) = parent else {
                break;
            };
            match sentence.tokens.get(p) {
                None => break,
                Some(token) if token.pos.starts_with('V') => {
                    verb = Some(p);
                    break;
                }
                Some(_) => {
                    if p == current {
                        break;
                    }
                    current = p;
                }
            }
        }
        mention.role = relation.and_then(GrammaticalRole::from_relation);
        mention.governing_verb = verb;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DependencyGraph, Token};

    fn extract(dict: &Dictionaries, sentence: &Sentence, start: usize, end: usize, head: usize) -> Mention {
        let extractor = AttributeExtractor::new(dict, CorefConfig::default());
        let mut mention = Mention::new(0, 0, start, end, head, sentence).unwrap();
        extractor.extract(&mut mention, sentence);
        mention
    }

    fn one_word(dict: &Dictionaries, text: &str, pos: &str) -> Mention {
        let sentence = Sentence::new(vec![Token::new(text, pos)]);
        extract(dict, &sentence, 0, 1, 0)
    }

    #[test]
    fn test_config_builders() {
        let config = CorefConfig::default()
            .with_share_attributes(false)
            .with_gender_list(false);
        assert!(!config.share_attributes);
        assert!(!config.use_gender_list);
        assert!(config.use_number_list, "untouched switches keep defaults");
        assert!(config.use_animacy_list);
    }

    #[test]
    fn test_head_string_skips_corporate_suffix() {
        let dict = Dictionaries::default();
        let sentence = Sentence::new(vec![
            Token::new("Apple", "NNP").with_ner("ORGANIZATION"),
            Token::new("Inc.", "NNP").with_ner("ORGANIZATION"),
        ]);
        let mention = extract(&dict, &sentence, 0, 2, 1);
        assert_eq!(mention.head_string, "apple");

        let all_suffix = Sentence::new(vec![Token::new("Corp.", "NNP").with_ner("ORGANIZATION")]);
        let mention = extract(&dict, &all_suffix, 0, 1, 0);
        assert_eq!(mention.head_string, "corp.", "an all-suffix span keeps its head");

        let untagged = Sentence::new(vec![
            Token::new("Apple", "NNP"),
            Token::new("Inc.", "NNP"),
        ]);
        let mention = extract(&dict, &untagged, 0, 2, 1);
        assert_eq!(mention.head_string, "inc.", "suffix backoff only fires for entities");
    }

    #[test]
    fn test_kind_assignment() {
        let dict = Dictionaries::default();
        assert_eq!(one_word(&dict, "he", "PRP").kind, MentionKind::Pronominal);
        assert_eq!(one_word(&dict, "who", "WP").kind, MentionKind::Pronominal);
        assert_eq!(one_word(&dict, "Obama", "NNP").kind, MentionKind::Proper);
        assert_eq!(one_word(&dict, "dog", "NN").kind, MentionKind::Nominal);

        let tagged = Sentence::new(vec![Token::new("committee", "NN").with_ner("ORGANIZATION")]);
        assert_eq!(
            extract(&dict, &tagged, 0, 1, 0).kind,
            MentionKind::Proper,
            "an NER label makes a common noun proper"
        );

        let long_pronoun_span = Sentence::new(vec![
            Token::new("it", "PRP"),
            Token::new("all", "DT"),
        ]);
        assert_eq!(
            extract(&dict, &long_pronoun_span, 0, 2, 0).kind,
            MentionKind::Pronominal,
            "a PRP head stays pronominal regardless of span length"
        );
    }

    #[test]
    fn test_kind_and_ner_from_gold_entity_type() {
        let dict = Dictionaries::default();
        let named = Sentence::new(vec![
            Token::new("Obama", "NNP").with_ner("PERSON").with_entity_type("NAM"),
        ]);
        let mention = extract(&dict, &named, 0, 1, 0);
        assert_eq!(mention.kind, MentionKind::Proper);
        assert_eq!(mention.ner, "PERSON", "names keep their label");

        let nominal = Sentence::new(vec![
            Token::new("president", "NN").with_ner("PERSON").with_entity_type("NOM"),
        ]);
        let mention = extract(&dict, &nominal, 0, 1, 0);
        assert_eq!(mention.kind, MentionKind::Nominal);
        assert_eq!(mention.ner, "O", "non-name annotations drop the label");

        let pronoun = Sentence::new(vec![
            Token::new("he", "PRP").with_entity_type("PRO"),
        ]);
        assert_eq!(extract(&dict, &pronoun, 0, 1, 0).kind, MentionKind::Pronominal);
    }

    #[test]
    fn test_number_assignment() {
        let dict = Dictionaries::default();
        assert_eq!(one_word(&dict, "they", "PRP").number, Number::Plural);
        assert_eq!(one_word(&dict, "it", "PRP").number, Number::Singular);
        assert_eq!(one_word(&dict, "dogs", "NNS").number, Number::Plural);
        assert_eq!(one_word(&dict, "dog", "NN").number, Number::Singular);
        assert_eq!(one_word(&dict, "red", "JJ").number, Number::Unknown);

        let org = Sentence::new(vec![Token::new("IBM", "NNP").with_ner("ORGANIZATION")]);
        assert_eq!(
            extract(&dict, &org, 0, 1, 0).number,
            Number::Unknown,
            "organizations can act as both singular and plural"
        );
        let person = Sentence::new(vec![Token::new("Obama", "NNP").with_ner("PERSON")]);
        assert_eq!(extract(&dict, &person, 0, 1, 0).number, Number::Singular);
    }

    #[test]
    fn test_number_word_list_backoff() {
        let mut dict = Dictionaries::default();
        dict.singular_words.insert("sheep".to_string());
        let mention = one_word(&dict, "sheep", "JJ");
        assert_eq!(mention.number, Number::Singular, "word list resolves unknowns");

        let off = AttributeExtractor::new(&dict, CorefConfig::default().with_number_list(false));
        let sentence = Sentence::new(vec![Token::new("sheep", "JJ")]);
        let mut mention = Mention::new(0, 0, 0, 1, 0, &sentence).unwrap();
        off.extract(&mut mention, &sentence);
        assert_eq!(mention.number, Number::Unknown);
    }

    #[test]
    fn test_gender_assignment() {
        let dict = Dictionaries::default();
        assert_eq!(one_word(&dict, "he", "PRP").gender, Gender::Male);
        assert_eq!(one_word(&dict, "she", "PRP").gender, Gender::Female);
        assert_eq!(one_word(&dict, "it", "PRP").gender, Gender::Unknown);

        let mut listed = Dictionaries::default();
        listed.female_words.insert("actress".to_string());
        assert_eq!(one_word(&listed, "actress", "NN").gender, Gender::Female);
    }

    #[test]
    fn test_gender_counts_override_lists() {
        let mut dict = Dictionaries::default();
        dict.neutral_words.insert("pat".to_string());
        dict.add_gender_counts(&["pat"], GenderCounts::new(100, 3, 2));
        let sentence = Sentence::new(vec![Token::new("Pat", "NNP").with_ner("PERSON")]);
        let mention = extract(&dict, &sentence, 0, 1, 0);
        assert_eq!(mention.gender, Gender::Male, "decisive counts beat the word lists");

        // indecisive counts leave the list result in place
        let mut close = Dictionaries::default();
        close.neutral_words.insert("pat".to_string());
        close.add_gender_counts(&["pat"], GenderCounts::new(5, 4, 3));
        let mention = extract(&close, &sentence, 0, 1, 0);
        assert_eq!(mention.gender, Gender::Neutral);
    }

    #[test]
    fn test_gender_counts_person_name_backoff() {
        let mut dict = Dictionaries::default();
        dict.add_gender_counts(&["john", "!"], GenderCounts::new(500, 5, 5));
        let sentence = Sentence::new(vec![
            Token::new("John", "NNP").with_ner("PERSON"),
            Token::new("Quixote", "NNP").with_ner("PERSON"),
        ]);
        let mention = extract(&dict, &sentence, 0, 2, 1);
        assert_eq!(
            mention.gender,
            Gender::Male,
            "the first-name slot resolves unseen full names"
        );

        // a middle initial right before the surname is skipped when
        // locating the first-name slot
        let mut tolkien = Dictionaries::default();
        tolkien.add_gender_counts(&["ronald", "!"], GenderCounts::new(400, 4, 4));
        let initials = Sentence::new(vec![
            Token::new("John", "NNP").with_ner("PERSON"),
            Token::new("Ronald", "NNP").with_ner("PERSON"),
            Token::new("R.", "NNP").with_ner("PERSON"),
            Token::new("Tolkien", "NNP").with_ner("PERSON"),
        ]);
        let mention = extract(&tolkien, &initials, 0, 4, 3);
        assert_eq!(mention.gender, Gender::Male);
    }

    #[test]
    fn test_animacy_assignment() {
        let dict = Dictionaries::default();
        assert_eq!(one_word(&dict, "he", "PRP").animacy, Animacy::Animate);
        assert_eq!(one_word(&dict, "it", "PRP").animacy, Animacy::Inanimate);

        for (ner, expected) in [
            ("PERSON", Animacy::Animate),
            ("LOCATION", Animacy::Inanimate),
            ("MONEY", Animacy::Inanimate),
            ("DATE", Animacy::Inanimate),
            ("MISC", Animacy::Unknown),
            ("VEH-A", Animacy::Unknown),
            ("GPE-B", Animacy::Inanimate),
            ("ORGANIZATION", Animacy::Inanimate),
        ] {
            let sentence = Sentence::new(vec![Token::new("x", "NNP").with_ner(ner)]);
            assert_eq!(
                extract(&dict, &sentence, 0, 1, 0).animacy,
                expected,
                "animacy for NER label {ner}"
            );
        }

        let mut listed = Dictionaries::default();
        listed.animate_words.insert("dog".to_string());
        assert_eq!(one_word(&listed, "dog", "NN").animacy, Animacy::Animate);
    }

    #[test]
    fn test_person_assignment() {
        let dict = Dictionaries::default();
        assert_eq!(one_word(&dict, "i", "PRP").person, Person::I);
        assert_eq!(one_word(&dict, "we", "PRP").person, Person::We);
        assert_eq!(one_word(&dict, "you", "PRP").person, Person::You);
        assert_eq!(one_word(&dict, "he", "PRP").person, Person::He);
        assert_eq!(one_word(&dict, "she", "PRP").person, Person::She);
        assert_eq!(one_word(&dict, "it", "PRP").person, Person::It);
        assert_eq!(one_word(&dict, "they", "PRP").person, Person::They);
        assert_eq!(one_word(&dict, "dog", "NN").person, Person::Unknown);
    }

    #[test]
    fn test_discourse_role_and_verb() {
        let dict = Dictionaries::default();
        let sentence = Sentence::new(vec![
            Token::new("John", "NNP"),
            Token::new("saw", "VBD"),
            Token::new("Mary", "NNP"),
        ])
        .with_dependencies(
            DependencyGraph::new()
                .with_edge("nsubj", 1, 0)
                .with_edge("dobj", 1, 2),
        );

        let subject = extract(&dict, &sentence, 0, 1, 0);
        assert_eq!(subject.role, Some(GrammaticalRole::Subject));
        assert_eq!(subject.governing_verb, Some(1));

        let object = extract(&dict, &sentence, 2, 3, 2);
        assert_eq!(object.role, Some(GrammaticalRole::DirectObject));
        assert_eq!(object.governing_verb, Some(1));
    }

    #[test]
    fn test_discourse_walks_through_non_verbs() {
        let dict = Dictionaries::default();
        // "brother of John": John -> brother (prep), brother -> left (nsubj)
        let sentence = Sentence::new(vec![
            Token::new("brother", "NN"),
            Token::new("of", "IN"),
            Token::new("John", "NNP"),
            Token::new("left", "VBD"),
        ])
        .with_dependencies(
            DependencyGraph::new()
                .with_edge("pobj", 0, 2)
                .with_edge("nsubj", 3, 0),
        );
        let mention = extract(&dict, &sentence, 2, 3, 2);
        assert_eq!(mention.role, Some(GrammaticalRole::PrepositionObject));
        assert_eq!(mention.governing_verb, Some(3), "the walk climbs to the verb");
    }

    #[test]
    fn test_discourse_cycle_stops() {
        let dict = Dictionaries::default();
        let sentence = Sentence::new(vec![
            Token::new("a", "NN"),
            Token::new("b", "NN"),
        ])
        .with_dependencies(
            DependencyGraph::new()
                .with_edge("conj", 1, 0)
                .with_edge("conj", 0, 1),
        );
        let mention = extract(&dict, &sentence, 0, 1, 0);
        assert_eq!(mention.governing_verb, None, "a governor cycle yields no verb");
        assert_eq!(mention.role, None, "conj carries no role");
    }
}

//! Compatibility predicates over mention pairs and clusters.
//!
//! These are the merge tests a deterministic resolution pass runs between a
//! mention's current cluster and a potential antecedent's cluster. Pure
//! pair tests that need no document context live on [`Mention`]; everything
//! here consults aggregated cluster state, the relation registry, speaker
//! state, or the predicted partition, and therefore takes the owning
//! [`Document`].
//!
//! | Group | Predicates |
//! |-------|------------|
//! | attribute agreement | [`attributes_agree`] |
//! | string matching | [`exact_string_match`], [`relaxed_exact_string_match`], [`words_included`], [`heads_agree`], [`relaxed_heads_agree`] |
//! | structural relations | [`is_apposition`], [`is_predicate_nominative`], [`is_relative_pronoun`], [`is_role_appositive`], [`i_within_i`] |
//! | quantified vetoes | [`any_i_within_i`], [`any_person_disagree`], [`any_incompatible_modifier`] |
//! | quantified matches | [`any_acronym`], [`any_same_proper_head_last_word`] |
//! | discourse | [`is_speaker`], [`same_speaker`], [`person_disagree`], [`subject_object`] |
//! | cluster shape | [`is_single_pronoun_cluster`], [`both_have_proper`] |
//! | semantics | [`alias`] |
//!
//! Throughout, the first cluster argument is the mention's cluster and the
//! second the potential antecedent's. Malformed discourse state (speaker
//! annotations that resolve to nothing, missing utterance entries) makes
//! the disagreement tests answer conservatively rather than fail.

use std::collections::HashSet;

use crate::cluster::{Attribute, AttributeSet, Cluster};
use crate::dictionaries::Dictionaries;
use crate::document::Document;
use crate::mention::{GrammaticalRole, Mention, MentionId, MentionKind, Person};
use crate::semantics::Semantics;

// ============================================================================
// Attribute agreement
// ============================================================================

/// One attribute's veto test: each side only counts "extra" values when its
/// own set carries no wildcard, and the pair fails only when both sides
/// have extras.
fn attribute_sets_agree<T: Attribute>(mc: &AttributeSet<T>, pa: &AttributeSet<T>) -> bool {
    let extra_ant =
        !mc.has_wildcard() && pa.iter().any(|v| !v.is_wildcard() && !mc.contains(v));
    let extra_this =
        !pa.has_wildcard() && mc.iter().any(|v| !v.is_wildcard() && !pa.contains(v));
    !(extra_ant && extra_this)
}

/// Cluster-level attribute agreement over numbers, genders, animacies and
/// NER labels, each vetoing independently.
#[must_use]
pub fn attributes_agree(mc: &Cluster, pa: &Cluster) -> bool {
    attribute_sets_agree(&mc.numbers, &pa.numbers)
        && attribute_sets_agree(&mc.genders, &pa.genders)
        && attribute_sets_agree(&mc.animacies, &pa.animacies)
        && attribute_sets_agree(&mc.ner_labels, &pa.ner_labels)
}

// ============================================================================
// String matching
// ============================================================================

/// True when some non-pronominal member pair matches on the full span,
/// allowing a trailing possessive marker on either side. A role-phrase
/// member in the mention's cluster vetoes the whole test.
#[must_use]
pub fn exact_string_match(doc: &Document, mc: &Cluster, pa: &Cluster, dict: &Dictionaries) -> bool {
    let mut matched = false;
    for m in doc.cluster_mentions(mc) {
        if doc.relations.is_role(m.id) {
            return false;
        }
        let m_span = m.span_text().to_lowercase();
        for ant in doc.cluster_mentions(pa) {
            let ant_span = ant.span_text().to_lowercase();
            if m.is_pronominal()
                || ant.is_pronominal()
                || dict.all_pronouns.contains(&m_span)
                || dict.all_pronouns.contains(&ant_span)
            {
                continue;
            }
            if m_span == ant_span
                || m_span == format!("{ant_span} 's")
                || ant_span == format!("{m_span} 's")
            {
                matched = true;
            }
        }
    }
    matched
}

/// Span match after truncating both spans at the head's trailing clause,
/// catching pairs like "Mr. Bickford" and "Mr. Bickford, an 18-year
/// mediation veteran". Pronouns and role phrases never match.
#[must_use]
pub fn relaxed_exact_string_match(
    doc: &Document,
    mention: &Mention,
    ant: &Mention,
    dict: &Dictionaries,
) -> bool {
    if doc.relations.is_role(mention.id) {
        return false;
    }
    if mention.is_pronominal()
        || ant.is_pronominal()
        || dict.all_pronouns.contains(&mention.span_text().to_lowercase())
        || dict.all_pronouns.contains(&ant.span_text().to_lowercase())
    {
        return false;
    }
    let mention_span = mention.remove_phrase_after_head();
    let ant_span = ant.remove_phrase_after_head();
    if mention_span.is_empty() || ant_span.is_empty() {
        return false;
    }
    mention_span == ant_span
        || mention_span == format!("{ant_span} 's")
        || ant_span == format!("{mention_span} 's")
}

/// Word inclusion: every non-stop word of the mention's cluster, minus the
/// mention's own head, occurs in the antecedent cluster's words.
#[must_use]
pub fn words_included(mc: &Cluster, pa: &Cluster, mention: &Mention, dict: &Dictionaries) -> bool {
    let mut remaining: HashSet<&str> = mc.words.iter().map(String::as_str).collect();
    for stop_word in &dict.stop_words {
        remaining.remove(stop_word.as_str());
    }
    remaining.remove(mention.head_string.as_str());
    remaining.iter().all(|word| pa.words.contains(*word))
}

/// True when any member of the antecedent cluster shares the mention's
/// head string. Pronouns and pronoun spans never agree here.
#[must_use]
pub fn heads_agree(
    doc: &Document,
    pa: &Cluster,
    mention: &Mention,
    ant: &Mention,
    dict: &Dictionaries,
) -> bool {
    if mention.is_pronominal()
        || ant.is_pronominal()
        || dict.all_pronouns.contains(&mention.span_text().to_lowercase())
        || dict.all_pronouns.contains(&ant.span_text().to_lowercase())
    {
        return false;
    }
    doc.cluster_mentions(pa)
        .any(|a| a.head_string == mention.head_string)
}

/// Pairwise head agreement restricted to non-pronominal mentions.
#[must_use]
pub fn relaxed_heads_agree(mention: &Mention, ant: &Mention) -> bool {
    if mention.is_pronominal() || ant.is_pronominal() {
        return false;
    }
    mention.heads_agree(ant)
}

/// True when any non-pronominal member of the mention's cluster stands in
/// an acronym relation with any antecedent member.
#[must_use]
pub fn any_acronym(doc: &Document, mc: &Cluster, pa: &Cluster) -> bool {
    doc.cluster_mentions(mc).any(|m| {
        !m.is_pronominal() && doc.cluster_mentions(pa).any(|ant| m.is_acronym(ant))
    })
}

/// True when any member pair passes the proper-head match.
#[must_use]
pub fn any_same_proper_head_last_word(doc: &Document, mc: &Cluster, pa: &Cluster) -> bool {
    doc.cluster_mentions(mc).any(|m| {
        doc.cluster_mentions(pa)
            .any(|a| m.same_proper_head_last_word(a))
    })
}

/// True when both clusters contain at least one proper mention.
#[must_use]
pub fn both_have_proper(doc: &Document, mc: &Cluster, pa: &Cluster) -> bool {
    let has_proper =
        |c: &Cluster| doc.cluster_mentions(c).any(|m| m.kind == MentionKind::Proper);
    has_proper(mc) && has_proper(pa)
}

// ============================================================================
// Structural relations
// ============================================================================

/// Apposition between the pair, gated on cluster attribute agreement.
/// Two proper mentions never count, nor does a LOCATION-tagged mention.
#[must_use]
pub fn is_apposition(
    doc: &Document,
    mc: &Cluster,
    pa: &Cluster,
    m1: &Mention,
    m2: &Mention,
) -> bool {
    if !attributes_agree(mc, pa) {
        return false;
    }
    if m1.kind == MentionKind::Proper && m2.kind == MentionKind::Proper {
        return false;
    }
    if m1.ner == "LOCATION" {
        return false;
    }
    doc.relations.is_apposition(m1.id, m2.id)
}

/// Predicate-nominative relation between the pair, gated on cluster
/// attribute agreement; nested spans never count.
#[must_use]
pub fn is_predicate_nominative(
    doc: &Document,
    mc: &Cluster,
    pa: &Cluster,
    m1: &Mention,
    m2: &Mention,
) -> bool {
    if !attributes_agree(mc, pa) {
        return false;
    }
    if (m1.start <= m2.start && m1.end >= m2.end) || (m1.start >= m2.start && m1.end <= m2.end) {
        return false;
    }
    doc.relations.is_predicate_nominative(m1.id, m2.id)
}

/// Relative-pronoun relation between the pair, gated on cluster attribute
/// agreement.
#[must_use]
pub fn is_relative_pronoun(
    doc: &Document,
    mc: &Cluster,
    pa: &Cluster,
    m1: &Mention,
    m2: &Mention,
) -> bool {
    attributes_agree(mc, pa) && doc.relations.is_relative_pronoun(m1.id, m2.id)
}

/// Role-appositive test in either direction, gated on cluster attribute
/// agreement.
#[must_use]
pub fn is_role_appositive(
    mc: &Cluster,
    pa: &Cluster,
    m1: &Mention,
    m2: &Mention,
    dict: &Dictionaries,
) -> bool {
    if !attributes_agree(mc, pa) {
        return false;
    }
    m1.is_role_appositive(m2, dict) || m2.is_role_appositive(m1, dict)
}

/// I-within-i: one mention's phrase nested inside the other's without a
/// licensing construction (apposition, relative pronoun, role appositive)
/// between them.
#[must_use]
pub fn i_within_i(doc: &Document, m: &Mention, ant: &Mention, dict: &Dictionaries) -> bool {
    if doc.relations.is_apposition(m.id, ant.id)
        || doc.relations.is_relative_pronoun(m.id, ant.id)
        || m.is_role_appositive(ant, dict)
        || ant.is_role_appositive(m, dict)
    {
        return false;
    }
    let parse = doc.sentences.get(m.sentence).and_then(|s| s.parse.as_ref());
    m.included_in(ant, parse) || ant.included_in(m, parse)
}

/// True when any member pair stands in an i-within-i relation.
#[must_use]
pub fn any_i_within_i(doc: &Document, mc: &Cluster, pa: &Cluster, dict: &Dictionaries) -> bool {
    doc.cluster_mentions(mc).any(|m| {
        doc.cluster_mentions(pa)
            .any(|ant| i_within_i(doc, m, ant, dict))
    })
}

/// True when any member pair carries incompatible modifiers.
#[must_use]
pub fn any_incompatible_modifier(
    doc: &Document,
    mc: &Cluster,
    pa: &Cluster,
    dict: &Dictionaries,
) -> bool {
    doc.cluster_mentions(mc).any(|m| {
        doc.cluster_mentions(pa)
            .any(|ant| m.have_incompatible_modifier(ant, dict))
    })
}

// ============================================================================
// Discourse
// ============================================================================

/// True when one mention is a recorded or annotated speaker of the other:
/// either the pair was registered, or either head's speaker annotation
/// contains the other's head word.
#[must_use]
pub fn is_speaker(doc: &Document, mention: &Mention, ant: &Mention) -> bool {
    if doc.has_speaker_pair(mention.id, ant.id) {
        return true;
    }
    if let Some(speaker) = mention.speaker.as_deref() {
        if speaker
            .split(' ')
            .any(|word| ant.head_string.eq_ignore_ascii_case(word))
        {
            return true;
        }
    }
    if let Some(speaker) = ant.speaker.as_deref() {
        if speaker
            .split(' ')
            .any(|word| mention.head_string.eq_ignore_ascii_case(word))
        {
            return true;
        }
    }
    false
}

/// True when both mentions are spoken by the same speaker. Numeric speaker
/// annotations name mention ids and compare through the predicted
/// partition; anything unresolvable falls back to string equality.
#[must_use]
pub fn same_speaker(doc: &Document, m: &Mention, ant: &Mention) -> bool {
    let (Some(m_speaker), Some(ant_speaker)) = (m.speaker.as_deref(), ant.speaker.as_deref())
    else {
        return false;
    };
    let speaker_cluster = |speaker: &str| {
        speaker
            .parse::<MentionId>()
            .ok()
            .and_then(|id| doc.mention(id))
            .and_then(|m| m.cluster)
    };
    match (speaker_cluster(m_speaker), speaker_cluster(ant_speaker)) {
        (Some(a), Some(b)) => a == b,
        _ => m_speaker == ant_speaker,
    }
}

/// Second-person check: a "you" should bind to the previous utterance's
/// speaker. Returns true (disagree) when the previous utterance or its
/// speaker cannot be resolved, or the candidate is neither that speaker's
/// cluster nor first person.
fn second_person_misbinds(doc: &Document, you: &Mention, other: &Mention) -> bool {
    let Some(previous_utterance) = you.utterance.checked_sub(1) else {
        return true;
    };
    let Some(previous_speaker) = doc.speakers.get(&previous_utterance) else {
        return true;
    };
    let Ok(speaker_id) = previous_speaker.parse::<MentionId>() else {
        return true;
    };
    let Some(speaker_cluster) = doc.cluster_of(speaker_id) else {
        log::debug!(
            "speaker {speaker_id} of utterance {previous_utterance} has no cluster; \
             rejecting the second-person binding"
        );
        return true;
    };
    other.cluster != Some(speaker_cluster.id) && other.person != Person::I
}

/// True when grammatical person rules out coreference for the pair:
/// same-speaker mentions with conflicting persons, a same-speaker name
/// against a first or second person pronoun, or a "you" that cannot bind
/// to the previous utterance's speaker. Same-speaker it/they conflicts are
/// exempt.
#[must_use]
pub fn person_disagree(doc: &Document, m: &Mention, ant: &Mention) -> bool {
    let speakers_match = same_speaker(doc, m, ant);
    if speakers_match && m.person != ant.person {
        if matches!(
            (m.person, ant.person),
            (Person::It, Person::They) | (Person::They, Person::It) | (Person::They, Person::They)
        ) {
            return false;
        }
        if !m.person.is_unknown() && !ant.person.is_unknown() {
            return true;
        }
    }
    if speakers_match {
        if !ant.is_pronominal() {
            if matches!(m.person, Person::I | Person::We | Person::You) {
                return true;
            }
        } else if !m.is_pronominal()
            && matches!(ant.person, Person::I | Person::We | Person::You)
        {
            return true;
        }
    }
    if m.person == Person::You && ant.appear_earlier_than(m) {
        if second_person_misbinds(doc, m, ant) {
            return true;
        }
    } else if ant.person == Person::You
        && m.appear_earlier_than(ant)
        && second_person_misbinds(doc, ant, m)
    {
        return true;
    }
    false
}

/// True when any member pair disagrees in person.
#[must_use]
pub fn any_person_disagree(doc: &Document, mc: &Cluster, pa: &Cluster) -> bool {
    doc.cluster_mentions(mc).any(|m| {
        doc.cluster_mentions(pa)
            .any(|ant| person_disagree(doc, m, ant))
    })
}

/// True when the two mentions are subject and object of the same verb in
/// the same sentence, in either assignment.
#[must_use]
pub fn subject_object(m1: &Mention, m2: &Mention) -> bool {
    if m1.sentence != m2.sentence {
        return false;
    }
    let (Some(v1), Some(v2)) = (m1.governing_verb, m2.governing_verb) else {
        return false;
    };
    if v1 != v2 {
        return false;
    }
    let is_subject = |m: &Mention| m.role == Some(GrammaticalRole::Subject);
    let is_object = |m: &Mention| {
        matches!(
            m.role,
            Some(
                GrammaticalRole::DirectObject
                    | GrammaticalRole::IndirectObject
                    | GrammaticalRole::PrepositionObject
            )
        )
    };
    (is_subject(m1) && is_object(m2)) || (is_subject(m2) && is_object(m1))
}

// ============================================================================
// Cluster shape
// ============================================================================

/// True for a singleton cluster whose member is a pronoun or pronoun span.
#[must_use]
pub fn is_single_pronoun_cluster(doc: &Document, cluster: &Cluster, dict: &Dictionaries) -> bool {
    if cluster.members().len() > 1 {
        return false;
    }
    doc.cluster_mentions(cluster).any(|m| {
        m.is_pronominal() || dict.all_pronouns.contains(&m.span_text().to_lowercase())
    })
}

// ============================================================================
// Semantics
// ============================================================================

/// Alias test between the two cluster representatives, both of which must
/// be proper mentions. Without a configured backend the test is skipped;
/// backend failures degrade to a non-match with a warning.
#[must_use]
pub fn alias(doc: &Document, mc: &Cluster, pa: &Cluster, semantics: &Semantics) -> bool {
    let Some(mention) = mc.representative().and_then(|id| doc.mention(id)) else {
        return false;
    };
    let Some(antecedent) = pa.representative().and_then(|id| doc.mention(id)) else {
        return false;
    };
    if mention.kind != MentionKind::Proper || antecedent.kind != MentionKind::Proper {
        return false;
    }
    if !semantics.is_available() {
        log::debug!("alias test skipped: no semantic backend configured");
        return false;
    }
    match semantics.try_alias(mention, antecedent) {
        Ok(result) => result,
        Err(err) => {
            log::warn!(
                "alias lookup failed for mentions {} and {}: {err}",
                mention.id,
                antecedent.id
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeExtractor, CorefConfig};
    use crate::cluster::NerLabel;
    use crate::document::{DependencyGraph, ParseTree, Sentence, Token};
    use crate::error::Result;
    use crate::mention::{Gender, Number};
    use crate::semantics::AliasResolver;

    fn sentence(words: &[(&str, &str)]) -> Sentence {
        Sentence::new(
            words
                .iter()
                .map(|(text, pos)| Token::new(*text, *pos))
                .collect(),
        )
    }

    /// Register a mention over `start..end` of sentence `sent`, run
    /// attribute extraction, and return its id.
    fn add_mention(
        doc: &mut Document,
        id: MentionId,
        sent: usize,
        start: usize,
        end: usize,
        head: usize,
    ) -> MentionId {
        let s = doc.sentences[sent].clone();
        let mut mention = Mention::new(id, sent, start, end, head, &s).unwrap();
        let dict = Dictionaries::default();
        let extractor = AttributeExtractor::new(&dict, CorefConfig::default());
        extractor.extract(&mut mention, &s);
        doc.add_mention(mention).unwrap();
        id
    }

    #[test]
    fn test_attributes_agree_needs_extras_on_both_sides() {
        let mut singular = Cluster::default();
        singular.numbers.insert(Number::Singular);
        let mut plural = Cluster::default();
        plural.numbers.insert(Number::Plural);
        assert!(
            !attributes_agree(&singular, &plural),
            "disjoint concrete values disagree"
        );

        let mut both = Cluster::default();
        both.numbers.insert(Number::Singular);
        both.numbers.insert(Number::Plural);
        assert!(
            attributes_agree(&both, &plural),
            "a superset side has no extras, so one-sided extras pass"
        );

        let mut unknown = Cluster::default();
        unknown.numbers.insert(Number::Unknown);
        assert!(
            attributes_agree(&singular, &unknown),
            "a wildcard side never counts extras"
        );
    }

    #[test]
    fn test_attributes_agree_ner_wildcards() {
        let mut person = Cluster::default();
        person.ner_labels.insert(NerLabel::new("PERSON"));
        let mut org = Cluster::default();
        org.ner_labels.insert(NerLabel::new("ORGANIZATION"));
        assert!(!attributes_agree(&person, &org));

        let mut misc = Cluster::default();
        misc.ner_labels.insert(NerLabel::new("MISC"));
        assert!(
            attributes_agree(&person, &misc),
            "MISC is a wildcard label on its side"
        );

        // disagreement in a different attribute still vetoes
        let mut male = Cluster::default();
        male.ner_labels.insert(NerLabel::new("PERSON"));
        male.genders.insert(Gender::Male);
        let mut female = Cluster::default();
        female.ner_labels.insert(NerLabel::new("PERSON"));
        female.genders.insert(Gender::Female);
        assert!(!attributes_agree(&male, &female));
    }

    #[test]
    fn test_exact_string_match() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("the", "DT"), ("Federal", "NNP"), ("Reserve", "NNP")]));
        doc.add_sentence(sentence(&[("The", "DT"), ("Federal", "NNP"), ("Reserve", "NNP")]));
        add_mention(&mut doc, 0, 0, 0, 3, 2);
        add_mention(&mut doc, 1, 1, 0, 3, 2);
        doc.seed_singleton_clusters();

        let dict = Dictionaries::default();
        let mc = doc.cluster(0).unwrap();
        let pa = doc.cluster(1).unwrap();
        assert!(
            exact_string_match(&doc, mc, pa, &dict),
            "case-insensitive full-span match"
        );

        let mut role_doc = doc.clone();
        role_doc.relations.mark_role(0);
        let mc = role_doc.cluster(0).unwrap();
        let pa = role_doc.cluster(1).unwrap();
        assert!(
            !exact_string_match(&role_doc, mc, pa, &dict),
            "a role-phrase member vetoes the cluster"
        );
    }

    #[test]
    fn test_exact_string_match_possessive() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("IBM", "NNP")]));
        doc.add_sentence(sentence(&[("IBM", "NNP"), ("'s", "POS")]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 2, 0);
        doc.seed_singleton_clusters();

        let dict = Dictionaries::default();
        assert!(exact_string_match(
            &doc,
            doc.cluster(1).unwrap(),
            doc.cluster(0).unwrap(),
            &dict
        ));
    }

    #[test]
    fn test_relaxed_exact_string_match() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("Mr.", "NNP"), ("Bickford", "NNP")]));
        doc.add_sentence(sentence(&[
            ("Mr.", "NNP"),
            ("Bickford", "NNP"),
            (",", ","),
            ("a", "DT"),
            ("veteran", "NN"),
        ]));
        add_mention(&mut doc, 0, 0, 0, 2, 1);
        add_mention(&mut doc, 1, 1, 0, 5, 1);
        doc.seed_singleton_clusters();

        let dict = Dictionaries::default();
        let short = doc.mention(0).unwrap();
        let long = doc.mention(1).unwrap();
        assert!(relaxed_exact_string_match(&doc, long, short, &dict));
        assert!(relaxed_exact_string_match(&doc, short, long, &dict));
    }

    #[test]
    fn test_words_included_ignores_stop_words_and_own_head() {
        let dict = Dictionaries::default();
        let mut mc = Cluster::default();
        for w in ["the", "federal", "reserve", "board"] {
            mc.words.insert(w.to_string());
        }
        let mut pa = Cluster::default();
        for w in ["federal", "reserve"] {
            pa.words.insert(w.to_string());
        }
        let board = sentence(&[("board", "NN")]);
        let mention = Mention::new(9, 0, 0, 1, 0, &board).unwrap();
        assert!(
            words_included(&mc, &pa, &mention, &dict),
            "\"the\" is a stop word and \"board\" is the mention head"
        );

        mc.words.insert("governors".to_string());
        assert!(!words_included(&mc, &pa, &mention, &dict));
    }

    #[test]
    fn test_heads_agree_against_cluster() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("Obama", "NNP")]));
        doc.add_sentence(sentence(&[("Barack", "NNP"), ("Obama", "NNP")]));
        doc.add_sentence(sentence(&[("he", "PRP")]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 2, 1);
        add_mention(&mut doc, 2, 2, 0, 1, 0);
        doc.seed_singleton_clusters();

        let dict = Dictionaries::default();
        let m = doc.mention(0).unwrap();
        let ant = doc.mention(1).unwrap();
        assert!(heads_agree(&doc, doc.cluster(1).unwrap(), m, ant, &dict));
        assert!(relaxed_heads_agree(m, ant));

        let pronoun = doc.mention(2).unwrap();
        assert!(
            !heads_agree(&doc, doc.cluster(0).unwrap(), pronoun, m, &dict),
            "pronouns never head-match"
        );
        assert!(!relaxed_heads_agree(pronoun, m));
    }

    #[test]
    fn test_any_acronym_skips_pronominal_members() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("ABC", "NNP")]));
        doc.add_sentence(sentence(&[
            ("American", "NNP"),
            ("Broadcasting", "NNP"),
            ("Company", "NNP"),
        ]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 3, 2);
        doc.seed_singleton_clusters();

        assert!(any_acronym(&doc, doc.cluster(0).unwrap(), doc.cluster(1).unwrap()));
        assert!(any_acronym(&doc, doc.cluster(1).unwrap(), doc.cluster(0).unwrap()));
    }

    #[test]
    fn test_structural_relations_use_registry_and_gates() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[
            ("Obama", "NNP"),
            (",", ","),
            ("the", "DT"),
            ("president", "NN"),
        ]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 0, 2, 4, 3);
        doc.relations.add_apposition(0, 1);
        doc.seed_singleton_clusters();

        let m1 = doc.mention(0).unwrap().clone();
        let m2 = doc.mention(1).unwrap().clone();
        let mc = doc.cluster(0).unwrap();
        let pa = doc.cluster(1).unwrap();
        assert!(is_apposition(&doc, mc, pa, &m1, &m2));
        assert!(is_apposition(&doc, mc, pa, &m2, &m1), "registry is symmetric");
        assert!(
            !is_predicate_nominative(&doc, mc, pa, &m1, &m2),
            "no predicate-nominative relation recorded"
        );

        let mut location = m1.clone();
        location.ner = "LOCATION".to_string();
        assert!(
            !is_apposition(&doc, mc, pa, &location, &m2),
            "LOCATION mentions are excluded from apposition"
        );
    }

    #[test]
    fn test_is_relative_pronoun_gated_on_attributes() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("the", "DT"), ("man", "NN"), ("who", "WP")]));
        add_mention(&mut doc, 0, 0, 0, 2, 1);
        add_mention(&mut doc, 1, 0, 2, 3, 2);
        doc.relations.add_relative_pronoun(1, 0);
        doc.seed_singleton_clusters();

        let m1 = doc.mention(1).unwrap().clone();
        let m2 = doc.mention(0).unwrap().clone();
        assert!(is_relative_pronoun(
            &doc,
            doc.cluster(1).unwrap(),
            doc.cluster(0).unwrap(),
            &m1,
            &m2
        ));

        let mut conflicting = Cluster::default();
        conflicting.numbers.insert(Number::Plural);
        let mut other = Cluster::default();
        other.numbers.insert(Number::Singular);
        assert!(
            !is_relative_pronoun(&doc, &conflicting, &other, &m1, &m2),
            "attribute conflict suppresses the relation"
        );
    }

    #[test]
    fn test_is_predicate_nominative_rejects_nested_spans() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[
            ("Obama", "NNP"),
            ("is", "VBZ"),
            ("the", "DT"),
            ("president", "NN"),
        ]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 0, 2, 4, 3);
        doc.relations.add_predicate_nominative(0, 1);
        doc.seed_singleton_clusters();

        let m1 = doc.mention(0).unwrap().clone();
        let m2 = doc.mention(1).unwrap().clone();
        assert!(is_predicate_nominative(
            &doc,
            doc.cluster(0).unwrap(),
            doc.cluster(1).unwrap(),
            &m1,
            &m2
        ));

        let mut nested = m2.clone();
        nested.start = 0;
        nested.end = 1;
        assert!(
            !is_predicate_nominative(
                &doc,
                doc.cluster(0).unwrap(),
                doc.cluster(1).unwrap(),
                &m1,
                &nested
            ),
            "containment suppresses the relation"
        );
    }

    #[test]
    fn test_i_within_i_nested_without_licensing() {
        let mut doc = Document::new();
        let tree = ParseTree::parse(
            "(ROOT (S (NP (NP (DT the) (NN man)) (PP (IN from) (NP (NNP Ohio)))) (VP (VBD slept))))",
        )
        .unwrap();
        let s = Sentence::new(vec![
            Token::new("the", "DT"),
            Token::new("man", "NN"),
            Token::new("from", "IN"),
            Token::new("Ohio", "NNP"),
            Token::new("slept", "VBD"),
        ])
        .with_parse(tree);
        doc.add_sentence(s);
        add_mention(&mut doc, 0, 0, 0, 4, 1);
        add_mention(&mut doc, 1, 0, 3, 4, 3);
        doc.seed_singleton_clusters();

        let dict = Dictionaries::default();
        let outer = doc.mention(0).unwrap();
        let inner = doc.mention(1).unwrap();
        assert!(i_within_i(&doc, inner, outer, &dict));
        assert!(i_within_i(&doc, outer, inner, &dict), "direction does not matter");
        assert!(any_i_within_i(
            &doc,
            doc.cluster(0).unwrap(),
            doc.cluster(1).unwrap(),
            &dict
        ));

        let mut licensed = doc.clone();
        licensed.relations.add_apposition(0, 1);
        let outer = licensed.mention(0).unwrap();
        let inner = licensed.mention(1).unwrap();
        assert!(
            !i_within_i(&licensed, inner, outer, &dict),
            "a recorded apposition licenses the nesting"
        );
    }

    #[test]
    fn test_any_incompatible_modifier() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("university", "NN")]));
        doc.add_sentence(sentence(&[("northern", "JJ"), ("university", "NN")]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 2, 1);
        doc.seed_singleton_clusters();

        let dict = Dictionaries::default();
        assert!(any_incompatible_modifier(
            &doc,
            doc.cluster(0).unwrap(),
            doc.cluster(1).unwrap(),
            &dict
        ));
    }

    #[test]
    fn test_is_speaker_by_annotation_and_pair() {
        let mut doc = Document::new();
        doc.add_sentence(Sentence::new(vec![
            Token::new("John", "NNP").with_ner("PERSON"),
        ]));
        doc.add_sentence(Sentence::new(vec![
            Token::new("I", "PRP").with_speaker("John Smith").with_utterance(1),
        ]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 1, 0);
        doc.seed_singleton_clusters();

        let john = doc.mention(0).unwrap();
        let i = doc.mention(1).unwrap();
        assert!(
            is_speaker(&doc, i, john),
            "the speaker annotation names the antecedent head"
        );
        assert!(is_speaker(&doc, john, i), "annotation check runs both ways");

        let mut paired = doc.clone();
        paired.add_speaker_pair(1, 0);
        let john = paired.mention(0).unwrap();
        let i = paired.mention(1).unwrap();
        assert!(is_speaker(&paired, john, i), "recorded pairs match either order");
    }

    #[test]
    fn test_same_speaker_string_and_cluster_forms() {
        let mut doc = Document::new();
        doc.add_sentence(Sentence::new(vec![
            Token::new("I", "PRP").with_speaker("Mary"),
            Token::new("win", "VBP").with_speaker("Mary"),
        ]));
        doc.add_sentence(Sentence::new(vec![
            Token::new("me", "PRP").with_speaker("Mary"),
        ]));
        doc.add_sentence(Sentence::new(vec![
            Token::new("you", "PRP").with_speaker("Peter"),
        ]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 1, 0);
        add_mention(&mut doc, 2, 2, 0, 1, 0);
        doc.seed_singleton_clusters();

        let a = doc.mention(0).unwrap();
        let b = doc.mention(1).unwrap();
        let c = doc.mention(2).unwrap();
        assert!(same_speaker(&doc, a, b));
        assert!(!same_speaker(&doc, a, c));

        // numeric speakers resolve through the predicted partition
        let mut numeric = Document::new();
        numeric.add_sentence(Sentence::new(vec![Token::new("Mary", "NNP")]));
        numeric.add_sentence(Sentence::new(vec![
            Token::new("I", "PRP").with_speaker("0"),
        ]));
        numeric.add_sentence(Sentence::new(vec![
            Token::new("me", "PRP").with_speaker("0"),
        ]));
        add_mention(&mut numeric, 0, 0, 0, 1, 0);
        add_mention(&mut numeric, 1, 1, 0, 1, 0);
        add_mention(&mut numeric, 2, 2, 0, 1, 0);
        numeric.seed_singleton_clusters();
        let i = numeric.mention(1).unwrap();
        let me = numeric.mention(2).unwrap();
        assert!(same_speaker(&numeric, i, me));
    }

    #[test]
    fn test_person_disagree_same_speaker_conflicts() {
        let mut doc = Document::new();
        doc.add_sentence(Sentence::new(vec![
            Token::new("I", "PRP").with_speaker("Mary"),
        ]));
        doc.add_sentence(Sentence::new(vec![
            Token::new("he", "PRP").with_speaker("Mary"),
        ]));
        doc.add_sentence(Sentence::new(vec![
            Token::new("it", "PRP").with_speaker("Mary"),
        ]));
        doc.add_sentence(Sentence::new(vec![
            Token::new("they", "PRP").with_speaker("Mary"),
        ]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 1, 0);
        add_mention(&mut doc, 2, 2, 0, 1, 0);
        add_mention(&mut doc, 3, 3, 0, 1, 0);
        doc.seed_singleton_clusters();

        let i = doc.mention(0).unwrap();
        let he = doc.mention(1).unwrap();
        let it = doc.mention(2).unwrap();
        let they = doc.mention(3).unwrap();
        assert!(
            person_disagree(&doc, i, he),
            "same speaker, distinct known persons"
        );
        assert!(
            !person_disagree(&doc, it, they),
            "the it/they pair is exempt"
        );
        assert!(!person_disagree(&doc, they, it));
    }

    #[test]
    fn test_person_disagree_name_against_first_person() {
        let mut doc = Document::new();
        doc.add_sentence(Sentence::new(vec![
            Token::new("Mary", "NNP").with_ner("PERSON").with_speaker("queen"),
        ]));
        doc.add_sentence(Sentence::new(vec![
            Token::new("I", "PRP").with_speaker("queen"),
        ]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 1, 0);
        doc.seed_singleton_clusters();

        let mary = doc.mention(0).unwrap();
        let i = doc.mention(1).unwrap();
        assert!(
            person_disagree(&doc, i, mary),
            "a speaker's own name never corefers with their \"I\""
        );
        assert!(person_disagree(&doc, mary, i), "checked in both argument orders");
    }

    #[test]
    fn test_person_disagree_unbound_second_person() {
        let mut doc = Document::new();
        doc.add_sentence(Sentence::new(vec![Token::new("Mary", "NNP")]));
        doc.add_sentence(Sentence::new(vec![
            Token::new("you", "PRP").with_utterance(2).with_speaker("5"),
        ]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 1, 0);
        doc.seed_singleton_clusters();

        let mary = doc.mention(0).unwrap();
        let you = doc.mention(1).unwrap();
        assert!(
            person_disagree(&doc, you, mary),
            "no previous-utterance speaker resolves, so the binding is rejected"
        );

        // a resolvable previous speaker in the same cluster binds
        let mut bound = doc.clone();
        bound.speakers.insert(1, "0".to_string());
        let mary = bound.mention(0).unwrap();
        let you = bound.mention(1).unwrap();
        assert!(!person_disagree(&bound, you, mary));
    }

    #[test]
    fn test_subject_object_same_verb() {
        let mut doc = Document::new();
        let s = Sentence::new(vec![
            Token::new("John", "NNP"),
            Token::new("saw", "VBD"),
            Token::new("Mary", "NNP"),
        ])
        .with_dependencies(
            DependencyGraph::new()
                .with_edge("nsubj", 1, 0)
                .with_edge("dobj", 1, 2),
        );
        doc.add_sentence(s);
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 0, 2, 3, 2);

        let john = doc.mention(0).unwrap();
        let mary = doc.mention(1).unwrap();
        assert!(subject_object(john, mary));
        assert!(subject_object(mary, john));
        assert!(!subject_object(john, john), "a mention is not its own object");
    }

    #[test]
    fn test_is_single_pronoun_cluster() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("he", "PRP")]));
        doc.add_sentence(sentence(&[("Obama", "NNP")]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 1, 0);
        doc.seed_singleton_clusters();

        let dict = Dictionaries::default();
        assert!(is_single_pronoun_cluster(&doc, doc.cluster(0).unwrap(), &dict));
        assert!(!is_single_pronoun_cluster(&doc, doc.cluster(1).unwrap(), &dict));

        let config = CorefConfig::default();
        doc.merge_clusters(1, 0, &config).unwrap();
        assert!(
            !is_single_pronoun_cluster(&doc, doc.cluster(1).unwrap(), &dict),
            "multi-member clusters are never single-pronoun"
        );
    }

    #[test]
    fn test_both_have_proper() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("Obama", "NNP")]));
        doc.add_sentence(sentence(&[("the", "DT"), ("president", "NN")]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 2, 1);
        doc.seed_singleton_clusters();

        assert!(!both_have_proper(
            &doc,
            doc.cluster(0).unwrap(),
            doc.cluster(1).unwrap()
        ));
        assert!(both_have_proper(
            &doc,
            doc.cluster(0).unwrap(),
            doc.cluster(0).unwrap()
        ));
    }

    struct SameCountryResolver;

    impl AliasResolver for SameCountryResolver {
        fn alias(&self, m: &Mention, ant: &Mention) -> Result<bool> {
            let countries = ["america", "united states"];
            Ok(countries.contains(&m.span_text().to_lowercase().as_str())
                && countries.contains(&ant.span_text().to_lowercase().as_str()))
        }
    }

    #[test]
    fn test_alias_uses_representatives_and_degrades() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("America", "NNP")]));
        doc.add_sentence(sentence(&[("United", "NNP"), ("States", "NNP")]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 2, 1);
        doc.seed_singleton_clusters();

        let mc = doc.cluster(0).unwrap();
        let pa = doc.cluster(1).unwrap();
        assert!(
            !alias(&doc, mc, pa, &Semantics::unavailable()),
            "no backend degrades to a non-match"
        );

        let semantics = Semantics::with_resolver(SameCountryResolver);
        assert!(alias(&doc, mc, pa, &semantics));
    }

    #[test]
    fn test_alias_requires_proper_representatives() {
        let mut doc = Document::new();
        doc.add_sentence(sentence(&[("it", "PRP")]));
        doc.add_sentence(sentence(&[("America", "NNP")]));
        add_mention(&mut doc, 0, 0, 0, 1, 0);
        add_mention(&mut doc, 1, 1, 0, 1, 0);
        doc.seed_singleton_clusters();

        let semantics = Semantics::with_resolver(SameCountryResolver);
        assert!(!alias(
            &doc,
            doc.cluster(0).unwrap(),
            doc.cluster(1).unwrap(),
            &semantics
        ));
    }
}

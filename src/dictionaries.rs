//! Word lists and lookup tables backing attribute extraction and the
//! compatibility predicates.
//!
//! [`Dictionaries`] bundles every closed word inventory the resolution
//! primitives consult: pronoun sets partitioned by person, number, gender,
//! animacy and NER-category compatibility, demonym and state-abbreviation
//! tables, corporate suffixes, stop words, number words, and the
//! gender-number count table keyed by multi-token sequences.
//!
//! The pronoun inventories ship complete for English. The open-ended tables
//! (demonyms, state abbreviations, gender-number counts, the optional
//! male/female/animate/singular word lists) default to empty and are filled
//! by the caller from whatever resource files the surrounding pipeline uses.
//!
//! # Example
//!
//! ```
//! use corefer::Dictionaries;
//!
//! let mut dict = Dictionaries::default();
//! assert!(dict.plural_pronouns.contains("they"));
//!
//! dict.add_demonyms("israel", &["israeli", "israelis"]);
//! assert!(dict.demonym_set.contains("israeli"));
//! ```

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// Default English inventories
// ============================================================================

static FIRST_PERSON: &[&str] = &[
    "i", "me", "myself", "mine", "my", "we", "us", "ourself", "ourselves", "ours", "our",
];

static SECOND_PERSON: &[&str] = &["you", "yourself", "yours", "your", "yourselves"];

static THIRD_PERSON: &[&str] = &[
    "he", "him", "himself", "his", "she", "her", "herself", "hers", "it", "itself", "its", "one",
    "oneself", "one's", "they", "them", "themself", "themselves", "theirs", "their", "'em",
];

static OTHER_PRONOUNS: &[&str] = &["who", "whom", "whose", "where", "when", "which"];

static RELATIVE_PRONOUNS: &[&str] = &["that", "who", "which", "whom", "where", "whose"];

static SINGULAR_PRONOUNS: &[&str] = &[
    "i", "me", "myself", "mine", "my", "yourself", "he", "him", "himself", "his", "she", "her",
    "herself", "hers", "it", "itself", "its", "one", "oneself", "one's",
];

static PLURAL_PRONOUNS: &[&str] = &[
    "we", "us", "ourself", "ourselves", "ours", "our", "yourself", "yourselves", "they", "them",
    "themself", "themselves", "theirs", "their",
];

static MALE_PRONOUNS: &[&str] = &["he", "him", "himself", "his"];

static FEMALE_PRONOUNS: &[&str] = &["her", "hers", "herself", "she"];

static ANIMATE_PRONOUNS: &[&str] = &[
    "i", "me", "myself", "mine", "my", "we", "us", "ourself", "ourselves", "ours", "our", "you",
    "yourself", "yours", "your", "yourselves", "he", "him", "himself", "his", "she", "her",
    "herself", "hers", "one", "oneself", "one's", "they", "them", "themself", "themselves",
    "theirs", "their", "'em", "who", "whom", "whose",
];

static INANIMATE_PRONOUNS: &[&str] = &["it", "itself", "its", "where", "when"];

static ORGANIZATION_PRONOUNS: &[&str] = &["it", "its", "they", "their", "them", "which"];

static LOCATION_PRONOUNS: &[&str] = &["it", "its", "where", "here", "there"];

static DATE_TIME_PRONOUNS: &[&str] = &["when"];

static MONEY_PERCENT_NUMBER_PRONOUNS: &[&str] = &["it", "its"];

static GPE_PRONOUNS: &[&str] = &["it", "itself", "its", "they", "where"];

static FACILITY_VEHICLE_WEAPON_PRONOUNS: &[&str] = &["it", "itself", "its", "they", "where"];

static CORPORATE_SUFFIXES: &[&str] = &["corp", "co", "inc", "ltd"];

/// Stop words removed from a cluster's word set before subset comparison.
static CLUSTER_STOP_WORDS: &[&str] = &[
    "the", "this", "mr.", "miss", "mrs.", "dr.", "ms.", "inc.", "ltd.", "corp.", "'s",
];

static NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
    "thousand", "million", "billion",
];

/// Directional modifiers consulted by the incompatible-modifier test.
static DIRECTIONAL_MODIFIERS: &[&str] = &[
    "east", "west", "north", "south", "eastern", "western", "northern", "southern", "upper",
    "lower",
];

/// Directional and compound modifiers consulted by the different-location test.
static LOCATION_MODIFIERS: &[&str] = &[
    "east", "west", "north", "south", "eastern", "western", "northern", "southern",
    "northwestern", "southwestern", "northeastern", "southeastern", "upper", "lower",
];

static DEFAULT_DICTIONARIES: Lazy<Dictionaries> = Lazy::new(Dictionaries::english);

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

// ============================================================================
// Gender-number counts
// ============================================================================

/// Occurrence counts from a gender-number corpus for one lookup key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    /// Occurrences observed with male pronouns.
    pub male: u32,
    /// Occurrences observed with female pronouns.
    pub female: u32,
    /// Occurrences observed with neutral pronouns.
    pub neutral: u32,
}

impl GenderCounts {
    /// Create a count triple.
    #[must_use]
    pub fn new(male: u32, female: u32, neutral: u32) -> Self {
        Self {
            male,
            female,
            neutral,
        }
    }
}

// ============================================================================
// Dictionaries
// ============================================================================

/// Fixed word inventories and lookup tables.
///
/// Fields are public; callers extend the open-ended tables directly or
/// through the `add_*` helpers. All membership checks expect lowercased
/// input except the state-abbreviation table, which is consulted with raw
/// span text.
#[derive(Debug, Clone)]
pub struct Dictionaries {
    /// First person pronouns ("i", "we", ...).
    pub first_person_pronouns: HashSet<String>,
    /// Second person pronouns ("you", ...).
    pub second_person_pronouns: HashSet<String>,
    /// Third person pronouns ("he", "they", ...).
    pub third_person_pronouns: HashSet<String>,
    /// Every pronoun, including WH forms.
    pub all_pronouns: HashSet<String>,
    /// Relative pronouns ("that", "who", ...).
    pub relative_pronouns: HashSet<String>,
    /// Grammatically singular pronouns.
    pub singular_pronouns: HashSet<String>,
    /// Grammatically plural pronouns.
    pub plural_pronouns: HashSet<String>,
    /// Male pronouns.
    pub male_pronouns: HashSet<String>,
    /// Female pronouns.
    pub female_pronouns: HashSet<String>,
    /// Animate pronouns.
    pub animate_pronouns: HashSet<String>,
    /// Inanimate pronouns.
    pub inanimate_pronouns: HashSet<String>,
    /// Pronouns compatible with a PERSON antecedent.
    pub person_pronouns: HashSet<String>,
    /// Pronouns compatible with an organization antecedent.
    pub organization_pronouns: HashSet<String>,
    /// Pronouns compatible with a LOCATION antecedent.
    pub location_pronouns: HashSet<String>,
    /// Pronouns compatible with a DATE or TIME antecedent.
    pub date_time_pronouns: HashSet<String>,
    /// Pronouns compatible with a MONEY, PERCENT or NUMBER antecedent.
    pub money_percent_number_pronouns: HashSet<String>,
    /// Pronouns compatible with a geo-political entity antecedent.
    pub gpe_pronouns: HashSet<String>,
    /// Pronouns compatible with a facility, vehicle or weapon antecedent.
    pub facility_vehicle_weapon_pronouns: HashSet<String>,

    /// Corporate suffixes stripped during head-string extraction, lowercased
    /// without the trailing period.
    pub corporate_suffixes: HashSet<String>,
    /// Stop words removed before cluster word-subset comparison.
    pub stop_words: HashSet<String>,
    /// Spelled-out number words.
    pub number_words: HashSet<String>,
    /// Directional modifiers for the incompatible-modifier test.
    pub directional_modifiers: HashSet<String>,
    /// Directional modifiers, with compounds, for the different-location test.
    pub location_modifiers: HashSet<String>,

    /// Place name (lowercased) to its demonyms, place included.
    pub demonyms: HashMap<String, HashSet<String>>,
    /// Flat set of every known demonym and place name, lowercased.
    pub demonym_set: HashSet<String>,
    /// State abbreviation to full state name, raw case.
    pub states_abbreviation: HashMap<String, String>,

    /// Optional word list: words attested as male.
    pub male_words: HashSet<String>,
    /// Optional word list: words attested as female.
    pub female_words: HashSet<String>,
    /// Optional word list: words attested as neutral.
    pub neutral_words: HashSet<String>,
    /// Optional word list: words attested as animate.
    pub animate_words: HashSet<String>,
    /// Optional word list: words attested as inanimate.
    pub inanimate_words: HashSet<String>,
    /// Optional word list: words attested as singular.
    pub singular_words: HashSet<String>,
    /// Optional word list: words attested as plural.
    pub plural_words: HashSet<String>,

    /// Gender-number counts keyed by lowercased token sequences. The `"!"`
    /// token is the placeholder marker in wildcard keys.
    pub gender_number: HashMap<Vec<String>, GenderCounts>,
}

impl Dictionaries {
    /// Build the complete English inventory with empty open-ended tables.
    #[must_use]
    pub fn english() -> Self {
        let first_person_pronouns = to_set(FIRST_PERSON);
        let second_person_pronouns = to_set(SECOND_PERSON);
        let third_person_pronouns = to_set(THIRD_PERSON);

        let mut all_pronouns = HashSet::new();
        all_pronouns.extend(first_person_pronouns.iter().cloned());
        all_pronouns.extend(second_person_pronouns.iter().cloned());
        all_pronouns.extend(third_person_pronouns.iter().cloned());
        all_pronouns.extend(OTHER_PRONOUNS.iter().map(|w| (*w).to_string()));

        Self {
            first_person_pronouns,
            second_person_pronouns,
            third_person_pronouns,
            all_pronouns,
            relative_pronouns: to_set(RELATIVE_PRONOUNS),
            singular_pronouns: to_set(SINGULAR_PRONOUNS),
            plural_pronouns: to_set(PLURAL_PRONOUNS),
            male_pronouns: to_set(MALE_PRONOUNS),
            female_pronouns: to_set(FEMALE_PRONOUNS),
            animate_pronouns: to_set(ANIMATE_PRONOUNS),
            inanimate_pronouns: to_set(INANIMATE_PRONOUNS),
            person_pronouns: to_set(ANIMATE_PRONOUNS),
            organization_pronouns: to_set(ORGANIZATION_PRONOUNS),
            location_pronouns: to_set(LOCATION_PRONOUNS),
            date_time_pronouns: to_set(DATE_TIME_PRONOUNS),
            money_percent_number_pronouns: to_set(MONEY_PERCENT_NUMBER_PRONOUNS),
            gpe_pronouns: to_set(GPE_PRONOUNS),
            facility_vehicle_weapon_pronouns: to_set(FACILITY_VEHICLE_WEAPON_PRONOUNS),
            corporate_suffixes: to_set(CORPORATE_SUFFIXES),
            stop_words: to_set(CLUSTER_STOP_WORDS),
            number_words: to_set(NUMBER_WORDS),
            directional_modifiers: to_set(DIRECTIONAL_MODIFIERS),
            location_modifiers: to_set(LOCATION_MODIFIERS),
            demonyms: HashMap::new(),
            demonym_set: HashSet::new(),
            states_abbreviation: HashMap::new(),
            male_words: HashSet::new(),
            female_words: HashSet::new(),
            neutral_words: HashSet::new(),
            animate_words: HashSet::new(),
            inanimate_words: HashSet::new(),
            singular_words: HashSet::new(),
            plural_words: HashSet::new(),
            gender_number: HashMap::new(),
        }
    }

    /// Register a place and its demonyms. The place itself joins the
    /// demonym set, matching how demonym resource lines are ingested.
    pub fn add_demonyms(&mut self, place: &str, demonyms: &[&str]) {
        let place = place.to_lowercase();
        let entry = self.demonyms.entry(place.clone()).or_default();
        entry.insert(place.clone());
        self.demonym_set.insert(place);
        for d in demonyms {
            let d = d.to_lowercase();
            entry.insert(d.clone());
            self.demonym_set.insert(d);
        }
    }

    /// Register a state abbreviation, raw case ("Ala." to "Alabama").
    pub fn add_state_abbreviation(&mut self, abbreviation: &str, full_name: &str) {
        self.states_abbreviation
            .insert(abbreviation.to_string(), full_name.to_string());
    }

    /// Register gender-number counts for a lowercased token-sequence key.
    pub fn add_gender_counts(&mut self, key: &[&str], counts: GenderCounts) {
        self.gender_number
            .insert(key.iter().map(|w| (*w).to_string()).collect(), counts);
    }

    /// Look up gender-number counts for a token-sequence key.
    #[must_use]
    pub fn gender_counts(&self, key: &[String]) -> Option<GenderCounts> {
        self.gender_number.get(key).copied()
    }

    /// True when `word` is a corporate suffix, with or without a trailing
    /// period ("Inc", "inc.", "LTD").
    #[must_use]
    pub fn is_corporate_suffix(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        let trimmed = lower.strip_suffix('.').unwrap_or(&lower);
        self.corporate_suffixes.contains(trimmed)
    }

    /// True when some value of the state-abbreviation table equals `name`.
    #[must_use]
    pub fn is_state_name(&self, name: &str) -> bool {
        self.states_abbreviation.values().any(|v| v == name)
    }
}

impl Default for Dictionaries {
    fn default() -> Self {
        DEFAULT_DICTIONARIES.clone()
    }
}

//! Detector definitions and the keyword-indexed detector set.

mod builtin;

use std::collections::HashMap;
use std::fmt;

use aho_corasick::AhoCorasick;
use regex::Regex;

use crate::error::DetectorError;

pub use builtin::{BUILTIN, DetectorDef};

/// A compiled detector ready for scanning.
///
/// Each detector pairs a regular expression with the name and description
/// used for reporting, plus optional keywords for Aho-Corasick
/// pre-filtering.
#[derive(Debug, Clone)]
pub struct Detector {
    /// Unique kebab-case name (e.g. `"aws-access-key-id"`).
    pub name: Box<str>,
    /// Short human-readable description shown in listings.
    pub description: Box<str>,
    /// Compiled regular expression matched against each diff line.
    pub regex: Regex,
    /// Case-insensitive keywords for pre-filtering. If non-empty, the
    /// detector is only tested against lines containing at least one keyword.
    pub keywords: Box<[Box<str>]>,
}

impl Detector {
    /// Compiles a definition into a detector.
    ///
    /// Returns `DetectorError::InvalidRegex` if the regex is malformed.
    pub fn from_def(def: &DetectorDef) -> Result<Self, DetectorError> {
        let regex = Regex::new(def.regex).map_err(|source| DetectorError::InvalidRegex {
            name: def.name.to_string(),
            source,
        })?;

        Ok(Self {
            name: def.name.into(),
            description: def.description.into(),
            regex,
            keywords: def.keywords.iter().map(|&k| k.into()).collect(),
        })
    }
}

/// Ordered collection of detectors with Aho-Corasick pre-filtering.
///
/// Detectors are kept sorted lexicographically by name so that evaluation
/// order — and therefore finding order — is deterministic. The keyword
/// automaton lets the engine cheaply decide which detectors to run against
/// a given line.
pub struct DetectorSet {
    detectors: Vec<Detector>,
    keyword_automaton: Option<AhoCorasick>,
    keyword_to_detectors: Vec<Vec<usize>>,
    detectors_without_keywords: Vec<usize>,
}

impl fmt::Debug for DetectorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorSet")
            .field("detectors", &self.detectors.len())
            .field("detectors_without_keywords", &self.detectors_without_keywords.len())
            .finish_non_exhaustive()
    }
}

impl DetectorSet {
    /// Creates a set containing all built-in detectors.
    pub fn builtin() -> Result<Self, DetectorError> {
        let detectors = BUILTIN.iter().map(Detector::from_def).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(detectors))
    }

    /// Creates a set from a list of detectors, sorting them by name and
    /// building the keyword index.
    #[must_use]
    pub fn new(mut detectors: Vec<Detector>) -> Self {
        detectors.sort_by(|a, b| a.name.cmp(&b.name));

        let keyword_index = build_keyword_index(&detectors);
        let keyword_automaton = build_automaton(&keyword_index.keywords);

        Self {
            detectors,
            keyword_automaton,
            keyword_to_detectors: keyword_index.keyword_to_detectors,
            detectors_without_keywords: keyword_index.detectors_without_keywords,
        }
    }

    /// Consumes the set and returns the underlying detector list.
    #[must_use]
    pub fn into_detectors(self) -> Vec<Detector> {
        self.detectors
    }

    /// Returns all detectors in evaluation order.
    #[must_use]
    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// Looks up a detector by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Detector> {
        self.detectors.iter().find(|d| d.name.as_ref() == name)
    }

    /// Returns the total number of detectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Returns `true` if the set contains no detectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Returns the Aho-Corasick automaton built from detector keywords, if
    /// any keywords were registered.
    #[must_use]
    pub(crate) fn keyword_automaton(&self) -> Option<&AhoCorasick> {
        self.keyword_automaton.as_ref()
    }

    /// Maps each keyword index to the detector indices that declared it.
    #[must_use]
    pub(crate) fn keyword_to_detectors(&self) -> &[Vec<usize>] {
        &self.keyword_to_detectors
    }

    /// Returns indices of detectors that have no keywords and must be
    /// tested against every line unconditionally.
    #[must_use]
    pub(crate) fn detectors_without_keywords(&self) -> &[usize] {
        &self.detectors_without_keywords
    }
}

struct KeywordIndex {
    keywords: Vec<String>,
    keyword_to_detectors: Vec<Vec<usize>>,
    detectors_without_keywords: Vec<usize>,
}

fn build_keyword_index(detectors: &[Detector]) -> KeywordIndex {
    let mut keywords = Vec::new();
    let mut keyword_to_detectors = Vec::new();
    let mut detectors_without_keywords = Vec::new();
    let mut keyword_positions: HashMap<String, usize> = HashMap::new();

    for (detector_idx, detector) in detectors.iter().enumerate() {
        if detector.keywords.is_empty() {
            detectors_without_keywords.push(detector_idx);
        } else {
            index_detector_keywords(
                detector_idx,
                detector,
                &mut keywords,
                &mut keyword_to_detectors,
                &mut keyword_positions,
            );
        }
    }

    KeywordIndex {
        keywords,
        keyword_to_detectors,
        detectors_without_keywords,
    }
}

fn index_detector_keywords(
    detector_idx: usize,
    detector: &Detector,
    keywords: &mut Vec<String>,
    keyword_to_detectors: &mut Vec<Vec<usize>>,
    keyword_positions: &mut HashMap<String, usize>,
) {
    for keyword in &detector.keywords {
        let keyword_str = keyword.to_string();

        if let Some(&existing_idx) = keyword_positions.get(&keyword_str) {
            keyword_to_detectors[existing_idx].push(detector_idx);
        } else {
            let new_idx = keywords.len();
            keyword_positions.insert(keyword_str.clone(), new_idx);
            keywords.push(keyword_str);
            keyword_to_detectors.push(vec![detector_idx]);
        }
    }
}

fn build_automaton(keywords: &[String]) -> Option<AhoCorasick> {
    if keywords.is_empty() {
        return None;
    }

    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(aho_corasick::MatchKind::LeftmostLongest)
        .build(keywords)
        .ok()
}

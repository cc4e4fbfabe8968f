//! Rule-based named-entity recognition for organizations and dates

use crate::error::{Result, ResumeAnalyzerError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Entities pulled from a single sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceEntities {
    pub organizations: Vec<String>,
    pub dates: Vec<String>,
}

/// Narrow seam for named-entity recognition.
///
/// Only ORG and DATE spans are consumed downstream; any recognizer that can
/// produce those two lists per sentence can stand behind this trait.
pub trait EntityRecognizer {
    fn entities(&self, sentence: &str) -> SentenceEntities;
}

/// Heuristic recognizer built on capitalized-sequence assembly and date
/// patterns. No model files, no external services.
pub struct RuleBasedRecognizer {
    org_suffixes: HashSet<String>,
    attachment_cues: HashSet<String>,
    sequence_stop_words: HashSet<String>,
    acronym_exclusions: HashSet<String>,
    date_patterns: Vec<Regex>,
}

impl RuleBasedRecognizer {
    pub fn new() -> Result<Self> {
        // Ordered: earlier patterns claim their spans first, so a month-year
        // hit suppresses the bare-year hit inside it.
        let date_patterns = vec![
            compile(r"(?i)\b(?:19|20)\d{2}\s*(?:-|–|—|to)\s*(?:(?:19|20)\d{2}|present|current)\b")?,
            compile(
                r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)\.?\s+(?:\d{1,2},?\s+)?(?:19|20)\d{2}\b",
            )?,
            compile(r"\b(?:19|20)\d{2}\b")?,
            compile(r"(?i)\b\d+\+?\s+(?:years?|months?)\b")?,
        ];

        Ok(Self {
            org_suffixes: collect_lower(&[
                "inc", "corp", "ltd", "llc", "company", "corporation", "enterprises",
                "university", "institute", "college", "academy", "school", "foundation",
                "technologies", "labs", "solutions", "systems", "group", "consulting",
                "agency", "bank",
            ]),
            attachment_cues: collect_lower(&["at", "from"]),
            sequence_stop_words: collect_lower(&[
                "a", "an", "the", "i", "my", "our", "we", "he", "she", "they", "it",
                "this", "that", "these", "those", "his", "her", "their", "its", "in",
                "on", "at", "of", "for", "with", "from", "to", "and", "but", "or", "as",
                "by", "is", "was", "were", "been", "skills", "education", "experience",
                "summary", "objective", "references", "projects", "awards", "contact",
                "resume", "profile",
            ]),
            acronym_exclusions: collect_lower(&[
                "mba", "phd", "gpa", "bsc", "msc", "usa", "ceo", "cto", "cfo", "sql",
                "aws", "gcp", "html", "css", "php", "xml", "json", "api", "rest", "http",
            ]),
            date_patterns,
        })
    }

    /// Assemble capitalized word runs and keep the ones that look like
    /// organizations.
    ///
    /// A run is accepted when it carries an organization suffix, follows an
    /// attachment cue (`at`, `from`), or opens with a short all-caps acronym.
    fn extract_organizations(&self, sentence: &str) -> Vec<String> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        let mut organizations = Vec::new();
        let mut seen = HashSet::new();
        let mut skip_until = 0;

        for i in 0..words.len() {
            if i < skip_until {
                continue;
            }

            let clean = clean_word(words[i]);
            if clean.is_empty() || !starts_uppercase(clean) {
                continue;
            }
            if self.sequence_stop_words.contains(&clean.to_lowercase()) {
                continue;
            }

            let mut parts = vec![clean.to_string()];
            let mut j = i + 1;

            if !ends_clause(words[i]) {
                while j < words.len() {
                    let raw = words[j];
                    let next = clean_word(raw);

                    if !next.is_empty()
                        && starts_uppercase(next)
                        && !self.sequence_stop_words.contains(&next.to_lowercase())
                    {
                        parts.push(next.to_string());
                        j += 1;
                        if ends_clause(raw) {
                            break;
                        }
                        continue;
                    }

                    // Lowercase connectors join runs like "University of Michigan"
                    let is_connector = next == "of" || raw == "&";
                    if is_connector && j + 1 < words.len() {
                        let after = clean_word(words[j + 1]);
                        if starts_uppercase(after)
                            && !self.sequence_stop_words.contains(&after.to_lowercase())
                        {
                            parts.push(if raw == "&" { "&" } else { "of" }.to_string());
                            parts.push(after.to_string());
                            j += 2;
                            if ends_clause(words[j - 1]) {
                                break;
                            }
                            continue;
                        }
                    }

                    break;
                }
            }
            skip_until = j;

            if self.accept_as_organization(&parts, i, &words) {
                let name = parts.join(" ");
                let key = name.to_lowercase();
                if seen.insert(key) {
                    organizations.push(name);
                }
            }
        }

        organizations
    }

    fn accept_as_organization(&self, parts: &[String], start: usize, words: &[&str]) -> bool {
        if parts
            .iter()
            .any(|p| self.org_suffixes.contains(&p.to_lowercase()))
        {
            return true;
        }

        if start > 0 {
            let prev = clean_word(words[start - 1]).to_lowercase();
            if self.attachment_cues.contains(&prev) {
                return true;
            }
        }

        self.is_acronym(&parts[0])
    }

    fn is_acronym(&self, word: &str) -> bool {
        (3..=6).contains(&word.len())
            && word.chars().all(|c| c.is_ascii_uppercase())
            && !self.acronym_exclusions.contains(&word.to_lowercase())
    }

    /// Collect date spans in sentence order; earlier patterns claim their
    /// byte ranges so later ones cannot report overlapping fragments.
    fn extract_dates(&self, sentence: &str) -> Vec<String> {
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        let mut found: Vec<(usize, String)> = Vec::new();

        for pattern in &self.date_patterns {
            for mat in pattern.find_iter(sentence) {
                let overlaps = claimed
                    .iter()
                    .any(|&(s, e)| mat.start() < e && s < mat.end());
                if !overlaps {
                    claimed.push((mat.start(), mat.end()));
                    found.push((mat.start(), mat.as_str().to_string()));
                }
            }
        }

        found.sort_by_key(|&(start, _)| start);

        let mut seen = HashSet::new();
        found
            .into_iter()
            .filter(|(_, text)| seen.insert(text.to_lowercase()))
            .map(|(_, text)| text)
            .collect()
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    fn entities(&self, sentence: &str) -> SentenceEntities {
        SentenceEntities {
            organizations: self.extract_organizations(sentence),
            dates: self.extract_dates(sentence),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ResumeAnalyzerError::TextProcessing(format!("Invalid date pattern: {}", e)))
}

fn collect_lower(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

fn clean_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().map_or(false, |c| c.is_uppercase())
}

fn ends_clause(raw: &str) -> bool {
    raw.ends_with([',', '.', ';', ':', ')', '!', '?'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> RuleBasedRecognizer {
        RuleBasedRecognizer::new().unwrap()
    }

    #[test]
    fn test_org_with_suffix_and_duration() {
        let entities = recognizer().entities("I worked at Acme Corp for 3 years.");

        assert_eq!(entities.organizations, vec!["Acme Corp"]);
        assert_eq!(entities.dates, vec!["3 years"]);
    }

    #[test]
    fn test_university_with_connector() {
        let entities =
            recognizer().entities("Earned a degree from the University of Michigan in 2018.");

        assert_eq!(entities.organizations, vec!["University of Michigan"]);
        assert_eq!(entities.dates, vec!["2018"]);
    }

    #[test]
    fn test_acronym_organizations() {
        let entities = recognizer().entities("Studied at MIT before joining IBM Research.");

        assert!(entities.organizations.contains(&"MIT".to_string()));
        assert!(entities.organizations.contains(&"IBM Research".to_string()));
    }

    #[test]
    fn test_degree_acronyms_are_not_organizations() {
        let entities = recognizer().entities("Completed an MBA with a strong GPA.");

        assert!(entities.organizations.is_empty());
    }

    #[test]
    fn test_month_year_suppresses_bare_year() {
        let entities = recognizer().entities("Graduated from Stanford University in June 2019.");

        assert_eq!(entities.organizations, vec!["Stanford University"]);
        assert_eq!(entities.dates, vec!["June 2019"]);
    }

    #[test]
    fn test_year_ranges() {
        let entities = recognizer().entities("Software Engineer at Globex Corporation, 2019-2021.");
        assert_eq!(entities.dates, vec!["2019-2021"]);

        let entities = recognizer().entities("Acme Corp, 2020 to Present.");
        assert_eq!(entities.dates, vec!["2020 to Present"]);
    }

    #[test]
    fn test_clause_punctuation_ends_a_run() {
        let entities = recognizer().entities("I left Acme Corp, Boston for a new role.");

        assert_eq!(entities.organizations, vec!["Acme Corp"]);
    }

    #[test]
    fn test_duplicates_collapse_to_first_mention() {
        let entities =
            recognizer().entities("Acme Corp hired me because Acme Corp was growing in 2020.");

        assert_eq!(entities.organizations, vec!["Acme Corp"]);
        assert_eq!(entities.dates, vec!["2020"]);
    }

    #[test]
    fn test_plain_sentence_has_no_entities() {
        let entities = recognizer().entities("worked with many teams on shared goals.");

        assert!(entities.organizations.is_empty());
        assert!(entities.dates.is_empty());
    }
}

//! Resume parsing: skills, education, experience and summary extraction

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::entities::{EntityRecognizer, RuleBasedRecognizer};
use crate::processing::lexicon::Lexicon;
use crate::processing::matcher::LexiconMatcher;
use crate::processing::text_processor::TextProcessor;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Frequency-ranked skills found in a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    /// Distinct skills, most frequent first; ties in first-seen order.
    pub all_skills: Vec<String>,
    /// Leading slice of `all_skills`, at most the configured top count.
    pub top_skills: Vec<String>,
    pub skill_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationProfile {
    pub education_sentences: Vec<String>,
    pub institutions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceProfile {
    pub experience_sentences: Vec<String>,
    pub organizations: Vec<String>,
    pub dates: Vec<String>,
    pub possible_job_titles: Vec<String>,
}

/// Complete structured view of one resume. Built once per parse; re-analysis
/// replaces the whole value rather than merging into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub skills: SkillProfile,
    pub education: EducationProfile,
    pub experience: ExperienceProfile,
    pub summary: String,
    pub full_text: String,
}

/// Orchestrates skill matching, sentence filtering and entity recognition
/// over raw resume text.
pub struct ResumeParser {
    skills_matcher: LexiconMatcher,
    education_filter: LexiconMatcher,
    experience_filter: LexiconMatcher,
    job_title_pattern: Regex,
    recognizer: Box<dyn EntityRecognizer + Send + Sync>,
    text_processor: TextProcessor,
}

impl ResumeParser {
    /// Build a parser with the default rule-based entity recognizer.
    pub fn new(lexicon: &Lexicon, top_skills: usize) -> Result<Self> {
        let recognizer = Box::new(RuleBasedRecognizer::new()?);
        Self::with_recognizer(lexicon, top_skills, recognizer)
    }

    /// Build a parser around any entity recognizer implementation.
    pub fn with_recognizer(
        lexicon: &Lexicon,
        top_skills: usize,
        recognizer: Box<dyn EntityRecognizer + Send + Sync>,
    ) -> Result<Self> {
        Ok(Self {
            skills_matcher: LexiconMatcher::new(&lexicon.skills, top_skills)?,
            education_filter: LexiconMatcher::new(&lexicon.education_markers, top_skills)?,
            experience_filter: LexiconMatcher::new(&lexicon.experience_markers, top_skills)?,
            job_title_pattern: build_job_title_pattern(&lexicon.job_title_prefixes)?,
            recognizer,
            text_processor: TextProcessor::new(),
        })
    }

    /// Parse raw resume text into a structured analysis.
    ///
    /// Empty or near-empty text is not an error: the result simply carries
    /// empty profiles and a header-only summary.
    pub fn parse(&self, text: &str) -> ResumeAnalysis {
        if text.trim().is_empty() {
            warn!("Resume text is empty, producing an empty analysis");
        }

        let skills = self.extract_skills(text);
        let sentences = self.text_processor.split_sentences(text);
        let education = self.extract_education(&sentences);
        let experience = self.extract_experience(text, &sentences);
        let summary = self.generate_summary(&skills, &education, &experience);

        debug!(
            "Parsed resume: {} skills, {} institutions, {} organizations, {} titles",
            skills.all_skills.len(),
            education.institutions.len(),
            experience.organizations.len(),
            experience.possible_job_titles.len()
        );

        ResumeAnalysis {
            skills,
            education,
            experience,
            summary,
            full_text: text.to_string(),
        }
    }

    pub fn extract_skills(&self, text: &str) -> SkillProfile {
        let matches = self.skills_matcher.find_matches(text);
        SkillProfile {
            all_skills: matches.all,
            top_skills: matches.top,
            skill_counts: matches.counts,
        }
    }

    fn extract_education(&self, sentences: &[String]) -> EducationProfile {
        let mut education_sentences = Vec::new();
        let mut institutions = Vec::new();
        let mut seen = HashSet::new();

        for sentence in sentences {
            if !self.education_filter.contains_any(sentence) {
                continue;
            }
            for org in self.recognizer.entities(sentence).organizations {
                if seen.insert(org.to_lowercase()) {
                    institutions.push(org);
                }
            }
            education_sentences.push(sentence.clone());
        }

        EducationProfile {
            education_sentences,
            institutions,
        }
    }

    fn extract_experience(&self, text: &str, sentences: &[String]) -> ExperienceProfile {
        let mut experience_sentences = Vec::new();
        let mut organizations = Vec::new();
        let mut dates = Vec::new();
        let mut seen_orgs = HashSet::new();
        let mut seen_dates = HashSet::new();

        for sentence in sentences {
            if !self.experience_filter.contains_any(sentence) {
                continue;
            }
            let entities = self.recognizer.entities(sentence);
            for org in entities.organizations {
                if seen_orgs.insert(org.to_lowercase()) {
                    organizations.push(org);
                }
            }
            for date in entities.dates {
                if seen_dates.insert(date.to_lowercase()) {
                    dates.push(date);
                }
            }
            experience_sentences.push(sentence.clone());
        }

        // Job titles come from the raw text, independent of the sentence filter
        let mut possible_job_titles = Vec::new();
        let mut seen_titles = HashSet::new();
        for mat in self.job_title_pattern.find_iter(text) {
            let title = mat.as_str().to_string();
            if seen_titles.insert(title.to_lowercase()) {
                possible_job_titles.push(title);
            }
        }

        ExperienceProfile {
            experience_sentences,
            organizations,
            dates,
            possible_job_titles,
        }
    }

    /// Fixed-order narrative: skills, education, experience, roles. Sections
    /// with no data are omitted entirely.
    fn generate_summary(
        &self,
        skills: &SkillProfile,
        education: &EducationProfile,
        experience: &ExperienceProfile,
    ) -> String {
        let mut summary = String::from("Resume Summary:\n\n");

        if !skills.top_skills.is_empty() {
            summary.push_str(&format!("Skills: {}\n\n", skills.top_skills.join(", ")));
        }
        if !education.institutions.is_empty() {
            summary.push_str(&format!(
                "Education: {}\n\n",
                education.institutions.join(", ")
            ));
        }
        if !experience.organizations.is_empty() {
            summary.push_str(&format!(
                "Experience: {}\n\n",
                experience.organizations.join(", ")
            ));
        }
        if !experience.possible_job_titles.is_empty() {
            summary.push_str(&format!(
                "Roles: {}\n",
                experience.possible_job_titles.join(", ")
            ));
        }

        summary
    }
}

/// Job titles are a seniority/role word followed by one capitalized word,
/// e.g. "Senior Engineer" or "Lead Developer".
fn build_job_title_pattern(prefixes: &[String]) -> Result<Regex> {
    let alternation = prefixes.join("|");
    Regex::new(&format!(r"\b(?i:{})\s+[A-Z][A-Za-z]+\b", alternation)).map_err(|e| {
        ResumeAnalyzerError::TextProcessing(format!("Invalid job title pattern: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ResumeParser {
        ResumeParser::new(&Lexicon::builtin(), 10).unwrap()
    }

    #[test]
    fn test_skills_and_organizations_scenario() {
        let analysis = parser()
            .parse("I have experience with Python and Java. I worked at Acme Corp for 3 years.");

        assert!(analysis.skills.all_skills.contains(&"python".to_string()));
        assert!(analysis.skills.all_skills.contains(&"java".to_string()));
        assert_eq!(
            analysis.experience.organizations,
            vec!["Acme Corp".to_string()]
        );
        assert!(analysis.experience.dates.contains(&"3 years".to_string()));
        assert!(analysis.summary.contains("Skills: python, java"));
    }

    #[test]
    fn test_empty_text_yields_empty_analysis() {
        let analysis = parser().parse("");

        assert!(analysis.skills.all_skills.is_empty());
        assert!(analysis.education.institutions.is_empty());
        assert!(analysis.experience.organizations.is_empty());
        assert_eq!(analysis.summary, "Resume Summary:\n\n");
    }

    #[test]
    fn test_top_skills_is_bounded_prefix() {
        let text = "python java javascript c++ c# ruby php swift kotlin go rust html css sql git";
        let analysis = parser().parse(text);

        assert!(analysis.skills.all_skills.len() > 10);
        assert_eq!(analysis.skills.top_skills.len(), 10);
        assert_eq!(
            analysis.skills.top_skills[..],
            analysis.skills.all_skills[..10]
        );
    }

    #[test]
    fn test_education_sentences_and_institutions() {
        let text = "Bachelor of Science from Stanford University, graduated in June 2019. \
                    Enjoys hiking on weekends.";
        let analysis = parser().parse(text);

        assert_eq!(analysis.education.education_sentences.len(), 1);
        assert_eq!(
            analysis.education.institutions,
            vec!["Stanford University".to_string()]
        );
        assert!(analysis.summary.contains("Education: Stanford University"));
    }

    #[test]
    fn test_job_titles_come_from_raw_text() {
        let text = "My role as Senior Engineer at Initech Corporation lasted 4 years.\n\
                    Lead Developer duties included mentoring.";
        let analysis = parser().parse(text);

        assert!(analysis
            .experience
            .possible_job_titles
            .contains(&"Senior Engineer".to_string()));
        assert!(analysis
            .experience
            .possible_job_titles
            .contains(&"Lead Developer".to_string()));
        assert_eq!(
            analysis.experience.organizations,
            vec!["Initech Corporation".to_string()]
        );
    }

    #[test]
    fn test_duplicate_titles_collapse_case_insensitively() {
        let text = "Senior Engineer, then SENIOR ENGINEER again; job history repeats.";
        let analysis = parser().parse(text);

        assert_eq!(
            analysis.experience.possible_job_titles,
            vec!["Senior Engineer".to_string()]
        );
    }

    #[test]
    fn test_summary_sections_appear_in_fixed_order() {
        let text = "Skilled in Python and SQL development work. \
                    Master of Science from MIT University. \
                    My position at Acme Corp as Senior Analyst spanned 2019-2021.";
        let analysis = parser().parse(text);
        let summary = &analysis.summary;

        let skills_at = summary.find("Skills:").unwrap();
        let education_at = summary.find("Education:").unwrap();
        let experience_at = summary.find("Experience:").unwrap();
        let roles_at = summary.find("Roles:").unwrap();

        assert!(skills_at < education_at);
        assert!(education_at < experience_at);
        assert!(experience_at < roles_at);
    }
}

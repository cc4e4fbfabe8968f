//! Resume-to-job-description similarity scoring and skill gap analysis

use crate::error::Result;
use crate::processing::lexicon::Lexicon;
use crate::processing::matcher::LexiconMatcher;
use crate::processing::parser::ResumeAnalysis;
use crate::processing::text_processor::TextProcessor;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Outcome of matching one resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchResult {
    pub job_title: String,
    pub company: Option<String>,
    /// Vector-space similarity between the full texts, 0-100.
    pub match_percentage: f64,
    /// Share of the job's recognized skills found in the resume, 0-100.
    pub skill_match_percentage: f64,
    pub job_description: String,
    pub skills_matched: Vec<String>,
    pub skills_missing: Vec<String>,
    pub recommendations: Vec<String>,
    pub matched_at: DateTime<Utc>,
}

/// Scores resumes against job descriptions with a two-document tf-idf space.
pub struct JobMatcher {
    skills_matcher: LexiconMatcher,
    text_processor: TextProcessor,
}

impl JobMatcher {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        // top_n only bounds the `top` slice, which job matching never reads
        let skills_matcher = LexiconMatcher::new(&lexicon.skills, lexicon.skills.len().max(1))?;
        Ok(Self {
            skills_matcher,
            text_processor: TextProcessor::new(),
        })
    }

    /// Cosine similarity of the two documents in a tf-idf space built over
    /// exactly those documents, scaled to 0-100 and rounded to 2 decimals.
    ///
    /// A document with no usable terms after stop-word removal yields the
    /// zero vector, and the similarity is 0.
    pub fn compute_similarity(&self, resume_text: &str, job_text: &str) -> f64 {
        let (resume_vector, job_vector) = self.tfidf_vectors(resume_text, job_text);
        let similarity = cosine_similarity(&resume_vector, &job_vector);
        round2(similarity * 100.0)
    }

    /// All lexicon skills found in the job description, ranked like resume
    /// skills: most frequent first, ties in first-appearance order.
    pub fn extract_job_skills(&self, job_description: &str) -> Vec<String> {
        self.skills_matcher.find_matches(job_description).all
    }

    /// Split the job's skills into those present in the resume and those
    /// absent. Comparison is case-insensitive; both halves keep the job
    /// skills' relative order.
    pub fn gap_analysis(
        &self,
        resume_skills: &[String],
        job_skills: &[String],
    ) -> (Vec<String>, Vec<String>) {
        let resume_set: HashSet<String> =
            resume_skills.iter().map(|s| s.to_lowercase()).collect();
        job_skills
            .iter()
            .cloned()
            .partition(|skill| resume_set.contains(&skill.to_lowercase()))
    }

    /// Cumulative threshold advice keyed off the similarity percentage.
    /// Empty at 80 and above.
    pub fn improvement_hints(&self, match_percentage: f64) -> Vec<String> {
        let mut hints = Vec::new();
        if match_percentage < 80.0 {
            hints.push("Focus on developing the missing skills listed above.".to_string());
        }
        if match_percentage < 70.0 {
            hints.push(
                "Consider tailoring your resume to highlight relevant experience for this role."
                    .to_string(),
            );
        }
        if match_percentage < 60.0 {
            hints.push(
                "Look for training or certification opportunities in the required skill areas."
                    .to_string(),
            );
        }
        if match_percentage < 50.0 {
            hints.push(
                "This role may require significant upskilling. Consider intermediate positions as stepping stones."
                    .to_string(),
            );
        }
        hints
    }

    /// Full matching pass: similarity, skill gap, and recommendations.
    pub fn match_job(
        &self,
        analysis: &ResumeAnalysis,
        job_title: &str,
        company: Option<String>,
        job_description: &str,
    ) -> JobMatchResult {
        if job_description.trim().is_empty() {
            warn!("Job description is empty; similarity and skill gap will be zero");
        }

        let match_percentage = self.compute_similarity(&analysis.full_text, job_description);
        let job_skills = self.extract_job_skills(job_description);
        let (skills_matched, skills_missing) =
            self.gap_analysis(&analysis.skills.all_skills, &job_skills);

        let skill_match_percentage = if job_skills.is_empty() {
            0.0
        } else {
            round2(skills_matched.len() as f64 / job_skills.len() as f64 * 100.0)
        };

        let recommendations = self.improvement_hints(match_percentage);

        debug!(
            "Job match '{}': similarity {:.2}%, {} of {} job skills present",
            job_title,
            match_percentage,
            skills_matched.len(),
            job_skills.len()
        );

        JobMatchResult {
            job_title: job_title.to_string(),
            company,
            match_percentage,
            skill_match_percentage,
            job_description: job_description.to_string(),
            skills_matched,
            skills_missing,
            recommendations,
            matched_at: Utc::now(),
        }
    }

    /// Tf-idf vectors for the two documents, L2-normalized.
    ///
    /// Idf is smoothed over the two-document corpus:
    /// `ln((1 + n) / (1 + df)) + 1` with n = 2.
    fn tfidf_vectors(&self, first: &str, second: &str) -> (Array1<f64>, Array1<f64>) {
        let first_tokens = self.text_processor.tokenize(first);
        let second_tokens = self.text_processor.tokenize(second);

        let mut vocabulary: Vec<String> = Vec::new();
        let mut term_index: HashMap<String, usize> = HashMap::new();
        for token in first_tokens.iter().chain(second_tokens.iter()) {
            if !term_index.contains_key(token) {
                term_index.insert(token.clone(), vocabulary.len());
                vocabulary.push(token.clone());
            }
        }

        let term_counts = |tokens: &[String]| {
            let mut counts = vec![0.0_f64; vocabulary.len()];
            for token in tokens {
                counts[term_index[token]] += 1.0;
            }
            counts
        };
        let first_counts = term_counts(&first_tokens);
        let second_counts = term_counts(&second_tokens);

        let documents = 2.0_f64;
        let mut first_vector = Array1::zeros(vocabulary.len());
        let mut second_vector = Array1::zeros(vocabulary.len());
        for term in 0..vocabulary.len() {
            let document_frequency = (first_counts[term] > 0.0) as usize as f64
                + (second_counts[term] > 0.0) as usize as f64;
            let idf = ((1.0 + documents) / (1.0 + document_frequency)).ln() + 1.0;
            first_vector[term] = first_counts[term] * idf;
            second_vector[term] = second_counts[term] * idf;
        }

        (l2_normalize(first_vector), l2_normalize(second_vector))
    }
}

fn l2_normalize(vector: Array1<f64>) -> Array1<f64> {
    let norm = vector.dot(&vector).sqrt();
    if norm == 0.0 {
        vector
    } else {
        vector / norm
    }
}

fn cosine_similarity(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        a.dot(b) / (norm_a * norm_b)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::parser::SkillProfile;

    fn matcher() -> JobMatcher {
        JobMatcher::new(&Lexicon::builtin()).unwrap()
    }

    fn analysis_with(full_text: &str, skills: &[&str]) -> ResumeAnalysis {
        let all: Vec<String> = skills.iter().map(|s| s.to_string()).collect();
        ResumeAnalysis {
            skills: SkillProfile {
                all_skills: all.clone(),
                top_skills: all.iter().take(10).cloned().collect(),
                skill_counts: all.iter().map(|s| (s.clone(), 1)).collect(),
            },
            full_text: full_text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_documents_score_hundred() {
        let matcher = matcher();
        let text = "Python developer with five years of Django experience";
        assert_eq!(matcher.compute_similarity(text, text), 100.0);
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        let matcher = matcher();
        let similarity = matcher.compute_similarity(
            "python java developer backend",
            "sales marketing outreach pipeline",
        );
        assert_eq!(similarity, 0.0);
    }

    #[test]
    fn test_stop_word_only_document_scores_zero() {
        let matcher = matcher();
        assert_eq!(
            matcher.compute_similarity("the and of with", "python developer"),
            0.0
        );
        assert_eq!(matcher.compute_similarity("", ""), 0.0);
    }

    #[test]
    fn test_partial_overlap_scores_between_bounds() {
        let matcher = matcher();
        let similarity = matcher.compute_similarity(
            "python developer with docker experience",
            "python engineer with kubernetes experience",
        );
        assert!(similarity > 0.0);
        assert!(similarity < 100.0);
    }

    #[test]
    fn test_job_skills_are_ranked_by_frequency() {
        let matcher = matcher();
        let skills = matcher.extract_job_skills(
            "Kubernetes required. We deploy Python and Kubernetes daily; Docker helps.",
        );
        assert_eq!(skills[0], "kubernetes");
        assert!(skills.contains(&"python".to_string()));
        assert!(skills.contains(&"docker".to_string()));
    }

    #[test]
    fn test_gap_analysis_preserves_job_order() {
        let matcher = matcher();
        let resume_skills = vec!["Docker".to_string()];
        let job_skills = vec![
            "docker".to_string(),
            "kubernetes".to_string(),
            "aws".to_string(),
        ];

        let (matched, missing) = matcher.gap_analysis(&resume_skills, &job_skills);
        assert_eq!(matched, vec!["docker".to_string()]);
        assert_eq!(
            missing,
            vec!["kubernetes".to_string(), "aws".to_string()]
        );
    }

    #[test]
    fn test_gap_analysis_with_identical_skill_sets() {
        let matcher = matcher();
        let skills = vec!["python".to_string(), "sql".to_string()];

        let (matched, missing) = matcher.gap_analysis(&skills, &skills);
        assert_eq!(matched, skills);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_improvement_hints_accumulate_below_thresholds() {
        let matcher = matcher();
        assert!(matcher.improvement_hints(85.0).is_empty());
        assert_eq!(
            matcher.improvement_hints(75.0),
            vec!["Focus on developing the missing skills listed above.".to_string()]
        );
        assert_eq!(
            matcher.improvement_hints(65.0)[1],
            "Consider tailoring your resume to highlight relevant experience for this role."
        );
        assert_eq!(
            matcher.improvement_hints(55.0)[2],
            "Look for training or certification opportunities in the required skill areas."
        );

        let hints = matcher.improvement_hints(45.0);
        assert_eq!(hints.len(), 4);
        assert_eq!(
            hints[3],
            "This role may require significant upskilling. Consider intermediate positions as stepping stones."
        );
    }

    #[test]
    fn test_match_job_composes_gap_and_percentages() {
        let matcher = matcher();
        let analysis = analysis_with(
            "Python developer with Docker experience.",
            &["python", "docker"],
        );
        let result = matcher.match_job(
            &analysis,
            "Platform Engineer",
            Some("Acme Corp".to_string()),
            "Looking for a Python engineer with Docker and Kubernetes. Kubernetes required.",
        );

        assert_eq!(result.job_title, "Platform Engineer");
        assert_eq!(result.company.as_deref(), Some("Acme Corp"));
        assert_eq!(
            result.skills_matched,
            vec!["python".to_string(), "docker".to_string()]
        );
        assert_eq!(result.skills_missing, vec!["kubernetes".to_string()]);
        assert_eq!(result.skill_match_percentage, 66.67);
        assert!(result.match_percentage >= 0.0);
        assert!(result.match_percentage <= 100.0);
        assert!(result.matched_at <= Utc::now());
    }

    #[test]
    fn test_match_job_without_lexicon_skills_in_description() {
        let matcher = matcher();
        let analysis = analysis_with("Python developer.", &["python"]);
        let result = matcher.match_job(
            &analysis,
            "Receptionist",
            None,
            "We need a friendly person who greets visitors warmly.",
        );

        assert!(result.skills_matched.is_empty());
        assert!(result.skills_missing.is_empty());
        assert_eq!(result.skill_match_percentage, 0.0);
    }
}

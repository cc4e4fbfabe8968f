//! Career-path scoring and advice generation

use crate::processing::parser::{ResumeAnalysis, SkillProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const LEADERSHIP_PHRASES: [&str; 3] = ["leadership", "management", "team lead"];
const COMMUNICATION_PHRASES: [&str; 3] = ["communication", "presentation", "public speaking"];

/// Catalog entry: a named career with its required skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    pub name: String,
    pub required_skills: Vec<String>,
}

/// Overlap between a resume's skills and one career profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatchResult {
    pub career_name: String,
    /// matched / required × 100, rounded to 2 decimals.
    pub match_percentage: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPathSummary {
    pub name: String,
    pub match_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerAdviceResult {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Missing skills from the top career matches, first-seen order, capped.
    pub recommended_skills: Vec<String>,
    pub career_paths: Vec<CareerPathSummary>,
    pub advice: String,
}

/// Scores resumes against the career catalog and derives narrative advice.
pub struct CareerAdvisor {
    catalog: Vec<CareerProfile>,
    top_careers: usize,
    recommended_skills_limit: usize,
}

impl CareerAdvisor {
    /// Advisor over the built-in ten-career catalog.
    pub fn new(top_careers: usize, recommended_skills_limit: usize) -> Self {
        Self::with_catalog(Self::builtin_catalog(), top_careers, recommended_skills_limit)
    }

    /// Advisor over a custom catalog. A profile without required skills can
    /// never be scored meaningfully, so that is rejected up front.
    pub fn with_catalog(
        catalog: Vec<CareerProfile>,
        top_careers: usize,
        recommended_skills_limit: usize,
    ) -> Self {
        for profile in &catalog {
            assert!(
                !profile.required_skills.is_empty(),
                "career profile '{}' has an empty required-skill list",
                profile.name
            );
        }
        Self {
            catalog,
            top_careers,
            recommended_skills_limit,
        }
    }

    pub fn catalog(&self) -> &[CareerProfile] {
        &self.catalog
    }

    /// Score every catalog entry against the resume's skills.
    ///
    /// Results are sorted by descending match percentage; equal percentages
    /// keep catalog order (the sort is stable).
    pub fn score_careers(&self, skills: &SkillProfile) -> Vec<CareerMatchResult> {
        let user_skills: HashSet<String> =
            skills.all_skills.iter().map(|s| s.to_lowercase()).collect();

        let mut results: Vec<CareerMatchResult> = self
            .catalog
            .iter()
            .map(|profile| {
                let (matching, missing): (Vec<String>, Vec<String>) = profile
                    .required_skills
                    .iter()
                    .cloned()
                    .partition(|skill| user_skills.contains(&skill.to_lowercase()));

                let match_percentage =
                    round2(matching.len() as f64 / profile.required_skills.len() as f64 * 100.0);

                CareerMatchResult {
                    career_name: profile.name.clone(),
                    match_percentage,
                    matching_skills: matching,
                    missing_skills: missing,
                }
            })
            .collect();

        results.sort_by(|a, b| b.match_percentage.partial_cmp(&a.match_percentage).unwrap());
        results
    }

    /// Fixed heuristic rules, evaluated in a fixed order. The phrase-set
    /// rules at the end emit each category strength at most once.
    pub fn assess(&self, analysis: &ResumeAnalysis) -> Assessment {
        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();

        if analysis.skills.top_skills.len() >= 5 {
            strengths.push("Strong technical skill set with diverse technologies".to_string());
        } else {
            weaknesses.push("Limited range of technical skills".to_string());
        }

        if !analysis.education.institutions.is_empty() {
            strengths.push("Formal education credentials".to_string());
        } else {
            weaknesses.push("Limited formal education information".to_string());
        }

        let organization_count = analysis.experience.organizations.len();
        if organization_count >= 2 {
            strengths.push("Experience across multiple organizations".to_string());
        } else if organization_count == 0 {
            weaknesses.push("Limited professional experience".to_string());
        }

        if analysis.experience.possible_job_titles.len() >= 2 {
            strengths.push("Diverse role experience".to_string());
        }

        let mut has_leadership = false;
        let mut has_communication = false;
        for skill in &analysis.skills.top_skills {
            if LEADERSHIP_PHRASES.contains(&skill.as_str()) {
                has_leadership = true;
            }
            if COMMUNICATION_PHRASES.contains(&skill.as_str()) {
                has_communication = true;
            }
        }
        if has_leadership {
            strengths.push("Leadership experience".to_string());
        }
        if has_communication {
            strengths.push("Strong communication skills".to_string());
        }

        Assessment {
            strengths,
            weaknesses,
        }
    }

    /// Combine career scoring with the assessment into a full advice result.
    pub fn advise(&self, analysis: &ResumeAnalysis) -> CareerAdviceResult {
        let assessment = self.assess(analysis);
        let top: Vec<CareerMatchResult> = self
            .score_careers(&analysis.skills)
            .into_iter()
            .take(self.top_careers)
            .collect();

        let mut recommended_skills = Vec::new();
        let mut seen = HashSet::new();
        for career_match in &top {
            for skill in &career_match.missing_skills {
                if seen.insert(skill.to_lowercase()) {
                    recommended_skills.push(skill.clone());
                }
            }
        }
        recommended_skills.truncate(self.recommended_skills_limit);

        let advice = self.compose_advice(&assessment, &top, &recommended_skills);
        let career_paths = top
            .into_iter()
            .map(|m| CareerPathSummary {
                name: m.career_name,
                match_percentage: m.match_percentage,
            })
            .collect();

        CareerAdviceResult {
            strengths: assessment.strengths,
            weaknesses: assessment.weaknesses,
            recommended_skills,
            career_paths,
            advice,
        }
    }

    fn compose_advice(
        &self,
        assessment: &Assessment,
        top: &[CareerMatchResult],
        recommended: &[String],
    ) -> String {
        let mut advice =
            String::from("Based on your resume analysis, here are some career insights:\n\n");

        advice.push_str("Strengths:\n");
        for strength in &assessment.strengths {
            advice.push_str(&format!("- {}\n", strength));
        }

        advice.push_str("\nAreas for Improvement:\n");
        for weakness in &assessment.weaknesses {
            advice.push_str(&format!("- {}\n", weakness));
        }

        advice.push_str("\nRecommended Career Paths:\n");
        for career_match in top {
            advice.push_str(&format!(
                "- {} (Match: {:.2}%)\n",
                career_match.career_name, career_match.match_percentage
            ));
        }

        advice.push_str("\nRecommended Skills to Learn:\n");
        for skill in recommended {
            advice.push_str(&format!("- {}\n", skill));
        }

        advice.push_str("\nGeneral Advice:\n");
        advice.push_str("- Keep your resume updated with your latest skills and experiences\n");
        advice.push_str("- Consider obtaining certifications in your field of interest\n");
        advice.push_str("- Build a portfolio of projects to showcase your skills\n");
        advice.push_str("- Network with professionals in your target career path\n");

        advice
    }

    /// The ten career profiles shipped with the analyzer
    fn builtin_catalog() -> Vec<CareerProfile> {
        let entries: [(&str, &[&str]); 10] = [
            (
                "Software Developer",
                &[
                    "python", "java", "javascript", "c++", "c#", "html", "css", "sql", "git",
                    "agile",
                ],
            ),
            (
                "Data Scientist",
                &[
                    "python", "r", "sql", "machine learning", "statistics", "pandas", "numpy",
                    "tensorflow", "data analysis",
                ],
            ),
            (
                "Web Developer",
                &[
                    "html", "css", "javascript", "react", "angular", "vue", "node.js", "php",
                    "django", "flask",
                ],
            ),
            (
                "DevOps Engineer",
                &[
                    "docker", "kubernetes", "aws", "azure", "gcp", "jenkins", "ci/cd", "git",
                    "linux", "bash",
                ],
            ),
            (
                "Product Manager",
                &[
                    "agile", "scrum", "jira", "product development", "user experience",
                    "market research", "leadership", "communication",
                ],
            ),
            (
                "UX/UI Designer",
                &[
                    "user experience", "user interface", "wireframing", "prototyping", "figma",
                    "sketch", "adobe xd", "design thinking",
                ],
            ),
            (
                "Cybersecurity Specialist",
                &[
                    "network security", "encryption", "firewall", "penetration testing",
                    "security auditing", "risk assessment", "compliance",
                ],
            ),
            (
                "AI Engineer",
                &[
                    "machine learning", "deep learning", "neural networks", "tensorflow",
                    "pytorch", "nlp", "computer vision", "python",
                ],
            ),
            (
                "Cloud Architect",
                &[
                    "aws", "azure", "gcp", "cloud migration", "serverless", "microservices",
                    "docker", "kubernetes",
                ],
            ),
            (
                "Business Analyst",
                &[
                    "data analysis", "requirements gathering", "sql", "tableau", "power bi",
                    "excel", "business intelligence", "communication",
                ],
            ),
        ];

        entries
            .iter()
            .map(|(name, skills)| CareerProfile {
                name: name.to_string(),
                required_skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect()
    }
}

impl Default for CareerAdvisor {
    fn default() -> Self {
        Self::new(3, 5)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::parser::{EducationProfile, ExperienceProfile};

    fn skill_profile(skills: &[&str]) -> SkillProfile {
        let all: Vec<String> = skills.iter().map(|s| s.to_string()).collect();
        SkillProfile {
            top_skills: all.iter().take(10).cloned().collect(),
            skill_counts: all.iter().map(|s| (s.clone(), 1)).collect(),
            all_skills: all,
        }
    }

    fn analysis_with(
        skills: &[&str],
        institutions: &[&str],
        organizations: &[&str],
        titles: &[&str],
    ) -> ResumeAnalysis {
        let to_vec = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        ResumeAnalysis {
            skills: skill_profile(skills),
            education: EducationProfile {
                education_sentences: Vec::new(),
                institutions: to_vec(institutions),
            },
            experience: ExperienceProfile {
                experience_sentences: Vec::new(),
                organizations: to_vec(organizations),
                dates: Vec::new(),
                possible_job_titles: to_vec(titles),
            },
            summary: String::new(),
            full_text: String::new(),
        }
    }

    #[test]
    fn test_catalog_has_ten_profiles() {
        let advisor = CareerAdvisor::default();
        assert_eq!(advisor.catalog().len(), 10);
    }

    #[test]
    #[should_panic(expected = "empty required-skill list")]
    fn test_empty_profile_is_rejected() {
        CareerAdvisor::with_catalog(
            vec![CareerProfile {
                name: "Empty".to_string(),
                required_skills: Vec::new(),
            }],
            3,
            5,
        );
    }

    #[test]
    fn test_scores_are_sorted_and_bounded() {
        let advisor = CareerAdvisor::default();
        let results = advisor.score_careers(&skill_profile(&["python", "docker", "aws", "sql"]));

        assert_eq!(results.len(), 10);
        for pair in results.windows(2) {
            assert!(pair[0].match_percentage >= pair[1].match_percentage);
        }
        for result in &results {
            assert!(result.match_percentage >= 0.0);
            assert!(result.match_percentage <= 100.0);
        }
    }

    #[test]
    fn test_zero_overlap_scores_zero() {
        let advisor = CareerAdvisor::default();
        let results = advisor.score_careers(&skill_profile(&["figma", "sketch"]));

        let software_dev = results
            .iter()
            .find(|r| r.career_name == "Software Developer")
            .unwrap();
        assert_eq!(software_dev.match_percentage, 0.0);
        assert!(software_dev.matching_skills.is_empty());
        assert_eq!(software_dev.missing_skills.len(), 10);
    }

    #[test]
    fn test_full_overlap_scores_hundred() {
        let advisor = CareerAdvisor::default();
        let results = advisor.score_careers(&skill_profile(&[
            "aws", "azure", "gcp", "cloud migration", "serverless", "microservices", "docker",
            "kubernetes",
        ]));

        assert_eq!(results[0].career_name, "Cloud Architect");
        assert_eq!(results[0].match_percentage, 100.0);
        assert!(results[0].missing_skills.is_empty());
    }

    #[test]
    fn test_percentage_rounding() {
        let advisor = CareerAdvisor::default();
        let results = advisor.score_careers(&skill_profile(&["statistics"]));

        // Data Scientist requires 9 skills; 1/9 rounds to 11.11
        let data_scientist = results
            .iter()
            .find(|r| r.career_name == "Data Scientist")
            .unwrap();
        assert_eq!(data_scientist.match_percentage, 11.11);
    }

    #[test]
    fn test_skill_matching_is_case_insensitive() {
        let advisor = CareerAdvisor::default();
        let results = advisor.score_careers(&skill_profile(&["Python", "SQL"]));

        let data_scientist = results
            .iter()
            .find(|r| r.career_name == "Data Scientist")
            .unwrap();
        assert!(data_scientist
            .matching_skills
            .contains(&"python".to_string()));
        assert!(data_scientist.matching_skills.contains(&"sql".to_string()));
    }

    #[test]
    fn test_assessment_rules() {
        let advisor = CareerAdvisor::default();

        let strong = advisor.assess(&analysis_with(
            &["python", "java", "sql", "git", "docker"],
            &["Stanford University"],
            &["Acme Corp", "Globex Inc"],
            &["Senior Engineer", "Lead Developer"],
        ));
        assert!(strong
            .strengths
            .contains(&"Strong technical skill set with diverse technologies".to_string()));
        assert!(strong
            .strengths
            .contains(&"Formal education credentials".to_string()));
        assert!(strong
            .strengths
            .contains(&"Experience across multiple organizations".to_string()));
        assert!(strong
            .strengths
            .contains(&"Diverse role experience".to_string()));
        assert!(strong.weaknesses.is_empty());

        let weak = advisor.assess(&analysis_with(&["python"], &[], &[], &[]));
        assert!(weak
            .weaknesses
            .contains(&"Limited range of technical skills".to_string()));
        assert!(weak
            .weaknesses
            .contains(&"Limited formal education information".to_string()));
        assert!(weak
            .weaknesses
            .contains(&"Limited professional experience".to_string()));
    }

    #[test]
    fn test_single_organization_yields_neither_strength_nor_weakness() {
        let advisor = CareerAdvisor::default();
        let assessment = advisor.assess(&analysis_with(&["python"], &[], &["Acme Corp"], &[]));

        assert!(!assessment
            .strengths
            .contains(&"Experience across multiple organizations".to_string()));
        assert!(!assessment
            .weaknesses
            .contains(&"Limited professional experience".to_string()));
    }

    #[test]
    fn test_leadership_strength_is_emitted_once() {
        let advisor = CareerAdvisor::default();
        let assessment = advisor.assess(&analysis_with(
            &["leadership", "management", "communication"],
            &[],
            &[],
            &[],
        ));

        let leadership_count = assessment
            .strengths
            .iter()
            .filter(|s| *s == "Leadership experience")
            .count();
        assert_eq!(leadership_count, 1);
        assert!(assessment
            .strengths
            .contains(&"Strong communication skills".to_string()));
    }

    #[test]
    fn test_advice_structure() {
        let advisor = CareerAdvisor::default();
        let result = advisor.advise(&analysis_with(
            &["python", "sql", "machine learning", "pandas", "numpy"],
            &["MIT"],
            &["Acme Corp"],
            &[],
        ));

        assert_eq!(result.career_paths.len(), 3);
        assert!(result.recommended_skills.len() <= 5);

        let advice = &result.advice;
        let strengths_at = advice.find("Strengths:").unwrap();
        let improvement_at = advice.find("Areas for Improvement:").unwrap();
        let careers_at = advice.find("Recommended Career Paths:").unwrap();
        let skills_at = advice.find("Recommended Skills to Learn:").unwrap();
        let general_at = advice.find("General Advice:").unwrap();

        assert!(strengths_at < improvement_at);
        assert!(improvement_at < careers_at);
        assert!(careers_at < skills_at);
        assert!(skills_at < general_at);
        assert!(advice.contains("(Match:"));
        assert!(advice.contains("- Network with professionals in your target career path\n"));
    }

    #[test]
    fn test_advice_is_deterministic() {
        let advisor = CareerAdvisor::default();
        let analysis = analysis_with(&["python", "docker", "aws"], &[], &["Acme Corp"], &[]);

        let first = advisor.advise(&analysis);
        let second = advisor.advise(&analysis);
        assert_eq!(first, second);
    }
}

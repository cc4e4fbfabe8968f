//! Main analysis engine combining parsing, career advice, and job matching

use crate::config::Config;
use crate::error::Result;
use crate::processing::advisor::{CareerAdviceResult, CareerAdvisor, CareerProfile};
use crate::processing::job_matcher::{JobMatchResult, JobMatcher};
use crate::processing::lexicon::Lexicon;
use crate::processing::parser::{ResumeAnalysis, ResumeParser};

/// Coordinates all analysis components behind one interface.
///
/// Automatons, regexes, and the career catalog are compiled once at
/// construction; afterwards the engine is read-only and every call returns a
/// fresh value object, so shared use across tasks needs no locking.
pub struct AnalysisEngine {
    parser: ResumeParser,
    advisor: CareerAdvisor,
    job_matcher: JobMatcher,
}

impl AnalysisEngine {
    /// Create a new analysis engine with the given configuration
    pub fn new(config: &Config) -> Result<Self> {
        let lexicon = Lexicon::builtin();
        let parser = ResumeParser::new(&lexicon, config.matching.top_skills)?;
        let advisor = CareerAdvisor::new(
            config.advisor.top_careers,
            config.advisor.recommended_skills_limit,
        );
        let job_matcher = JobMatcher::new(&lexicon)?;

        Ok(Self {
            parser,
            advisor,
            job_matcher,
        })
    }

    /// Parse resume text into skills, education, experience, and a summary.
    pub fn analyze(&self, text: &str) -> ResumeAnalysis {
        self.parser.parse(text)
    }

    /// Derive career advice from a previously computed analysis.
    pub fn advise(&self, analysis: &ResumeAnalysis) -> CareerAdviceResult {
        self.advisor.advise(analysis)
    }

    /// Match a previously computed analysis against a job description.
    pub fn match_job(
        &self,
        analysis: &ResumeAnalysis,
        job_title: &str,
        company: Option<String>,
        job_description: &str,
    ) -> JobMatchResult {
        self.job_matcher
            .match_job(analysis, job_title, company, job_description)
    }

    /// The career catalog backing the advisor.
    pub fn careers(&self) -> &[CareerProfile] {
        self.advisor.catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "\
Jane Smith
Senior Developer at Initech Corp from 2019 to 2022.
Skills: Python, Django, Docker, SQL, Git.
Bachelor of Science from Stanford University, 2015.
Used Python daily for data analysis.";

    #[test]
    fn test_engine_creation() {
        assert!(AnalysisEngine::new(&Config::default()).is_ok());
    }

    #[test]
    fn test_full_pipeline() {
        let engine = AnalysisEngine::new(&Config::default()).unwrap();

        let analysis = engine.analyze(SAMPLE_RESUME);
        assert!(analysis.skills.all_skills.contains(&"python".to_string()));
        assert!(!analysis.education.institutions.is_empty());
        assert!(analysis.summary.starts_with("Resume Summary:"));

        let advice = engine.advise(&analysis);
        assert!(!advice.career_paths.is_empty());
        assert!(advice.advice.contains("Recommended Career Paths:"));

        let job_match = engine.match_job(
            &analysis,
            "Backend Developer",
            None,
            "Python developer with Django and PostgreSQL experience.",
        );
        assert!(job_match.match_percentage > 0.0);
        assert!(job_match
            .skills_matched
            .contains(&"python".to_string()));
    }

    #[test]
    fn test_careers_listing() {
        let engine = AnalysisEngine::new(&Config::default()).unwrap();
        assert_eq!(engine.careers().len(), 10);
    }
}

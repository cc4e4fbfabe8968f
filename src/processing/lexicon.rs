//! Phrase lexicons for skill, education and experience detection

/// Phrase patterns grouped by semantic domain.
///
/// The lists are ordered and matched case-insensitively; phrases may contain
/// characters like `+` or `.` which are always treated literally. Built once
/// at startup and shared read-only by every matching component.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub skills: Vec<String>,
    pub education_markers: Vec<String>,
    pub experience_markers: Vec<String>,
    pub job_title_prefixes: Vec<String>,
}

impl Lexicon {
    /// The built-in lexicon shipped with the analyzer.
    pub fn builtin() -> Self {
        Self {
            skills: Self::default_skills(),
            education_markers: Self::default_education_markers(),
            experience_markers: Self::default_experience_markers(),
            job_title_prefixes: Self::default_job_title_prefixes(),
        }
    }

    /// Technical and soft skills recognized in resumes and job descriptions
    fn default_skills() -> Vec<String> {
        vec![
            // Programming languages
            "python", "java", "javascript", "c++", "c#", "ruby", "php", "swift", "kotlin",
            "go", "rust",
            // Web technologies
            "html", "css", "react", "angular", "vue", "node.js", "express", "django",
            "flask", "spring", "asp.net",
            // Data science
            "machine learning", "deep learning", "data analysis", "statistics", "r",
            "pandas", "numpy", "tensorflow", "pytorch", "scikit-learn", "tableau",
            "power bi",
            // Databases and big data
            "sql", "database", "big data", "hadoop", "spark",
            // Cloud and DevOps
            "aws", "azure", "gcp", "docker", "kubernetes", "devops", "ci/cd", "jenkins",
            // Tools and practices
            "git", "rest api", "graphql", "microservices", "agile", "scrum", "jira",
            // Soft skills
            "leadership", "communication", "teamwork", "problem solving",
            "critical thinking", "time management", "project management", "creativity",
            "adaptability", "collaboration",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Words that flag a sentence as education-related
    fn default_education_markers() -> Vec<String> {
        vec![
            "bachelor", "master", "phd", "doctorate", "degree", "bs", "ms", "ba", "ma",
            "mba", "university", "college", "institute", "school", "academy", "gpa",
            "major", "minor", "graduated", "graduation", "diploma", "certificate",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Words that flag a sentence as experience-related
    fn default_experience_markers() -> Vec<String> {
        vec![
            "experience", "work", "employment", "job", "career", "position", "role",
            "company", "organization", "firm", "employer", "corporation", "enterprise",
            "years", "months", "responsibilities", "duties", "tasks", "achievements",
            "managed", "led", "developed", "created", "implemented", "designed",
            "coordinated",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Seniority/role words that open a job-title phrase
    fn default_job_title_prefixes() -> Vec<String> {
        vec![
            "Senior", "Junior", "Lead", "Chief", "Principal", "Director", "Manager",
            "Engineer", "Developer", "Analyst", "Consultant", "Specialist",
            "Coordinator", "Administrator", "Assistant", "Officer", "Supervisor",
            "Head", "Architect",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicon_is_populated() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.skills.len() > 50);
        assert!(lexicon.education_markers.contains(&"bachelor".to_string()));
        assert!(lexicon.experience_markers.contains(&"experience".to_string()));
        assert!(lexicon.job_title_prefixes.contains(&"Senior".to_string()));
    }

    #[test]
    fn test_skills_include_literal_punctuation_phrases() {
        let skills = Lexicon::builtin().skills;
        assert!(skills.contains(&"c++".to_string()));
        assert!(skills.contains(&"node.js".to_string()));
        assert!(skills.contains(&"ci/cd".to_string()));
    }
}

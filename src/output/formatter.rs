//! Output formatters with multiple format support and rich presentation

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::advisor::CareerAdviceResult;
use crate::processing::job_matcher::JobMatchResult;
use crate::processing::parser::ResumeAnalysis;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering analysis results in one output format
pub trait ReportFormatter {
    fn format_analysis(&self, analysis: &ResumeAnalysis) -> Result<String>;
    fn format_advice(&self, advice: &CareerAdviceResult) -> Result<String>;
    fn format_job_match(&self, job_match: &JobMatchResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and rich presentation
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for piping into other tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Coordinates the formatters behind a single format dispatch
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, percentage: f64) -> String {
        let (badge, color) = match percentage.round() as u8 {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_bullet_list(&self, items: &[String], color: Color) -> String {
        let mut output = String::new();
        for item in items {
            output.push_str(&format!("  • {}\n", self.colorize(item, color)));
        }
        output
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format_analysis(&self, analysis: &ResumeAnalysis) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME ANALYSIS", 1));

        output.push_str(&self.format_header("Top Skills", 3));
        if analysis.skills.top_skills.is_empty() {
            output.push_str("  (no recognized skills)\n");
        }
        for skill in &analysis.skills.top_skills {
            let count = analysis.skills.skill_counts.get(skill).copied().unwrap_or(1);
            output.push_str(&format!(
                "  • {} ({} mention{})\n",
                self.colorize(skill, Color::Cyan),
                count,
                if count == 1 { "" } else { "s" }
            ));
        }

        output.push_str(&self.format_header("Education", 3));
        if analysis.education.institutions.is_empty() {
            output.push_str("  (no institutions recognized)\n");
        } else {
            output.push_str(&format!(
                "  Institutions: {}\n",
                self.colorize(&analysis.education.institutions.join(", "), Color::Green)
            ));
        }

        output.push_str(&self.format_header("Experience", 3));
        if !analysis.experience.organizations.is_empty() {
            output.push_str(&format!(
                "  Organizations: {}\n",
                self.colorize(&analysis.experience.organizations.join(", "), Color::Green)
            ));
        }
        if !analysis.experience.dates.is_empty() {
            output.push_str(&format!(
                "  Dates: {}\n",
                analysis.experience.dates.join(", ")
            ));
        }
        if !analysis.experience.possible_job_titles.is_empty() {
            output.push_str(&format!(
                "  Possible Titles: {}\n",
                self.colorize(&analysis.experience.possible_job_titles.join(", "), Color::Cyan)
            ));
        }
        if analysis.experience.organizations.is_empty()
            && analysis.experience.dates.is_empty()
            && analysis.experience.possible_job_titles.is_empty()
        {
            output.push_str("  (no experience details recognized)\n");
        }

        if self.detailed {
            output.push_str(&self.format_header("Education Sentences", 3));
            output.push_str(&self.format_bullet_list(
                &analysis.education.education_sentences,
                Color::White,
            ));
            output.push_str(&self.format_header("Experience Sentences", 3));
            output.push_str(&self.format_bullet_list(
                &analysis.experience.experience_sentences,
                Color::White,
            ));
        }

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&analysis.summary);

        Ok(output)
    }

    fn format_advice(&self, advice: &CareerAdviceResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🧭 CAREER ADVICE", 1));

        if !advice.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Strengths", 3));
            output.push_str(&self.format_bullet_list(&advice.strengths, Color::Green));
        }

        if !advice.weaknesses.is_empty() {
            output.push_str(&self.format_header("🎯 Areas for Improvement", 3));
            output.push_str(&self.format_bullet_list(&advice.weaknesses, Color::Yellow));
        }

        output.push_str(&self.format_header("Recommended Career Paths", 2));
        for (i, path) in advice.career_paths.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} ({:.2}%) {}\n",
                i + 1,
                self.colorize(&path.name, Color::White),
                path.match_percentage,
                self.format_score_badge(path.match_percentage)
            ));
        }

        if !advice.recommended_skills.is_empty() {
            output.push_str(&self.format_header("Recommended Skills to Learn", 3));
            output.push_str(&self.format_bullet_list(&advice.recommended_skills, Color::Cyan));
        }

        let general = general_advice_lines(&advice.advice);
        if !general.is_empty() {
            output.push_str(&self.format_header("General Advice", 3));
            for line in general {
                output.push_str(&format!("  • {}\n", line));
            }
        }

        Ok(output)
    }

    fn format_job_match(&self, job_match: &JobMatchResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🎯 JOB MATCH ANALYSIS", 1));

        let position = match &job_match.company {
            Some(company) => format!("{} at {}", job_match.job_title, company),
            None => job_match.job_title.clone(),
        };
        output.push_str(&format!(
            "Position: {}\n",
            self.colorize(&position, Color::Cyan)
        ));
        output.push_str(&format!(
            "Matched: {}\n",
            job_match.matched_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Scores", 2));
        output.push_str(&format!(
            "Overall Match: {:.2}% {}\n",
            job_match.match_percentage,
            self.format_score_badge(job_match.match_percentage)
        ));
        output.push_str(&format!(
            "Skill Coverage: {:.2}%\n",
            job_match.skill_match_percentage
        ));

        if !job_match.skills_matched.is_empty() {
            output.push_str(&self.format_header("✅ Matched Skills", 3));
            output.push_str(&self.format_bullet_list(&job_match.skills_matched, Color::Green));
        }

        if !job_match.skills_missing.is_empty() {
            output.push_str(&self.format_header("🎯 Missing Skills", 3));
            output.push_str(&self.format_bullet_list(&job_match.skills_missing, Color::Yellow));
        }

        if !job_match.recommendations.is_empty() {
            output.push_str(&self.format_header("📋 Recommendations", 2));
            for (i, recommendation) in job_match.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, recommendation));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Job Description", 3));
            output.push_str(&job_match.job_description);
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_analysis(&self, analysis: &ResumeAnalysis) -> Result<String> {
        self.to_json(analysis)
    }

    fn format_advice(&self, advice: &CareerAdviceResult) -> Result<String> {
        self.to_json(advice)
    }

    fn format_job_match(&self, job_match: &JobMatchResult) -> Result<String> {
        self.to_json(job_match)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn metadata_line(&self) -> String {
        if self.include_metadata {
            format!(
                "**Generated:** {}\n\n",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            )
        } else {
            String::new()
        }
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format_analysis(&self, analysis: &ResumeAnalysis) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Resume Analysis Report\n\n");
        output.push_str(&self.metadata_line());

        output.push_str("## Top Skills\n\n");
        if analysis.skills.top_skills.is_empty() {
            output.push_str("No recognized skills.\n\n");
        } else {
            output.push_str("| Skill | Mentions |\n");
            output.push_str("|-------|----------|\n");
            for skill in &analysis.skills.top_skills {
                let count = analysis.skills.skill_counts.get(skill).copied().unwrap_or(1);
                output.push_str(&format!("| {} | {} |\n", skill, count));
            }
            output.push('\n');
        }

        output.push_str("## Education\n\n");
        if analysis.education.institutions.is_empty() {
            output.push_str("No institutions recognized.\n\n");
        } else {
            for institution in &analysis.education.institutions {
                output.push_str(&format!("- {}\n", institution));
            }
            output.push('\n');
        }

        output.push_str("## Experience\n\n");
        if !analysis.experience.organizations.is_empty() {
            output.push_str(&format!(
                "**Organizations:** {}\n\n",
                analysis.experience.organizations.join(", ")
            ));
        }
        if !analysis.experience.dates.is_empty() {
            output.push_str(&format!(
                "**Dates:** {}\n\n",
                analysis.experience.dates.join(", ")
            ));
        }
        if !analysis.experience.possible_job_titles.is_empty() {
            output.push_str(&format!(
                "**Possible Titles:** {}\n\n",
                analysis.experience.possible_job_titles.join(", ")
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str("```\n");
        output.push_str(&analysis.summary);
        output.push_str("```\n");

        Ok(output)
    }

    fn format_advice(&self, advice: &CareerAdviceResult) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 🧭 Career Advice Report\n\n");
        output.push_str(&self.metadata_line());

        if !advice.strengths.is_empty() {
            output.push_str("## ✅ Strengths\n\n");
            for strength in &advice.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !advice.weaknesses.is_empty() {
            output.push_str("## 🎯 Areas for Improvement\n\n");
            for weakness in &advice.weaknesses {
                output.push_str(&format!("- {}\n", weakness));
            }
            output.push('\n');
        }

        output.push_str("## Recommended Career Paths\n\n");
        output.push_str("| Career | Match |\n");
        output.push_str("|--------|-------|\n");
        for path in &advice.career_paths {
            output.push_str(&format!(
                "| {} | {:.2}% |\n",
                path.name, path.match_percentage
            ));
        }
        output.push('\n');

        if !advice.recommended_skills.is_empty() {
            output.push_str("## Recommended Skills to Learn\n\n");
            for skill in &advice.recommended_skills {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        let general = general_advice_lines(&advice.advice);
        if !general.is_empty() {
            output.push_str("## General Advice\n\n");
            for line in general {
                output.push_str(&format!("- {}\n", line));
            }
        }

        Ok(output)
    }

    fn format_job_match(&self, job_match: &JobMatchResult) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 🎯 Job Match Report\n\n");
        output.push_str(&self.metadata_line());

        let position = match &job_match.company {
            Some(company) => format!("{} at {}", job_match.job_title, company),
            None => job_match.job_title.clone(),
        };
        output.push_str(&format!("**Position:** {}\n\n", position));
        output.push_str(&format!(
            "**Overall Match:** {:.2}% | **Skill Coverage:** {:.2}%\n\n",
            job_match.match_percentage, job_match.skill_match_percentage
        ));

        if !job_match.skills_matched.is_empty() {
            output.push_str("## ✅ Matched Skills\n\n");
            for skill in &job_match.skills_matched {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        if !job_match.skills_missing.is_empty() {
            output.push_str("## 🎯 Missing Skills\n\n");
            for skill in &job_match.skills_missing {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        if !job_match.recommendations.is_empty() {
            output.push_str("## 📋 Recommendations\n\n");
            for (i, recommendation) in job_match.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, recommendation));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn format_analysis(
        &self,
        analysis: &ResumeAnalysis,
        format: &OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_analysis(analysis),
            OutputFormat::Json => self.json_formatter.format_analysis(analysis),
            OutputFormat::Markdown => self.markdown_formatter.format_analysis(analysis),
        }
    }

    pub fn format_advice(
        &self,
        advice: &CareerAdviceResult,
        format: &OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_advice(advice),
            OutputFormat::Json => self.json_formatter.format_advice(advice),
            OutputFormat::Markdown => self.markdown_formatter.format_advice(advice),
        }
    }

    pub fn format_job_match(
        &self,
        job_match: &JobMatchResult,
        format: &OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_job_match(job_match),
            OutputFormat::Json => self.json_formatter.format_job_match(job_match),
            OutputFormat::Markdown => self.markdown_formatter.format_job_match(job_match),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the bullet lines out of the narrative's trailing general-advice block.
fn general_advice_lines(advice: &str) -> Vec<&str> {
    advice
        .split("General Advice:\n")
        .nth(1)
        .map(|tail| {
            tail.lines()
                .filter_map(|line| line.strip_prefix("- "))
                .collect()
        })
        .unwrap_or_default()
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_analysis{}.md", base_name, timestamp_suffix),
    }
}

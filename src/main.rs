//! Resume analyzer: resume parsing, career advice, and job matching from the command line

mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::{Config, OutputFormat};
use error::{Result, ResumeAnalyzerError};
use input::manager::InputManager;
use log::{error, info};
use output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use processing::analyzer::AnalysisEngine;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            detailed,
            output,
            save,
        } => {
            info!("Starting resume analysis");

            // Validate input file
            cli::validate_file_extension(&resume, &["pdf", "docx", "txt", "md", "markdown"])
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = resolve_output_format(output.as_deref(), &config)?;

            // Progress output would corrupt JSON or markdown piped to a file,
            // so it only appears on the console format.
            let console_output = matches!(output_format, OutputFormat::Console);

            if console_output {
                println!("🚀 Resume analysis");
                println!("📄 Resume: {}", resume.display());
                println!("🔧 Output Format: {:?}", output_format);

                if detailed {
                    println!("📊 Detailed analysis enabled");
                }

                println!("\n📂 Extracting text from file...");
            }

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;

            if console_output {
                println!("📊 Text extraction completed!");
                println!("Resume text length: {} characters", resume_text.len());

                if detailed {
                    println!("\n📄 Resume Content Preview:");
                    println!("{}", truncate_text(&resume_text, 300));
                }

                println!("\n🔍 Analyzing resume...");
            }

            let engine = AnalysisEngine::new(&config)?;
            let analysis = engine.analyze(&resume_text);

            let generator = report_generator(&config, detailed);
            let rendered = generator.format_analysis(&analysis, &output_format)?;
            println!("{}", rendered);

            write_report(&rendered, save.as_deref(), &output_format, &resume)?;

            if console_output {
                println!("\n✅ Analysis complete!");
            }
        }

        Commands::Advise {
            resume,
            output,
            save,
        } => {
            info!("Starting career advice generation");

            cli::validate_file_extension(&resume, &["pdf", "docx", "txt", "md", "markdown"])
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = resolve_output_format(output.as_deref(), &config)?;
            let console_output = matches!(output_format, OutputFormat::Console);

            if console_output {
                println!("🧭 Career advice");
                println!("📄 Resume: {}", resume.display());
                println!("\n📂 Extracting text from file...");
            }

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;

            if console_output {
                println!("🔍 Analyzing resume and scoring career paths...");
            }

            let engine = AnalysisEngine::new(&config)?;
            let analysis = engine.analyze(&resume_text);
            let advice = engine.advise(&analysis);

            let generator = report_generator(&config, false);
            let rendered = generator.format_advice(&advice, &output_format)?;
            println!("{}", rendered);

            write_report(&rendered, save.as_deref(), &output_format, &resume)?;

            if console_output {
                println!("\n✅ Career advice complete!");
            }
        }

        Commands::Match {
            resume,
            job,
            title,
            company,
            output,
            save,
        } => {
            info!("Starting job match analysis");

            // Validate input files
            cli::validate_file_extension(&resume, &["pdf", "docx", "txt", "md", "markdown"])
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;

            cli::validate_file_extension(&job, &["pdf", "docx", "txt", "md", "markdown"])
                .map_err(|e| {
                    ResumeAnalyzerError::InvalidInput(format!("Job description file: {}", e))
                })?;

            let output_format = resolve_output_format(output.as_deref(), &config)?;
            let console_output = matches!(output_format, OutputFormat::Console);

            if console_output {
                println!("🎯 Job match analysis");
                println!("📄 Resume: {}", resume.display());
                println!("💼 Job Description: {}", job.display());
                println!("🏷️  Job Title: {}", title);

                if let Some(company) = &company {
                    println!("🏢 Company: {}", company);
                }

                println!("\n📂 Extracting text from files...");
            }

            let mut input_manager = InputManager::new();

            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            if console_output {
                println!("📊 Text extraction completed!");
                println!("Resume text length: {} characters", resume_text.len());
                println!("Job description length: {} characters", job_text.len());

                println!("\n🔍 Matching resume against job description...");
            }

            let engine = AnalysisEngine::new(&config)?;
            let analysis = engine.analyze(&resume_text);
            let job_match = engine.match_job(&analysis, &title, company, &job_text);

            let generator = report_generator(&config, false);
            let rendered = generator.format_job_match(&job_match, &output_format)?;
            println!("{}", rendered);

            write_report(&rendered, save.as_deref(), &output_format, &resume)?;

            if console_output {
                println!(
                    "\n✅ Match complete! Overall score: {:.2}%",
                    job_match.match_percentage
                );
            }
        }

        Commands::Careers => {
            let engine = AnalysisEngine::new(&config)?;

            println!("📚 Built-in Career Catalog\n");
            for career in engine.careers() {
                println!(
                    "  • {} ({} skills)",
                    career.name,
                    career.required_skills.len()
                );
                println!("    {}", career.required_skills.join(", "));
            }
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Config File: {}", Config::config_path().display());
                    println!("\nMatching:");
                    println!("  Top Skills: {}", config.matching.top_skills);
                    println!("\nAdvisor:");
                    println!("  Top Careers: {}", config.advisor.top_careers);
                    println!(
                        "  Recommended Skills Limit: {}",
                        config.advisor.recommended_skills_limit
                    );
                    println!("\nOutput:");
                    println!("  Default Format: {:?}", config.output.default_format);
                    println!("  Color Output: {}", config.output.color_output);
                    println!("  Detailed: {}", config.output.detailed);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::reset()?;
                    println!("✅ Configuration reset successfully!");
                }
            }
        }
    }

    Ok(())
}

fn resolve_output_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(value) => {
            cli::parse_output_format(value).map_err(|e| ResumeAnalyzerError::InvalidInput(e))
        }
        None => Ok(config.output.default_format.clone()),
    }
}

fn report_generator(config: &Config, detailed: bool) -> ReportGenerator {
    ReportGenerator::with_options(
        config.output.color_output,
        detailed || config.output.detailed,
        true,
        true,
    )
}

fn write_report(
    rendered: &str,
    save: Option<&Path>,
    format: &OutputFormat,
    source: &Path,
) -> Result<()> {
    if let Some(save_path) = save {
        let target = if save_path.is_dir() {
            let source_name = source.to_string_lossy();
            save_path.join(suggest_filename(format, &source_name, true))
        } else {
            save_path.to_path_buf()
        };

        save_report_to_file(rendered, &target)?;
        println!("💾 Saved report to: {}", target.display());
    }

    Ok(())
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        text.to_string()
    } else {
        // max_length may land inside a multibyte character
        let mut cut = max_length;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        let truncated = &text[..cut];
        // Find the last word boundary to avoid cutting words
        let last_space = truncated.rfind(' ').unwrap_or(cut);
        format!("{}...", &truncated[..last_space])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_keeps_short_input() {
        assert_eq!(truncate_text("short preview", 300), "short preview");
    }

    #[test]
    fn test_truncate_text_cuts_at_word_boundary() {
        let text = "one two three four five";
        assert_eq!(truncate_text(text, 12), "one two...");
    }

    #[test]
    fn test_truncate_text_handles_multibyte_at_cut_point() {
        let text = format!("{}é and more trailing text", "a".repeat(299));
        let preview = truncate_text(&text, 300);
        assert_eq!(preview, format!("{}...", "a".repeat(299)));
    }

    #[test]
    fn test_truncate_text_handles_curly_apostrophe_at_cut_point() {
        let text = format!("{}\u{2019}s resume continues well past the preview", "x".repeat(298));
        let preview = truncate_text(&text, 300);
        assert!(preview.ends_with("..."));
        assert!(preview.starts_with("xxx"));
    }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::Student;

/// Cohort - terminal client for student and lesson management
#[derive(Parser)]
#[command(name = "cohort")]
#[command(about = "A TUI client for managing students and lessons")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Student operations without starting the TUI
    Students(StudentsArgs),

    /// Lesson operations without starting the TUI
    Lessons(LessonsArgs),

    /// Show configuration information
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommands,
}

#[derive(Subcommand)]
pub enum StudentsCommands {
    /// List all students
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single student
    Show {
        /// Student id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct LessonsArgs {
    #[command(subcommand)]
    pub command: LessonsCommands,
}

#[derive(Subcommand)]
pub enum LessonsCommands {
    /// List all lessons
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file if none exists
    Init,
}

impl Commands {
    pub async fn execute(self, config: &Config, config_dir: Option<PathBuf>) -> Result<()> {
        match self {
            Commands::Students(args) => args.command.execute(config).await,
            Commands::Lessons(args) => args.command.execute(config).await,
            Commands::Config(args) => args.command.execute(config, config_dir),
        }
    }
}

impl StudentsCommands {
    async fn execute(self, config: &Config) -> Result<()> {
        let api = ApiClient::new(&config.api_url, config.request_timeout())?;

        match self {
            StudentsCommands::List { json } => {
                let students = api.list_students().await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&students)?);
                } else {
                    print_student_table(&students);
                }
            }
            StudentsCommands::Show { id, json } => {
                let student = api.get_student(&id).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&student)?);
                } else {
                    print_student_table(std::slice::from_ref(&student));
                }
            }
        }

        Ok(())
    }
}

impl LessonsCommands {
    async fn execute(self, config: &Config) -> Result<()> {
        let api = ApiClient::new(&config.api_url, config.request_timeout())?;

        match self {
            LessonsCommands::List { json } => {
                let lessons = api.list_lessons().await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&lessons)?);
                } else {
                    println!("{:<38} {}", "ID", "NAME");
                    for lesson in &lessons {
                        println!("{:<38} {}", lesson.lesson_id, lesson.lesson_name);
                    }
                }
            }
        }

        Ok(())
    }
}

impl ConfigCommands {
    fn execute(self, config: &Config, config_dir: Option<PathBuf>) -> Result<()> {
        match self {
            ConfigCommands::Show => {
                print!("{}", toml::to_string_pretty(config)?);
            }
            ConfigCommands::Path => {
                let dir = Config::config_dir(config_dir)?;
                println!("{}", dir.join("config.toml").display());
            }
            ConfigCommands::Init => {
                let path = Config::init(config_dir)?;
                println!("wrote {}", path.display());
            }
        }

        Ok(())
    }
}

fn print_student_table(students: &[Student]) {
    println!(
        "{:<26} {:>4} {:<8} {:<12} {}",
        "NAME", "AGE", "GRADE", "REGISTERED", "LESSONS"
    );
    for student in students {
        let lessons: Vec<&str> = student
            .lessons
            .iter()
            .map(|lesson| lesson.lesson_name.as_str())
            .collect();
        println!(
            "{:<26} {:>4} {:<8} {:<12} {}",
            student.full_name(),
            student.age,
            student.grade,
            student.registration_date,
            lessons.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_apply_to_subcommands() {
        let cli = Cli::parse_from([
            "cohort",
            "students",
            "list",
            "--api-url",
            "http://localhost:3000/api",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:3000/api"));
        assert!(matches!(
            cli.command,
            Some(Commands::Students(StudentsArgs {
                command: StudentsCommands::List { json: false }
            }))
        ));
    }
}

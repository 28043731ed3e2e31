use anyhow::Context;
use clap::{Parser, Subcommand};
use skillnaav_core::{
    build_prompt, parse_assessment, score_questions, AnswerMap, AssessmentService,
    GenerationRequest, OpenAiClient, UpstreamConfig,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "skillnaav")]
#[command(about = "SkillNaav assessment generator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct RequestArgs {
    /// Assessment topic
    #[arg(long)]
    topic: String,
    /// Difficulty: easy, medium or hard
    #[arg(long)]
    difficulty: String,
    /// Duration in minutes
    #[arg(long)]
    duration: String,
}

impl RequestArgs {
    fn to_request(&self) -> anyhow::Result<GenerationRequest> {
        Ok(GenerationRequest::from_parts(
            Some(self.topic.as_str()),
            Some(self.difficulty.as_str()),
            Some(self.duration.as_str()),
        )?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prompt that would be sent upstream
    Prompt {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Parse assessment text into questions (reads stdin when FILE is omitted)
    Parse {
        /// File holding generated assessment text
        file: Option<PathBuf>,
    },
    /// Parse an assessment and score answers against it
    Score {
        /// File holding generated assessment text
        #[arg(long)]
        assessment: PathBuf,
        /// Answer as INDEX=ANSWER, e.g. 0="b. 4" (repeatable)
        #[arg(long = "answer", value_parser = parse_answer)]
        answers: Vec<(usize, String)>,
    },
    /// Generate an assessment with the configured upstream service
    Generate {
        #[command(flatten)]
        request: RequestArgs,
        /// Print the raw upstream text instead of parsed questions
        #[arg(long)]
        raw: bool,
    },
}

fn parse_answer(value: &str) -> Result<(usize, String), String> {
    let (index, answer) = value
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=ANSWER, got '{value}'"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid question index '{index}'"))?;
    Ok((index, answer.to_string()))
}

fn read_text(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Prompt { request }) => {
            println!("{}", build_prompt(&request.to_request()?));
        }
        Some(Commands::Parse { file }) => {
            let questions = parse_assessment(&read_text(file.as_ref())?);
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
        Some(Commands::Score {
            assessment,
            answers,
        }) => {
            let questions = parse_assessment(&read_text(Some(&assessment))?);
            let answers: AnswerMap = answers.into_iter().collect();
            let result = score_questions(&questions, &answers);
            for (index, review) in result.per_question.iter().enumerate() {
                let answer = review.user_answer.as_deref().unwrap_or("-");
                if review.is_correct {
                    println!("{}. {} Correct! Your Answer: {}", index, review.question, answer);
                } else {
                    println!(
                        "{}. {} Incorrect. Your Answer: {}, Correct Answer: {}",
                        index, review.question, answer, review.correct_answer
                    );
                }
            }
            println!("{}", result.message);
        }
        Some(Commands::Generate { request, raw }) => {
            let request = request.to_request()?;
            let cfg = UpstreamConfig::from_lookup(|key| std::env::var(key).ok())?;
            let service = AssessmentService::new(Arc::new(OpenAiClient::new(Arc::new(cfg))?));
            if raw {
                println!("{}", service.generate(&request).await?);
            } else {
                let assessment = service.generate_parsed(&request).await?;
                println!("{}", serde_json::to_string_pretty(&assessment.questions)?);
            }
        }
        None => {
            println!("Use 'skillnaav --help' for commands");
        }
    }

    Ok(())
}

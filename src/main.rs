use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use buildr::cli::{Cli, Commands, write_artifacts};
use buildr::config::Config;
use buildr::id::generate_run_id;
use buildr::llm::{AnthropicClient, AnthropicConfig};
use buildr::ralph::{BuildEvent, BuildRequest, ChannelSink, RalphConfig, RalphRunner};
use buildr::wizard;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("buildr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("buildr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_client(config: &Config) -> Result<AnthropicClient> {
    let client_config = AnthropicConfig {
        model: config.llm.model.clone(),
        max_tokens: config.llm.max_tokens,
        timeout: Duration::from_millis(config.llm.timeout_ms),
    };
    Ok(AnthropicClient::new(client_config)?)
}

fn read_answers(path: &PathBuf) -> Result<Vec<(String, String)>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;
    let mapping: serde_yaml::Mapping =
        serde_yaml::from_str(&raw).context("Answers file must be a YAML mapping")?;

    Ok(mapping
        .into_iter()
        .filter_map(|(question, answer)| match (question, answer) {
            (serde_yaml::Value::String(q), serde_yaml::Value::String(a)) => Some((q, a)),
            _ => None,
        })
        .collect())
}

async fn handle_questions(description: &str, config: &Config) -> Result<()> {
    info!("Generating clarifying questions");
    let client = build_client(config)?;

    let questions = wizard::generate_questions(&client, description).await?;

    println!("{}", "Clarifying questions:".cyan());
    for (i, question) in questions.iter().enumerate() {
        println!("  {}. {}", i + 1, question);
    }
    Ok(())
}

async fn handle_prd(
    description: &str,
    answers_file: Option<&PathBuf>,
    config: &Config,
) -> Result<()> {
    info!("Generating PRD");
    let client = build_client(config)?;

    let answers = match answers_file {
        Some(path) => read_answers(path)?,
        None => Vec::new(),
    };

    let prd = wizard::generate_prd(&client, description, &answers).await?;
    println!("{}", prd);
    Ok(())
}

async fn handle_estimate(prd_file: &PathBuf, config: &Config) -> Result<()> {
    info!("Estimating build cost for {}", prd_file.display());
    let client = build_client(config)?;

    let prd = fs::read_to_string(prd_file)
        .with_context(|| format!("Failed to read PRD file {}", prd_file.display()))?;

    let estimate = wizard::estimate_cost(&client, &prd).await?;

    println!("{} {}", "Complexity:".cyan(), estimate.label);
    println!("  {}", estimate.reasoning);
    println!(
        "{} {} iterations, ~{} tokens",
        "Estimated:".cyan(),
        estimate.iterations,
        estimate.total_tokens
    );
    println!(
        "{} ${:.2} (input ${:.2}, output ${:.2})",
        "Cost:".cyan(),
        estimate.total_cost,
        estimate.input_cost,
        estimate.output_cost
    );
    Ok(())
}

async fn handle_build(
    prd_file: &PathBuf,
    name: &str,
    max_iterations: Option<u32>,
    output_dir: Option<&PathBuf>,
    config: &Config,
) -> Result<()> {
    let prd = fs::read_to_string(prd_file)
        .with_context(|| format!("Failed to read PRD file {}", prd_file.display()))?;

    let mut request = BuildRequest::new(prd, name);
    request.max_iterations = max_iterations.unwrap_or(config.build.max_iterations);

    let client = Arc::new(build_client(config)?);
    let ralph_config = RalphConfig {
        max_tokens: config.llm.max_tokens,
        iteration_delay: Duration::from_millis(config.build.iteration_delay_ms),
    };

    let (sink, mut events) = ChannelSink::new();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let stamp = chrono::Local::now().format("%H:%M:%S");
            match event {
                BuildEvent::IterationStarted { iteration } => {
                    println!("[{}] {} iteration {}", stamp, "Starting".cyan(), iteration);
                }
                BuildEvent::IterationCompleted {
                    iteration,
                    build_complete,
                } => {
                    if build_complete {
                        println!(
                            "[{}] {} iteration {} (build complete)",
                            stamp,
                            "Finished".green(),
                            iteration
                        );
                    } else {
                        println!("[{}] {} iteration {}", stamp, "Finished".green(), iteration);
                    }
                }
                BuildEvent::IterationErrored { iteration, reason } => {
                    println!(
                        "[{}] {} iteration {}: {}",
                        stamp,
                        "Error in".red(),
                        iteration,
                        reason
                    );
                }
                BuildEvent::RunFinished { .. } => break,
            }
        }
    });

    let runner = RalphRunner::new(client)
        .with_config(ralph_config)
        .with_progress(Arc::new(sink));

    let result = runner.run(&request).await?;
    printer.await.ok();

    let message = result.status_message();
    if result.completed {
        println!("{}", message.green());
    } else {
        println!("{}", message.yellow());
    }

    let dir = output_dir.cloned().unwrap_or_else(|| {
        PathBuf::from(".buildr")
            .join("builds")
            .join(format!("{}-{}", name, generate_run_id()))
    });
    let written = write_artifacts(&dir, &result)?;
    println!(
        "{} {} files under {}",
        "Wrote".green(),
        written.len(),
        dir.display()
    );

    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Questions { description } => handle_questions(description, config).await,
        Commands::Prd {
            description,
            answers_file,
        } => handle_prd(description, answers_file.as_ref(), config).await,
        Commands::Estimate { prd_file } => handle_estimate(prd_file, config).await,
        Commands::Build {
            prd_file,
            name,
            max_iterations,
            output_dir,
        } => {
            handle_build(
                prd_file,
                name,
                *max_iterations,
                output_dir.as_ref(),
                config,
            )
            .await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config)
        .await
        .context("Application failed")?;

    Ok(())
}

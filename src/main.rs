use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gemini_notes::extractors::{parse_video_id, read_document, LopdfParser, YoutubeTranscriptSource};
use gemini_notes::pipeline::{extract_document_text, fetch_transcript, GenerationResult};
use gemini_notes::{
    output, utils, Cli, Commands, Config, GeminiClient, NotesError, OutputFormat,
    QuestionPipeline, SummaryPipeline,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up GOOGLE_API_KEY from a .env file when present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose {
        "gemini_notes=debug"
    } else {
        "gemini_notes=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            cli.json_logs
                .then(|| fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!cli.json_logs).then(|| fmt::layer().with_writer(std::io::stderr)),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;

    match cli.command {
        Commands::Summarize {
            url,
            output,
            format,
            model,
        } => {
            let config = with_model_override(Config::load()?, model);
            let generator = GeminiClient::new(&config)?;
            let source = YoutubeTranscriptSource::new(&config.transcript)?;
            let pipeline = SummaryPipeline::new(source, generator);

            tracing::info!("Starting summary for URL: {}", url);

            let progress = utils::spinner("Fetching transcript and generating notes...", quiet);
            let result = pipeline.summarize(&url).await;
            progress.finish_and_clear();

            emit(&result?, output, format, &config)?;
        }
        Commands::Ask {
            file,
            question,
            output,
            format,
            model,
        } => {
            let config = with_model_override(Config::load()?, model);
            let generator = GeminiClient::new(&config)?;
            let pipeline = QuestionPipeline::new(LopdfParser::new(), generator);

            let bytes = read_document(&file)?;

            let progress = utils::spinner("Extracting text and generating answer...", quiet);
            let result = pipeline
                .ask(&file.display().to_string(), &bytes, &question)
                .await;
            progress.finish_and_clear();

            emit(&result?, output, format, &config)?;
        }
        Commands::VideoId { url } => {
            let video_id = parse_video_id(&url).ok_or_else(|| {
                NotesError::InvalidInput(format!("Not a recognized YouTube video URL: {}", url))
            })?;

            println!("{}", video_id);
            println!("Thumbnail: {}", video_id.thumbnail_url());
        }
        Commands::Transcript { url } => {
            let config = Config::load()?;
            let source = YoutubeTranscriptSource::new(&config.transcript)?;

            let progress = utils::spinner("Fetching transcript...", quiet);
            let result = fetch_transcript(&source, &url).await;
            progress.finish_and_clear();

            let (_, transcript) = result?;
            println!("{}", transcript);
        }
        Commands::Extract { file, full } => {
            let config = Config::load()?;
            let bytes = read_document(&file)?;
            let text = extract_document_text(&LopdfParser::new(), &bytes)?;

            if full {
                println!("{}", text);
            } else {
                println!("{}", utils::preview(&text, config.app.preview_chars));
            }
        }
        Commands::Config { init: true, .. } => {
            let path = Config::default().save()?;
            println!("Default configuration written to: {}", path.display());
        }
        Commands::Config { .. } => {
            Config::load()?.display();
        }
    }

    Ok(())
}

fn with_model_override(config: Config, model: Option<String>) -> Config {
    match model {
        Some(model) => config.with_model(model),
        None => config,
    }
}

fn emit(
    result: &GenerationResult,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    config: &Config,
) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => config.app.default_output_format.parse()?,
    };

    match output {
        Some(path) => {
            output::save_to_file(result, &path, &format)?;
            println!("Output saved to: {}", path.display());
        }
        None => output::print_to_console(result, &format)?,
    }

    Ok(())
}

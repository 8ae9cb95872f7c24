use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "notes",
    about = "Gemini Notes - Summarize YouTube videos and ask questions about PDFs with Google Gemini",
    version,
    long_about = "A CLI tool that fetches a YouTube video's transcript and asks Gemini for detailed notes, or extracts the text of a PDF and asks Gemini to answer a question about it. Requires a Google API key in GOOGLE_API_KEY (a .env file is honored)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a YouTube video from its transcript
    Summarize {
        /// YouTube video URL (youtube.com/watch?v=... or youtu.be/...)
        #[arg(value_name = "URL")]
        url: String,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Gemini model to use instead of the configured one
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,
    },

    /// Answer a question about a PDF document
    Ask {
        /// PDF file to read
        #[arg(value_name = "PDF_FILE")]
        file: PathBuf,

        /// Question about the document
        #[arg(value_name = "QUESTION")]
        question: String,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Gemini model to use instead of the configured one
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,
    },

    /// Print the video ID and thumbnail URL for a YouTube link
    VideoId {
        /// YouTube video URL
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Print the transcript of a YouTube video
    Transcript {
        /// YouTube video URL
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Print the text extracted from a PDF
    Extract {
        /// PDF file to read
        #[arg(value_name = "PDF_FILE")]
        file: PathBuf,

        /// Print the whole text instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Show or initialize configuration
    Config {
        /// Show current configuration
        #[arg(short, long, conflicts_with = "init")]
        show: bool,

        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Model output as-is
    Text,
    /// Model output under a heading
    Markdown,
    /// JSON with request metadata
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
            .map_err(|_| anyhow::anyhow!("Unknown output format: {}", s))
    }
}

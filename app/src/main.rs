#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    ChatInput, ChatStrategy, CommandStrategy, ImageInput, ImageStrategy, InfoStrategy,
    InitStrategy, TranscribeInput, TranscribeStrategy, VersionStrategy,
};
use memochat_core::{ImageQuality, ImageSize};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "memochat")]
#[command(about = "Chat assistant that remembers what you tell it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with fact memory
    Chat {
        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,

        /// Resume from a JSON export
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Transcribe an audio file, optionally translating it
    Transcribe {
        /// Audio file (mp3, wav, m4a, flac, ogg, webm; up to 25 MB)
        file: PathBuf,

        /// Target language for translation
        #[arg(short, long)]
        language: Option<String>,

        /// Translation model
        #[arg(short = 'M', long)]
        model: Option<String>,

        /// Directory for output files
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Generate images from a description
    Image {
        /// What to draw
        prompt: String,

        /// Artistic style, may be repeated
        #[arg(short, long = "style")]
        styles: Vec<String>,

        /// 1024x1024, 1024x1792 or 1792x1024
        #[arg(long)]
        size: Option<ImageSize>,

        /// standard or hd
        #[arg(long)]
        quality: Option<ImageQuality>,

        /// Number of images (1-4)
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u8,

        /// Directory for output files
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            message,
            model,
            resume,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    message,
                    model,
                    resume,
                })
                .await
        }
        Commands::Transcribe {
            file,
            language,
            model,
            out_dir,
        } => {
            TranscribeStrategy
                .execute(TranscribeInput {
                    file,
                    language,
                    model,
                    out_dir,
                })
                .await
        }
        Commands::Image {
            prompt,
            styles,
            size,
            quality,
            count,
            out_dir,
        } => {
            ImageStrategy
                .execute(ImageInput {
                    prompt,
                    styles,
                    size,
                    quality,
                    count,
                    out_dir,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}

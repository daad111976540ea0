use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use memeshot::{CaptureConfig, FrameExtractor, SubtitleIndex};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("An error occurred: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("    {}", cause);
        }
        std::process::exit(1);
    }
}

#[derive(Parser)]
#[command(version, about = "Grab screenshots from a video wherever a word is said")]
struct Cli {
    /// More output per occurrence (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save a screenshot for every subtitle containing WORD
    Grab {
        /// The video to capture frames from
        video: PathBuf,
        /// SRT subtitles of the video
        subtitles: PathBuf,
        word: String,
        #[arg(short, long, value_name = "DIR", default_value = memeshot::frames::DEFAULT_OUTPUT_DIR)]
        output: PathBuf,
        #[arg(long)]
        max_width: Option<u32>,
        #[arg(long)]
        max_height: Option<u32>,
        /// Print the capture report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the subtitles containing WORD
    Search {
        subtitles: PathBuf,
        word: String,
        /// Print the dialogue instead of the timestamp
        #[arg(long)]
        dialogues: bool,
        /// Print the matching cues as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Grab {
            video,
            subtitles,
            word,
            output,
            max_width,
            max_height,
            json,
        } => {
            let index = SubtitleIndex::open(&subtitles)
                .with_context(|| format!("Failed to read subtitles: '{}'", subtitles.display()))?;
            let timestamps = index.timestamps_for(&word);

            std::fs::create_dir_all(&output).with_context(|| {
                format!("Failed to create output directory: '{}'", output.display())
            })?;
            let config = CaptureConfig {
                max_width,
                max_height,
                ..CaptureConfig::new(output)
            };
            let mut extractor = FrameExtractor::open(&video, config)
                .with_context(|| format!("Failed to open video: '{}'", video.display()))?;
            let report = extractor.capture_all(&timestamps)?;

            if json {
                let output = serde_json::json!({
                    "config": extractor.config(),
                    "report": report,
                    "screenshots": extractor.screenshots(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", report.summary());
            }
        }
        Command::Search {
            subtitles,
            word,
            dialogues,
            json,
        } => {
            let index = SubtitleIndex::open(&subtitles)
                .with_context(|| format!("Failed to read subtitles: '{}'", subtitles.display()))?;
            if json {
                let cues: Vec<_> = index.matches(&word).collect();
                println!("{}", serde_json::to_string_pretty(&cues)?);
            } else if dialogues {
                for dialogue in index.dialogues_for(&word) {
                    println!("{}", dialogue);
                }
            } else {
                for timestamp in index.timestamps_for(&word) {
                    println!("{}", timestamp);
                }
            }
        }
    }
    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vaani_tts::{EspeakEngine, LocalEngine, SynthesisRequest, Synthesizer, audio_extension};

/// Vaani - text-to-speech with cloud and local backends
#[derive(Parser)]
#[command(name = "vaani", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Speak text through the sound system
    Say {
        /// Text to speak
        text: String,
    },
    /// Synthesize text into an audio file
    Synth {
        /// Text to synthesize
        text: String,

        /// Language code (e.g. "en", "ar")
        #[arg(short, long, env = "VAANI_LANGUAGE", default_value = "en")]
        language: String,

        /// Output path; a unique tts_<uuid>.wav name is generated if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the cloud backend and synthesize locally
        #[arg(long)]
        local: bool,

        /// Skip the translation pre-pass
        #[arg(long)]
        no_translate: bool,
    },
    /// List installed local voices
    Voices,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "vaani_tts=info",
        1 => "vaani_tts=debug",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Say { text } => {
            let synthesizer = Synthesizer::from_env()?;
            synthesizer.speak(&text)?;
        }
        Command::Synth {
            text,
            language,
            output,
            local,
            no_translate,
        } => {
            let synthesizer = Synthesizer::from_env()?;

            if local {
                // Pure local save path: WAV via the engine, no cloud attempt
                let path = synthesizer.synthesize_to_file(&text, &language, output.as_deref())?;
                println!("{}", path.display());
            } else {
                let mut request = SynthesisRequest::new(text);
                request.language = language;
                request.translate = !no_translate;

                let audio = synthesizer.synthesize(&request)?;
                // Extension follows the bytes: the cloud backend emits MP3
                // but a fallback mid-call yields WAV from the local engine
                let path = output.unwrap_or_else(|| {
                    PathBuf::from(format!(
                        "tts_{}.{}",
                        uuid::Uuid::new_v4(),
                        audio_extension(&audio)
                    ))
                });
                std::fs::write(&path, audio)?;
                println!("{}", path.display());
            }
        }
        Command::Voices => {
            let engine = EspeakEngine::new()?;
            for voice in engine.voices()? {
                println!("{}\t{}", voice.id, voice.name);
            }
        }
    }

    Ok(())
}

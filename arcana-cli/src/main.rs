mod oracle;
mod visions;

use anyhow::Result;
use arcana::genai::DeckType;
use arcana::live::{DEFAULT_REST_URL, DEFAULT_WS_URL};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcana", version, about = "Consult the Celestial Arcana")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
pub struct LiveArgs {
    #[arg(long, env = "AVATAR_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "AVATAR_REST_URL", default_value = DEFAULT_REST_URL)]
    pub rest_url: String,

    #[arg(long, env = "AVATAR_WS_URL", default_value = DEFAULT_WS_URL)]
    pub ws_url: String,
}

#[derive(Args)]
pub struct GenAiArgs {
    /// Falls back to GEMINI_API_KEY, then API_KEY.
    #[arg(long)]
    pub gemini_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Speak with a live oracle until Ctrl-C. Type `m` + Enter to toggle mute.
    Oracle {
        name: String,

        #[command(flatten)]
        live: LiveArgs,
    },

    /// List the oracles that can be invoked.
    Oracles,

    /// Conjure an image from a prompt.
    Image {
        prompt: String,

        #[arg(short, long, default_value = "vision.png")]
        out: String,

        #[command(flatten)]
        genai: GenAiArgs,
    },

    /// Transform an existing image.
    Edit {
        input: String,

        prompt: String,

        #[arg(short, long, default_value = "vision-edited.png")]
        out: String,

        #[command(flatten)]
        genai: GenAiArgs,
    },

    /// Draw a tarot spread.
    Tarot {
        #[arg(long, default_value = "Past, Present, Future")]
        spread: String,

        #[arg(long, default_value_t = 3)]
        cards: usize,

        #[arg(long, default_value = "rider-waite")]
        deck: DeckType,

        /// Paint and reveal every card after the reading.
        #[arg(long)]
        reveal: bool,

        /// Where revealed card faces are written.
        #[arg(long, default_value = ".")]
        out_dir: String,

        #[command(flatten)]
        genai: GenAiArgs,
    },

    /// Reveal your soulmate. Missing details are asked for interactively.
    Soulmate {
        #[arg(long)]
        dob: Option<String>,

        #[arg(long)]
        pob: Option<String>,

        #[arg(long)]
        tob: Option<String>,

        #[arg(long)]
        preference: Option<String>,

        #[arg(short, long, default_value = "soulmate")]
        out: String,

        #[command(flatten)]
        genai: GenAiArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Oracle { name, live } => oracle::run(&name, live).await,
        Commands::Oracles => {
            oracle::list();
            Ok(())
        }
        Commands::Image { prompt, out, genai } => visions::image(&genai, &prompt, &out).await,
        Commands::Edit {
            input,
            prompt,
            out,
            genai,
        } => visions::edit(&genai, &input, &prompt, &out).await,
        Commands::Tarot {
            spread,
            cards,
            deck,
            reveal,
            out_dir,
            genai,
        } => visions::tarot(&genai, &spread, cards, deck, reveal, &out_dir).await,
        Commands::Soulmate {
            dob,
            pob,
            tob,
            preference,
            out,
            genai,
        } => visions::soulmate(&genai, [dob, pob, tob, preference], &out).await,
    }
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use nostalgia_core::content::{meme_sources, music_2011, timeline_2011};
use nostalgia_core::{
    render_profile, FastRandom, MemoryStore, RecordingStage, SiteConfig, SiteState, Spawner,
    StageEvent, Viewport, DEFAULT_API_URL,
};
use nostalgia_sync::{SyncClient, UreqTransport};

#[derive(Parser, Debug)]
#[command(
    name = "nostalgia-cli",
    about = "Inspect the 2011 nostalgia content, simulate the floating layer and push quiz data."
)]
struct Args {
    /// JSON file holding the persisted session, quiz answers and question cursor.
    #[arg(long, default_value = "nostalgia-state.json")]
    state: PathBuf,

    /// Base URL of the answer/guess collector.
    #[arg(long, env = "NOSTALGIA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Log per-spawn details.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline items in spawn order.
    Timeline,
    /// Print the playlist the music player would use.
    Tracks,
    /// Run the floating layer headlessly on a virtual clock.
    Simulate {
        #[arg(long, default_value_t = 30.0)]
        seconds: f64,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 720.0)]
        height: f64,
        /// Seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,
        /// Virtual time between two frames.
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,
        /// Print every mount and unmount as a JSON line.
        #[arg(long)]
        events: bool,
    },
    /// Record an A/B answer and sync the answer set.
    Answer {
        #[arg(short, long)]
        question: u32,
        #[arg(long)]
        value: String,
        /// Move on to the next question afterwards.
        #[arg(long)]
        advance: bool,
        #[arg(long)]
        offline: bool,
    },
    /// Submit password guesses and sync them.
    Guess {
        guesses: Vec<String>,
        #[arg(long)]
        offline: bool,
    },
    /// Print the password profile built from the stored answers and the given guesses.
    Profile { guesses: Vec<String> },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = SiteConfig {
        api_url: args.api_url.clone(),
        ..SiteConfig::default()
    };

    match args.command {
        Command::Timeline => {
            for item in timeline_2011() {
                println!(
                    "{:>2}  {:<7} {:<9} {}",
                    item.id,
                    item.date_label().unwrap_or_else(|| "--".to_string()),
                    format!("{:?}", item.kind).to_lowercase(),
                    item.title
                );
            }
        }
        Command::Tracks => {
            for track in music_2011() {
                let source = match (&track.audio_url, &track.youtube_id) {
                    (Some(url), _) => url.clone(),
                    (None, Some(id)) => format!("youtube:{id}"),
                    (None, None) => "(no source)".to_string(),
                };
                println!("{:<40} {source}", track.title);
            }
        }
        Command::Simulate {
            seconds,
            width,
            height,
            seed,
            frame_ms,
            events,
        } => simulate(&config, seconds, Viewport::new(width, height), seed, frame_ms, events)?,
        Command::Answer {
            question,
            value,
            advance,
            offline,
        } => {
            let mut state = load_state(&args.state, &config)?;
            state.answer(question, &value)?;
            info!("recorded Q{question} = {value}");
            if !offline {
                sync_client(&config).save_ab_answers(&mut state);
            }
            if advance {
                state.advance_question();
            }
            println!("{}", state.quiz().progress_label());
            save_state(&args.state, state)?;
        }
        Command::Guess { guesses, offline } => {
            let mut state = load_state(&args.state, &config)?;
            let accepted = state.submit_guesses(&guesses).len();
            println!("Accepted {accepted} of {} guesses", guesses.len());
            if !offline && accepted > 0 {
                sync_client(&config).save_password_guesses(&mut state);
            }
            save_state(&args.state, state)?;
        }
        Command::Profile { guesses } => {
            let mut state = load_state(&args.state, &config)?;
            state.submit_guesses(&guesses);
            println!(
                "{}",
                render_profile(state.quiz().answers(), state.guesses().guesses(), Utc::now())
            );
        }
    }

    Ok(())
}

fn simulate(
    config: &SiteConfig,
    seconds: f64,
    viewport: Viewport,
    seed: Option<u64>,
    frame_ms: f64,
    print_events: bool,
) -> anyhow::Result<()> {
    anyhow::ensure!(frame_ms > 0.0, "--frame-ms must be positive");

    let rng = seed.map(FastRandom::with_seed).unwrap_or_default();
    let mut spawner = Spawner::new(config.spawner.clone(), timeline_2011(), meme_sources(), rng);
    let mut stage = RecordingStage::new(viewport);

    let end = seconds * 1000.0;
    let mut now = 0.0;
    let mut peak = 0;
    spawner.start(now);
    while now <= end {
        spawner.tick(now, &mut stage);
        peak = peak.max(spawner.live_count());
        for event in stage.drain() {
            if print_events && !matches!(event, StageEvent::Update { .. }) {
                println!(
                    "{}",
                    serde_json::to_string(&event).context("Could not serialize stage event")?
                );
            }
        }
        now += frame_ms;
    }
    spawner.stop(&mut stage);

    let stats = spawner.stats();
    println!(
        "Simulated: {seconds} s\nTimeline spawns: {}\nMeme spawns: {}\nRemoved: {}\nPeak on screen: {peak}\nTimeline cursor: {}",
        stats.timeline_spawned,
        stats.memes_spawned,
        stats.removed,
        spawner.cursor().index()
    );
    Ok(())
}

fn sync_client(config: &SiteConfig) -> SyncClient<UreqTransport> {
    SyncClient::new(config.api_url.clone(), UreqTransport::new())
}

fn load_state(path: &Path, config: &SiteConfig) -> anyhow::Result<SiteState<MemoryStore>> {
    let store = if path.exists() {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read state file {path:?}"))?;
        serde_json::from_str(&raw).with_context(|| format!("State file {path:?} is not valid"))?
    } else {
        MemoryStore::new()
    };
    Ok(SiteState::load(store, config))
}

fn save_state(path: &Path, state: SiteState<MemoryStore>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&state.into_store())
        .context("Could not serialize state")?;
    std::fs::write(path, json).with_context(|| format!("Could not write state file {path:?}"))
}

//! CavBot FC entry point
//!
//! Native: headless runner that plays matches with the demo autopilot at the
//! controls. The browser build is driven from JS through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use cavbot_fc::consts::NOMINAL_FRAME_MS;
    use cavbot_fc::persistence::{JsonFileStore, MemoryStore, ProgressionStore};
    use cavbot_fc::sim::{Autopilot, ChaseBot, InputMode};
    use cavbot_fc::{LogSink, SessionContext, SimulationLoop, Tuning};

    /// Play CavBot FC matches headlessly with the autopilot
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Number of matches to play
        #[arg(long, default_value_t = 1)]
        pub matches: u32,

        /// Base RNG seed (match i uses seed + i)
        #[arg(long, default_value_t = 7)]
        pub seed: u64,

        /// Pitch width
        #[arg(long, default_value_t = 800.0)]
        pub width: f32,

        /// Pitch height
        #[arg(long, default_value_t = 450.0)]
        pub height: f32,

        /// Drive the player with the analog stick instead of the pointer
        #[arg(long)]
        pub analog: bool,

        /// Progression JSON file (in-memory when omitted)
        #[arg(long)]
        pub store: Option<PathBuf>,

        /// Tuning JSON file overriding feel constants
        #[arg(long)]
        pub tuning: Option<PathBuf>,

        /// Give up on a match after this many frames
        #[arg(long, default_value_t = 60 * 60 * 10)]
        pub max_frames: u32,
    }

    pub fn run(args: Args) {
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path).unwrap_or_else(|e| {
                log::warn!("Falling back to default tuning: {}", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let mode = if args.analog { InputMode::Analog } else { InputMode::Pointer };
        let store: Box<dyn ProgressionStore> = match &args.store {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let mut context = SessionContext {
            store,
            sink: Box::new(LogSink),
        };

        let mut bot = ChaseBot::new(mode);
        log::info!("Autopilot: {}", bot.name());

        for i in 0..args.matches {
            let mut sim = SimulationLoop::new(context, mode, tuning.clone(), args.seed.wrapping_add(i as u64));
            sim.resize(args.width, args.height);

            let mut frames = 0;
            loop {
                let input = bot.next_input(sim.state());
                if let Some(p) = input.pointer {
                    sim.set_player_target(p.x, p.y);
                }
                if let Some(v) = input.analog {
                    sim.set_analog_vector(v.x, v.y);
                }
                frames += 1;
                if !sim.frame(NOMINAL_FRAME_MS) {
                    break;
                }
                if frames >= args.max_frames {
                    log::warn!("Match {} hit the frame cap, abandoning", i + 1);
                    break;
                }
            }

            if let Some(p) = sim.progression() {
                log::info!(
                    "After match {}: {}W {}L, level {}, best streak {}",
                    i + 1,
                    p.wins,
                    p.losses,
                    p.level,
                    p.best_streak
                );
            }
            context = sim.into_context();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = headless::Args::parse();
    log::info!("CavBot FC headless runner starting ({} matches)", args.matches);
    headless::run(args);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

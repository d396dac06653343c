//! Glypha headless runner
//!
//! Plays a scripted session against the recording renderer and reports what
//! happened. Useful for checking a settings file or a seed without a window.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use glypha::audio::{RecordingPlayer, SoundEffect};
    use glypha::renderer::RecordingRenderer;
    use glypha::sim::{GameKey, Point};
    use glypha::{Game, GameEvent, GamePhase, Settings, SettingsError};

    /// Run a scripted Glypha session without a window
    #[derive(Parser, Debug)]
    #[command(name = "glypha", version, about)]
    pub struct Args {
        /// Settings file (JSON); defaults are used when omitted or unreadable
        #[arg(short, long)]
        pub settings: Option<PathBuf>,

        /// Number of ticks to simulate
        #[arg(short, long, default_value_t = 900)]
        pub ticks: u64,

        /// RNG seed, overriding the settings file
        #[arg(long)]
        pub seed: Option<u64>,

        /// Draw a frame every this many ticks
        #[arg(long, default_value_t = 2)]
        pub draw_every: u64,
    }

    /// Hover around this row, drifting left and right
    const CRUISE_TOP: i32 = 200;
    const TURN_TICKS: u64 = 90;
    const CLICK_TICKS: u64 = 150;

    #[derive(Debug, Default)]
    struct Summary {
        flaps: usize,
        landings: usize,
        wraps: usize,
        strikes: usize,
        lives_lost: usize,
        sessions: usize,
        frames: usize,
    }

    pub fn run(args: Args) -> Result<(), SettingsError> {
        let mut settings = match &args.settings {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        settings.validate()?;

        let sounds = RecordingPlayer::new();
        let mut game = Game::new(settings).with_sound_player(Box::new(sounds.clone()));
        let mut renderer = RecordingRenderer::default();
        let mut summary = Summary::default();

        log::info!(
            "Glypha headless: {} ticks at {} Hz",
            args.ticks,
            game.update_frequency()
        );
        game.new_game();

        for tick in 0..args.ticks {
            steer(&mut game, tick);

            for event in game.update() {
                match event {
                    GameEvent::Flapped => summary.flaps += 1,
                    GameEvent::Landed { .. } => summary.landings += 1,
                    GameEvent::Wrapped => summary.wraps += 1,
                    GameEvent::LightningStrike { .. } => summary.strikes += 1,
                    GameEvent::LifeLost { cause, lives_left } => {
                        summary.lives_lost += 1;
                        log::info!("tick {tick}: life lost to {cause:?}, {lives_left} left");
                    }
                    GameEvent::SessionEnded { score, level } => {
                        summary.sessions += 1;
                        log::info!("tick {tick}: game over, score {score}, level {}", level + 1);
                    }
                    _ => {}
                }
            }

            if game.phase() == GamePhase::GameOver {
                game.new_game();
            }

            if args.draw_every > 0 && tick % args.draw_every == 0 {
                game.draw(&mut renderer);
                renderer.take_commands();
                summary.frames += 1;
            }
        }

        let state = game.state();
        println!("ticks        {}", args.ticks);
        println!("seed         {:#x}", state.seed);
        println!("score        {}", state.score.score());
        println!("five digits  {}", state.score.had_tens_of_thousands());
        println!("level        {}", state.level.level_on() + 1);
        println!("lives left   {}", state.level.lives_left());
        println!("{summary:#?}");
        println!("sounds       {}", sounds.played().len());
        println!("deaths heard {}", sounds.count(SoundEffect::Death));
        if let Some(best) = game.high_scores().top_score() {
            println!("high score   {best}");
        }
        Ok(())
    }

    /// Scripted pilot: flap to hold altitude, sweep sideways, and call down
    /// lightning now and then
    fn steer(game: &mut Game, tick: u64) {
        let player = &game.state().player;
        let sinking = player.v_vel >= 0;
        let low = player.dest.top > CRUISE_TOP;
        let (left, right) = if (tick / TURN_TICKS) % 2 == 0 {
            (false, true)
        } else {
            (true, false)
        };

        if low && sinking && tick % 4 == 0 {
            game.handle_key_down_event(GameKey::Spacebar);
        } else {
            game.handle_key_up_event(GameKey::Spacebar);
        }
        set_key(game, GameKey::LeftArrow, left);
        set_key(game, GameKey::RightArrow, right);

        if tick % CLICK_TICKS == CLICK_TICKS - 1 {
            game.handle_mouse_down_event(Point::new(((tick * 37) % 600) as i32 + 20, 60));
        }
    }

    fn set_key(game: &mut Game, key: GameKey, down: bool) {
        if down {
            game.handle_key_down_event(key);
        } else {
            game.handle_key_up_event(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    let args = headless::Args::parse();
    if let Err(err) = headless::run(args) {
        log::error!("{err}");
        eprintln!("glypha: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; a host shell drives `glypha::Game`
}

/// Entry point and game loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::path::Path;
use std::time::Duration;

use env_logger::{Env, Target};

use config::GameConfig;
use error::AppError;
use sim::controller::Controller;
use sim::event::GameEvent;
use ui::dialog::TerminalDialog;
use ui::gamepad::GamepadState;
use ui::input::{InputState, Intent};
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

fn main() {
    let (config, problems) = GameConfig::load();

    if let Err(e) = init_logging(&config.general.log_file) {
        eprintln!("Warning: {e}");
    }
    log::info!("minicraft {} starting", env!("CARGO_PKG_VERSION"));
    for e in &problems {
        log::warn!("config: {e}");
    }

    let mut game = Controller::from_seed(config.general.seed);
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = if config.audio.enabled { SoundEngine::new() } else { None };

    let result = game_loop(&mut game, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("Game error: {e}");
    }

    let inv = &game.state().inventory;
    println!();
    println!("Thanks for playing MiniCraft!");
    if !inv.is_empty() {
        println!("Wood: {}  Stone: {}  Diamond: {}", inv.wood, inv.stone, inv.diamond);
    }
}

/// The terminal belongs to the renderer, so log lines go to a file.
fn init_logging(path: &Path) -> error::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile { path: path.to_path_buf(), source })?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn game_loop(
    game: &mut Controller,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> error::Result<()> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let frame = Duration::from_millis(config.general.frame_ms);

    let mut message = String::from("Mine next to you with Space.");
    renderer.render(&game.snapshot(), &message)?;

    loop {
        gp.update();
        let intent = match kb.poll_intent(frame)? {
            Some(intent) => Some(intent),
            None => gp.intent(),
        };

        let command = match intent {
            Some(Intent::Quit) => break,
            Some(Intent::Command(cmd)) => cmd,
            None => continue,
        };

        let events = {
            let mut dialog = TerminalDialog::new(renderer, &mut gp, frame);
            game.apply(command, &mut dialog)
        };
        process_sound_events(sound, &events);
        if let Some(text) = describe(&events) {
            message = text;
        }

        renderer.render(&game.snapshot(), &message)?;
    }

    log::info!("quit requested");
    Ok(())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::BlockMined { .. } => sfx.play_mine(),
            GameEvent::ResourceCollected { .. } => sfx.play_pickup(),
            GameEvent::Blocked => sfx.play_bump(),
            GameEvent::LavaEntered { .. } => sfx.play_lava(),
            GameEvent::PhaseAdvanced => sfx.play_phase(),
            GameEvent::Won => sfx.play_win(),
            _ => {}
        }
    }
}

/// Status line for the HUD after a command. `None` keeps the old one.
fn describe(events: &[GameEvent]) -> Option<String> {
    // Later events in a batch are the more important ones.
    for event in events.iter().rev() {
        let text = match event {
            GameEvent::Won => "You won! Press R to play again.".to_string(),
            GameEvent::Restarted => "New game. Collect 5 wood and 3 stone.".to_string(),
            GameEvent::PhaseAdvanced => "Phase 2: find 3 diamonds. Watch out for lava!".to_string(),
            GameEvent::AdvanceDeclined => "Staying in phase 1.".to_string(),
            GameEvent::LavaEntered { .. } => "Burned! The world has been rebuilt.".to_string(),
            GameEvent::ResourceCollected { .. } => {
                let names: Vec<&str> = events.iter()
                    .filter_map(|e| match e {
                        GameEvent::ResourceCollected { resource } => Some(resource.name()),
                        _ => None,
                    })
                    .collect();
                format!("Collected {}.", names.join(", "))
            }
            GameEvent::BlockMined { .. } => "Cleared the ground around you.".to_string(),
            GameEvent::NothingToMine => "Nothing to mine here.".to_string(),
            GameEvent::Blocked => "Something is in the way.".to_string(),
            GameEvent::Moved { .. } => String::new(),
            GameEvent::Ignored => continue,
        };
        return Some(text);
    }
    None
}

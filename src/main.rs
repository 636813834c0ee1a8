/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::grid::Direction;
use sim::event::GameEvent;
use sim::step;
use sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

/// Bound on the title-screen name field.
const MAX_NAME_LEN: usize = 16;

fn main() {
    let config = GameConfig::load();
    let mut world = WorldState::new();

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut world, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Wrap Snake!");
    if !world.player_name.is_empty() {
        println!("Last score for {}: {}", world.player_name, world.score);
    }
}

/// The cooperative loop: one logical thread dispatches input draining,
/// the fixed-interval tick, and the per-frame render in sequence, so the
/// tick is the only writer of game state each pass.
fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.tick_rate_ms);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(world, &kb, config) {
            break;
        }

        if world.phase == Phase::Playing {
            // Apply direction presses in arrival order: each press is
            // filtered against the active direction and overwrites the
            // pending slot, so the last valid press before the tick wins.
            for key in kb.presses() {
                if let Some(dir) = key_to_direction(key.code) {
                    world.queue_direction(dir);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            let events = step::step(world);
            process_sound_events(sound, &events);
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::FoodEaten { .. } => sfx.play_eat(),
            GameEvent::SnakeDied => {}
        }
    }
}

// ── Key Constants ──

const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter];

fn key_to_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Phase-dependent meta input: name entry and start on the title screen,
/// abandon/dismiss elsewhere. Returns true to quit the program.
fn handle_meta(world: &mut WorldState, kb: &InputState, config: &GameConfig) -> bool {
    let confirm = kb.any_pressed(KEYS_CONFIRM);
    let esc = kb.any_pressed(&[KeyCode::Esc]);

    match world.phase {
        // ── Title: edit the name field, start, or quit ──
        Phase::Title => {
            for c in kb.typed_chars() {
                if !c.is_control() && world.name_input.chars().count() < MAX_NAME_LEN {
                    world.name_input.push(c);
                }
            }
            if kb.was_pressed(KeyCode::Backspace) {
                world.name_input.pop();
            }

            if confirm {
                world.start_game(&config.default_name);
            } else if esc {
                return true;
            }
        }

        // ── Playing: ESC abandons the session back to the title ──
        Phase::Playing => {
            if esc {
                world.phase = Phase::Title;
            }
        }

        // ── Game over: dismiss the modal back to the pre-game screen ──
        Phase::GameOver => {
            if confirm || esc {
                world.phase = Phase::Title;
            }
        }
    }

    false
}

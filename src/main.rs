//! Gemfall entry point
//!
//! Owns the platform plumbing: window setup, logger, audio handles,
//! key polling and the frame loop. Everything else happens inside the
//! simulation behind a `FrameInput` and a queue of `GameEvent`s.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use macroquad::prelude::*;

use gemfall::audio::AudioManager;
use gemfall::sim::{self, FrameInput, GameSession};
use gemfall::{Settings, consts, render};

fn window_conf() -> Conf {
    Conf {
        window_title: "Collect D'Gems".to_string(),
        window_width: consts::SCREEN_WIDTH as i32,
        window_height: consts::SCREEN_HEIGHT as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

/// Sample the keys the game cares about
fn read_input() -> FrameInput {
    FrameInput {
        left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        confirm: is_key_pressed(KeyCode::Enter),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let _ = env_logger::try_init();

    let settings = Settings::load();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("starting session, seed {seed}");

    let audio = Rc::new(RefCell::new(AudioManager::load(&settings).await));
    let mut session = GameSession::new(consts::SCREEN_WIDTH, consts::SCREEN_HEIGHT, seed);

    // The collect chime rides the ledger's score feed
    let chime = Rc::clone(&audio);
    session.ledger.subscribe(move |event| {
        log::debug!("score {} (+{})", event.total, event.added);
        chime.borrow().play_collect();
    });

    // Route window-close through the loop exit so teardown still runs
    prevent_quit();

    loop {
        if is_key_pressed(KeyCode::Escape) || is_quit_requested() {
            break;
        }

        let dt = get_frame_time();
        let input = read_input();
        sim::update(&mut session, &input, dt);

        for event in session.drain_events() {
            audio.borrow_mut().handle(event);
        }

        render::draw(&session, &settings);
        next_frame().await;
    }

    audio.borrow_mut().stop_music();
    log::info!("shutting down, high score {}", session.ledger.high_score());
}

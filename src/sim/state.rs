//! Session context, the screen state machine and the flash effect
//!
//! One `GameSession` owns everything the game mutates: the current
//! screen, the cart, the score ledger, the spawner RNG and the flash
//! state. It is created once in `main` and passed by reference into
//! update and render; there is no global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::InputMapper;
use super::object::FallingObject;
use super::player::Cart;
use super::score::ScoreLedger;
use super::spawn::Spawner;
use crate::consts::*;

/// Side effects the sim wants the platform layer to perform. Queued
/// during update and drained by the frontend once per frame, which
/// keeps the sim free of audio dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// One-shot collect chime
    Collect,
    /// One-shot explosion burst
    Explosion,
    /// Start the music loop if it is not already playing
    MusicStart,
    /// Stop the music loop if it is playing
    MusicStop,
}

/// The three screens. Exactly one is current; a transition drops the
/// old variant (and with it any per-screen data) and enters the new.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Title,
    Playing { objects: Vec<FallingObject> },
    GameOver,
}

impl Screen {
    /// A fresh gameplay screen with no live objects
    pub fn playing() -> Self {
        Screen::Playing { objects: Vec::new() }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Title => "title",
            Screen::Playing { .. } => "playing",
            Screen::GameOver => "game over",
        }
    }
}

/// Full-screen feedback flash after a dynamite hit. Decays as a pulse
/// rather than a linear fade.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenFlash {
    pub flashing: bool,
    pub alpha: f32,
    pub remaining: f32,
}

impl ScreenFlash {
    pub fn trigger(&mut self, duration: f32) {
        self.flashing = true;
        self.alpha = FLASH_PEAK_ALPHA;
        self.remaining = duration;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.flashing {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.flashing = false;
            self.alpha = 0.0;
        } else {
            self.alpha = 0.6 * ((self.remaining * 10.0).sin() * 0.5 + 0.5);
        }
    }
}

/// The whole mutable game: current screen, entities, score, timers.
pub struct GameSession {
    pub screen: Screen,
    pub input: InputMapper,
    pub ledger: ScoreLedger,
    pub spawner: Spawner,
    pub player: Cart,
    pub screen_w: f32,
    pub screen_h: f32,
    pub flash: ScreenFlash,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Re-rolled after every spawn
    pub spawn_interval: f32,
    pub rng: Pcg32,
    pub events: Vec<GameEvent>,
}

impl GameSession {
    /// Build a session on the title screen. `seed` drives all gameplay
    /// randomness for the lifetime of the session.
    pub fn new(screen_w: f32, screen_h: f32, seed: u64) -> Self {
        let track_y = screen_h - TRACK_HEIGHT;
        let mut session = Self {
            screen: Screen::Title,
            input: InputMapper::new(),
            ledger: ScoreLedger::new(),
            spawner: Spawner::new(),
            player: Cart::new(Vec2::new(screen_w / 2.0, track_y), CART_SPEED, CART_SIZE),
            screen_w,
            screen_h,
            flash: ScreenFlash::default(),
            spawn_timer: 0.0,
            spawn_interval: 1.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        session.enter_screen();
        session
    }

    /// Run the old screen's exit effects, swap, run the new screen's
    /// enter effects.
    pub fn change_screen(&mut self, next: Screen) {
        log::info!("screen: {} -> {}", self.screen.name(), next.name());
        self.exit_screen();
        self.screen = next;
        self.enter_screen();
    }

    fn exit_screen(&mut self) {
        match self.screen {
            Screen::Title => {
                // The title screen cycles the stream on its way out.
                self.events.push(GameEvent::MusicStop);
                self.events.push(GameEvent::MusicStart);
            }
            // Live objects are dropped with the variant
            Screen::Playing { .. } => {}
            Screen::GameOver => {}
        }
    }

    fn enter_screen(&mut self) {
        match self.screen {
            Screen::Title => {
                self.events.push(GameEvent::MusicStart);
            }
            Screen::Playing { .. } => {
                self.ledger.reset_score();
                self.player.recenter(self.screen_w);
                self.reset_spawn_timer();
                self.events.push(GameEvent::MusicStart);
            }
            Screen::GameOver => {
                log::info!(
                    "run over: score {} (best {})",
                    self.ledger.score(),
                    self.ledger.high_score()
                );
                self.events.push(GameEvent::MusicStop);
            }
        }
    }

    /// Zero the spawn clock and re-roll the next interval
    pub fn reset_spawn_timer(&mut self) {
        self.spawn_timer = 0.0;
        self.spawn_interval = self.spawner.roll_interval(&mut self.rng);
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.screen, Screen::Playing { .. })
    }

    /// Hand the queued platform effects to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

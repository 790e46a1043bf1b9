//! Per-frame update pipeline
//!
//! Fixed order every frame: flash decay, session spawn clock, then the
//! current screen. Gameplay runs the full spawn/move/collide/compact
//! cycle; the menu screens only watch for the confirm key.

use super::input::FrameInput;
use super::state::{GameEvent, GameSession, Screen};
use crate::consts::*;

/// Advance the whole session by one frame
pub fn update(session: &mut GameSession, input: &FrameInput, dt: f32) {
    session.flash.update(dt);
    // The spawn clock lives at the session level so it keeps elapsing
    // across screens; gameplay adds its own advance on top of this one.
    session.spawn_timer += dt;

    let next = if session.is_playing() {
        playing_tick(session, input, dt)
    } else if input.confirm {
        // Title and game-over both confirm into a fresh run
        Some(Screen::playing())
    } else {
        None
    };

    if let Some(next) = next {
        session.change_screen(next);
    }
}

/// One gameplay frame. Returns the next screen when a dynamite ends
/// the run.
fn playing_tick(session: &mut GameSession, input: &FrameInput, dt: f32) -> Option<Screen> {
    let GameSession {
        screen,
        input: mapper,
        ledger,
        spawner,
        player,
        screen_w,
        screen_h,
        flash,
        spawn_timer,
        spawn_interval,
        rng,
        events,
    } = session;
    let Screen::Playing { objects } = screen else {
        return None;
    };
    let (screen_w, screen_h) = (*screen_w, *screen_h);

    mapper.drive(input, player, dt, screen_w);
    player.update(dt);
    ledger.update(dt);

    *spawn_timer += dt;
    if *spawn_timer >= *spawn_interval {
        objects.push(spawner.spawn(rng, screen_w));
        *spawn_timer = 0.0;
        *spawn_interval = spawner.roll_interval(rng);
    }

    let hitbox = player.hitbox();
    for object in objects.iter_mut() {
        if !object.active {
            continue;
        }
        object.update(dt, screen_h);
        if !object.collides(&hitbox) {
            continue;
        }

        if object.kind.is_hazard() {
            events.push(GameEvent::Explosion);
            flash.trigger(EXPLOSION_FLASH_SECS);
            player.set_hit(true);
            object.active = false;
            // The run is over; nothing else gets processed this frame.
            return Some(Screen::GameOver);
        }

        events.push(GameEvent::Collect);
        ledger.add_score(object.value, object.position, object.kind.score_color());
        object.active = false;
    }

    // Removals are deferred to this single end-of-frame compaction so
    // the loop above never mutates the list it walks.
    objects.retain(|o| o.active);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;
    use crate::sim::object::{FallingObject, GemKind};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> GameSession {
        let mut s = GameSession::new(800.0, 450.0, 12345);
        s.drain_events();
        s
    }

    fn playing_session() -> GameSession {
        let mut s = session();
        s.change_screen(Screen::playing());
        s.drain_events();
        s
    }

    /// Plant a motionless object dead on the cart
    fn plant(session: &mut GameSession, kind: GemKind) {
        let object = FallingObject::new(session.player.position, 0.0, kind);
        let Screen::Playing { objects } = &mut session.screen else {
            panic!("expected playing screen");
        };
        objects.push(object);
    }

    fn object_count(session: &GameSession) -> usize {
        match &session.screen {
            Screen::Playing { objects } => objects.len(),
            _ => 0,
        }
    }

    #[test]
    fn test_title_confirm_starts_fresh_run() {
        let mut s = session();
        s.ledger.add_score(10, Vec2::ZERO, Rgb::GOLD);

        update(&mut s, &FrameInput::default(), DT);
        assert_eq!(s.screen, Screen::Title);

        update(&mut s, &FrameInput { confirm: true, ..Default::default() }, DT);
        assert!(s.is_playing());
        assert_eq!(s.ledger.score(), 0);
        assert_eq!(object_count(&s), 0);
    }

    #[test]
    fn test_game_over_confirm_restarts() {
        let mut s = session();
        s.change_screen(Screen::GameOver);
        update(&mut s, &FrameInput { confirm: true, ..Default::default() }, DT);
        assert!(s.is_playing());
        assert_eq!(s.ledger.score(), 0);
    }

    #[test]
    fn test_ignored_signals_are_noops() {
        let mut s = session();
        s.change_screen(Screen::GameOver);
        s.drain_events();
        update(&mut s, &FrameInput { left: true, right: true, confirm: false }, DT);
        assert_eq!(s.screen, Screen::GameOver);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_spawn_after_interval_elapses() {
        let mut s = playing_session();
        s.spawn_timer = 0.0;
        s.spawn_interval = 1.0;

        // Each frame advances the spawn clock twice (session level and
        // gameplay level), so a 1 s interval elapses after ~30 frames.
        for _ in 0..28 {
            update(&mut s, &FrameInput::default(), DT);
        }
        assert_eq!(object_count(&s), 0);

        for _ in 0..3 {
            update(&mut s, &FrameInput::default(), DT);
        }
        assert_eq!(object_count(&s), 1);
        // Clock reset and interval re-rolled
        assert!(s.spawn_timer < 1.0);
        assert!((0.5..=2.0).contains(&s.spawn_interval));
    }

    #[test]
    fn test_collect_scores_and_notifies() {
        let mut s = playing_session();
        let seen: Rc<RefCell<Vec<(u32, u32, Vec2, Rgb)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        s.ledger.subscribe(move |e| {
            sink.borrow_mut().push((e.total, e.added, e.position, e.color));
        });

        s.player.position = Vec2::new(400.0, 300.0);
        plant(&mut s, GemKind::GoldBar);
        // Keep the spawn clock away from the interval for this frame
        s.spawn_timer = 0.0;
        s.spawn_interval = 10.0;

        update(&mut s, &FrameInput::default(), DT);

        assert!(s.is_playing());
        assert_eq!(s.ledger.score(), 8);
        assert_eq!(s.ledger.floaters().len(), 1);
        assert_eq!(s.ledger.floaters()[0].text, "+8");
        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        let (total, added, position, color) = events[0];
        assert_eq!(total, 8);
        assert_eq!(added, 8);
        assert_eq!(position, Vec2::new(400.0, 300.0));
        assert_eq!(color, Rgb::GOLD);
        // Caught object compacted away, collect cue queued
        assert_eq!(object_count(&s), 0);
        assert_eq!(s.drain_events(), vec![GameEvent::Collect]);
    }

    #[test]
    fn test_dynamite_ends_run_short_circuit() {
        let mut s = playing_session();
        s.ledger.add_score(42, Vec2::ZERO, Rgb::GOLD);
        let old_high = s.ledger.high_score();
        s.player.position = Vec2::new(400.0, 410.0);
        // A collectible sits behind the dynamite in the list; the short
        // circuit must leave it untouched.
        plant(&mut s, GemKind::Dynamite);
        plant(&mut s, GemKind::Diamond);
        s.spawn_timer = 0.0;
        s.spawn_interval = 10.0;

        update(&mut s, &FrameInput::default(), DT);

        assert_eq!(s.screen, Screen::GameOver);
        assert_eq!(s.ledger.score(), 42);
        assert_eq!(s.ledger.high_score(), old_high.max(42));
        assert!(s.flash.flashing);
        assert!((s.flash.remaining - 1.0).abs() < 1e-5);
        assert!(s.player.is_hit());
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::Explosion));
        assert!(!events.contains(&GameEvent::Collect));
    }

    #[test]
    fn test_off_screen_objects_compacted() {
        let mut s = playing_session();
        let Screen::Playing { objects } = &mut s.screen else {
            panic!("expected playing screen");
        };
        objects.push(FallingObject::new(Vec2::new(100.0, 505.0), 1.0, GemKind::Ruby));
        s.spawn_timer = 0.0;
        s.spawn_interval = 10.0;

        update(&mut s, &FrameInput::default(), DT);
        assert_eq!(object_count(&s), 0);
    }

    #[test]
    fn test_input_moves_cart_during_play() {
        let mut s = playing_session();
        let x = s.player.position.x;
        update(&mut s, &FrameInput { left: true, ..Default::default() }, DT);
        assert!(s.player.position.x < x);
    }

    #[test]
    fn test_flash_decays_across_frames() {
        let mut s = playing_session();
        s.flash.trigger(1.0);
        for _ in 0..70 {
            update(&mut s, &FrameInput::default(), DT);
        }
        assert!(!s.flash.flashing);
        assert_eq!(s.flash.alpha, 0.0);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut s = GameSession::new(800.0, 450.0, 777);
            s.change_screen(Screen::playing());
            for i in 0..600 {
                let input = FrameInput {
                    left: i % 7 < 3,
                    right: i % 11 < 4,
                    confirm: false,
                };
                update(&mut s, &input, DT);
            }
            (
                s.ledger.score(),
                s.player.position.x,
                object_count(&s),
                s.screen.name(),
            )
        };
        assert_eq!(run(), run());
    }
}

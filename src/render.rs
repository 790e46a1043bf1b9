//! Draw pass: a pure read over the session, one call per frame
//!
//! Nothing in here mutates game state. All shapes are drawn
//! procedurally, so the game ships without texture or font assets.

use macroquad::prelude::*;

use crate::Rgb;
use crate::consts::TRACK_HEIGHT;
use crate::settings::Settings;
use crate::sim::{Cart, FallingObject, GameSession, GemKind, Screen};

const BACKDROP: Color = Color::new(0.93, 0.89, 0.80, 1.0);
const TRACK_BED: Color = Color::new(0.35, 0.25, 0.18, 1.0);
const TRACK_TIE: Color = Color::new(0.22, 0.15, 0.10, 1.0);
const CART_BODY: Color = Color::new(0.45, 0.30, 0.20, 1.0);

pub fn draw(session: &GameSession, settings: &Settings) {
    clear_background(BACKDROP);

    match &session.screen {
        Screen::Title => draw_title(session),
        Screen::Playing { objects } => draw_playing(session, objects),
        Screen::GameOver => draw_game_over(session),
    }

    if session.flash.flashing && settings.flash_enabled() {
        draw_rectangle(
            0.0,
            0.0,
            session.screen_w,
            session.screen_h,
            color(Rgb::RED, session.flash.alpha),
        );
    }

    if settings.show_fps {
        draw_text(&format!("{} fps", get_fps()), session.screen_w - 70.0, 20.0, 20.0, DARKGRAY);
    }
}

fn draw_title(session: &GameSession) {
    let w = session.screen_w;
    let h = session.screen_h;

    draw_centered("COLLECT D'GEMS", w, h / 3.0, 40.0, SKYBLUE);
    draw_centered("Press ENTER to Start", w, h / 2.0, 20.0, LIGHTGRAY);
    draw_centered(
        "Use LEFT and RIGHT arrows Or A and D to move",
        w,
        h / 2.0 + 40.0,
        20.0,
        LIGHTGRAY,
    );
    draw_centered("Avoid the Dynamites!", w, h / 2.0 + 70.0, 20.0, RED);

    if session.ledger.high_score() > 0 {
        draw_centered(
            &format!("High Score: {}", session.ledger.high_score()),
            w,
            h / 2.0 + 120.0,
            20.0,
            GOLD,
        );
    }
}

fn draw_playing(session: &GameSession, objects: &[FallingObject]) {
    draw_track(session.screen_w, session.screen_h);

    for object in objects {
        if object.active {
            draw_object(object);
        }
    }
    draw_cart(&session.player);

    // Score overlay
    draw_text(&format!("Score: {}", session.ledger.score()), 10.0, 34.0, 30.0, BLACK);
    if session.ledger.high_score() > 0 {
        draw_text(
            &format!("High Score: {}", session.ledger.high_score()),
            10.0,
            62.0,
            20.0,
            DARKGRAY,
        );
    }

    for floater in session.ledger.floaters() {
        let dims = measure_text(&floater.text, None, 20, 1.0);
        draw_text(
            &floater.text,
            floater.position.x - dims.width / 2.0,
            floater.position.y,
            20.0,
            color(floater.color, floater.alpha),
        );
    }
}

fn draw_game_over(session: &GameSession) {
    let w = session.screen_w;
    let h = session.screen_h;

    draw_centered("GAME OVER!", w, h / 3.0, 40.0, RED);
    draw_centered(
        &format!("Final Score: {}", session.ledger.score()),
        w,
        h / 2.0 - 20.0,
        30.0,
        BLACK,
    );

    if session.ledger.score() >= session.ledger.high_score() {
        draw_centered("NEW HIGH SCORE!", w, h / 2.0 + 20.0, 20.0, GOLD);
    }
    draw_centered("Press ENTER to Play Again", w, h / 2.0 + 60.0, 20.0, DARKGRAY);
    draw_centered("Press ESC to Exit", w, h / 2.0 + 90.0, 20.0, DARKGRAY);
}

/// Rail bed along the bottom edge with evenly spaced ties
fn draw_track(w: f32, h: f32) {
    let top = h - TRACK_HEIGHT;
    draw_rectangle(0.0, top, w, TRACK_HEIGHT, TRACK_BED);
    let mut x = 0.0;
    while x < w {
        draw_rectangle(x, top, 8.0, TRACK_HEIGHT, TRACK_TIE);
        x += 32.0;
    }
    draw_line(0.0, top + 6.0, w, top + 6.0, 3.0, GRAY);
}

fn draw_cart(cart: &Cart) {
    let size = cart.size();
    let x = cart.position.x;
    let y = cart.position.y;

    // While hit, pulse the body toward red
    let body = if cart.is_hit() {
        let pulse = (80.0 * ((cart.hit_timer() * 30.0).sin() * 0.5 + 0.5)) as u8;
        Color::from_rgba(255, pulse, pulse, 255)
    } else {
        CART_BODY
    };

    draw_rectangle(x - size / 2.0, y - size / 4.0, size, size / 2.0, body);
    draw_rectangle_lines(x - size / 2.0, y - size / 4.0, size, size / 2.0, 3.0, BLACK);
    draw_circle(x - size / 4.0, y + size / 4.0, size / 8.0, DARKGRAY);
    draw_circle(x + size / 4.0, y + size / 4.0, size / 8.0, DARKGRAY);
}

fn draw_object(object: &FallingObject) {
    let x = object.position.x;
    let y = object.position.y;
    let half = object.size / 2.0;

    match object.kind {
        GemKind::Diamond => draw_poly(x, y, 4, half, object.rotation, color(Rgb::SKY_BLUE, 1.0)),
        GemKind::Ruby => draw_poly(x, y, 5, half, object.rotation, color(Rgb::RED, 1.0)),
        GemKind::Amethyst => draw_poly(x, y, 6, half, object.rotation, color(Rgb::PURPLE, 1.0)),
        GemKind::GoldBar => draw_bar(object, color(Rgb::GOLD, 1.0)),
        GemKind::SilverBar => draw_bar(object, color(Rgb::LIGHT_GRAY, 1.0)),
        GemKind::Dynamite => draw_dynamite(object),
    }
}

/// Ingots render as a rotated slab rather than a polygon
fn draw_bar(object: &FallingObject, fill: Color) {
    let w = object.size;
    let h = object.size * 0.5;
    draw_rectangle_ex(
        object.position.x,
        object.position.y,
        w,
        h,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation: object.rotation.to_radians(),
            color: fill,
        },
    );
}

fn draw_dynamite(object: &FallingObject) {
    let w = object.size * 0.4;
    let h = object.size;
    draw_rectangle_ex(
        object.position.x,
        object.position.y,
        w,
        h,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation: object.rotation.to_radians(),
            color: MAROON,
        },
    );
    // Fuse tip
    let angle = (object.rotation - 90.0).to_radians();
    let tip_x = object.position.x + angle.cos() * h * 0.55;
    let tip_y = object.position.y + angle.sin() * h * 0.55;
    draw_circle(tip_x, tip_y, 3.0, ORANGE);
}

fn draw_centered(text: &str, screen_w: f32, y: f32, font_size: f32, fill: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, screen_w / 2.0 - dims.width / 2.0, y, font_size, fill);
}

fn color(rgb: Rgb, alpha: f32) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

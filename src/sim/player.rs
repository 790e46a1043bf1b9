//! The player's mine cart

use glam::Vec2;

use super::rect::Aabb;
use crate::consts::*;

/// Horizontally moving cart with a short invulnerability flash after a
/// hit. The hitbox is always derived from the current position, never
/// stored, so it cannot drift out of sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub position: Vec2,
    speed: f32,
    size: f32,
    hit: bool,
    hit_timer: f32,
}

impl Cart {
    pub fn new(position: Vec2, speed: f32, size: f32) -> Self {
        Self {
            position,
            speed,
            size,
            hit: false,
            hit_timer: 0.0,
        }
    }

    /// Count the hit flash down; the flag clears once the timer runs out
    pub fn update(&mut self, dt: f32) {
        if self.hit {
            self.hit_timer -= dt;
            if self.hit_timer <= 0.0 {
                self.hit = false;
            }
        }
    }

    pub fn move_left(&mut self, dt: f32, screen_w: f32) {
        self.position.x -= self.speed * FRAME_RATE_BASE * dt;
        self.clamp(screen_w);
    }

    pub fn move_right(&mut self, dt: f32, screen_w: f32) {
        self.position.x += self.speed * FRAME_RATE_BASE * dt;
        self.clamp(screen_w);
    }

    /// Snap back to the horizontal center, keeping the track height
    pub fn recenter(&mut self, screen_w: f32) {
        self.position.x = screen_w / 2.0;
    }

    pub fn set_hit(&mut self, hit: bool) {
        self.hit = hit;
        self.hit_timer = if hit { HIT_FLASH_SECS } else { 0.0 };
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn hit_timer(&self) -> f32 {
        self.hit_timer
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Position-centered square of side `size`
    pub fn hitbox(&self) -> Aabb {
        Aabb::centered(self.position, self.size)
    }

    fn clamp(&mut self, screen_w: f32) {
        let half = self.size / 2.0;
        self.position.x = self.position.x.clamp(half, screen_w - half);
    }
}

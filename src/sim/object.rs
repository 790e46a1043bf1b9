//! Falling objects: the collectible gems and the dynamite hazard

use glam::Vec2;

use super::rect::Aabb;
use crate::Rgb;
use crate::consts::*;

/// The six categories of falling object. Five are collectible,
/// dynamite ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GemKind {
    Diamond,
    Ruby,
    Amethyst,
    GoldBar,
    SilverBar,
    Dynamite,
}

impl GemKind {
    /// Points awarded when caught
    pub fn value(self) -> u32 {
        match self {
            GemKind::Diamond => 15,
            GemKind::Ruby => 12,
            GemKind::Amethyst => 10,
            GemKind::GoldBar => 8,
            GemKind::SilverBar => 5,
            GemKind::Dynamite => 0,
        }
    }

    /// Color used for the score popup this kind produces
    pub fn score_color(self) -> Rgb {
        match self {
            GemKind::Diamond => Rgb::SKY_BLUE,
            GemKind::Ruby => Rgb::RED,
            GemKind::Amethyst => Rgb::PURPLE,
            GemKind::GoldBar => Rgb::GOLD,
            GemKind::SilverBar => Rgb::LIGHT_GRAY,
            GemKind::Dynamite => Rgb::WHITE,
        }
    }

    pub fn is_hazard(self) -> bool {
        self == GemKind::Dynamite
    }
}

/// A single falling entity. Spawned above the top edge, falls and
/// tumbles each tick, and goes inactive on collision or once it drops
/// past the bottom of the screen. Inactive objects are never rendered
/// and are compacted out of the owning list at the end of the tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingObject {
    pub position: Vec2,
    pub speed: f32,
    pub rotation: f32,
    pub size: f32,
    pub active: bool,
    pub kind: GemKind,
    pub value: u32,
}

impl FallingObject {
    pub fn new(position: Vec2, speed: f32, kind: GemKind) -> Self {
        Self {
            position,
            speed,
            rotation: 0.0,
            size: OBJECT_SIZE,
            active: true,
            kind,
            value: kind.value(),
        }
    }

    /// Advance fall and tumble, deactivating once fully below the screen
    pub fn update(&mut self, dt: f32, screen_h: f32) {
        self.position.y += self.speed * FRAME_RATE_BASE * dt;
        self.rotation += OBJECT_SPIN_RATE * dt;

        if self.is_off_screen(screen_h) {
            self.active = false;
        }
    }

    pub fn is_off_screen(&self, screen_h: f32) -> bool {
        self.position.y > screen_h + self.size
    }

    /// Collision bounds, a position-centered square
    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.position, self.size)
    }

    pub fn collides(&self, other: &Aabb) -> bool {
        self.bounds().overlaps(other)
    }
}

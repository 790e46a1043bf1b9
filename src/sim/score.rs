//! Score tracking, transient score popups and score-change notification

use glam::Vec2;

use crate::Rgb;
use crate::consts::*;

/// Snapshot of a single score-add, delivered to every subscriber
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEvent {
    /// Total after the add
    pub total: u32,
    /// Points this add was worth
    pub added: u32,
    /// Where the catch happened (seeds the popup)
    pub position: Vec2,
    pub color: Rgb,
}

/// Handle returned by [`ScoreLedger::subscribe`]; pass it back to
/// [`ScoreLedger::unsubscribe`] to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u32);

type Subscriber = Box<dyn FnMut(&ScoreEvent)>;

/// A transient "+N" popup that drifts upward and fades out over the
/// last half second of its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub position: Vec2,
    pub text: String,
    pub color: Rgb,
    pub alpha: f32,
    pub timer: f32,
}

impl FloatingText {
    pub fn new(position: Vec2, value: u32, color: Rgb) -> Self {
        Self {
            position,
            text: format!("+{value}"),
            color,
            alpha: 1.0,
            timer: FLOATER_LIFETIME_SECS,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.position.y -= FLOATER_RISE_RATE * dt;
        self.timer -= dt;
        if self.timer <= FLOATER_FADE_SECS {
            self.alpha = self.timer / FLOATER_FADE_SECS;
        }
    }

    pub fn expired(&self) -> bool {
        self.timer <= 0.0
    }
}

/// Current and high score, the live popups, and the subscriber list.
///
/// The high score is a process-lifetime high-water mark: it survives
/// `reset_score` and only ever rises. Subscribers are plain callbacks
/// owned by the ledger and invoked synchronously on every add.
#[derive(Default)]
pub struct ScoreLedger {
    current: u32,
    high: u32,
    floaters: Vec<FloatingText>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_id: u32,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points, raise the high-water mark, seed a popup at
    /// `position` and notify every subscriber.
    pub fn add_score(&mut self, points: u32, position: Vec2, color: Rgb) {
        self.current += points;
        if self.current > self.high {
            self.high = self.current;
        }

        self.floaters.push(FloatingText::new(position, points, color));

        let event = ScoreEvent {
            total: self.current,
            added: points,
            position,
            color,
        };
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&event);
        }
    }

    /// Zero the current score and drop all popups. The high score is
    /// deliberately untouched.
    pub fn reset_score(&mut self) {
        self.current = 0;
        self.floaters.clear();
    }

    /// Advance every popup, then drop the expired ones
    pub fn update(&mut self, dt: f32) {
        for floater in &mut self.floaters {
            floater.update(dt);
        }
        self.floaters.retain(|f| !f.expired());
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ScoreEvent) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the id was already gone
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn score(&self) -> u32 {
        self.current
    }

    pub fn high_score(&self) -> u32 {
        self.high
    }

    pub fn floaters(&self) -> &[FloatingText] {
        &self.floaters
    }
}

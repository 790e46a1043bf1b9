//! Key-state to move-command translation

use super::player::Cart;

/// Raw key state sampled once per frame by the platform layer.
///
/// `left`/`right` are level-triggered ("currently held"); `confirm` is
/// edge-triggered ("newly pressed this frame").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCommand {
    Left,
    Right,
}

/// Turns a frame's key state into move commands and applies them to
/// the cart. Both directions held yields both commands, which cancel
/// out over the frame.
#[derive(Debug, Default)]
pub struct InputMapper;

impl InputMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map(&self, input: &FrameInput) -> impl Iterator<Item = MoveCommand> {
        [
            input.left.then_some(MoveCommand::Left),
            input.right.then_some(MoveCommand::Right),
        ]
        .into_iter()
        .flatten()
    }

    pub fn drive(&self, input: &FrameInput, cart: &mut Cart, dt: f32, screen_w: f32) {
        for command in self.map(input) {
            match command {
                MoveCommand::Left => cart.move_left(dt, screen_w),
                MoveCommand::Right => cart.move_right(dt, screen_w),
            }
        }
    }
}

use super::JoystickId;
use thiserror::Error;

/// Errors raised while creating a joystick
///
/// Event handling never fails; only construction can be refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoystickError {
    /// Both radii must be positive
    #[error("Radius must be positive (base: {base}, stick: {stick})")]
    ZeroRadius { base: u16, stick: u16 },

    /// The handle has to be smaller than its base
    #[error("Stick radius {stick} must be smaller than base radius {base}")]
    StickTooLarge { base: u16, stick: u16 },

    /// Admissible positions must fit the i16 report coordinates
    #[error("Base radius {0} exceeds the supported maximum of {max}", max = i16::MAX)]
    BaseTooLarge(u16),

    /// Another live joystick on the same panel already uses this id
    #[error("Joystick id {0} is already in use")]
    DuplicateId(JoystickId),
}

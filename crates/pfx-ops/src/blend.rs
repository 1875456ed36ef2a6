//! Blend modes shared by every adjustable operation.
//!
//! A blend mode decides how an option amount combines with an existing
//! channel. Amounts are ratios (a request value of `25` arrives here as
//! `0.25`).
//!
//! | Mode       | Byte channel (0-255)                     | Ratio (0-1)                 |
//! |------------|------------------------------------------|-----------------------------|
//! | `add`      | `clamp(c + 255 * amount)`                | `clamp(c + amount)`         |
//! | `multiply` | `clamp(c + c * amount)`                  | `clamp(c + c * amount)`     |
//! | `replace`  | `clamp(amount * 255)`, or `c` if `< 0`   | `clamp(amount)`, or `c` if `< 0` |
//!
//! A negative amount in `replace` mode is the "leave this channel alone"
//! sentinel.
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::BlendMode;
//!
//! assert_eq!(BlendMode::Add.channel(200.0, 0.25), 255.0);
//! assert_eq!(BlendMode::Multiply.channel(100.0, -0.5), 50.0);
//! assert_eq!(BlendMode::Replace.channel(100.0, -0.01), 100.0);
//! ```

use pfx_core::hsv::clamp_unit;
use pfx_core::{clamp_channel, CHANNEL_MAX};

/// How an amount combines with a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Offset by a fraction of full scale.
    #[default]
    Add,
    /// Scale relative to the current value.
    Multiply,
    /// Overwrite with an absolute level.
    Replace,
}

impl BlendMode {
    /// Looks up a blend mode by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Self::Add),
            "multiply" => Some(Self::Multiply),
            "replace" => Some(Self::Replace),
            _ => None,
        }
    }

    /// Lowercase name used in request options.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Multiply => "multiply",
            Self::Replace => "replace",
        }
    }

    /// Combines a byte-scale channel with `amount`, clamped to `[0, 255]`.
    #[inline]
    pub fn channel(self, value: f32, amount: f32) -> f32 {
        match self {
            Self::Add => clamp_channel(value + CHANNEL_MAX * amount),
            Self::Multiply => clamp_channel(value + value * amount),
            Self::Replace if amount >= 0.0 => clamp_channel(amount * CHANNEL_MAX),
            Self::Replace => value,
        }
    }

    /// Combines a `[0, 1]` ratio with `amount`, clamped to `[0, 1]`.
    #[inline]
    pub fn ratio(self, value: f32, amount: f32) -> f32 {
        match self {
            Self::Add => clamp_unit(value + amount),
            Self::Multiply => clamp_unit(value + value * amount),
            Self::Replace if amount >= 0.0 => clamp_unit(amount),
            Self::Replace => value,
        }
    }
}

//! Operation resolution.
//!
//! Turns a [`Request`] into a fully typed [`Operation`]: the operation name
//! and `mode` pick the variant, per-operation defaults fill missing options,
//! and percentage-scale values are converted once.
//!
//! | Operation          | `mode`                          | Defaults                                   |
//! |--------------------|---------------------------------|--------------------------------------------|
//! | `colorize`         | `add` \| `multiply` \| `replace` | `add`; r/g/b 0 (replace: -1 = keep)        |
//! | `grayscale`        | estimator name                  | `average`                                  |
//! | `hue`              | `add` \| `multiply` \| `replace` | `add`; hue 0; sat/value 0 (replace: -1)    |
//! | `opacity`          | `add` \| `multiply` \| `replace` | `replace`; opacity 100                     |
//! | `effect.inverse`   | -                               |                                            |
//! | `effect.solarize`  | -                               | solarize 50, operator `less`, intensity `average` |
//! | `effect.blur`      | -                               | radius 3                                   |
//! | `effect`           | `inverse` \| `solarize` \| `blur` | as above                                 |
//! | `custom`           | -                               | needs a pixel function                     |
//!
//! Conversions: r, g, b, saturation, value and opacity are divided by 100;
//! the solarize threshold is multiplied by 2.55 (percent of full intensity to
//! the 0-255 domain); hue is wrapped into `[0, 360)`.

use crate::blend::BlendMode;
use crate::colorize::Colorize;
use crate::custom::CustomOp;
use crate::effect::{Blur, Comparison, Inverse, Solarize, DEFAULT_BLUR_RADIUS};
use crate::grayscale::Grayscale;
use crate::hue::HueShift;
use crate::op::{Access, PixelOp, Sample};
use crate::opacity::Opacity;
use crate::options::{RawOptions, Request};
use crate::{OpsError, OpsResult};
use pfx_core::{Intensity, Pixel};
use tracing::debug;

/// Percent-to-ratio divisor.
const PERCENT: f32 = 100.0;

/// Percent of full intensity to byte scale.
const PERCENT_TO_BYTE: f32 = 2.55;

/// "Keep this channel" sentinel for replace mode, on the percent scale.
const KEEP: f32 = -1.0;

/// Operation families, as named in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// `colorize`
    Colorize,
    /// `grayscale`
    Grayscale,
    /// `hue`
    Hue,
    /// `opacity`
    Opacity,
    /// `effect.inverse`
    Inverse,
    /// `effect.solarize`
    Solarize,
    /// `effect.blur`
    Blur,
    /// `custom`
    Custom,
}

impl OperationKind {
    /// Parses an operation name. The legacy spelling `effect` takes the
    /// effect from `mode`.
    pub fn parse(name: &str, mode: Option<&str>) -> OpsResult<Self> {
        match name {
            "colorize" => Ok(Self::Colorize),
            "grayscale" => Ok(Self::Grayscale),
            "hue" => Ok(Self::Hue),
            "opacity" => Ok(Self::Opacity),
            "effect.inverse" => Ok(Self::Inverse),
            "effect.solarize" => Ok(Self::Solarize),
            "effect.blur" => Ok(Self::Blur),
            "custom" => Ok(Self::Custom),
            "effect" => match mode {
                Some("inverse") => Ok(Self::Inverse),
                Some("solarize") => Ok(Self::Solarize),
                Some("blur") => Ok(Self::Blur),
                Some(other) => Err(OpsError::UnknownMode {
                    operation: name.into(),
                    mode: other.into(),
                }),
                None => Err(OpsError::MissingMode(name.into())),
            },
            other => Err(OpsError::UnknownOperation(other.into())),
        }
    }

    /// Canonical operation name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Colorize => "colorize",
            Self::Grayscale => "grayscale",
            Self::Hue => "hue",
            Self::Opacity => "opacity",
            Self::Inverse => "effect.inverse",
            Self::Solarize => "effect.solarize",
            Self::Blur => "effect.blur",
            Self::Custom => "custom",
        }
    }

    /// Effect name accepted as `mode` for effects, if this is one.
    const fn effect_mode(self) -> Option<&'static str> {
        match self {
            Self::Inverse => Some("inverse"),
            Self::Solarize => Some("solarize"),
            Self::Blur => Some("blur"),
            _ => None,
        }
    }
}

/// A resolved operation with normalized parameters.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Per-channel color blend.
    Colorize(Colorize),
    /// Grayscale conversion.
    Grayscale(Grayscale),
    /// HSV adjustment.
    Hue(HueShift),
    /// Alpha adjustment.
    Opacity(Opacity),
    /// Color inversion.
    Inverse(Inverse),
    /// Threshold inversion.
    Solarize(Solarize),
    /// Circular blur.
    Blur(Blur),
    /// Caller-supplied function.
    Custom(CustomOp),
}

impl Operation {
    /// Resolves a request.
    ///
    /// # Errors
    ///
    /// Unknown operation names, modes, operators or estimators, a `custom`
    /// request with no function, and non-finite amounts.
    pub fn resolve(request: &Request) -> OpsResult<Self> {
        let opts = &request.options;
        let kind = OperationKind::parse(&request.operation, opts.mode.as_deref())?;
        let op = match kind {
            OperationKind::Colorize => Self::Colorize(colorize(opts)?),
            OperationKind::Grayscale => Self::Grayscale(Grayscale::new(estimator(
                kind,
                "mode",
                opts.mode.as_deref(),
            )?)),
            OperationKind::Hue => Self::Hue(hue(opts)?),
            OperationKind::Opacity => Self::Opacity(opacity(opts)?),
            OperationKind::Inverse => {
                check_effect_mode(kind, opts)?;
                Self::Inverse(Inverse)
            }
            OperationKind::Solarize => {
                check_effect_mode(kind, opts)?;
                Self::Solarize(solarize(opts)?)
            }
            OperationKind::Blur => {
                check_effect_mode(kind, opts)?;
                Self::Blur(Blur::new(opts.radius.unwrap_or(DEFAULT_BLUR_RADIUS)))
            }
            OperationKind::Custom => Self::Custom(
                request
                    .custom
                    .clone()
                    .ok_or(OpsError::MissingCustomFunction)?,
            ),
        };
        debug!(operation = kind.name(), resolved = ?op, "resolved request");
        Ok(op)
    }

    /// Family of this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Colorize(_) => OperationKind::Colorize,
            Self::Grayscale(_) => OperationKind::Grayscale,
            Self::Hue(_) => OperationKind::Hue,
            Self::Opacity(_) => OperationKind::Opacity,
            Self::Inverse(_) => OperationKind::Inverse,
            Self::Solarize(_) => OperationKind::Solarize,
            Self::Blur(_) => OperationKind::Blur,
            Self::Custom(_) => OperationKind::Custom,
        }
    }

    fn as_op(&self) -> &dyn PixelOp {
        match self {
            Self::Colorize(op) => op,
            Self::Grayscale(op) => op,
            Self::Hue(op) => op,
            Self::Opacity(op) => op,
            Self::Inverse(op) => op,
            Self::Solarize(op) => op,
            Self::Blur(op) => op,
            Self::Custom(op) => op,
        }
    }
}

impl PixelOp for Operation {
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn access(&self) -> Access {
        self.as_op().access()
    }

    fn apply(&self, px: Pixel, at: &Sample<'_>) -> Pixel {
        self.as_op().apply(px, at)
    }
}

// ============================================================================
// Per-family normalization
// ============================================================================

fn blend_mode(kind: OperationKind, mode: Option<&str>, default: BlendMode) -> OpsResult<BlendMode> {
    match mode {
        None => Ok(default),
        Some(name) => BlendMode::from_name(name).ok_or_else(|| OpsError::UnknownMode {
            operation: kind.name().into(),
            mode: name.into(),
        }),
    }
}

fn estimator(kind: OperationKind, key: &'static str, name: Option<&str>) -> OpsResult<Intensity> {
    match name {
        None => Ok(Intensity::default()),
        Some(name) => Intensity::from_name(name).ok_or_else(|| {
            if key == "mode" {
                OpsError::UnknownMode {
                    operation: kind.name().into(),
                    mode: name.into(),
                }
            } else {
                OpsError::UnknownOption {
                    operation: kind.name().into(),
                    key,
                    value: name.into(),
                }
            }
        }),
    }
}

/// Effects accept `mode` only when it names the effect itself.
fn check_effect_mode(kind: OperationKind, opts: &RawOptions) -> OpsResult<()> {
    match (opts.mode.as_deref(), kind.effect_mode()) {
        (None, _) => Ok(()),
        (Some(mode), Some(expected)) if mode == expected => Ok(()),
        (Some(mode), _) => Err(OpsError::UnknownMode {
            operation: kind.name().into(),
            mode: mode.into(),
        }),
    }
}

/// Reads a numeric option, rejecting NaN and infinities.
fn finite(key: &str, value: Option<f32>, default: f32) -> OpsResult<f32> {
    let v = value.unwrap_or(default);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(OpsError::InvalidParameter(format!("{key} must be finite, got {v}")))
    }
}

fn colorize(opts: &RawOptions) -> OpsResult<Colorize> {
    let kind = OperationKind::Colorize;
    let mode = blend_mode(kind, opts.mode.as_deref(), BlendMode::Add)?;
    let default = if mode == BlendMode::Replace { KEEP } else { 0.0 };

    let mut op = Colorize::new(
        mode,
        [
            finite("r", opts.r, default)? / PERCENT,
            finite("g", opts.g, default)? / PERCENT,
            finite("b", opts.b, default)? / PERCENT,
        ],
    );
    if let Some(name) = opts.grayscale.as_deref() {
        op = op.with_grayscale(estimator(kind, "grayscale", Some(name))?);
    }
    Ok(op)
}

fn hue(opts: &RawOptions) -> OpsResult<HueShift> {
    let mode = blend_mode(OperationKind::Hue, opts.mode.as_deref(), BlendMode::Add)?;
    let default = if mode == BlendMode::Replace { KEEP } else { 0.0 };

    Ok(HueShift::new(
        mode,
        finite("hue", opts.hue, 0.0)?,
        finite("saturation", opts.saturation, default)? / PERCENT,
        finite("value", opts.value, default)? / PERCENT,
    ))
}

fn opacity(opts: &RawOptions) -> OpsResult<Opacity> {
    let mode = blend_mode(OperationKind::Opacity, opts.mode.as_deref(), BlendMode::Replace)?;
    Ok(Opacity::new(mode, finite("opacity", opts.opacity, PERCENT)? / PERCENT))
}

fn solarize(opts: &RawOptions) -> OpsResult<Solarize> {
    let kind = OperationKind::Solarize;
    let operator = match opts.operator.as_deref() {
        None => Comparison::default(),
        Some(name) => Comparison::from_name(name).ok_or_else(|| OpsError::UnknownOption {
            operation: kind.name().into(),
            key: "operator",
            value: name.into(),
        })?,
    };
    Ok(Solarize::new(
        finite("solarize", opts.solarize, 50.0)? * PERCENT_TO_BYTE,
        operator,
        estimator(kind, "intensity", opts.intensity.as_deref())?,
    ))
}

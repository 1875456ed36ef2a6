//! Request records.
//!
//! A [`Request`] names an operation and carries [`RawOptions`], the loosely
//! typed option map callers fill in. Every option is optional; the resolver
//! merges per-operation defaults and converts percentage-scale values to
//! ratios (see [`Operation::resolve`](crate::Operation::resolve)).
//!
//! Requests deserialize with serde, so a transform chain can live in a YAML or
//! JSON file:
//!
//! ```rust
//! use pfx_ops::RequestList;
//!
//! let chain = RequestList::from_yaml(r#"
//! - operation: grayscale
//!   options: { mode: natural }
//! - operation: effect.blur
//!   options: { radius: 2 }
//! - operation: hue
//!   options: { mode: add, hue: 180, saturation: -55 }
//! "#).unwrap();
//! assert_eq!(chain.len(), 3);
//! ```
//!
//! Custom pixel functions cannot be deserialized; attach them in code with
//! [`Request::custom`].

use crate::custom::CustomOp;
use crate::OpsResult;
use serde::{Deserialize, Serialize};

/// Option map of a request, as supplied by the caller.
///
/// Numeric amounts are on the user-facing percentage scale (`25` = 25%),
/// hue is in degrees and radius in pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOptions {
    /// Blend mode (`add`, `multiply`, `replace`), estimator name for
    /// `grayscale`, or effect name for `effect`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Red amount, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f32>,
    /// Green amount, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g: Option<f32>,
    /// Blue amount, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f32>,
    /// Grayscale pre-step estimator for `colorize`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<String>,
    /// Hue rotation, degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<f32>,
    /// Saturation amount, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f32>,
    /// Value amount, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f32>,
    /// Opacity amount, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Blur radius, pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    /// Solarize threshold, percent of full intensity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solarize: Option<f32>,
    /// Solarize comparison (`less`, `greater`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Solarize intensity estimator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
}

impl RawOptions {
    /// Options with only `mode` set.
    pub fn with_mode(mode: impl Into<String>) -> Self {
        Self {
            mode: Some(mode.into()),
            ..Default::default()
        }
    }
}

/// One transform request: operation name plus options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    /// Operation name, e.g. `hue` or `effect.blur`.
    pub operation: String,
    /// Caller options; missing keys take operation defaults.
    #[serde(default)]
    pub options: RawOptions,
    /// Pixel function for `custom`.
    #[serde(skip)]
    pub custom: Option<CustomOp>,
}

impl Request {
    /// Request for `operation` with `options`.
    pub fn new(operation: impl Into<String>, options: RawOptions) -> Self {
        Self {
            operation: operation.into(),
            options,
            custom: None,
        }
    }

    /// `colorize` with `mode` and percent amounts `[r, g, b]`.
    pub fn colorize(mode: &str, rgb: [f32; 3]) -> Self {
        Self::new(
            "colorize",
            RawOptions {
                mode: Some(mode.into()),
                r: Some(rgb[0]),
                g: Some(rgb[1]),
                b: Some(rgb[2]),
                ..Default::default()
            },
        )
    }

    /// `grayscale` with the named estimator.
    pub fn grayscale(estimator: &str) -> Self {
        Self::new("grayscale", RawOptions::with_mode(estimator))
    }

    /// `hue` shorthand: additive rotation by `degrees`.
    pub fn hue(degrees: f32) -> Self {
        Self::new(
            "hue",
            RawOptions {
                hue: Some(degrees),
                ..Default::default()
            },
        )
    }

    /// `opacity` shorthand: replace alpha with `percent`.
    pub fn opacity(percent: f32) -> Self {
        Self::new(
            "opacity",
            RawOptions {
                opacity: Some(percent),
                ..Default::default()
            },
        )
    }

    /// `effect.inverse`.
    pub fn inverse() -> Self {
        Self::new("effect.inverse", RawOptions::default())
    }

    /// `effect.solarize` with default threshold, operator and estimator.
    pub fn solarize() -> Self {
        Self::new("effect.solarize", RawOptions::default())
    }

    /// `effect.blur` with `radius` pixels.
    pub fn blur(radius: u32) -> Self {
        Self::new(
            "effect.blur",
            RawOptions {
                radius: Some(radius),
                ..Default::default()
            },
        )
    }

    /// `custom` running `op`.
    pub fn custom(op: CustomOp) -> Self {
        Self {
            operation: "custom".into(),
            options: RawOptions::default(),
            custom: Some(op),
        }
    }
}

/// Ordered list of requests, typically loaded from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestList {
    /// Requests in application order.
    pub requests: Vec<Request>,
}

impl RequestList {
    /// Parses a YAML sequence of requests.
    pub fn from_yaml(text: &str) -> OpsResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses a JSON array of requests.
    pub fn from_json(text: &str) -> OpsResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> OpsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Number of requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// `true` if there are no requests.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl IntoIterator for RequestList {
    type Item = Request;
    type IntoIter = std::vec::IntoIter<Request>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.into_iter()
    }
}

impl From<Vec<Request>> for RequestList {
    fn from(requests: Vec<Request>) -> Self {
        Self { requests }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_defaults_missing_options() {
        let list = RequestList::from_yaml("- operation: effect.inverse\n").unwrap();
        assert_eq!(list.requests[0].operation, "effect.inverse");
        assert_eq!(list.requests[0].options, RawOptions::default());
    }

    #[test]
    fn test_json_request() {
        let list = RequestList::from_json(
            r#"[{"operation": "colorize", "options": {"mode": "replace", "g": 25}}]"#,
        )
        .unwrap();
        let opts = &list.requests[0].options;
        assert_eq!(opts.mode.as_deref(), Some("replace"));
        assert_eq!(opts.g, Some(25.0));
        assert_eq!(opts.r, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let list = RequestList::from_yaml(
            "- operation: grayscale\n  options: { mode: red, sepia: 3 }\n",
        )
        .unwrap();
        assert_eq!(list.requests[0].options.mode.as_deref(), Some("red"));
    }

    #[test]
    fn test_bad_yaml_is_error() {
        assert!(RequestList::from_yaml("- operation: [unclosed").is_err());
        assert!(RequestList::from_json("{").is_err());
    }

    #[test]
    fn test_yaml_roundtrip_skips_unset() {
        let list = RequestList::from(vec![Request::blur(5)]);
        let text = list.to_yaml().unwrap();
        assert!(text.contains("radius: 5"));
        assert!(!text.contains("mode"));
        let back = RequestList::from_yaml(&text).unwrap();
        assert_eq!(back.requests[0].options.radius, Some(5));
    }
}

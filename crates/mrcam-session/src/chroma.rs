// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Chroma-key configuration records.

use core::fmt;

use serde::{Deserialize, Serialize};

/// HSV keying parameters. Each triple is (hue, saturation, value) in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct HsvParams {
    /// Color to key out.
    pub target_color: [f32; 3],
    /// Per-channel distance from the target that is fully keyed.
    pub tolerance: [f32; 3],
    /// Per-channel soft edge beyond the tolerance.
    pub falloff: [f32; 3],
}

/// One chroma-key slot as stored by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChromaKeyConfig {
    /// Slot is unused.
    #[default]
    Disabled,
    /// HSV range keying.
    Hsv(HsvParams),
}

impl ChromaKeyConfig {
    /// Build an HSV config.
    pub const fn hsv(target_color: [f32; 3], tolerance: [f32; 3], falloff: [f32; 3]) -> Self {
        Self::Hsv(HsvParams {
            target_color,
            tolerance,
            falloff,
        })
    }

    /// Build a disabled config.
    pub const fn disabled() -> Self {
        Self::Disabled
    }

    /// Whether this slot keys anything.
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl fmt::Display for ChromaKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("type=Disabled"),
            Self::Hsv(p) => {
                let [h, s, v] = p.target_color;
                let [th, ts, tv] = p.tolerance;
                let [fh, fs, fv] = p.falloff;
                write!(
                    f,
                    "type=HSV, color=({h:.3}, {s:.2}, {v:.2}), tolerance=({th:.2}, {ts:.2}, {tv:.2}), falloff=({fh:.2}, {fs:.2}, {fv:.2})"
                )
            }
        }
    }
}

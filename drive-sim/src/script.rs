use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::DriveInput;

/// Scripted input timeline for headless runs.
///
/// ```toml
/// step = 0.016666668
///
/// [[segment]]
/// duration = 2.0
/// accelerate = true
///
/// [[segment]]
/// duration = 1.5
/// accelerate = true
/// left = true
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DriveScript {
    #[serde(default = "default_step")]
    pub step: f32,
    #[serde(default, rename = "segment")]
    pub segments: Vec<ScriptSegment>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct ScriptSegment {
    /// Seconds this input is held.
    pub duration: f32,
    pub accelerate: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
}

fn default_step() -> f32 {
    1.0 / 60.0
}

impl ScriptSegment {
    pub fn input(&self) -> DriveInput {
        DriveInput {
            accelerate: self.accelerate,
            brake: self.brake,
            turn_left: self.left,
            turn_right: self.right,
        }
    }
}

impl DriveScript {
    /// Load a script from a TOML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&text).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        let script: Self = toml::from_str(text).map_err(|e| e.to_string())?;
        if script.step <= 0.0 {
            return Err("step must be positive".to_string());
        }
        Ok(script)
    }

    /// A short drive used when no script is given: launch, sweep left, coast to a stop.
    pub fn demo() -> Self {
        let segment = |duration, accelerate, left| ScriptSegment {
            duration,
            accelerate,
            left,
            ..Default::default()
        };
        Self {
            step: default_step(),
            segments: vec![
                segment(2.0, true, false),
                segment(2.0, true, true),
                segment(1.5, false, false),
            ],
        }
    }

    /// Expand the timeline into fixed `(input, dt)` frames.
    ///
    /// Each segment lasts a whole number of steps, rounded to the nearest step.
    pub fn frames(&self) -> impl Iterator<Item = (DriveInput, f32)> + '_ {
        let step = self.step;
        self.segments.iter().flat_map(move |segment| {
            let count = (segment.duration / step).round().max(0.0) as usize;
            std::iter::repeat_n((segment.input(), step), count)
        })
    }

    pub fn total_duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration).sum()
    }
}

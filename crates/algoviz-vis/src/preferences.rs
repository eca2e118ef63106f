//! Startup preferences.
//!
//! Read once at startup from a JSON file. Every field is optional and
//! unknown algorithm names fall back to the family default, so a file
//! written by an older version still loads. Sizes and the speed level are
//! accepted as numbers or as numeric strings.

use std::path::Path;

use algoviz_model::{
    check_array_size, check_grid_size, AlgorithmFamily, PathAlgorithm, SortAlgorithm, SpeedLevel,
    DEFAULT_ARRAY_SIZE, DEFAULT_GRID_SIZE,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Which visualization the CLI and `/api/status` treat as active.
    pub algorithm_type: AlgorithmFamily,
    pub sorting_algorithm: SortAlgorithm,
    pub pathfinding_algorithm: PathAlgorithm,
    #[serde(deserialize_with = "lenient_number")]
    pub array_size: usize,
    #[serde(deserialize_with = "lenient_number")]
    pub grid_size: usize,
    #[serde(deserialize_with = "lenient_speed")]
    pub speed: SpeedLevel,
    pub dark_mode: bool,
    /// Fixed seed for reproducible data. Fresh entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            algorithm_type: AlgorithmFamily::Sorting,
            sorting_algorithm: SortAlgorithm::Bubble,
            pathfinding_algorithm: PathAlgorithm::Dijkstra,
            array_size: DEFAULT_ARRAY_SIZE,
            grid_size: DEFAULT_GRID_SIZE,
            speed: SpeedLevel::NORMAL,
            dark_mode: false,
            seed: None,
        }
    }
}

impl Preferences {
    /// Read preferences from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let prefs = Self::from_json(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded preferences");
        Ok(prefs)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let prefs: Self = serde_json::from_str(text)?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Reject sizes above [`MAX_ARRAY_SIZE`](algoviz_model::MAX_ARRAY_SIZE)
    /// and [`MAX_GRID_SIZE`](algoviz_model::MAX_GRID_SIZE).
    pub fn validate(&self) -> Result<()> {
        check_array_size(self.array_size)?;
        check_grid_size(self.grid_size)?;
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: SpeedLevel) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_array_size(mut self, size: usize) -> Self {
        self.array_size = size;
        self
    }

    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    #[must_use]
    pub fn with_sorting_algorithm(mut self, algorithm: SortAlgorithm) -> Self {
        self.sorting_algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_pathfinding_algorithm(mut self, algorithm: PathAlgorithm) -> Self {
        self.pathfinding_algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_algorithm_type(mut self, family: AlgorithmFamily) -> Self {
        self.algorithm_type = family;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(u64),
    Text(String),
}

fn lenient_number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let n = match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => n,
        RawNumber::Text(text) => text.trim().parse().map_err(D::Error::custom)?,
    };
    T::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range")))
}

fn lenient_speed<'de, D>(deserializer: D) -> std::result::Result<SpeedLevel, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_number::<D, u8>(deserializer).map(SpeedLevel::new)
}

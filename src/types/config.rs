use std::env;
use std::str::FromStr;

use crate::mask::Activity;
use crate::prelude::*;
use crate::types::Dim2;

/// Number of halo cells along each axis used when neither the environment nor the caller
/// overrides it.
pub const DEFAULT_HALO_WIDTH: usize = 2;

/// Upper bound (`> 1`) on block aspect ratios considered by the search.
pub const DEFAULT_ASPECT_LIMIT: f64 = 4.0;

/// Fraction below the first feasible division count at which the search for an I/O
/// compatible layout gives up and moves on to fewer I/O tasks.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Everything needed to produce a mask table for one topography.
#[derive(Debug, Clone)]
pub struct Config {
    pub npes: usize,
    pub target_io_pes: usize,
    pub boundary: BoundaryConfig,
    pub convention: MaskConvention,
    pub search: SearchConfig,
}

impl Config {
    pub fn new(npes: usize, target_io_pes: usize) -> Self {
        Self {
            npes,
            target_io_pes,
            boundary: default(),
            convention: default(),
            search: SearchConfig::from_env(),
        }
    }

    pub fn validate(&self) -> Result {
        ensure!(self.npes > 0, "number of tasks must be positive");
        ensure!(
            self.target_io_pes > 0,
            "number of I/O tasks must be positive"
        );
        self.search.validate()
    }
}

/// Topology of the grid boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryConfig {
    /// The domain is periodic along `x`.
    pub reentrant_x: bool,
    /// The domain is periodic along `y`.
    pub reentrant_y: bool,
    /// The northern edge folds onto itself (tripolar grid).
    pub tripolar_n: bool,
}

/// Tuning knobs of the decomposition search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub halo: Dim2,
    pub aspect_limit: f64,
    pub tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            halo: Dim2::repeat(DEFAULT_HALO_WIDTH),
            aspect_limit: DEFAULT_ASPECT_LIMIT,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let mut out = Self::default();

        if let Some(limit) = parse_env::<f64>("LANDMASK_ASPECT_LIMIT") {
            if limit >= 1.0 {
                out.aspect_limit = limit;
            } else {
                warn!(
                    "aspect limit {} is below 1, reverting to {}",
                    limit, DEFAULT_ASPECT_LIMIT
                );
            }
        }

        if let Some(tolerance) = parse_env::<f64>("LANDMASK_TOLERANCE") {
            if (0.0..1.0).contains(&tolerance) {
                out.tolerance = tolerance;
            } else {
                warn!(
                    "tolerance {} is outside [0, 1), reverting to {}",
                    tolerance, DEFAULT_TOLERANCE
                );
            }
        }

        if let Some(halo) = parse_env::<usize>("LANDMASK_HALO") {
            out.halo = Dim2::repeat(halo);
        }

        out
    }

    pub fn validate(&self) -> Result {
        ensure!(
            self.aspect_limit >= 1.0,
            "aspect limit must be at least 1, got {}",
            self.aspect_limit
        );
        ensure!(
            (0.0..1.0).contains(&self.tolerance),
            "tolerance must lie in [0, 1), got {}",
            self.tolerance
        );
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring unparsable value {:?} for {}", value, key);
            None
        }
    }
}

/// Which raw input value denotes an active (ocean) cell. Both the `mask` and the `wet` field
/// are interpreted with the same convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskConvention {
    OneIsActive,
    ZeroIsActive,
}

impl Default for MaskConvention {
    fn default() -> Self {
        MaskConvention::OneIsActive
    }
}

impl MaskConvention {
    /// Maps a raw input value to an [`Activity`]. Returns `None` for values other than
    /// exactly `0` or `1`.
    pub fn classify(self, raw: f64) -> Option<Activity> {
        let one = if raw == 1.0 {
            true
        } else if raw == 0.0 {
            false
        } else {
            return None;
        };

        let active = match self {
            MaskConvention::OneIsActive => one,
            MaskConvention::ZeroIsActive => !one,
        };

        Some(if active {
            Activity::Active
        } else {
            Activity::Inactive
        })
    }
}

#[derive(Error, Debug)]
#[error("unknown mask convention {0:?}, expected `one-is-active` or `zero-is-active`")]
pub struct UnknownConvention(String);

impl FromStr for MaskConvention {
    type Err = UnknownConvention;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "one-is-active" | "1" => Ok(MaskConvention::OneIsActive),
            "zero-is-active" | "0" => Ok(MaskConvention::ZeroIsActive),
            other => Err(UnknownConvention(other.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_classify() {
        use Activity::*;
        let one = MaskConvention::OneIsActive;
        let zero = MaskConvention::ZeroIsActive;

        assert_eq!(one.classify(1.0), Some(Active));
        assert_eq!(one.classify(0.0), Some(Inactive));
        assert_eq!(zero.classify(1.0), Some(Inactive));
        assert_eq!(zero.classify(0.0), Some(Active));
        assert_eq!(one.classify(0.5), None);
        assert_eq!(one.classify(f64::NAN), None);
    }

    #[test]
    fn test_parse_convention() {
        assert_eq!(
            "one-is-active".parse::<MaskConvention>().unwrap(),
            MaskConvention::OneIsActive
        );
        assert_eq!(
            "zero-is-active".parse::<MaskConvention>().unwrap(),
            MaskConvention::ZeroIsActive
        );
        assert!("land".parse::<MaskConvention>().is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = Config::new(10, 1);
        config.search = SearchConfig::default();
        assert!(config.validate().is_ok());

        config.search.tolerance = 1.5;
        assert!(config.validate().is_err());

        let config = Config::new(0, 1);
        assert!(config.validate().is_err());
    }
}

//! Crate error type
//!
//! The simulation itself is infallible; errors only come from loading and
//! validating settings.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A settings rule that a configuration value broke
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsViolation {
    /// A size or margin is negative, NaN or infinite
    InvalidDimension { field: &'static str, value: f32 },
    BallSpeedNotPositive { value: f32 },
    SpeedUpMultiplierTooSmall { value: f32 },
    BallStartOutOfField { x: f32, y: f32 },
    BallDirectionZero,
    PaddleSlotCountZero,
    PaddleStartOutOfRange { start: usize, count: usize },
    PaddleSplitFactorZero,
    TargetsPerLineZero,
    NoTargetLines,
    /// Line indices must be exactly `0..n`
    TargetLinesNotContiguous { missing: u32 },
}

impl fmt::Display for SettingsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { field, value } => {
                write!(f, "{field} must be finite and non-negative, got {value}")
            }
            Self::BallSpeedNotPositive { value } => {
                write!(f, "ball speed must be positive, got {value}")
            }
            Self::SpeedUpMultiplierTooSmall { value } => {
                write!(f, "speed-up multiplier must be greater than 1, got {value}")
            }
            Self::BallStartOutOfField { x, y } => {
                write!(f, "ball start position ({x}, {y}) is outside [0,1]x[0,1]")
            }
            Self::BallDirectionZero => write!(f, "ball start direction is zero on both axes"),
            Self::PaddleSlotCountZero => write!(f, "paddle slot count must be positive"),
            Self::PaddleStartOutOfRange { start, count } => {
                write!(f, "paddle start slot {start} is outside 0..{count}")
            }
            Self::PaddleSplitFactorZero => write!(f, "paddle split factor must be at least 1"),
            Self::TargetsPerLineZero => write!(f, "targets per line must be positive"),
            Self::NoTargetLines => write!(f, "at least one target line is required"),
            Self::TargetLinesNotContiguous { missing } => {
                write!(f, "target line indices must be contiguous from 0, line {missing} is missing")
            }
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// Settings file could not be read
    Io { path: PathBuf, source: io::Error },
    /// Settings text is not valid JSON for `GameSettings`
    Parse(serde_json::Error),
    /// Settings parsed but break a rule
    InvalidSettings(SettingsViolation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings from {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::InvalidSettings(violation) => write!(f, "invalid settings: {violation}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidSettings(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<SettingsViolation> for Error {
    fn from(violation: SettingsViolation) -> Self {
        Self::InvalidSettings(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_message_names_the_rule() {
        let err = Error::from(SettingsViolation::PaddleStartOutOfRange { start: 12, count: 10 });
        assert_eq!(
            err.to_string(),
            "invalid settings: paddle start slot 12 is outside 0..10"
        );
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = Error::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to parse settings"));
    }
}

//! Job, stage and container state enums
//!
//! All three serialize as bare integers on the wire. Declaration order
//! carries no meaning here; the wire tag doubles as the total order and is
//! exposed through the explicit `rank` functions, with the lifecycle
//! questions answered by named predicates instead of enum comparisons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error for an integer state tag the client does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownState {
    kind: &'static str,
    tag: u8,
}

impl UnknownState {
    fn new(kind: &'static str, tag: u8) -> Self {
        Self { kind, tag }
    }
}

impl fmt::Display for UnknownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} tag {}", self.kind, self.tag)
    }
}

impl std::error::Error for UnknownState {}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum JobState {
    Waiting,
    Processing,
    Failed,
    Success,
    Cancelled,
}

impl JobState {
    /// Wire tag of the state; also its total order.
    pub fn rank(self) -> u8 {
        match self {
            Self::Waiting => 0,
            Self::Processing => 1,
            Self::Failed => 2,
            Self::Success => 3,
            Self::Cancelled => 4,
        }
    }

    /// True once the job can make no further progress.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Success | Self::Cancelled)
    }

    /// True while the job is executing.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Processing)
    }
}

impl From<JobState> for u8 {
    fn from(state: JobState) -> Self {
        state.rank()
    }
}

impl TryFrom<u8> for JobState {
    type Error = UnknownState;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Waiting),
            1 => Ok(Self::Processing),
            2 => Ok(Self::Failed),
            3 => Ok(Self::Success),
            4 => Ok(Self::Cancelled),
            other => Err(UnknownState::new("job state", other)),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Waiting => "waiting",
            Self::Processing => "processing",
            Self::Failed => "failed",
            Self::Success => "success",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Lifecycle state of a stage within a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StageState {
    Running,
    Success,
    Error,
}

impl StageState {
    /// Wire tag of the state; also its total order.
    pub fn rank(self) -> u8 {
        match self {
            Self::Running => 0,
            Self::Success => 1,
            Self::Error => 2,
        }
    }

    /// True once the stage has stopped running, whatever the outcome.
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl From<StageState> for u8 {
    fn from(state: StageState) -> Self {
        state.rank()
    }
}

impl TryFrom<u8> for StageState {
    type Error = UnknownState;

    fn try_from(tag: u8) -> Result<Self, UnknownState> {
        match tag {
            0 => Ok(Self::Running),
            1 => Ok(Self::Success),
            2 => Ok(Self::Error),
            other => Err(UnknownState::new("stage state", other)),
        }
    }
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Running => "running",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Lifecycle state of a container within a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ContainerState {
    Starting,
    Running,
    Stopped,
    Error,
}

impl ContainerState {
    /// Wire tag of the state; also its total order.
    pub fn rank(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Running => 1,
            Self::Stopped => 2,
            Self::Error => 3,
        }
    }

    /// True once the container has stopped, whatever the outcome.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Stopped | Self::Error)
    }
}

impl From<ContainerState> for u8 {
    fn from(state: ContainerState) -> Self {
        state.rank()
    }
}

impl TryFrom<u8> for ContainerState {
    type Error = UnknownState;

    fn try_from(tag: u8) -> Result<Self, UnknownState> {
        match tag {
            0 => Ok(Self::Starting),
            1 => Ok(Self::Running),
            2 => Ok(Self::Stopped),
            3 => Ok(Self::Error),
            other => Err(UnknownState::new("container state", other)),
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_state_wire_tags() {
        for tag in 0..=4u8 {
            let state = JobState::try_from(tag).unwrap();
            assert_eq!(state.rank(), tag);
            assert_eq!(u8::from(state), tag);
        }
        assert!(JobState::try_from(5).is_err());
    }

    #[test]
    fn test_job_state_predicates() {
        assert!(!JobState::Waiting.is_terminal());
        assert!(!JobState::Processing.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(JobState::Success.is_terminal());
        assert!(JobState::Cancelled.is_terminal());

        assert!(JobState::Processing.is_active());
        assert!(!JobState::Waiting.is_active());
        assert!(!JobState::Success.is_active());
    }

    #[test]
    fn test_job_state_serializes_as_integer() {
        let json = serde_json::to_string(&JobState::Success).unwrap();
        assert_eq!(json, "3");

        let state: JobState = serde_json::from_str("1").unwrap();
        assert_eq!(state, JobState::Processing);

        assert!(serde_json::from_str::<JobState>("9").is_err());
    }

    #[test]
    fn test_stage_state_finished() {
        assert!(!StageState::Running.is_finished());
        assert!(StageState::Success.is_finished());
        assert!(StageState::Error.is_finished());
    }

    #[test]
    fn test_container_state_finished() {
        assert!(!ContainerState::Starting.is_finished());
        assert!(!ContainerState::Running.is_finished());
        assert!(ContainerState::Stopped.is_finished());
        assert!(ContainerState::Error.is_finished());
    }
}

//! Progress merge engine
//!
//! A delta fetch returns the complete current stage/container shape of a job
//! but only the log lines newer than `since`. [`merge`] folds one such
//! snapshot into the accumulated view built from earlier fetches: the
//! snapshot wins on shape and status fields, while log history observed
//! earlier is preserved by prefixing it onto the snapshot's log arrays.

use crate::domain::log::Log;
use crate::domain::progress::{Container, JobProgress, Stage};

/// Merges a freshly fetched snapshot into the accumulated progress view.
///
/// The result's stage list is exactly `incoming.stages`: the server snapshot
/// is authoritative for the current shape, so stages present only in
/// `accumulated` are dropped. For a stage (or a container within a matched
/// stage) that exists on both sides, previously accumulated logs are placed
/// ahead of the incoming ones; every other field is taken from `incoming`.
///
/// Pure function of its two inputs. Applying it twice with the same
/// arguments yields the same value both times.
pub fn merge(accumulated: &JobProgress, incoming: &JobProgress) -> JobProgress {
    // Nothing accumulated yet, adopt the snapshot wholesale.
    if accumulated.is_empty() {
        return incoming.clone();
    }

    let stages = incoming
        .stages
        .iter()
        .map(|stage| match accumulated.stage(&stage.id) {
            Some(old) => merge_stage(old, stage),
            None => stage.clone(),
        })
        .collect();

    JobProgress {
        state: incoming.state,
        stages,
    }
}

fn merge_stage(old: &Stage, new: &Stage) -> Stage {
    let containers = new
        .containers
        .iter()
        .map(|container| match old.container(&container.id) {
            Some(previous) => merge_container(previous, container),
            None => container.clone(),
        })
        .collect();

    Stage {
        logs: concat_logs(&old.logs, &new.logs),
        containers,
        ..new.clone()
    }
}

fn merge_container(old: &Container, new: &Container) -> Container {
    Container {
        logs: concat_logs(&old.logs, &new.logs),
        ..new.clone()
    }
}

fn concat_logs(old: &[Log], new: &[Log]) -> Vec<Log> {
    let mut logs = Vec::with_capacity(old.len() + new.len());
    logs.extend_from_slice(old);
    logs.extend_from_slice(new);
    logs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::{ContainerState, JobState, StageState};
    use chrono::{TimeZone, Utc};

    fn log(stage: &str, message: &str) -> Log {
        Log {
            message: message.to_string(),
            log_type: 0,
            time: Utc.with_ymd_and_hms(2023, 4, 1, 10, 0, 0).unwrap(),
            stage_id: stage.to_string(),
        }
    }

    fn stage(id: &str, state: StageState, logs: Vec<Log>, containers: Vec<Container>) -> Stage {
        Stage {
            id: id.to_string(),
            job_id: "j1".to_string(),
            state,
            started_at: None,
            stopped_at: None,
            logs,
            containers,
        }
    }

    fn container(id: &str, state: ContainerState, logs: Vec<Log>) -> Container {
        Container {
            id: id.to_string(),
            job_id: "j1".to_string(),
            container_id: format!("runtime-{id}"),
            state,
            spec: serde_json::Value::Null,
            meta: Default::default(),
            created_at: None,
            started_at: None,
            stopped_at: None,
            logs,
        }
    }

    fn snapshot(state: JobState, stages: Vec<Stage>) -> JobProgress {
        JobProgress { state, stages }
    }

    fn messages(logs: &[Log]) -> Vec<&str> {
        logs.iter().map(|l| l.message.as_str()).collect()
    }

    #[test]
    fn test_first_merge_returns_snapshot_unchanged() {
        let incoming = snapshot(
            JobState::Processing,
            vec![stage(
                "build",
                StageState::Running,
                vec![log("build", "one")],
                vec![],
            )],
        );

        let merged = merge(&JobProgress::empty(), &incoming);
        assert_eq!(merged, incoming);
    }

    #[test]
    fn test_stage_logs_accumulate_in_order() {
        let first = snapshot(
            JobState::Processing,
            vec![stage(
                "build",
                StageState::Running,
                vec![log("build", "a"), log("build", "b")],
                vec![],
            )],
        );
        let second = snapshot(
            JobState::Processing,
            vec![stage(
                "build",
                StageState::Running,
                vec![log("build", "c"), log("build", "d")],
                vec![],
            )],
        );

        let merged = merge(&merge(&JobProgress::empty(), &first), &second);
        let build = merged.stage("build").unwrap();
        assert_eq!(messages(&build.logs), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_merge_is_pure_and_repeatable() {
        let accumulated = merge(
            &JobProgress::empty(),
            &snapshot(
                JobState::Processing,
                vec![stage(
                    "build",
                    StageState::Running,
                    vec![log("build", "a")],
                    vec![],
                )],
            ),
        );
        let incoming = snapshot(
            JobState::Processing,
            vec![stage(
                "build",
                StageState::Running,
                vec![log("build", "b")],
                vec![],
            )],
        );

        let once = merge(&accumulated, &incoming);
        let twice = merge(&accumulated, &incoming);
        assert_eq!(once, twice);
        // Inputs are untouched.
        assert_eq!(messages(&accumulated.stage("build").unwrap().logs), vec!["a"]);
        assert_eq!(messages(&incoming.stage("build").unwrap().logs), vec!["b"]);
    }

    #[test]
    fn test_snapshot_is_authoritative_for_stage_set() {
        let accumulated = merge(
            &JobProgress::empty(),
            &snapshot(
                JobState::Processing,
                vec![
                    stage("build", StageState::Success, vec![log("build", "a")], vec![]),
                    stage("test", StageState::Running, vec![log("test", "t1")], vec![]),
                ],
            ),
        );
        let incoming = snapshot(
            JobState::Processing,
            vec![stage(
                "test",
                StageState::Running,
                vec![log("test", "t2")],
                vec![],
            )],
        );

        let merged = merge(&accumulated, &incoming);
        assert!(merged.stage("build").is_none());
        let test = merged.stage("test").unwrap();
        assert_eq!(messages(&test.logs), vec!["t1", "t2"]);
    }

    #[test]
    fn test_status_fields_come_from_snapshot() {
        let accumulated = merge(
            &JobProgress::empty(),
            &snapshot(
                JobState::Processing,
                vec![stage("build", StageState::Running, vec![], vec![])],
            ),
        );

        let mut finished = stage("build", StageState::Success, vec![], vec![]);
        finished.stopped_at = Some(Utc.with_ymd_and_hms(2023, 4, 1, 10, 5, 0).unwrap());
        let incoming = snapshot(JobState::Success, vec![finished]);

        let merged = merge(&accumulated, &incoming);
        assert_eq!(merged.state, JobState::Success);
        let build = merged.stage("build").unwrap();
        assert_eq!(build.state, StageState::Success);
        assert!(build.stopped_at.is_some());
    }

    #[test]
    fn test_container_logs_accumulate_within_matched_stage() {
        let accumulated = merge(
            &JobProgress::empty(),
            &snapshot(
                JobState::Processing,
                vec![stage(
                    "build",
                    StageState::Running,
                    vec![],
                    vec![container(
                        "c1",
                        ContainerState::Running,
                        vec![log("build", "c1-a")],
                    )],
                )],
            ),
        );
        let incoming = snapshot(
            JobState::Processing,
            vec![stage(
                "build",
                StageState::Running,
                vec![],
                vec![
                    container("c1", ContainerState::Stopped, vec![log("build", "c1-b")]),
                    container("c2", ContainerState::Starting, vec![log("build", "c2-a")]),
                ],
            )],
        );

        let merged = merge(&accumulated, &incoming);
        let build = merged.stage("build").unwrap();

        let c1 = build.container("c1").unwrap();
        assert_eq!(messages(&c1.logs), vec!["c1-a", "c1-b"]);
        assert_eq!(c1.state, ContainerState::Stopped);

        // A container seen for the first time passes through as-is.
        let c2 = build.container("c2").unwrap();
        assert_eq!(messages(&c2.logs), vec!["c2-a"]);
    }

    #[test]
    fn test_container_dropped_when_absent_from_snapshot() {
        let accumulated = merge(
            &JobProgress::empty(),
            &snapshot(
                JobState::Processing,
                vec![stage(
                    "build",
                    StageState::Running,
                    vec![],
                    vec![
                        container("c1", ContainerState::Running, vec![]),
                        container("c2", ContainerState::Running, vec![]),
                    ],
                )],
            ),
        );
        let incoming = snapshot(
            JobState::Processing,
            vec![stage(
                "build",
                StageState::Running,
                vec![],
                vec![container("c2", ContainerState::Stopped, vec![])],
            )],
        );

        let merged = merge(&accumulated, &incoming);
        let build = merged.stage("build").unwrap();
        assert!(build.container("c1").is_none());
        assert!(build.container("c2").is_some());
    }

    #[test]
    fn test_stage_new_to_snapshot_passes_through() {
        let accumulated = merge(
            &JobProgress::empty(),
            &snapshot(
                JobState::Processing,
                vec![stage("build", StageState::Success, vec![], vec![])],
            ),
        );
        let incoming = snapshot(
            JobState::Processing,
            vec![
                stage("build", StageState::Success, vec![], vec![]),
                stage("deploy", StageState::Running, vec![log("deploy", "d1")], vec![]),
            ],
        );

        let merged = merge(&accumulated, &incoming);
        assert_eq!(messages(&merged.stage("deploy").unwrap().logs), vec!["d1"]);
    }
}

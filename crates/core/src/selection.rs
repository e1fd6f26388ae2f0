//! Run selection
//!
//! Turns command-line flags into the ordered list of tasks to execute.
//! Selection is a filter over [`TASK_REGISTRY`], so every mode shares the
//! registry's priority order.

use std::collections::BTreeSet;

use crate::tasks::{TaskId, TASK_REGISTRY};

/// Flags controlling what a run executes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub all: bool,
    pub quick: bool,
    /// Individually flagged tasks
    pub tasks: BTreeSet<TaskId>,
}

impl RunOptions {
    pub fn with_tasks(tasks: impl IntoIterator<Item = TaskId>) -> Self {
        Self {
            tasks: tasks.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// One task scheduled for execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedTask {
    pub id: TaskId,
    /// Only meaningful for [`TaskId::Perf`]: single-page scan instead of a site crawl
    pub quick: bool,
}

/// The mode a run resolves to. Exactly one applies per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSelection {
    /// Everything except bundle analysis; load testing only outside quick mode
    All { quick: bool },
    /// The individually flagged tasks
    Explicit { tasks: BTreeSet<TaskId>, quick: bool },
    /// Quick perf, accessibility and security
    Default,
}

const DEFAULT_SUITE: [TaskId; 3] = [TaskId::Perf, TaskId::Accessibility, TaskId::Security];

impl RunSelection {
    pub fn from_options(options: &RunOptions) -> Self {
        if options.all {
            RunSelection::All {
                quick: options.quick,
            }
        } else if options.tasks.is_empty() {
            RunSelection::Default
        } else {
            RunSelection::Explicit {
                tasks: options.tasks.clone(),
                quick: options.quick,
            }
        }
    }

    fn includes(&self, id: TaskId) -> bool {
        match self {
            RunSelection::All { quick } => match id {
                TaskId::Bundle => false,
                TaskId::Load => !quick,
                _ => true,
            },
            RunSelection::Explicit { tasks, .. } => tasks.contains(&id),
            RunSelection::Default => DEFAULT_SUITE.contains(&id),
        }
    }

    fn quick(&self) -> bool {
        match self {
            RunSelection::All { quick } | RunSelection::Explicit { quick, .. } => *quick,
            RunSelection::Default => true,
        }
    }

    /// Tasks to run, in registry order
    pub fn plan(&self) -> Vec<PlannedTask> {
        let quick = self.quick();
        TASK_REGISTRY
            .iter()
            .filter(|descriptor| self.includes(descriptor.id))
            .map(|descriptor| PlannedTask {
                id: descriptor.id,
                quick,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(plan: &[PlannedTask]) -> Vec<TaskId> {
        plan.iter().map(|task| task.id).collect()
    }

    #[test]
    fn test_explicit_selection_follows_registry_order() {
        let options = RunOptions::with_tasks([
            TaskId::Bundle,
            TaskId::Security,
            TaskId::Css,
            TaskId::Accessibility,
        ]);
        let plan = RunSelection::from_options(&options).plan();
        assert_eq!(
            ids(&plan),
            vec![
                TaskId::Accessibility,
                TaskId::Security,
                TaskId::Css,
                TaskId::Bundle
            ]
        );
    }

    #[test]
    fn test_every_flag_combination_runs_in_registry_order() {
        for mask in 0u32..(1 << TASK_REGISTRY.len()) {
            let subset: Vec<TaskId> = TASK_REGISTRY
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, descriptor)| descriptor.id)
                .collect();

            // Flags arrive in reverse so order cannot leak from the input
            let options = RunOptions::with_tasks(subset.iter().rev().copied());
            let plan = RunSelection::from_options(&options).plan();

            if subset.is_empty() {
                assert_eq!(ids(&plan), DEFAULT_SUITE.to_vec());
            } else {
                assert_eq!(ids(&plan), subset, "mask {:#011b}", mask);
            }
        }
    }

    #[test]
    fn test_every_single_flag_runs_exactly_that_task() {
        for descriptor in &TASK_REGISTRY {
            let options = RunOptions::with_tasks([descriptor.id]);
            let plan = RunSelection::from_options(&options).plan();
            assert_eq!(ids(&plan), vec![descriptor.id]);
        }
    }

    #[test]
    fn test_all_mode_runs_everything_but_bundle() {
        let options = RunOptions {
            all: true,
            ..RunOptions::default()
        };
        let plan = RunSelection::from_options(&options).plan();
        assert_eq!(
            ids(&plan),
            vec![
                TaskId::Perf,
                TaskId::Accessibility,
                TaskId::Security,
                TaskId::Images,
                TaskId::Links,
                TaskId::Css,
                TaskId::Seo,
                TaskId::Load
            ]
        );
        assert!(plan.iter().all(|task| !task.quick));
    }

    #[test]
    fn test_all_quick_never_load_tests() {
        let options = RunOptions {
            all: true,
            quick: true,
            tasks: [TaskId::Load, TaskId::Bundle].into_iter().collect(),
        };
        let plan = RunSelection::from_options(&options).plan();
        assert!(!ids(&plan).contains(&TaskId::Load));
        assert!(!ids(&plan).contains(&TaskId::Bundle));
        assert_eq!(plan.len(), 7);
        assert!(plan[0].quick);
    }

    #[test]
    fn test_no_flags_selects_default_suite_in_quick_mode() {
        let selection = RunSelection::from_options(&RunOptions::default());
        assert_eq!(selection, RunSelection::Default);

        let plan = selection.plan();
        assert_eq!(
            ids(&plan),
            vec![TaskId::Perf, TaskId::Accessibility, TaskId::Security]
        );
        assert!(plan[0].quick);
    }

    #[test]
    fn test_quick_flag_alone_still_uses_default_suite() {
        let options = RunOptions {
            quick: true,
            ..RunOptions::default()
        };
        assert_eq!(RunSelection::from_options(&options), RunSelection::Default);
    }

    #[test]
    fn test_explicit_perf_respects_quick_flag() {
        let mut options = RunOptions::with_tasks([TaskId::Perf]);
        assert!(!RunSelection::from_options(&options).plan()[0].quick);

        options.quick = true;
        assert!(RunSelection::from_options(&options).plan()[0].quick);
    }

    #[test]
    fn test_explicit_load_runs_even_in_quick_mode() {
        let options = RunOptions {
            quick: true,
            ..RunOptions::with_tasks([TaskId::Load])
        };
        let plan = RunSelection::from_options(&options).plan();
        assert_eq!(ids(&plan), vec![TaskId::Load]);
    }
}

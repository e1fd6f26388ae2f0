//! Task registry and command construction
//!
//! [`TASK_REGISTRY`] is the single ordered table of every audit vibe-test
//! knows about. Execution order is always registry order, whichever way the
//! tasks were selected.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::configs::VibeConfig;
use crate::selection::PlannedTask;
use crate::types::{VibeError, VibeResult};

/// Stable identifier of an audit task. Variant order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskId {
    Perf,
    Accessibility,
    Security,
    Images,
    Links,
    Css,
    Seo,
    Load,
    Bundle,
}

impl TaskId {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskId::Perf => "perf",
            TaskId::Accessibility => "a11y",
            TaskId::Security => "security",
            TaskId::Images => "images",
            TaskId::Links => "links",
            TaskId::Css => "css",
            TaskId::Seo => "seo",
            TaskId::Load => "load",
            TaskId::Bundle => "bundle",
        }
    }

    pub fn descriptor(self) -> &'static TaskDescriptor {
        // Every variant has exactly one registry row, in variant order
        &TASK_REGISTRY[self as usize]
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one audit
#[derive(Debug)]
pub struct TaskDescriptor {
    pub id: TaskId,
    /// Section heading printed before the task runs
    pub title: &'static str,
    pub description: &'static str,
    pub requires_target: bool,
    /// Whether routine stdout is echoed on success
    pub shows_output: bool,
}

pub static TASK_REGISTRY: [TaskDescriptor; 9] = [
    TaskDescriptor {
        id: TaskId::Perf,
        title: "🚀 Performance Tests",
        description: "Complete performance scan (this may take a while...)",
        requires_target: true,
        shows_output: false,
    },
    TaskDescriptor {
        id: TaskId::Accessibility,
        title: "♿ Accessibility Tests",
        description: "WCAG compliance check",
        requires_target: true,
        shows_output: true,
    },
    TaskDescriptor {
        id: TaskId::Security,
        title: "🔒 Security Tests",
        description: "NPM dependency audit",
        requires_target: false,
        shows_output: true,
    },
    TaskDescriptor {
        id: TaskId::Images,
        title: "🖼️  Image Analysis",
        description: "Analyzing image sizes",
        requires_target: false,
        shows_output: true,
    },
    TaskDescriptor {
        id: TaskId::Links,
        title: "🔗 Link Validation",
        description: "Checking for broken links",
        requires_target: true,
        shows_output: true,
    },
    TaskDescriptor {
        id: TaskId::Css,
        title: "🎨 CSS Analysis",
        description: "Analyzing CSS complexity",
        requires_target: false,
        shows_output: true,
    },
    TaskDescriptor {
        id: TaskId::Seo,
        title: "📈 SEO Analysis",
        description: "Checking SEO optimization",
        requires_target: true,
        shows_output: true,
    },
    TaskDescriptor {
        id: TaskId::Load,
        title: "⚡ Load Testing",
        description: "Running stress test",
        requires_target: true,
        shows_output: true,
    },
    TaskDescriptor {
        id: TaskId::Bundle,
        title: "📦 Bundle Analysis",
        description: "Analyzing JavaScript bundles",
        requires_target: false,
        shows_output: true,
    },
];

const QUICK_PERF_DESCRIPTION: &str = "Quick Lighthouse scan";
const FULL_PERF_REPORT_DIR: &str = ".lighthouseci/";
const BUNDLE_REPORT_FILE: &str = "bundle-report.html";

/// Extra console lines emitted around a task's output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNotes {
    /// Heading printed above non-empty output of a successful run
    pub output_label: Option<String>,
    /// Printed after a successful run
    pub on_success: Vec<String>,
    /// Printed after the run whatever its outcome
    pub always: Vec<String>,
}

impl TaskNotes {
    fn none() -> Self {
        Self {
            output_label: None,
            on_success: Vec::new(),
            always: Vec::new(),
        }
    }
}

/// A fully built, ready to execute task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInvocation {
    pub id: TaskId,
    pub title: &'static str,
    pub description: String,
    pub command: String,
    pub shows_output: bool,
    pub notes: TaskNotes,
}

/// Builds shell commands for planned tasks from the loaded configuration
pub struct CommandBuilder<'a> {
    config: &'a VibeConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a VibeConfig) -> Self {
        Self { config }
    }

    /// Build the invocation for one planned task.
    ///
    /// `now` stamps generated report file names.
    pub fn build(
        &self,
        planned: PlannedTask,
        target: &str,
        now: DateTime<Utc>,
    ) -> VibeResult<TaskInvocation> {
        let descriptor = planned.id.descriptor();
        let url = shell_quote(target);
        let mut description = descriptor.description.to_string();
        let mut notes = TaskNotes::none();

        let command = match planned.id {
            TaskId::Perf if planned.quick => {
                let report_path = lighthouse_report_path(now);
                description = QUICK_PERF_DESCRIPTION.to_string();
                notes.on_success = vec![
                    format!("Report saved: {}", report_path),
                    format!("Open with: open {}", report_path),
                ];
                self.lighthouse_command(&url, &report_path)
            }
            TaskId::Perf => {
                notes.always = vec![format!("Report saved to: {} directory", FULL_PERF_REPORT_DIR)];
                format!("npx unlighthouse --site {}", url)
            }
            TaskId::Accessibility => self.pa11y_command(&url),
            TaskId::Security => "npm audit --omit=dev".to_string(),
            TaskId::Images => {
                notes.output_label = Some("Top 10 largest images:".to_string());
                format!(
                    "find {} -type f \\( -name '*.jpg' -o -name '*.png' -o -name '*.webp' -o -name '*.gif' \\) -exec du -h {{}} \\; 2>/dev/null | sort -rh | head -10",
                    shell_quote(&self.config.paths.images)
                )
            }
            TaskId::Links => {
                let mut command = format!("npx broken-link-checker {} -ro", url);
                for domain in &self.config.exclude.links {
                    command.push_str(&format!(" --exclude {}", shell_quote(domain)));
                }
                command
            }
            TaskId::Css => format!("npx cssstats {}", shell_quote(&self.config.paths.css)),
            TaskId::Seo => format!("npx seo-analyzer {}", url),
            TaskId::Load => {
                let load = &self.config.load_test;
                if load.requests == 0 || load.concurrency == 0 || load.concurrency > load.requests {
                    return Err(VibeError::Config(format!(
                        "loadTest needs 1 <= concurrency <= requests (got {} requests, {} concurrent)",
                        load.requests, load.concurrency
                    )));
                }
                description = format!(
                    "Running stress test ({} requests, {} concurrent)",
                    load.requests, load.concurrency
                );
                let timeout = load
                    .timeout
                    .map(|secs| format!(" -s {}", secs))
                    .unwrap_or_default();
                format!(
                    "ab -n {} -c {}{} {} 2>&1 | tail -20",
                    load.requests, load.concurrency, timeout, url
                )
            }
            TaskId::Bundle => {
                notes.always = vec![format!("Report saved to: {}", BUNDLE_REPORT_FILE)];
                format!(
                    "npx source-map-explorer {} --html {}",
                    shell_quote(&format!("{}/assets/*.js", self.config.paths.dist)),
                    BUNDLE_REPORT_FILE
                )
            }
        };

        Ok(TaskInvocation {
            id: planned.id,
            title: descriptor.title,
            description,
            command,
            shows_output: descriptor.shows_output,
            notes,
        })
    }

    fn lighthouse_command(&self, url: &str, report_path: &str) -> String {
        let lighthouse = &self.config.lighthouse;
        // Each option is one shell word however many flags it carries
        let chrome_flags = format!("--chrome-flags={}", lighthouse.chrome_flags.join(" "));
        let mut command = format!(
            "npx lighthouse {} --output=html --output-path={} {}",
            url,
            report_path,
            shell_quote(&chrome_flags)
        );
        if !lighthouse.only_categories.is_empty() {
            let categories = format!("--only-categories={}", lighthouse.only_categories.join(","));
            command.push_str(&format!(" {}", shell_quote(&categories)));
        }
        command
    }

    fn pa11y_command(&self, url: &str) -> String {
        let pa11y = &self.config.pa11y;
        let mut command = format!("npx pa11y {}", url);
        if let Some(standard) = &pa11y.standard {
            command.push_str(&format!(" --standard {}", shell_quote(standard)));
        }
        if let Some(level) = &pa11y.level {
            command.push_str(&format!(" --level {}", shell_quote(level)));
        }
        for rule in &pa11y.ignore {
            command.push_str(&format!(" --ignore {}", shell_quote(rule)));
        }
        command
    }
}

/// `./vibe-lighthouse-<ISO 8601 with ':' and '.' replaced by '-'>.html`
pub fn lighthouse_report_path(now: DateTime<Utc>) -> String {
    let timestamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("./vibe-lighthouse-{}.html", timestamp)
}

/// Reject targets that cannot be passed to a tool as a single argument
pub fn validate_target(target: &str) -> VibeResult<()> {
    if target.trim().is_empty() {
        return Err(VibeError::Target("target URL or path is empty".to_string()));
    }
    if target.starts_with('-') {
        return Err(VibeError::Target(format!(
            "'{}' would be read as an option by the audit tools",
            target
        )));
    }
    if target.chars().any(char::is_control) {
        return Err(VibeError::Target(format!(
            "'{}' contains control characters",
            target.escape_default()
        )));
    }
    Ok(())
}

/// Quote `value` for `sh` unless it only holds characters that need no quoting
pub fn shell_quote(value: &str) -> String {
    let is_safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,~".contains(c));
    if is_safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

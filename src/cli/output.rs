use serde::Serialize;

use crate::ops::create_task::{CreatedTask, Notifier};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CreatedTaskJson {
    pub path: String,
    pub file_name: String,
    pub task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appended_to: Option<String>,
}

pub fn created_to_json(created: &CreatedTask) -> CreatedTaskJson {
    CreatedTaskJson {
        path: created.path.clone(),
        file_name: created.file_name.clone(),
        task_id: created.task_id.clone(),
        appended_to: created.appended_to.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human output
// ---------------------------------------------------------------------------

pub fn print_created(created: &CreatedTask) {
    println!("{} ({})", created.path, created.task_id);
}

/// Notices go to stderr: they are side-channel observability, stdout stays
/// reserved for command output (and parseable under --json).
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}

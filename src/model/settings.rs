use serde::{Deserialize, Serialize};

/// Configuration from tasknote.toml.
///
/// Every field has a serde default, so a sparse settings file merges
/// key-by-key over the built-in defaults. Values are not validated at load
/// time; a bad path or template fails when a task is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory (vault-relative) where task notes are created.
    pub tasks_dir: String,
    /// Template for the new note's file name. May use `{{title}}`, `{{id}}`,
    /// `{{date[:fmt]}}`, `{{time[:fmt]}}`.
    pub task_file_name: String,
    /// Vault path of the note body template.
    pub task_file_template: String,
    /// Template for the human-readable task id, e.g. `TASK-{{id}}`. The raw
    /// (unresolved) text of this setting is also the pattern replaced inside
    /// the body template.
    pub task_id: String,
    /// Note that receives a back-reference line per created task. Empty
    /// disables the append step.
    pub append_file: String,
    /// Template for the back-reference line. May use `{{fileName}}`,
    /// `{{taskId}}`, `{{date[:fmt]}}`, `{{time[:fmt]}}`.
    pub append_template: String,
    /// How sequence ids are assigned: `count` (files in tasks_dir + 1) or
    /// `uuid`.
    pub id_allocator: IdAllocatorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdAllocatorKind {
    #[default]
    Count,
    Uuid,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tasks_dir: "tasks".to_string(),
            task_file_name: "task-{{date:YYYY-MM-DD}}--{{time:hh-mm-ss}} - {{title}}.md"
                .to_string(),
            task_file_template: "_templates/task.md".to_string(),
            task_id: "TASK-{{id}}".to_string(),
            append_file: "Inbox.md".to_string(),
            append_template: "- [ ] [[{{fileName}}|{{taskId}}]] ➕ {{date:YYYY-MM-DD}}"
                .to_string(),
            id_allocator: IdAllocatorKind::Count,
        }
    }
}

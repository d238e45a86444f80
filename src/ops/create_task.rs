use crate::io::vault::{Vault, VaultError};
use crate::model::settings::Settings;
use crate::ops::alloc::IdAllocator;
use crate::template::{TemplateContext, resolve};

/// Error type for the task-creation workflow
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("could not create tasks directory {dir}: {source}")]
    DirectoryCreateFailed { dir: String, source: VaultError },
    #[error("template file not found: {0}")]
    TemplateNotFound(String),
    #[error("append to file not found: {0}")]
    AppendTargetNotFound(String),
    #[error("could not create task file {path}: {source}")]
    CreateFailed { path: String, source: VaultError },
    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// User-visible, fire-and-forget message sink. The workflow never depends
/// on a particular presentation layer.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// What one successful invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    /// Vault path of the new note.
    pub path: String,
    /// Rendered leaf file name.
    pub file_name: String,
    /// Resolved task id, e.g. `TASK-42`.
    pub task_id: String,
    /// Append target that received the back-reference line, if any.
    pub appended_to: Option<String>,
}

/// Orchestrates allocator, template engine, and vault side effects.
///
/// Strictly sequential and non-transactional: a failure aborts the
/// remaining steps but already-performed writes are not rolled back.
pub struct TaskAssembler<'a> {
    vault: &'a dyn Vault,
    settings: &'a Settings,
    allocator: Box<dyn IdAllocator>,
    notifier: &'a dyn Notifier,
}

impl<'a> TaskAssembler<'a> {
    pub fn new(
        vault: &'a dyn Vault,
        settings: &'a Settings,
        allocator: Box<dyn IdAllocator>,
        notifier: &'a dyn Notifier,
    ) -> Self {
        TaskAssembler {
            vault,
            settings,
            allocator,
            notifier,
        }
    }

    pub fn create_task(&mut self, title: &str) -> Result<CreatedTask, WorkflowError> {
        let settings = self.settings;

        // Ensure the tasks directory exists.
        if !settings.tasks_dir.is_empty() && !self.vault.exists(&settings.tasks_dir) {
            self.vault.create_dir(&settings.tasks_dir).map_err(|e| {
                WorkflowError::DirectoryCreateFailed {
                    dir: settings.tasks_dir.clone(),
                    source: e,
                }
            })?;
        }

        // Allocate the sequence id from the current listing.
        let id = self.allocator.next_id(self.vault, &settings.tasks_dir)?;

        // First render pass: the file name and task id only see title + id.
        let ctx = TemplateContext::new().with("title", title).with("id", id.as_str());
        let file_name = resolve(&settings.task_file_name, &ctx);
        let path = format!("{}/{}", settings.tasks_dir, file_name);

        // The body template must exist before anything is written.
        if !self.vault.is_file(&settings.task_file_template) {
            return Err(WorkflowError::TemplateNotFound(
                settings.task_file_template.clone(),
            ));
        }

        let task_id = resolve(&settings.task_id, &ctx);

        // Hydrate the body: every literal occurrence of the raw task_id
        // setting text is replaced with the resolved id. This is a plain
        // global string replace over the template, not a placeholder pass.
        let template_text = self.vault.read(&settings.task_file_template)?;
        let body = template_text.replace(&settings.task_id, &task_id);

        self.vault
            .create(&path, &body)
            .map_err(|e| WorkflowError::CreateFailed {
                path: path.clone(),
                source: e,
            })?;

        // Back-reference line. The append context only carries the already
        // rendered values, never title/id.
        let mut appended_to = None;
        if !settings.append_file.is_empty() {
            if !self.vault.is_file(&settings.append_file) {
                return Err(WorkflowError::AppendTargetNotFound(
                    settings.append_file.clone(),
                ));
            }
            let append_ctx = TemplateContext::new()
                .with("fileName", file_name.as_str())
                .with("taskId", task_id.as_str());
            let line = resolve(&settings.append_template, &append_ctx);
            self.notifier
                .notify(&format!("Appending to {}: {}", settings.append_file, line));
            self.vault.append(&settings.append_file, &format!("\n{}", line))?;
            appended_to = Some(settings.append_file.clone());
        }

        self.notifier.notify(&format!("Created task: {}", title));

        Ok(CreatedTask {
            path,
            file_name,
            task_id,
            appended_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::vault::FsVault;
    use crate::ops::alloc::CountingAllocator;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Notifier that records messages for assertions.
    struct Recorder(RefCell<Vec<String>>);

    impl Recorder {
        fn new() -> Self {
            Recorder(RefCell::new(Vec::new()))
        }
        fn messages(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn test_settings() -> Settings {
        Settings {
            // Fixed file name template keeps assertions deterministic.
            task_file_name: "{{title}}.md".to_string(),
            ..Settings::default()
        }
    }

    fn seed_vault(vault: &FsVault) {
        vault.create_dir("_templates").unwrap();
        vault
            .create("_templates/task.md", "# TASK-{{id}}\n\nid: TASK-{{id}}\n")
            .unwrap();
        vault.create("Inbox.md", "# Inbox\n").unwrap();
    }

    #[test]
    fn test_end_to_end_create() {
        let tmp = TempDir::new().unwrap();
        let vault = FsVault::new(tmp.path());
        seed_vault(&vault);
        let settings = test_settings();
        let notifier = Recorder::new();

        let created = TaskAssembler::new(&vault, &settings, Box::new(CountingAllocator), &notifier)
            .create_task("Write spec")
            .unwrap();

        assert_eq!(created.path, "tasks/Write spec.md");
        assert_eq!(created.file_name, "Write spec.md");
        assert_eq!(created.task_id, "TASK-1");
        assert_eq!(created.appended_to.as_deref(), Some("Inbox.md"));

        // Every literal occurrence of the raw setting text is replaced.
        let body = vault.read("tasks/Write spec.md").unwrap();
        assert_eq!(body, "# TASK-1\n\nid: TASK-1\n");

        // The back-reference line lands after the existing content.
        let inbox = vault.read("Inbox.md").unwrap();
        assert!(inbox.starts_with("# Inbox\n\n- [ ] [[Write spec.md|TASK-1]]"));

        let messages = notifier.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Appending to Inbox.md:"));
        assert_eq!(messages[1], "Created task: Write spec");
    }

    #[test]
    fn test_second_task_gets_next_id() {
        let tmp = TempDir::new().unwrap();
        let vault = FsVault::new(tmp.path());
        seed_vault(&vault);
        let settings = test_settings();
        let notifier = Recorder::new();

        let mut assembler =
            TaskAssembler::new(&vault, &settings, Box::new(CountingAllocator), &notifier);
        assembler.create_task("First").unwrap();
        let second = assembler.create_task("Second").unwrap();
        assert_eq!(second.task_id, "TASK-2");
    }

    #[test]
    fn test_template_not_found_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let vault = FsVault::new(tmp.path());
        vault.create("Inbox.md", "# Inbox\n").unwrap();
        let settings = test_settings();
        let notifier = Recorder::new();

        let err = TaskAssembler::new(&vault, &settings, Box::new(CountingAllocator), &notifier)
            .create_task("Doomed")
            .unwrap_err();
        assert!(matches!(err, WorkflowError::TemplateNotFound(_)));

        // The tasks directory was created (not reverted), but no task file
        // or append occurred.
        let files = vault.list_files().unwrap();
        assert!(!files.iter().any(|f| f.starts_with("tasks/")));
        assert_eq!(vault.read("Inbox.md").unwrap(), "# Inbox\n");
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_append_target_not_found_keeps_created_file() {
        let tmp = TempDir::new().unwrap();
        let vault = FsVault::new(tmp.path());
        vault.create_dir("_templates").unwrap();
        vault.create("_templates/task.md", "body\n").unwrap();
        let settings = test_settings();
        let notifier = Recorder::new();

        let err = TaskAssembler::new(&vault, &settings, Box::new(CountingAllocator), &notifier)
            .create_task("Orphan")
            .unwrap_err();
        assert!(matches!(err, WorkflowError::AppendTargetNotFound(_)));

        // No rollback: the note from the earlier step stays on disk.
        assert!(vault.is_file("tasks/Orphan.md"));
    }

    #[test]
    fn test_empty_append_file_skips_append_step() {
        let tmp = TempDir::new().unwrap();
        let vault = FsVault::new(tmp.path());
        seed_vault(&vault);
        let settings = Settings {
            append_file: String::new(),
            ..test_settings()
        };
        let notifier = Recorder::new();

        let created = TaskAssembler::new(&vault, &settings, Box::new(CountingAllocator), &notifier)
            .create_task("Solo")
            .unwrap();
        assert_eq!(created.appended_to, None);
        assert_eq!(vault.read("Inbox.md").unwrap(), "# Inbox\n");
        assert_eq!(notifier.messages(), vec!["Created task: Solo"]);
    }

    #[test]
    fn test_file_name_collision_fails() {
        let tmp = TempDir::new().unwrap();
        let vault = FsVault::new(tmp.path());
        seed_vault(&vault);
        let settings = test_settings();
        let notifier = Recorder::new();

        let mut assembler =
            TaskAssembler::new(&vault, &settings, Box::new(CountingAllocator), &notifier);
        assembler.create_task("Same title").unwrap();

        // Same title renders the same file name; the store-level collision
        // surfaces as CreateFailed, never an overwrite.
        let err = assembler.create_task("Same title").unwrap_err();
        assert!(matches!(err, WorkflowError::CreateFailed { .. }));
    }

    #[test]
    fn test_append_template_cannot_see_title_or_id() {
        let tmp = TempDir::new().unwrap();
        let vault = FsVault::new(tmp.path());
        seed_vault(&vault);
        let settings = Settings {
            append_template: "{{title}} {{taskId}}".to_string(),
            ..test_settings()
        };
        let notifier = Recorder::new();

        TaskAssembler::new(&vault, &settings, Box::new(CountingAllocator), &notifier)
            .create_task("Hidden")
            .unwrap();

        // {{title}} is not in the append context and passes through.
        let inbox = vault.read("Inbox.md").unwrap();
        assert!(inbox.contains("{{title}} TASK-1"));
    }
}

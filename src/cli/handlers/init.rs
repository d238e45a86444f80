use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::settings_io::SETTINGS_FILE;
use crate::model::settings::Settings;

const SETTINGS_TEMPLATE: &str = r#"# tasknote settings. Unset keys fall back to their defaults, so this file
# may be trimmed to only the values you change.

# The directory where task notes are stored.
# Note: changing this may throw off the aliases on existing task notes;
# move them to the new directory too.
tasks_dir = "tasks"

# The name of the task file. Placeholders: {{title}}, {{id}},
# {{date[:format]}}, {{time[:format]}} (dayjs-style format tokens).
task_file_name = "task-{{date:YYYY-MM-DD}}--{{time:hh-mm-ss}} - {{title}}.md"

# The note used as the body template for new tasks.
task_file_template = "_templates/task.md"

# The task id pattern. Every occurrence of this exact text in the body
# template is replaced with the resolved id.
task_id = "TASK-{{id}}"

# The note each new task is appended to. Empty disables the append step.
append_file = "Inbox.md"

# The appended line. Placeholders: {{fileName}}, {{taskId}},
# {{date[:format]}}, {{time[:format]}}.
append_template = "- [ ] [[{{fileName}}|{{taskId}}]] ➕ {{date:YYYY-MM-DD}}"

# How sequence ids are assigned: "count" (existing task notes + 1, the
# classic behavior) or "uuid".
id_allocator = "count"
"#;

const TASK_BODY_TEMPLATE: &str = "# TASK-{{id}}\n\n> \n\n## Notes\n";

const INBOX_TEMPLATE: &str = "# Inbox\n";

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let settings_path = cwd.join(SETTINGS_FILE);

    if settings_path.is_file() && !args.force {
        return Err(format!(
            "task vault already initialized: ./{} exists (use --force to overwrite)",
            SETTINGS_FILE
        )
        .into());
    }

    fs::write(&settings_path, SETTINGS_TEMPLATE)?;

    // Seed the structure the default settings point at, without touching
    // notes that already exist in the vault.
    let defaults = Settings::default();
    fs::create_dir_all(cwd.join(&defaults.tasks_dir))?;

    let template_path = cwd.join(&defaults.task_file_template);
    if let Some(parent) = template_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if !template_path.exists() {
        fs::write(&template_path, TASK_BODY_TEMPLATE)?;
    }

    let append_path = cwd.join(&defaults.append_file);
    if !append_path.exists() {
        fs::write(&append_path, INBOX_TEMPLATE)?;
    }

    println!("Initialized task vault in {}", cwd.display());
    println!("  settings: {}", SETTINGS_FILE);
    println!("  body template: {}", defaults.task_file_template);
    println!("  append target: {}", defaults.append_file);

    Ok(())
}

mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

/// Global override for the vault directory (set by -C flag)
static VAULT_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::{self, ConsoleNotifier};
use crate::io::settings_io::{self, SETTING_KEYS};
use crate::io::vault::FsVault;
use crate::ops::{TaskAssembler, allocator_for};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for vault_root()
    if let Some(ref dir) = cli.vault_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        VAULT_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        // Init is handled in main.rs before vault discovery
        Commands::Init(args) => cmd_init(args),
        Commands::New(args) => cmd_new(args, json),
        Commands::Config(args) => cmd_config(args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn vault_root() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let start = match VAULT_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    Ok(settings_io::discover_vault(&start)?)
}

/// Read one line from stdin as the task title. Empty input or EOF means
/// the user cancelled.
fn prompt_title() -> Result<Option<String>, Box<dyn std::error::Error>> {
    use std::io::Write;

    print!("Task title: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let title = line.trim().to_string();
    if title.is_empty() { Ok(None) } else { Ok(Some(title)) }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_new(args: NewArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let root = vault_root()?;
    let settings = settings_io::load_settings(&root)?;
    let vault = FsVault::new(&root);

    let title = match args.title {
        Some(t) => t.trim().to_string(),
        None => match prompt_title()? {
            Some(t) => t,
            None => return Ok(()), // cancelled
        },
    };
    if title.is_empty() {
        return Err("task title cannot be empty".into());
    }

    let notifier = ConsoleNotifier;
    let mut assembler = TaskAssembler::new(
        &vault,
        &settings,
        allocator_for(settings.id_allocator),
        &notifier,
    );
    let created = assembler.create_task(&title)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::created_to_json(&created))?
        );
    } else {
        output::print_created(&created);
    }
    Ok(())
}

fn cmd_config(args: ConfigCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let root = vault_root()?;

    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let settings = settings_io::load_settings(&root)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                for key in SETTING_KEYS {
                    println!("{} = {}", key, settings_io::get_field(&settings, key)?);
                }
            }
        }
        ConfigAction::Get(get) => {
            let settings = settings_io::load_settings(&root)?;
            println!("{}", settings_io::get_field(&settings, &get.key)?);
        }
        ConfigAction::Set(set) => {
            // Each invocation edits one field and persists immediately,
            // preserving the file's comments and layout.
            let (_settings, mut doc) = settings_io::read_settings_doc(&root)?;
            settings_io::set_field(&mut doc, &set.key, &set.value)?;
            settings_io::write_settings(&root, &doc)?;
            println!("{} = {}", set.key, set.value);
        }
    }
    Ok(())
}

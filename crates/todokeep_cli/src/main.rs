//! Command-line front end over `todokeep_core`.
//!
//! # Responsibility
//! - Map one subcommand to one store operation against a database file.
//! - Print ids so later invocations can address what earlier ones created.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use todokeep_core::db::open_db;
use todokeep_core::{
    checklist_progress, due_status, folder_progress, init_logging_with, is_palette_color,
    parse_due_date, tasks_for_display, total_progress, DueStatus, LogConfig,
    SqliteStateRepository, StoreConfig, ThemeId, ThemeStore, TodoStore, DEFAULT_DB_FILE_NAME,
    DEFAULT_FOLDER_COLOR,
};

#[derive(Debug, Parser)]
#[command(name = "todokeep", version, about = "Folder/checklist/task keeper")]
struct Cli {
    /// Database file; defaults to TODOKEEP_DB_PATH, then ./todokeep.sqlite3.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check core linkage.
    Ping,
    /// Print every folder, checklist and task with progress.
    Tree,
    /// Case-insensitive search over names and titles.
    Search { query: String },
    AddFolder {
        name: String,
        #[arg(long, default_value = DEFAULT_FOLDER_COLOR)]
        color: String,
    },
    AddChecklist { folder: String, name: String },
    AddTask {
        folder: String,
        checklist: String,
        title: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long, value_parser = parse_due_arg)]
        due: Option<NaiveDate>,
    },
    ToggleTask {
        folder: String,
        checklist: String,
        task: String,
    },
    /// Show the active theme, or switch to `id`.
    Theme { id: Option<ThemeId> },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging_with(&LogConfig::from_env()) {
        eprintln!("warning: logging disabled: {err}");
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Command::Ping = cli.command {
        println!("todokeep_core ping={}", todokeep_core::ping());
        println!("todokeep_core version={}", todokeep_core::core_version());
        return Ok(());
    }

    let config = StoreConfig::from_env();
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.db_path_or(DEFAULT_DB_FILE_NAME));
    let conn = open_db(&db_path).map_err(|err| format!("{}: {err}", db_path.display()))?;
    let repo = SqliteStateRepository::try_new(&conn).map_err(|err| err.to_string())?;

    if let Command::Theme { id } = cli.command {
        let mut themes = ThemeStore::load_with_config(repo, &config);
        if let Some(id) = id {
            themes.set_theme(id);
        }
        println!("{} ({})", themes.theme_id(), themes.theme().name);
        return Ok(());
    }

    let mut store = TodoStore::load_with_config(repo, &config);
    match cli.command {
        Command::Ping | Command::Theme { .. } => return Ok(()),
        Command::Tree => {
            print_tree(&store);
            return Ok(());
        }
        Command::Search { query } => {
            store.set_search_query(query);
            for hit in store.search_results() {
                println!("{:<9} {}  {}", hit.kind.as_str(), hit.id, hit.name);
            }
            return Ok(());
        }
        Command::AddFolder { name, color } => {
            let name = non_blank(&name, "folder name")?;
            if !is_palette_color(&color) {
                log::warn!("event=folder_add module=cli status=warn error_code=off_palette_color");
            }
            println!("{}", store.add_folder(name, color));
        }
        Command::AddChecklist { folder, name } => {
            let name = non_blank(&name, "checklist name")?;
            let checklist_id = store
                .add_checklist(&folder, name)
                .ok_or_else(|| format!("no folder `{folder}`"))?;
            println!("{checklist_id}");
        }
        Command::AddTask {
            folder,
            checklist,
            title,
            due,
        } => {
            let title = non_blank(&title, "task title")?;
            let task_id = store
                .add_task(&folder, &checklist, title, due)
                .ok_or_else(|| format!("no checklist `{checklist}` in folder `{folder}`"))?;
            println!("{task_id}");
        }
        Command::ToggleTask {
            folder,
            checklist,
            task,
        } => {
            let before = store
                .checklist(&folder, &checklist)
                .and_then(|list| list.task(&task))
                .map(|task| task.completed)
                .ok_or_else(|| format!("no task `{task}`"))?;
            store.toggle_task(&folder, &checklist, &task);
            println!("{}", if before { "open" } else { "done" });
        }
    }
    // Mutations already wrote once; flushing again surfaces a failed write.
    store.flush().map_err(|err| err.to_string())
}

fn print_tree<R: todokeep_core::StateRepository>(store: &TodoStore<R>) {
    let today = Local::now().date_naive();
    for folder in store.folders() {
        println!(
            "{}  {} [{}] {}",
            folder.id,
            folder.name,
            folder_progress(folder),
            folder.color
        );
        for checklist in &folder.checklists {
            println!(
                "  {}  {} [{}]",
                checklist.id,
                checklist.name,
                checklist_progress(checklist)
            );
            for task in tasks_for_display(checklist) {
                let mark = if task.completed { "x" } else { " " };
                let due = match (task.due_date, due_status(task, today)) {
                    (Some(date), DueStatus::Overdue) => format!(" (due {date}, overdue)"),
                    (Some(date), _) => format!(" (due {date})"),
                    (None, _) => String::new(),
                };
                println!("    [{mark}] {}  {}{due}", task.id, task.title);
            }
        }
    }
    let total = total_progress(store.folders());
    println!("total {total} ({}%)", total.percent());
}

fn parse_due_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_due_date(raw).ok_or_else(|| format!("`{raw}` is not a YYYY-MM-DD date"))
}

fn non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{what} must not be empty"));
    }
    Ok(trimmed)
}

//! Command-line front end for the TimeUp planner.
//!
//! # Responsibility
//! - Expose dashboard, task list and weekly schedule use-cases.
//! - Keep all business rules in `timeup_core`.

use anyhow::{bail, Context};
use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use timeup_core::db::open_db;
use timeup_core::export::{long_date, schedule_share_text, tasks_share_text};
use timeup_core::{
    init_logging_from_config, ClassInput, CoreConfig, Dashboard, FieldErrors, KeyValueStore,
    Labelled, Locale, RecordId, ScheduleService, SqliteKeyValueStore, TaskInput, TaskService,
};

/// TimeUp: tasks, exams, reminders and a weekly class schedule.
#[derive(Parser)]
#[command(name = "timeup", version, about)]
struct Cli {
    /// SQLite database file (overrides TIMEUP_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Display locale: en | es (overrides TIMEUP_LOCALE).
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Absolute directory for log files (overrides TIMEUP_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (overrides TIMEUP_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Upcoming tasks and today's classes.
    Dashboard,

    /// Manage tasks, exams and reminders.
    #[command(subcommand)]
    Tasks(TasksCommand),

    /// Manage the weekly class schedule.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
}

#[derive(Subcommand)]
enum TasksCommand {
    /// List every task, soonest due first.
    List,
    /// Add a task.
    Add(AddTaskArgs),
    /// Delete a task by id.
    Delete { id: String },
    /// Print the shareable task list.
    Share,
}

#[derive(Args)]
struct AddTaskArgs {
    #[arg(long)]
    title: String,
    /// Due date: RFC 3339 date-time or YYYY-MM-DD.
    #[arg(long)]
    due: Option<String>,
    /// Task | Exam | Reminder (localized labels accepted).
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand)]
enum ScheduleCommand {
    /// List classes grouped by day.
    List,
    /// Add a class.
    Add(AddClassArgs),
    /// Delete a class by id.
    Delete { id: String },
    /// Print the shareable weekly schedule.
    Share,
}

#[derive(Args)]
struct AddClassArgs {
    #[arg(long)]
    subject: String,
    /// Weekday name (localized labels accepted).
    #[arg(long)]
    day: String,
    /// Start time, HH:mm.
    #[arg(long)]
    start: String,
    /// End time, HH:mm.
    #[arg(long)]
    end: String,
    #[arg(long)]
    location: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&cli)?;
    init_logging_from_config(&config)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let mut store = SqliteKeyValueStore::try_new(&conn).context("failed to open store")?;
    let locale = config.locale;

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => print_dashboard(&mut store, locale),
        Command::Tasks(command) => run_tasks(command, &mut store, locale),
        Command::Schedule(command) => run_schedule(command, &mut store, locale),
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<CoreConfig> {
    let mut config = CoreConfig::from_env()?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(dir) = &cli.log_dir {
        if !dir.is_absolute() {
            bail!("--log-dir must be an absolute path, got `{}`", dir.display());
        }
        config.log_dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.set_log_level(level)?;
    }
    Ok(config)
}

fn print_dashboard<S: KeyValueStore>(store: &mut S, locale: Locale) -> anyhow::Result<ExitCode> {
    let tasks = TaskService::open(&mut *store).tasks().to_vec();
    let schedule = ScheduleService::open(&mut *store);
    let dashboard = Dashboard::build(&tasks, schedule.classes(), Local::now());

    println!("Upcoming tasks:");
    if dashboard.upcoming_tasks.is_empty() {
        println!("  (nothing due)");
    }
    for task in &dashboard.upcoming_tasks {
        println!(
            "  [{}] {} - {}",
            task.kind.label(locale),
            task.title,
            long_date(&task.due_date.with_timezone(&Local), locale)
        );
    }

    println!();
    println!("Classes today ({}):", dashboard.today.label(locale));
    if dashboard.todays_classes.is_empty() {
        println!("  (no classes)");
    }
    for class in &dashboard.todays_classes {
        println!(
            "  {}-{} {}{}",
            class.start_time,
            class.end_time,
            class.subject,
            class
                .location
                .as_deref()
                .map(|location| format!(" @ {location}"))
                .unwrap_or_default()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_tasks<S: KeyValueStore>(
    command: TasksCommand,
    store: &mut S,
    locale: Locale,
) -> anyhow::Result<ExitCode> {
    let mut service = TaskService::open(store);
    match command {
        TasksCommand::List => {
            let now = Utc::now();
            for task in service.by_due_date() {
                let marker = if task.is_upcoming(now) { " " } else { "!" };
                println!(
                    "{marker} {:<36}  {:<12}  {:<24}  {}",
                    task.id,
                    task.kind.label(locale),
                    long_date(&task.due_date.with_timezone(&Local), locale),
                    task.title
                );
                if let Some(description) = task.description.as_deref() {
                    println!("  {:<36}  {description}", "");
                }
            }
        }
        TasksCommand::Add(args) => {
            let input = TaskInput {
                title: args.title,
                description: args.description,
                due_date: args.due,
                kind: args.kind,
            };
            match service.create_task(input) {
                Ok(task) => println!("created task {}", task.id),
                Err(errors) => return Ok(report_rejection(&errors)),
            }
        }
        TasksCommand::Delete { id } => match service.delete_task(&RecordId::from(id.as_str())) {
            Some(task) => println!("deleted task {}", task.id),
            None => println!("no task with id {id}"),
        },
        TasksCommand::Share => print!("{}", tasks_share_text(service.tasks(), locale)),
    }
    Ok(ExitCode::SUCCESS)
}

fn run_schedule<S: KeyValueStore>(
    command: ScheduleCommand,
    store: &mut S,
    locale: Locale,
) -> anyhow::Result<ExitCode> {
    let mut service = ScheduleService::open(store);
    match command {
        ScheduleCommand::List => {
            for group in service.by_day() {
                println!("{}:", group.day.label(locale));
                if group.classes.is_empty() {
                    println!("  -");
                }
                for class in group.classes {
                    println!(
                        "  {:<36}  {}-{}  {}{}",
                        class.id,
                        class.start_time,
                        class.end_time,
                        class.subject,
                        class
                            .location
                            .as_deref()
                            .map(|location| format!(" @ {location}"))
                            .unwrap_or_default()
                    );
                }
            }
        }
        ScheduleCommand::Add(args) => {
            let input = ClassInput {
                subject: args.subject,
                day: args.day,
                start_time: args.start,
                end_time: args.end,
                location: args.location,
            };
            match service.create_class(input) {
                Ok(class) => println!("created class {}", class.id),
                Err(errors) => return Ok(report_rejection(&errors)),
            }
        }
        ScheduleCommand::Delete { id } => {
            match service.delete_class(&RecordId::from(id.as_str())) {
                Some(class) => println!("deleted class {}", class.id),
                None => println!("no class with id {id}"),
            }
        }
        ScheduleCommand::Share => print!("{}", schedule_share_text(service.classes(), locale)),
    }
    Ok(ExitCode::SUCCESS)
}

fn report_rejection(errors: &FieldErrors) -> ExitCode {
    for (field, message) in errors.iter() {
        eprintln!("{field}: {message}");
    }
    ExitCode::from(2)
}

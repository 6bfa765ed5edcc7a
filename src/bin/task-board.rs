//! A command-line task board

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use task_board::client::Client;
use task_board::config::Config;
use task_board::{parse_date, Error, NewTask, Task, TaskStatus, TaskStore};

#[derive(Parser)]
#[command(name = "task-board")]
#[command(about = "Manage the tasks of a remote to-do collection", long_about = None)]
struct Cli {
    /// Base URL of the collection (defaults to $TASK_BOARD_URL, or http://localhost:8080/)
    #[arg(short, long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the board
    List,
    /// Add a new task
    Add {
        /// Task text (quoted if it has spaces)
        text: String,
        /// Start date in YYYY-MM-DD (defaults to today)
        #[arg(short, long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// End date in YYYY-MM-DD
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,
    },
    /// Change the text of a task
    Edit {
        id: String,
        text: String,
    },
    /// Move a task to the "done" column
    Done {
        id: String,
    },
    /// Move a task back to the "todo" column
    Undo {
        id: String,
    },
    /// Move a task to the other column
    Toggle {
        id: String,
    },
    /// Delete a task
    Remove {
        id: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        log::debug!("Exiting because of {:?}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.url {
        Some(url) => Config::new(url),
        None => Config::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid base URL: {}", err);
            return Err(err.into());
        },
    };

    let store = TaskStore::new(Client::new(config));
    report(&store, store.load().await)?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {},
        Commands::Add { text, start, end } => {
            let new_task = NewTask::new(text).with_start_date(start).with_end_date(end);
            report(&store, store.create(new_task).await)?;
        },
        Commands::Edit { id, text } => {
            let task = find(&store, &id)?;
            store.begin_edit(task.id());
            store.set_edit_text(text);
            report(&store, store.commit_edit().await)?;
        },
        Commands::Done { id } => {
            let task = find(&store, &id)?;
            report(&store, store.move_status(&task, TaskStatus::Done).await)?;
        },
        Commands::Undo { id } => {
            let task = find(&store, &id)?;
            report(&store, store.move_status(&task, TaskStatus::Todo).await)?;
        },
        Commands::Toggle { id } => {
            let task = find(&store, &id)?;
            report(&store, store.toggle_status(&task).await)?;
        },
        Commands::Remove { id } => {
            let task = find(&store, &id)?;
            report(&store, store.delete(task.id()).await)?;
        },
    }

    task_board::utils::print_board(&store.board());
    Ok(())
}

/// Print the error banner of the store, in case the operation failed
fn report<C, T>(store: &TaskStore<C>, result: Result<T, Error>) -> Result<T, Error>
where
    C: task_board::traits::TaskCollection,
{
    if result.is_err() {
        if let Some(message) = store.error() {
            eprintln!("{}", message);
        }
    }
    result
}

fn find<C>(store: &TaskStore<C>, id: &str) -> Result<Task, Box<dyn std::error::Error>>
where
    C: task_board::traits::TaskCollection,
{
    match store.find(id) {
        Some(task) => Ok(task),
        None => {
            eprintln!("No task with ID {}", id);
            Err(format!("No task with ID {}", id).into())
        },
    }
}

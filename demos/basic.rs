//! Load the tasks of a collection, add one, and print the board before and after.
//!
//! The collection is read from `$TASK_BOARD_URL` (defaults to http://localhost:8080/)

use task_board::client::Client;
use task_board::config::Config;
use task_board::{NewTask, TaskStore};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid collection URL: {}", err);
            return;
        }
    };
    let store = TaskStore::new(Client::new(config));

    if let Err(err) = store.load().await {
        log::error!("Unable to load tasks: {}", err);
        return;
    }
    println!("---- before -----");
    task_board::utils::print_board(&store.board());

    let new_task = NewTask::new("Try the task board").with_end_date(Some(store.today()));
    if let Err(err) = store.create(new_task).await {
        log::error!("Unable to create a task: {}", err);
    }
    println!("---- after -----");
    task_board::utils::print_board(&store.board());
}

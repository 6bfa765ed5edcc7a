//! The two-column view of a task list

use chrono::NaiveDate;

use crate::task::{Task, TaskStatus};

/// A task, as displayed on a [`Board`]
#[derive(Clone, Debug, PartialEq)]
pub struct BoardEntry {
    pub task: Task,
    pub overdue: bool,
}

/// Tasks split into their `todo` and `done` columns
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    pub todo: Vec<BoardEntry>,
    pub done: Vec<BoardEntry>,
}

impl Board {
    pub fn len(&self) -> usize {
        self.todo.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The column that contains the tasks of a given status
    pub fn column(&self, status: TaskStatus) -> &[BoardEntry] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::Done => &self.done,
        }
    }
}

/// Split tasks by status.
///
/// Every task ends up in exactly one column, and each column keeps the order of `tasks`.
/// The overdue flag is computed against `today`.
pub fn partition(tasks: &[Task], today: NaiveDate) -> Board {
    let mut board = Board::default();
    for task in tasks {
        let entry = BoardEntry {
            task: task.clone(),
            overdue: task.is_overdue(today),
        };
        match task.status() {
            TaskStatus::Todo => board.todo.push(entry),
            TaskStatus::Done => board.done.push(entry),
        }
    }
    board
}

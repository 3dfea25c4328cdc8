use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::models::{LoadState, Task, TaskPriority, TaskStatus};
use crate::services::store::AppStore;
use crate::views::short_age;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    #[serde(flatten)]
    pub task: Task,
    pub age: String,
    pub is_done: bool,
    pub is_high_priority: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksPage {
    pub open: Vec<TaskItem>,
    pub done: Vec<TaskItem>,
    pub open_count: usize,
    pub load: LoadState,
}

pub fn tasks_page<Tz: TimeZone>(store: &AppStore, now: &DateTime<Tz>) -> TasksPage {
    let item = |task: &Task| TaskItem {
        task: task.clone(),
        age: short_age(task.created_at, now),
        is_done: task.status == TaskStatus::Done,
        is_high_priority: task.priority == Some(TaskPriority::High),
    };

    let (done, open): (Vec<TaskItem>, Vec<TaskItem>) = store.tasks().iter().map(item).partition(|t| t.is_done);

    TasksPage {
        open_count: store.open_tasks_count(),
        open,
        done,
        load: store.tasks_state.clone(),
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::tasks::repo::Task;

/// Query string accepted by the list endpoint. `task` is a substring
/// filter against the description.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub task: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub task: String,
    #[serde(with = "time::serde::rfc3339")]
    pub task_date: OffsetDateTime,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub task: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub task_date: Option<OffsetDateTime>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub task: Task,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<Task>,
    pub count: usize,
    pub total_tasks: i64,
    pub page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub success: bool,
    pub id: uuid::Uuid,
}

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    extract::{Json, Path, Query},
    state::AppState,
    tasks::{
        dto::{
            AddTaskRequest, ListQuery, RemovedResponse, TaskListResponse, TaskResponse,
            UpdateTaskRequest,
        },
        query::{default_sort, order_by_clause, parse_sort, Pagination},
        repo::{Task, TaskChanges},
        slug::slugify,
    },
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/task/getalltasks", get(list_tasks))
        .route("/task/addtask", post(add_task))
        .route("/task/getsingletask/:id", get(get_single_task))
        .route("/task/updatetask/:id", put(update_task))
        .route("/task/removetask/:id", delete(remove_task))
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<ListQuery>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let pagination = Pagination::from_query(params.page, params.limit)?;
    let sort = match params.sort.as_deref() {
        Some(spec) => parse_sort(spec)?,
        None => default_sort(),
    };
    let order_by = order_by_clause(&sort);
    let filter = params.task.as_deref().filter(|s| !s.is_empty());

    let total_tasks = Task::count(&state.db, user_id, filter).await?;
    let tasks = Task::list(
        &state.db,
        user_id,
        filter,
        &order_by,
        pagination.limit,
        pagination.offset(),
    )
    .await?;

    Ok(Json(TaskListResponse {
        success: true,
        count: tasks.len(),
        total_tasks,
        page: pagination.page,
        total_pages: pagination.total_pages(total_tasks),
        tasks,
    }))
}

#[instrument(skip(state, payload))]
pub async fn add_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let description = payload.task.trim();
    if description.is_empty() {
        return Err(ApiError::Validation("Task description is required".into()));
    }

    let slug = slugify(description);
    let task = Task::create(
        &state.db,
        user_id,
        description,
        &slug,
        payload.task_date,
        payload.completed,
    )
    .await?;

    info!(user_id = %user_id, task_id = %task.id, "task added");
    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            success: true,
            task,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_single_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = Task::get(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".into()))?;

    Ok(Json(TaskResponse {
        success: true,
        task,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let mut changes = TaskChanges {
        task_date: payload.task_date,
        completed: payload.completed,
        ..Default::default()
    };

    // Slug tracks the description; updates that leave the description
    // alone must leave the slug alone too.
    if let Some(description) = payload.task.as_deref() {
        let description = description.trim();
        if description.is_empty() {
            return Err(ApiError::Validation("Task description cannot be empty".into()));
        }
        changes.task_and_slug = Some((description.to_string(), slugify(description)));
    }

    if changes.is_empty() {
        return Err(ApiError::Validation("No fields to update".into()));
    }

    let task = Task::update(&state.db, user_id, id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".into()))?;

    info!(user_id = %user_id, task_id = %task.id, "task updated");
    Ok(Json(TaskResponse {
        success: true,
        task,
    }))
}

#[instrument(skip(state))]
pub async fn remove_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RemovedResponse>, ApiError> {
    // Delete is scoped by owner like every other task operation, so a
    // foreign task id is indistinguishable from a missing one.
    let removed = Task::delete(&state.db, user_id, id).await?;
    if !removed {
        return Err(ApiError::NotFound("Task not found".into()));
    }

    info!(user_id = %user_id, task_id = %id, "task removed");
    Ok(Json(RemovedResponse { success: true, id }))
}

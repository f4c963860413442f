use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, user_id, task, slug, task_date, completed, created_at";

/// Task record in the database. `user_id` is the authoritative ownership
/// field; every query below is scoped by it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task: String,
    pub slug: String,
    #[serde(with = "time::serde::rfc3339")]
    pub task_date: OffsetDateTime,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Pending field changes for an update; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct TaskChanges {
    pub task_and_slug: Option<(String, String)>,
    pub task_date: Option<OffsetDateTime>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.task_and_slug.is_none() && self.task_date.is_none() && self.completed.is_none()
    }
}

/// Escapes LIKE metacharacters in the needle and wraps it for an
/// unanchored substring match.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: Option<&str>) {
    if let Some(needle) = filter {
        qb.push(" AND task ILIKE ");
        qb.push_bind(like_pattern(needle));
        qb.push(" ESCAPE '\\'");
    }
}

impl Task {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        task: &str,
        slug: &str,
        task_date: OffsetDateTime,
        completed: bool,
    ) -> anyhow::Result<Task> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, task, slug, task_date, completed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, task, slug, task_date, completed, created_at
            "#,
        )
        .bind(user_id)
        .bind(task)
        .bind(slug)
        .bind(task_date)
        .bind(completed)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Task>> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, task, slug, task_date, completed, created_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// One page of the caller's tasks. `order_by` must come from
    /// `query::order_by_clause`, never from client input directly.
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        filter: Option<&str>,
        order_by: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Task>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = "
        ));
        qb.push_bind(user_id);
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY ");
        qb.push(order_by);
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Task>().fetch_all(db).await?;
        Ok(rows)
    }

    /// Total matches for the same scope and filter, ignoring pagination.
    pub async fn count(db: &PgPool, user_id: Uuid, filter: Option<&str>) -> anyhow::Result<i64> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks WHERE user_id = ");
        qb.push_bind(user_id);
        push_filter(&mut qb, filter);

        let total: i64 = qb.build_query_scalar().fetch_one(db).await?;
        Ok(total)
    }

    /// Applies the given changes to the caller's task in one statement.
    /// Returns `None` when no task matches both id and owner.
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        changes: TaskChanges,
    ) -> anyhow::Result<Option<Task>> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE tasks SET ");
        let mut set = qb.separated(", ");
        if let Some((task, slug)) = &changes.task_and_slug {
            set.push("task = ");
            set.push_bind_unseparated(task.clone());
            set.push("slug = ");
            set.push_bind_unseparated(slug.clone());
        }
        if let Some(task_date) = changes.task_date {
            set.push("task_date = ");
            set.push_bind_unseparated(task_date);
        }
        if let Some(completed) = changes.completed {
            set.push("completed = ");
            set.push_bind_unseparated(completed);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" AND user_id = ");
        qb.push_bind(user_id);
        qb.push(format!(" RETURNING {TASK_COLUMNS}"));

        let row = qb.build_query_as::<Task>().fetch_optional(db).await?;
        Ok(row)
    }

    /// Hard delete, scoped to the owner. Returns whether a row was removed.
    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

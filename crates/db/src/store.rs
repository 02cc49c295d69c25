//! [`TaskStore`] backed by Postgres.

use std::collections::HashMap;

use explora_core::events::Event;
use explora_core::preferences::Preferences;
use explora_core::store::{ClaimCommit, CommitOutcome, StoreError, StoreResult, TaskStore};
use explora_core::tasks::{DailyTask, NewTaskClaim, TaskCompletion};
use explora_core::types::DbId;
use explora_core::users::User;
use sqlx::PgPool;

use crate::error::store_error;
use crate::models::daily_task;
use crate::repositories::{
    DailyTaskRepo, EventRepo, PreferencesRepo, TaskClaimRepo, UserRepo,
};

#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load completion rows for `rows` and assemble domain tasks.
    async fn with_completions(
        &self,
        rows: Vec<daily_task::DailyTask>,
    ) -> StoreResult<Vec<DailyTask>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let task_ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
        let mut by_task: HashMap<DbId, Vec<TaskCompletion>> = HashMap::new();
        for completion in DailyTaskRepo::list_completions(&self.pool, &task_ids)
            .await
            .map_err(store_error)?
        {
            by_task
                .entry(completion.task_id)
                .or_default()
                .push(completion.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let completed_by = by_task.remove(&row.id).unwrap_or_default();
                row.into_domain(completed_by)
            })
            .collect())
    }
}

impl TaskStore for PgTaskStore {
    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let row = UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?;
        Ok(row.map(User::from))
    }

    async fn find_active_events(&self) -> StoreResult<Vec<Event>> {
        EventRepo::list_active(&self.pool)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::Failure)
    }

    async fn find_preferences_by_user(&self, user_id: DbId) -> StoreResult<Option<Preferences>> {
        let row = PreferencesRepo::find_by_user(&self.pool, user_id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Preferences::from))
    }

    async fn find_active_tasks_for_events(&self, event_ids: &[DbId]) -> StoreResult<Vec<DailyTask>> {
        let rows = DailyTaskRepo::list_active_for_events(&self.pool, event_ids)
            .await
            .map_err(store_error)?;
        self.with_completions(rows).await
    }

    async fn find_task_by_id(&self, id: DbId) -> StoreResult<Option<DailyTask>> {
        let Some(row) = DailyTaskRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };
        Ok(self.with_completions(vec![row]).await?.pop())
    }

    async fn find_event_by_id(&self, id: DbId) -> StoreResult<Option<Event>> {
        EventRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?
            .map(Event::try_from)
            .transpose()
            .map_err(StoreError::Failure)
    }

    async fn insert_claim_audit(&self, record: &NewTaskClaim) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await.map_err(store_error)?;
        TaskClaimRepo::insert(&mut *conn, record)
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn commit_claim(&self, commit: &ClaimCommit) -> StoreResult<CommitOutcome> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let appended = DailyTaskRepo::append_completion_if_absent(
            &mut *tx,
            commit.task_id,
            commit.user_id,
            commit.claimed_at,
            &commit.award,
        )
        .await
        .map_err(store_error)?;

        let Some(appended) = appended else {
            tx.rollback().await.map_err(store_error)?;
            return Ok(CommitOutcome::AlreadyCompleted);
        };

        if appended.is_first {
            DailyTaskRepo::set_first_completer(&mut *tx, commit.task_id, commit.user_id)
                .await
                .map_err(store_error)?;
        }

        let new_total_score =
            UserRepo::increment_score(&mut *tx, commit.user_id, appended.points_awarded)
                .await
                .map_err(store_error)?
                .ok_or_else(|| StoreError::Failure(format!("user {} vanished", commit.user_id)))?;

        UserRepo::append_completed_task(
            &mut *tx,
            commit.user_id,
            &commit.log_entry(appended.is_first, appended.points_awarded),
        )
        .await
        .map_err(store_error)?;

        TaskClaimRepo::insert(
            &mut *tx,
            &commit.audit_record(appended.is_first, appended.points_awarded),
        )
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        tracing::info!(
            task_id = commit.task_id,
            user_id = commit.user_id,
            points = appended.points_awarded,
            was_first = appended.is_first,
            "Claim committed",
        );

        Ok(CommitOutcome::Applied {
            is_first: appended.is_first,
            points_awarded: appended.points_awarded,
            new_total_score,
        })
    }
}

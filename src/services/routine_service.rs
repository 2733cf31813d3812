use anyhow::Result;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::{
    Difficulty, NewRoutine, RoutineAdminDetail, RoutineAdminRow, RoutineDetail,
    RoutineExerciseEntry, RoutineExerciseInput, RoutineRow,
};

/// Column list for the public routine reads.
const ROUTINE_SELECT: &str = r#"
    SELECT
        r.id, r.name, r.difficulty, r.estimated_time_minutes,
        (SELECT COUNT(*) FROM routine_reactions WHERE routine_id = r.id AND is_like) AS likes,
        (SELECT COUNT(*) FROM routine_reactions WHERE routine_id = r.id AND NOT is_like) AS dislikes
    FROM routines r
"#;

/// Column list for the moderation views, which also carry the approval flag.
const ROUTINE_ADMIN_SELECT: &str = r#"
    SELECT
        r.id, r.name, r.difficulty, r.estimated_time_minutes, r.approved,
        (SELECT COUNT(*) FROM routine_reactions WHERE routine_id = r.id AND is_like) AS likes,
        (SELECT COUNT(*) FROM routine_reactions WHERE routine_id = r.id AND NOT is_like) AS dislikes
    FROM routines r
"#;

/// Routine catalog operations: public reads over approved entries, the
/// moderation views, writes, reordering and the reaction ledger.
#[derive(Clone)]
pub struct RoutineService {
    db: PgPool,
}

impl RoutineService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Approved routines with their ordered exercise lists, alphabetical by
    /// name.
    pub async fn list_approved(&self) -> Result<Vec<RoutineDetail>> {
        let sql = format!("{ROUTINE_SELECT} WHERE r.approved ORDER BY r.name");
        let rows = sqlx::query_as::<_, RoutineRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        self.assemble(rows).await
    }

    /// A single approved routine. Unapproved entries are invisible here.
    pub async fn get_approved(&self, id: i32) -> Result<Option<RoutineDetail>> {
        let sql = format!("{ROUTINE_SELECT} WHERE r.id = $1 AND r.approved");
        let row = sqlx::query_as::<_, RoutineRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => {
                let exercises = self.fetch_routine_exercises(row.id).await?;
                Ok(Some(row.with_exercises(exercises)))
            }
            None => Ok(None),
        }
    }

    /// Approved routines at one difficulty level.
    pub async fn list_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<RoutineDetail>> {
        let sql = format!("{ROUTINE_SELECT} WHERE r.difficulty = $1 AND r.approved ORDER BY r.name");
        let rows = sqlx::query_as::<_, RoutineRow>(&sql)
            .bind(difficulty.as_str())
            .fetch_all(&self.db)
            .await?;

        self.assemble(rows).await
    }

    /// Approved routines whose name contains the given fragment.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<RoutineDetail>> {
        let sql = format!("{ROUTINE_SELECT} WHERE r.name ILIKE $1 AND r.approved ORDER BY r.name");
        let rows = sqlx::query_as::<_, RoutineRow>(&sql)
            .bind(format!("%{}%", name))
            .fetch_all(&self.db)
            .await?;

        self.assemble(rows).await
    }

    /// Moderation view: every routine regardless of approval, approved
    /// entries first, then alphabetical.
    pub async fn list_all_admin(&self) -> Result<Vec<RoutineAdminDetail>> {
        let sql = format!("{ROUTINE_ADMIN_SELECT} ORDER BY r.approved DESC, r.name");
        let rows = sqlx::query_as::<_, RoutineAdminRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        self.assemble_admin(rows).await
    }

    /// A single routine for moderation, visible regardless of approval.
    pub async fn get_admin(&self, id: i32) -> Result<Option<RoutineAdminDetail>> {
        let sql = format!("{ROUTINE_ADMIN_SELECT} WHERE r.id = $1");
        let row = sqlx::query_as::<_, RoutineAdminRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => {
                let exercises = self.fetch_routine_exercises(row.id).await?;
                Ok(Some(row.with_exercises(exercises)))
            }
            None => Ok(None),
        }
    }

    /// Insert a routine and its exercise list in one transaction. Positions
    /// are assigned from input order, starting at 1. The entry starts
    /// unapproved no matter what the caller sent.
    pub async fn create(&self, new: &NewRoutine) -> Result<i32> {
        let mut tx = self.db.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO routines (name, difficulty, estimated_time_minutes, approved)
            VALUES ($1, $2, $3, FALSE)
            RETURNING id
            "#,
        )
        .bind(&new.name)
        .bind(new.difficulty.as_str())
        .bind(new.estimated_time_minutes)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(entries) = &new.exercises {
            insert_routine_entries(&mut tx, id, entries).await?;
        }

        tx.commit().await?;

        Ok(id)
    }

    /// Overwrite the routine fields and, when the payload mentions
    /// exercises, replace the whole exercise list. Returns false when no
    /// such routine exists.
    pub async fn update(&self, id: i32, new: &NewRoutine) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query(
            "UPDATE routines SET name = $2, difficulty = $3, estimated_time_minutes = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&new.name)
        .bind(new.difficulty.as_str())
        .bind(new.estimated_time_minutes)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(entries) = &new.exercises {
            sqlx::query("DELETE FROM routine_exercise WHERE routine_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_routine_entries(&mut tx, id, entries).await?;
        }

        tx.commit().await?;

        Ok(true)
    }

    /// Delete a routine together with its reactions and exercise list.
    /// Returns false when no such routine exists; the clears are rolled back
    /// in that case.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM routine_reactions WHERE routine_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM routine_exercise WHERE routine_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM routines WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;

        Ok(true)
    }

    /// Rewrite stored positions for the given (exercise, position) pairs.
    /// Pairs naming exercises outside the routine are silently skipped; the
    /// caller is trusted to send a coherent permutation. Returns false when
    /// no such routine exists.
    pub async fn update_exercise_order(&self, routine_id: i32, orders: &[(i32, i32)]) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        let target: Option<i32> = sqlx::query_scalar("SELECT id FROM routines WHERE id = $1")
            .bind(routine_id)
            .fetch_optional(&mut *tx)
            .await?;

        if target.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        for &(exercise_id, exercise_order) in orders {
            sqlx::query(
                "UPDATE routine_exercise SET exercise_order = $1 WHERE routine_id = $2 AND exercise_id = $3",
            )
            .bind(exercise_order)
            .bind(routine_id)
            .bind(exercise_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(true)
    }

    /// Flip a routine to approved. Idempotent; returns false when no such
    /// routine exists.
    pub async fn approve(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("UPDATE routines SET approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append a reaction to the ledger. Only approved routines accept
    /// reactions; returns None when the target is missing or unapproved.
    pub async fn add_reaction(&self, routine_id: i32, is_like: bool) -> Result<Option<i32>> {
        let target: Option<i32> =
            sqlx::query_scalar("SELECT id FROM routines WHERE id = $1 AND approved")
                .bind(routine_id)
                .fetch_optional(&self.db)
                .await?;

        if target.is_none() {
            return Ok(None);
        }

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO routine_reactions (routine_id, is_like) VALUES ($1, $2) RETURNING id",
        )
        .bind(routine_id)
        .bind(is_like)
        .fetch_one(&self.db)
        .await?;

        Ok(Some(id))
    }

    /// Exercises of one routine, sorted by stored position.
    async fn fetch_routine_exercises(&self, routine_id: i32) -> Result<Vec<RoutineExerciseEntry>> {
        let entries = sqlx::query_as::<_, RoutineExerciseEntry>(
            r#"
            SELECT
                e.id, e.name, e.description, e.video_link, e.difficulty,
                re.sets, re.exercise_order,
                mg.name AS muscle_group_name
            FROM routine_exercise re
            JOIN exercises e ON re.exercise_id = e.id
            LEFT JOIN muscle_groups mg ON e.muscle_group_id = mg.id
            WHERE re.routine_id = $1
            ORDER BY re.exercise_order
            "#,
        )
        .bind(routine_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn assemble(&self, rows: Vec<RoutineRow>) -> Result<Vec<RoutineDetail>> {
        let mut routines = Vec::with_capacity(rows.len());
        for row in rows {
            let exercises = self.fetch_routine_exercises(row.id).await?;
            routines.push(row.with_exercises(exercises));
        }

        Ok(routines)
    }

    async fn assemble_admin(&self, rows: Vec<RoutineAdminRow>) -> Result<Vec<RoutineAdminDetail>> {
        let mut routines = Vec::with_capacity(rows.len());
        for row in rows {
            let exercises = self.fetch_routine_exercises(row.id).await?;
            routines.push(row.with_exercises(exercises));
        }

        Ok(routines)
    }
}

/// Insert routine entries with positions assigned from input order, starting
/// at 1.
async fn insert_routine_entries(
    tx: &mut Transaction<'_, Postgres>,
    routine_id: i32,
    entries: &[RoutineExerciseInput],
) -> Result<()> {
    for (position, entry) in entries.iter().enumerate() {
        sqlx::query(
            "INSERT INTO routine_exercise (routine_id, exercise_id, sets, exercise_order) VALUES ($1, $2, $3, $4)",
        )
        .bind(routine_id)
        .bind(entry.exercise_id)
        .bind(entry.sets)
        .bind(position as i32 + 1)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

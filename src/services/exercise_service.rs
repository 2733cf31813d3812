use std::collections::HashMap;

use anyhow::Result;
use sqlx::PgPool;

use crate::models::{
    ExerciseRow, ExerciseWithDetails, NewExercise, ReactionCounts, UpdateExerciseRequest,
};

/// Column list shared by every exercise read path: the core columns plus the
/// joined muscle group name and the reaction counts.
const EXERCISE_SELECT: &str = r#"
    SELECT
        e.id, e.name, e.description, e.video_link, e.difficulty,
        e.muscle_group_id, e.approved, e.rank,
        mg.name AS muscle_group_name,
        (SELECT COUNT(*) FROM exercise_reactions WHERE exercise_id = e.id AND is_like) AS likes,
        (SELECT COUNT(*) FROM exercise_reactions WHERE exercise_id = e.id AND NOT is_like) AS dislikes
    FROM exercises e
    LEFT JOIN muscle_groups mg ON e.muscle_group_id = mg.id
"#;

/// Exercise catalog operations: public reads over approved entries, the
/// moderation view, writes and the reaction ledger.
#[derive(Clone)]
pub struct ExerciseService {
    db: PgPool,
}

impl ExerciseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Approved exercises, alphabetical by name.
    pub async fn list_approved(&self) -> Result<Vec<ExerciseWithDetails>> {
        let sql = format!("{EXERCISE_SELECT} WHERE e.approved ORDER BY e.name");
        let rows = sqlx::query_as::<_, ExerciseRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        self.attach_muscles(rows).await
    }

    /// A single approved exercise. Unapproved entries are invisible here.
    pub async fn get_approved(&self, id: i32) -> Result<Option<ExerciseWithDetails>> {
        let sql = format!("{EXERCISE_SELECT} WHERE e.id = $1 AND e.approved");
        let row = sqlx::query_as::<_, ExerciseRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => Ok(self.attach_muscles(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Approved exercises belonging to one muscle group. An unknown group id
    /// simply yields an empty list.
    pub async fn list_by_muscle_group(&self, muscle_group_id: i32) -> Result<Vec<ExerciseWithDetails>> {
        let sql = format!("{EXERCISE_SELECT} WHERE mg.id = $1 AND e.approved ORDER BY e.name");
        let rows = sqlx::query_as::<_, ExerciseRow>(&sql)
            .bind(muscle_group_id)
            .fetch_all(&self.db)
            .await?;

        self.attach_muscles(rows).await
    }

    /// Approved exercises whose name contains the given fragment.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<ExerciseWithDetails>> {
        let sql = format!("{EXERCISE_SELECT} WHERE e.name ILIKE $1 AND e.approved ORDER BY e.name");
        let rows = sqlx::query_as::<_, ExerciseRow>(&sql)
            .bind(format!("%{}%", name))
            .fetch_all(&self.db)
            .await?;

        self.attach_muscles(rows).await
    }

    /// Moderation view: every exercise regardless of approval, approved
    /// entries first, then alphabetical.
    pub async fn list_all_admin(&self) -> Result<Vec<ExerciseWithDetails>> {
        let sql = format!("{EXERCISE_SELECT} ORDER BY e.approved DESC, e.name");
        let rows = sqlx::query_as::<_, ExerciseRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        self.attach_muscles(rows).await
    }

    /// Reaction counts for an approved exercise. A missing or unapproved id
    /// yields zero counts rather than an error.
    pub async fn get_stats(&self, id: i32) -> Result<ReactionCounts> {
        let counts = sqlx::query_as::<_, ReactionCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_like) AS likes,
                COUNT(*) FILTER (WHERE NOT is_like) AS dislikes
            FROM exercise_reactions
            WHERE exercise_id = $1
              AND EXISTS (SELECT 1 FROM exercises WHERE id = $1 AND approved)
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(counts)
    }

    /// Insert an exercise and its muscle tags in one transaction. The entry
    /// starts unapproved no matter what the caller sent.
    pub async fn create(&self, new: &NewExercise) -> Result<i32> {
        let mut tx = self.db.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO exercises (name, description, video_link, difficulty, muscle_group_id, approved)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING id
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.video_link)
        .bind(&new.difficulty)
        .bind(new.muscle_group_id)
        .fetch_one(&mut *tx)
        .await?;

        for muscle_id in &new.muscle_ids {
            sqlx::query("INSERT INTO exercise_muscle (exercise_id, muscle_id) VALUES ($1, $2)")
                .bind(id)
                .bind(muscle_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(id)
    }

    /// Overwrite the writable columns. Returns false when no such exercise
    /// exists.
    pub async fn update(&self, id: i32, fields: &UpdateExerciseRequest) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE exercises SET name = $2, description = $3, muscle_group_id = $4, rank = $5 WHERE id = $1",
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.muscle_group_id)
        .bind(fields.rank)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an exercise together with its reactions and muscle tags.
    /// Returns false when no such exercise exists; the clears are rolled
    /// back in that case.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM exercise_reactions WHERE exercise_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM exercise_muscle WHERE exercise_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
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

    /// Flip an exercise to approved. Idempotent; returns false when no such
    /// exercise exists.
    pub async fn approve(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("UPDATE exercises SET approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append a reaction to the ledger. Only approved exercises accept
    /// reactions; returns None when the target is missing or unapproved.
    pub async fn add_reaction(&self, exercise_id: i32, is_like: bool) -> Result<Option<i32>> {
        let target: Option<i32> =
            sqlx::query_scalar("SELECT id FROM exercises WHERE id = $1 AND approved")
                .bind(exercise_id)
                .fetch_optional(&self.db)
                .await?;

        if target.is_none() {
            return Ok(None);
        }

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO exercise_reactions (exercise_id, is_like) VALUES ($1, $2) RETURNING id",
        )
        .bind(exercise_id)
        .bind(is_like)
        .fetch_one(&self.db)
        .await?;

        Ok(Some(id))
    }

    /// Fetch the muscle tags for the given rows in one batch query and merge
    /// them in.
    async fn attach_muscles(&self, rows: Vec<ExerciseRow>) -> Result<Vec<ExerciseWithDetails>> {
        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();

        let tags: Vec<(i32, String)> = if ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as(
                r#"
                SELECT em.exercise_id, m.name
                FROM exercise_muscle em
                JOIN muscles m ON em.muscle_id = m.id
                WHERE em.exercise_id = ANY($1)
                "#,
            )
            .bind(&ids)
            .fetch_all(&self.db)
            .await?
        };

        Ok(merge_muscle_names(rows, tags))
    }
}

/// Merge association rows into the fetched exercises. Exercises without tags
/// get an empty list.
fn merge_muscle_names(rows: Vec<ExerciseRow>, tags: Vec<(i32, String)>) -> Vec<ExerciseWithDetails> {
    let mut by_exercise: HashMap<i32, Vec<String>> = HashMap::new();
    for (exercise_id, name) in tags {
        by_exercise.entry(exercise_id).or_default().push(name);
    }

    rows.into_iter()
        .map(|row| {
            let muscles = by_exercise.remove(&row.id).unwrap_or_default();
            row.with_muscles(muscles)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, name: &str) -> ExerciseRow {
        ExerciseRow {
            id,
            name: name.to_string(),
            description: None,
            video_link: None,
            difficulty: "Beginner".to_string(),
            muscle_group_id: Some(1),
            approved: true,
            rank: None,
            muscle_group_name: Some("Legs".to_string()),
            likes: 0,
            dislikes: 0,
        }
    }

    #[test]
    fn merge_groups_tags_by_exercise() {
        let rows = vec![row(1, "Squat"), row(2, "Lunge")];
        let tags = vec![
            (1, "Quadriceps".to_string()),
            (2, "Glutes".to_string()),
            (1, "Hamstrings".to_string()),
        ];

        let merged = merge_muscle_names(rows, tags);

        assert_eq!(merged[0].muscles, vec!["Quadriceps", "Hamstrings"]);
        assert_eq!(merged[1].muscles, vec!["Glutes"]);
    }

    #[test]
    fn merge_leaves_untagged_exercises_empty() {
        let merged = merge_muscle_names(vec![row(3, "Plank")], Vec::new());

        assert_eq!(merged.len(), 1);
        assert!(merged[0].muscles.is_empty());
    }

    #[test]
    fn merge_preserves_row_order() {
        let rows = vec![row(9, "Row"), row(4, "Curl"), row(6, "Dip")];
        let merged = merge_muscle_names(rows, Vec::new());

        let ids: Vec<i32> = merged.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![9, 4, 6]);
    }
}

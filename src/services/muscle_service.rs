use anyhow::Result;
use sqlx::PgPool;

use crate::models::{Muscle, MuscleGroup};

/// Read-only access to the muscle taxonomy reference tables.
#[derive(Clone)]
pub struct MuscleService {
    db: PgPool,
}

impl MuscleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_muscle_groups(&self) -> Result<Vec<MuscleGroup>> {
        let groups = sqlx::query_as::<_, MuscleGroup>(
            "SELECT id, name FROM muscle_groups ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(groups)
    }

    pub async fn list_muscles(&self) -> Result<Vec<Muscle>> {
        let muscles = sqlx::query_as::<_, Muscle>("SELECT id, name FROM muscles ORDER BY name")
            .fetch_all(&self.db)
            .await?;

        Ok(muscles)
    }
}

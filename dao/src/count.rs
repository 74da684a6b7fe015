use ahash::{HashMap, HashMapExt};
use anyhow::Result;
use sd_db_postgresql::model::count::RelationCountModel as RelationCountPostgresModel;
use sd_db_sqlite::model::count::RelationCountModel as RelationCountSqliteModel;
use uuid::Uuid;

use crate::{project::ProjectDao, team::TeamDao, worker::WorkerDao, Db};

/// Totals shown on the dashboard.
pub struct DashboardCounts {
    teams: i64,
    workers: i64,
    projects: i64,
}

impl DashboardCounts {
    pub async fn db_select(db: &Db) -> Result<Self> {
        let (teams, workers, projects) = tokio::try_join!(
            TeamDao::db_count(db),
            WorkerDao::db_count(db),
            ProjectDao::db_count(db),
        )?;

        Ok(Self {
            teams,
            workers,
            projects,
        })
    }

    pub fn teams(&self) -> &i64 {
        &self.teams
    }

    pub fn workers(&self) -> &i64 {
        &self.workers
    }

    pub fn projects(&self) -> &i64 {
        &self.projects
    }
}

pub(crate) fn postgresdb_counts(models: &[RelationCountPostgresModel]) -> HashMap<Uuid, i64> {
    let mut counts = HashMap::with_capacity(models.len());
    for model in models {
        counts.insert(*model.id(), *model.count());
    }
    counts
}

pub(crate) fn sqlitedb_counts(models: &[RelationCountSqliteModel]) -> HashMap<Uuid, i64> {
    let mut counts = HashMap::with_capacity(models.len());
    for model in models {
        counts.insert(*model.id(), *model.count());
    }
    counts
}

#[cfg(test)]
mod tests {
    use crate::{team::TeamDao, testing, worker::WorkerDao};

    use super::DashboardCounts;

    #[tokio::test]
    async fn counts_each_entity() {
        let (_dir, db) = testing::sqlite_db().await;
        let lead = WorkerDao::new("lead", "hash", "Lea", "Lead", &None, &None, &None);
        lead.db_insert(&db).await.unwrap();
        WorkerDao::new("member", "hash", "Mem", "Ber", &None, &None, &None)
            .db_insert(&db)
            .await
            .unwrap();
        TeamDao::new("Core", &Some(*lead.id()))
            .db_insert(&db, &[*lead.id()], &[])
            .await
            .unwrap();

        let counts = DashboardCounts::db_select(&db).await.unwrap();
        assert_eq!(*counts.teams(), 1);
        assert_eq!(*counts.workers(), 2);
        assert_eq!(*counts.projects(), 0);

        let by_team = WorkerDao::db_count_many_by_team(&db).await.unwrap();
        assert_eq!(by_team.len(), 1);
        assert_eq!(by_team.values().copied().sum::<i64>(), 1);
    }
}

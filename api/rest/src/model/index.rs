use serde::Serialize;

#[derive(Serialize)]
pub struct IndexResJson {
    num_teams: i64,
    num_workers: i64,
    num_projects: i64,
}

impl IndexResJson {
    pub fn new(num_teams: &i64, num_workers: &i64, num_projects: &i64) -> Self {
        Self {
            num_teams: *num_teams,
            num_workers: *num_workers,
            num_projects: *num_projects,
        }
    }
}

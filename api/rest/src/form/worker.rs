use sd_dao::{position::PositionDao, team::TeamDao, worker::WorkerDao, Db};
use sd_error::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::{
    form,
    model::worker::{InsertOneWorkerReqJson, UpdateOneWorkerReqJson},
};

pub async fn clean_creation(db: &Db, data: &InsertOneWorkerReqJson) -> Result<(), Error> {
    let mut errors = form::derived_errors(data);
    check_username(db, &mut errors, data.username(), &None).await?;
    check_relations(db, &mut errors, data.position(), data.team()).await?;
    form::finish(errors)
}

pub async fn clean_update(
    db: &Db,
    worker_id: &Uuid,
    data: &UpdateOneWorkerReqJson,
) -> Result<(), Error> {
    let mut errors = form::derived_errors(data);
    check_username(db, &mut errors, data.username(), &Some(*worker_id)).await?;
    check_relations(db, &mut errors, data.position(), data.team()).await?;
    form::finish(errors)
}

async fn check_username(
    db: &Db,
    errors: &mut ValidationErrors,
    username: &str,
    worker_id: &Option<Uuid>,
) -> Result<(), Error> {
    if username.is_empty() {
        return Ok(());
    }

    if let Some(existing) = WorkerDao::db_select_by_username(db, username)
        .await
        .map_err(Error::internal)?
    {
        if Some(*existing.id()) != *worker_id {
            errors.add(
                "username",
                form::field_error("unique", "A user with that username already exists."),
            );
        }
    }

    Ok(())
}

async fn check_relations(
    db: &Db,
    errors: &mut ValidationErrors,
    position_id: &Option<Uuid>,
    team_id: &Option<Uuid>,
) -> Result<(), Error> {
    if let Some(position_id) = position_id {
        if PositionDao::db_select(db, position_id)
            .await
            .map_err(Error::internal)?
            .is_none()
        {
            errors.add("position", form::invalid_choice(position_id));
        }
    }

    if let Some(team_id) = team_id {
        if TeamDao::db_select(db, team_id)
            .await
            .map_err(Error::internal)?
            .is_none()
        {
            errors.add("team", form::invalid_choice(team_id));
        }
    }

    Ok(())
}

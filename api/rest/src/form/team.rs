use sd_dao::{eligibility::TeamPool, team::TeamDao, Db};
use sd_error::Error;
use uuid::Uuid;

use crate::{form, model::team::TeamReqJson};

pub struct TeamForm {
    team_lead_id: Uuid,
}

impl TeamForm {
    /// Validates a submission against the eligibility pools of `team_id`
    /// (`None` when creating). Nothing is accepted unless every field is valid.
    pub async fn clean(db: &Db, team_id: &Option<Uuid>, data: &TeamReqJson) -> Result<Self, Error> {
        let mut errors = form::derived_errors(data);
        let pool = TeamPool::db_select(db, team_id)
            .await
            .map_err(Error::internal)?;

        let team_lead_id = match data.team_lead() {
            Some(team_lead_id) => {
                if !pool.contains_worker(team_lead_id) {
                    errors.add("team_lead", form::invalid_choice(team_lead_id));
                } else if let Some(led_team) = TeamDao::db_select_by_team_lead_id(db, team_lead_id)
                    .await
                    .map_err(Error::internal)?
                {
                    if Some(*led_team.id()) != *team_id {
                        errors.add(
                            "team_lead",
                            form::field_error("unique", "This worker already leads another team."),
                        );
                    }
                }
                Some(*team_lead_id)
            }
            None => {
                errors.add("team_lead", form::required());
                None
            }
        };

        if let Some(member_id) = data
            .members()
            .iter()
            .find(|member_id| !pool.contains_worker(member_id))
        {
            errors.add("members", form::invalid_choice(member_id));
        }

        if let Some(project_id) = data
            .projects()
            .iter()
            .find(|project_id| !pool.contains_project(project_id))
        {
            errors.add("projects", form::invalid_choice(project_id));
        }

        form::finish(errors)?;

        match team_lead_id {
            Some(team_lead_id) => Ok(Self { team_lead_id }),
            None => Err(Error::BadRequest("Incomplete team form".to_owned())),
        }
    }

    pub fn team_lead_id(&self) -> &Uuid {
        &self.team_lead_id
    }
}

use chrono::NaiveDate;
use sd_dao::{
    project::ProjectPriority, project_type::ProjectTypeDao, team::TeamDao, Db,
};
use sd_error::Error;
use uuid::Uuid;

use crate::{form, model::project::ProjectReqJson, validation::validate_future_date};

pub struct ProjectForm {
    deadline: NaiveDate,
    priority: ProjectPriority,
    project_type_id: Uuid,
}

impl ProjectForm {
    /// `current_deadline` is the stored deadline when editing; an unchanged
    /// deadline is accepted even if it has passed.
    pub async fn clean(
        db: &Db,
        current_deadline: &Option<NaiveDate>,
        data: &ProjectReqJson,
    ) -> Result<Self, Error> {
        let mut errors = form::derived_errors(data);

        let deadline = match data.deadline() {
            Some(deadline) => {
                if current_deadline.as_ref() != Some(deadline) {
                    if let Err(err) = validate_future_date(deadline) {
                        errors.add("deadline", err);
                    }
                }
                Some(*deadline)
            }
            None => {
                errors.add("deadline", form::required());
                None
            }
        };

        let priority = match data.priority() {
            Some(priority) => match priority.parse::<ProjectPriority>() {
                Ok(priority) => Some(priority),
                Err(_) => {
                    errors.add(
                        "priority",
                        form::field_error(
                            "invalid_choice",
                            format!(
                                "Select a valid choice. {priority} is not one of the available choices."
                            ),
                        ),
                    );
                    None
                }
            },
            None => Some(ProjectPriority::default()),
        };

        let project_type_id = match data.project_type() {
            Some(project_type_id) => {
                if ProjectTypeDao::db_select(db, project_type_id)
                    .await
                    .map_err(Error::internal)?
                    .is_none()
                {
                    errors.add("project_type", form::invalid_choice(project_type_id));
                }
                Some(*project_type_id)
            }
            None => {
                errors.add("project_type", form::required());
                None
            }
        };

        if let Some(team_id) = data.team() {
            if TeamDao::db_select(db, team_id)
                .await
                .map_err(Error::internal)?
                .is_none()
            {
                errors.add("team", form::invalid_choice(team_id));
            }
        }

        form::finish(errors)?;

        match (deadline, priority, project_type_id) {
            (Some(deadline), Some(priority), Some(project_type_id)) => Ok(Self {
                deadline,
                priority,
                project_type_id,
            }),
            _ => Err(Error::BadRequest("Incomplete project form".to_owned())),
        }
    }

    pub fn deadline(&self) -> &NaiveDate {
        &self.deadline
    }

    pub fn priority(&self) -> &ProjectPriority {
        &self.priority
    }

    pub fn project_type_id(&self) -> &Uuid {
        &self.project_type_id
    }
}

use sd_dao::{position::PositionDao, Db};
use sd_error::Error;
use uuid::Uuid;

use crate::{form, model::position::PositionReqJson};

/// `position_id` is the position being edited, if any.
pub async fn clean(db: &Db, position_id: &Option<Uuid>, data: &PositionReqJson) -> Result<(), Error> {
    let mut errors = form::derived_errors(data);

    if let Some(existing) = PositionDao::db_select_by_name(db, data.name())
        .await
        .map_err(Error::internal)?
    {
        if Some(*existing.id()) != *position_id {
            errors.add(
                "name",
                form::field_error("unique", "Position with this name already exists."),
            );
        }
    }

    form::finish(errors)
}

use sd_error::Error;

use crate::{form, model::project_type::ProjectTypeReqJson};

pub fn clean(data: &ProjectTypeReqJson) -> Result<(), Error> {
    form::finish(form::derived_errors(data))
}

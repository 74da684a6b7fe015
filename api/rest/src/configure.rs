use actix_web::web;

use crate::service::{
    index::index_api, info::info_api, position::position_api, project::project_api,
    project_type::project_type_api, root::root_api, team::team_api, worker::worker_api,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(root_api).service(
        web::scope("/api/rest")
            .configure(index_api)
            .configure(info_api)
            .configure(project_type_api)
            .configure(team_api)
            .configure(worker_api)
            .configure(position_api)
            .configure(project_api),
    );
}

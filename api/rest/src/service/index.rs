use actix_web::{http::StatusCode, web, HttpResponse};
use sd_dao::count::DashboardCounts;

use crate::{
    context::ApiRestCtx,
    model::{index::IndexResJson, Response},
};

pub fn index_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/index", web::get().to(index));
}

async fn index(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let counts = match DashboardCounts::db_select(ctx.dao().db()).await {
        Ok(counts) => counts,
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    Response::data(
        &StatusCode::OK,
        &IndexResJson::new(counts.teams(), counts.workers(), counts.projects()),
    )
}

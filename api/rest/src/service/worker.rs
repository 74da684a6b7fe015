use actix_web::{http::StatusCode, web, HttpResponse};
use ahash::{HashMap, HashMapExt};
use anyhow::Result;
use sd_dao::{position::PositionDao, team::TeamDao, worker::WorkerDao, Db};
use sd_error::Error;
use uuid::Uuid;

use crate::{
    context::ApiRestCtx,
    form,
    model::{
        position::PositionResJson,
        team::TeamSummaryResJson,
        worker::{
            FindManyWorkerReqQuery, InsertOneWorkerReqJson, UpdateOneWorkerReqJson,
            WorkerDetailResJson, WorkerReqPath, WorkerResJson, WorkerSummaryResJson,
        },
        IdResJson, Response,
    },
};

pub fn worker_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/workers", web::get().to(find_many))
        .route("/worker", web::post().to(insert_one))
        .route("/worker/{worker_id}", web::get().to(find_one))
        .route("/worker/{worker_id}", web::put().to(update_one))
        .route("/worker/{worker_id}", web::delete().to(delete_one));
}

pub fn detail_path(id: &Uuid) -> String {
    format!("/api/rest/worker/{id}")
}

/// Position names by id, for rendering worker display names.
pub async fn position_names(db: &Db) -> Result<HashMap<Uuid, String>> {
    let positions = PositionDao::db_select_many(db, &true).await?;
    let mut names = HashMap::with_capacity(positions.len());
    for position in &positions {
        names.insert(*position.id(), position.name().to_owned());
    }
    Ok(names)
}

pub fn display_name(worker: &WorkerDao, position_names: &HashMap<Uuid, String>) -> String {
    worker.display_name(
        worker
            .position_id()
            .as_ref()
            .and_then(|id| position_names.get(id))
            .map(String::as_str),
    )
}

pub fn summary(worker: &WorkerDao, position_names: &HashMap<Uuid, String>) -> WorkerSummaryResJson {
    WorkerSummaryResJson::new(
        worker.id(),
        worker.username(),
        &display_name(worker, position_names),
    )
}

fn worker_res(worker: &WorkerDao, display_name: &str) -> WorkerResJson {
    WorkerResJson::new(
        worker.id(),
        worker.created_at(),
        worker.updated_at(),
        worker.username(),
        worker.first_name(),
        worker.last_name(),
        worker.email(),
        display_name,
        worker.position_id(),
        worker.team_id(),
    )
}

async fn find_many(
    ctx: web::Data<ApiRestCtx>,
    query: web::Query<FindManyWorkerReqQuery>,
) -> HttpResponse {
    let (workers, position_names) = match tokio::try_join!(
        WorkerDao::db_search(ctx.dao().db(), query.search()),
        position_names(ctx.dao().db())
    ) {
        Ok(data) => data,
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let mut workers_res = Vec::with_capacity(workers.len());
    for worker in &workers {
        workers_res.push(worker_res(worker, &display_name(worker, &position_names)));
    }

    Response::data(&StatusCode::OK, workers_res)
}

async fn find_one(ctx: web::Data<ApiRestCtx>, path: web::Path<WorkerReqPath>) -> HttpResponse {
    let worker_data = match WorkerDao::db_select(ctx.dao().db(), path.worker_id()).await {
        Ok(Some(data)) => data,
        Ok(None) => return worker_not_found(path.worker_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let position_data = match worker_data.position_id() {
        Some(position_id) => match PositionDao::db_select(ctx.dao().db(), position_id).await {
            Ok(data) => data,
            Err(err) => {
                return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
        },
        None => None,
    };

    let team_data = match worker_data.team_id() {
        Some(team_id) => match TeamDao::db_select(ctx.dao().db(), team_id).await {
            Ok(data) => data,
            Err(err) => {
                return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
        },
        None => None,
    };

    let display_name = worker_data.display_name(position_data.as_ref().map(|p| p.name()));

    Response::data(
        &StatusCode::OK,
        &WorkerDetailResJson::new(
            worker_res(&worker_data, &display_name),
            position_data.map(|position| {
                PositionResJson::new(
                    position.id(),
                    position.created_at(),
                    position.updated_at(),
                    position.name(),
                    position.is_admin(),
                )
            }),
            team_data.map(|team| TeamSummaryResJson::new(team.id(), team.name())),
        ),
    )
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<InsertOneWorkerReqJson>,
) -> HttpResponse {
    if let Err(err) = form::worker::clean_creation(ctx.dao().db(), &data).await {
        return Response::error(&err);
    }

    let password_hash = match ctx.hash().argon2().hash_password(data.password1()) {
        Ok(hash) => hash,
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let worker_data = WorkerDao::new(
        data.username(),
        &password_hash,
        data.first_name(),
        data.last_name(),
        data.email(),
        data.position(),
        data.team(),
    );

    if let Err(err) = worker_data.db_insert(ctx.dao().db()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    sd_log::info(None, format!("[ApiRestServer] Worker {} created", worker_data.id()));

    Response::redirect(
        &detail_path(worker_data.id()),
        IdResJson::new(worker_data.id()),
    )
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<WorkerReqPath>,
    data: web::Json<UpdateOneWorkerReqJson>,
) -> HttpResponse {
    let mut worker_data = match WorkerDao::db_select(ctx.dao().db(), path.worker_id()).await {
        Ok(Some(data)) => data,
        Ok(None) => return worker_not_found(path.worker_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    if let Err(err) = form::worker::clean_update(ctx.dao().db(), path.worker_id(), &data).await {
        return Response::error(&err);
    }

    worker_data.set_username(data.username());
    worker_data.set_first_name(data.first_name());
    worker_data.set_last_name(data.last_name());
    worker_data.set_email(data.email());
    worker_data.set_position_id(data.position());
    worker_data.set_team_id(data.team());

    if let Err(err) = worker_data.db_update(ctx.dao().db()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(
        &detail_path(worker_data.id()),
        IdResJson::new(worker_data.id()),
    )
}

async fn delete_one(ctx: web::Data<ApiRestCtx>, path: web::Path<WorkerReqPath>) -> HttpResponse {
    match WorkerDao::db_select(ctx.dao().db(), path.worker_id()).await {
        Ok(Some(_)) => (),
        Ok(None) => return worker_not_found(path.worker_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }

    if let Err(err) = WorkerDao::db_delete(ctx.dao().db(), path.worker_id()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect("/api/rest/workers", IdResJson::new(path.worker_id()))
}

fn worker_not_found(id: &Uuid) -> HttpResponse {
    Response::error(&Error::NotFound(format!("Worker {id} not found")))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::{configure::configure, service::testing};

    #[actix_web::test]
    async fn create_search_and_delete_worker() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/position")
            .set_json(json!({ "name": "Developer" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        let position_id = testing::body(res).await["data"]["id"].clone();

        let req = test::TestRequest::post()
            .uri("/api/rest/worker")
            .set_json(json!({
                "username": "asmith",
                "password1": "s3cret-pass",
                "password2": "s3cret-pass",
                "first_name": "Ann",
                "last_name": "Smith",
                "email": "ann@example.com",
                "position": position_id,
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let location = testing::location(&res);

        let req = test::TestRequest::get().uri(&location).to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["worker"]["display_name"], "Ann Smith (Developer)");
        assert_eq!(body["data"]["position"]["name"], "Developer");
        assert!(body["data"]["worker"].get("password_hash").is_none());

        let req = test::TestRequest::get()
            .uri("/api/rest/workers?search=smith%20ann")
            .to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/rest/workers?search=a%20b%20c%20d")
            .to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert!(body["data"].as_array().unwrap().is_empty());

        let req = test::TestRequest::delete().uri(&location).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(testing::location(&res), "/api/rest/workers");

        let req = test::TestRequest::get().uri(&location).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn rejects_mismatched_passwords_and_duplicate_username() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let worker = json!({
            "username": "bob",
            "password1": "one-password",
            "password2": "one-password",
        });
        let req = test::TestRequest::post()
            .uri("/api/rest/worker")
            .set_json(&worker)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::SEE_OTHER
        );

        let req = test::TestRequest::post()
            .uri("/api/rest/worker")
            .set_json(json!({
                "username": "bob",
                "password1": "one-password",
                "password2": "another-password",
                "email": "not-an-email",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let fields = testing::body(res).await["error"]["fields"].clone();
        assert!(fields.get("username").is_some());
        assert!(fields.get("password2").is_some());
        assert!(fields.get("email").is_some());
    }
}

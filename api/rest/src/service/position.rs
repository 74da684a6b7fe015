use actix_web::{http::StatusCode, web, HttpResponse};
use sd_dao::{position::PositionDao, worker::WorkerDao};
use sd_error::Error;
use uuid::Uuid;

use crate::{
    context::ApiRestCtx,
    form,
    model::{
        position::{
            PositionDetailResJson, PositionListItemResJson, PositionReqJson, PositionReqPath,
            PositionResJson,
        },
        worker::WorkerSummaryResJson,
        IdResJson, Response,
    },
};

pub fn position_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/positions", web::get().to(find_many))
        .route("/position", web::post().to(insert_one))
        .route("/position/{position_id}", web::get().to(find_one))
        .route("/position/{position_id}", web::put().to(update_one))
        .route("/position/{position_id}", web::delete().to(delete_one));
}

fn detail_path(id: &Uuid) -> String {
    format!("/api/rest/position/{id}")
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let (positions, worker_counts) = match tokio::try_join!(
        PositionDao::db_select_many(ctx.dao().db(), &false),
        WorkerDao::db_count_many_by_position(ctx.dao().db())
    ) {
        Ok(data) => data,
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    Response::data(
        &StatusCode::OK,
        positions
            .iter()
            .map(|position| {
                PositionListItemResJson::new(
                    position.id(),
                    position.name(),
                    worker_counts.get(position.id()).unwrap_or(&0),
                )
            })
            .collect::<Vec<_>>(),
    )
}

async fn find_one(ctx: web::Data<ApiRestCtx>, path: web::Path<PositionReqPath>) -> HttpResponse {
    let (position_data, workers) = match tokio::try_join!(
        PositionDao::db_select(ctx.dao().db(), path.position_id()),
        WorkerDao::db_select_many_by_position_id(ctx.dao().db(), path.position_id())
    ) {
        Ok((Some(position_data), workers)) => (position_data, workers),
        Ok((None, _)) => return position_not_found(path.position_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    Response::data(
        &StatusCode::OK,
        PositionDetailResJson::new(
            PositionResJson::new(
                position_data.id(),
                position_data.created_at(),
                position_data.updated_at(),
                position_data.name(),
                position_data.is_admin(),
            ),
            workers
                .iter()
                .map(|worker| {
                    WorkerSummaryResJson::new(
                        worker.id(),
                        worker.username(),
                        &worker.display_name(Some(position_data.name())),
                    )
                })
                .collect(),
        ),
    )
}

async fn insert_one(ctx: web::Data<ApiRestCtx>, data: web::Json<PositionReqJson>) -> HttpResponse {
    if let Err(err) = form::position::clean(ctx.dao().db(), &None, &data).await {
        return Response::error(&err);
    }

    let position_data = PositionDao::new(data.name(), data.is_admin());
    if let Err(err) = position_data.db_insert(ctx.dao().db()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(
        &detail_path(position_data.id()),
        IdResJson::new(position_data.id()),
    )
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<PositionReqPath>,
    data: web::Json<PositionReqJson>,
) -> HttpResponse {
    let mut position_data = match PositionDao::db_select(ctx.dao().db(), path.position_id()).await
    {
        Ok(Some(data)) => data,
        Ok(None) => return position_not_found(path.position_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    if let Err(err) = form::position::clean(ctx.dao().db(), &Some(*path.position_id()), &data).await
    {
        return Response::error(&err);
    }

    position_data.set_name(data.name());
    position_data.set_is_admin(data.is_admin());

    if let Err(err) = position_data.db_update(ctx.dao().db()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(
        &detail_path(position_data.id()),
        IdResJson::new(position_data.id()),
    )
}

async fn delete_one(ctx: web::Data<ApiRestCtx>, path: web::Path<PositionReqPath>) -> HttpResponse {
    match PositionDao::db_select(ctx.dao().db(), path.position_id()).await {
        Ok(Some(_)) => (),
        Ok(None) => return position_not_found(path.position_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }

    if let Err(err) = PositionDao::db_delete(ctx.dao().db(), path.position_id()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect("/api/rest/positions", IdResJson::new(path.position_id()))
}

fn position_not_found(id: &Uuid) -> HttpResponse {
    Response::error(&Error::NotFound(format!("Position {id} not found")))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::{configure::configure, service::testing};

    #[actix_web::test]
    async fn list_hides_admin_positions_and_counts_workers() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/position")
            .set_json(json!({ "name": "Manager", "is_admin": true }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::SEE_OTHER
        );

        let req = test::TestRequest::post()
            .uri("/api/rest/position")
            .set_json(json!({ "name": "Tester" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        let location = testing::location(&res);
        let position_id = testing::body(res).await["data"]["id"].clone();

        let req = test::TestRequest::post()
            .uri("/api/rest/worker")
            .set_json(json!({
                "username": "tina",
                "password1": "tina-password",
                "password2": "tina-password",
                "position": position_id,
            }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/rest/positions")
            .to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        let positions = body["data"].as_array().unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0]["name"], "Tester");
        assert_eq!(positions[0]["worker_count"], 1);

        let req = test::TestRequest::get().uri(&location).to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["workers"][0]["username"], "tina");
    }

    #[actix_web::test]
    async fn rejects_special_characters_and_duplicates() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/position")
            .set_json(json!({ "name": "Dev@ops" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            testing::body(res).await["error"]["fields"]["name"][0],
            "Name cannot contain special characters"
        );

        let req = test::TestRequest::post()
            .uri("/api/rest/position")
            .set_json(json!({ "name": "Designer" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/position")
            .set_json(json!({ "name": "Designer" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(testing::body(res).await["error"]["fields"]["name"].is_array());
    }

    #[actix_web::test]
    async fn unknown_position_is_not_found() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::delete()
            .uri("/api/rest/position/7f1a4a4e-54a3-4c1f-9ac4-1f6f1e0c2f6d")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

use actix_web::{http::StatusCode, web, HttpResponse};
use sd_dao::{project::ProjectDao, project_type::ProjectTypeDao};
use sd_error::Error;
use uuid::Uuid;

use crate::{
    context::ApiRestCtx,
    form,
    model::{
        project_type::{
            ProjectTypeDetailResJson, ProjectTypeListItemResJson, ProjectTypeReqJson,
            ProjectTypeReqPath, ProjectTypeResJson,
        },
        IdResJson, Response,
    },
    service::project::project_res,
};

pub fn project_type_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/project_types", web::get().to(find_many))
        .route("/project_type", web::post().to(insert_one))
        .route("/project_type/{project_type_id}", web::get().to(find_one))
        .route("/project_type/{project_type_id}", web::put().to(update_one))
        .route("/project_type/{project_type_id}", web::delete().to(delete_one));
}

fn detail_path(id: &Uuid) -> String {
    format!("/api/rest/project_type/{id}")
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let (project_types, project_counts) = match tokio::try_join!(
        ProjectTypeDao::db_select_many(ctx.dao().db()),
        ProjectDao::db_count_many_by_project_type(ctx.dao().db())
    ) {
        Ok(data) => data,
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    Response::data(
        &StatusCode::OK,
        project_types
            .iter()
            .map(|project_type| {
                ProjectTypeListItemResJson::new(
                    project_type.id(),
                    project_type.name(),
                    project_counts.get(project_type.id()).unwrap_or(&0),
                )
            })
            .collect::<Vec<_>>(),
    )
}

async fn find_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<ProjectTypeReqPath>,
) -> HttpResponse {
    let (project_type_data, projects) = match tokio::try_join!(
        ProjectTypeDao::db_select(ctx.dao().db(), path.project_type_id()),
        ProjectDao::db_select_many_by_project_type_id(ctx.dao().db(), path.project_type_id())
    ) {
        Ok((Some(project_type_data), projects)) => (project_type_data, projects),
        Ok((None, _)) => return project_type_not_found(path.project_type_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    Response::data(
        &StatusCode::OK,
        ProjectTypeDetailResJson::new(
            ProjectTypeResJson::new(
                project_type_data.id(),
                project_type_data.created_at(),
                project_type_data.updated_at(),
                project_type_data.name(),
            ),
            projects.iter().map(project_res).collect(),
        ),
    )
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<ProjectTypeReqJson>,
) -> HttpResponse {
    if let Err(err) = form::project_type::clean(&data) {
        return Response::error(&err);
    }

    let project_type_data = ProjectTypeDao::new(data.name());
    if let Err(err) = project_type_data.db_insert(ctx.dao().db()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(
        &detail_path(project_type_data.id()),
        IdResJson::new(project_type_data.id()),
    )
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<ProjectTypeReqPath>,
    data: web::Json<ProjectTypeReqJson>,
) -> HttpResponse {
    let mut project_type_data =
        match ProjectTypeDao::db_select(ctx.dao().db(), path.project_type_id()).await {
            Ok(Some(data)) => data,
            Ok(None) => return project_type_not_found(path.project_type_id()),
            Err(err) => {
                return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
        };

    if let Err(err) = form::project_type::clean(&data) {
        return Response::error(&err);
    }

    project_type_data.set_name(data.name());

    if let Err(err) = project_type_data.db_update(ctx.dao().db()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(
        &detail_path(project_type_data.id()),
        IdResJson::new(project_type_data.id()),
    )
}

async fn delete_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<ProjectTypeReqPath>,
) -> HttpResponse {
    match ProjectTypeDao::db_select(ctx.dao().db(), path.project_type_id()).await {
        Ok(Some(_)) => (),
        Ok(None) => return project_type_not_found(path.project_type_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }

    if let Err(err) = ProjectTypeDao::db_delete(ctx.dao().db(), path.project_type_id()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(
        "/api/rest/project_types",
        IdResJson::new(path.project_type_id()),
    )
}

fn project_type_not_found(id: &Uuid) -> HttpResponse {
    Response::error(&Error::NotFound(format!("Project type {id} not found")))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::{configure::configure, service::testing};

    #[actix_web::test]
    async fn deleting_project_type_removes_its_projects() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/project_type")
            .set_json(json!({ "name": "Research" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        let location = testing::location(&res);
        let project_type_id = testing::body(res).await["data"]["id"].clone();

        let req = test::TestRequest::post()
            .uri("/api/rest/project")
            .set_json(json!({
                "name": "Prototype",
                "deadline": "2999-12-31",
                "project_type": project_type_id,
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::SEE_OTHER
        );

        let req = test::TestRequest::get()
            .uri("/api/rest/project_types")
            .to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"][0]["project_count"], 1);

        let req = test::TestRequest::get().uri(&location).to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["projects"][0]["name"], "Prototype");

        let req = test::TestRequest::delete().uri(&location).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(testing::location(&res), "/api/rest/project_types");

        let req = test::TestRequest::get().uri("/api/rest/projects").to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn blank_name_is_required() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/project_type")
            .set_json(json!({ "name": "" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            testing::body(res).await["error"]["fields"]["name"][0],
            "This field is required."
        );
    }
}

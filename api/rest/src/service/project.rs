use actix_web::{http::StatusCode, web, HttpResponse};
use sd_dao::{project::ProjectDao, project_type::ProjectTypeDao, team::TeamDao};
use sd_error::Error;
use uuid::Uuid;

use crate::{
    context::ApiRestCtx,
    form::project::ProjectForm,
    model::{
        project::{
            FindManyProjectReqQuery, ProjectDetailResJson, ProjectReqJson, ProjectReqPath,
            ProjectResJson,
        },
        project_type::ProjectTypeResJson,
        team::TeamSummaryResJson,
        IdResJson, Response,
    },
};

pub fn project_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/projects", web::get().to(find_many))
        .route("/project", web::post().to(insert_one))
        .route("/project/{project_id}", web::get().to(find_one))
        .route("/project/{project_id}", web::put().to(update_one))
        .route("/project/{project_id}", web::delete().to(delete_one));
}

fn detail_path(id: &Uuid) -> String {
    format!("/api/rest/project/{id}")
}

pub fn project_res(project: &ProjectDao) -> ProjectResJson {
    ProjectResJson::new(
        project.id(),
        project.created_at(),
        project.updated_at(),
        project.name(),
        project.description(),
        project.deadline(),
        project.is_completed(),
        project.priority(),
        project.project_type_id(),
        project.team_id(),
    )
}

async fn find_many(
    ctx: web::Data<ApiRestCtx>,
    query: web::Query<FindManyProjectReqQuery>,
) -> HttpResponse {
    match ProjectDao::db_select_many_by_name(ctx.dao().db(), query.name()).await {
        Ok(projects) => Response::data(
            &StatusCode::OK,
            projects.iter().map(project_res).collect::<Vec<_>>(),
        ),
        Err(err) => Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

async fn find_one(ctx: web::Data<ApiRestCtx>, path: web::Path<ProjectReqPath>) -> HttpResponse {
    let project_data = match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(Some(data)) => data,
        Ok(None) => return project_not_found(path.project_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let project_type_data =
        match ProjectTypeDao::db_select(ctx.dao().db(), project_data.project_type_id()).await {
            Ok(data) => data,
            Err(err) => {
                return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
        };

    let team_data = match project_data.team_id() {
        Some(team_id) => match TeamDao::db_select(ctx.dao().db(), team_id).await {
            Ok(data) => data,
            Err(err) => {
                return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
        },
        None => None,
    };

    Response::data(
        &StatusCode::OK,
        ProjectDetailResJson::new(
            project_res(&project_data),
            project_type_data.map(|project_type| {
                ProjectTypeResJson::new(
                    project_type.id(),
                    project_type.created_at(),
                    project_type.updated_at(),
                    project_type.name(),
                )
            }),
            team_data.map(|team| TeamSummaryResJson::new(team.id(), team.name())),
        ),
    )
}

async fn insert_one(ctx: web::Data<ApiRestCtx>, data: web::Json<ProjectReqJson>) -> HttpResponse {
    let form = match ProjectForm::clean(ctx.dao().db(), &None, &data).await {
        Ok(form) => form,
        Err(err) => return Response::error(&err),
    };

    let project_data = ProjectDao::new(
        data.name(),
        data.description(),
        form.deadline(),
        data.is_completed(),
        form.priority(),
        form.project_type_id(),
        data.team(),
    );

    if let Err(err) = project_data.db_insert(ctx.dao().db()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(
        &detail_path(project_data.id()),
        IdResJson::new(project_data.id()),
    )
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<ProjectReqPath>,
    data: web::Json<ProjectReqJson>,
) -> HttpResponse {
    let mut project_data = match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(Some(data)) => data,
        Ok(None) => return project_not_found(path.project_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let form =
        match ProjectForm::clean(ctx.dao().db(), &Some(*project_data.deadline()), &data).await {
            Ok(form) => form,
            Err(err) => return Response::error(&err),
        };

    project_data.set_name(data.name());
    project_data.set_description(data.description());
    project_data.set_deadline(form.deadline());
    project_data.set_is_completed(data.is_completed());
    project_data.set_priority(form.priority());
    project_data.set_project_type_id(form.project_type_id());
    project_data.set_team_id(data.team());

    if let Err(err) = project_data.db_update(ctx.dao().db()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(
        &detail_path(project_data.id()),
        IdResJson::new(project_data.id()),
    )
}

async fn delete_one(ctx: web::Data<ApiRestCtx>, path: web::Path<ProjectReqPath>) -> HttpResponse {
    match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(Some(_)) => (),
        Ok(None) => return project_not_found(path.project_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }

    if let Err(err) = ProjectDao::db_delete(ctx.dao().db(), path.project_id()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect("/api/rest/projects", IdResJson::new(path.project_id()))
}

fn project_not_found(id: &Uuid) -> HttpResponse {
    Response::error(&Error::NotFound(format!("Project {id} not found")))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use chrono::{Days, Utc};
    use serde_json::json;

    use crate::{configure::configure, service::testing};

    fn future_deadline(days: u64) -> String {
        (Utc::now().date_naive() + Days::new(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[actix_web::test]
    async fn projects_are_listed_by_priority_and_filtered_by_name() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/project_type")
            .set_json(json!({ "name": "Internal" }))
            .to_request();
        let project_type_id = testing::body(test::call_service(&app, req).await).await["data"]
            ["id"]
            .clone();

        for (name, priority) in [("Payroll", "low"), ("Billing", "critical"), ("Intranet", "high")] {
            let req = test::TestRequest::post()
                .uri("/api/rest/project")
                .set_json(json!({
                    "name": name,
                    "deadline": future_deadline(7),
                    "priority": priority,
                    "project_type": project_type_id,
                }))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
        }

        let req = test::TestRequest::get().uri("/api/rest/projects").to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        let names: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|project| project["name"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, ["Billing", "Intranet", "Payroll"]);
        assert_eq!(body["data"][0]["priority"], "critical");
        assert_eq!(body["data"][0]["priority_label"], "Critical");

        let req = test::TestRequest::get()
            .uri("/api/rest/projects?name=PAY")
            .to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], "Payroll");
    }

    #[actix_web::test]
    async fn rejects_past_deadline_and_missing_project_type() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/project")
            .set_json(json!({
                "name": "Archive",
                "deadline": "2000-01-01",
                "priority": "urgent",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let fields = testing::body(res).await["error"]["fields"].clone();
        assert_eq!(fields["deadline"][0], "Deadline cannot be in the past");
        assert_eq!(fields["project_type"][0], "This field is required.");
        assert!(fields["priority"].is_array());
    }

    #[actix_web::test]
    async fn update_keeps_unchanged_deadline() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rest/project_type")
            .set_json(json!({ "name": "Client" }))
            .to_request();
        let project_type_id = testing::body(test::call_service(&app, req).await).await["data"]
            ["id"]
            .clone();

        let deadline = future_deadline(1);
        let req = test::TestRequest::post()
            .uri("/api/rest/project")
            .set_json(json!({
                "name": "Website",
                "deadline": deadline,
                "project_type": project_type_id,
            }))
            .to_request();
        let location = testing::location(&test::call_service(&app, req).await);

        let req = test::TestRequest::put()
            .uri(&location)
            .set_json(json!({
                "name": "Website relaunch",
                "deadline": deadline,
                "is_completed": true,
                "project_type": project_type_id,
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(testing::location(&res), location);

        let req = test::TestRequest::get().uri(&location).to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["project"]["name"], "Website relaunch");
        assert_eq!(body["data"]["project"]["is_completed"], true);
        assert_eq!(body["data"]["project"]["priority"], "medium");
        assert_eq!(body["data"]["project_type"]["name"], "Client");
    }
}

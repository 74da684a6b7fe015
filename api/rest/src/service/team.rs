use actix_web::{http::StatusCode, web, HttpResponse};
use futures::future::try_join_all;
use sd_dao::{
    eligibility::TeamPool, project::ProjectDao, team::TeamDao, worker::WorkerDao,
};
use sd_error::Error;
use uuid::Uuid;

use crate::{
    context::ApiRestCtx,
    form::team::TeamForm,
    model::{
        team::{
            TeamDetailResJson, TeamFormInitialResJson, TeamFormResJson, TeamListItemResJson,
            TeamReqJson, TeamReqPath,
        },
        IdResJson, Response,
    },
    service::{
        project::project_res,
        worker::{position_names, summary},
    },
};

pub fn team_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/teams", web::get().to(find_many))
        .route("/team/form", web::get().to(creation_form))
        .route("/team", web::post().to(insert_one))
        .route("/team/{team_id}/form", web::get().to(update_form))
        .route("/team/{team_id}", web::get().to(find_one))
        .route("/team/{team_id}", web::put().to(update_one))
        .route("/team/{team_id}", web::delete().to(delete_one));
}

fn detail_path(id: &Uuid) -> String {
    format!("/api/rest/team/{id}")
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let db = ctx.dao().db();
    let (teams, member_counts, position_names) = match tokio::try_join!(
        TeamDao::db_select_many(db),
        WorkerDao::db_count_many_by_team(db),
        position_names(db)
    ) {
        Ok(data) => data,
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let leads = match try_join_all(teams.iter().map(|team| async move {
        match team.team_lead_id() {
            Some(team_lead_id) => WorkerDao::db_select(db, team_lead_id).await,
            None => Ok(None),
        }
    }))
    .await
    {
        Ok(leads) => leads,
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    Response::data(
        &StatusCode::OK,
        teams
            .iter()
            .zip(leads.iter())
            .map(|(team, lead)| {
                TeamListItemResJson::new(
                    team.id(),
                    team.name(),
                    lead.as_ref().map(|lead| summary(lead, &position_names)),
                    member_counts.get(team.id()).unwrap_or(&0),
                )
            })
            .collect::<Vec<_>>(),
    )
}

async fn find_one(ctx: web::Data<ApiRestCtx>, path: web::Path<TeamReqPath>) -> HttpResponse {
    let db = ctx.dao().db();
    let (team_data, members, projects, position_names) = match tokio::try_join!(
        TeamDao::db_select(db, path.team_id()),
        WorkerDao::db_select_many_by_team_id(db, path.team_id()),
        ProjectDao::db_select_many_by_team_id(db, path.team_id()),
        position_names(db)
    ) {
        Ok((Some(team_data), members, projects, position_names)) => {
            (team_data, members, projects, position_names)
        }
        Ok((None, _, _, _)) => return team_not_found(path.team_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let lead = match team_data.team_lead_id() {
        Some(team_lead_id) => match WorkerDao::db_select(db, team_lead_id).await {
            Ok(lead) => lead,
            Err(err) => {
                return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
        },
        None => None,
    };

    Response::data(
        &StatusCode::OK,
        TeamDetailResJson::new(
            team_data.id(),
            team_data.created_at(),
            team_data.updated_at(),
            team_data.name(),
            lead.as_ref().map(|lead| summary(lead, &position_names)),
            members
                .iter()
                .map(|member| summary(member, &position_names))
                .collect(),
            projects.iter().map(project_res).collect(),
        ),
    )
}

async fn creation_form(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    form_res(&ctx, &None, None).await
}

async fn update_form(ctx: web::Data<ApiRestCtx>, path: web::Path<TeamReqPath>) -> HttpResponse {
    let db = ctx.dao().db();
    let (team_data, members, projects) = match tokio::try_join!(
        TeamDao::db_select(db, path.team_id()),
        WorkerDao::db_select_many_by_team_id(db, path.team_id()),
        ProjectDao::db_select_many_by_team_id(db, path.team_id())
    ) {
        Ok((Some(team_data), members, projects)) => (team_data, members, projects),
        Ok((None, _, _)) => return team_not_found(path.team_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let member_ids: Vec<Uuid> = members.iter().map(|member| *member.id()).collect();
    let project_ids: Vec<Uuid> = projects.iter().map(|project| *project.id()).collect();

    form_res(
        &ctx,
        &Some(*team_data.id()),
        Some(TeamFormInitialResJson::new(
            team_data.name(),
            team_data.team_lead_id(),
            &member_ids,
            &project_ids,
        )),
    )
    .await
}

async fn form_res(
    ctx: &ApiRestCtx,
    team_id: &Option<Uuid>,
    initial: Option<TeamFormInitialResJson>,
) -> HttpResponse {
    let db = ctx.dao().db();
    let (pool, position_names) =
        match tokio::try_join!(TeamPool::db_select(db, team_id), position_names(db)) {
            Ok(data) => data,
            Err(err) => {
                return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
        };

    Response::data(
        &StatusCode::OK,
        TeamFormResJson::new(
            pool.workers()
                .iter()
                .map(|worker| summary(worker, &position_names))
                .collect(),
            &pool.workers_message(),
            pool.projects().iter().map(project_res).collect(),
            &pool.projects_message(),
            initial,
        ),
    )
}

async fn insert_one(ctx: web::Data<ApiRestCtx>, data: web::Json<TeamReqJson>) -> HttpResponse {
    let form = match TeamForm::clean(ctx.dao().db(), &None, &data).await {
        Ok(form) => form,
        Err(err) => return Response::error(&err),
    };

    let team_data = TeamDao::new(data.name(), &Some(*form.team_lead_id()));
    if let Err(err) = team_data
        .db_insert(ctx.dao().db(), data.members(), data.projects())
        .await
    {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    sd_log::info(None, format!("[ApiRestServer] Team {} created", team_data.id()));

    Response::redirect(&detail_path(team_data.id()), IdResJson::new(team_data.id()))
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<TeamReqPath>,
    data: web::Json<TeamReqJson>,
) -> HttpResponse {
    let mut team_data = match TeamDao::db_select(ctx.dao().db(), path.team_id()).await {
        Ok(Some(data)) => data,
        Ok(None) => return team_not_found(path.team_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    };

    let form = match TeamForm::clean(ctx.dao().db(), &Some(*path.team_id()), &data).await {
        Ok(form) => form,
        Err(err) => return Response::error(&err),
    };

    team_data.set_name(data.name());
    team_data.set_team_lead_id(&Some(*form.team_lead_id()));

    if let Err(err) = team_data
        .db_update(ctx.dao().db(), data.members(), data.projects())
        .await
    {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect(&detail_path(team_data.id()), IdResJson::new(team_data.id()))
}

async fn delete_one(ctx: web::Data<ApiRestCtx>, path: web::Path<TeamReqPath>) -> HttpResponse {
    match TeamDao::db_select(ctx.dao().db(), path.team_id()).await {
        Ok(Some(_)) => (),
        Ok(None) => return team_not_found(path.team_id()),
        Err(err) => {
            return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }

    if let Err(err) = TeamDao::db_delete(ctx.dao().db(), path.team_id()).await {
        return Response::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
    }

    Response::redirect("/api/rest/teams", IdResJson::new(path.team_id()))
}

fn team_not_found(id: &Uuid) -> HttpResponse {
    Response::error(&Error::NotFound(format!("Team {id} not found")))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::{configure::configure, service::testing};

    fn worker(username: &str) -> Value {
        json!({
            "username": username,
            "password1": "team-password",
            "password2": "team-password",
            "first_name": username,
            "last_name": "Doe",
        })
    }

    #[actix_web::test]
    async fn empty_form_reports_no_available_choices() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/rest/team/form").to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["workers_message"], "No available workers");
        assert_eq!(body["data"]["projects_message"], "No available projects");
    }

    #[actix_web::test]
    async fn members_of_another_team_are_not_eligible() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let mut ids = Vec::new();
        for username in ["ann", "ben", "cal"] {
            let req = test::TestRequest::post()
                .uri("/api/rest/worker")
                .set_json(worker(username))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
            ids.push(testing::body(res).await["data"]["id"].clone());
        }
        let (ann, ben, cal) = (&ids[0], &ids[1], &ids[2]);

        let req = test::TestRequest::post()
            .uri("/api/rest/team")
            .set_json(json!({ "name": "Alpha", "team_lead": ann, "members": [ben] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let location = testing::location(&res);

        let req = test::TestRequest::post()
            .uri("/api/rest/team")
            .set_json(json!({ "name": "Beta", "team_lead": ben, "members": [cal] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let fields = testing::body(res).await["error"]["fields"].clone();
        assert_eq!(
            fields["team_lead"][0],
            format!(
                "Select a valid choice. {} is not one of the available choices.",
                ben.as_str().unwrap()
            )
        );
        assert!(fields.get("members").is_none());

        let req = test::TestRequest::post()
            .uri("/api/rest/team")
            .set_json(json!({ "name": "Gamma", "team_lead": ann }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let fields = testing::body(res).await["error"]["fields"].clone();
        assert_eq!(fields["team_lead"][0], "This worker already leads another team.");

        let req = test::TestRequest::get().uri(&location).to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["team_lead"]["username"], "ann");
        assert_eq!(body["data"]["members"][0]["username"], "ben");

        let req = test::TestRequest::get()
            .uri(&format!("{location}/form"))
            .to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(&body["data"]["initial"]["members"][0], ben);
        assert_eq!(body["data"]["workers"].as_array().unwrap().len(), 3);

        let req = test::TestRequest::get().uri("/api/rest/teams").to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"][0]["member_count"], 1);
        assert_eq!(body["data"][0]["team_lead"]["display_name"], "ann Doe");
    }

    #[actix_web::test]
    async fn deleting_team_releases_members() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let mut ids = Vec::new();
        for username in ["ann", "ben"] {
            let req = test::TestRequest::post()
                .uri("/api/rest/worker")
                .set_json(worker(username))
                .to_request();
            ids.push(testing::body(test::call_service(&app, req).await).await["data"]["id"].clone());
        }

        let req = test::TestRequest::post()
            .uri("/api/rest/team")
            .set_json(json!({ "name": "Alpha", "team_lead": ids[0], "members": [ids[1]] }))
            .to_request();
        let location = testing::location(&test::call_service(&app, req).await);

        let req = test::TestRequest::delete().uri(&location).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(testing::location(&res), "/api/rest/teams");

        let req = test::TestRequest::get().uri(&location).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::get().uri("/api/rest/team/form").to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["workers"].as_array().unwrap().len(), 2);
    }
}

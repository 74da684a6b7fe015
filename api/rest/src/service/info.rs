use actix_web::{http::StatusCode, web, HttpResponse};
use sd_dao::project::ProjectPriority;
use strum::IntoEnumIterator;

use crate::model::{project::PriorityResJson, Response};

pub fn info_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/info/priorities", web::get().to(priorities));
}

async fn priorities() -> HttpResponse {
    let mut priorities = Vec::new();

    for priority in ProjectPriority::iter() {
        priorities.push(PriorityResJson::new(
            priority.to_str(),
            priority.label(),
            &priority.rank(),
        ));
    }

    Response::data(&StatusCode::OK, &priorities)
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};

    use crate::{configure::configure, service::testing};

    #[actix_web::test]
    async fn lists_priorities_in_rank_order() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/rest/info/priorities")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());

        let body = testing::body(res).await;
        let codes: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["critical", "high", "medium", "low", "backlog"]);
    }

    #[actix_web::test]
    async fn root_and_index_respond() {
        let (_dir, ctx) = testing::ctx().await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(res.status().is_success());

        let req = test::TestRequest::get().uri("/api/rest/index").to_request();
        let body = testing::body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["num_teams"], 0);
        assert_eq!(body["data"]["num_workers"], 0);
        assert_eq!(body["data"]["num_projects"], 0);
    }
}

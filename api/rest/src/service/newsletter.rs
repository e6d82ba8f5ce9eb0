use actix_web::{http::StatusCode, web, HttpResponse};
use lb_dao::newsletter::NewsletterDao;
use lb_error::Error;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{
        newsletter::{SubscribeReqJson, SubscriberReqPath, SubscriberResJson},
        validation_error, DeleteResJson, Response,
    },
};

pub fn newsletter_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/newsletter/subscribe", web::post().to(subscribe))
        .route("/newsletter", web::get().to(find_many))
        .route("/newsletter/{subscriber_id}", web::delete().to(delete_one));
}

async fn subscribe(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<SubscribeReqJson>,
) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error(&validation_error(&err));
    }

    let subscriber_data = NewsletterDao::new(data.email());
    if let Err(err) = subscriber_data.db_insert(ctx.dao().db()).await {
        return Response::error(&Error::from(err));
    }

    lb_log::info(
        Some("📬"),
        format!("[Newsletter] New subscriber {}", subscriber_data.id()),
    );

    Response::data(
        &StatusCode::CREATED,
        &SubscriberResJson::from_dao(&subscriber_data),
    )
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    match NewsletterDao::db_select_many(ctx.dao().db()).await {
        Ok(subscribers_data) => Response::data(
            &StatusCode::OK,
            &subscribers_data
                .iter()
                .map(SubscriberResJson::from_dao)
                .collect::<Vec<_>>(),
        ),
        Err(err) => Response::error(&Error::from(err)),
    }
}

async fn delete_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<SubscriberReqPath>,
) -> HttpResponse {
    match NewsletterDao::db_delete(ctx.dao().db(), path.subscriber_id()).await {
        Ok(_) => Response::data(&StatusCode::OK, &DeleteResJson::new(path.subscriber_id())),
        Err(err) => Response::error(&Error::from(err)),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::{self, TestRequest};
    use serde_json::{json, Value};

    use crate::service::tests::{init_app, test_ctx};

    #[actix_web::test]
    async fn subscribe_rejects_case_insensitive_duplicate() {
        let (_dir, ctx) = test_ctx().await;
        let app = init_app!(ctx);

        let req = TestRequest::post()
            .uri("/api/newsletter/subscribe")
            .set_json(json!({ "email": "Ada@Example.com" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 201);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["email"], "ada@example.com");
        assert!(body["data"]["subscribedAt"].is_string());

        let req = TestRequest::post()
            .uri("/api/newsletter/subscribe")
            .set_json(json!({ "email": "ada@example.COM" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["message"], "Email already subscribed");
    }

    #[actix_web::test]
    async fn subscribe_validates_email() {
        let (_dir, ctx) = test_ctx().await;
        let app = init_app!(ctx);

        for (payload, message) in [
            (json!({}), "Email is required"),
            (json!({ "email": "" }), "Email is required"),
            (json!({ "email": "nope" }), "Invalid email format"),
        ] {
            let req = TestRequest::post()
                .uri("/api/newsletter/subscribe")
                .set_json(payload)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), 400);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["error"]["message"], message);
        }
    }

    #[actix_web::test]
    async fn unsubscribe_twice_is_not_found() {
        let (_dir, ctx) = test_ctx().await;
        let app = init_app!(ctx);

        let req = TestRequest::post()
            .uri("/api/newsletter/subscribe")
            .set_json(json!({ "email": "grace@example.com" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/newsletter/{}", body["data"]["id"].as_str().unwrap());

        let res = test::call_service(&app, TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(res.status(), 200);

        let res = test::call_service(&app, TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(res.status(), 404);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["message"], "Subscriber not found");

        let body: Value = test::call_and_read_body_json(
            &app,
            TestRequest::get().uri("/api/newsletter").to_request(),
        )
        .await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }
}

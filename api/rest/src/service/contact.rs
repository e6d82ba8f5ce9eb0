use actix_web::{http::StatusCode, web, HttpResponse};
use lb_dao::contact::ContactDao;
use lb_error::Error;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{
        contact::{ContactReqPath, ContactResJson, InsertOneContactReqJson},
        validation_error, DeleteResJson, Response,
    },
};

pub fn contact_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/contacts", web::post().to(insert_one))
        .route("/contacts", web::get().to(find_many))
        .route("/contacts/{contact_id}", web::get().to(find_one))
        .route("/contacts/{contact_id}", web::delete().to(delete_one));
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<InsertOneContactReqJson>,
) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error(&validation_error(&err));
    }

    let contact_data = ContactDao::new(data.full_name(), data.email(), data.mobile(), data.city());
    if let Err(err) = contact_data.db_insert(ctx.dao().db()).await {
        return Response::error(&Error::from(err));
    }

    Response::data(
        &StatusCode::CREATED,
        &ContactResJson::from_dao(&contact_data),
    )
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    match ContactDao::db_select_many(ctx.dao().db()).await {
        Ok(contacts_data) => Response::data(
            &StatusCode::OK,
            &contacts_data
                .iter()
                .map(ContactResJson::from_dao)
                .collect::<Vec<_>>(),
        ),
        Err(err) => Response::error(&Error::from(err)),
    }
}

async fn find_one(ctx: web::Data<ApiRestCtx>, path: web::Path<ContactReqPath>) -> HttpResponse {
    match ContactDao::db_select(ctx.dao().db(), path.contact_id()).await {
        Ok(contact_data) => {
            Response::data(&StatusCode::OK, &ContactResJson::from_dao(&contact_data))
        }
        Err(err) => Response::error(&Error::from(err)),
    }
}

async fn delete_one(ctx: web::Data<ApiRestCtx>, path: web::Path<ContactReqPath>) -> HttpResponse {
    match ContactDao::db_delete(ctx.dao().db(), path.contact_id()).await {
        Ok(_) => Response::data(&StatusCode::OK, &DeleteResJson::new(path.contact_id())),
        Err(err) => Response::error(&Error::from(err)),
    }
}

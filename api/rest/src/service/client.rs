use actix_multipart::form::MultipartForm;
use actix_web::{http::StatusCode, web, HttpResponse};
use lb_dao::client::ClientDao;
use lb_error::Error;

use crate::{
    context::ApiRestCtx,
    model::{
        client::{ClientReqPath, ClientResJson, InsertOneClientReqForm, UpdateOneClientReqForm},
        DeleteResJson, Response,
    },
};

pub fn client_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/clients", web::post().to(insert_one))
        .route("/clients", web::get().to(find_many))
        .route("/clients/{client_id}", web::get().to(find_one))
        .route("/clients/{client_id}", web::put().to(update_one))
        .route("/clients/{client_id}", web::delete().to(delete_one));
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    form: MultipartForm<InsertOneClientReqForm>,
) -> HttpResponse {
    let image = form.image();
    if let Some(image) = &image {
        if let Err(err) = image.validate() {
            return Response::error(&err);
        }
    }

    let (name, description, designation) =
        match (form.name(), form.description(), form.designation()) {
            (Some(name), Some(description), Some(designation)) => {
                (name, description, designation)
            }
            _ => {
                return Response::error(&Error::Validation(
                    "Name, description, and designation are required".to_owned(),
                ))
            }
        };

    let image = match image {
        Some(image) => image,
        None => return Response::error(&Error::Validation("Image is required".to_owned())),
    };

    let staged = match ctx.asset().pipeline().stage(&image).await {
        Ok(staged) => staged,
        Err(err) => return Response::error(&err),
    };

    match ctx
        .asset()
        .pipeline()
        .create(staged, ctx.dao().db(), |image| {
            ClientDao::new(name, description, designation, image)
        })
        .await
    {
        Ok(client_data) => {
            Response::data(&StatusCode::CREATED, &ClientResJson::from_dao(&client_data))
        }
        Err(err) => Response::error(&err),
    }
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    match ClientDao::db_select_many(ctx.dao().db()).await {
        Ok(clients_data) => Response::data(
            &StatusCode::OK,
            &clients_data
                .iter()
                .map(ClientResJson::from_dao)
                .collect::<Vec<_>>(),
        ),
        Err(err) => Response::error(&Error::from(err)),
    }
}

async fn find_one(ctx: web::Data<ApiRestCtx>, path: web::Path<ClientReqPath>) -> HttpResponse {
    match ClientDao::db_select(ctx.dao().db(), path.client_id()).await {
        Ok(client_data) => Response::data(&StatusCode::OK, &ClientResJson::from_dao(&client_data)),
        Err(err) => Response::error(&Error::from(err)),
    }
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<ClientReqPath>,
    form: MultipartForm<UpdateOneClientReqForm>,
) -> HttpResponse {
    let image = form.image();
    if let Some(image) = &image {
        if let Err(err) = image.validate() {
            return Response::error(&err);
        }
    }

    let mut client_data = match ClientDao::db_select(ctx.dao().db(), path.client_id()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&Error::from(err)),
    };

    if let Some(name) = form.name() {
        client_data.set_name(name);
    }
    if let Some(description) = form.description() {
        client_data.set_description(description);
    }
    if let Some(designation) = form.designation() {
        client_data.set_designation(designation);
    }

    let staged = match &image {
        Some(image) => match ctx.asset().pipeline().stage(image).await {
            Ok(staged) => Some(staged),
            Err(err) => return Response::error(&err),
        },
        None => None,
    };

    if let Err(err) = ctx
        .asset()
        .pipeline()
        .replace(&mut client_data, staged, ctx.dao().db())
        .await
    {
        return Response::error(&err);
    }

    Response::data(&StatusCode::OK, &ClientResJson::from_dao(&client_data))
}

async fn delete_one(ctx: web::Data<ApiRestCtx>, path: web::Path<ClientReqPath>) -> HttpResponse {
    let client_data = match ClientDao::db_select(ctx.dao().db(), path.client_id()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&Error::from(err)),
    };

    if let Err(err) = ctx
        .asset()
        .pipeline()
        .remove(&client_data, ctx.dao().db())
        .await
    {
        return Response::error(&err);
    }

    Response::data(&StatusCode::OK, &DeleteResJson::new(client_data.id()))
}

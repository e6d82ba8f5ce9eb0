use actix_multipart::form::MultipartForm;
use actix_web::{http::StatusCode, web, HttpResponse};
use lb_dao::project::ProjectDao;
use lb_error::Error;

use crate::{
    context::ApiRestCtx,
    model::{
        project::{
            DeleteOneProjectReqPath, FindOneProjectReqPath, InsertOneProjectReqForm,
            ProjectResJson, UpdateOneProjectReqForm, UpdateOneProjectReqPath,
        },
        DeleteResJson, Response,
    },
};

pub fn project_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/projects", web::post().to(insert_one))
        .route("/projects", web::get().to(find_many))
        .route("/projects/{project_id}", web::get().to(find_one))
        .route("/projects/{project_id}", web::put().to(update_one))
        .route("/projects/{project_id}", web::delete().to(delete_one));
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    form: MultipartForm<InsertOneProjectReqForm>,
) -> HttpResponse {
    let image = form.image();
    if let Some(image) = &image {
        if let Err(err) = image.validate() {
            return Response::error(&err);
        }
    }

    let (name, description) = match (form.name(), form.description()) {
        (Some(name), Some(description)) => (name, description),
        _ => {
            return Response::error(&Error::Validation(
                "Name and description are required".to_owned(),
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

    let project_data = match ctx
        .asset()
        .pipeline()
        .create(staged, ctx.dao().db(), |image| {
            ProjectDao::new(name, description, image)
        })
        .await
    {
        Ok(data) => data,
        Err(err) => return Response::error(&err),
    };

    Response::data(
        &StatusCode::CREATED,
        &ProjectResJson::from_dao(&project_data),
    )
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let projects_data = match ProjectDao::db_select_many(ctx.dao().db()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&Error::from(err)),
    };

    Response::data(
        &StatusCode::OK,
        &projects_data
            .iter()
            .map(ProjectResJson::from_dao)
            .collect::<Vec<_>>(),
    )
}

async fn find_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<FindOneProjectReqPath>,
) -> HttpResponse {
    match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(project_data) => Response::data(&StatusCode::OK, &ProjectResJson::from_dao(&project_data)),
        Err(err) => Response::error(&Error::from(err)),
    }
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<UpdateOneProjectReqPath>,
    form: MultipartForm<UpdateOneProjectReqForm>,
) -> HttpResponse {
    let image = form.image();
    if let Some(image) = &image {
        if let Err(err) = image.validate() {
            return Response::error(&err);
        }
    }

    let mut project_data = match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&Error::from(err)),
    };

    if let Some(name) = form.name() {
        project_data.set_name(name);
    }
    if let Some(description) = form.description() {
        project_data.set_description(description);
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
        .replace(&mut project_data, staged, ctx.dao().db())
        .await
    {
        return Response::error(&err);
    }

    Response::data(&StatusCode::OK, &ProjectResJson::from_dao(&project_data))
}

async fn delete_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<DeleteOneProjectReqPath>,
) -> HttpResponse {
    let project_data = match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&Error::from(err)),
    };

    if let Err(err) = ctx
        .asset()
        .pipeline()
        .remove(&project_data, ctx.dao().db())
        .await
    {
        return Response::error(&err);
    }

    Response::data(&StatusCode::OK, &DeleteResJson::new(project_data.id()))
}

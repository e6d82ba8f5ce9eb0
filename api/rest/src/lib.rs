use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use anyhow::Result;
use configure::configure;
use context::ApiRestCtx;
use error_handler::default_error_handler;
use lb_config::app::AppConfigMode;
use logger::logger_format;
use model::multipart_config;
use tokio_util::sync::CancellationToken;

mod configure;
pub mod context;
mod error_handler;
mod logger;
mod model;
mod service;

pub struct ApiRestServer {
    mode: AppConfigMode,
    address: String,
    allowed_origin: Option<String>,
    context: web::Data<ApiRestCtx>,
}

impl ApiRestServer {
    pub fn new(
        mode: &AppConfigMode,
        host: &str,
        port: &u16,
        allowed_origin: &Option<String>,
        ctx: ApiRestCtx,
    ) -> Self {
        lb_log::info(Some("⚡"), "[ApiRestServer] Initializing component");

        let address = format!("{host}:{port}");
        let context = web::Data::new(ctx);

        Self {
            mode: *mode,
            address,
            allowed_origin: allowed_origin.to_owned(),
            context,
        }
    }

    pub async fn run(self, cancel_token: CancellationToken) -> Result<()> {
        lb_log::info(Some("💫"), "[ApiRestServer] Running component");

        let Self {
            mode,
            address,
            allowed_origin,
            context,
        } = self;

        let server = HttpServer::new(move || {
            App::new()
                .wrap(cors(&mode, &allowed_origin))
                .wrap(Logger::new(logger_format()))
                .wrap(ErrorHandlers::new().default_handler(default_error_handler))
                .app_data(context.clone())
                .app_data(multipart_config())
                .configure(|cfg| configure(cfg, context.asset().pipeline().storage()))
        })
        .bind(address)?
        .run();
        let server_handle = server.handle();
        tokio::pin!(server);

        let cancelled = tokio::select! {
            res = &mut server => {
                res?;
                false
            }
            _ = cancel_token.cancelled() => true,
        };

        if cancelled {
            lb_log::info(None, "[ApiRestServer] Shutting down component");
            let stop = server_handle.stop(true);
            server.await?;
            stop.await;
        }

        Ok(())
    }
}

/// Without a configured origin, development accepts any origin while
/// production only serves same-origin callers.
fn cors(mode: &AppConfigMode, allowed_origin: &Option<String>) -> Cors {
    let cors = match allowed_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None if mode.is_production() => Cors::default(),
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(["GET", "POST", "PUT", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

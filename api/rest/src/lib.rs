use actix_cors::Cors;
use actix_web::{
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use configure::configure;
use context::ApiRestCtx;
use error_handler::default_error_handler;
use logger::logger_format;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

mod configure;
pub mod context;
mod error_handler;
mod form;
mod logger;
mod model;
mod service;
mod validation;

pub struct ApiRestServer {
    address: String,
    allowed_origin: Option<String>,
    context: web::Data<ApiRestCtx>,
}

impl ApiRestServer {
    pub fn new(host: &str, port: &u16, allowed_origin: &Option<String>, ctx: ApiRestCtx) -> Self {
        sd_log::info(Some("⚡"), "[ApiRestServer] Initializing component");

        let address = format!("{host}:{port}");
        let context = web::Data::new(ctx);

        Self {
            address,
            allowed_origin: allowed_origin.clone(),
            context,
        }
    }

    pub fn run(self, cancel_token: CancellationToken) -> JoinHandle<()> {
        sd_log::info(Some("💫"), "[ApiRestServer] Running component");

        let address = self.address;
        let allowed_origin = self.allowed_origin;
        let context = self.context;

        tokio::spawn(async move {
            let server = match HttpServer::new(move || {
                let cors = match &allowed_origin {
                    Some(origin) => Cors::default()
                        .allowed_origin(origin)
                        .allow_any_method()
                        .allow_any_header(),
                    None => Cors::permissive(),
                };

                App::new()
                    .wrap(Logger::new(logger_format()))
                    .wrap(cors)
                    .wrap(ErrorHandlers::new().default_handler(default_error_handler))
                    .app_data(context.clone())
                    .configure(configure)
            })
            .disable_signals()
            .bind(&address)
            {
                Ok(server) => server.run(),
                Err(err) => {
                    sd_log::error(
                        None,
                        format!("[ApiRestServer] Failed to bind {address}: {err}"),
                    );
                    cancel_token.cancel();
                    return;
                }
            };
            let handle = server.handle();

            tokio::select! {
                res = server => {
                    if let Err(err) = res {
                        sd_log::error(None, format!("[ApiRestServer] Stopped with error: {err}"));
                        cancel_token.cancel();
                    }
                }
                _ = cancel_token.cancelled() => {
                    handle.stop(true).await;
                }
                _ = tokio::signal::ctrl_c() => {
                    handle.stop(true).await;
                    cancel_token.cancel();
                }
            }

            sd_log::info(None, "[ApiRestServer] Shutting down component");
        })
    }
}

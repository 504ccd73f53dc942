use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer, Result as ActixResult};
use chrono::Utc;
use log::{error, info, warn};

use crate::devices::gps::GpsService;
use crate::utils::error::GpsError;

#[derive(Clone)]
pub struct ApiServiceState {
    pub gps: GpsService,
}

impl ApiServiceState {
    pub fn new(gps: GpsService) -> Self {
        Self { gps }
    }
}

pub struct ApiService {
    state: ApiServiceState,
    server_handle: Option<actix_web::dev::ServerHandle>,
}

impl ApiService {
    pub fn new(gps: GpsService) -> Self {
        Self {
            state: ApiServiceState::new(gps),
            server_handle: None,
        }
    }

    pub async fn start(&mut self, bind_address: &str, port: u16) -> Result<(), GpsError> {
        info!("🌐 Starting GPS endpoint on {}:{}", bind_address, port);

        let state_data = web::Data::new(self.state.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state_data.clone())
                .wrap(Logger::default())
                .configure(configure_routes)
        })
        .bind((bind_address, port))?
        .run();

        self.server_handle = Some(server.handle());

        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!("❌ GPS endpoint error: {}", e);
            }
        });

        info!("✅ GPS endpoint listening on http://{}:{}/gps/gps_time", bind_address, port);
        Ok(())
    }

    pub async fn stop(&mut self) {
        info!("🛑 Stopping GPS endpoint...");

        if let Some(handle) = self.server_handle.take() {
            tokio::select! {
                _ = handle.stop(true) => {
                    info!("✅ GPS endpoint stopped gracefully");
                }
                _ = tokio::time::sleep(tokio::time::Duration::from_secs(10)) => {
                    warn!("⚠️  GPS endpoint shutdown timeout, forcing stop");
                    handle.stop(false).await;
                }
            }
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/gps")
            .route("/gps_time", web::get().to(gps_time))
            .route("/status", web::get().to(gps_status))
            .route("/health", web::get().to(health_check)),
    );
}

fn plain_text(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(body)
}

// GET /gps/gps_time - run one pass and return the status line
async fn gps_time(state: web::Data<ApiServiceState>) -> ActixResult<HttpResponse> {
    let gps = state.gps.clone();

    match web::block(move || gps.poll()).await {
        Ok(Ok(status)) => Ok(plain_text(format!("{}\n", status))),
        Ok(Err(e)) => {
            error!("❌ GPS pass failed: {}", e);
            Ok(HttpResponse::ServiceUnavailable()
                .content_type("text/plain; charset=utf-8")
                .body(format!("{}\n", e)))
        }
        Err(e) => {
            error!("❌ GPS pass did not complete: {}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}

// GET /gps/status - cached line, no device access
async fn gps_status(state: web::Data<ApiServiceState>) -> ActixResult<HttpResponse> {
    match state.gps.snapshot() {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(snapshot)),
        Err(e) => {
            error!("❌ Failed to read cached GPS status: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string(),
                "timestamp": Utc::now(),
            })))
        }
    }
}

// GET /gps/health
async fn health_check(state: web::Data<ApiServiceState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "GPRMC status endpoint",
        "device": state.gps.config().device_path,
        "timestamp": Utc::now(),
        "version": crate::VERSION
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::gps::gps_service::tests::{service_with, REFERENCE, REFERENCE_LINE};
    use crate::output::NO_GPS_DATA;
    use actix_web::{http::StatusCode, test};

    fn app_state(bytes: Option<&[u8]>) -> web::Data<ApiServiceState> {
        web::Data::new(ApiServiceState::new(service_with(bytes)))
    }

    #[actix_web::test]
    async fn test_gps_time_returns_line_with_newline() {
        let app = test::init_service(App::new().app_data(app_state(Some(REFERENCE))).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/gps/gps_time").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], format!("{}\n", REFERENCE_LINE).as_bytes());
    }

    #[actix_web::test]
    async fn test_gps_time_without_sentence() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(Some(&b"$GPGGA,123519\r\n"[..])))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/gps/gps_time").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], format!("{}\n", NO_GPS_DATA).as_bytes());
    }

    #[actix_web::test]
    async fn test_open_failure_is_unavailable() {
        let app = test::init_service(App::new().app_data(app_state(None)).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/gps/gps_time").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_status_reports_cached_line() {
        let state = app_state(Some(REFERENCE));
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/gps/status").to_request();
        let before: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(before["status"], "");
        assert!(before["updated_at"].is_null());

        let req = test::TestRequest::get().uri("/gps/gps_time").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/gps/status").to_request();
        let after: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(after["status"], REFERENCE_LINE);
        assert!(after["updated_at"].is_string());
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().app_data(app_state(Some(REFERENCE))).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/gps/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}

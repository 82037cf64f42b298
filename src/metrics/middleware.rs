//! This defines the Middleware to collect metrics for the application.
//! This middleware will increment the request counter for each request for each endpoint,
//! labelled with the method and response status.

use crate::metrics::REQUEST_COUNTER;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use std::task::{Context, Poll};

pub struct MetricsMiddleware;

/// Trait implementation for the MetricsMiddleware.
impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(MetricsMiddlewareService { service })
    }
}

pub struct MetricsMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Unmatched paths share one label so arbitrary URIs cannot grow the series set.
        let endpoint = req
            .match_pattern()
            .unwrap_or_else(|| "unmatched".to_string());
        let method = req.method().to_string();

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let status = res.status().as_u16().to_string();
            REQUEST_COUNTER
                .with_label_values(&[endpoint.as_str(), method.as_str(), status.as_str()])
                .inc();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_counts_matched_pattern() {
        let app = test::init_service(
            App::new()
                .wrap(MetricsMiddleware)
                .route("/counted", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let before = REQUEST_COUNTER
            .with_label_values(&["/counted", "GET", "200"])
            .get();
        let req = test::TestRequest::get().uri("/counted").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let after = REQUEST_COUNTER
            .with_label_values(&["/counted", "GET", "200"])
            .get();
        assert_eq!(after - before, 1.0);
    }
}

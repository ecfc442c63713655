use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};

use crate::adapters::http::errors::ApiError;
use crate::domain::auth::entities::User;

/// Guard middleware for the admin console.
///
/// Expects `AuthMiddleware` to have attached the user already; requests
/// from non-admin users get a 403 response.
#[derive(Debug, Clone, Default)]
pub struct AdminGuard;

impl AdminGuard {
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for AdminGuard
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AdminGuardService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AdminGuardService {
      service: Rc::new(service),
    }))
  }
}

pub struct AdminGuardService<S> {
  service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminGuardService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    let is_admin = req
      .extensions()
      .get::<User>()
      .map(|user| user.role.is_admin())
      .unwrap_or(false);

    Box::pin(async move {
      if !is_admin {
        let (request, _) = req.into_parts();
        let response = HttpResponse::Forbidden()
          .json(ApiError::Forbidden("Admin access required".to_string()))
          .map_into_right_body();
        return Ok(ServiceResponse::new(request, response));
      }

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::core::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Outcome of verifying a bearer token.
///
/// Always a plain value: verification is total and never mutates shared
/// state, so a denied request is just `authenticated == false`.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user_id: String,
    pub email: String,
    pub authenticated: bool,
}

impl AuthResult {
    fn denied() -> Self {
        AuthResult {
            user_id: String::new(),
            email: String::new(),
            authenticated: false,
        }
    }
}

/// Maps an `Authorization` header to an identity
pub trait AuthVerifier: Send + Sync {
    /// Total verification: any malformed or forged input yields a denied
    /// result rather than an error.
    fn verify(&self, auth_header: Option<&str>) -> AuthResult;
}

/// Verifies HMAC-SHA256-signed bearer tokens.
///
/// Token layout: `hex(payload).hex(mac)` where the payload is
/// `user_id\nemail` and the mac is keyed by the configured secret.
pub struct HmacTokenVerifier {
    secret: String,
}

impl HmacTokenVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a token for an identity; the inverse of `verify`.
    #[cfg(test)]
    pub fn sign(&self, user_id: &str, email: &str) -> String {
        let payload = format!("{}\n{}", user_id, email);
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(payload.as_bytes());
        let tag = mac.finalize().into_bytes();
        format!("{}.{}", hex::encode(payload.as_bytes()), hex::encode(tag))
    }
}

impl AuthVerifier for HmacTokenVerifier {
    fn verify(&self, auth_header: Option<&str>) -> AuthResult {
        let Some(header) = auth_header else {
            return AuthResult::denied();
        };

        // Authorization: Bearer <token>
        let token = match header.split_once(' ') {
            Some(("Bearer", token)) if !token.is_empty() => token,
            _ => return AuthResult::denied(),
        };

        let Some((payload_hex, tag_hex)) = token.split_once('.') else {
            return AuthResult::denied();
        };
        let (Ok(payload), Ok(tag)) = (hex::decode(payload_hex), hex::decode(tag_hex)) else {
            return AuthResult::denied();
        };

        let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
            return AuthResult::denied();
        };
        mac.update(&payload);
        if mac.verify_slice(&tag).is_err() {
            return AuthResult::denied();
        }

        let Ok(payload) = String::from_utf8(payload) else {
            return AuthResult::denied();
        };
        let Some((user_id, email)) = payload.split_once('\n') else {
            return AuthResult::denied();
        };

        AuthResult {
            user_id: user_id.to_string(),
            email: email.to_string(),
            authenticated: true,
        }
    }
}

/// Bearer-token authentication middleware
pub struct BearerAuth {
    verifier: Arc<dyn AuthVerifier>,
}

impl BearerAuth {
    pub fn new(verifier: Arc<dyn AuthVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AuthVerifier>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let verifier = self.verifier.clone();

        Box::pin(async move {
            // Health check and index stay public
            let path = req.path();
            if path == "/health" || path == "/" {
                return svc.call(req).await;
            }

            let header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok());

            let auth = verifier.verify(header);
            if !auth.authenticated {
                return Err(Error::from(AppError::unauthorized(
                    "Please login to access this function",
                )));
            }

            req.extensions_mut().insert(auth);
            svc.call(req).await
        })
    }
}

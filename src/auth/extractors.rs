use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;

use super::jwt::JwtKeys;

/// Any authenticated caller: the token's subject and privilege snapshot.
#[derive(Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// Authenticated caller whose token carries the admin flag.
#[derive(Debug)]
pub struct AdminUser {
    pub user_id: Uuid,
}

/// Pulls the token out of `Authorization: Bearer <token>`. The header must
/// split into exactly two parts and the scheme match case-insensitively.
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Authentication("Token não fornecido".into()))?;

    let mut pieces = header.split(' ');
    let (scheme, token) = match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err(ApiError::Authentication("Erro no token".into())),
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(ApiError::Authentication("Token mal formatado".into()));
    }

    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = bearer_token(parts)?;

        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err(ApiError::Authentication("Token inválido ou expirado".into()));
            }
        };

        Ok(AuthUser {
            user_id: claims.sub,
            is_admin: claims.is_admin,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser { user_id, is_admin } = AuthUser::from_request_parts(parts, state).await?;

        if !is_admin {
            warn!(user_id = %user_id, "non-admin token on admin route");
            return Err(ApiError::Authorization("Usuário não autorizado".into()));
        }

        Ok(AdminUser { user_id })
    }
}

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo_types::User,
    },
    error::{is_unique_violation, ApiError, FieldError},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn validate_register(payload: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if payload.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "Nome é obrigatório",
        });
    }
    if !is_valid_email(&payload.email) {
        errors.push(FieldError {
            field: "email",
            message: "Email inválido",
        });
    }
    if payload.password.len() < 6 {
        errors.push(FieldError {
            field: "password",
            message: "Senha deve ter pelo menos 6 caracteres",
        });
    }
    if payload.confirm_password.is_empty() {
        errors.push(FieldError {
            field: "confirmPassword",
            message: "Confirmação de senha é obrigatória",
        });
    }
    errors
}

fn validate_login(payload: &LoginRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !is_valid_email(&payload.email) {
        errors.push(FieldError {
            field: "email",
            message: "Email inválido",
        });
    }
    if payload.password.is_empty() {
        errors.push(FieldError {
            field: "password",
            message: "Senha é obrigatória",
        });
    }
    errors
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let errors = validate_register(&payload);
    if !errors.is_empty() {
        warn!("register payload failed validation");
        return Err(ApiError::Fields(errors));
    }

    if payload.password != payload.confirm_password {
        return Err(ApiError::Validation("As senhas não coincidem".into()));
    }

    if User::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Este email já está registrado".into()));
    }

    let hash = hash_password(&payload.password)?;

    // The unique index still decides concurrent registrations; the loser of
    // the race surfaces here as a unique violation.
    let user = match User::create(&state.db, &payload.name, &payload.email, &hash).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "registration lost uniqueness race");
            return Err(ApiError::Conflict("Este email já está registrado".into()));
        }
        Err(e) => return Err(ApiError::Internal(e)),
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.is_admin)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            auth: true,
            token,
            user: PublicUser::from(user),
            message: "Usuário registrado com sucesso!".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let errors = validate_login(&payload);
    if !errors.is_empty() {
        warn!("login payload failed validation");
        return Err(ApiError::Fields(errors));
    }

    // 404 here distinguishes an unknown email from a bad password, which
    // leaks account existence. Kept for compatibility with existing clients.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::NotFound("Usuário não encontrado".into())
        })?;

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Authentication("Senha incorreta".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.is_admin)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        auth: true,
        token,
        user: PublicUser::from(user),
        message: "Login realizado com sucesso!".into(),
    }))
}

#[instrument(skip(state, auth))]
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Usuário não encontrado".into()))?;
    Ok(Json(PublicUser::from(user)))
}

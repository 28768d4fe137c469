use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload used for authentication.
///
/// `is_admin` is a snapshot taken when the token is minted; a later change
/// to the user's admin status is only reflected once a new token is issued.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user ID
    #[serde(rename = "isAdmin")]
    pub is_admin: bool, // privilege snapshot
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}

// src/routes/waitlist.rs
use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::error::AppError;
use crate::message::{WaitlistAck, WaitlistRequest};

/// Accept a waitlist signup. The address is logged, not stored; there is no
/// deduplication and no confirmation email.
pub async fn waitlist_handler(
    payload: Result<Json<WaitlistRequest>, JsonRejection>,
) -> Result<Json<WaitlistAck>, AppError> {
    let Json(payload) =
        payload.map_err(|_| AppError::BadRequest("Email is required".to_string()))?;

    let email = payload.email.trim();
    if !is_valid_email(email) {
        return Err(AppError::BadRequest("A valid email address is required".to_string()));
    }

    tracing::info!(email, "waitlist signup");

    Ok(Json(WaitlistAck { ok: true }))
}

/// Basic local@domain.tld shape check.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && !tld.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("artist.manager@loopdsp.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }
}

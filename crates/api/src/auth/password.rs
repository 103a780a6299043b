use crate::auth::AuthConfig;
use crate::error::AppError;

/// Check `candidate` against the configured admin password hash.
pub fn verify_admin_password(config: &AuthConfig, candidate: &str) -> Result<bool, AppError> {
    let Some(hash) = config.admin_password_hash.as_deref() else {
        return Err(AppError::Unauthorized(
            "Admin login is not configured".to_string(),
        ));
    };

    bcrypt::verify(candidate, hash).map_err(|e| {
        tracing::error!("Stored admin password hash is unusable: {e}");
        AppError::Internal("Password verification failed".to_string())
    })
}

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::users::{
    dto::{LoginResponse, PublicUser, SignUpResponse},
    error::AccountError,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::UserStore,
    validation::{is_email_valid, is_password_valid},
};

/// Signup, login and listing over a [`UserStore`].
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
    keys: JwtKeys,
}

fn validate(email: &str, password: &str) -> Result<(), AccountError> {
    if !is_email_valid(email) {
        warn!(email = %email, "invalid email");
        return Err(AccountError::InvalidInput("Invalid email"));
    }
    if !is_password_valid(password) {
        warn!(email = %email, "invalid password");
        return Err(AccountError::InvalidInput("Invalid password"));
    }
    Ok(())
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { store, keys }
    }

    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResponse, AccountError> {
        validate(email, password)?;

        // The unique constraint is authoritative; this only saves a hash.
        if self.store.find_by_email(email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AccountError::Conflict);
        }

        let hash = hash_password(password)
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?;
        let user = self.store.create(email, &hash).await.map_err(|e| {
            warn!(email = %email, error = %e, "create user failed");
            AccountError::from(e)
        })?;

        info!(user_id = user.id, email = %user.email, "user registered");
        Ok(SignUpResponse {
            message: "User created successfully".into(),
            user: user.into(),
        })
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AccountError> {
        validate(email, password)?;

        let user = match self.store.find_by_email(email).await? {
            Some(u) => u,
            None => {
                warn!(email = %email, "login unknown email");
                return Err(AccountError::NotFound("User does not exist"));
            }
        };

        let ok = verify_password(password, &user.password)
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?;
        if !ok {
            warn!(user_id = user.id, "login invalid password");
            return Err(AccountError::Unauthorized);
        }

        let token = self
            .keys
            .sign(user.id)
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        info!(user_id = user.id, email = %user.email, "user logged in");
        Ok(LoginResponse {
            message: "User logged in successfully".into(),
            user: user.into(),
            token,
        })
    }

    /// An empty store is reported as `NotFound`, not an empty list.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<PublicUser>, AccountError> {
        let users = self.store.list_all().await?;
        if users.is_empty() {
            return Err(AccountError::NotFound("No users found"));
        }
        Ok(users.into_iter().map(PublicUser::from).collect())
    }
}

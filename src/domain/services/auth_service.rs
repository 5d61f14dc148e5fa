use std::sync::Arc;
use crate::domain::{
    models::user::User,
    ports::{TokenService, UserRepository},
};
use crate::error::AppError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User, AppError> {
        let username = username.trim();
        let email = normalize_email(email);

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::Validation("Username, email and password are required".into()));
        }
        if !email.contains('@') {
            return Err(AppError::Validation("Email address is invalid".into()));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))?
            .to_string();

        let user = User::new(username.to_string(), email, password_hash);
        self.users.create(&user).await
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let email = normalize_email(email);
        let user = self.users.find_by_email(&email).await?
            .ok_or(AppError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal)?;

        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::InvalidCredentials)?;

        let token = self.tokens.issue(&user.id)?;
        Ok((user, token))
    }

    pub async fn profile(&self, user_id: &str) -> Result<User, AppError> {
        self.users.find_by_id(user_id).await?
            .ok_or(AppError::NotFound("User not found".into()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

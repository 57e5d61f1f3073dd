//! services/app/src/ledger/session.rs
//!
//! The session manager: account registration, login, logout, and the single
//! current-user record. Passwords are stored as salted Argon2 hashes (PHC
//! strings); verification is constant-time inside `argon2`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use meditrack_core::domain::{next_record_id, NewUser, User};
use meditrack_core::ports::PortError;
use meditrack_core::store::{collections, RecordStore};
use meditrack_core::validation::{validate_registration, ValidationError};
use tracing::{error, info};

//=========================================================================================
// Errors
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A registration field failed its form check; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already registered")]
    DuplicateEmail,

    /// Covers both an unknown email and a wrong password; callers are not
    /// told which.
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    #[error("Failed to process password: {0}")]
    Hash(String),

    #[error(transparent)]
    Port(#[from] PortError),
}

//=========================================================================================
// SessionManager
//=========================================================================================

/// An explicit session context: one of these per browser-profile store. At
/// most one user is signed in at a time; the signed-in record lives under its
/// own key next to the collections.
#[derive(Clone)]
pub struct SessionManager {
    store: RecordStore,
}

impl SessionManager {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Creates a new patient account.
    pub fn register(&self, candidate: NewUser) -> Result<User, AuthError> {
        // 1. Check the candidate field by field, in form order.
        validate_registration(&candidate)?;

        // 2. Reject an email that is already registered. Emails are unique
        //    case-insensitively across the collection.
        let mut users: Vec<User> = self.store.load(collections::USERS)?;
        if users
            .iter()
            .any(|user| user.email.eq_ignore_ascii_case(&candidate.email))
        {
            return Err(AuthError::DuplicateEmail);
        }

        // 3. Hash the password.
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(candidate.password.as_bytes(), &salt)
            .map_err(|e| {
                error!("Failed to hash password: {:?}", e);
                AuthError::Hash(e.to_string())
            })?
            .to_string();

        // 4. Append the new record and persist the collection.
        let user = User {
            id: next_record_id(users.iter().map(|user| user.id)),
            name: candidate.name,
            email: candidate.email,
            password_hash,
            age: candidate.age,
            gender: candidate.gender,
            phone: candidate.phone,
            registered_on: Utc::now(),
        };
        users.push(user.clone());
        self.store.save(collections::USERS, &users)?;

        info!(user_id = user.id, "registered new account");
        Ok(user)
    }

    /// Signs a patient in and persists the matched record as the session.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // 1. Find the account. The email must match the stored value exactly.
        let users: Vec<User> = self.store.load(collections::USERS)?;
        let user = users
            .iter()
            .find(|user| user.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        // 2. Verify the password against the stored hash.
        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        let valid = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        // 3. Persist the session record.
        self.store.save_one(collections::SESSION, user)?;
        info!(user_id = user.id, "login successful");
        Ok(user.clone())
    }

    /// Clears the session unconditionally; signing out while already signed
    /// out is fine.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear(collections::SESSION)?;
        Ok(())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.store.load_one(collections::SESSION).ok().flatten()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }
}

//! Field schemas for the auth forms.
//!
//! Each field must be present as a string; content is not checked. Missing
//! fields are rejected by the `Form` extractor before a submission starts.

use secrecy::SecretString;
use serde::Deserialize;
use std::fmt;

use crate::auth::Credentials;

#[derive(Deserialize)]
pub struct SignInValues {
    pub email: String,
    pub password: String,
}

impl From<SignInValues> for Credentials {
    fn from(values: SignInValues) -> Self {
        Self {
            email: values.email,
            password: SecretString::from(values.password),
        }
    }
}

#[derive(Deserialize)]
pub struct SignUpValues {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordValues {
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdatePasswordValues {
    pub password: String,
}

impl fmt::Debug for SignInValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInValues")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Debug for SignUpValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpValues")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Debug for UpdatePasswordValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdatePasswordValues")
            .field("password", &"***")
            .finish()
    }
}

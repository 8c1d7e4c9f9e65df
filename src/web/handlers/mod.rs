pub mod callback;
pub mod dashboard;
pub mod forgot_password;
pub mod health;
pub mod home;
pub mod signin;
pub mod signout;
pub mod signup;
pub mod update_password;

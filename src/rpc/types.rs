// Wire types for the REST endpoints
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Deserialize, Debug)]
pub struct ResetTokenQuery {
    pub token: String,
}

#[derive(Deserialize, Debug)]
pub struct AddToGroupQuery {
    pub user_id: String,
    pub group_id: String,
}

use email_address::EmailAddress;
use serde_derive::Deserialize;
use utoipa::ToSchema;

use crate::{
    domain::subscriber::NewEmailSubscriber,
    errors::code_error::{CodeError, CodeErrorResp, code_err},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl SubscribeRequest {
    pub fn validate(&self) -> Result<NewEmailSubscriber, CodeErrorResp> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CodeError::SUBSCRIBER_NAME_INVALID.into());
        }

        let email = self.email.trim();
        if !EmailAddress::is_valid(email) {
            return Err(code_err(CodeError::EMAIL_INVALID, email));
        }

        Ok(NewEmailSubscriber {
            subscriber_name: name.to_string(),
            subscriber_email: email.to_lowercase(),
        })
    }
}

use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(serde_derive::Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

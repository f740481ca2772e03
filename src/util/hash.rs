use crate::core::types::{ClientSecret, HashedClientSecret, HashedToken, Token};

pub trait HashTo: AsRef<str> {
    type HashedType: From<String>;
}

impl HashTo for ClientSecret {
    type HashedType = HashedClientSecret;
}

impl HashTo for Token {
    type HashedType = HashedToken;
}

/// Digests a secret so that it can be stored and compared without keeping
/// the plaintext around.
pub fn hash_without_salt<T: HashTo>(to_hash: &T) -> T::HashedType {
    use sha2::Digest;

    let to_hash = to_hash.as_ref();
    let digest = sha2::Sha512::digest(to_hash.as_bytes());
    let hash = base64::encode_config(digest, base64::URL_SAFE);
    hash.into()
}

/// Checks a presented client secret against its stored digest.
pub fn verify_secret(secret: &ClientSecret, hashed: &HashedClientSecret) -> bool {
    let presented = hash_without_salt(secret);
    constant_time_eq::constant_time_eq(presented.as_ref().as_bytes(), hashed.as_ref().as_bytes())
}

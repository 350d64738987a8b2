use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::Claims;
use crate::error::AppError;

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

pub fn now_unix() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as usize)
        .unwrap_or_default()
}

pub fn make_claims(user_id: i32, ttl_secs: u64) -> Claims {
    let iat = now_unix();
    Claims {
        sub: user_id.to_string(),
        iat,
        exp: iat + ttl_secs as usize,
    }
}

pub fn encode_token(keys: &JwtKeys, claims: &Claims) -> Result<String, AppError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());

    encode(&header, claims, &keys.enc).map_err(|err| {
        tracing::error!(error = %err, "token encoding failed");
        AppError::internal("Token encoding failed")
    })
}

/// HMAC-signed tokens only; expiry is mandatory and checked without leeway.
pub fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

pub fn decode_token(keys: &JwtKeys, token: &str) -> Result<Claims, AppError> {
    Ok(decode::<Claims>(token, &keys.dec, &validation())?.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

    use super::{JwtKeys, decode_token, encode_token, make_claims, now_unix};
    use crate::auth::Claims;

    #[test]
    fn claims_carry_user_id_and_ttl() {
        let claims = make_claims(7, 60);

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn encoded_token_roundtrips_with_same_secret() {
        let keys = JwtKeys::from_secret(b"unit-secret");
        let claims = make_claims(3, 300);
        let token = encode_token(&keys, &claims).expect("token should encode");

        assert_eq!(decode_token(&keys, &token).expect("token should decode"), claims);
    }

    #[test]
    fn rejects_expired_token() {
        let keys = JwtKeys::from_secret(b"unit-secret");
        let now = now_unix();
        let claims = Claims {
            sub: "3".to_string(),
            iat: now - 120,
            exp: now - 60,
        };
        let token = encode_token(&keys, &claims).expect("token should encode");

        let err = decode_token(&keys, &token).expect_err("expired token should fail");
        assert_eq!(err.message(), "invalid access token");
    }

    #[test]
    fn rejects_foreign_secret() {
        let token = encode_token(&JwtKeys::from_secret(b"a"), &make_claims(1, 60))
            .expect("token should encode");

        assert!(decode_token(&JwtKeys::from_secret(b"b"), &token).is_err());
    }

    #[test]
    fn accepts_other_hmac_algorithms() {
        let claims = make_claims(5, 60);
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"unit-secret"),
        )
        .expect("token should encode");

        let decoded = decode_token(&JwtKeys::from_secret(b"unit-secret"), &token)
            .expect("HS512 should verify");
        assert_eq!(decoded.sub, "5");
    }
}

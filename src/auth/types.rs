use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id, decimal.
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{Claims, Role};

    #[test]
    fn role_string_roundtrip() {
        for role in [Role::Customer, Role::Manager, Role::Admin] {
            assert_eq!(Role::try_from(role.as_str()), Ok(role));
        }
        assert_eq!(Role::try_from(" Manager "), Ok(Role::Manager));
        assert!(Role::try_from("chef").is_err());
    }

    #[test]
    fn subject_must_be_numeric() {
        let claims = |sub: &str| Claims {
            sub: sub.to_string(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims("42").user_id(), Some(42));
        assert_eq!(claims("alice@example.com").user_id(), None);
    }
}

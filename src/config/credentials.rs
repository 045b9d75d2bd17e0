//! Credential variants for the two BigCommerce API generations.
//!
//! BigCommerce exposes two incompatible authentication schemes. Legacy
//! stores authenticate with an API user name and key sent as a Basic
//! Authorization header against the store's own domain; newer stores
//! authenticate with an OAuth client id and access token sent as
//! `X-Auth-Client`/`X-Auth-Token` headers against the central API host.
//!
//! The scheme is carried as a tagged variant on the configuration. Only the
//! transport layer dispatches on it; the pagination and retry engine is
//! generation-agnostic.

use crate::config::newtypes::{AccessToken, ApiKey, ClientId, UserName};

/// Which authentication scheme a set of [`Credentials`] uses.
///
/// Used by the transport as a strategy key when mapping commands to
/// endpoint paths and when building request headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// Legacy key-authenticated API (Basic auth, store-domain URLs).
    Legacy,
    /// Token-authenticated API (`X-Auth-*` headers, central API host).
    OAuth,
}

/// API credentials for a BigCommerce store.
///
/// # Example
///
/// ```rust
/// use bigcommerce_access::{AccessToken, ClientId, Credentials};
///
/// let credentials = Credentials::OAuth {
///     client_id: ClientId::new("my-client").unwrap(),
///     access_token: AccessToken::new("my-token").unwrap(),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Legacy key-authenticated credentials.
    Legacy {
        /// The API user name.
        user_name: UserName,
        /// The API key.
        api_key: ApiKey,
    },
    /// OAuth token-authenticated credentials.
    OAuth {
        /// The OAuth client id.
        client_id: ClientId,
        /// The OAuth access token.
        access_token: AccessToken,
    },
}

impl Credentials {
    /// Returns the authentication scheme of these credentials.
    #[must_use]
    pub const fn auth_mode(&self) -> AuthMode {
        match self {
            Self::Legacy { .. } => AuthMode::Legacy,
            Self::OAuth { .. } => AuthMode::OAuth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_mode_matches_variant() {
        let legacy = Credentials::Legacy {
            user_name: UserName::new("user").unwrap(),
            api_key: ApiKey::new("key").unwrap(),
        };
        assert_eq!(legacy.auth_mode(), AuthMode::Legacy);

        let oauth = Credentials::OAuth {
            client_id: ClientId::new("client").unwrap(),
            access_token: AccessToken::new("token").unwrap(),
        };
        assert_eq!(oauth.auth_mode(), AuthMode::OAuth);
    }
}

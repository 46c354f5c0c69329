/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! SkyWay Auth Token (JWT) claims.
//!
//! Two token kinds exist and are never mixed:
//!
//! - [`AdminClaims`]: a flat token granting full control over one application.
//! - [`ScopedClaims`]: a token whose `scope` narrows the allowed actions down
//!   to channels, members, publications, subscriptions and SFU bots.
//!
//! These structs are the *strict* view of a payload. Fields that are not part
//! of the schema are dropped on deserialization.

use serde::{Deserialize, Serialize};

/// JWT payload for a SkyWay Admin Auth Token.
///
/// # Example payload
///
/// ```json
/// {
///   "jti": "8ab2d2a3-7c5a-4b4e-9d0a-2b9f4c3e1d11",
///   "iat": 1707000000,
///   "exp": 1707003600,
///   "appId": "402e60fb-9698-4eb9-9ee2-6d3d66a78068"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AdminClaims {
    /// Token identifier (UUID v4).
    #[serde(default)]
    pub jti: String,

    /// Issued-at timestamp (Unix seconds).
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    #[serde(default)]
    pub exp: i64,

    /// The application this token administers.
    #[serde(default, rename = "appId")]
    pub app_id: String,
}

/// JWT payload for a scoped SkyWay Auth Token.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ScopedClaims {
    /// Token identifier (UUID v4).
    #[serde(default)]
    pub jti: String,

    /// Issued-at timestamp (Unix seconds).
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    #[serde(default)]
    pub exp: i64,

    /// Token format version. `0` means unversioned.
    #[serde(default)]
    pub version: i64,

    /// Permission tree rooted at the application.
    #[serde(default)]
    pub scope: TokenScope,
}

/// Root of the permission tree.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TokenScope {
    #[serde(default)]
    pub app: AppScope,
}

/// Application-level permissions.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AppScope {
    /// Application ID. Always replaced by the issuer's configured app ID.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub actions: Vec<String>,
    /// Whether TURN relay usage is allowed.
    #[serde(default)]
    pub turn: bool,
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub channels: Vec<ChannelScope>,
}

/// Permissions for a channel, matched by `id` or `name`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ChannelScope {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberScope>,
    #[serde(default, rename = "sfuBots")]
    pub sfu_bots: Vec<SfuBotScope>,
}

/// Permissions for a channel member.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct MemberScope {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub publication: PublicationScope,
    #[serde(default)]
    pub subscription: SubscriptionScope,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PublicationScope {
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionScope {
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Permissions for a server-side SFU relay participant.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SfuBotScope {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub forwardings: Vec<ForwardingScope>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ForwardingScope {
    #[serde(default)]
    pub actions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_claims_use_camel_case_app_id() {
        let claims = AdminClaims {
            jti: "j".to_string(),
            iat: 1,
            exp: 2,
            app_id: "app".to_string(),
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["appId"], "app");
        assert!(value.get("app_id").is_none());
    }

    #[test]
    fn scoped_claims_fill_missing_fields_with_defaults() {
        let claims: ScopedClaims =
            serde_json::from_str(r#"{"scope":{"app":{"turn":true}}}"#).unwrap();
        assert!(claims.jti.is_empty());
        assert_eq!(claims.version, 0);
        assert!(claims.scope.app.turn);
        assert!(claims.scope.app.channels.is_empty());
    }

    #[test]
    fn unknown_scope_fields_are_dropped() {
        let claims: ScopedClaims = serde_json::from_str(
            r#"{"scope":{"app":{"id":"a","extra":1,"channels":[{"name":"c","bogus":true}]}}}"#,
        )
        .unwrap();
        let value = serde_json::to_value(&claims).unwrap();
        assert!(value["scope"]["app"].get("extra").is_none());
        assert!(value["scope"]["app"]["channels"][0].get("bogus").is_none());
        assert_eq!(value["scope"]["app"]["channels"][0]["name"], "c");
    }

    #[test]
    fn sfu_bots_round_trip_under_camel_case_key() {
        let claims: ScopedClaims = serde_json::from_str(
            r#"{"scope":{"app":{"channels":[{"sfuBots":[{"actions":["write"],"forwardings":[{"actions":["write"]}]}]}]}}}"#,
        )
        .unwrap();
        let bots = &claims.scope.app.channels[0].sfu_bots;
        assert_eq!(bots.len(), 1);
        assert_eq!(bots[0].forwardings[0].actions, vec!["write".to_string()]);
    }
}

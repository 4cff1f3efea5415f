use serde::{Deserialize, Serialize};

/// A browser cookie in the W3C WebDriver wire shape, so it can be handed
/// straight back to the driver after a round trip through disk.
///
/// Carries the fields `thirtyfour::Cookie` carries. `httpOnly` is not one of
/// them, so it is ignored when read and never written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

impl SessionCookie {
    pub fn new(name: &str, value: &str) -> Self {
        SessionCookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: None,
            path: None,
            secure: None,
            expiry: None,
            same_site: None,
        }
    }
}

/// Cookies exported from an authenticated browsing context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    pub cookies: Vec<SessionCookie>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Resumed,
    FreshlyAuthenticated,
}

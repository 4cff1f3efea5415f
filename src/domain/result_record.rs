use serde::Serialize;

/// One person card scraped from a results page. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub profile_pic: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub text: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub twitter_profile_url: Option<String>,
    pub facebook_profile_url: Option<String>,
}

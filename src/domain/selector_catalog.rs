use serde::Deserialize;

/// CSS queries describing where each piece of a ContactOut results page lives.
///
/// Field queries (`profile_pic` through `facebook_profile_url`, plus the
/// snippet ones) are resolved relative to a single `result_container`.
/// Everything else is resolved against the whole document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectorCatalog {
    pub email_input: String,
    pub password_input: String,
    pub submit_button: String,
    pub search_input: String,

    pub result_container: String,
    /// Present once the result list has rendered after pagination.
    pub result_indicator: String,
    pub load_more: String,
    pub next_page: String,

    pub profile_pic: String,
    pub name: String,
    pub location: String,
    pub linkedin_profile_url: String,
    pub github_profile_url: String,
    pub twitter_profile_url: String,
    pub facebook_profile_url: String,
    pub snippet_region: String,
    /// Matched against the direct children of `snippet_region`.
    pub snippet_line: String,
}

const SOCIAL_LINKS: &str =
    "div.flex.mb-3.items-start > div.flex.relative.flex-col > div > div:nth-child(1) > div";

impl Default for SelectorCatalog {
    fn default() -> Self {
        SelectorCatalog {
            email_input: "input[name='email']".to_string(),
            password_input: "input[name='password']".to_string(),
            submit_button: "button[type='submit']".to_string(),
            search_input: "input[name='nm']".to_string(),

            result_container: r"#page-content > div.flex.flex-row.max-sm\:flex-col.h-full.bg-white > div > div.overflow-x-hidden.flex-grow > div.max-sm\:pt-0.min-md\:overflow-y-auto.overflow-x-hidden > div".to_string(),
            result_indicator: ".css-1yxaelb".to_string(),
            load_more: "button[aria-label='profile-card-more']".to_string(),
            next_page: r"#page-content > div.flex.flex-row.max-sm\:flex-col.h-full.bg-white > div > div.overflow-x-hidden.flex-grow > div.md\:relative.z-10.flex.justify-center.shadow-inner.bg-white > div > button.w-8.h-8.flex.items-center.justify-center.rounded-r-md.border-t.border-b.border-r.border-solid.border-gray-300.text-sm.space-x-1.hover\:bg-gray-100.hover\:text-gray-500.focus\:outline-none.text-gray-500.css-1d7tuus".to_string(),

            profile_pic: "div.flex.mb-3.items-start > div.flex.align-start.cursor-pointer > img".to_string(),
            name: "div.flex.mb-3.items-start > div.flex.relative.flex-col > div > div:nth-child(1) > span".to_string(),
            location: "div.flex.mb-3.items-start > div.flex.relative.flex-col > div".to_string(),
            linkedin_profile_url: format!("{SOCIAL_LINKS} > a:nth-child(1)"),
            github_profile_url: format!("{SOCIAL_LINKS} > a:nth-child(2)"),
            twitter_profile_url: format!("{SOCIAL_LINKS} > a:nth-child(3)"),
            facebook_profile_url: format!("{SOCIAL_LINKS} > a:nth-child(4)"),
            snippet_region: ".css-1yxaelb".to_string(),
            snippet_line: "div".to_string(),
        }
    }
}

impl SelectorCatalog {
    /// The query that marks a freshly submitted search as rendered.
    pub fn first_result_indicator(&self) -> &str {
        &self.name
    }
}

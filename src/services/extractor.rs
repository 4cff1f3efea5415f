use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};

use crate::{
    domain::{ResultRecord, SelectorCatalog},
    error::ScrapeError,
};

/// Turns a rendered results page into records. Never fails on markup: a query
/// that matches nothing leaves its field empty.
pub struct Extractor {
    result_container: Selector,
    profile_pic: Selector,
    name: Selector,
    location: Selector,
    linkedin_profile_url: Selector,
    github_profile_url: Selector,
    twitter_profile_url: Selector,
    facebook_profile_url: Selector,
    snippet_region: Selector,
    snippet_line: Selector,
}

impl Extractor {
    pub fn new(catalog: &SelectorCatalog) -> Result<Self, ScrapeError> {
        Ok(Extractor {
            result_container: parse("result_container", &catalog.result_container)?,
            profile_pic: parse("profile_pic", &catalog.profile_pic)?,
            name: parse("name", &catalog.name)?,
            location: parse("location", &catalog.location)?,
            linkedin_profile_url: parse("linkedin_profile_url", &catalog.linkedin_profile_url)?,
            github_profile_url: parse("github_profile_url", &catalog.github_profile_url)?,
            twitter_profile_url: parse("twitter_profile_url", &catalog.twitter_profile_url)?,
            facebook_profile_url: parse("facebook_profile_url", &catalog.facebook_profile_url)?,
            snippet_region: parse("snippet_region", &catalog.snippet_region)?,
            snippet_line: parse("snippet_line", &catalog.snippet_line)?,
        })
    }

    pub fn extract(&self, page_source: &str) -> Vec<ResultRecord> {
        let document = Html::parse_document(page_source);

        document
            .select(&self.result_container)
            .map(|container| self.extract_record(container))
            .collect()
    }

    fn extract_record(&self, container: ElementRef) -> ResultRecord {
        let href = |selector: &Selector| first(container, selector).and_then(|a| attr(a, "href"));

        ResultRecord {
            profile_pic: first(container, &self.profile_pic).and_then(|img| attr(img, "src")),
            name: first(container, &self.name).map(text),
            location: first(container, &self.location).map(text),
            text: self.snippet(container),
            linkedin_profile_url: href(&self.linkedin_profile_url),
            github_profile_url: href(&self.github_profile_url),
            twitter_profile_url: href(&self.twitter_profile_url),
            facebook_profile_url: href(&self.facebook_profile_url),
        }
    }

    /// The first line of the snippet block is its heading and is dropped.
    fn snippet(&self, container: ElementRef) -> Option<String> {
        let region = first(container, &self.snippet_region)?;

        Some(
            region
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|line| self.snippet_line.matches(line))
                .skip(1)
                .map(text)
                .join(", "),
        )
    }
}

fn parse(field: &'static str, css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| {
        log::error!("Bad selector for {}: {:?}", field, e);
        ScrapeError::InvalidSelector {
            field,
            selector: css.to_string(),
        }
    })
}

fn first<'a>(container: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    container.select(selector).next()
}

fn text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn attr(element: ElementRef, name: &str) -> Option<String> {
    element.value().attr(name).map(|v| v.to_string())
}

use std::time::Duration;

use log::{debug, warn};
use regex::{Captures, Regex};
use reqwest::{
    header::{HeaderMap, USER_AGENT},
    Client,
};

use crate::core::html_parser;
use crate::error::coursebot::CourseBotError;
use crate::model::course::{CourseCode, CourseDescription};

/// Full course codes inside a description: department, number, level, campus.
const COURSE_LINK_PATTERN: &str = r"[a-zA-Z]{3}[0-9]{3}[hHyY]1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLookup {
    Found(CourseDescription),
    NotListed,
    /// The page could not be fetched; carries the transport error message.
    Unreachable(String),
}

impl CatalogLookup {
    pub fn description(self) -> Option<CourseDescription> {
        match self {
            CatalogLookup::Found(description) => Some(description),
            _ => None,
        }
    }
}

pub struct Catalog {
    client: Client,
    base_url: String,
    course_link: Regex,
}

impl Catalog {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, CourseBotError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent.parse()?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Catalog {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            course_link: Regex::new(COURSE_LINK_PATTERN).unwrap(),
        })
    }

    pub fn department_url(&self, department: &str) -> String {
        format!("{}/crs_{}.htm", self.base_url, department.to_ascii_lowercase())
    }

    /// Rewrites every full course code into a link to its catalog entry.
    pub fn link_course_codes(&self, text: &str) -> String {
        self.course_link
            .replace_all(text, |caps: &Captures| {
                let code = &caps[0];
                format!("[{}]({}#{})", code, self.department_url(&code[..3]), code)
            })
            .into_owned()
    }

    async fn fetch_page(&self, url: &str) -> Result<String, CourseBotError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("Catalog page {} answered {}", url, status);
        }
        Ok(response.text().await?)
    }

    /// Looks `code` up on its department page. Never fails: transport errors
    /// come back as [`CatalogLookup::Unreachable`].
    pub async fn lookup(&self, code: &CourseCode) -> CatalogLookup {
        let url = self.department_url(&code.department());
        let html = match self.fetch_page(&url).await {
            Ok(html) => html,
            Err(err) => {
                warn!("Fetching {} failed: {}", url, err);
                return CatalogLookup::Unreachable(err.message);
            }
        };

        match html_parser::find_course_entry(&html, code) {
            Some(entry) => CatalogLookup::Found(CourseDescription {
                title: entry.title,
                body: self.link_course_codes(&entry.paragraph),
            }),
            None => CatalogLookup::NotListed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new("http://calendar.artsci.utoronto.ca/", "CourseBot test").unwrap()
    }

    #[test]
    fn builds_department_urls() {
        assert_eq!(
            catalog().department_url("CSC"),
            "http://calendar.artsci.utoronto.ca/crs_csc.htm"
        );
    }

    #[test]
    fn links_keep_original_casing() {
        let linked = catalog().link_course_codes("Prerequisite: csc148H1, MAT137Y1.");
        assert_eq!(
            linked,
            "Prerequisite: [csc148H1](http://calendar.artsci.utoronto.ca/crs_csc.htm#csc148H1), \
             [MAT137Y1](http://calendar.artsci.utoronto.ca/crs_mat.htm#MAT137Y1)."
        );
    }

    #[test]
    fn partial_codes_are_left_alone() {
        let text = "Recommended: CSC148, STA247H5 or a Y course";
        assert_eq!(catalog().link_course_codes(text), text);
    }
}

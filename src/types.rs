use serde::Serialize;

/// Search topic/specialization. Controls which engine and parameters the API
/// uses internally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTopic {
    /// Broad web search.
    #[default]
    General,
    /// Real-time news search.
    News,
    /// Location-based search.
    Location,
}

/// Format the API uses when parsing result content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsingType {
    #[default]
    PlainText,
    Markdown,
    SimplifiedHtml,
}

/// Parameters for the `/search` endpoint.
///
/// Only `query` is required; the remaining fields carry the API defaults.
/// Range constraints (e.g. `num_results` in 1..=100) are validated
/// server-side, not here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchParams {
    pub query: String,
    pub num_results: usize,
    pub topic: SearchTopic,
    /// When true, the API fetches and extracts full page content for each
    /// result instead of returning only metadata. Slower, richer.
    pub deep_search: bool,
    /// Generate an LLM answer summary (only honored when `deep_search` is
    /// false).
    pub include_answer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
    /// Filter results after this date (`YYYY-MM-DD` or `YYYY`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Filter results before this date (`YYYY-MM-DD` or `YYYY`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub locale: String,
    pub country: String,
    pub parsing_type: ParsingType,
}

impl SearchParams {
    /// Builds search parameters with the API defaults: 3 results, general
    /// topic, deep search enabled, `en`/`US`, plain-text parsing.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num_results: 3,
            topic: SearchTopic::General,
            deep_search: true,
            include_answer: false,
            include_domains: None,
            exclude_domains: None,
            start_date: None,
            end_date: None,
            locale: "en".to_owned(),
            country: "US".to_owned(),
            parsing_type: ParsingType::PlainText,
        }
    }

    pub fn num_results(mut self, n: usize) -> Self {
        self.num_results = n;
        self
    }

    pub fn topic(mut self, topic: SearchTopic) -> Self {
        self.topic = topic;
        self
    }

    pub fn deep_search(mut self, enabled: bool) -> Self {
        self.deep_search = enabled;
        self
    }

    pub fn include_answer(mut self, enabled: bool) -> Self {
        self.include_answer = enabled;
        self
    }

    pub fn include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    pub fn date_range(
        mut self,
        start: Option<impl Into<String>>,
        end: Option<impl Into<String>>,
    ) -> Self {
        self.start_date = start.map(Into::into);
        self.end_date = end.map(Into::into);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn parsing_type(mut self, parsing_type: ParsingType) -> Self {
        self.parsing_type = parsing_type;
        self
    }
}

/// Parameters for the `/extract` endpoint.
///
/// The API accepts 1..=20 links per request; the bound is enforced
/// server-side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExtractParams {
    /// URLs to extract content from.
    pub links: Vec<String>,
    /// Browser driver used for extraction.
    pub driver: String,
    /// Optional render delay in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<u64>,
    pub locale: String,
    pub country: String,
    pub parsing_type: ParsingType,
}

impl ExtractParams {
    /// Builds extract parameters for the given links with the API defaults:
    /// `vx6` driver, no render delay, `en`/`US`, plain-text parsing.
    pub fn new<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            links: links.into_iter().map(Into::into).collect(),
            driver: "vx6".to_owned(),
            wait: None,
            locale: "en".to_owned(),
            country: "US".to_owned(),
            parsing_type: ParsingType::PlainText,
        }
    }

    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    pub fn wait(mut self, wait_ms: u64) -> Self {
        self.wait = Some(wait_ms);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn parsing_type(mut self, parsing_type: ParsingType) -> Self {
        self.parsing_type = parsing_type;
        self
    }
}

/// One retrieved document: extracted page content plus source metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

/// Source metadata attached to a [`Document`].
///
/// Fields the API omits default to empty strings, except `position` which
/// defaults to `-1` (unknown rank).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub position: i64,
    pub entity_type: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            snippet: String::new(),
            url: String::new(),
            position: -1,
            entity_type: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_serialize_with_api_defaults() {
        let params = SearchParams::new("rust http clients");
        let json = serde_json::to_value(&params).expect("params must serialize");
        assert_eq!(json["query"], "rust http clients");
        assert_eq!(json["num_results"], 3);
        assert_eq!(json["topic"], "general");
        assert_eq!(json["deep_search"], true);
        assert_eq!(json["parsing_type"], "plain_text");
        // Unset optionals are omitted from the payload entirely.
        assert!(json.get("include_domains").is_none());
        assert!(json.get("start_date").is_none());
    }

    #[test]
    fn extract_params_serialize_links_and_driver() {
        let params = ExtractParams::new(["https://example.com"]).wait(250);
        let json = serde_json::to_value(&params).expect("params must serialize");
        assert_eq!(json["links"][0], "https://example.com");
        assert_eq!(json["driver"], "vx6");
        assert_eq!(json["wait"], 250);
    }

    #[test]
    fn metadata_default_marks_position_unknown() {
        let metadata = DocumentMetadata::default();
        assert_eq!(metadata.position, -1);
        assert!(metadata.title.is_empty());
    }
}

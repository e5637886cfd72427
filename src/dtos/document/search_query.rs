use serde::Deserialize;

/// Search form: a field-scoped substring term plus equality filters and an
/// optional relative date window. `all` (or empty) disables a filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
    #[serde(default = "all")]
    pub search_type: String,
    #[serde(default = "all")]
    pub status: String,
    #[serde(default = "all")]
    pub fax_type: String,
    #[serde(default)]
    pub date_filter: Option<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery {
            search_term: String::new(),
            search_type: all(),
            status: all(),
            fax_type: all(),
            date_filter: None,
        }
    }
}

fn all() -> String {
    "all".to_string()
}

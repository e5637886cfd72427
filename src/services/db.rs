use chrono::{DateTime, Datelike, Duration, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, Regex},
    Client, Collection,
};
use serde::Serialize;

use crate::dtos::document::search_query::SearchQuery;
use crate::models::{document_model::Document, user_model::User};

const DATABASE_NAME: &str = "faxdms";

/// Store-side counters used by the dashboard headline.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DocumentStatistics {
    pub total: u64,
    pub sent: u64,
    pub received: u64,
}

/// Typed wrapper over the MongoDB collections. Methods are thin
/// translations of repository queries into find/sort/count operations;
/// business rules live in the services above.
#[derive(Clone)]
pub struct Database {
    documents: Collection<Document>,
    users: Collection<User>,
}

impl Database {
    pub async fn init(db_url: &str) -> mongodb::error::Result<Self> {
        let client: Client = Client::with_uri_str(db_url).await?;
        let db = client.database(DATABASE_NAME);

        Ok(Database {
            documents: db.collection("documents"),
            users: db.collection("users"),
        })
    }

    pub async fn get_all(&self) -> mongodb::error::Result<Vec<Document>> {
        self.documents
            .find(doc! {})
            .sort(doc! { "date_created": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn get_by_id(&self, id: ObjectId) -> mongodb::error::Result<Option<Document>> {
        self.documents.find_one(doc! { "_id": id }).await
    }

    pub async fn insert(&self, document: &Document) -> mongodb::error::Result<()> {
        self.documents.insert_one(document).await?;
        Ok(())
    }

    pub async fn replace(&self, document: &Document) -> mongodb::error::Result<()> {
        self.documents
            .replace_one(doc! { "_id": document._id }, document)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: ObjectId) -> mongodb::error::Result<bool> {
        let result = self.documents.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn search(&self, query: &SearchQuery) -> mongodb::error::Result<Vec<Document>> {
        let filter = build_search_filter(query, Utc::now());
        self.documents
            .find(filter)
            .sort(doc! { "date_created": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn statistics(&self) -> mongodb::error::Result<DocumentStatistics> {
        Ok(DocumentStatistics {
            total: self.documents.count_documents(doc! {}).await?,
            sent: self
                .documents
                .count_documents(doc! { "status": "sent" })
                .await?,
            received: self
                .documents
                .count_documents(doc! { "status": "received" })
                .await?,
        })
    }

    pub async fn get_user(&self, username: &str) -> mongodb::error::Result<Option<User>> {
        self.users.find_one(doc! { "username": username }).await
    }

    pub async fn create_user(
        &self,
        username: String,
        password_hash: String,
    ) -> mongodb::error::Result<()> {
        let user = User {
            _id: ObjectId::new(),
            username,
            password: password_hash,
            created_at: Utc::now(),
        };
        self.users.insert_one(&user).await?;
        Ok(())
    }
}

/// Fields covered by the `all` search scope.
const SEARCHABLE_FIELDS: [&str; 6] = [
    "name",
    "sender",
    "recipient",
    "fax_number",
    "fax_type",
    "notes",
];

/// Translates a search form into a MongoDB filter document. The term is a
/// case-insensitive substring match scoped to one field (or all of them);
/// status/type are equality filters; the date filter is a `$gte` bound on
/// the creation date.
pub(crate) fn build_search_filter(query: &SearchQuery, now: DateTime<Utc>) -> bson::Document {
    let mut filter = bson::Document::new();

    let term = query.search_term.trim();
    if !term.is_empty() {
        let field = match query.search_type.as_str() {
            "name" => Some("name"),
            "sender" => Some("sender"),
            "recipient" => Some("recipient"),
            "faxnumber" => Some("fax_number"),
            "faxtype" => Some("fax_type"),
            "notes" => Some("notes"),
            _ => None,
        };
        match field {
            Some(field) => {
                filter.insert(field, substring_regex(term));
            }
            None => {
                let any_field: Vec<Bson> = SEARCHABLE_FIELDS
                    .iter()
                    .map(|field| Bson::Document(doc! { *field: substring_regex(term) }))
                    .collect();
                filter.insert("$or", any_field);
            }
        }
    }

    if is_active_filter(&query.status) {
        filter.insert("status", query.status.clone());
    }
    if is_active_filter(&query.fax_type) {
        filter.insert("fax_type", query.fax_type.clone());
    }

    if let Some(window) = query.date_filter.as_deref() {
        if let Some(start) = date_window_start(window, now) {
            filter.insert(
                "date_created",
                doc! { "$gte": bson::DateTime::from_chrono(start) },
            );
        }
    }

    filter
}

/// The term is matched literally, so every regex metacharacter is
/// escaped before it reaches `$regex`.
fn substring_regex(term: &str) -> Regex {
    Regex {
        pattern: escape_regex(term),
        options: "i".to_string(),
    }
}

fn escape_regex(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(
            c,
            '\\' | '.' | '^' | '$' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn is_active_filter(value: &str) -> bool {
    !value.is_empty() && value != "all"
}

/// Lower bound of a relative date window, at the UTC start of day.
pub(crate) fn date_window_start(window: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let today = now.date_naive();
    let start = match window {
        "today" => today,
        "week" => today - Duration::days(7),
        "month" => today.with_day(1)?,
        "year" => today.with_ordinal(1)?,
        _ => return None,
    };
    Some(start.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn query(term: &str, search_type: &str) -> SearchQuery {
        SearchQuery {
            search_term: term.to_string(),
            search_type: search_type.to_string(),
            ..SearchQuery::default()
        }
    }

    fn mid_august() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 15, 13, 30, 0).unwrap()
    }

    #[test]
    fn empty_query_builds_an_empty_filter() {
        let filter = build_search_filter(&SearchQuery::default(), mid_august());
        assert!(filter.is_empty());
    }

    #[test]
    fn scoped_term_targets_one_field() {
        let filter = build_search_filter(&query("مكتب", "sender"), mid_august());
        let expected = doc! {
            "sender": Regex { pattern: "مكتب".to_string(), options: "i".to_string() }
        };
        assert_eq!(filter, expected);
    }

    #[test]
    fn search_term_metacharacters_match_literally() {
        // "1.3" must not match fax number "123".
        let filter = build_search_filter(&query("1.3", "faxnumber"), mid_august());
        let expected = doc! {
            "fax_number": Regex { pattern: "1\\.3".to_string(), options: "i".to_string() }
        };
        assert_eq!(filter, expected);

        // An unbalanced paren stays a valid pattern instead of a server error.
        assert_eq!(escape_regex("secret("), "secret\\(");
        assert_eq!(escape_regex("a+b*c"), "a\\+b\\*c");
        assert_eq!(escape_regex("مكتب"), "مكتب");
    }

    #[test]
    fn all_scope_expands_to_or_over_every_field() {
        let filter = build_search_filter(&query("123", "all"), mid_august());
        let branches = filter.get_array("$or").unwrap();
        assert_eq!(branches.len(), SEARCHABLE_FIELDS.len());
    }

    #[test]
    fn status_and_type_filters_are_equality_matches() {
        let mut q = SearchQuery::default();
        q.status = "sent".to_string();
        q.fax_type = "officer_affairs".to_string();
        let filter = build_search_filter(&q, mid_august());
        assert_eq!(filter.get_str("status").unwrap(), "sent");
        assert_eq!(filter.get_str("fax_type").unwrap(), "officer_affairs");
    }

    #[test]
    fn all_status_means_no_filter() {
        let mut q = SearchQuery::default();
        q.status = "all".to_string();
        let filter = build_search_filter(&q, mid_august());
        assert!(!filter.contains_key("status"));
    }

    #[test]
    fn date_windows_resolve_to_start_of_day_bounds() {
        let now = mid_august();
        let start_of = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();

        assert_eq!(date_window_start("today", now), Some(start_of(2025, 8, 15)));
        assert_eq!(date_window_start("week", now), Some(start_of(2025, 8, 8)));
        assert_eq!(date_window_start("month", now), Some(start_of(2025, 8, 1)));
        assert_eq!(date_window_start("year", now), Some(start_of(2025, 1, 1)));
        assert_eq!(date_window_start("fortnight", now), None);
    }

    #[test]
    fn date_window_becomes_a_gte_bound() {
        let mut q = SearchQuery::default();
        q.date_filter = Some("month".to_string());
        let filter = build_search_filter(&q, mid_august());
        let bound = filter.get_document("date_created").unwrap();
        assert!(bound.contains_key("$gte"));
    }
}

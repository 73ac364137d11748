//! HTTP client for a PostgREST endpoint, as exposed at `{url}/rest/v1` by
//! managed Postgres services.
//!
//! Requests carry the access key both as `apikey` and as a bearer token.
//! Filters map to `column=eq.value`, ordering to `order=column.desc`, and an
//! embedded child table to `select=*,child(*)` (the server resolves the
//! foreign key on its own).

use super::tables::{Filter, Row, Select, TableClient};
use crate::error::{DrinkError, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;

const REST_PATH: &str = "rest/v1";

pub struct PostgrestClient {
    base_url: String,
    key: String,
    http: Client,
}

impl PostgrestClient {
    pub fn new(url: &str, key: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("drinkapp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: format!("{}/{}", url.trim().trim_end_matches('/'), REST_PATH),
            key: key.trim().to_string(),
            http,
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }
}

/// Query string pairs for a select.
pub fn select_params(query: &Select) -> Vec<(String, String)> {
    let columns = match &query.embed {
        Some(embed) => format!("*,{}(*)", embed.table),
        None => "*".to_string(),
    };
    let mut params = vec![("select".to_string(), columns)];
    params.extend(filter_params(&query.filters));
    if let Some(order) = &query.order {
        let direction = if order.descending { "desc" } else { "asc" };
        params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
    }
    params
}

pub fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column.clone(), format!("eq.{}", literal(&f.value))))
        .collect()
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Turn non-2xx responses into [`DrinkError::Remote`] with the body as message.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(DrinkError::Remote {
        status: status.as_u16(),
        message,
    })
}

impl TableClient for PostgrestClient {
    async fn select(&self, table: &str, query: &Select) -> Result<Vec<Row>> {
        let response = self
            .request(Method::GET, table)
            .query(&select_params(query))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update(&self, table: &str, values: Row, filters: &[Filter]) -> Result<Vec<Row>> {
        let response = self
            .request(Method::PATCH, table)
            .query(&filter_params(filters))
            .header("Prefer", "return=representation")
            .json(&values)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()> {
        let response = self
            .request(Method::DELETE, table)
            .query(&filter_params(filters))
            .header("Prefer", "return=minimal")
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let client = PostgrestClient::new("https://xyz.supabase.co/", "anon").unwrap();
        assert_eq!(
            client.table_url("drinks"),
            "https://xyz.supabase.co/rest/v1/drinks"
        );
    }

    #[test]
    fn test_select_params_with_embed_and_order() {
        let query = Select::all()
            .embed("ingredients", "drink_id")
            .order_by("date", true);
        assert_eq!(
            pairs(&select_params(&query)),
            vec![("select", "*,ingredients(*)"), ("order", "date.desc")]
        );
    }

    #[test]
    fn test_filter_params_render_eq() {
        let filters = vec![Filter::eq("drink_id", "a1"), Filter::eq("rating", 5)];
        assert_eq!(
            pairs(&filter_params(&filters)),
            vec![("drink_id", "eq.a1"), ("rating", "eq.5")]
        );
    }

    #[test]
    fn test_plain_select_params() {
        assert_eq!(pairs(&select_params(&Select::all())), vec![("select", "*")]);
    }
}

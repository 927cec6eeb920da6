use std::{collections::HashMap, convert::Infallible};

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Raw deal fields from a JSON object or a urlencoded form body.
///
/// Never rejects: an unreadable body yields an empty map, which then fails
/// validation in the handler after the id existence check.
#[derive(Debug, Default)]
pub struct DealPayload(pub Map<String, Value>);

/// `application/json` or any `application/*+json`, parameters ignored.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.strip_prefix("application/") {
        Some(subtype) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_content_type)
}

#[async_trait]
impl<S> FromRequest<S> for DealPayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = if is_json(&req) {
            match Json::<Map<String, Value>>::from_request(req, state).await {
                Ok(Json(map)) => map,
                Err(rejection) => {
                    debug!(error = %rejection, "unreadable json payload");
                    Map::new()
                }
            }
        } else {
            match Form::<HashMap<String, String>>::from_request(req, state).await {
                Ok(Form(form)) => form.into_iter().map(|(k, v)| (k, Value::String(v))).collect(),
                Err(rejection) => {
                    debug!(error = %rejection, "unreadable form payload");
                    Map::new()
                }
            }
        };
        Ok(Self(fields))
    }
}

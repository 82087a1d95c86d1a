use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::csv_reader::Row;

/// Which CMS endpoint one run drives. The two variants share the whole
/// pipeline and differ only in URL and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Update the applicant's employment/occupation fields.
    Occupation,
    /// Post the fixed data-segregation note to the applicant's institution.
    Comment,
}

/// A fully built request, ready to execute. Pure value: equal
/// (config, action, row) inputs always produce equal requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub uid: String,
    pub method: Method,
    pub url: String,
    pub authorization: String,
    pub body: Value,
}

/// Note text posted by the comment variant, fixed for the whole batch.
pub const CMS_COMMENT_TEXT: &str = "- Change occupation CMS note: Occupation updated due to data segregation issue from 2.0 to 3.0.\n\
     - Change criminal subjected CMS note: Criminal subjected updated as user is from 2.0.";

/// Build the request for one row. No I/O and no hidden state. Returns
/// `None` when the row cannot address the endpoint at all (a comment row
/// without an institution key); the caller skips such rows.
pub fn build_request(config: &Config, action: UpdateAction, row: &Row) -> Option<ApiRequest> {
    let base_url = config.api.base_url.trim_end_matches('/');

    match action {
        UpdateAction::Occupation => Some(ApiRequest {
            uid: row.uid.clone(),
            method: Method::POST,
            url: format!("{}/cms/v2/applicants/{}/occupation", base_url, row.uid),
            authorization: config.auth_header(),
            body: occupation_body(row),
        }),
        UpdateAction::Comment => {
            let institution = row.institution.as_ref()?;

            Some(ApiRequest {
                uid: row.uid.clone(),
                method: Method::POST,
                url: format!(
                    "{}/cms/v2/applicants/{}/institutions/{}/comment",
                    base_url, row.uid, institution
                ),
                authorization: config.auth_header(),
                body: json!({ "comment": CMS_COMMENT_TEXT }),
            })
        }
    }
}

/// Body for the occupation update. Optional row fields are present only
/// when the CSV carried a value for them; the two boolean flags are fixed
/// for every applicant in the batch.
fn occupation_body(row: &Row) -> Value {
    let mut body = Map::new();
    if let Some(key) = &row.expected_employment_key {
        body.insert("employment_key".to_string(), Value::String(key.clone()));
    }
    if let Some(key) = row.expected_occupation_key.as_deref() {
        body.insert(
            "occupation_key".to_string(),
            Value::String(pad_occupation_key(key)),
        );
    }
    body.insert("is_public_politician".to_string(), Value::Bool(false));
    body.insert("is_criminal_investigation".to_string(), Value::Bool(false));
    Value::Object(body)
}

/// CMS occupation keys are 3-digit codes. Spreadsheets drop leading zeros
/// from numeric cells, so an all-digit key shorter than 3 characters is
/// padded back to width 3 ("7" becomes "007"). Anything else passes
/// through unchanged.
pub fn pad_occupation_key(key: &str) -> String {
    if !key.is_empty() && key.len() < 3 && key.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>3}", key)
    } else {
        key.to_string()
    }
}

use reqwest::Client;
use tracing::{debug, error};

use crate::outcome::Outcome;
use crate::request::ApiRequest;

/// HTTP executor for built requests. Classification is by status alone:
/// any 2xx response is a success, everything else (including transport
/// failures) is a failure. `execute` never returns `Err`, so one bad row
/// cannot stop the rest of the run.
pub struct CmsClient {
    client: Client,
}

impl CmsClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Send one request and wait for the response.
    pub async fn execute(&self, request: &ApiRequest) -> Outcome {
        debug!("{} {} body: {}", request.method, request.url, request.body);

        let response = self
            .client
            .request(request.method.clone(), &request.url)
            .header("Authorization", &request.authorization)
            .header("Content-Type", "application/json")
            .json(&request.body)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status();
                let detail = status.as_u16().to_string();

                if status.is_success() {
                    Outcome::success(&request.uid, detail)
                } else {
                    error!(
                        "Request for applicant {} failed with status {}",
                        request.uid, status
                    );
                    // The CMS explains rejections in a code/desc JSON body.
                    if let Ok(body) = response.text().await {
                        if !body.is_empty() {
                            debug!("Response body for applicant {}: {}", request.uid, body);
                        }
                    }
                    Outcome::failure(&request.uid, detail)
                }
            }
            Err(e) => {
                error!("Request for applicant {} failed: {}", request.uid, e);
                Outcome::failure(&request.uid, e.to_string())
            }
        }
    }
}

impl Default for CmsClient {
    fn default() -> Self {
        Self::new()
    }
}

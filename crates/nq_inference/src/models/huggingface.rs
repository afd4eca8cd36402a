use std::fmt;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;
use nq_core::{Error, InferenceModel, Result, SummaryOptions};
use tracing::debug;
use crate::Config;

pub const DEFAULT_API_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_MODEL_ID: &str = "facebook/bart-large-cnn";

const SAMPLE_TEXT: &str = "Markets in Mumbai closed higher on Monday as banking and information \
technology shares gained, while investors waited for the central bank's policy decision later \
in the week. Analysts said foreign inflows and easing oil prices supported the rally.";

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
    options: RequestOptions,
}

#[derive(Serialize)]
struct Parameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
    num_beams: usize,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummarizationResponse {
    Summaries(Vec<SummaryText>),
    Failure { error: String },
}

#[derive(Deserialize)]
struct SummaryText {
    summary_text: String,
}

/// Sequence-to-sequence summarizer served over the Hugging Face inference protocol.
pub struct HuggingFaceModel {
    client: Client,
    endpoint: Url,
    model_id: String,
    api_key: Option<String>,
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HuggingFaceModel {
    /// Connects and runs one sample summarization. Any failure means the model is unusable.
    pub async fn new(config: &Config) -> Result<Self> {
        let model = Self::connect(config)?;
        model.check_available(&config.options).await?;
        Ok(model)
    }

    /// Builds the client without contacting the endpoint.
    pub fn connect(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;
        let endpoint = endpoint_url(&config.api_url, &config.model_id)?;

        Ok(Self {
            client,
            endpoint,
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn check_available(&self, options: &SummaryOptions) -> Result<()> {
        self.summarize(SAMPLE_TEXT, options).await.map(|_| ()).map_err(|e| {
            Error::Inference(format!(
                "Model '{}' is not available at {}: {}",
                self.model_id, self.endpoint, e
            ))
        })
    }
}

fn endpoint_url(api_url: &str, model_id: &str) -> Result<Url> {
    let base = api_url.trim_end_matches('/');
    let model_id = model_id.trim_matches('/');
    if model_id.is_empty() {
        return Err(Error::Config("Model id must not be empty".to_string()));
    }
    Ok(Url::parse(&format!("{}/{}", base, model_id))?)
}

fn build_request<'a>(text: &'a str, options: &SummaryOptions) -> SummarizationRequest<'a> {
    SummarizationRequest {
        inputs: text,
        parameters: Parameters {
            min_length: options.min_length,
            max_length: options.max_length,
            do_sample: false,
            num_beams: options.num_beams,
        },
        options: RequestOptions { wait_for_model: true },
    }
}

fn parse_response(status: StatusCode, body: &str) -> Result<String> {
    let parsed = serde_json::from_str::<SummarizationResponse>(body);
    if !status.is_success() {
        let reason = match parsed {
            Ok(SummarizationResponse::Failure { error }) => error,
            _ => body.trim().to_string(),
        };
        return Err(Error::Inference(format!("{} ({})", reason, status)));
    }

    match parsed? {
        SummarizationResponse::Summaries(summaries) => summaries
            .into_iter()
            .next()
            .map(|s| s.summary_text)
            .ok_or_else(|| Error::Inference("Model returned no summary".to_string())),
        SummarizationResponse::Failure { error } => Err(Error::Inference(error)),
    }
}

#[async_trait]
impl InferenceModel for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.model_id
    }

    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        let request = build_request(text, options);

        let mut builder = self.client.post(self.endpoint.clone()).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Inference endpoint answered {} ({} bytes)", status, body.len());

        parse_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap};
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    const TOKEN: &str = "hf_test";

    async fn fake_summarize(headers: HeaderMap, Json(body): Json<Value>) -> Response {
        let expected = format!("Bearer {}", TOKEN);
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str());
        if !authorized {
            return (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Authorization header is invalid" })),
            )
                .into_response();
        }
        if body["parameters"]["do_sample"] != false {
            return (
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({ "error": "sampling is not allowed" })),
            )
                .into_response();
        }

        let summary = format!(
            "{} beams: {}",
            body["parameters"]["num_beams"],
            body["inputs"].as_str().unwrap_or_default()
        );
        Json(json!([{ "summary_text": summary }])).into_response()
    }

    /// Serves a bart-large-cnn lookalike on a free local port and returns its base URL.
    async fn serve_summarizer() -> String {
        let app = Router::new().route("/models/facebook/bart-large-cnn", post(fake_summarize));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/models", addr)
    }

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("https://api-inference.huggingface.co/models/", "facebook/bart-large-cnn").unwrap();
        assert_eq!(url.as_str(), "https://api-inference.huggingface.co/models/facebook/bart-large-cnn");

        assert!(endpoint_url("not a url", "facebook/bart-large-cnn").is_err());
        assert!(endpoint_url("http://localhost:8080", "").is_err());
    }

    #[test]
    fn test_request_carries_length_bounds() {
        let options = SummaryOptions::default();
        let request = build_request("Some text", &options);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["inputs"], "Some text");
        assert_eq!(json["parameters"]["min_length"], 30);
        assert_eq!(json["parameters"]["max_length"], 130);
        assert_eq!(json["parameters"]["do_sample"], false);
        assert_eq!(json["parameters"]["num_beams"], 4);
        assert_eq!(json["options"]["wait_for_model"], true);
    }

    #[test]
    fn test_parse_summary() {
        let body = r#"[{"summary_text": "Stocks rose."}]"#;
        assert_eq!(parse_response(StatusCode::OK, body).unwrap(), "Stocks rose.");
    }

    #[test]
    fn test_parse_empty_summary_passes_through() {
        let body = r#"[{"summary_text": ""}]"#;
        assert_eq!(parse_response(StatusCode::OK, body).unwrap(), "");
    }

    #[test]
    fn test_parse_errors() {
        let body = r#"{"error": "Model facebook/bart-large-cnn is currently loading"}"#;
        let err = parse_response(StatusCode::SERVICE_UNAVAILABLE, body).unwrap_err();
        assert!(err.to_string().contains("currently loading"));

        let err = parse_response(StatusCode::OK, "[]").unwrap_err();
        assert!(matches!(err, Error::Inference(_)));

        let err = parse_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));

        let err = parse_response(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            api_key: Some("hf_secret".to_string()),
            ..Config::default()
        };
        let model = HuggingFaceModel::connect(&config).unwrap();
        let printed = format!("{:?}", model);
        assert!(!printed.contains("hf_secret"));
        assert_eq!(model.name(), "facebook/bart-large-cnn");
    }

    #[tokio::test]
    async fn test_summarize_sends_bearer_token() {
        let config = Config {
            api_url: serve_summarizer().await,
            api_key: Some(TOKEN.to_string()),
            ..Config::default()
        };
        let model = HuggingFaceModel::new(&config).await.unwrap();

        let summary = model.summarize("Rates held", &SummaryOptions::default()).await.unwrap();
        assert_eq!(summary, "4 beams: Rates held");
    }

    #[tokio::test]
    async fn test_rejected_token_fails_startup() {
        let config = Config {
            api_url: serve_summarizer().await,
            api_key: None,
            ..Config::default()
        };
        let err = HuggingFaceModel::new(&config).await.unwrap_err();

        assert!(matches!(err, Error::Inference(_)));
        let message = err.to_string();
        assert!(message.contains("Authorization header is invalid"));
        assert!(message.contains("401"));
        assert!(message.contains("facebook/bart-large-cnn"));
    }

    #[tokio::test]
    async fn test_wrong_token_fails_startup() {
        let config = Config {
            api_url: serve_summarizer().await,
            api_key: Some("hf_wrong".to_string()),
            ..Config::default()
        };
        let err = HuggingFaceModel::new(&config).await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}

use std::{fmt, io::Read, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::foundation::error::CardError;

/// fal.ai Flux endpoint.
pub const FAL_ENDPOINT: &str = "https://fal.run/fal-ai/flux/dev";

const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);
const DOWNLOAD_LIMIT: u64 = 64 * 1024 * 1024;
const USER_AGENT: &str = concat!("cardgen/", env!("CARGO_PKG_VERSION"));

/// Failures talking to an image generation service.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Connection, DNS, TLS or read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("http status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response was not the JSON we expected.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response parsed but carried no image URL.
    #[error("no image url in response: {body}")]
    MissingImageUrl {
        /// Response body, for diagnostics.
        body: String,
    },
}

impl From<ApiError> for CardError {
    fn from(e: ApiError) -> Self {
        CardError::Other(anyhow::Error::new(e))
    }
}

impl From<ureq::Error> for ApiError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(status, resp) => ApiError::Status {
                status,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(t) => ApiError::Transport(t.to_string()),
        }
    }
}

/// Output aspect presets understood by the Flux endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    /// 512x512.
    #[default]
    Square,
    /// 1024x1024.
    SquareHd,
    /// 768x1024.
    #[serde(rename = "portrait_4_3")]
    Portrait4x3,
    /// 576x1024.
    #[serde(rename = "portrait_16_9")]
    Portrait16x9,
    /// 1024x768.
    #[serde(rename = "landscape_4_3")]
    Landscape4x3,
    /// 1024x576.
    #[serde(rename = "landscape_16_9")]
    Landscape16x9,
}

impl ImageSize {
    /// All presets.
    pub const ALL: [ImageSize; 6] = [
        ImageSize::Square,
        ImageSize::SquareHd,
        ImageSize::Portrait4x3,
        ImageSize::Portrait16x9,
        ImageSize::Landscape4x3,
        ImageSize::Landscape16x9,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::Square => "square",
            ImageSize::SquareHd => "square_hd",
            ImageSize::Portrait4x3 => "portrait_4_3",
            ImageSize::Portrait16x9 => "portrait_16_9",
            ImageSize::Landscape4x3 => "landscape_4_3",
            ImageSize::Landscape16x9 => "landscape_16_9",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageSize::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CardError::validation(format!("unknown image size \"{s}\"")))
    }
}

/// Something that turns a prompt into encoded image bytes.
pub trait ImageGenerator {
    /// Generate one image and return its encoded bytes (PNG or JPEG).
    fn generate_image(&self, prompt: &str, size: ImageSize) -> Result<Vec<u8>, ApiError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    image_size: ImageSize,
    num_images: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    images: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    #[serde(default)]
    url: Option<String>,
}

/// Pull `images[0].url` out of a generation response body.
pub fn parse_image_url(body: &str) -> Result<String, ApiError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    parsed
        .images
        .into_iter()
        .next()
        .and_then(|img| img.url)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::MissingImageUrl {
            body: body.to_owned(),
        })
}

/// Blocking fal.ai client.
#[derive(Clone)]
pub struct FalClient {
    agent: ureq::Agent,
    key: String,
    endpoint: String,
}

impl fmt::Debug for FalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FalClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl FalClient {
    /// Client for the default endpoint authenticating with `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_endpoint(key, FAL_ENDPOINT)
    }

    /// Client for a custom endpoint.
    pub fn with_endpoint(key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(GENERATE_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            key: key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn request_url(&self, prompt: &str, size: ImageSize) -> Result<String, ApiError> {
        let payload = serde_json::to_string(&GenerateRequest {
            prompt,
            image_size: size,
            num_images: 1,
        })
        .map_err(|e| ApiError::Malformed(e.to_string()))?;

        let body = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Key {}", self.key))
            .set("Content-Type", "application/json")
            .send_string(&payload)?
            .into_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        parse_image_url(&body)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let resp = self.agent.get(url).timeout(DOWNLOAD_TIMEOUT).call()?;
        let len: usize = resp
            .header("Content-Length")
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);
        let mut bytes = Vec::with_capacity(len);
        resp.into_reader()
            .take(DOWNLOAD_LIMIT)
            .read_to_end(&mut bytes)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes)
    }
}

impl ImageGenerator for FalClient {
    #[tracing::instrument(skip(self, prompt), fields(size = %size))]
    fn generate_image(&self, prompt: &str, size: ImageSize) -> Result<Vec<u8>, ApiError> {
        tracing::info!(endpoint = %self.endpoint, "requesting image");
        let url = self.request_url(prompt, size)?;
        tracing::debug!(%url, "downloading image");
        self.download(&url)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/imagegen/client.rs"]
mod tests;

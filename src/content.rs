use gloo_net::http::Request;
use log::{error, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::date_key::DateKey;

/// Tried in order inside each folder; older content still ships `question.json`.
const META_FILES: [&str; 2] = ["meta.json", "question.json"];
const QUESTION_IMAGE: &str = "question.png";
const ANSWER_IMAGE: &str = "answer.png";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("server answered {0}")]
    Status(u16),

    #[error("malformed meta document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("meta document has no options")]
    NoOptions,

    #[error("correct answer {0:?} is not one of the options")]
    UnknownCorrect(String),
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct DailyQuestion {
    pub options: Vec<String>,
    pub correct: String,
    pub word: Option<String>,
    pub title: Option<String>,
}

impl DailyQuestion {
    fn validate(self) -> Result<Self, LoadError> {
        if self.options.is_empty() {
            return Err(LoadError::NoOptions);
        }
        if !self.options.iter().any(|o| *o == self.correct) {
            return Err(LoadError::UnknownCorrect(self.correct));
        }
        Ok(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MetaDocument {
    Nested { question: DailyQuestion },
    Flat(DailyQuestion),
}

pub fn parse_meta(body: &str) -> Result<DailyQuestion, LoadError> {
    let question = match serde_json::from_str::<MetaDocument>(body) {
        Ok(MetaDocument::Nested { question }) | Ok(MetaDocument::Flat(question)) => question,
        // Re-parse flat to surface serde's message instead of the untagged one.
        Err(_) => serde_json::from_str::<DailyQuestion>(body)?,
    };
    question.validate()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentOrigin {
    Dated,
    Default,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ResolvedContent {
    pub question: DailyQuestion,
    pub question_img: String,
    pub answer_img: String,
    pub origin: ContentOrigin,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetLayout {
    root: String,
    default_folder: String,
}

impl AssetLayout {
    pub fn new(root: &str, default_folder: &str) -> Self {
        Self {
            root: root.to_string(),
            default_folder: default_folder.to_string(),
        }
    }

    pub fn dated_folder(&self, key: &DateKey) -> String {
        format!("{}/{}", self.root, key)
    }

    pub fn default_folder(&self) -> String {
        format!("{}/{}", self.root, self.default_folder)
    }
}

/// Network seam for the resolver.
pub trait ContentSource {
    async fn get_text(&self, url: &str) -> Result<String, LoadError>;

    /// `Content-Type` of `url` when it answers with a success status.
    async fn content_type(&self, url: &str) -> Option<String>;
}

pub struct HttpSource;

impl ContentSource for HttpSource {
    async fn get_text(&self, url: &str) -> Result<String, LoadError> {
        let resp = Request::get(url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(LoadError::Status(resp.status()));
        }
        resp.text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))
    }

    async fn content_type(&self, url: &str) -> Option<String> {
        let resp = Request::get(url).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        Some(resp.headers().get("content-type").unwrap_or_default())
    }
}

/// Resolves the day's content. Every request is awaited before the next one
/// starts.
///
/// Metadata falls back folder-wide: when the dated folder has no usable
/// document, the default folder supplies the metadata and both images. When
/// the dated metadata is usable, each image falls back to its default
/// counterpart on its own.
pub async fn resolve<S: ContentSource>(
    source: &S,
    layout: &AssetLayout,
    key: &DateKey,
) -> Option<ResolvedContent> {
    let dated = layout.dated_folder(key);
    let default = layout.default_folder();

    if let Some(question) = load_meta(source, &dated).await {
        info!("Loaded question for {key} from {dated}");
        let question_img = pick_image(source, &dated, &default, QUESTION_IMAGE).await;
        let answer_img = pick_image(source, &dated, &default, ANSWER_IMAGE).await;
        return Some(ResolvedContent {
            question,
            question_img,
            answer_img,
            origin: ContentOrigin::Dated,
        });
    }

    warn!("No usable question in {dated}; falling back to {default}");
    match load_meta(source, &default).await {
        Some(question) => Some(ResolvedContent {
            question,
            question_img: format!("{default}/{QUESTION_IMAGE}"),
            answer_img: format!("{default}/{ANSWER_IMAGE}"),
            origin: ContentOrigin::Default,
        }),
        None => {
            error!("No question available for {key}");
            None
        }
    }
}

async fn load_meta<S: ContentSource>(source: &S, folder: &str) -> Option<DailyQuestion> {
    for name in META_FILES {
        let url = format!("{folder}/{name}");
        let loaded = match source.get_text(&url).await {
            Ok(body) => parse_meta(&body),
            Err(e) => Err(e),
        };
        match loaded {
            Ok(question) => return Some(question),
            Err(e) => warn!("{url}: {e}"),
        }
    }
    None
}

async fn pick_image<S: ContentSource>(source: &S, dated: &str, default: &str, name: &str) -> String {
    let url = format!("{dated}/{name}");
    // Dev servers answer unknown paths with index.html and a 200.
    let is_image = source
        .content_type(&url)
        .await
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("image/"));
    if is_image {
        url
    } else {
        warn!("{url} missing; using default image");
        format!("{default}/{name}")
    }
}

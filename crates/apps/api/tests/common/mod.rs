#![allow(dead_code)]

use api::create_app;
use app_state::{AnalysisSettings, ApiSettings, AppSettings, LoggingSettings, SecretSettings};
use async_trait::async_trait;
use color_eyre::Result;
use language_model::{Completion, ModelError, ModelResult, VisionModel, VisionRequest};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// What the fake provider does when called.
#[derive(Clone)]
pub enum Script {
    Reply(&'static str),
    Fail(StatusCode, &'static str),
}

pub struct ScriptedModel {
    script: Script,
    configured: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(text: &'static str) -> Arc<Self> {
        Self::with(Script::Reply(text), true)
    }

    pub fn failing(status: StatusCode, body: &'static str) -> Arc<Self> {
        Self::with(Script::Fail(status, body), true)
    }

    pub fn unconfigured() -> Arc<Self> {
        Self::with(Script::Reply("{}"), false)
    }

    fn with(script: Script, configured: bool) -> Arc<Self> {
        Arc::new(Self {
            script,
            configured,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl VisionModel for ScriptedModel {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, request: VisionRequest<'_>) -> ModelResult<Completion> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt.to_string());
        }
        match self.script.clone() {
            Script::Reply(text) => Ok(Completion {
                content: text.to_string(),
                total_tokens: 1200,
            }),
            Script::Fail(status, body) => Err(ModelError::Api {
                status,
                body: body.to_string(),
            }),
        }
    }
}

pub struct TestServer {
    pub base_url: String,
    pub http_client: reqwest::Client,
}

pub fn test_settings(analysis: AnalysisSettings) -> AppSettings {
    AppSettings {
        analysis,
        logging: LoggingSettings {
            level: "debug".to_string(),
        },
        api: ApiSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            allowed_origins: vec![],
        },
        secrets: SecretSettings {
            openai_api_key: Some("sk-test".to_string()),
        },
    }
}

/// Serve the app on an ephemeral port.
pub async fn spawn_server(model: Arc<ScriptedModel>, analysis: AnalysisSettings) -> Result<TestServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_app(test_settings(analysis), model);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("test server stopped: {e}");
        }
    });

    Ok(TestServer {
        base_url: format!("http://{addr}"),
        http_client: reqwest::Client::new(),
    })
}

pub fn thumbnail_form(image: Vec<u8>, title: &str, niche: Option<&str>) -> Result<Form> {
    let part = Part::bytes(image)
        .file_name("thumbnail.jpg")
        .mime_str("image/jpeg")?;
    let form = Form::new().part("image", part).text("title", title.to_string());
    Ok(match niche {
        Some(niche) => form.text("niche", niche.to_string()),
        None => form,
    })
}

use advisor_service::config::{AdvisorConfig, GroqConfig};
use advisor_service::services::metrics::init_metrics;
use advisor_service::services::providers::mock::MockCompletionProvider;
use advisor_service::services::providers::CompletionProvider;
use advisor_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
}

/// Groq settings pointed at a test server.
pub fn groq_config(api_base: &str, timeout_seconds: u64) -> GroqConfig {
    GroqConfig {
        api_key: Secret::new("test-api-key".to_string()),
        model: "llama3-70b-8192".to_string(),
        api_base: api_base.to_string(),
        timeout_seconds,
    }
}

fn test_config(groq: GroqConfig) -> AdvisorConfig {
    AdvisorConfig {
        common: Config { port: 0 },
        groq,
    }
}

impl TestApp {
    /// Spawn an app backed by a mock provider with a canned answer.
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Arc::new(MockCompletionProvider::replying("Mock answer"))).await
    }

    /// Spawn an app backed by the given provider.
    pub async fn spawn_with_provider(provider: Arc<dyn CompletionProvider>) -> Self {
        // Unreachable address: these tests must never leave the process.
        let config = test_config(groq_config("http://127.0.0.1:9", 15));

        let app = Application::with_provider(config, provider)
            .await
            .expect("Failed to build test application");

        Self::run(app).await
    }

    /// Spawn an app backed by the real Groq provider against `api_base`.
    pub async fn spawn_with_groq(api_base: &str, timeout_seconds: u64) -> Self {
        let config = test_config(groq_config(api_base, timeout_seconds));

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        Self::run(app).await
    }

    async fn run(app: Application) -> Self {
        init_metrics();

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address }
    }
}

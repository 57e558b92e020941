//! Test helper module for pricing-service integration tests.

#![allow(dead_code)]

use pricing_service::config::PricingConfig;
use pricing_service::services::init_metrics;
use pricing_service::startup::Application;

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn a new test application on a random port.
    pub async fn spawn() -> Self {
        // Initialize metrics (required for metrics endpoint test)
        init_metrics();

        let config = PricingConfig {
            port: 0, // Random port
            service_name: "pricing-service-test".to_string(),
            log_level: "warn".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if let Ok(response) = client.get(&health_url).send().await {
                if response.status().is_success() {
                    break;
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        Self {
            address,
            port,
            client,
        }
    }

    /// POST a JSON body to a path and return the response.
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}

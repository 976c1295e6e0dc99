use std::sync::Arc;

use vertex_client::{GeminiService, TextModel, VertexConfig};

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match VertexConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Set LOCATION, and either GOOGLE_APPLICATION_CREDENTIALS or GOOGLE_APPLICATION_CREDENTIALS_JSON.");
            std::process::exit(1);
        }
    };

    let model: Arc<dyn TextModel> = match GeminiService::new(config).await {
        Ok(service) => {
            println!("Vertex AI client initialized successfully");
            Arc::new(service)
        }
        Err(e) => {
            eprintln!("Failed to initialize Vertex AI client: {}", e);
            eprintln!("Please ensure:");
            eprintln!("1. PROJECT_ID and LOCATION are correctly set.");
            eprintln!("2. The service account key is complete and valid JSON.");
            eprintln!("3. The service account has the 'Vertex AI User' role.");
            std::process::exit(1);
        }
    };

    let app = api::app(model);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("Listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

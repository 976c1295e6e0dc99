use reqwest::Client;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = "http://127.0.0.1:3000";

    println!("Testing document Q&A endpoint");

    let payload = json!({
        "documents": "https://example.com/policy.pdf",
        "questions": [
            "What is the grace period for premium payment?",
            "Does this policy cover knee surgery?"
        ]
    });

    let response = client
        .post(format!("{}/hackrx/run", base_url))
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    println!("Status: {}", response.status());
    let body: serde_json::Value = response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&body)?);

    Ok(())
}

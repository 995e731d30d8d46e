use client::{Client, config::DEFAULT_CONFIG_PATH};
use request::Message;
use response::{ChatCompletionsResponse, ModelList};
use serde_json::Value;
use tracing::info;

const NO_CONTENT: &str = "No response content received";

fn separator() {
    println!("\n{}\n", "=".repeat(50));
}

fn reply_content(response: &Value) -> String {
    ChatCompletionsResponse::try_from(response)
        .ok()
        .and_then(|response| response.content().map(str::to_string))
        .unwrap_or_else(|| NO_CONTENT.to_string())
}

async fn show_models(client: &Client) {
    println!("Getting available model list...");
    match client.list_models().await {
        Some(models) => {
            println!("Available models:");
            let models = ModelList::try_from(&models).unwrap_or_default();
            for id in models.ids() {
                println!("- {id}");
            }
        }
        None => println!("Failed to get model list"),
    }
}

async fn default_chat(client: &Client) {
    println!("Performing chat completion test...");
    let messages = [
        Message::system("You are a helpful assistant."),
        Message::user(
            "Hello, briefly introduce the features of DeepSeek models in less than 200 words.",
        ),
    ];

    match client.chat_completion(&messages, None, None, None).await {
        Some(response) => println!("Assistant response: {}", reply_content(&response)),
        None => println!("Chat completion request failed"),
    }
}

async fn custom_chat(client: &Client) {
    println!("Custom conversation example...");
    let messages = [
        Message::system(
            "You are a programming assistant, specializing in helping solve programming problems.",
        ),
        Message::user("Write a quick sort algorithm in Python, no more than 500 characters."),
    ];

    match client
        .chat_completion(&messages, None, Some(500), Some(0.5))
        .await
    {
        Some(response) => println!(
            "Programming assistant response:\n{}",
            reply_content(&response)
        ),
        None => println!("Custom conversation request failed"),
    }
}

async fn configured_chat(client: &Client) {
    println!("Using default configuration parameters...");
    let messages = [
        Message::system("You are a knowledgeable assistant."),
        Message::user(
            "Briefly explain the three main branches of artificial intelligence in less than 500 words.",
        ),
    ];

    match client.chat_completion(&messages, None, None, None).await {
        Some(response) => println!(
            "Knowledge assistant response:\n{}",
            reply_content(&response)
        ),
        None => println!("Request with default configuration failed"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = Client::from_file(DEFAULT_CONFIG_PATH)?;
    info!(
        "Client ready for {} with model {}",
        client.config().base_url,
        client.config().model
    );

    show_models(&client).await;
    separator();
    default_chat(&client).await;
    separator();
    custom_chat(&client).await;
    separator();
    configured_chat(&client).await;

    Ok(())
}

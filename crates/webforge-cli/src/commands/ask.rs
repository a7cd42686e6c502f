use anyhow::Result;
use webforge_core::chat::{BufferContext, build_prompt, extract_snippets};
use webforge_core::secret::SecretService;
use webforge_infrastructure::{ConfigService, SecretServiceImpl, WebforgePaths};
use webforge_interaction::{CompletionClient, GeminiApiClient};

/// One exchange without an editor: no buffer context, reply to stdout.
pub async fn run(utterance: &str, model: Option<String>) -> Result<()> {
    let secret_path = WebforgePaths::new(None).ensure_secret_file()?;
    let secrets = SecretServiceImpl::new(None)?.load_secrets().await?;
    if secrets.api_key().is_none() {
        tracing::warn!("[Ask] No Gemini API key in {}", secret_path.display());
    }
    let config = ConfigService::new(None)?.get_config();

    let model = model
        .or_else(|| secrets.model_name().map(str::to_string))
        .unwrap_or(config.model.name);
    tracing::info!("[Ask] Sending to {}", model);
    let client = GeminiApiClient::from_secrets(&secrets)
        .with_model(model)
        .with_generation(config.generation);

    let prompt = build_prompt(utterance, BufferContext::new(None, ""));
    let reply = client.complete(&prompt).await?;
    println!("{reply}");

    for snippet in extract_snippets(&reply) {
        eprintln!(
            "📄 {} ({})",
            snippet.file_name.as_deref().unwrap_or("-"),
            snippet.language
        );
    }
    Ok(())
}

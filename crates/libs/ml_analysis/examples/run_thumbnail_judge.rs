use app_state::load_app_settings;
use common_types::AnalysisMode;
use language_model::{ChatClient, sniff_mime_type};
use ml_analysis::{
    MetadataContext, ThumbnailImage, build_prompt, compute_metadata, judge_thumbnail,
    normalize_reply, resolve_niche,
};
use std::env;
use std::time::Instant;

/// Usage: `run_thumbnail_judge <image> <title> [niche]`
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut args = env::args().skip(1);
    let image_path = args.next().unwrap_or_else(|| "assets/thumbnail.jpg".to_string());
    let title = args
        .next()
        .unwrap_or_else(|| "J'ai testé le pire restaurant de Paris".to_string());
    let niche = resolve_niche(args.next().as_deref());

    let settings = load_app_settings()?;
    let client = ChatClient::with_base_url(&settings.analysis.base_url)
        .model(settings.analysis.model.clone())
        .maybe_api_key(settings.secrets.openai_api_key.clone())
        .build();

    let bytes = tokio::fs::read(&image_path).await?;
    let image = ThumbnailImage {
        bytes: &bytes,
        mime_type: sniff_mime_type(&bytes),
    };

    for mode in [AnalysisMode::Expert, AnalysisMode::Niche] {
        let now = Instant::now();
        let prompt = build_prompt(&title, niche, mode);
        let reply = judge_thumbnail(&client, &settings.analysis, &prompt, image, mode).await?;
        let result = normalize_reply(&reply.raw_text, mode);
        let metadata = compute_metadata(
            &reply,
            &MetadataContext {
                mode,
                image_bytes: bytes.len(),
                niche,
                cost_per_token: settings.analysis.cost_per_token,
            },
        );
        println!("{mode:?} → {}", serde_json::to_string_pretty(&result)?);
        println!("\t{metadata:?}");
        println!("\tjudge_thumbnail {:?}", now.elapsed());
    }

    Ok(())
}

use anyhow::{Context, Result, bail};
use arcana::genai::{
    DeckType, GenAiConfig, GeneratedImage, GenerativeClient, SOULMATE_FAILED, SoulmateDetails,
    SourceImage, mime_for_path,
};
use colored::*;
use dialoguer::Input;
use std::fs;
use std::path::Path;

use crate::GenAiArgs;

fn client(args: &GenAiArgs) -> Result<GenerativeClient> {
    let config = match &args.gemini_key {
        Some(key) => GenAiConfig::with_api_key(key.clone()),
        None => GenAiConfig::from_env()
            .context("set GEMINI_API_KEY (or API_KEY) or pass --gemini-key")?,
    };
    Ok(GenerativeClient::new(config)?)
}

fn save(image: &GeneratedImage, path: &Path) -> Result<()> {
    fs::write(path, image.decode()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("   📂 {}", path.display());
    Ok(())
}

pub async fn image(args: &GenAiArgs, prompt: &str, out: &str) -> Result<()> {
    let client = client(args)?;
    println!("{}", "🔮 Conjuring your vision...".magenta().bold());

    let image = client.generate_image(prompt).await?;
    save(&image, Path::new(out))?;
    println!("{}", "✨ The vision is complete.".green().bold());
    Ok(())
}

pub async fn edit(args: &GenAiArgs, input: &str, prompt: &str, out: &str) -> Result<()> {
    let Some(mime_type) = mime_for_path(input) else {
        bail!("{} is not a supported image (png, jpg, webp, gif, heic)", input);
    };
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input))?;
    let source = SourceImage::from_bytes(&bytes, mime_type);

    let client = client(args)?;
    println!("{}", "🔮 Reshaping your vision...".magenta().bold());

    let image = client
        .edit_image(&source.base64, &source.mime_type, prompt)
        .await?;
    save(&image, Path::new(out))?;
    println!("{}", "✨ The vision has changed.".green().bold());
    Ok(())
}

pub async fn tarot(
    args: &GenAiArgs,
    spread: &str,
    cards: usize,
    deck: DeckType,
    reveal: bool,
    out_dir: &str,
) -> Result<()> {
    let client = client(args)?;
    println!(
        "{}",
        format!("🃏 Shuffling the {} deck...", deck).magenta().bold()
    );

    let mut reading = match client.generate_tarot_reading(spread, cards, deck).await {
        Ok(reading) => reading,
        Err(e) => {
            println!("{}", e.user_message().red());
            return Err(e.into());
        }
    };

    for (i, card) in reading.cards.iter().enumerate() {
        println!(
            "\n{} {} {}",
            format!("{}.", i + 1).dimmed(),
            card.position_name.cyan().bold(),
            format!("· {}", card.name).bold()
        );
        println!("   {}", card.interpretation);
    }
    println!(
        "\n{}\n   {}",
        "The cards speak as one:".magenta().bold(),
        reading.overall_interpretation
    );

    if !reveal {
        return Ok(());
    }

    let out_dir = Path::new(out_dir);
    fs::create_dir_all(out_dir)?;
    println!("\n{}", "🎨 Revealing the card faces...".cyan());
    for index in 0..reading.cards.len() {
        match reading.reveal_card(index, &client).await {
            Ok(true) => {
                let card = &reading.cards[index];
                if let Some(art) = &card.base64_image {
                    let image = GeneratedImage::now(art.clone(), "image/png".to_string());
                    save(&image, &out_dir.join(card_file_name(index, &card.name)))?;
                }
            }
            Ok(false) => {}
            Err(e) => println!(
                "   {} {}",
                format!("{} stays veiled:", reading.cards[index].name).yellow(),
                e
            ),
        }
    }
    println!(
        "{}",
        format!(
            "✨ {}/{} cards revealed.",
            reading.revealed_count(),
            reading.cards.len()
        )
        .green()
        .bold()
    );
    Ok(())
}

fn card_file_name(index: usize, name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("{:02}-{}.png", index + 1, slug.trim_matches('-'))
}

pub async fn soulmate(args: &GenAiArgs, details: [Option<String>; 4], out: &str) -> Result<()> {
    let [dob, pob, tob, preference] = details;
    let details = SoulmateDetails {
        dob: ask(dob, "Date of birth")?,
        pob: ask(pob, "Place of birth")?,
        tob: ask(tob, "Time of birth")?,
        preference: ask(preference, "Who are you seeking")?,
    };

    let client = client(args)?;
    println!("{}", "💫 Reading the stars...".magenta().bold());

    let profile = match client.generate_soulmate_profile(&details).await {
        Ok(profile) => profile,
        Err(e) => {
            println!("{}", SOULMATE_FAILED.red());
            return Err(e.into());
        }
    };

    println!(
        "\n{} {}",
        "Your soulmate:".magenta().bold(),
        profile.initials.bold()
    );
    for (label, text) in profile.sections() {
        println!("\n{}\n   {}", label.cyan().bold(), text);
    }

    let path = format!("{}.{}", out, profile.image.file_extension());
    save(&profile.image, Path::new(&path))?;
    Ok(())
}

fn ask(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

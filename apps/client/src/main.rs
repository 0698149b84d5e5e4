mod ai_client;
mod careers;
mod config;
mod errors;
mod export;
mod generation;
mod models;
mod session;
mod upload;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use bytes::Bytes;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::GeminiClient;
use crate::careers::AddOutcome;
use crate::config::Config;
use crate::models::plan::CareerPlan;
use crate::session::Session;

/// Reimagine a photo subject across careers and draft transition plans.
#[derive(Debug, Parser)]
#[command(name = "client", version)]
struct Cli {
    /// Path to the subject photo (JPEG, PNG, or WEBP, up to 5 MiB).
    #[arg(long)]
    photo: PathBuf,

    /// Career to reimagine the subject as (repeatable, up to 4).
    #[arg(long = "career", value_name = "NAME")]
    careers: Vec<String>,

    /// Replace the career list with three random suggestions first.
    #[arg(long)]
    surprise: bool,

    /// Open the transition plan for this career once the gallery settles.
    #[arg(long, value_name = "NAME")]
    plan: Option<String>,

    /// Export the opened plan as a paginated document.
    #[arg(long, requires = "plan")]
    export: bool,

    /// Save every settled portrait into the output directory.
    #[arg(long)]
    download: bool,

    /// Output directory for documents and portrait downloads.
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Reimagined client v{}", env!("CARGO_PKG_VERSION"));

    let service = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    let mut session = Session::new(service);

    // Upload + subject classification. Validation failures stay inline; a
    // classification failure is absorbed inside the session.
    let photo_bytes = Bytes::from(std::fs::read(&cli.photo)?);
    if let Err(e) = session.attach_photo(photo_bytes).await {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    println!("Detected subject: {}", session.subject().descriptor());

    // Career selection
    if cli.surprise {
        session.surprise_me();
    }
    for career in &cli.careers {
        match session.add_career(career) {
            AddOutcome::Added => {}
            AddOutcome::Duplicate | AddOutcome::Empty => {} // silently ignored
            AddOutcome::Full => {
                eprintln!(
                    "Career list is full ({} max); skipping {career}",
                    careers::MAX_CAREERS
                );
            }
        }
    }
    if session.careers().is_empty() {
        anyhow::bail!("No careers selected. Pass --career or --surprise.");
    }
    println!("Careers: {}", session.careers().join(", "));

    // Portrait fan-out: all careers at once, every card settles.
    session.generate_images().await.map_err(|e| {
        anyhow::anyhow!(e.user_message())
    })?;
    println!("\nGallery:");
    for image in session.images() {
        match &image.error {
            None => println!("  {:<24} portrait ready", image.career),
            Some(label) => println!("  {:<24} {label}", image.career),
        }
    }

    if cli.download {
        std::fs::create_dir_all(&cli.out)?;
        for image in session.images() {
            if !image.has_image() {
                continue;
            }
            match export::writer::save_portrait(image, &cli.out) {
                Ok(path) => println!("Saved {}", path.display()),
                Err(e) => eprintln!("{}", e.user_message()),
            }
        }
    }

    // Plan view + export
    if let Some(career) = &cli.plan {
        match session.select_career(career).await {
            Ok(()) => {
                if let Some(plan) = session.selected_plan() {
                    print_plan(plan);
                }
                if cli.export {
                    std::fs::create_dir_all(&cli.out)?;
                    export_selected(&session, &cli.out);
                }
            }
            // Back on the gallery; the cache is untouched and a retry is an
            // explicit re-run.
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    Ok(())
}

fn export_selected(session: &Session, out: &std::path::Path) {
    let Some(plan) = session.selected_plan() else {
        return;
    };
    match session.selected_career_image() {
        Some(portrait_url) => match export::export_plan(plan, portrait_url, out) {
            Ok(path) => println!("Exported plan to {}", path.display()),
            Err(e) => eprintln!("{}", e.user_message()),
        },
        None => eprintln!("No portrait available for {}; cannot export.", plan.career),
    }
}

fn print_plan(plan: &CareerPlan) {
    println!("\n{}", plan.career);
    if plan.is_fictional {
        println!("[Satirical Mode Active]");
    }
    println!("\n{}\n", plan.intro);

    println!("Key Skills:");
    for skill in &plan.skills_to_develop {
        println!("  - {skill}");
    }

    println!("Learn From:");
    for course in &plan.recommended_courses {
        println!("  - {} ({})", course.title, course.resolved_url());
    }

    println!("Thought Leaders:");
    for leader in &plan.thought_leaders {
        println!("  - {} ({})", leader.title, leader.resolved_url());
    }

    println!("Target Companies:");
    for company in &plan.target_companies {
        println!("  - {} ({})", company.title, company.resolved_url());
    }

    println!("\n8-Week Roadmap:");
    for week in &plan.weeks {
        println!("  Week {}: {}", week.week_number, week.theme);
        for goal in &week.goals {
            println!("    goal: {goal}");
        }
        for item in &week.action_items {
            println!("    action: {item}");
        }
    }
}

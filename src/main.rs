use clap::{Parser, Subcommand};
use image_host::ImageUploadService;
use memeverse::services::explore_service::{Category, SortDirection, SortKey};
use memeverse::{AppConfig, AppError, AppStore, ExploreQuery, FetchStatus, Meme, Profile};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memeverse")]
#[command(about = "Browse, like, upload and comment on memes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog memes
    Browse {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
        /// Trending, New, Classic or Random
        #[arg(short, long, default_value = "Trending", value_parser = parse_category)]
        category: Category,
        /// likes, date or comments
        #[arg(long, default_value = "likes", value_parser = parse_sort)]
        sort: SortKey,
        #[arg(long)]
        ascending: bool,
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Show one meme with its comments
    Show { id: String },
    /// Like a meme
    Like { id: String },
    /// Remove a like
    Unlike { id: String },
    /// List liked memes
    Liked,
    /// List your uploaded memes, newest first
    Posts,
    /// Upload an image as a new meme
    Upload {
        file: PathBuf,
        #[arg(short, long, default_value = "")]
        caption: String,
    },
    /// Comment on a meme
    Comment { id: String, text: String },
    /// Show the current theme, optionally toggling it
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Show or edit the profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Image file to use as avatar
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// Most liked catalog memes
    Leaderboard {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_str(s).ok_or_else(|| format!("unknown category '{}'", s))
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    SortKey::from_str(s).ok_or_else(|| format!("unknown sort key '{}'", s))
}

fn print_meme(meme: &Meme, liked: bool) {
    let dims = match (meme.width, meme.height) {
        (Some(w), Some(h)) => format!("{}x{}", w, h),
        _ => "-".to_string(),
    };
    println!(
        "{} {:<14} {:<40} {:>9}  {}",
        if liked { "♥" } else { " " },
        meme.id,
        meme.name,
        dims,
        meme.url
    );
}

/// Loads the catalog and reports a failed load
async fn load_catalog(app: &mut AppStore, config: &AppConfig) -> Result<(), AppError> {
    app.load_catalog(&config.catalog_client()).await;
    if app.memes().fetch_status == FetchStatus::Failed {
        let message = app
            .memes()
            .fetch_error
            .clone()
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(AppError::Network(message));
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut app = AppStore::open(&config);
    app.on_theme_change(|theme| log::info!("Applying {} theme", theme));

    match cli.command {
        Commands::Browse {
            search,
            category,
            sort,
            ascending,
            limit,
        } => {
            load_catalog(&mut app, &config).await?;
            let query = ExploreQuery {
                search,
                category,
                sort,
                direction: if ascending {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            };
            println!(
                "{} / {} ({})",
                category.as_str(),
                sort.display_name(),
                app.theme()
            );
            for meme in app.explore(&query).into_iter().take(limit) {
                print_meme(meme, app.memes().is_liked(&meme.id));
            }
        }
        Commands::Show { id } => {
            load_catalog(&mut app, &config).await?;
            let meme = app
                .memes()
                .find(&id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Meme {}", id)))?;
            let liked = app.memes().is_liked(&id);
            print_meme(&meme, liked);
            println!("{}", if liked { "1 like" } else { "0 likes" });

            let comments = app.comments(&id);
            println!("{} comments", comments.len());
            for comment in comments {
                println!(
                    "  {} ({}): {}",
                    comment.author,
                    comment.created_at.format("%Y-%m-%d"),
                    comment.text
                );
            }
        }
        Commands::Like { id } => {
            app.like(&id)?;
            println!("Liked {}", id);
        }
        Commands::Unlike { id } => {
            app.unlike(&id)?;
            println!("Unliked {}", id);
        }
        Commands::Liked => {
            if let Err(e) = load_catalog(&mut app, &config).await {
                // Uploaded memes still resolve without the catalog
                log::warn!("{}", e);
            }
            for meme in app.liked_memes() {
                print_meme(meme, true);
            }
        }
        Commands::Posts => {
            for meme in app.posts() {
                print_meme(meme, app.memes().is_liked(&meme.id));
                if let Some(posted) = meme
                    .created_at_millis()
                    .and_then(chrono::DateTime::from_timestamp_millis)
                {
                    println!("  posted {}", posted.format("%Y-%m-%d %H:%M"));
                }
            }
        }
        Commands::Upload { file, caption } => {
            let bytes = std::fs::read(&file)?;
            let host = ImageUploadService::new(config.image_host_config());
            let meme = app
                .upload_meme(&host, &bytes, &caption, config.max_upload_bytes)
                .await?;
            println!("Uploaded {} -> {}", meme.id, meme.url);
        }
        Commands::Comment { id, text } => {
            let comments = app.post_comment(&id, &text);
            println!("{} comments on {}", comments.len(), id);
        }
        Commands::Theme { toggle } => {
            if toggle {
                app.toggle_theme();
            }
            println!("{}", app.theme());
        }
        Commands::Profile { name, bio, avatar } => {
            if let Some(path) = avatar {
                memeverse::services::profile_service::set_avatar_from_file(
                    app.storage(),
                    &path,
                    config.max_upload_bytes,
                )?;
            }
            if name.is_some() || bio.is_some() {
                let current = app.profile();
                let updated = Profile {
                    name: name.unwrap_or(current.name),
                    bio: bio.unwrap_or(current.bio),
                    avatar: current.avatar,
                };
                app.save_profile(&updated)?;
            }

            let profile = app.profile();
            println!("{}", profile.name);
            println!("{}", profile.bio);
            println!(
                "avatar: {}",
                if profile.avatar.is_some() { "set" } else { "none" }
            );
            println!(
                "{} posts, {} liked",
                app.posts().len(),
                app.memes().liked_ids.len()
            );
        }
        Commands::Leaderboard { limit } => {
            load_catalog(&mut app, &config).await?;
            for (rank, meme) in app.leaderboard(limit).into_iter().enumerate() {
                println!(
                    "{:>2}. {} ({} likes)",
                    rank + 1,
                    meme.name,
                    app.memes().like_count(&meme.id)
                );
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

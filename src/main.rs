use clap::{Parser, Subcommand};
use s3_gallery::{
    caption,
    config::Config,
    gallery::GalleryLoader,
    models::UploadStatus,
    storage::{MemoryStore, ObjectStore, S3Client},
    utils,
    workflow::UploadController,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "s3-gallery", version, about = "Upload images to S3 and browse captioned uploads")]
struct Cli {
    /// Keep uploads in memory instead of sending them to S3 (no S3_* credentials needed)
    #[arg(long, global = true)]
    dry_run: bool,

    /// Directory for the TUI log file
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive uploader and gallery (default)
    Tui,
    /// Upload one file and wait for the storage service to acknowledge it
    Upload {
        /// File to upload; its name becomes the object key
        path: PathBuf,
    },
    /// Print the eligible gallery records
    Gallery {
        /// Print captions with hashtags wrapped in markup
        #[arg(long)]
        markup: bool,
    },
}

fn build_store(config: &Config, dry_run: bool) -> anyhow::Result<Arc<dyn ObjectStore>> {
    if dry_run {
        info!("Dry run: uploads are kept in memory");
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(S3Client::from_config(config.storage()?)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);

    // The TUI owns the terminal, so its logs go to a file
    let _guard = match command {
        Command::Tui => Some(utils::init_file_logger(&cli.log_dir)),
        _ => {
            utils::init_logger();
            None
        }
    };

    let config = Config::from_env()?;
    match &config.storage {
        Some(storage) => info!("Configuration loaded: {:?}", storage),
        None => info!("Configuration loaded without S3 storage"),
    }

    match command {
        Command::Tui => {
            let store = build_store(&config, cli.dry_run)?;
            s3_gallery::tui::run(config, store).await
        }
        Command::Upload { path } => upload(&config, cli.dry_run, path).await,
        Command::Gallery { markup } => print_gallery(&config, markup).await,
    }
}

async fn upload(config: &Config, dry_run: bool, path: PathBuf) -> anyhow::Result<()> {
    let store = build_store(config, dry_run)?;
    let mut controller = UploadController::from_config(store, config);

    let Some(id) = controller.select_files(vec![path]) else {
        return Ok(());
    };

    while let Some((changed, status)) = controller.next_change().await {
        if changed != id {
            continue;
        }
        match status {
            UploadStatus::Uploading { percent } => eprintln!("Uploading {}%", percent),
            UploadStatus::Complete => {
                println!("File uploaded!");
                return Ok(());
            }
            UploadStatus::Failed(reason) => anyhow::bail!("Upload failed: {}", reason),
            UploadStatus::Idle => break,
        }
    }
    Ok(())
}

async fn print_gallery(config: &Config, markup: bool) -> anyhow::Result<()> {
    let gallery = GalleryLoader::new(config.metadata_url()?).load().await?;

    if gallery.is_empty() {
        println!("No images uploaded yet.");
        return Ok(());
    }

    for record in gallery.records() {
        match &config.gallery.cdn_url {
            Some(cdn) => println!("{}  {}", record.storage_key, record.image_url(cdn)),
            None => println!("{}", record.storage_key),
        }
        let (generated, translated) = if markup {
            (
                caption::render_markup(&record.generated_caption),
                caption::render_markup(&record.translated_caption),
            )
        } else {
            (record.generated_caption.clone(), record.translated_caption.clone())
        };
        println!("  caption:     {}", generated);
        println!("  translation: {}", translated);
    }
    Ok(())
}

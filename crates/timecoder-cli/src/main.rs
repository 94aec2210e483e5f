use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use timecoder_core::{
    AlwaysConfirm, Config, ConfirmGate, Credentials, GithubClient, ISSUE_PAGES, IssueHost,
    OpenAiSummarizer, Pipeline, ProcessedIssues, RepositoryConfig, TranscriptProcessor,
    YoutubeClient, YoutubeTranscripts, playlist_id_from_url,
};

#[derive(Parser)]
#[command(name = "timecoder")]
#[command(
    about = "Scan GitHub issues for timecode requests and post AI-generated video chapter summaries"
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Post comments without asking for confirmation
    #[arg(short, long)]
    yes: bool,
}

/// Interactive [y/N] gate on the controlling terminal.
struct StdinConfirm;

impl ConfirmGate for StdinConfirm {
    fn confirm(&self, _issue_title: &str) -> bool {
        let term = Term::stdout();
        if term.write_str("\nProceed with commit? [y/N]: ").is_err() {
            return false;
        }
        term.read_line()
            .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false)
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

async fn process_repository(
    repo: &RepositoryConfig,
    credentials: &Credentials,
    transcripts: &YoutubeTranscripts,
    confirm: &dyn ConfirmGate,
) -> Result<()> {
    println!(
        "Processing repository: {}",
        style(repo.full_name()).cyan().bold()
    );

    let github = GithubClient::new(&credentials.github_token, repo.full_name());
    let youtube = YoutubeClient::new(&credentials.youtube_api_key);
    let processor = TranscriptProcessor::new(
        Box::new(OpenAiSummarizer::new(&credentials.openai_api_key)),
        &repo.repo_name,
    );
    let pipeline = Pipeline {
        issues: &github,
        videos: &youtube,
        transcripts,
        processor: &processor,
        confirm,
    };

    let mut seen = ProcessedIssues::new();

    for page in 1..=ISSUE_PAGES {
        let spinner = create_spinner(&format!("Fetching issue page {page}..."));
        let video_titles = github.video_titles_from_issues(page).await;
        spinner.finish_with_message(format!(
            "{} Page {page}: {} timecode request(s)",
            style("✓").green().bold(),
            video_titles.len()
        ));

        for playlist_url in &repo.playlist_urls {
            println!("Processing playlist: {playlist_url}");
            let playlist_id = playlist_id_from_url(playlist_url);
            pipeline
                .process_videos(&mut seen, playlist_id, &video_titles)
                .await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    let config = match Config::load(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    println!(
        "\n{}  {}\n",
        style("timecoder").cyan().bold(),
        style("Video Chapter Bot").dim()
    );

    let transcripts = YoutubeTranscripts::new()?;
    let confirm: Box<dyn ConfirmGate> = if cli.yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirm)
    };

    for repo in &config.repositories {
        if let Err(e) = process_repository(repo, &credentials, &transcripts, confirm.as_ref()).await
        {
            println!(
                "{} Repository {} failed: {e}",
                style("✗").red().bold(),
                repo.full_name()
            );
        }
    }

    Ok(())
}

use std::time::Duration;

use loam::github::TreeClient;
use loam::remote::RepoOrigin;
use loam::sync::{sync_repository, SyncRequest};

use crate::config::Config;
use crate::progress::ProgressReporter;

pub(crate) struct SyncArgs {
    pub origin: String,
    pub branch: Option<String>,
    pub max_files: Option<usize>,
    pub no_files: bool,
    pub timeout: Option<u64>,
}

pub(crate) async fn handle_sync(
    args: SyncArgs,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.github_token().ok_or(
        "GitHub token required. Set LOAM_GITHUB_TOKEN or add [github].token to the config file.",
    )?;

    let origin: RepoOrigin = args.origin.parse()?;

    #[cfg(feature = "migrate")]
    let db = loam::connect_and_migrate(database_url).await?;
    #[cfg(not(feature = "migrate"))]
    let db = loam::db::connect(database_url).await?;

    let client = TreeClient::new(token);

    let mut request = SyncRequest::new(origin);
    request.branch = args.branch;
    request.sync_files = !args.no_files;
    request.max_files = args.max_files.unwrap_or(config.sync.max_files);
    request.timeout = args.timeout.map(Duration::from_secs);

    let callback = ProgressReporter::new().into_callback();
    let outcome = sync_repository(&db, &client, request, Some(&callback)).await?;

    println!(
        "Synced {} ({}): {} files, source {}",
        outcome.origin, outcome.branch, outcome.files_synced, outcome.source_id
    );

    Ok(())
}

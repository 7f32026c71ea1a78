use loam::store;

use crate::LogAction;

pub(crate) async fn handle_log(
    action: LogAction,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "migrate")]
    let db = loam::connect_and_migrate(database_url).await?;
    #[cfg(not(feature = "migrate"))]
    let db = loam::db::connect(database_url).await?;

    match action {
        LogAction::List { origin } => {
            let logs = match origin {
                Some(origin) => {
                    let source = super::source::resolve(&db, &origin).await?;
                    store::sync_log::list_for_source(&db, source.id).await?
                }
                None => store::sync_log::list(&db).await?,
            };

            if logs.is_empty() {
                println!("No sync logs.");
                return Ok(());
            }
            for log in logs {
                let completed = log
                    .completed_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  files={}  started={}  completed={}  source={}",
                    log.status,
                    log.files_added,
                    log.started_at.to_rfc3339(),
                    completed,
                    log.source_id
                );
            }
        }
    }

    Ok(())
}

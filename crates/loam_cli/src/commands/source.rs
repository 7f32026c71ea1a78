use loam::db::DatabaseConnection;
use uuid::Uuid;

use loam::entity::prelude::{SourceModel, SourceMode};
use loam::store;

use crate::SourceAction;

pub(crate) async fn handle_source(
    action: SourceAction,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "migrate")]
    let db = loam::connect_and_migrate(database_url).await?;
    #[cfg(not(feature = "migrate"))]
    let db = loam::db::connect(database_url).await?;

    match action {
        SourceAction::List => {
            let sources = store::source::list(&db).await?;
            if sources.is_empty() {
                println!("No sources registered.");
                return Ok(());
            }
            for source in sources {
                let synced = source
                    .synced_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "{}  {} ({})  branch={}  synced={}  id={}",
                    source.mode,
                    source.origin,
                    source.name,
                    source.branch.as_deref().unwrap_or("-"),
                    synced,
                    source.id
                );
            }
        }
        SourceAction::Delete { source } => {
            let model = resolve(&db, &source).await?;
            store::source::delete(&db, model.id).await?;
            println!("Deleted source {} ({})", model.origin, model.id);
        }
        SourceAction::Files { source } => {
            let model = resolve(&db, &source).await?;
            let files = store::file_record::list_for_source(&db, model.id).await?;
            if files.is_empty() {
                println!("No files mirrored for {}.", model.origin);
                return Ok(());
            }
            for file in files {
                println!("{:>8}  {}  {}", file.size, file.mime_type, file.path);
            }
        }
    }

    Ok(())
}

/// Accept either a UUID or an `owner/repo` origin.
pub(crate) async fn resolve(
    db: &DatabaseConnection,
    source: &str,
) -> Result<SourceModel, Box<dyn std::error::Error>> {
    let found = match Uuid::parse_str(source) {
        Ok(id) => store::source::find_by_id(db, id).await?,
        Err(_) => store::source::find_by_origin(db, source, SourceMode::Remote).await?,
    };
    found.ok_or_else(|| format!("No source matching '{source}'").into())
}

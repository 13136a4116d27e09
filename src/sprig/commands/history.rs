use crate::commands::CmdResult;
use crate::error::Result;
use crate::history::history_feed;
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(store: &PlantStore<B>, limit: Option<usize>) -> Result<CmdResult> {
    let mut feed = history_feed(&store.list()?);
    if let Some(limit) = limit {
        feed.truncate(limit);
    }
    Ok(CmdResult::default().with_history(feed))
}

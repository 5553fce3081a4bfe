use crate::models::LogEntry;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

/// Handle to the append-only `logs` collection.
#[derive(Clone)]
pub struct LogStore {
    collection: Collection<LogEntry>,
}

impl LogStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("logs"),
        }
    }

    pub async fn insert(&self, entry: &LogEntry) -> mongodb::error::Result<()> {
        self.collection.insert_one(entry).await?;
        Ok(())
    }

    /// Sum of the `cost` field across all log entries.
    pub async fn total_cost(&self) -> mongodb::error::Result<f64> {
        let pipeline = vec![doc! {
            "$group": { "_id": null, "total": { "$sum": "$cost" } }
        }];
        let mut cursor = self.collection.aggregate(pipeline).await?;
        let total = cursor
            .try_next()
            .await?
            .and_then(|d| d.get_f64("total").ok())
            .unwrap_or(0.0);
        Ok(total)
    }
}

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use sublens_core::{ExportError, PostRecord};
use tracing::{debug, info};

// CSV columns: every record field except the embedded comment payload.
const CSV_COLUMNS: &[&str] = &[
    "id",
    "created_utc",
    "subreddit",
    "author",
    "title",
    "full_url",
    "domain_category",
    "post_length_chars",
    "has_disclaimer",
    "mentions_influencers",
    "over_18",
    "upvote_score",
    "upvote_ratio",
    "num_comments",
    "total_engagement",
    "post_sentiment",
    "avg_comment_sentiment",
    "sentiment_gap",
];

#[derive(Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing was collected; no file is written.
    NoData,
    Written { records: usize },
}

/// Writes the accumulated record set to a flattened CSV and a full-fidelity
/// JSON document. Both writes are plain overwrites.
#[derive(Debug, Clone)]
pub struct Exporter {
    csv_path: PathBuf,
    json_path: PathBuf,
}

impl Exporter {
    pub fn new(csv_path: impl Into<PathBuf>, json_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            json_path: json_path.into(),
        }
    }

    pub fn export(&self, records: &[PostRecord]) -> Result<ExportOutcome, ExportError> {
        if records.is_empty() {
            info!("No data collected, skipping export");
            return Ok(ExportOutcome::NoData);
        }

        self.write_csv(records)?;
        self.write_json(records)?;

        info!(
            "Exported {} records to {} and {}",
            records.len(),
            self.csv_path.display(),
            self.json_path.display()
        );
        Ok(ExportOutcome::Written {
            records: records.len(),
        })
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    fn write_csv(&self, records: &[PostRecord]) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(&self.csv_path)?;

        writer.write_record(CSV_COLUMNS)?;
        for record in records {
            writer.write_record([
                record.id.clone(),
                record.created_utc.clone(),
                record.subreddit.clone(),
                record.author.clone(),
                record.title.clone(),
                record.full_url.clone(),
                record.domain_category.to_string(),
                record.post_length_chars.to_string(),
                record.has_disclaimer.to_string(),
                record.mentions_influencers.to_string(),
                record.over_18.to_string(),
                record.upvote_score.to_string(),
                record.upvote_ratio.to_string(),
                record.num_comments.to_string(),
                record.total_engagement.to_string(),
                record.post_sentiment.to_string(),
                record.avg_comment_sentiment.to_string(),
                record.sentiment_gap.to_string(),
            ])?;
        }

        writer.flush()?;
        debug!("Wrote {}", self.csv_path.display());
        Ok(())
    }

    fn write_json(&self, records: &[PostRecord]) -> Result<(), ExportError> {
        let file = File::create(&self.json_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        debug!("Wrote {}", self.json_path.display());
        Ok(())
    }
}

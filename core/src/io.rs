//! Loader and sink seams, plus the end-to-end pipeline.
//!
//! RULE: the hierarchy and engine never touch files. Records come in
//! through a MemberSource, commissions leave through a CommissionSink.
//! Record validation (finite, non-negative revenue) happens here, at the
//! loader boundary.

use crate::{
    config::CommissionConfig,
    engine::{CommissionEngine, Commissions},
    error::CommissionResult,
    hierarchy::Hierarchy,
    member::MemberRecord,
    timing::timed,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Produces member records in input order.
pub trait MemberSource {
    fn load(&mut self) -> CommissionResult<Vec<MemberRecord>>;
}

/// Accepts the final id → commission mapping.
pub trait CommissionSink {
    fn accept(&mut self, commissions: &Commissions) -> CommissionResult<()>;
}

/// Reads a JSON array of `{id, parent_id, monthly_revenue}` objects.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl MemberSource for JsonFileSource {
    fn load(&mut self) -> CommissionResult<Vec<MemberRecord>> {
        let file = File::open(&self.path)?;
        let records: Vec<MemberRecord> = serde_json::from_reader(BufReader::new(file))?;
        validate_records(&records)?;
        log::debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

/// Writes commissions as a 2-space indented JSON object.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CommissionSink for JsonFileSink {
    fn accept(&mut self, commissions: &Commissions) -> CommissionResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, commissions)?;
        writer.flush()?;
        log::debug!("Wrote {} commissions to {}", commissions.len(), self.path.display());
        Ok(())
    }
}

/// In-memory source for tests and embedding.
pub struct MemorySource {
    records: Vec<MemberRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<MemberRecord>) -> Self {
        Self { records }
    }
}

impl MemberSource for MemorySource {
    fn load(&mut self) -> CommissionResult<Vec<MemberRecord>> {
        validate_records(&self.records)?;
        Ok(self.records.clone())
    }
}

/// Keeps the last batch of commissions it was handed.
#[derive(Default)]
pub struct MemorySink {
    pub received: Option<Commissions>,
}

impl CommissionSink for MemorySink {
    fn accept(&mut self, commissions: &Commissions) -> CommissionResult<()> {
        self.received = Some(commissions.clone());
        Ok(())
    }
}

fn validate_records(records: &[MemberRecord]) -> CommissionResult<()> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(position, record)| record.validate(position))
}

/// Load, build, calculate, emit. Returns what was handed to the sink.
pub fn run_pipeline(
    source: &mut dyn MemberSource,
    sink: &mut dyn CommissionSink,
    config: CommissionConfig,
) -> CommissionResult<Commissions> {
    config.validate()?;
    let records = timed("Load", || source.load())?;
    let hierarchy = timed("Build hierarchy", || Hierarchy::build(records))?;
    let commissions = timed("Calculate commissions", || {
        CommissionEngine::with_config(&hierarchy, config).calculate_commissions()
    })?;
    timed("Emit", || sink.accept(&commissions))?;
    log::info!(
        "Pipeline complete: {} members, total commission {:.2}",
        commissions.len(),
        commissions.total()
    );
    Ok(commissions)
}

//! Audit log port

use super::super::models::AuditEntry;

/// Append-only record of who changed what
pub trait AuditLog: Send + Sync {
    /// Store an entry
    fn record(&self, entry: &AuditEntry) -> anyhow::Result<()>;

    /// The most recent `limit` entries, newest first
    fn recent(&self, limit: usize) -> anyhow::Result<Vec<AuditEntry>>;
}

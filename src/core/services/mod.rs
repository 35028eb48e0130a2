pub mod allocation_service;
pub mod gap_service;
pub mod income_service;
pub mod migration_service;
pub mod snapshot_service;

pub use allocation_service::AllocationService;
pub use gap_service::{GapMessage, GapService, GapSeverity};
pub use income_service::IncomeService;
pub use migration_service::{MigrationOutcome, MigrationService};
pub use snapshot_service::{SnapshotService, MAX_SNAPSHOT_HISTORY};

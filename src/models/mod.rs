//! Data models exchanged with the condominium backend

pub mod enums;
pub mod report;
pub mod resident;
pub mod visitor;

// Re-export commonly used types
pub use enums::{VisitReason, VisitorStatus};
pub use report::{CommonAreasReport, FinancialReport, VisualReport};
pub use resident::Resident;
pub use visitor::{Paginated, Visitor, VisitorListQuery, VisitorPayload, PAGE_SIZE};

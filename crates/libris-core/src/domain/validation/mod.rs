//! Centralized lending-policy validation.
//!
//! All rule logic lives here, not scattered across entities. Validators are
//! built once per rulebook and hold nothing else.

mod loan;
mod staff;
mod taxonomy;

pub use loan::LoanValidator;
pub use staff::{StaffRelaxation, effective_for_reader};
pub use taxonomy::DomainValidator;

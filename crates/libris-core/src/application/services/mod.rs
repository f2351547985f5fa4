//! Application services - orchestrate use cases.
//!
//! Services resolve entities through the snapshot port, run the domain
//! validators and fold their outcomes into a [`PolicyReport`].

pub mod catalog_policy_service;
pub mod loan_policy_service;
pub mod report;

pub use catalog_policy_service::CatalogPolicyService;
pub use loan_policy_service::{LoanPolicyService, LoanRequest};
pub use report::PolicyReport;

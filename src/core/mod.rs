//! Core business logic - framework-agnostic product, question, report and
//! scoring operations. Nothing in here knows about HTTP; handlers call in
//! with a database connection, an identity, and (where relevant) the AI
//! gateway seam.

/// Ownership and role capability checks
pub mod access;
/// Product catalog operations
pub mod product;
/// Disclosure questionnaire operations
pub mod question;
/// Report lifecycle, listing and statistics
pub mod report;
/// The pure transparency scoring function
pub mod scoring;

/// Read-modify-write operations on the stored collections.
pub mod collection_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Background store connection supervision.
pub mod storage_supervisor;
/// Cost sharing arithmetic.
pub mod totals;

//! sectorgen - LLM-Driven Sector Page Generator
//!
//! Prompts a language model for a structured marketing page about one
//! industry sector, normalizes the answer under fixed business rules, and
//! publishes it to a headless CMS.
//!
//! ## Core Features
//!
//! - **Create or Edit**: new pages from a company brief, or in-place rewrites
//!   of a published page
//! - **Source Ingestion**: text, markdown, PDF and Word files plus web links
//! - **Guardrails**: fixed prices for core services, fresh identity keys on
//!   every list item
//! - **Stable Ordering**: page indices follow slug creation order
//!
//! ## Quick Start
//!
//! ```ignore
//! use sectorgen::{ConfigLoader, GenerationRequest, SectorPipeline};
//! use sectorgen::ai::create_provider;
//! use sectorgen::storage::SanityStore;
//!
//! let config = ConfigLoader::load()?;
//! let pipeline = SectorPipeline::new(
//!     create_provider(&config.llm)?,
//!     Arc::new(SanityStore::new(&config.store)?),
//!     &config,
//! )?;
//! let payload = pipeline.generate(&request).await?;
//! let outcome = pipeline.publish(payload).await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt assembly, model provider, JSON recovery and schema checks
//! - [`ingest`]: document and link readers
//! - [`pipeline`]: slug, pricing, key and page-index rules
//! - [`storage`]: content store client
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod ingest;
pub mod pipeline;
pub mod storage;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{Result, ResultExt, SectorError};

// Domain
pub use types::{EditRequest, GenerationRequest, PageIndex, SectorDocument, SectorPayload};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use pipeline::{PublishOutcome, SectorPipeline};

pub use ai::{LlmProvider, LlmResponse};

pub use storage::{ContentStore, SanityStore};

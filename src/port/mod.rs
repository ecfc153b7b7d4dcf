//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (LLM providers, databases, storage) or that drivers call into
//! (HTTP, CLI).
//!
//! # Architecture
//!
//! ```text
//!      ┌──────────┐       ┌──────────┐
//!      │   HTTP   │       │   CLI    │
//!      └────┬─────┘       └────┬─────┘
//!           └────── inbound ───┘
//!                      ▼
//!           ┌─────────────────────┐
//!           │     Application     │
//!           └──────────┬──────────┘
//!      ┌───────── outbound ──────────┐
//!      ▼               ▼             ▼
//! ┌─────────┐   ┌────────────┐  ┌─────────┐
//! │   LLM   │   │  Database  │  │  Store  │
//! └─────────┘   └────────────┘  └─────────┘
//! ```

pub mod inbound;
pub mod outbound;

//! Shared data model layer (structs/enums only).
//!
//! ## Purpose
//! - Keep probe inputs, outcomes and report structs in one place.
//! - Avoid cyclic imports between the rpc/sync/alerts services.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `ProbeReport` is the `--json` output contract.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod models;

// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Aivy integration tests.
//!
//! Provides deterministic mock adapters for the embedding and generation
//! collaborators plus a [`TestHarness`] that wires the full pipeline over
//! temp SQLite.

pub mod harness;
pub mod mock_embedder;
pub mod mock_generator;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_embedder::MockEmbedder;
pub use mock_generator::MockGenerator;

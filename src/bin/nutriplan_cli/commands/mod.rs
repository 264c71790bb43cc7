// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
// ABOUTME: Re-exports command modules for nutriplan-cli
// ABOUTME: Provides the estimate, train, and metrics commands

pub mod estimate;
pub mod metrics;
pub mod train;

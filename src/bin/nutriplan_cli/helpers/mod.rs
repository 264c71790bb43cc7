// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
// ABOUTME: Re-exports helper modules for nutriplan-cli
// ABOUTME: Provides output formatting utilities

pub mod display;

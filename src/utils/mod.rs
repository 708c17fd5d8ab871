// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared helpers

pub mod math;

pub use math::{calculate_triangle_normal, format_point, format_real, format_vector};

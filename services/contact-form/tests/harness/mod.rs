// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for contact form abuse simulation.
//!
//! This module provides payload generators for the kinds of traffic the
//! anti-spam stages are meant to stop, plus legitimate traffic they must let
//! through.

pub mod generators;

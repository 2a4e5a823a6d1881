// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the bosk crates; see the `benches/` directory.

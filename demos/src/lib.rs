// Copyright 2025 the Bosk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the bosk crates; see the `examples/` directory.

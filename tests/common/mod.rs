#![allow(dead_code, unused_imports)]

pub use monobuild_test_utils::builders;
pub use monobuild_test_utils::fake_executor::FakeExecutor;
pub use monobuild_test_utils::fakes::{FakeChangeSource, FakeResolver};
pub use monobuild_test_utils::{init_tracing, with_timeout};

use monobuild::fs::mock::MockFileSystem;

/// A small Go-style monorepo:
///
/// ```text
/// cmd/server/main.go
/// cmd/server/handlers/api.go
/// cmd/worker/main.go
/// pkg/bar/file.go
/// pkg/baz/file.go
/// deploy/server.yaml
/// README.md
/// ```
pub fn sample_repo() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("./cmd/server/main.go", "package main");
    fs.add_file("./cmd/server/handlers/api.go", "package handlers");
    fs.add_file("./cmd/worker/main.go", "package main");
    fs.add_file("./pkg/bar/file.go", "package bar");
    fs.add_file("./pkg/baz/file.go", "package baz");
    fs.add_file("./deploy/server.yaml", "kind: Deployment");
    fs.add_file("./README.md", "# repo");
    fs
}

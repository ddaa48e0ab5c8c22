//! Common test utilities for compose integration tests
//!
//! Each test gets a scratch working directory plus a stub `composer`/`php`
//! bin directory prepended to PATH, so the real binary runs the full pipeline
//! without network access. The stubs append every invocation to a log file so
//! tests can assert ordering and arguments.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Skeleton the stub composer writes for create-project
pub const STUB_ENV_EXAMPLE: &str = "APP_NAME=Laravel\n\
                                    APP_ENV=local\n\
                                    APP_KEY=\n\
                                    APP_URL=http://localhost\n\
                                    MAIL_MAILER=smtp\n\
                                    DB_DATABASE=laravel\n";

const COMPOSER_STUB: &str = r#"#!/bin/sh
[ -n "$COMPOSER_STUB_LOG" ] && echo "composer $*" >> "$COMPOSER_STUB_LOG"
if [ -n "$COMPOSER_STUB_FAIL" ] && [ "$COMPOSER_STUB_FAIL" = "$1" ]; then
    echo "stub composer: simulated $1 failure" >&2
    exit 1
fi
case "$1" in
    create-project)
        target="$3"
        mkdir -p "$target"
        cat > "$target/.env.example" <<'EOF'
APP_NAME=Laravel
APP_ENV=local
APP_KEY=
APP_URL=http://localhost
MAIL_MAILER=smtp
DB_DATABASE=laravel
EOF
        printf '#!/usr/bin/env php\n' > "$target/artisan"
        ;;
    install)
        ;;
esac
exit 0
"#;

const PHP_STUB: &str = r#"#!/bin/sh
[ -n "$COMPOSER_STUB_LOG" ] && echo "php $*" >> "$COMPOSER_STUB_LOG"
[ -n "$PHP_STUB_FAIL" ] && exit 1
case "$1" in
    *composer.phar)
        shift
        exec composer "$@"
        ;;
esac
exit 0
"#;

/// A scratch project directory wired to stub composer/php binaries
pub struct TestProject {
    /// Temporary directory, removed on drop
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Working directory the compose binary runs in
    pub path: PathBuf,
    bin_dir: PathBuf,
    log: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("work");
        fs::create_dir(&path).expect("Failed to create working directory");

        let bin_dir = temp.path().join("bin");
        fs::create_dir(&bin_dir).expect("Failed to create stub bin directory");
        write_stub(&bin_dir.join("composer"), COMPOSER_STUB);
        write_stub(&bin_dir.join("php"), PHP_STUB);

        let log = temp.path().join("invocations.log");

        Self {
            temp,
            path,
            bin_dir,
            log,
        }
    }

    /// Command for the real compose binary, with the stubs on PATH
    // Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
    #[allow(deprecated)]
    pub fn compose_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("compose").expect("compose binary not built");
        let path_var = format!(
            "{}:{}",
            self.bin_dir.display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.current_dir(&self.path)
            .env("PATH", path_var)
            .env("COMPOSER_STUB_LOG", &self.log)
            .env_remove("COMPOSER_STUB_FAIL")
            .env_remove("PHP_STUB_FAIL");
        cmd
    }

    /// Write a file under the working directory
    pub fn write_file(&self, rel: &str, content: &str) {
        let file_path = self.path.join(rel);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file under the working directory
    pub fn read_file(&self, rel: &str) -> String {
        fs::read_to_string(self.path.join(rel)).expect("Failed to read file")
    }

    /// Check if a path exists under the working directory
    pub fn file_exists(&self, rel: &str) -> bool {
        self.path.join(rel).exists()
    }

    /// Stub invocations recorded so far, one command line per entry
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn write_stub(path: &std::path::Path, content: &str) {
    fs::write(path, content).expect("Failed to write stub script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub executable");
    }
}

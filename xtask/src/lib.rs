use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Options derived from the host machine used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
    pub rustflags: Option<String>,
    /// The host has no lane backend, so the `simd` feature is left off.
    pub scalar_only: bool,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }

    fn has(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Workspace root, one level above this crate.
pub fn workspace_root() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path
}

fn cargo() -> Command {
    let mut cmd = Command::new(env::var("CARGO").unwrap_or_else(|_| "cargo".into()));
    cmd.current_dir(workspace_root());
    cmd
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let arch = detect_arch();
    let cpu_flags = detect_cpu_flags();
    let nproc = detect_nproc();
    let extra = env::var("LANEFFT_FEATURES").unwrap_or_default();
    compute_config(&arch, &cpu_flags, nproc, &extra)
}

fn detect_arch() -> String {
    if let Ok(arch) = env::var("ARCH") {
        if !arch.trim().is_empty() {
            return arch;
        }
    }
    Command::new("uname")
        .arg("-m")
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|_| env::consts::ARCH.to_string())
}

fn detect_cpu_flags() -> String {
    if let Ok(out) = Command::new("lscpu").output() {
        let s = String::from_utf8_lossy(&out.stdout);
        for line in s.lines() {
            if line.to_lowercase().contains("flags") {
                return line.to_string();
            }
        }
    }
    if let Ok(out) = Command::new("sysctl")
        .args(["-n", "machdep.cpu.features"])
        .output()
    {
        return String::from_utf8_lossy(&out.stdout).to_string();
    }
    String::new()
}

fn detect_nproc() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
///
/// x86_64 and aarch64 always get a lane backend from the default `simd`
/// feature. 32-bit x86 only does when SSE is enabled for the target, so it is
/// switched on through `RUSTFLAGS` when the CPU reports it.
pub fn compute_config(arch: &str, cpu_flags: &str, nproc: usize, extra: &str) -> BuildConfig {
    let mut features = Vec::new();
    let mut rustflags = None;
    let mut scalar_only = false;

    if arch.contains("x86_64") || arch.contains("amd64") {
        if cpu_flags.contains("avx2") {
            rustflags = Some("-C target-cpu=native".into());
        }
    } else if arch.contains("86") {
        if cpu_flags.contains("sse2") {
            rustflags = Some("-C target-feature=+sse,+sse2".into());
        } else {
            scalar_only = true;
        }
    } else if !(arch.contains("aarch64") || arch.contains("arm64")) {
        scalar_only = true;
    }

    if nproc > 1 {
        features.push("parallel".into());
    }

    for feat in extra.split_whitespace() {
        if !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }

    BuildConfig {
        features,
        rustflags,
        scalar_only,
    }
}

fn apply(cmd: &mut Command, cfg: &BuildConfig) {
    if let Some(rf) = &cfg.rustflags {
        cmd.env("RUSTFLAGS", rf);
    }
    if cfg.scalar_only {
        cmd.args(["--no-default-features", "--features", "std"]);
    }
    if let Some(f) = cfg.features_arg() {
        cmd.arg("--features").arg(f);
    }
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo();
    cmd.arg("build");
    apply(&mut cmd, cfg);
    cmd
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo();
    cmd.arg("test");
    apply(&mut cmd, cfg);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["clippy", "--workspace", "--all-targets", "--all-features"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["fmt", "--all"]);
    cmd
}

/// Criterion benchmarks against rustfft and realfft.
pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo();
    if let Some(rf) = &cfg.rustflags {
        cmd.env("RUSTFLAGS", rf);
    }
    cmd.args(["bench", "-p", "lanefft-bench"]);
    // The bench crate only forwards `parallel`.
    if cfg.has("parallel") {
        cmd.args(["--features", "parallel"]);
    }
    cmd
}

/// Runs one of the demo programs in release mode.
pub fn demo_command(cfg: &BuildConfig, name: &str) -> Command {
    let mut cmd = cargo();
    cmd.args(["run", "--release", "--example", name]);
    apply(&mut cmd, cfg);
    if name == "verbose_logging" && !cfg.has("verbose-logging") {
        cmd.args(["--features", "verbose-logging"]);
    }
    cmd
}

pub fn sanity_command(input: &str, frame_len: usize, simd: bool) -> Command {
    let mut cmd = cargo();
    cmd.args(["run", "-r", "-p", "sanity-check", "--", input]);
    cmd.arg("--frame-len").arg(frame_len.to_string());
    if simd {
        cmd.arg("--simd");
    }
    cmd
}

/// Runs each command in turn, stopping at the first failure.
pub fn run_all(commands: impl IntoIterator<Item = Command>) -> Result<()> {
    for mut cmd in commands {
        let program = format!("{:?}", cmd);
        let status = cmd
            .status()
            .with_context(|| format!("failed to spawn {program}"))?;
        if !status.success() {
            bail!("{program} exited with {status}");
        }
    }
    Ok(())
}

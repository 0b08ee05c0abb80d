//! System telemetry probing for the `/system` endpoint.
//!
//! Probing must never turn into a 5xx: when the full sysinfo sweep fails,
//! the probe degrades to a reduced payload that still carries
//! process-level uptime and core counts, tagged with a `note`.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};
use sysinfo::System;

/// Why a full telemetry sweep could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("system probe returned no memory data")]
    NoData,

    #[error("current process not visible to the probe: {0}")]
    ProcessMissing(String),
}

/// Probes OS/CPU/memory/process telemetry.
///
/// Keeps its own start instant so the degraded path can still report a
/// process uptime without sysinfo.
pub struct SystemProbe {
    started: Instant,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// A full telemetry report, or the reduced fallback if probing fails.
    /// Always succeeds.
    pub fn report(&self) -> Value {
        match self.full_report() {
            Ok(report) => report,
            Err(error) => {
                tracing::warn!(error = %error, "telemetry probe failed, serving reduced report");
                self.fallback_report()
            }
        }
    }

    fn full_report(&self) -> Result<Value, ProbeError> {
        let mut system = System::new_all();
        system.refresh_all();

        let total_memory = system.total_memory();
        if total_memory == 0 {
            return Err(ProbeError::NoData);
        }
        let available_memory = system.available_memory();
        let used_memory = total_memory.saturating_sub(available_memory);

        let cpu_model = system
            .cpus()
            .first()
            .map(|cpu| cpu.brand().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let pid = sysinfo::get_current_pid()
            .map_err(|e| ProbeError::ProcessMissing(e.to_string()))?;
        let process = system
            .process(pid)
            .ok_or_else(|| ProbeError::ProcessMissing(pid.to_string()))?;

        Ok(json!({
            "system": {
                "os": {
                    "name": System::name().unwrap_or_else(|| "unknown".to_string()),
                    "version": System::os_version().unwrap_or_else(|| "unknown".to_string()),
                    "arch": System::cpu_arch(),
                },
                "cpu": {
                    "cores": System::physical_core_count().unwrap_or(0),
                    "logical_processors": system.cpus().len(),
                    "usage": system.global_cpu_usage(),
                    "model": cpu_model,
                },
                "memory": {
                    "total": total_memory,
                    "used": used_memory,
                    "available": available_memory,
                    "usage_percent": used_memory as f64 / total_memory as f64 * 100.0,
                },
                "processes": {
                    "count": system.processes().len(),
                },
            },
            "process": {
                "memory": {
                    "resident": process.memory(),
                    "virtual": process.virtual_memory(),
                },
                "uptime": process.run_time() * 1000,
                "pid": pid.as_u32(),
                "version": env!("CARGO_PKG_VERSION"),
                "vendor": env!("CARGO_PKG_NAME"),
            },
        }))
    }

    /// Reduced-fidelity report built from the standard library only.
    fn fallback_report(&self) -> Value {
        json!({
            "system": {
                "os": {
                    "name": std::env::consts::OS,
                    "version": "unknown",
                    "arch": std::env::consts::ARCH,
                },
                "cpu": {
                    "cores": std::thread::available_parallelism().map(|n| n.get()).unwrap_or(0),
                },
            },
            "process": {
                "uptime": self.started.elapsed().as_millis() as u64,
                "pid": std::process::id(),
                "version": env!("CARGO_PKG_VERSION"),
                "vendor": env!("CARGO_PKG_NAME"),
            },
            "note": "Limited system info - telemetry probe unavailable",
        })
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds since the unix epoch. The shared wall clock for report
/// timestamps and rate-limit windows.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as u64
}

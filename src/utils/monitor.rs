use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
}

/// Logs process memory and elapsed time between staging phases.
#[cfg(feature = "cli")]
pub struct PhaseMonitor {
    system: System,
    pid: Option<Pid>,
    start_time: Instant,
    peak_memory_mb: u64,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl PhaseMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            sysinfo::get_current_pid()
                .map_err(|e| tracing::warn!("Process monitoring unavailable: {}", e))
                .ok()
        } else {
            None
        };

        Self {
            system: System::new(),
            pid,
            start_time: Instant::now(),
            peak_memory_mb: 0,
            enabled: enabled && pid.is_some(),
        }
    }

    pub fn sample(&mut self) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }
        let pid = self.pid?;

        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let memory_mb = self.system.process(pid)?.memory() / 1024 / 1024;
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);

        Some(PhaseStats {
            memory_mb,
            peak_memory_mb: self.peak_memory_mb,
            elapsed: self.start_time.elapsed(),
        })
    }

    pub fn log_phase(&mut self, phase: &str) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 {} - Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                stats.memory_mb,
                stats.peak_memory_mb,
                stats.elapsed
            );
        }
    }

    pub fn log_final(&mut self) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 Final - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// Without the cli feature only elapsed time is tracked.
#[cfg(not(feature = "cli"))]
pub struct PhaseMonitor {
    start_time: Instant,
    enabled: bool,
}

#[cfg(not(feature = "cli"))]
impl PhaseMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
            enabled,
        }
    }

    pub fn sample(&mut self) -> Option<PhaseStats> {
        self.enabled.then(|| PhaseStats {
            memory_mb: 0,
            peak_memory_mb: 0,
            elapsed: self.start_time.elapsed(),
        })
    }

    pub fn log_phase(&mut self, phase: &str) {
        if let Some(stats) = self.sample() {
            tracing::info!("📊 {} - Time: {:?}", phase, stats.elapsed);
        }
    }

    pub fn log_final(&mut self) {
        if let Some(stats) = self.sample() {
            tracing::info!("📊 Final - Total Time: {:?}", stats.elapsed);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for PhaseMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

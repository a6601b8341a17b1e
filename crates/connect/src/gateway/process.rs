use log::{debug, info, warn};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::process::{Child, Command};

use crate::errors::{GatewayError, GatewayResult};

const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Executable to launch when nothing is listening. `None` means the
    /// gateway is managed elsewhere.
    pub executable: Option<PathBuf>,
    pub args: Vec<String>,
    pub startup_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 11111,
            executable: None,
            args: Vec::new(),
            startup_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl GatewayConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Handle on the gateway. Only a child process spawned by this handle is
/// ever stopped by it.
pub struct GatewayProcess {
    config: GatewayConfig,
    child: Mutex<Option<Child>>,
}

impl GatewayProcess {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            child: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn lock_child(&self) -> MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(|poisoned| {
            warn!("Gateway child mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Liveness probe: a TCP connect to the gateway port within one second.
    pub async fn is_ready(&self) -> bool {
        matches!(
            tokio::time::timeout(PROBE_TIMEOUT, TcpStream::connect(self.config.addr())).await,
            Ok(Ok(_))
        )
    }

    /// Reuses a responsive gateway, otherwise launches a fresh one and waits
    /// for it to accept connections.
    pub async fn ensure_ready(&self) -> GatewayResult<()> {
        if self.is_ready().await {
            debug!("Gateway already listening on {}", self.config.addr());
            return Ok(());
        }

        // A child that is alive but not listening is stale.
        self.stop();

        let executable =
            self.config
                .executable
                .as_ref()
                .ok_or_else(|| GatewayError::NotConfigured {
                    addr: self.config.addr(),
                })?;

        info!("Starting gateway {}", executable.display());
        let child = Command::new(executable)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        *self.lock_child() = Some(child);

        let attempts = poll_attempts(self.config.startup_timeout, self.config.poll_interval);
        for _ in 0..attempts {
            if self.is_ready().await {
                info!("Gateway is online at {}", self.config.addr());
                return Ok(());
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }

        Err(GatewayError::StartupTimeout {
            addr: self.config.addr(),
            secs: self.config.startup_timeout.as_secs(),
        })
    }

    /// Kills the child this handle spawned, if any.
    pub fn stop(&self) {
        if let Some(mut child) = self.lock_child().take() {
            match child.start_kill() {
                Ok(()) => info!("Stopped gateway process"),
                Err(e) => warn!("Failed to stop gateway process: {}", e),
            }
        }
    }

    pub fn owns_child(&self) -> bool {
        self.lock_child().is_some()
    }

    /// Makes sure the gateway is up and returns a lease on it. Dropping the
    /// lease stops the gateway unless `keep_alive` is set, including when
    /// startup itself fails.
    pub async fn acquire(self: &Arc<Self>, keep_alive: bool) -> GatewayResult<GatewayLease> {
        let lease = GatewayLease {
            process: Arc::clone(self),
            keep_alive,
        };
        self.ensure_ready().await?;
        Ok(lease)
    }
}

fn poll_attempts(timeout: Duration, interval: Duration) -> u32 {
    if interval.is_zero() {
        return 1;
    }
    let n = timeout.as_millis() / interval.as_millis().max(1);
    u32::try_from(n).unwrap_or(u32::MAX).max(1)
}

pub struct GatewayLease {
    process: Arc<GatewayProcess>,
    keep_alive: bool,
}

impl GatewayLease {
    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }
}

impl Drop for GatewayLease {
    fn drop(&mut self) {
        if !self.keep_alive {
            self.process.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn config_for(port: u16) -> GatewayConfig {
        GatewayConfig {
            port,
            startup_timeout: Duration::from_millis(300),
            poll_interval: Duration::from_millis(50),
            ..GatewayConfig::default()
        }
    }

    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn test_poll_attempts() {
        assert_eq!(poll_attempts(Duration::from_secs(15), Duration::from_secs(1)), 15);
        assert_eq!(poll_attempts(Duration::from_millis(10), Duration::from_secs(1)), 1);
        assert_eq!(poll_attempts(Duration::from_secs(1), Duration::ZERO), 1);
    }

    #[tokio::test]
    async fn test_is_ready_when_port_accepts_connections() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let gateway = GatewayProcess::new(config_for(port));

        assert!(gateway.is_ready().await);
        gateway.ensure_ready().await.unwrap();
        assert!(!gateway.owns_child());
    }

    #[tokio::test]
    async fn test_not_configured_when_nothing_listens() {
        let gateway = GatewayProcess::new(config_for(closed_port().await));

        assert!(!gateway.is_ready().await);
        let err = gateway.ensure_ready().await.unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_startup_timeout_stops_spawned_child_through_lease() {
        let mut config = config_for(closed_port().await);
        config.executable = Some(PathBuf::from("sleep"));
        config.args = vec!["30".to_string()];
        let gateway = Arc::new(GatewayProcess::new(config));

        let err = gateway.acquire(false).await.err().unwrap();

        assert!(matches!(err, GatewayError::StartupTimeout { .. }));
        assert!(!gateway.owns_child());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_keep_alive_lease_leaves_child_running() {
        let mut config = config_for(closed_port().await);
        config.executable = Some(PathBuf::from("sleep"));
        config.args = vec!["30".to_string()];
        let gateway = Arc::new(GatewayProcess::new(config));

        assert!(gateway.acquire(true).await.is_err());
        assert!(gateway.owns_child());

        gateway.stop();
        assert!(!gateway.owns_child());
    }
}

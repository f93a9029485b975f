//! # runitkit
//!
//! Idempotent runit service reconciliation.
//!
//! A service has two independent dimensions:
//! - **registration**: a link in the supervised directory (`/var/service`)
//!   pointing at the definition in `/etc/sv`; present means enabled
//! - **run state**: what `sv status` reports for the linked service
//!
//! [`ServiceAgent::reconcile`] resolves the service, observes both
//! dimensions, plans the minimal actions, runs them through `sv` (or records
//! them under dry run), re-observes and reports.
//!
//! ## Example
//!
//! ```no_run
//! use declarative::SystemRunner;
//! use runitkit::{DesiredService, RunState, ServiceAgent, ServiceRequest};
//!
//! let desired = DesiredService {
//!     state: RunState::Started,
//!     enabled: Some(true),
//! };
//! let request = ServiceRequest::new("sshd", desired);
//!
//! let runner = SystemRunner;
//! let report = ServiceAgent::new(&runner).reconcile(&request).expect("reconcile sshd");
//! println!("sshd is {} (changed: {})", report.state, report.changed);
//! ```

pub mod error;
pub mod layout;
pub mod link;
pub mod observer;
pub mod planner;
pub mod report;
pub mod status;
pub mod step;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use layout::{DEFAULT_LINK_DIR, DEFAULT_SERVICE_DIR, ServiceLayout};
pub use planner::ServiceAction;
pub use status::{SvState, SvStatus};
pub use types::{
    DEFAULT_TIMEOUT, DesiredService, ManagedService, ObservedService, RunState, Scope,
    ServiceReport, ServiceRequest, ServiceStatus,
};

use declarative::{
    ApplyContext, CommandRunner, DEFAULT_GRACE, ExecuteOptions, NoProgress, Plan, ProgressCallback,
};
use std::time::Duration;
use step::ServiceStep;

/// Drives one service to its desired state.
pub struct ServiceAgent<'a> {
    runner: &'a dyn CommandRunner,
    grace: Duration,
}

impl<'a> ServiceAgent<'a> {
    /// Create an agent issuing commands through `runner`.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            grace: DEFAULT_GRACE,
        }
    }

    /// Override the pause after start, stop and restart.
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Reconcile without progress reporting.
    pub fn reconcile(&self, request: &ServiceRequest) -> Result<ServiceReport> {
        self.reconcile_with_progress(request, &mut NoProgress)
    }

    /// Reconcile, reporting each action to `progress`.
    pub fn reconcile_with_progress(
        &self,
        request: &ServiceRequest,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ServiceReport> {
        let service = request.layout.resolve(&request.name, &request.scope)?;
        let observed = observer::observe(self.runner, &service)?;

        let plan: Plan<ServiceStep<'_>> = planner::plan(&observed, &request.desired)
            .into_iter()
            .map(|action| ServiceStep::new(action, &service, request.timeout))
            .collect();
        log::info!(
            "service {}: {}",
            service.name,
            if plan.is_empty() {
                "already in desired state".to_string()
            } else {
                plan.kinds().join(", ")
            }
        );

        let opts = ExecuteOptions::new(request.dry_run).with_grace(self.grace);
        let ctx = ApplyContext::new(self.runner);
        let summary = declarative::execute(&plan, &opts, &ctx, progress)?;

        let last = if summary.applied() > 0 {
            observer::observe(self.runner, &service)?
        } else {
            observed
        };

        Ok(report::build(
            &service.name,
            &last,
            &request.desired,
            summary.changed(),
            request.dry_run,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSv;
    use declarative::argv;
    use std::fs;
    use tempfile::TempDir;

    struct Host {
        tmp: TempDir,
    }

    impl Host {
        fn with_service(name: &str) -> Self {
            let tmp = TempDir::new().unwrap();
            fs::create_dir_all(tmp.path().join("sv").join(name)).unwrap();
            fs::create_dir_all(tmp.path().join("service")).unwrap();
            Self { tmp }
        }

        fn layout(&self) -> ServiceLayout {
            ServiceLayout::new(self.tmp.path().join("sv"), self.tmp.path().join("service"))
        }

        fn link(&self, name: &str) -> std::path::PathBuf {
            self.tmp.path().join("service").join(name)
        }

        fn enable(&self, name: &str) {
            std::os::unix::fs::symlink(self.tmp.path().join("sv").join(name), self.link(name))
                .unwrap();
        }

        fn request(&self, name: &str, state: RunState, enabled: Option<bool>) -> ServiceRequest {
            ServiceRequest::new(name, DesiredService { state, enabled }).with_layout(self.layout())
        }
    }

    fn agent(fake: &FakeSv) -> ServiceAgent<'_> {
        ServiceAgent::new(fake).with_grace(Duration::ZERO)
    }

    #[test]
    fn test_sshd_enable_and_start() {
        let host = Host::with_service("sshd");
        let fake = FakeSv::stopped();
        let request = host.request("sshd", RunState::Started, Some(true));

        let report = agent(&fake).reconcile(&request).unwrap();

        assert_eq!(
            report,
            ServiceReport {
                service: "sshd".into(),
                state: ServiceStatus::Running,
                enabled: true,
                changed: true,
            }
        );
        assert_eq!(
            fs::read_link(host.link("sshd")).unwrap(),
            host.tmp.path().join("sv/sshd")
        );
        let definition = host.tmp.path().join("sv/sshd").to_string_lossy().into_owned();
        assert_eq!(
            fake.mutations(),
            vec![argv!["sv", "-w", "10", "start", definition]]
        );
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let host = Host::with_service("sshd");
        let fake = FakeSv::stopped();
        let request = host.request("sshd", RunState::Started, Some(true));

        agent(&fake).reconcile(&request).unwrap();
        let before = fake.mutations().len();
        let report = agent(&fake).reconcile(&request).unwrap();

        assert!(!report.changed);
        assert_eq!(report.state, ServiceStatus::Running);
        assert_eq!(fake.mutations().len(), before);
    }

    #[test]
    fn test_enable_only_leaves_run_state() {
        let host = Host::with_service("sshd");
        let fake = FakeSv::running();
        let request = host.request("sshd", RunState::Started, Some(true));

        let report = agent(&fake).reconcile(&request).unwrap();

        assert!(report.changed);
        assert!(report.enabled);
        assert!(host.link("sshd").is_symlink());
        // Only status queries went to sv
        assert!(fake.mutations().is_empty());
    }

    #[test]
    fn test_restart_is_unconditional() {
        let host = Host::with_service("sshd");
        host.enable("sshd");
        let fake = FakeSv::running();
        let request = host.request("sshd", RunState::Restarted, None);

        for _ in 0..2 {
            let report = agent(&fake).reconcile(&request).unwrap();
            assert!(report.changed);
            assert_eq!(report.state, ServiceStatus::Running);
        }
        assert_eq!(fake.mutations().len(), 2);
    }

    #[test]
    fn test_reload_is_unconditional() {
        let host = Host::with_service("nginx");
        host.enable("nginx");
        let fake = FakeSv::running();
        let request = host.request("nginx", RunState::Reloaded, None);

        let report = agent(&fake).reconcile(&request).unwrap();
        assert!(report.changed);
        assert_eq!(fake.mutations()[0][3], "reload");
    }

    #[test]
    fn test_restart_leaving_service_down_reports_stopped() {
        let host = Host::with_service("flaky");
        host.enable("flaky");
        let fake = FakeSv::running().restart_leaves_down();
        let request = host.request("flaky", RunState::Restarted, None);

        let report = agent(&fake).reconcile(&request).unwrap();
        assert!(report.changed);
        assert_eq!(report.state, ServiceStatus::Stopped);
    }

    #[test]
    fn test_dry_run_issues_no_mutations() {
        let host = Host::with_service("sshd");
        let fake = FakeSv::stopped();
        let request = host
            .request("sshd", RunState::Started, Some(true))
            .dry_run(true);

        let report = agent(&fake).reconcile(&request).unwrap();

        assert!(report.changed);
        assert_eq!(report.state, ServiceStatus::Running);
        assert!(report.enabled);
        assert!(fake.mutations().is_empty());
        assert!(!fake.is_up());
        assert!(!host.link("sshd").is_symlink());
    }

    #[test]
    fn test_dry_run_when_converged_is_unchanged() {
        let host = Host::with_service("sshd");
        host.enable("sshd");
        let fake = FakeSv::running();
        let request = host
            .request("sshd", RunState::Started, Some(true))
            .dry_run(true);

        let report = agent(&fake).reconcile(&request).unwrap();
        assert!(!report.changed);
    }

    #[test]
    fn test_disable_twice() {
        let host = Host::with_service("sshd");
        host.enable("sshd");
        let fake = FakeSv::stopped();
        let request = host.request("sshd", RunState::Stopped, Some(false));

        let first = agent(&fake).reconcile(&request).unwrap();
        assert!(first.changed);
        assert!(!first.enabled);
        assert!(!host.link("sshd").is_symlink());

        let second = agent(&fake).reconcile(&request).unwrap();
        assert!(!second.changed);
        assert!(!second.enabled);
    }

    #[test]
    fn test_disable_then_stop_after_link_is_gone() {
        let host = Host::with_service("sshd");
        host.enable("sshd");
        let fake = FakeSv::running().checking_target();
        let request = host.request("sshd", RunState::Stopped, Some(false));

        let report = agent(&fake).reconcile(&request).unwrap();

        assert_eq!(
            report,
            ServiceReport {
                service: "sshd".into(),
                state: ServiceStatus::Stopped,
                enabled: false,
                changed: true,
            }
        );
        assert!(!host.link("sshd").is_symlink());
        assert!(!fake.is_up());
        let definition = host.tmp.path().join("sv/sshd").to_string_lossy().into_owned();
        assert_eq!(
            fake.mutations(),
            vec![argv!["sv", "-w", "10", "stop", definition]]
        );
    }

    #[test]
    fn test_enable_without_starting() {
        let host = Host::with_service("sshd");
        let fake = FakeSv::stopped();
        let request = host.request("sshd", RunState::Stopped, Some(true));

        let report = agent(&fake).reconcile(&request).unwrap();

        assert!(report.changed);
        assert!(report.enabled);
        assert_eq!(report.state, ServiceStatus::Stopped);
        assert!(fake.mutations().is_empty());
    }

    #[test]
    fn test_missing_service_fails_before_any_command() {
        let host = Host::with_service("sshd");
        let fake = FakeSv::stopped();
        let request = host.request("nope", RunState::Started, Some(true)).dry_run(true);

        let err = agent(&fake).reconcile(&request).unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { .. }));
        assert!(err.is_resolution());
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_first_failure_stops_the_plan() {
        let host = Host::with_service("sshd");
        let fake = FakeSv::stopped().failing("start", "fail: sshd: runsv not running");
        let request = host.request("sshd", RunState::Started, Some(true));

        let err = agent(&fake).reconcile(&request).unwrap_err();
        match err {
            Error::StartFailed { name, stderr } => {
                assert_eq!(name, "sshd");
                assert_eq!(stderr, "fail: sshd: runsv not running");
            }
            other => panic!("unexpected error: {other}"),
        }
        // The enable that ran first is not rolled back
        assert!(host.link("sshd").is_symlink());
    }

    #[test]
    fn test_user_scope_wraps_every_command() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(".config/sv/myapp")).unwrap();
        let scope = Scope::User {
            name: "alice".into(),
            home: home.path().to_path_buf(),
        };
        let fake = FakeSv::stopped();
        let request = ServiceRequest::new(
            "myapp",
            DesiredService {
                state: RunState::Started,
                enabled: Some(true),
            },
        )
        .with_scope(scope)
        .with_timeout(Duration::from_secs(5));

        let report = agent(&fake).reconcile(&request).unwrap();

        assert!(report.changed);
        assert!(report.enabled);
        let link = home.path().join(".local/share/service/myapp");
        assert_eq!(
            fs::read_link(&link).unwrap(),
            home.path().join(".config/sv/myapp")
        );
        for argv in fake.calls() {
            assert_eq!(&argv[..3], &argv!["sudo", "-u", "alice"][..], "{argv:?}");
        }
        let definition = home.path().join(".config/sv/myapp");
        let start = argv![
            "sudo",
            "-u",
            "alice",
            "sv",
            "-w",
            "5",
            "start",
            definition.to_string_lossy()
        ];
        assert!(fake.calls().contains(&start));
    }
}

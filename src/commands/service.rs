use anyhow::Result;
use declarative::SystemRunner;
use runitkit::ServiceAgent;
use std::time::Duration;

use crate::cli::ServiceArgs;
use crate::config::{self, ServiceRecord};
use crate::progress::LogProgress;
use crate::ui;

pub fn run(args: &ServiceArgs) -> Result<()> {
    let record: ServiceRecord = config::load(args.run.args.as_deref())?;
    let request = record.into_request(args.run.check)?;

    let runner = SystemRunner;
    let mut agent = ServiceAgent::new(&runner);
    if let Some(ms) = args.grace_ms {
        agent = agent.with_grace(Duration::from_millis(ms));
    }

    let report = agent.reconcile_with_progress(&request, &mut LogProgress::default())?;
    ui::emit(args.run.format, &report, ui::service_summary)
}

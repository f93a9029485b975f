use anyhow::Result;
use declarative::SystemRunner;
use xbpskit::PackageAgent;

use crate::cli::PackageArgs;
use crate::config::{self, PackageRecord};
use crate::progress::LogProgress;
use crate::ui;

pub fn run(args: &PackageArgs) -> Result<()> {
    let record: PackageRecord = config::load(args.run.args.as_deref())?;
    let request = record.into_request(args.run.check);

    let runner = SystemRunner;
    let report =
        PackageAgent::new(&runner).reconcile_with_progress(&request, &mut LogProgress::default())?;
    ui::emit(args.run.format, &report, ui::package_summary)
}

//! Scripted `sv` for unit tests

use declarative::{CommandOutput, CommandRunner, Error, Result, SystemRunner, render};
use std::cell::{Cell, RefCell};
use std::path::Path;

/// Fake supervisor that tracks a single service's run state.
///
/// `sv` invocations are answered from the in-memory state; `mkdir`, `ln` and
/// `rm` (issued for per-user links) are carried out for real with the `sudo`
/// prefix stripped, so tests can point them at a temp dir.
pub struct FakeSv {
    running: Cell<bool>,
    status_exit: i32,
    restart_leaves_down: bool,
    check_target: bool,
    failures: Vec<(&'static str, &'static str)>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeSv {
    fn new(running: bool) -> Self {
        Self {
            running: Cell::new(running),
            status_exit: 0,
            restart_leaves_down: false,
            check_target: false,
            failures: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn running() -> Self {
        Self::new(true)
    }

    pub fn stopped() -> Self {
        Self::new(false)
    }

    /// Make `sv status` exit with `code`
    pub fn with_status_exit(mut self, code: i32) -> Self {
        self.status_exit = code;
        self
    }

    /// Restart succeeds but the service does not come back up
    pub fn restart_leaves_down(mut self) -> Self {
        self.restart_leaves_down = true;
        self
    }

    /// Like real `sv`, fail when the service directory given is missing
    pub fn checking_target(mut self) -> Self {
        self.check_target = true;
        self
    }

    /// Fail every command whose verb (sv subcommand or program) is `verb`
    pub fn failing(mut self, verb: &'static str, stderr: &'static str) -> Self {
        self.failures.push((verb, stderr));
        self
    }

    pub fn is_up(&self) -> bool {
        self.running.get()
    }

    /// Every argv seen, as issued (including any `sudo` prefix)
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Calls other than status queries
    pub fn mutations(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|argv| !argv.iter().any(|a| a == "status"))
            .collect()
    }

    fn status_line(&self, target: &str) -> String {
        if self.running.get() {
            format!("run: {target}: (pid 1234) 5s; run: log: (pid 1233) 5s\n")
        } else {
            format!("down: {target}: 3s, normally up\n")
        }
    }

    fn answer_sv(&self, args: &[String]) -> CommandOutput {
        let args = match args {
            [flag, _, rest @ ..] if flag == "-w" => rest,
            rest => rest,
        };
        let (Some(command), Some(target)) = (args.first(), args.get(1)) else {
            return CommandOutput::new(1, "", "usage: sv [-w sec] command service");
        };
        if self.check_target && !Path::new(target).exists() {
            let msg = format!("fail: {target}: unable to change to service directory");
            return CommandOutput::new(1, "", format!("{msg}: file does not exist"));
        }

        match command.as_str() {
            "status" => CommandOutput::new(self.status_exit, self.status_line(target), ""),
            "start" => {
                self.running.set(true);
                CommandOutput::new(0, format!("ok: run: {target}: (pid 1234) 0s\n"), "")
            }
            "stop" => {
                self.running.set(false);
                CommandOutput::new(0, format!("ok: down: {target}: 0s\n"), "")
            }
            "restart" => {
                self.running.set(!self.restart_leaves_down);
                CommandOutput::ok()
            }
            "reload" => CommandOutput::ok(),
            other => CommandOutput::new(1, "", format!("sv: unknown command {other}")),
        }
    }
}

impl CommandRunner for FakeSv {
    fn run(&self, argv: &[String], require_success: bool) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(argv.to_vec());

        let inner = match argv {
            [sudo, flag, _, rest @ ..] if sudo == "sudo" && flag == "-u" => rest,
            rest => rest,
        };
        let (program, args) = inner.split_first().ok_or(Error::EmptyCommand)?;

        let verb = if program == "sv" {
            args.iter()
                .find(|a| !a.starts_with('-') && a.parse::<u64>().is_err())
                .map_or("", String::as_str)
        } else {
            program.as_str()
        };

        let output = if let Some((_, stderr)) = self.failures.iter().find(|(v, _)| *v == verb) {
            CommandOutput::new(1, "", *stderr)
        } else if program == "sv" {
            self.answer_sv(args)
        } else {
            SystemRunner.probe(inner)?
        };

        if require_success && !output.success() {
            return Err(Error::CommandFailed {
                command: render(argv),
                code: output.code,
                stderr: output.stderr,
            });
        }
        Ok(output)
    }
}

//! Scripted xbps for unit tests

use declarative::{CommandOutput, CommandRunner, Error, Result, render};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory package database answering `xbps-query`, `xbps-install` and
/// `xbps-remove`.
#[derive(Default)]
pub struct FakeXbps {
    installed: RefCell<BTreeSet<String>>,
    available: RefCell<BTreeSet<String>>,
    unsynced: RefCell<BTreeSet<String>>,
    silent: BTreeSet<String>,
    info: BTreeMap<String, String>,
    failures: Vec<(&'static str, &'static str)>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeXbps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.installed
            .borrow_mut()
            .extend(names.into_iter().map(String::from));
        self
    }

    /// Packages in the local repository index
    pub fn available<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.available
            .borrow_mut()
            .extend(names.into_iter().map(String::from));
        self
    }

    /// Packages the remote offers but the local index only learns about on
    /// the next `-S` sync
    pub fn unsynced<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.unsynced
            .borrow_mut()
            .extend(names.into_iter().map(String::from));
        self
    }

    /// Repository search exits 0 but prints nothing for these
    pub fn silent_search<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.silent.extend(names.into_iter().map(String::from));
        self
    }

    pub fn with_info(mut self, name: &str, stdout: &str) -> Self {
        self.info.insert(name.to_string(), stdout.to_string());
        self
    }

    /// Fail mutations on package `name` with `stderr`
    pub fn failing(mut self, name: &'static str, stderr: &'static str) -> Self {
        self.failures.push((name, stderr));
        self
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.borrow().contains(name)
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Calls that would change the package database
    pub fn mutations(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|argv| argv[0] != "xbps-query")
            .collect()
    }

    fn query(&self, args: &[&str]) -> CommandOutput {
        match args {
            ["-Rs", name] if self.silent.contains(*name) => CommandOutput::ok(),
            ["-Rs", name] if self.available.borrow().contains(*name) => {
                CommandOutput::new(0, format!("[-] {name}-1.0_1 A package\n"), "")
            }
            ["-R", name] => match self.info.get(*name) {
                Some(stdout) => CommandOutput::new(0, stdout.clone(), ""),
                None => CommandOutput::new(2, "", ""),
            },
            [name] if self.is_installed(name) => CommandOutput::ok(),
            _ => CommandOutput::new(2, "", ""),
        }
    }

    fn mutate(&self, program: &str, args: &[&str]) -> CommandOutput {
        let targets: Vec<&str> = args.iter().copied().filter(|a| !a.starts_with('-')).collect();

        for target in &targets {
            if let Some((_, stderr)) = self.failures.iter().find(|(n, _)| n == target) {
                return CommandOutput::new(1, "", *stderr);
            }
        }

        if program == "xbps-install" && args.contains(&"-S") {
            let synced = std::mem::take(&mut *self.unsynced.borrow_mut());
            self.available.borrow_mut().extend(synced);
        }

        let mut installed = self.installed.borrow_mut();
        match program {
            "xbps-install" if args.contains(&"-u") => {}
            "xbps-install" => {
                let pool = self.available.borrow();
                if let Some(missing) = targets.iter().find(|t| !pool.contains(**t)) {
                    return CommandOutput::new(
                        2,
                        "",
                        format!("Package '{missing}' not found in repository pool."),
                    );
                }
                installed.extend(targets.iter().map(|t| (*t).to_string()));
            }
            "xbps-remove" => {
                for target in &targets {
                    installed.remove(*target);
                }
            }
            _ => return CommandOutput::new(127, "", format!("{program}: not found")),
        }
        CommandOutput::ok()
    }
}

impl CommandRunner for FakeXbps {
    fn run(&self, argv: &[String], require_success: bool) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(argv.to_vec());

        let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;
        // Repository selection does not change what the fake answers
        let args: Vec<&str> = args
            .iter()
            .map(String::as_str)
            .filter(|a| !a.starts_with("--repository="))
            .collect();

        let output = if program == "xbps-query" {
            self.query(&args)
        } else {
            self.mutate(program, &args)
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

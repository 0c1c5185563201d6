//! `std::process` backed spawner.
//!
//! Children inherit stdin and stdout. For module invocations stderr is piped
//! and relayed chunk by chunk to the launcher's own stderr, unbuffered, while
//! its first line is checked for the interpreter's own "No module named ..."
//! diagnostic.

use cognee::spawn::{ChildStatus, Invocation, SpawnError, Spawner};
use std::io::{self, ErrorKind, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

const NO_MODULE_MARKER: &str = "No module named ";

/// Prefixes `python -m` puts after `<executable>: ` when the module cannot be
/// resolved. Nothing of the module has run at that point.
const INTERPRETER_DIAGNOSTICS: [&str; 2] = [
    ": No module named ",
    ": Error while finding module specification for ",
];

const RELAY_CHUNK: usize = 8 * 1024;

/// Bytes of leading stderr inspected for the interpreter diagnostic.
const STARTUP_WINDOW: usize = 4 * 1024;

/// Spawns real child processes and waits for them.
#[derive(Debug, Default)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), SpawnError> {
        let program = invocation.program.clone();

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit());
        if invocation.module.is_some() {
            command.stderr(Stdio::piped());
        }

        let mut child = command.spawn().map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SpawnError::Unavailable {
                    program: program.clone(),
                    reason: format!("program not found ({source})"),
                }
            } else {
                SpawnError::Io {
                    program: program.clone(),
                    source,
                }
            }
        })?;
        debug!(pid = child.id(), "Spawned {}", program);

        let mut missing = None;
        let module = invocation.module.as_deref();
        if let (Some(stderr), Some(module)) = (child.stderr.take(), module) {
            missing = relay_stderr(stderr, &mut io::stderr().lock(), module);
        }

        let status = child.wait().map_err(|source| SpawnError::Io {
            program: program.clone(),
            source,
        })?;
        if status.success() {
            return Ok(());
        }

        match missing {
            Some(name) => Err(SpawnError::Unavailable {
                program,
                reason: format!("No module named '{name}'"),
            }),
            None => Err(SpawnError::Exited {
                program,
                status: child_status(status),
            }),
        }
    }
}

/// Copy `reader` to `out` until EOF, flushing every chunk as it arrives.
///
/// Returns the missing module named by the interpreter's startup diagnostic
/// when that diagnostic is the first stderr line and names `module` or one
/// of its parent packages. Anything printed later is runtime output and
/// never counts.
///
/// Read errors stop the relay; write errors are ignored so a closed
/// terminal never blocks the child on a full pipe.
pub fn relay_stderr<R, W>(mut reader: R, out: &mut W, module: &str) -> Option<String>
where
    R: Read,
    W: Write,
{
    let mut scan = StartupScan::new(module);
    let mut chunk = [0u8; RELAY_CHUNK];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("Stopped relaying child stderr: {}", e);
                break;
            }
        };

        let _ = out.write_all(&chunk[..n]);
        let _ = out.flush();
        scan.feed(&chunk[..n]);
    }
    scan.finish()
}

/// Looks at the first stderr line only, bounded by [`STARTUP_WINDOW`].
struct StartupScan<'a> {
    module: &'a str,
    head: Vec<u8>,
    verdict: Option<Option<String>>,
}

impl<'a> StartupScan<'a> {
    fn new(module: &'a str) -> Self {
        Self {
            module,
            head: Vec::new(),
            verdict: None,
        }
    }

    fn feed(&mut self, bytes: &[u8]) {
        if self.verdict.is_some() {
            return;
        }

        let room = STARTUP_WINDOW - self.head.len();
        self.head.extend_from_slice(&bytes[..bytes.len().min(room)]);

        if let Some(end) = self.head.iter().position(|&b| b == b'\n') {
            self.verdict = Some(startup_diagnostic(&self.head[..end], self.module));
        } else if self.head.len() >= STARTUP_WINDOW {
            self.verdict = Some(None);
        }
    }

    fn finish(self) -> Option<String> {
        match self.verdict {
            Some(verdict) => verdict,
            None => startup_diagnostic(&self.head, self.module),
        }
    }
}

fn startup_diagnostic(line: &[u8], module: &str) -> Option<String> {
    let text = String::from_utf8_lossy(line);
    interpreter_missing_module(&text)
        .filter(|name| names_target(name, module))
        .map(str::to_string)
}

/// Missing module from a `<executable>: No module named ...` or
/// `<executable>: Error while finding module specification for ...` line.
pub fn interpreter_missing_module(line: &str) -> Option<&str> {
    let at = INTERPRETER_DIAGNOSTICS
        .iter()
        .filter_map(|prefix| line.find(prefix))
        .min()?;
    if at == 0 {
        return None;
    }
    missing_module(&line[at..])
}

/// Extract the module name from a Python "No module named" diagnostic.
///
/// Handles both the quoted (`No module named 'pkg'`) and bare
/// (`No module named pkg.mod`) forms.
pub fn missing_module(line: &str) -> Option<&str> {
    let start = line.find(NO_MODULE_MARKER)? + NO_MODULE_MARKER.len();
    let rest = line[start..].trim_start_matches(['\'', '"']);
    let end = rest
        .find(|c: char| matches!(c, '\'' | '"' | ')') || c.is_whitespace())
        .unwrap_or(rest.len());
    Some(&rest[..end]).filter(|name| !name.is_empty())
}

/// `true` if `missing` is `module` itself or one of its parent packages.
fn names_target(missing: &str, module: &str) -> bool {
    module == missing
        || module
            .strip_prefix(missing)
            .is_some_and(|rest| rest.starts_with('.'))
}

fn child_status(status: ExitStatus) -> ChildStatus {
    if let Some(code) = status.code() {
        return ChildStatus::Code(code);
    }

    #[cfg(unix)]
    {
        use nix::sys::signal::Signal;
        use std::os::unix::process::ExitStatusExt;

        if let Some(number) = status.signal() {
            return ChildStatus::Signal {
                number,
                name: Signal::try_from(number).ok().map(Signal::as_str),
            };
        }
    }

    ChildStatus::Unknown
}

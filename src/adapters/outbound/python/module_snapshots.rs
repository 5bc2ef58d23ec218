use crate::adapters::outbound::system::run_with_timeout;
use crate::ports::outbound::ModuleSnapshotSource;
use crate::shared::error::SbomError;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_INTERPRETER: &str = "python3";

/// Imports each argv entry (ignoring failures), then lists `sys.modules`
const MODULES_QUERY: &str = "import importlib, sys\n\
for name in sys.argv[1:]:\n    \
try:\n        importlib.import_module(name)\n    \
except Exception:\n        pass\n\
print('\\n'.join(sys.modules))";

/// Splits a listing into unit names, skipping blank lines and `#` comments
fn parse_listing(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// ModuleListingFile adapter reading a listing exported by an instrumented runtime
///
/// One unit name per line, e.g. the keys of `sys.modules` dumped by the
/// application being inventoried.
pub struct ModuleListingFile {
    path: PathBuf,
}

impl ModuleListingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ModuleSnapshotSource for ModuleListingFile {
    async fn loaded_units(&self) -> Result<Vec<String>> {
        let content = read_input_file(&self.path, "module listing")?;
        Ok(parse_listing(&content))
    }
}

/// InterpreterModuleSnapshot adapter asking a fresh interpreter for `sys.modules`
///
/// Without `preload` this only sees what the interpreter imports at startup;
/// list the application's entry modules there to approximate its runtime view.
pub struct InterpreterModuleSnapshot {
    interpreter: String,
    preload: Vec<String>,
    timeout: Duration,
}

impl InterpreterModuleSnapshot {
    pub fn new(interpreter: impl Into<String>, preload: Vec<String>, timeout: Duration) -> Self {
        Self {
            interpreter: interpreter.into(),
            preload,
            timeout,
        }
    }
}

#[async_trait]
impl ModuleSnapshotSource for InterpreterModuleSnapshot {
    async fn loaded_units(&self) -> Result<Vec<String>> {
        let mut args = vec!["-c", MODULES_QUERY];
        args.extend(self.preload.iter().map(String::as_str));

        let target = Path::new(&self.interpreter);
        let output = run_with_timeout(&self.interpreter, &args, target, self.timeout).await?;

        if !output.status.success() {
            return Err(SbomError::ExternalToolFailure {
                tool: self.interpreter.clone(),
                target: target.to_path_buf(),
                details: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(parse_listing(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// StaticModuleSnapshot adapter over an in-memory listing
#[derive(Debug, Default, Clone)]
pub struct StaticModuleSnapshot {
    units: Vec<String>,
}

impl StaticModuleSnapshot {
    pub fn new<I, T>(units: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            units: units.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ModuleSnapshotSource for StaticModuleSnapshot {
    async fn loaded_units(&self) -> Result<Vec<String>> {
        Ok(self.units.clone())
    }
}

//! Interactive trim session
//!
//! Banner, argument and file checks, tool provisioning, duration probe,
//! start/end prompts, the trim itself and cleanup, in that order. Prompts
//! repeat until the answer is usable; everything else runs once.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::adapters::exec_ffmpeg::trim;
use crate::adapters::probe_ffmpeg::probe_duration;
use crate::adapters::tool_bundle::{ProvisionedTool, ToolBundle};
use crate::adapters::toml_config::TrimmerConfig;
use crate::app::banner;
use crate::domain::model::{TimeRange, Timestamp, TrimOutcome, TrimRequest};
use crate::error::{TrimmerError, TrimmerResult};
use crate::ports::ProcessPort;
use crate::utils::path::{output_path_for, resolve_input};

/// Message shown when the program is started without exactly one file
pub const USAGE_MESSAGE: &str = "drag a file onto this program.";

/// Where the tool binary comes from
#[derive(Debug, Clone)]
pub enum ToolSource {
    /// Extract the bundled payload into a temp file for this run
    Bundled(ToolBundle),
    /// Run an installed binary in place
    External(PathBuf),
}

impl ToolSource {
    fn provision(&self) -> TrimmerResult<ProvisionedTool> {
        match self {
            ToolSource::Bundled(bundle) => bundle.provision(),
            ToolSource::External(path) => ProvisionedTool::external(path),
        }
    }
}

/// Session settings derived from configuration
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub tools: ToolSource,
    pub output_marker: String,
    pub banner_width: usize,
}

impl SessionOptions {
    pub fn from_config(config: &TrimmerConfig) -> Self {
        let tools = match &config.tool_path {
            Some(path) => ToolSource::External(path.clone()),
            None => ToolSource::Bundled(ToolBundle::embedded()),
        };
        Self {
            tools,
            output_marker: config.output_marker.clone(),
            banner_width: banner::terminal_width(),
        }
    }
}

/// How a session ended without a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The tool produced the output file
    Trimmed,
    /// The tool ran but reported an error, shown to the user
    TrimFailed,
    /// Wrong number of arguments, or nothing sensible to write
    Usage,
    /// The input path does not name a file
    InputMissing,
}

impl SessionOutcome {
    /// Exit status for the process
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionOutcome::Trimmed | SessionOutcome::TrimFailed => 0,
            SessionOutcome::Usage | SessionOutcome::InputMissing => 1,
        }
    }
}

/// One interactive run over a reader and a writer
pub struct Session<'a, R, W> {
    input: R,
    output: W,
    runner: &'a dyn ProcessPort,
    options: SessionOptions,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, runner: &'a dyn ProcessPort, options: SessionOptions) -> Self {
        Self {
            input,
            output,
            runner,
            options,
        }
    }

    /// Drive the whole session for the given command-line paths
    ///
    /// Usage and missing-file problems are reported to the user and returned
    /// as outcomes. Provisioning, launch and closed-input failures are
    /// returned as errors, after the tool has been removed.
    pub fn run(&mut self, args: &[PathBuf]) -> TrimmerResult<SessionOutcome> {
        write!(self.output, "{}", banner::render(self.options.banner_width))?;

        let [arg] = args else {
            writeln!(self.output, "{}", USAGE_MESSAGE)?;
            return Ok(SessionOutcome::Usage);
        };

        let input = match resolve_input(arg) {
            Ok(path) => path,
            Err(TrimmerError::InputFileNotFound { path }) => {
                writeln!(self.output, "File not found: {}", path.display())?;
                return Ok(SessionOutcome::InputMissing);
            }
            Err(e) => return Err(e),
        };

        let output = output_path_for(&input, &self.options.output_marker);
        if output == input {
            writeln!(
                self.output,
                "Output would overwrite the input file; set a non-empty output marker."
            )?;
            return Ok(SessionOutcome::Usage);
        }

        let tool = self.options.tools.provision()?;
        let result = self.trim_with(tool.path(), input, output);

        if let Err(e) = tool.release() {
            warn!(error = %e, "could not remove the extracted tool");
        }

        result
    }

    fn trim_with(
        &mut self,
        tool: &Path,
        input: PathBuf,
        output: PathBuf,
    ) -> TrimmerResult<SessionOutcome> {
        writeln!(self.output, "Input:  {}", input.display())?;
        writeln!(self.output, "Output: {}", output.display())?;

        let duration = probe_duration(self.runner, tool, &input)?;
        match duration {
            Some(d) => writeln!(self.output, "Length: {}", d)?,
            None => writeln!(self.output, "Length: unknown")?,
        }
        writeln!(self.output)?;

        let start = self.prompt_start(duration)?;
        let range = self.prompt_end(start, duration)?;

        if let Some(d) = duration.filter(|d| range.exceeds(*d)) {
            warn!(end = %range.end(), duration = %d, "end time past reported duration");
            writeln!(
                self.output,
                "Note: {} is past the reported length {}; the tool will stop at the end of the file.",
                range.end(),
                d
            )?;
        }

        writeln!(self.output, "Trimming {} - {} ...", range.start(), range.end())?;
        self.output.flush()?;

        let request = TrimRequest {
            input,
            output,
            range,
        };
        match trim(self.runner, tool, &request)? {
            TrimOutcome::Completed => {
                writeln!(self.output, "Trimming complete: {}", request.output.display())?;
                info!(output = %request.output.display(), "session finished");
                Ok(SessionOutcome::Trimmed)
            }
            TrimOutcome::Failed { diagnostics } => {
                writeln!(self.output, "Trimming error")?;
                writeln!(self.output, "{}", diagnostics.trim_end())?;
                Ok(SessionOutcome::TrimFailed)
            }
        }
    }

    fn prompt_start(&mut self, duration: Option<Timestamp>) -> TrimmerResult<Timestamp> {
        let prompt = match duration {
            Some(d) => format!("Start time ({} - {}): ", Timestamp::default(), d),
            None => "Start time (hh:mm:ss): ".to_string(),
        };

        loop {
            let answer = self.ask(&prompt, "start")?;
            match answer.parse::<Timestamp>() {
                Ok(start) => return Ok(start),
                Err(e) => writeln!(self.output, "  {}", e)?,
            }
        }
    }

    fn prompt_end(
        &mut self,
        start: Timestamp,
        duration: Option<Timestamp>,
    ) -> TrimmerResult<TimeRange> {
        let prompt = match duration {
            Some(d) => format!("End time ({} - {}): ", start, d),
            None => "End time (hh:mm:ss): ".to_string(),
        };

        loop {
            let answer = self.ask(&prompt, "end")?;
            let end = match answer.parse::<Timestamp>() {
                Ok(end) => end,
                Err(e) => {
                    writeln!(self.output, "  {}", e)?;
                    continue;
                }
            };
            match TimeRange::new(start, end) {
                Ok(range) => return Ok(range),
                Err(e) => writeln!(self.output, "  {}", e)?,
            }
        }
    }

    /// Print `prompt` and read one line; end of input is fatal
    fn ask(&mut self, prompt: &str, which: &str) -> TrimmerResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // Raw bytes: a non-UTF-8 answer must reach the parser, not abort the read
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            writeln!(self.output)?;
            return Err(TrimmerError::InputClosed {
                prompt: which.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

// Ports - Interface definitions (contracts)

use std::ffi::OsString;
use std::path::Path;

use crate::domain::model::ProcessOutput;
use crate::error::TrimmerResult;

/// Port for launching the external tool
///
/// Implementations pass `args` as discrete tokens without shell
/// interpretation, drain both output streams and block until the child
/// exits. The captured text is returned uninspected.
pub trait ProcessPort {
    fn run(&self, program: &Path, args: &[OsString]) -> TrimmerResult<ProcessOutput>;
}

pub mod dates;
pub mod diagnostics;
pub mod etl;
pub mod filter;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{OutputRecordSet, RecordSet, RunOutput};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

use crate::adapters::csv_input;
use crate::domain::model::Diagnostic;
use diagnostics::Diagnostics;

/// Runs filter then transform over an already parsed claims table.
///
/// Never fails: any error ends the run with an empty report and one error diagnostic.
pub fn run(input: RecordSet) -> RunOutput {
    let mut diagnostics = Diagnostics::new();
    let result = filter::filter_ready(input, &mut diagnostics)
        .and_then(|filtered| transform::transform(filtered, &mut diagnostics));
    finish(result, diagnostics)
}

/// Same as [`run`], starting from the raw bytes of the uploaded file.
pub fn run_csv(bytes: &[u8]) -> RunOutput {
    match csv_input::read_record_set(bytes) {
        Ok(input) => run(input),
        Err(err) => finish(Err(err), Diagnostics::new()),
    }
}

fn finish(result: Result<OutputRecordSet>, mut diagnostics: Diagnostics) -> RunOutput {
    match result {
        Ok(output) => RunOutput {
            output,
            diagnostics: diagnostics.into_vec(),
        },
        Err(err) => {
            tracing::debug!("Run stopped: {:?} ({:?})", err, err.category());
            diagnostics.push(Diagnostic::from_error(&err));
            RunOutput {
                output: OutputRecordSet::empty(),
                diagnostics: diagnostics.into_vec(),
            }
        }
    }
}

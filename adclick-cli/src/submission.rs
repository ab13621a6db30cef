use std::io::Write;

use adclick::traits::PredictProbability;
use adclick::Example;
use log::debug;

use crate::error::{DriverError, Result};

const PROGRESS_EVERY: usize = 1_000_000;

/// Predict every record of `examples` and write an `id,click` CSV to `writer`
///
/// Returns the number of predictions written. Labels of the records are ignored.
pub fn write_submission<L, I, W>(learner: &L, examples: I, writer: W) -> Result<usize>
where
    L: PredictProbability<[usize], f64>,
    DriverError: From<L::Error>,
    I: IntoIterator<Item = adclick_datasets::Result<Example>>,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&["id", "click"])?;

    let mut written = 0;
    for example in examples {
        let example = example?;
        let p = learner.predict_probability(&example.indices[..])?;
        wtr.write_record(&[example.id.as_str(), p.to_string().as_str()])?;

        written += 1;
        if written % PROGRESS_EVERY == 0 {
            debug!("wrote {} predictions", written);
        }
    }
    wtr.flush()?;
    debug!("wrote {} predictions in total", written);
    Ok(written)
}

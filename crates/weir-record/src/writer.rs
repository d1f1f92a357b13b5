//! Columnar snapshot writer.
//!
//! [`ColumnarWriter`] streams samples to any `Write` sink. The header is
//! written immediately on construction.

use std::io::Write;

use weir_core::{SinkError, SnapshotSink, StateView};

use crate::error::RecordError;
use crate::HEADER;

/// Writes sampled states as `time,position,depth,velocity` rows.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use weir_record::{read_columnar, ColumnarWriter};
/// # use weir_core::{StateView, StepId};
/// # struct Two;
/// # impl StateView for Two {
/// #     fn step_id(&self) -> StepId { StepId(0) }
/// #     fn time(&self) -> f64 { 1.5 }
/// #     fn spacing(&self) -> f64 { 10.0 }
/// #     fn depth(&self) -> &[f64] { &[2.0, 1.0] }
/// #     fn discharge(&self) -> &[f64] { &[1.0, 0.0] }
/// # }
///
/// let mut buf = Vec::new();
/// let mut writer = ColumnarWriter::new(&mut buf).unwrap();
/// writer.write_frame(&Two).unwrap();
/// assert_eq!(writer.frames_written(), 1);
/// drop(writer);
///
/// let text = String::from_utf8(buf.clone()).unwrap();
/// assert_eq!(text, "time,position,depth,velocity\n1.5,0,2,0.5\n1.5,10,1,0\n");
///
/// let frames = read_columnar(buf.as_slice()).unwrap();
/// assert_eq!(frames[0].depth, vec![2.0, 1.0]);
/// ```
pub struct ColumnarWriter<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> ColumnarWriter<W> {
    /// Create a writer, immediately writing the header line.
    pub fn new(mut writer: W) -> Result<Self, RecordError> {
        writeln!(writer, "{HEADER}")?;
        Ok(Self {
            writer,
            frames_written: 0,
        })
    }

    /// Append one sample: one row per node.
    pub fn write_frame(&mut self, view: &dyn StateView) -> Result<(), RecordError> {
        let time = view.time();
        let spacing = view.spacing();
        for (j, (&h, &hu)) in view.depth().iter().zip(view.discharge()).enumerate() {
            let x = j as f64 * spacing;
            writeln!(self.writer, "{time},{x},{h},{}", hu / h)?;
        }
        self.frames_written += 1;
        Ok(())
    }

    /// Number of samples written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), RecordError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W, RecordError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> SnapshotSink for ColumnarWriter<W> {
    fn accept(&mut self, snapshot: &dyn StateView) -> Result<(), SinkError> {
        self.write_frame(snapshot).map_err(|e| {
            log::warn!("columnar write failed at step {}: {e}", snapshot.step_id());
            SinkError::Io {
                reason: e.to_string(),
            }
        })
    }
}

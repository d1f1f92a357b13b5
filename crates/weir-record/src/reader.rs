//! Columnar snapshot reader.

use std::io::BufRead;

use crate::error::RecordError;
use crate::HEADER;

/// One sample read back from a columnar file.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Simulated time, seconds.
    pub time: f64,
    /// Node positions, metres.
    pub position: Vec<f64>,
    /// Depth per node, metres.
    pub depth: Vec<f64>,
    /// Velocity per node, m/s.
    pub velocity: Vec<f64>,
}

impl Frame {
    fn start(time: f64) -> Self {
        Self {
            time,
            position: Vec::new(),
            depth: Vec::new(),
            velocity: Vec::new(),
        }
    }

    /// Number of nodes in this frame.
    pub fn node_count(&self) -> usize {
        self.depth.len()
    }

    /// Discharge per unit width, `h·u`, per node.
    pub fn discharge(&self) -> Vec<f64> {
        self.depth
            .iter()
            .zip(&self.velocity)
            .map(|(h, u)| h * u)
            .collect()
    }
}

/// Parse a columnar file into frames.
///
/// A new frame starts whenever the time changes or the position stops
/// increasing. Blank lines are skipped.
pub fn read_columnar<R: BufRead>(reader: R) -> Result<Vec<Frame>, RecordError> {
    let mut lines = reader.lines();
    let header = lines.next().transpose()?.unwrap_or_default();
    if header.trim() != HEADER {
        return Err(RecordError::MalformedHeader { found: header });
    }

    let mut frames: Vec<Frame> = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let [time, x, h, u] = parse_row(&line, line_no)?;

        let continues = frames.last().is_some_and(|frame| {
            frame.time.to_bits() == time.to_bits()
                && frame.position.last().is_some_and(|&prev| x > prev)
        });
        if !continues {
            frames.push(Frame::start(time));
        }
        if let Some(frame) = frames.last_mut() {
            frame.position.push(x);
            frame.depth.push(h);
            frame.velocity.push(u);
        }
    }
    Ok(frames)
}

fn parse_row(line: &str, line_no: usize) -> Result<[f64; 4], RecordError> {
    let mut values = [0.0; 4];
    let mut fields = line.split(',');
    for (slot, name) in values
        .iter_mut()
        .zip(["time", "position", "depth", "velocity"])
    {
        let raw = fields.next().ok_or_else(|| RecordError::MalformedRow {
            line: line_no,
            reason: format!("missing {name} column"),
        })?;
        *slot = raw.trim().parse().map_err(|_| RecordError::MalformedRow {
            line: line_no,
            reason: format!("{name} `{raw}` is not a number"),
        })?;
    }
    if fields.next().is_some() {
        return Err(RecordError::MalformedRow {
            line: line_no,
            reason: "more than four columns".to_string(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rows_into_frames() {
        let text = "\
time,position,depth,velocity
0,0,5,0
0,10,1,0
0.5,0,4.5,0.25
0.5,10,1.5,-0.1
";
        let frames = read_columnar(text.as_bytes()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].time, 0.0);
        assert_eq!(frames[0].depth, vec![5.0, 1.0]);
        assert_eq!(frames[1].position, vec![0.0, 10.0]);
        assert_eq!(frames[1].velocity, vec![0.25, -0.1]);
        assert_eq!(frames[1].discharge(), vec![4.5 * 0.25, 1.5 * -0.1]);
    }

    #[test]
    fn repeated_time_with_reset_position_starts_new_frame() {
        let text = "time,position,depth,velocity\n1,0,1,0\n1,1,1,0\n1,0,2,0\n1,1,2,0\n";
        let frames = read_columnar(text.as_bytes()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].depth, vec![2.0, 2.0]);
    }

    #[test]
    fn rejects_bad_header() {
        let err = read_columnar("t,x,h,u\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RecordError::MalformedHeader { .. }));
        let err = read_columnar("".as_bytes()).unwrap_err();
        assert!(matches!(err, RecordError::MalformedHeader { .. }));
    }

    #[test]
    fn rejects_bad_rows_with_line_numbers() {
        let text = format!("{HEADER}\n0,0,1,0\n0,1,x,0\n");
        match read_columnar(text.as_bytes()) {
            Err(RecordError::MalformedRow { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("depth"));
            }
            other => panic!("expected malformed row, got {other:?}"),
        }

        let text = format!("{HEADER}\n0,0,1\n");
        assert!(matches!(
            read_columnar(text.as_bytes()),
            Err(RecordError::MalformedRow { line: 2, .. })
        ));

        let text = format!("{HEADER}\n0,0,1,0,9\n");
        assert!(matches!(
            read_columnar(text.as_bytes()),
            Err(RecordError::MalformedRow { line: 2, .. })
        ));
    }

    mod proptests {
        use super::*;
        use crate::ColumnarWriter;
        use proptest::prelude::*;
        use weir_core::{StateView, StepId};

        struct Rows {
            time: f64,
            h: Vec<f64>,
            hu: Vec<f64>,
        }

        impl StateView for Rows {
            fn step_id(&self) -> StepId {
                StepId(1)
            }
            fn time(&self) -> f64 {
                self.time
            }
            fn spacing(&self) -> f64 {
                2.5
            }
            fn depth(&self) -> &[f64] {
                &self.h
            }
            fn discharge(&self) -> &[f64] {
                &self.hu
            }
        }

        proptest! {
            #[test]
            fn written_depths_read_back_bit_exact(
                time in 0.0f64..1e4,
                h in prop::collection::vec(1e-6f64..1e3, 2..40),
            ) {
                let hu: Vec<f64> = h.iter().map(|d| d * 0.3).collect();
                let rows = Rows { time, h: h.clone(), hu };
                let mut writer = ColumnarWriter::new(Vec::new()).unwrap();
                writer.write_frame(&rows).unwrap();
                let bytes = writer.into_inner().unwrap();

                let frames = read_columnar(bytes.as_slice()).unwrap();
                prop_assert_eq!(frames.len(), 1);
                prop_assert_eq!(frames[0].time.to_bits(), time.to_bits());
                for (a, b) in frames[0].depth.iter().zip(&h) {
                    prop_assert_eq!(a.to_bits(), b.to_bits());
                }
            }
        }
    }
}

//! PLA (Programmable Logic Array) format support
//!
//! The reader understands the directives this pipeline needs: `.i`, `.o`,
//! `.p`, `.type` (matched case-insensitively against `sop`/`esop`, anything
//! else is `Undef`), `#` comment lines and the `.e` terminator. Parsing of
//! cube lines is best-effort: a line whose input or output part disagrees
//! with the declared dimensions, or that contains an unexpected character,
//! is reported through `tracing` and skipped.
//!
//! The writer produces one single-output PLA per output function:
//!
//! ```text
//! .i <n_inputs>
//! .o 1
//! .p <n_cubes>
//! <cube> 1
//! ...
//! .e
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{CapacityError, PlaError, PlaReadError, PlaWriteError};
use crate::two_level::{Kind, TwoLevel};

/// Types that can be parsed from PLA format.
pub trait PlaReader: Sized {
    /// Parse from any buffered reader. The core deserialization method;
    /// the string and file conveniences delegate here.
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PlaReadError>;

    /// Parse from a PLA format string.
    ///
    /// # Examples
    ///
    /// ```
    /// use esop_logic::{Kind, PlaReader, TwoLevel};
    ///
    /// let pla = ".i 2\n.o 1\n.type esop\n.p 2\n1- 1\n-1 1\n.e\n";
    /// let esop = TwoLevel::from_pla_string(pla).unwrap();
    /// assert_eq!(esop.kind(), Kind::Esop);
    /// assert_eq!(esop.output(0).len(), 2);
    /// ```
    fn from_pla_string(s: &str) -> Result<Self, PlaReadError> {
        Self::from_pla_reader(Cursor::new(s.as_bytes()))
    }

    /// Load from a PLA file.
    fn from_pla_file<P: AsRef<Path>>(path: P) -> Result<Self, PlaReadError> {
        let file = File::open(path)?;
        Self::from_pla_reader(BufReader::new(file))
    }
}

/// Types that can be serialized to PLA format, one output function per PLA.
pub trait PlaWriter {
    /// Write the PLA of one output function. The core serialization
    /// method; the string and file conveniences delegate here.
    fn write_pla<W: Write>(&self, writer: &mut W, output: usize) -> Result<(), PlaWriteError>;

    /// Render one output function as a PLA string.
    fn to_pla_string(&self, output: usize) -> Result<String, PlaWriteError> {
        let mut buffer = Vec::new();
        self.write_pla(&mut buffer, output)?;
        // PLA format is ASCII, so this conversion is safe.
        Ok(String::from_utf8(buffer).unwrap())
    }

    /// Number of output functions available to write.
    fn n_pla_outputs(&self) -> usize;

    /// Write every output function to its own file, named
    /// `<stem>_<k>.pla`.
    fn to_pla_files<P: AsRef<Path>>(&self, stem: P) -> Result<(), PlaWriteError> {
        let stem = stem.as_ref();
        for output in 0..self.n_pla_outputs() {
            let mut name = stem.as_os_str().to_os_string();
            name.push(format!("_{}.pla", output));
            let file = File::create(&name)?;
            let mut writer = BufWriter::new(file);
            self.write_pla(&mut writer, output)?;
            writer.flush()?;
        }
        Ok(())
    }
}

impl PlaReader for TwoLevel {
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PlaReadError> {
        let mut n_inputs: Option<u32> = None;
        let mut n_outputs: Option<usize> = None;
        let mut kind = Kind::Undef;
        let mut result: Option<TwoLevel> = None;
        let mut n_skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(directive) = line.strip_prefix('.') {
                let mut parts = directive.split_whitespace();
                match parts.next() {
                    Some("i") => {
                        let value = parts.next().unwrap_or("");
                        let parsed: u32 = value.parse().map_err(|_| {
                            PlaError::InvalidInputDirective {
                                value: value.to_string(),
                            }
                        })?;
                        if parsed > 32 {
                            return Err(PlaError::from(CapacityError { n_inputs: parsed }).into());
                        }
                        n_inputs = Some(parsed);
                    }
                    Some("o") => {
                        let value = parts.next().unwrap_or("");
                        let parsed: usize = value.parse().map_err(|_| {
                            PlaError::InvalidOutputDirective {
                                value: value.to_string(),
                            }
                        })?;
                        n_outputs = Some(parsed);
                    }
                    Some("type") => {
                        kind = Kind::parse(parts.next().unwrap_or(""));
                        if let Some(ref mut two_level) = result {
                            two_level.set_kind(kind);
                        }
                    }
                    Some("e") | Some("end") => break,
                    // .p and unknown directives carry nothing we need.
                    _ => {}
                }
                continue;
            }

            // A cube line. Dimensions must be known by now.
            if result.is_none() {
                let ni = n_inputs.ok_or(PlaError::MissingInputDirective)?;
                let no = n_outputs.ok_or(PlaError::MissingOutputDirective)?;
                result = Some(TwoLevel::new(kind, ni, no));
            }
            let two_level = result.as_mut().unwrap();

            let mut parts = line.split_whitespace();
            let inputs = parts.next().unwrap_or("");
            let outputs = parts.next().unwrap_or("");
            if inputs.len() != two_level.n_inputs() as usize
                || outputs.len() != two_level.n_outputs()
            {
                warn!(
                    line = line_no + 1,
                    "cube is inconsistent with the declared attributes, skipping"
                );
                n_skipped += 1;
                continue;
            }
            if !inputs.chars().all(|c| matches!(c, '0' | '1' | '-'))
                || !outputs.chars().all(|c| matches!(c, '0' | '1' | '-' | '~'))
            {
                warn!(line = line_no + 1, "cube has unexpected characters, skipping");
                n_skipped += 1;
                continue;
            }
            two_level.add_pla_cube(inputs, outputs);
        }

        if n_skipped > 0 {
            warn!(cubes = n_skipped, "skipped malformed cube lines");
        }

        match result {
            Some(two_level) => Ok(two_level),
            // No cube lines at all: still a valid (constant-zero) PLA as
            // long as the dimensions were declared.
            None => {
                let ni = n_inputs.ok_or(PlaError::MissingInputDirective)?;
                let no = n_outputs.ok_or(PlaError::MissingOutputDirective)?;
                Ok(TwoLevel::new(kind, ni, no))
            }
        }
    }
}

impl PlaWriter for TwoLevel {
    fn write_pla<W: Write>(&self, writer: &mut W, output: usize) -> Result<(), PlaWriteError> {
        let cubes = self.output(output);
        writeln!(writer, ".i {}", self.n_inputs())?;
        writeln!(writer, ".o 1")?;
        writeln!(writer, ".p {}", cubes.len())?;
        for cube in cubes {
            writeln!(writer, "{} 1", cube.to_pla(self.n_inputs()))?;
        }
        writeln!(writer, ".e")?;
        Ok(())
    }

    fn n_pla_outputs(&self) -> usize {
        self.n_outputs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_cubes() {
        let pla = "# two-output example\n.i 3\n.o 2\n.p 2\n01- 10\n1-0 11\n.e\n";
        let fnt = TwoLevel::from_pla_string(pla).unwrap();
        assert_eq!(fnt.n_inputs(), 3);
        assert_eq!(fnt.n_outputs(), 2);
        assert_eq!(fnt.kind(), Kind::Undef);
        assert_eq!(fnt.output(0).len(), 2);
        assert_eq!(fnt.output(1).len(), 1);
    }

    #[test]
    fn type_directive_sets_the_kind() {
        let esop = TwoLevel::from_pla_string(".i 1\n.o 1\n.type ESOP\n1 1\n.e\n").unwrap();
        assert_eq!(esop.kind(), Kind::Esop);
        let sop = TwoLevel::from_pla_string(".i 1\n.o 1\n.type sop\n1 1\n.e\n").unwrap();
        assert_eq!(sop.kind(), Kind::Sop);
    }

    #[test]
    fn malformed_cubes_are_skipped() {
        let pla = ".i 2\n.o 1\n11 1\n111 1\nx- 1\n00 1\n.e\n";
        let fnt = TwoLevel::from_pla_string(pla).unwrap();
        assert_eq!(fnt.output(0).len(), 2);
    }

    #[test]
    fn missing_dimensions_are_an_error() {
        assert!(matches!(
            TwoLevel::from_pla_string("11 1\n.e\n"),
            Err(PlaReadError::Pla(PlaError::MissingInputDirective))
        ));
        assert!(matches!(
            TwoLevel::from_pla_string(".i 2\n11 1\n.e\n"),
            Err(PlaReadError::Pla(PlaError::MissingOutputDirective))
        ));
    }

    #[test]
    fn too_many_inputs_are_rejected() {
        assert!(matches!(
            TwoLevel::from_pla_string(".i 33\n.o 1\n.e\n"),
            Err(PlaReadError::Pla(PlaError::Capacity(_)))
        ));
    }

    #[test]
    fn empty_cube_section_is_the_zero_function() {
        let fnt = TwoLevel::from_pla_string(".i 3\n.o 1\n.p 0\n.e\n").unwrap();
        assert!(fnt.output(0).is_empty());
    }

    #[test]
    fn writer_emits_the_single_output_block() {
        let mut fnt = TwoLevel::new(Kind::Esop, 2, 2);
        fnt.add_pla_cube("1-", "10");
        fnt.add_pla_cube("-0", "11");
        let text = fnt.to_pla_string(0).unwrap();
        assert_eq!(text, ".i 2\n.o 1\n.p 2\n1- 1\n-0 1\n.e\n");
        let text = fnt.to_pla_string(1).unwrap();
        assert_eq!(text, ".i 2\n.o 1\n.p 1\n-0 1\n.e\n");
    }

    #[test]
    fn written_output_reads_back() {
        let mut fnt = TwoLevel::new(Kind::Esop, 3, 1);
        fnt.add_pla_cube("01-", "1");
        fnt.add_pla_cube("1-0", "1");
        let text = fnt.to_pla_string(0).unwrap();
        let back = TwoLevel::from_pla_string(&text).unwrap();
        assert_eq!(back.n_inputs(), 3);
        assert_eq!(back.output(0), fnt.output(0));
    }
}

//! PLA file round trips and best-effort parsing

use esop_logic::{exorcise, Kind, PlaReader, PlaWriter, TwoLevel};
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn pla_file_round_trip() {
    let pla = ".i 3\n.o 1\n.type esop\n.p 3\n01- 1\n1-0 1\n--- 1\n.e\n";
    let mut temp = NamedTempFile::new().expect("failed to create temp file");
    temp.write_all(pla.as_bytes()).expect("failed to write");
    temp.flush().expect("failed to flush");

    let esop = TwoLevel::from_pla_file(temp.path()).unwrap();
    assert_eq!(esop.kind(), Kind::Esop);
    assert_eq!(esop.n_inputs(), 3);
    assert_eq!(esop.output(0).len(), 3);

    let dir = tempdir().expect("failed to create temp dir");
    let stem = dir.path().join("result");
    esop.to_pla_files(&stem).unwrap();

    let written = fs::read_to_string(dir.path().join("result_0.pla")).unwrap();
    assert!(written.starts_with(".i 3\n.o 1\n.p 3\n"));
    assert!(written.ends_with(".e\n"));

    let back = TwoLevel::from_pla_file(dir.path().join("result_0.pla")).unwrap();
    assert_eq!(back.output(0), esop.output(0));
}

#[test]
fn multi_output_files_are_split() {
    let pla = ".i 2\n.o 2\n.p 2\n01 11\n10 01\n.e\n";
    let fnt = TwoLevel::from_pla_string(pla).unwrap();

    let dir = tempdir().expect("failed to create temp dir");
    let stem = dir.path().join("split");
    fnt.to_pla_files(&stem).unwrap();

    let first = TwoLevel::from_pla_file(dir.path().join("split_0.pla")).unwrap();
    let second = TwoLevel::from_pla_file(dir.path().join("split_1.pla")).unwrap();
    assert_eq!(first.output(0).len(), 1);
    assert_eq!(second.output(0).len(), 2);
}

#[test]
fn malformed_lines_are_skipped_not_fatal() {
    let pla = "\
# comment survives anywhere
.i 2
.o 1
01 1
011 1
0x 1
10 1
.e
";
    let fnt = TwoLevel::from_pla_string(pla).unwrap();
    assert_eq!(fnt.output(0).len(), 2);
}

#[test]
fn exorcised_pla_stays_equivalent() {
    // 1 ⊕ x0x1 ⊕ !x0!x1 over two variables, XOR in disguise.
    let pla = ".i 2\n.o 1\n.type esop\n.p 3\n-- 1\n11 1\n00 1\n.e\n";
    let original = TwoLevel::from_pla_string(pla).unwrap();
    let minimized = exorcise(&original);
    assert!(minimized.output(0).len() <= original.output(0).len());
    for assignment in 0..4u32 {
        assert_eq!(
            minimized.eval_output(0, assignment),
            original.eval_output(0, assignment)
        );
    }
    // The minimized form for XOR is two cubes.
    assert_eq!(minimized.output(0).len(), 2);
}

#[test]
fn reading_a_written_empty_function_round_trips() {
    let empty = TwoLevel::new(Kind::Esop, 4, 1);
    let text = empty.to_pla_string(0).unwrap();
    assert_eq!(text, ".i 4\n.o 1\n.p 0\n.e\n");
    let back = TwoLevel::from_pla_string(&text).unwrap();
    assert_eq!(back.n_inputs(), 4);
    assert!(back.output(0).is_empty());
}

use arch::error::Error as ArchError;
use lc2kasm::{assemble, error::Error};

fn case(src: &str) -> Result<Vec<i32>, Error> {
    assemble(src).map(|p| p.bins().collect()).map_err(|e| e.error)
}

#[test]
fn multiply() {
    let src = "\
\tlw\t0\t2\t14\tload multiplicand
\tlw\t0\t3\t15
\tlw\t0\t4\t16\tmask starts at 1
\tlw\t0\t6\t17
loop\tnor\t3\t3\t5
\tnor\t4\t4\t7
\tnor\t5\t7\t5\tr5 = mplier & bit
\tbeq\t0\t5\tskip
\tadd\t1\t2\t1
skip\tadd\t2\t2\t2
\tadd\t4\t4\t4
\tbeq\t0\t4\tdone
\tbeq\t0\t0\tloop
done\thalt
\t.fill\t32766
\t.fill\t10383
\t.fill\t1
\t.fill\t-1
";
    let words = case(src).unwrap();
    assert_eq!(words.len(), 18);
    assert_eq!(words[0], (2 << 22) | (2 << 16) | 14);
    assert_eq!(words[4], (1 << 22) | (3 << 19) | (3 << 16) | 5);
    // beq 0 5 skip: skip is line 9, pc 7
    assert_eq!(words[7], (4 << 22) | (5 << 16) | 1);
    // beq 0 0 loop: loop is line 4, pc 12
    assert_eq!(words[12], (4 << 22) | 0xFFF7);
    assert_eq!(words[13], 6 << 22);
    assert_eq!(&words[14..], &[32766, 10383, 1, -1]);
}

#[test]
fn lw_from_fill_label() {
    // the label value is the fill literal, not its address
    let words = case("\tlw 0 1 five\n\thalt\nfive\t.fill 5\n").unwrap();
    assert_eq!(words[0], (2 << 22) | (0 << 19) | (1 << 16) | 5);
    assert_eq!(words[0], 8454149);

    let words = case("five\t.fill 5\n\tlw 0 1 five\n").unwrap();
    assert_eq!(words[1], 8454149);
}

#[test]
fn beq_over_halt() {
    let words = case("\tbeq 0 0 label\n\thalt\nlabel\tnoop\n").unwrap();
    assert_eq!(words, vec![(4 << 22) | 1, 6 << 22, 7 << 22]);
}

#[test]
fn beq_offset_bounds() {
    // offset = value - (pc + 1) with pc = 0
    assert!(case("\tbeq 0 0 far\nfar\t.fill 32768\n").is_ok());
    assert!(case("\tbeq 0 0 far\nfar\t.fill -32767\n").is_ok());
    assert!(matches!(
        case("\tbeq 0 0 far\nfar\t.fill 32769\n"),
        Err(Error::OffsetRange(v)) if v == "32768"
    ));
    assert!(matches!(
        case("\tbeq 0 0 far\nfar\t.fill -32768\n"),
        Err(Error::OffsetRange(v)) if v == "-32769"
    ));
}

#[test]
fn duplicate_labels() {
    for src in [
        "a\tnoop\na\thalt\n",
        "\tnoop\nb\thalt\n\tnoop\nb\t.fill 3\n",
        "c\t.fill 1\nc\t.fill 2\n",
    ] {
        assert!(
            matches!(case(src), Err(Error::DuplicateLabel(_))),
            "{:?}",
            src
        );
    }
}

#[test]
fn register_operands() {
    assert!(case("\tadd 0 7 1\n").is_ok());
    assert!(matches!(
        case("\tadd 8 0 1\n"),
        Err(Error::Arch(ArchError::RegisterRange(8)))
    ));
    assert!(matches!(
        case("\tlw -1 0 1\n"),
        Err(Error::Arch(ArchError::RegisterRange(-1)))
    ));
    assert!(matches!(
        case("\tsw 0 r0 1\n"),
        Err(Error::Arch(ArchError::NonIntegerRegister(_)))
    ));
}

#[test]
fn forward_alias() {
    let words = case("\tlw 0 1 ptr\n\thalt\nptr\t.fill data\ndata\t.fill 99\n").unwrap();
    assert_eq!(words[0], (2 << 22) | (1 << 16) | 99);
    assert_eq!(words[2], 99);
}

#[test]
fn fails_without_output() {
    let err = assemble("\tnoop\n\thalt\n\tbogus\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(
        err.error,
        Error::Arch(ArchError::UnknownOpcode(op)) if op == "bogus"
    ));
}

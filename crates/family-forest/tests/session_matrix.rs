use family_forest::cli::run_script;
use family_forest::{Command, FamilyError, Session};

#[test]
fn full_script_produces_ordered_log() {
    let script = "\
Boss 100.0
MEMBER_IN A 50.0
MEMBER_IN B 150.0
MEMBER_IN C 175.0
INTEL_TARGET A 50.0 C 175.0
INTEL_RANK A 50.0
INTEL_DIVIDE
MEMBER_OUT Boss 100.0
INTEL_RANK C 175.0
";
    let out = run_script(script).unwrap();
    assert_eq!(
        out,
        "\
Boss welcomed A
Boss welcomed B
Boss welcomed C
B welcomed C
Target Analysis Result: Boss 100.000
Rank Analysis Result: A 50.000 B 150.000
Division Analysis Result: 2
Boss left the family, replaced by B
Rank Analysis Result: A 50.000 C 175.000
"
    );
}

#[test]
fn keys_round_half_up_in_output() {
    let out =
        run_script("Boss 2.0625\nMEMBER_IN A 1.0005\nINTEL_RANK Boss\nINTEL_RANK A\n").unwrap();
    assert_eq!(
        out,
        "\
Boss welcomed A
Rank Analysis Result: Boss 2.063
Rank Analysis Result: A 1.001
"
    );
}

#[test]
fn unknown_commands_are_skipped() {
    let out = run_script("Boss 1\nMEMBER_PROMOTE A 2\nMEMBER_IN A 2\n").unwrap();
    assert_eq!(out, "Boss welcomed A\n");
}

#[test]
fn blank_lines_are_ignored() {
    let out = run_script("\n\nBoss 1\n\n   \nINTEL_DIVIDE\n").unwrap();
    assert_eq!(out, "Division Analysis Result: 1\n");
}

#[test]
fn empty_script_produces_nothing() {
    assert_eq!(run_script("").unwrap(), "");
}

#[test]
fn malformed_line_stops_the_run() {
    let mut session = Session::new();
    let err = session
        .run("Boss 1\nMEMBER_IN A 2\nMEMBER_IN B two\nMEMBER_IN C 3\n")
        .unwrap_err();

    assert!(matches!(err, FamilyError::Malformed { line: 3, .. }));
    assert_eq!(session.tree().len(), 2);
    assert_eq!(session.log().len(), 1);
}

#[test]
fn malformed_root_line_is_fatal() {
    let err = run_script("MEMBER_IN A 2\n").unwrap_err();
    assert!(matches!(err, FamilyError::Malformed { line: 1, .. }));
}

#[test]
fn missing_members_are_fatal() {
    assert!(matches!(
        run_script("Boss 1\nINTEL_TARGET Boss 1 Ghost 2\n"),
        Err(FamilyError::MemberNotFound(ref n)) if n == "Ghost"
    ));
    assert!(matches!(
        run_script("Boss 1\nINTEL_RANK Ghost\n"),
        Err(FamilyError::MemberNotFound(_))
    ));
    assert!(matches!(
        run_script("Boss 1\nMEMBER_OUT Ghost 2\n"),
        Err(FamilyError::KeyNotFound(_))
    ));
}

#[test]
fn apply_accepts_typed_commands() {
    let mut session = Session::new();
    session
        .apply(Command::Root {
            name: "Boss".into(),
            key: 10.0,
        })
        .unwrap();
    session
        .apply(Command::MemberIn {
            name: "A".into(),
            key: 5.0,
        })
        .unwrap();
    session.apply(Command::Unknown("NOPE".into())).unwrap();
    session.apply(Command::Divide).unwrap();

    let lines: Vec<String> = session.into_log().lines().collect();
    assert_eq!(lines, vec!["Boss welcomed A", "Division Analysis Result: 1"]);
}

use std::process::Command;

fn run(fixture: &str) -> (String, String, bool) {
    let path = format!("tests/fixtures/{fixture}");
    let output = Command::new(env!("CARGO_BIN_EXE_gas-station"))
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn valid_requests() {
    let (stdout, stderr, success) = run("valid.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "item,variant,value",
            // only the first diesel pump is ever used
            "pump,diesel,70",
            "pump,regular,32",
            "pump,diesel,50",
            "revenue,,72",
            "sales,,3",
            "cancellations_no_gas,,1",
            "cancellations_too_expensive,,1",
        ]
    );
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("with_errors.csv");

    assert!(success);
    assert!(stderr.contains("unrecognized request type"));
    assert!(stderr.contains("missing amount"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "item,variant,value");
    assert_eq!(lines[1], "pump,super,20");
    assert_eq!(lines[2], "revenue,,20");
    assert_eq!(lines[3], "sales,,1");
    // purchases of a variant without a pump are not cancellations
    assert_eq!(lines[4], "cancellations_no_gas,,0");
    assert_eq!(lines[5], "cancellations_too_expensive,,0");
}

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vfbill(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vfbill").unwrap();
    cmd.env("VF_BILLING_DATA_DIR", data_dir.path())
        .env_remove("VF_BILLING_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn register(data_dir: &TempDir, name: &str, email: &str, extra: &[&str]) -> String {
    let output = vfbill(data_dir)
        .args([
            "faculty",
            "register",
            "--name",
            name,
            "--email",
            email,
            "--phone",
            "9876543210",
            "--account",
            "123456789012",
            "--ifsc",
            "SBIN0001234",
            "--bank",
            "State Bank of India",
            "--pan",
            "ABCDE1234F",
            "--aadhar",
            "123412341234",
        ])
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success(), "register failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.find("(FAC-").unwrap() + 1;
    let end = start + stdout[start..].find(')').unwrap();
    stdout[start..end].to_string()
}

#[test]
fn test_init_creates_data_files() {
    let data_dir = TempDir::new().unwrap();

    vfbill(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(data_dir.path().join("config.json").exists());
    assert!(data_dir.path().join("data").join("bills.json").exists());

    vfbill(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn test_no_command_prints_hint() {
    let data_dir = TempDir::new().unwrap();
    vfbill(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("vfbill init"));
}

#[test]
fn test_bill_to_monthly_ledger() {
    let data_dir = TempDir::new().unwrap();
    vfbill(&data_dir).arg("init").assert().success();
    let id = register(&data_dir, "Asha Rao", "asha@example.com", &[]);

    vfbill(&data_dir)
        .args([
            "bill",
            "add",
            "--faculty",
            &id,
            "--class",
            "BCA I",
            "--subject",
            "Data Structures",
            "--dates",
            "1st, 5th, 12th",
            "--hours",
            "9",
            "--month",
            "March",
            "--year",
            "2024",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹4500"));

    let csv_path = data_dir.path().join("march.csv");
    vfbill(&data_dir)
        .args(["report", "monthly", "Mar", "2024", "--output"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger exported to"));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("\"DAVV, Indore\",,,,,,,,,\n"));
    assert!(csv.contains("Visiting Faculty Salary Bill March 2024"));
    assert!(csv.contains("1,Asha Rao,Mar-24,9,500,4500,ABCDE1234F,450,4050,1"));
}

#[test]
fn test_personal_summary_on_terminal() {
    let data_dir = TempDir::new().unwrap();
    vfbill(&data_dir).arg("init").assert().success();
    let id = register(&data_dir, "Asha Rao", "asha@example.com", &[]);

    vfbill(&data_dir)
        .args([
            "bill", "add", "--faculty", &id, "--class", "BCA I", "--subject", "DBMS", "--dates",
            "2nd", "--hours", "4", "--month", "2", "--year", "2024",
        ])
        .assert()
        .success();

    vfbill(&data_dir)
        .args(["report", "summary", "--from", "Jan", "--to", "May", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("for the Period of January - May 2024"))
        .stdout(predicate::str::contains("TOTAL"));
}

#[test]
fn test_faculty_session_is_scoped() {
    let data_dir = TempDir::new().unwrap();
    vfbill(&data_dir).arg("init").assert().success();
    let id = register(&data_dir, "Asha Rao", "asha@example.com", &[]);

    vfbill(&data_dir)
        .args(["--as-faculty", &id, "rate", "set", "700"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not permitted"));

    vfbill(&data_dir)
        .args(["--as-faculty", &id, "bill", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bills found."));
}

#[test]
fn test_password_protected_session() {
    let data_dir = TempDir::new().unwrap();
    vfbill(&data_dir).arg("init").assert().success();
    let id = register(
        &data_dir,
        "Asha Rao",
        "asha@example.com",
        &["--with-password", "--password", "lecture42"],
    );

    vfbill(&data_dir)
        .args(["--as-faculty", &id, "bill", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password required"));

    vfbill(&data_dir)
        .args(["--as-faculty", &id, "bill", "stats"])
        .env("VF_BILLING_PASSWORD", "lecture42")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bills:          0"));
}

#[test]
fn test_duplicate_email_is_rejected() {
    let data_dir = TempDir::new().unwrap();
    vfbill(&data_dir).arg("init").assert().success();
    register(&data_dir, "Asha Rao", "asha@example.com", &[]);

    vfbill(&data_dir)
        .args([
            "faculty", "register", "--name", "Asha R", "--email", "ASHA@example.com", "--phone",
            "9876543210", "--account", "123456789012", "--ifsc", "SBIN0001234", "--bank", "SBI",
            "--pan", "ABCDE1234F", "--aadhar", "123412341234",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

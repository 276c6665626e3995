use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "fintrack";

fn fintrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINTRACK_DATA_DIR", data_dir.path())
        .env_remove("TELEGRAM_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn add(data_dir: &TempDir, kind: &str, amount: &str, category: &str, description: &str, date: &str) {
    fintrack(data_dir)
        .args(["entry", "add", kind, amount, category, description, "--date", date])
        .assert()
        .success();
}

#[test]
fn help_lists_command_groups() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("entry").and(contains("report")));
}

#[test]
fn entries_persist_between_runs() {
    let dir = TempDir::new().unwrap();
    add(&dir, "income", "3000", "Salario", "Pagamento", "2025-05-01");
    add(&dir, "expense", "400,00", "Moradia", "Aluguel", "2025-05-05T10:00");

    fintrack(&dir)
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(contains("Aluguel").and(contains("Pagamento")));

    fintrack(&dir)
        .args(["entry", "balance", "5", "2025"])
        .assert()
        .success()
        .stdout(contains("R$ 2600.00"));

    assert!(dir.path().join("data").join("entries.json").exists());
}

#[test]
fn unknown_filter_is_rejected() {
    let dir = TempDir::new().unwrap();
    add(&dir, "expense", "10", "Lazer", "Cinema", "2025-05-05");

    fintrack(&dir)
        .args(["entry", "list", "--filter", "payee=Bob"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn missing_entry_is_not_found() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["entry", "show", "42"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn plan_compute_and_limit() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["plan", "compute", "4000"])
        .assert()
        .success()
        .stdout(contains("moradia").and(contains("R$ 1200.00")));

    fintrack(&dir)
        .args(["plan", "limit", "Alimentação"])
        .assert()
        .success()
        .stdout(contains("R$ 800.00"));

    fintrack(&dir)
        .args(["plan", "limit", "Viagem"])
        .assert()
        .success()
        .stdout(contains("no limit"));
}

#[test]
fn overspending_records_an_alert() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["plan", "compute", "1000"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["entry", "add", "expense", "400", "Lazer", "Show", "--date", "2025-06-01"])
        .assert()
        .success()
        .stdout(contains("Budget exceeded for Lazer"));

    fintrack(&dir)
        .args(["notify", "list"])
        .assert()
        .success()
        .stdout(contains("spent R$ 400.00 of R$ 100.00"));
}

#[test]
fn send_without_token_fails_and_records_nothing() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["notify", "send", "hello", "--to", "123"])
        .assert()
        .failure()
        .stderr(contains("Delivery error"));

    fintrack(&dir)
        .args(["notify", "list"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn period_report_prints_and_exports() {
    let dir = TempDir::new().unwrap();
    add(&dir, "income", "3000", "Salario", "Pagamento", "2025-05-01");
    add(&dir, "expense", "200", "Moradia", "Conta", "2025-05-10");

    fintrack(&dir)
        .args(["report", "period", "2025-05-01", "2025-06-01"])
        .assert()
        .success()
        .stdout(contains("Closing balance").and(contains("R$ 2800.00")));

    let output = dir.path().join("may.json");
    fintrack(&dir)
        .args(["report", "period", "2025-05-01", "2025-06-01", "--output"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["closing_balance"], 2800.0);
}

#[test]
fn reversed_period_is_invalid() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["report", "period", "2025-06-01", "2025-05-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn mutations_reach_the_audit_log() {
    let dir = TempDir::new().unwrap();
    add(&dir, "expense", "15", "Transporte", "Ônibus", "2025-05-05");

    fintrack(&dir)
        .args(["audit"])
        .assert()
        .success()
        .stdout(contains("CREATE"));
}

#[test]
fn init_writes_settings_and_config_reports_it() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Initialized:        no"));

    fintrack(&dir).arg("init").assert().success();
    assert!(dir.path().join("config.json").exists());

    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Initialized:        yes"));
}

#[test]
fn compare_accepts_negative_year_and_rejects_it() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["report", "compare", "-1", "2025"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn tiny_salary_plan_is_rejected() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["plan", "compute", "0.004"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

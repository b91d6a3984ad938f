use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ORDER_BLOCK: &str = "PREVENTA #27967
person
Datos del cliente
Nombre
Juan Pérez
RUT
123456785
Teléfono
+56 9 1234 5678
Correo
juan@correo.cl
Despacho a domicilio
Por pagar
";

/// A command whose platform config dir points into a scratch directory.
fn despacho(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("despacho").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path());
    cmd
}

#[test]
fn parse_file_to_json() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("pedido.txt");
    fs::write(&input, ORDER_BLOCK).unwrap();

    despacho(&home)
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fullName":"Juan Pérez""#))
        .stdout(predicate::str::contains(r#""nationalId":"12.345.678-5""#))
        .stdout(predicate::str::contains(r#""phone":"+56912345678""#))
        .stdout(predicate::str::contains(r#""orderNumber":"27967""#))
        .stdout(predicate::str::contains(r#""cashOnDelivery":true"#))
        .stdout(predicate::str::contains(r#""homeDelivery":true"#))
        .stdout(predicate::str::contains("sources").not());
}

#[test]
fn parse_stdin_to_sheet() {
    let home = TempDir::new().unwrap();

    despacho(&home)
        .args(["parse", "-", "--format", "text"])
        .write_stdin(ORDER_BLOCK)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Despacho N°27967"))
        .stdout(predicate::str::contains("[x] Por Pagar"))
        .stdout(predicate::str::contains("[x] Domicilio"))
        .stdout(predicate::str::contains("CORREO:         juan@correo.cl"));
}

#[test]
fn parse_applies_user_edits() {
    let home = TempDir::new().unwrap();

    despacho(&home)
        .args([
            "parse",
            "--set",
            "notes=Frágil",
            "--set",
            "fullName=Juan A. Pérez",
            "--flag",
            "onAccount",
            "--show-sources",
        ])
        .write_stdin(ORDER_BLOCK)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""notes":"Frágil""#))
        .stdout(predicate::str::contains(r#""fullName":"Juan A. Pérez""#))
        .stdout(predicate::str::contains(r#""onAccount":true"#))
        .stdout(predicate::str::contains(r#""rule":"order_number""#));
}

#[test]
fn parse_rejects_unknown_field_edit() {
    let home = TempDir::new().unwrap();

    despacho(&home)
        .args(["parse", "--set", "apellido=Soto"])
        .write_stdin(ORDER_BLOCK)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field: apellido"));
}

#[test]
fn parse_missing_input_file() {
    let home = TempDir::new().unwrap();

    despacho(&home)
        .args(["parse", "no-existe.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn parse_writes_csv_to_file() {
    let home = TempDir::new().unwrap();
    let output = home.path().join("envio.csv");

    despacho(&home)
        .args(["parse", "-f", "csv", "-o"])
        .arg(&output)
        .write_stdin(ORDER_BLOCK)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("nationalId,fullName,"));
    assert!(csv.contains("12.345.678-5,Juan Pérez,"));
}

#[test]
fn config_file_disables_fallbacks() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("despacho.json");
    fs::write(&config, r#"{"extraction": {"enable_fallbacks": false}}"#).unwrap();

    despacho(&home)
        .args(["parse", "--config"])
        .arg(&config)
        .write_stdin("PREVENTA #27967")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""orderNumber":"""#));
}

#[test]
fn config_init_set_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("despacho.json");

    despacho(&home)
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();

    despacho(&home)
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    despacho(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "output.pretty_json", "true"])
        .assert()
        .success();

    despacho(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "output.pretty_json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));

    despacho(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "output.colour", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

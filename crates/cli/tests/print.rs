use std::error::Error;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_orders(path: &Path) -> Result<(), Box<dyn Error>> {
    let items: Vec<String> = (0..60)
        .map(|i| {
            format!(
                r#"{{ "quantity": 1, "unit": "pc", "description": "Bottled water {i}", "unit_price": "15.00" }}"#
            )
        })
        .collect();
    let orders = format!(
        r#"[
  {{
    "id": "0190f3c2-7a4e-7b1e-9c1a-2f5d3e4a5b6c",
    "receipt_number": "DR-0001",
    "customer": {{ "id": "0190f3c2-7a4e-7b1e-9c1a-2f5d3e4a5b6d", "name": "Aling <Nena>" }},
    "address": "Magay Public Market",
    "date": "2025-03-14",
    "delivered_by": "Jun",
    "items": [
      {{ "quantity": "2", "unit": "sack", "description": "Rice", "unit_price": "1250.00", "amount": "1.00" }}
    ]
  }},
  {{
    "id": "0190f3c2-7a4e-7b1e-9c1a-2f5d3e4a5b6e",
    "receipt_number": "DR-0002",
    "date": "2025-03-15",
    "items": [{items}]
  }}
]"#,
        items = items.join(",\n")
    );
    fs::write(path, orders)?;
    Ok(())
}

#[test]
fn print_writes_html_document() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let orders = dir.path().join("orders.json");
    let output = dir.path().join("receipts.html");
    write_orders(&orders)?;

    Command::cargo_bin("receiptdesk")?
        .args([
            "print",
            orders.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--no-auto-print",
        ])
        .assert()
        .success();

    let html = fs::read_to_string(&output)?;
    assert!(html.contains("Customer: Aling &lt;Nena&gt;"));
    // stored amount is recomputed from quantity and price
    assert!(html.contains("₱2500.00"));
    assert!(html.contains("Delivery Receipt (cont.)"));
    assert_eq!(html.matches("TOTAL: ").count(), 2);
    assert!(!html.contains("window.print()"));
    Ok(())
}

#[test]
fn print_to_stdout_honours_selection_and_env_overrides() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let orders = dir.path().join("orders.json");
    write_orders(&orders)?;

    Command::cargo_bin("receiptdesk")?
        .env("RECEIPTDESK_STORE_NAME", "Corner Shop")
        .args(["print", orders.to_str().unwrap(), "--select", "DR-0001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Corner Shop"))
        .stdout(predicate::str::contains("Ref: DR-0001"))
        .stdout(predicate::str::contains("Ref: DR-0002").not());
    Ok(())
}

#[test]
fn layout_reports_pages_per_slot() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let orders = dir.path().join("orders.json");
    write_orders(&orders)?;

    let out = Command::cargo_bin("receiptdesk")?
        .args(["layout", orders.to_str().unwrap()])
        .output()?;
    assert!(out.status.success());

    let lines: Vec<serde_json::Value> = String::from_utf8(out.stdout)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;

    assert!(lines.len() >= 3);
    assert_eq!(lines[0]["receipt"], "DR-0001");
    assert_eq!(lines[0]["last_page"], true);
    assert_eq!(lines[1]["receipt"], "DR-0002");
    assert_eq!(lines[1]["first_item"], 1);
    assert_eq!(lines[1]["continuation"], false);
    assert_eq!(lines.iter().filter(|l| l["last_page"] == true).count(), 2);
    assert_eq!(lines.last().unwrap()["receipt"], "DR-0002");
    Ok(())
}

#[test]
fn unknown_receipt_selection_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let orders = dir.path().join("orders.json");
    write_orders(&orders)?;

    Command::cargo_bin("receiptdesk")?
        .args(["print", orders.to_str().unwrap(), "--select", "DR-9999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("receipt DR-9999 not found"));
    Ok(())
}

#[test]
fn malformed_orders_file_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let orders = dir.path().join("orders.json");
    fs::write(&orders, "{ not json")?;

    Command::cargo_bin("receiptdesk")?
        .args(["layout", orders.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid orders file"));
    Ok(())
}

#[test]
fn out_of_range_amount_fails_without_panicking() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let orders = dir.path().join("orders.json");
    fs::write(
        &orders,
        r#"[{
  "id": "0190f3c2-7a4e-7b1e-9c1a-2f5d3e4a5b6c",
  "receipt_number": "DR-0001",
  "date": "2025-03-14",
  "items": [{ "quantity": "79228162514264337593543950335", "unit": "pc", "description": "Rice", "unit_price": "2" }]
}]"#,
    )?;

    Command::cargo_bin("receiptdesk")?
        .args(["layout", orders.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid orders file"))
        .stderr(predicate::str::contains("amount out of range"));
    Ok(())
}

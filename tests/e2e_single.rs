mod support_single;

use std::fs;
use std::process::Output;

use tempfile::tempdir;

use support_single::{closed_port_url, run_apibench, spawn_http_server};

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn expect_success(output: &Output) -> Result<String, String> {
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(stdout_of(output))
}

fn expect_contains(haystack: &str, needle: &str) -> Result<(), String> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(format!("Expected '{}' in output:\n{}", needle, haystack))
    }
}

#[test]
fn e2e_basic_run() -> Result<(), String> {
    let (url, server) = spawn_http_server(200)?;
    let output = run_apibench(["-u", url.as_str(), "-r", "10", "-c", "5", "--no-color"])?;
    let stdout = expect_success(&output)?;

    expect_contains(&stdout, "Benchmark Results:")?;
    expect_contains(&stdout, "Total Requests:        10")?;
    expect_contains(&stdout, "Concurrency:           5")?;
    expect_contains(&stdout, "Failed Requests: 0")?;
    expect_contains(&stdout, "  200 => 10 responses")?;
    if server.hits() != 10 {
        return Err(format!("Expected 10 server hits, got {}", server.hits()));
    }
    Ok(())
}

#[test]
fn e2e_uneven_split_drops_remainder() -> Result<(), String> {
    let (url, server) = spawn_http_server(200)?;
    let output = run_apibench(["-u", url.as_str(), "-r", "9", "-c", "4", "--no-color"])?;
    let stdout = expect_success(&output)?;

    expect_contains(&stdout, "Dropped Requests:      1")?;
    expect_contains(&stdout, "  200 => 8 responses")?;
    if server.hits() != 8 {
        return Err(format!("Expected 8 server hits, got {}", server.hits()));
    }
    Ok(())
}

#[test]
fn e2e_even_distribution_sends_everything() -> Result<(), String> {
    let (url, server) = spawn_http_server(200)?;
    let output = run_apibench([
        "-u",
        url.as_str(),
        "-r",
        "9",
        "-c",
        "4",
        "--even-distribution",
        "--no-color",
    ])?;
    let stdout = expect_success(&output)?;

    expect_contains(&stdout, "  200 => 9 responses")?;
    if stdout.contains("Dropped Requests:") {
        return Err("No request should be dropped".to_owned());
    }
    if server.hits() != 9 {
        return Err(format!("Expected 9 server hits, got {}", server.hits()));
    }
    Ok(())
}

#[test]
fn e2e_server_errors_still_exit_zero() -> Result<(), String> {
    let (url, _server) = spawn_http_server(503)?;
    let output = run_apibench(["-u", url.as_str(), "-r", "4", "-c", "2", "--no-color"])?;
    let stdout = expect_success(&output)?;

    expect_contains(&stdout, "  503 => 4 responses")?;
    expect_contains(&stdout, "Failed Requests: 0")?;
    Ok(())
}

#[test]
fn e2e_transport_errors_still_exit_zero() -> Result<(), String> {
    let url = closed_port_url()?;
    let output = run_apibench([
        "-u",
        url.as_str(),
        "-r",
        "4",
        "-c",
        "2",
        "--connect-timeout",
        "2s",
        "--no-color",
    ])?;
    let stdout = expect_success(&output)?;

    expect_contains(&stdout, "Failed Requests: 4 requests failed")?;
    expect_contains(&stdout, "Min Response Time:     0ns")?;
    expect_contains(&stdout, "P99 Response Time:     0ns")?;
    Ok(())
}

#[test]
fn e2e_missing_url_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = dir.path().join("empty.toml");
    fs::write(&config, "requests = 5\n").map_err(|err| format!("write failed: {}", err))?;

    let config_arg = config.to_string_lossy().into_owned();
    let output = run_apibench(["--config", config_arg.as_str()])?;
    if output.status.success() {
        return Err("Expected non-zero exit without a URL".to_owned());
    }
    if !stdout_of(&output).is_empty() {
        return Err("Expected no report without a URL".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_invalid_arguments_fail() -> Result<(), String> {
    for args in [
        vec!["-u", "not a url"],
        vec!["-u", "ftp://localhost/file"],
        vec!["-u", "http://localhost", "-r", "0"],
        vec!["-u", "http://localhost", "-c", "0"],
    ] {
        let output = run_apibench(&args)?;
        if output.status.success() {
            return Err(format!("Expected failure for {:?}", args));
        }
    }
    Ok(())
}

#[test]
fn e2e_config_file_and_json_export() -> Result<(), String> {
    let (url, server) = spawn_http_server(200)?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let export = dir.path().join("report.json");
    let config = dir.path().join("apibench.toml");
    let content = format!(
        "url = \"{}\"\nrequests = 6\nconcurrency = 3\ntimeout = \"5s\"\nexport_json = \"{}\"\n",
        url,
        export.to_string_lossy().replace('\\', "\\\\")
    );
    fs::write(&config, content).map_err(|err| format!("write failed: {}", err))?;

    let config_arg = config.to_string_lossy().into_owned();
    let output = run_apibench(["--config", config_arg.as_str(), "--no-color"])?;
    let stdout = expect_success(&output)?;
    expect_contains(&stdout, "  200 => 6 responses")?;
    if server.hits() != 6 {
        return Err(format!("Expected 6 server hits, got {}", server.hits()));
    }

    let raw = fs::read_to_string(&export).map_err(|err| format!("read export: {}", err))?;
    let json: serde_json::Value =
        serde_json::from_str(&raw).map_err(|err| format!("parse export: {}", err))?;
    if json["executed_requests"] != 6 || json["success_count"] != 6 {
        return Err(format!("Unexpected export: {}", json));
    }
    if json["status_histogram"]["200"] != 6 {
        return Err(format!("Unexpected histogram: {}", json));
    }
    Ok(())
}

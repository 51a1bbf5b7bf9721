use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const TIMELINE: &str = include_str!("../../libskyfeed/tests/fixtures/timeline.json");

/// Write a page file into the temp dir
fn write_page(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

fn second_page() -> String {
    serde_json::json!({
        "feed": [{
            "post": {
                "uri": "at://did:plc:zed/app.bsky.feed.post/3knext",
                "cid": "bafyreiggyhe2tscuh4pezwmaazgpcys65nq2sbydwjde77ydt4qwqjiiwm",
                "author": { "did": "did:plc:zed", "handle": "zed.bsky.social" },
                "record": { "text": "From page two" },
                "indexedAt": "2024-01-14T10:00:00Z"
            }
        }]
    })
    .to_string()
}

/// Run sky-feed with an isolated (absent) config file
fn sky_feed(dir: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_sky-feed"))
        .env("SKYFEED_CONFIG", dir.join("config.toml"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()?)
}

#[test]
fn test_text_output() -> Result<()> {
    let dir = TempDir::new()?;
    let page = write_page(dir.path(), "page1.json", TIMELINE)?;

    let output = sky_feed(dir.path(), &[page.to_str().unwrap(), "--utc"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("[0] 2024-01-15 10:30:00 | @alice.bsky.social"));
    assert!(stdout.contains("Reposted by @bob.bsky.social"));
    assert!(stdout.contains("Reply to @dave.bsky.social"));
    assert!(stdout.contains("[2 image(s)]"));
    assert!(stdout.contains("[link] An article"));
    assert!(stdout.contains("View: /repositories/did:plc:alice/app.bsky.feed.post/3kplain"));
    assert!(stdout.contains("View: /repositories/did:plc:judy/app.bsky.feed.post/3knoprefix"));
    assert!(stdout.contains("Next cursor: 1705314600000::bafyreicursor"));

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let dir = TempDir::new()?;
    let page = write_page(dir.path(), "page1.json", TIMELINE)?;

    let output = sky_feed(dir.path(), &[page.to_str().unwrap(), "--format", "json"])?;

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let rows = rows.as_array().expect("array of rows");

    assert_eq!(rows.len(), 7);
    assert_eq!(rows[1]["reposted_by_handle"], "bob.bsky.social");
    assert_eq!(rows[1]["embed"]["kind"], "images");
    assert_eq!(rows[3]["embed"]["kind"], "images");
    assert_eq!(rows[4]["embed"]["kind"], "none");
    assert_eq!(rows[0]["report_id"], "at://did:plc:alice/app.bsky.feed.post/3kplain");

    Ok(())
}

#[test]
fn test_stdin_jsonl() -> Result<()> {
    let dir = TempDir::new()?;

    let mut child = Command::new(env!("CARGO_BIN_EXE_sky-feed"))
        .env("SKYFEED_CONFIG", dir.path().join("config.toml"))
        .args(["--format", "jsonl"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(TIMELINE.as_bytes())?;
    let output = child.wait_with_output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    for line in lines {
        let row: serde_json::Value = serde_json::from_str(line)?;
        assert!(row["navigation_id"].is_string());
    }

    Ok(())
}

#[test]
fn test_load_more_pulls_next_page() -> Result<()> {
    let dir = TempDir::new()?;
    let page1 = write_page(dir.path(), "page1.json", TIMELINE)?;
    let page2 = write_page(dir.path(), "page2.json", &second_page())?;

    let output = sky_feed(
        dir.path(),
        &[
            "--pages",
            "2",
            page1.to_str().unwrap(),
            page2.to_str().unwrap(),
            "--format",
            "jsonl",
        ],
    )?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[7].contains("zed.bsky.social"));

    Ok(())
}

#[test]
fn test_page_limit_stops_load_more() -> Result<()> {
    let dir = TempDir::new()?;
    let page1 = write_page(dir.path(), "page1.json", TIMELINE)?;
    let page2 = write_page(dir.path(), "page2.json", &second_page())?;

    let output = sky_feed(
        dir.path(),
        &[page1.to_str().unwrap(), page2.to_str().unwrap(), "--format", "jsonl"],
    )?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.lines().count(), 7);
    assert!(!stdout.contains("zed.bsky.social"));

    Ok(())
}

#[test]
fn test_report_emits_canonical_uri() -> Result<()> {
    let dir = TempDir::new()?;
    let page = write_page(dir.path(), "page1.json", TIMELINE)?;

    let output = sky_feed(dir.path(), &[page.to_str().unwrap(), "--report", "1"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("report: at://did:plc:carol/app.bsky.feed.post/3kreply"));

    Ok(())
}

#[test]
fn test_report_json_line() -> Result<()> {
    let dir = TempDir::new()?;
    let page = write_page(dir.path(), "page1.json", TIMELINE)?;

    let output = sky_feed(
        dir.path(),
        &[page.to_str().unwrap(), "--format", "jsonl", "--report", "0", "--report", "0"],
    )?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let reports: Vec<&str> = stdout.lines().filter(|l| l.contains("\"action\"")).collect();
    assert_eq!(reports.len(), 2);
    let report: serde_json::Value = serde_json::from_str(reports[0])?;
    assert_eq!(report["action"], "report");
    assert_eq!(report["uri"], "at://did:plc:alice/app.bsky.feed.post/3kplain");

    Ok(())
}

#[test]
fn test_report_out_of_range_exit_code() -> Result<()> {
    let dir = TempDir::new()?;
    let page = write_page(dir.path(), "page1.json", TIMELINE)?;

    let output = sky_feed(dir.path(), &[page.to_str().unwrap(), "--report", "99"])?;

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Row 99 out of range"));

    Ok(())
}

#[test]
fn test_malformed_page_exit_code() -> Result<()> {
    let dir = TempDir::new()?;
    let page = write_page(dir.path(), "bad.json", "{ not json")?;

    let output = sky_feed(dir.path(), &[page.to_str().unwrap()])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to decode feed page"));

    Ok(())
}

#[test]
fn test_missing_page_file() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("missing.json");

    let output = sky_feed(dir.path(), &[missing.to_str().unwrap()])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to read page"));

    Ok(())
}

#[test]
fn test_csv_output_with_config_default_format() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("config.toml"), "[output]\nformat = \"csv\"\n")?;
    let page = write_page(dir.path(), "page1.json", TIMELINE)?;

    let output = sky_feed(dir.path(), &[page.to_str().unwrap()])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("row,author,reposted_by,reply_to,timestamp,embed,navigation_id,report_id,text")
    );
    assert_eq!(lines.count(), 7);
    assert!(stdout.contains("1,\"carol.bsky.social\",\"bob.bsky.social\",\"dave.bsky.social\""));

    Ok(())
}

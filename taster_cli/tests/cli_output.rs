use std::{
    env,
    fs,
    io::Read,
    path::PathBuf,
    process::Command,
};

fn norm_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "")
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("taster_cli_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const TWO_PLAYERS: &str = r#"{"results":[
  {"playerId":"A","createdAt":"2016-04-02T10:00:00.000Z","blockLength":8,
   "waves":"[{\"duration\":600000,\"difficultySetting\":\"30:0.5:0.8\",\"successRate\":0.75}]"},
  {"playerId":"B","createdAt":"2016-04-01T10:00:00.000Z","blockLength":8,
   "waves":"[{\"duration\":600000,\"difficultySetting\":\"20:0.4:0.6\",\"successRate\":1}]"},
  {"playerId":"6633","createdAt":"2016-02-01T10:00:00.000Z","blockLength":7,
   "waves":"[{\"duration\":60000,\"difficultySetting\":\"10:0.2:0.1\",\"successRate\":0.5},{\"duration\":20000000,\"difficultySetting\":\"10:0.2:0.1\",\"successRate\":0.5}]"}
]}"#;

const HEADER: &str =
    "Game,Block length,Wave,Total number of creatures,Percentage targets,Uniformity,Success rate";

#[test]
fn duration_prints_report_in_grouping_order() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");
    let dir = temp_dir("duration");
    let input = dir.join("data.json");
    fs::write(&input, TWO_PLAYERS).unwrap();

    let out = Command::new(exe)
        .args(["duration", input.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&out.stdout));
    assert_eq!(stdout, "id,duration\nA,10.00\nB,10.00\n6633,1.00\n");
}

#[test]
fn performance_prints_corrected_block_length() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");
    let dir = temp_dir("performance");
    let input = dir.join("data.json");
    fs::write(&input, TWO_PLAYERS).unwrap();

    let out = Command::new(exe)
        .args(["performance", input.to_str().unwrap(), "6633"])
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&out.stdout));
    assert_eq!(
        stdout,
        format!("{HEADER}\n1,12,1,10,0.2,0.1,0.5\n1,12,2,10,0.2,0.1,0.5\n")
    );
}

#[test]
fn performance_unknown_player_is_an_error() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");
    let dir = temp_dir("performance_unknown");
    let input = dir.join("data.json");
    fs::write(&input, TWO_PLAYERS).unwrap();

    let out = Command::new(exe)
        .args(["performance", input.to_str().unwrap(), "nobody"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = norm_newlines(&String::from_utf8_lossy(&out.stderr));
    assert!(stderr.contains("unknown player id: nobody"));
}

#[test]
fn export_writes_zip_with_all_reports() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");
    let dir = temp_dir("export_zip");
    let input = dir.join("data.json");
    let output_path = dir.join("reports.zip");
    fs::write(&input, TWO_PLAYERS).unwrap();

    let out = Command::new(exe)
        .args([
            "export",
            input.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(out.status.success());
    let mut zip = zip::ZipArchive::new(fs::File::open(&output_path).unwrap()).unwrap();

    let mut duration = String::new();
    zip.by_name("duration.csv")
        .unwrap()
        .read_to_string(&mut duration)
        .unwrap();
    assert_eq!(duration, "id,duration\nA,10.00\nB,10.00\n6633,1.00\n");

    for id in ["A", "B", "6633"] {
        assert!(zip
            .by_name(&format!("performance-data/performance-{id}.csv"))
            .is_ok());
    }

    let mut a = String::new();
    zip.by_name("performance-data/performance-A.csv")
        .unwrap()
        .read_to_string(&mut a)
        .unwrap();
    assert_eq!(a, format!("{HEADER}\n1,8,1,30,0.5,0.8,0.75\n"));
}

#[test]
fn export_dir_writes_report_tree() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");
    let dir = temp_dir("export_dir");
    let input = dir.join("data.json");
    let out_dir = dir.join("out");
    fs::write(&input, TWO_PLAYERS).unwrap();

    let out = Command::new(exe)
        .args([
            "export",
            input.to_str().unwrap(),
            "--dir",
            out_dir.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(out.status.success());
    let duration = fs::read_to_string(out_dir.join("duration.csv")).unwrap();
    assert_eq!(duration, "id,duration\nA,10.00\nB,10.00\n6633,1.00\n");
    let b = fs::read_to_string(out_dir.join("performance-data").join("performance-B.csv")).unwrap();
    assert_eq!(b, format!("{HEADER}\n1,8,1,20,0.4,0.6,1\n"));
}

#[test]
fn export_missing_results_is_e1002() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");
    let dir = temp_dir("export_missing_results");
    let input = dir.join("data.json");
    let output_path = dir.join("reports.zip");
    fs::write(&input, r#"{"items":[]}"#).unwrap();

    let out = Command::new(exe)
        .args([
            "export",
            input.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = norm_newlines(&String::from_utf8_lossy(&out.stderr));
    assert!(stderr.contains("Error: failed to parse dataset json: "));
    assert!(stderr.contains("Caused by:"));
    assert!(stderr.contains("E1002: missing results"));
    assert!(!output_path.exists());
}

#[test]
fn export_malformed_difficulty_setting_writes_nothing() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");
    let dir = temp_dir("export_malformed");
    let input = dir.join("data.json");
    let output_path = dir.join("reports.zip");
    fs::write(
        &input,
        r#"{"results":[{"playerId":"A","createdAt":"2016-04-02T10:00:00Z","blockLength":8,
            "waves":"[{\"duration\":1,\"difficultySetting\":\"30:0.5\",\"successRate\":1}]"}]}"#,
    )
    .unwrap();

    let out = Command::new(exe)
        .args([
            "export",
            input.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = norm_newlines(&String::from_utf8_lossy(&out.stderr));
    assert!(stderr.contains("Error: export failed: "));
    assert!(stderr.contains("E2002: difficultySetting must have exactly three ':' fields"));
    assert!(!output_path.exists());
}

#[test]
fn missing_input_file_is_reported() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");
    let missing = env::temp_dir().join(format!(
        "taster_cli_missing_input_{}.json",
        std::process::id()
    ));
    let _ = fs::remove_file(&missing);

    let out = Command::new(exe)
        .args(["duration", missing.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = norm_newlines(&String::from_utf8_lossy(&out.stderr));
    assert!(stderr.contains("Error: failed to read dataset: "));
}

#[test]
fn help_mentions_subcommands() {
    let exe = env!("CARGO_BIN_EXE_taster_cli");

    let output = Command::new(exe).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("export"));
    assert!(stdout.contains("duration"));
    assert!(stdout.contains("performance"));
}

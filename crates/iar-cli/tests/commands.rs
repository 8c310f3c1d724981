//! Command-level tests against files on disk.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::json;
use tempfile::TempDir;

use iar_cli::cli::{Cli, Command, MigrateArgs, UploadArgs};
use iar_cli::commands::{run_migrate, run_upload, upload_with};
use iar_model::{AssetPayload, Document, UploadMethod};
use iar_output::read_documents;
use iar_upload::{Endpoint, RegistryClient, RegistryResponse};

const ENDPOINT: &str = "https://iar.example/api/assets/";

/// Index column plus the 50 positional columns of the legacy export.
fn csv_line(department: &str, name: &str, availability: &str) -> String {
    let mut cells = vec![String::new(); 51];
    cells[0] = "1".to_string();
    cells[2] = department.to_string();
    cells[9] = name.to_string();
    cells[13] = availability.to_string();
    cells[16] = "Y".to_string();
    cells.join(",")
}

fn write_export(dir: &Path, lines: &[String]) -> PathBuf {
    let mut text = String::new();
    for banner in 0..6 {
        text.push_str(&format!("Banner row {banner}\n"));
    }
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    let path = dir.join("register.csv");
    fs::write(&path, text).unwrap();
    path
}

fn write_directory(dir: &Path) -> PathBuf {
    let path = dir.join("institutions.yaml");
    fs::write(
        &path,
        "institutions:\n\
         - instid: FOO\n  name: Faculty of Foo\n\
         - instid: CHEM\n  name: Department of Chemistry\n",
    )
    .unwrap();
    path
}

fn migrate_args(argv: &[&str]) -> MigrateArgs {
    let mut full = vec!["iar", "migrate"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).unwrap().command {
        Command::Migrate(args) => args,
        Command::Upload(_) => panic!("expected migrate"),
    }
}

fn upload_args(argv: &[&str]) -> UploadArgs {
    let mut full = vec!["iar", "upload"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).unwrap().command {
        Command::Upload(args) => args,
        Command::Migrate(_) => panic!("expected upload"),
    }
}

fn read_back(path: &Path) -> Vec<Document> {
    read_documents(fs::File::open(path).unwrap())
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn migrate_fixture(dir: &TempDir) -> PathBuf {
    let csv = write_export(
        dir.path(),
        &[
            csv_line("Faculty of Foo", "Printer Inventory", "High"),
            csv_line("Chemistry", "Spectra", ""),
            csv_line("Unknown Unit", "Ledger", ""),
        ],
    );
    let directory = write_directory(dir.path());
    let output = dir.path().join("assets.yaml");
    let args = migrate_args(&[
        csv.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--directory",
        directory.to_str().unwrap(),
    ]);
    let result = run_migrate(&args).unwrap();
    assert_eq!(result.documents, 4);
    output
}

#[test]
fn migrate_defaults_match_legacy_export() {
    let args = migrate_args(&[]);
    assert_eq!(args.csv, PathBuf::from("-"));
    assert_eq!(args.output, PathBuf::from("-"));
    assert_eq!(args.skip_rows, 6);
    assert_eq!(args.skip_cols, 1);
    assert_eq!(args.lookup_url, iar_lookup::DEFAULT_LOOKUP_URL);
}

#[test]
fn migrate_writes_assets_then_report() {
    let dir = TempDir::new().unwrap();
    let output = migrate_fixture(&dir);
    let documents = read_back(&output);

    let assets: Vec<_> = documents
        .iter()
        .filter_map(|doc| doc.clone().into_asset())
        .collect();
    assert_eq!(assets.len(), 3);
    assert_eq!(assets[0].asset.name, "Printer Inventory");
    assert_eq!(assets[0].asset.department.as_deref(), Some("FOO"));
    assert!(assets[0].asset.personal_data);
    assert_eq!(assets[1].asset.department.as_deref(), Some("CHEM"));
    assert_eq!(assets[2].asset.department, None);
    assert!(assets[2].has_errors());

    let Some(Document::Report(report)) = documents.last() else {
        panic!("expected trailing report");
    };
    assert_eq!(report.original_dept_mapping.len(), 3);
    assert_eq!(report.unresolved().count(), 1);
}

#[test]
fn migrate_applies_fixups_files() {
    let dir = TempDir::new().unwrap();
    let csv = write_export(dir.path(), &[csv_line("Unknown Unit", "Ledger", "")]);
    let directory = write_directory(dir.path());
    let fixups = dir.path().join("fixups.yaml");
    fs::write(
        &fixups,
        "institutions:\n- original: Unknown Unit\n  instid: UNK\n",
    )
    .unwrap();
    let output = dir.path().join("assets.yaml");
    let args = migrate_args(&[
        csv.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--directory",
        directory.to_str().unwrap(),
        "--fixups",
        fixups.to_str().unwrap(),
    ]);
    let result = run_migrate(&args).unwrap();
    assert!(!result.has_errors());

    let asset = read_back(&output)
        .into_iter()
        .find_map(Document::into_asset)
        .unwrap();
    assert_eq!(asset.asset.department.as_deref(), Some("UNK"));
}

#[test]
fn migrate_rejects_short_rows() {
    let dir = TempDir::new().unwrap();
    let csv = write_export(dir.path(), &["1,Faculty of Foo,only three".to_string()]);
    let directory = write_directory(dir.path());
    let args = migrate_args(&[
        csv.to_str().unwrap(),
        "-o",
        dir.path().join("out.yaml").to_str().unwrap(),
        "--directory",
        directory.to_str().unwrap(),
    ]);
    let error = run_migrate(&args).unwrap_err();
    assert!(format!("{error:#}").contains("malformed row 0"));
}

/// Registry that accepts everything and remembers what it was asked.
#[derive(Default)]
struct RecordingRegistry {
    calls: RefCell<Vec<(UploadMethod, String)>>,
}

impl RegistryClient for RecordingRegistry {
    fn create(&self, url: &str, payload: &AssetPayload<'_>) -> iar_upload::Result<RegistryResponse> {
        self.calls
            .borrow_mut()
            .push((UploadMethod::Post, url.to_string()));
        Ok(RegistryResponse::new(
            201,
            json!({"id": format!("reg-{}", payload.name.len()), "name": payload.name}),
        ))
    }

    fn exists(&self, url: &str) -> iar_upload::Result<RegistryResponse> {
        self.calls
            .borrow_mut()
            .push((UploadMethod::Get, url.to_string()));
        Ok(RegistryResponse::new(200, json!({})))
    }

    fn update(&self, url: &str, _payload: &AssetPayload<'_>) -> iar_upload::Result<RegistryResponse> {
        self.calls
            .borrow_mut()
            .push((UploadMethod::Put, url.to_string()));
        Ok(RegistryResponse::new(200, json!({})))
    }
}

impl RecordingRegistry {
    fn count(&self, method: UploadMethod) -> usize {
        self.calls.borrow().iter().filter(|(m, _)| *m == method).count()
    }
}

#[test]
fn upload_then_rerun_updates_instead_of_creating() {
    let dir = TempDir::new().unwrap();
    let assets = migrate_fixture(&dir);
    let first_report = dir.path().join("upload-1.yaml");
    let second_report = dir.path().join("upload-2.yaml");

    let registry = RecordingRegistry::default();
    let args = upload_args(&[
        ENDPOINT,
        assets.to_str().unwrap(),
        "-o",
        first_report.to_str().unwrap(),
    ]);
    let first = upload_with(&args, Endpoint::parse(ENDPOINT).unwrap(), &registry).unwrap();
    assert_eq!(first.stats.created, 3);
    assert_eq!(registry.count(UploadMethod::Post), 3);

    let args = upload_args(&[
        ENDPOINT,
        assets.to_str().unwrap(),
        "-o",
        second_report.to_str().unwrap(),
        "--previous-report",
        first_report.to_str().unwrap(),
    ]);
    let second = upload_with(&args, Endpoint::parse(ENDPOINT).unwrap(), &registry).unwrap();
    assert_eq!(second.previous_mappings, 3);
    assert_eq!(second.stats.updated, 3);
    assert_eq!(registry.count(UploadMethod::Post), 3);

    let reports: Vec<_> = read_back(&second_report)
        .into_iter()
        .filter_map(Document::into_upload)
        .collect();
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|report| report.method == UploadMethod::Put));
}

#[test]
fn upload_requires_trailing_separator() {
    let dir = TempDir::new().unwrap();
    let assets = migrate_fixture(&dir);
    let args = upload_args(&[
        "https://iar.example/api/assets",
        assets.to_str().unwrap(),
        "-o",
        dir.path().join("upload.yaml").to_str().unwrap(),
    ]);
    let error = run_upload(&args).unwrap_err();
    assert!(error.to_string().contains("must end with '/'"));
    assert!(!dir.path().join("upload.yaml").exists());
}

#[test]
fn upload_reports_missing_inputs() {
    let dir = TempDir::new().unwrap();
    let registry = RecordingRegistry::default();
    let args = upload_args(&[
        ENDPOINT,
        dir.path().join("missing.yaml").to_str().unwrap(),
        "-o",
        dir.path().join("upload.yaml").to_str().unwrap(),
    ]);
    assert!(upload_with(&args, Endpoint::parse(ENDPOINT).unwrap(), &registry).is_err());
    assert!(registry.calls.borrow().is_empty());
}

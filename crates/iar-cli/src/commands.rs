use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use iar_core::{MigrateOptions, MigrationContext, migrate_rows};
use iar_ingest::{IngestOptions, RowSource};
use iar_lookup::{Fixups, InstitutionDirectory, InstitutionResolver, LookupClient, StaticDirectory};
use iar_model::{AssetDocument, Document};
use iar_output::{DocumentWriter, open_input, open_output, read_documents};
use iar_upload::{
    Endpoint, HttpRegistryClient, IdMap, Reconciler, RegistryClient, UploadOptions,
    upload_documents,
};

use crate::cli::{MigrateArgs, UploadArgs};
use crate::types::{MigrateResult, UploadResult};

pub fn run_migrate(args: &MigrateArgs) -> Result<MigrateResult> {
    let span = info_span!("migrate", input = %args.csv.display());
    let _guard = span.enter();

    let mut fixups = Fixups::default();
    for path in &args.fixups {
        let loaded =
            Fixups::load(path).with_context(|| format!("load fixups {}", path.display()))?;
        fixups.merge(loaded);
    }

    let ingest = IngestOptions {
        skip_rows: args.skip_rows,
        skip_cols: args.skip_cols,
        ..IngestOptions::default()
    };
    let rows = RowSource::open(&args.csv, &ingest)?;

    match &args.directory {
        Some(path) => {
            let directory = StaticDirectory::load(path)
                .with_context(|| format!("load institution list {}", path.display()))?;
            info!(institutions = directory.len(), "using offline institution list");
            migrate_with(args, rows, directory, fixups)
        }
        None => {
            let client = LookupClient::new(&args.lookup_url)
                .with_context(|| format!("create directory client for {}", args.lookup_url))?;
            migrate_with(args, rows, client, fixups)
        }
    }
}

fn migrate_with<R, D>(
    args: &MigrateArgs,
    rows: RowSource<R>,
    directory: D,
    fixups: Fixups,
) -> Result<MigrateResult>
where
    R: Read,
    D: InstitutionDirectory,
{
    let options = MigrateOptions {
        skip_cols: args.skip_cols,
        log_data: args.log_data,
        ..MigrateOptions::default()
    };
    let context = MigrationContext::new(InstitutionResolver::new(directory, fixups), options);
    let output = open_output(Some(args.output.as_path()))?;
    let mut writer = DocumentWriter::new(output);

    let mut run = migrate_rows(rows, context);
    for document in run.by_ref() {
        let document = document.context("migration aborted")?;
        writer.write(&document).context("write document")?;
    }

    Ok(MigrateResult {
        input: args.csv.clone(),
        output: args.output.clone(),
        stats: run.stats(),
        documents: writer.written(),
    })
}

pub fn run_upload(args: &UploadArgs) -> Result<UploadResult> {
    let endpoint = Endpoint::parse(&args.endpoint)?;
    let options = UploadOptions {
        token: args.token.clone(),
        ..UploadOptions::default()
    };
    let client = HttpRegistryClient::new(&options).context("create registry client")?;
    upload_with(args, endpoint, client)
}

/// Upload through any registry client.
///
/// # Errors
///
/// Fails on unreadable inputs, an unwritable output, or a malformed
/// endpoint. Rejected assets are reported, not returned as errors.
pub fn upload_with<C: RegistryClient>(
    args: &UploadArgs,
    endpoint: Endpoint,
    client: C,
) -> Result<UploadResult> {
    let span = info_span!("upload", endpoint = %endpoint);
    let _guard = span.enter();

    let mut ids = IdMap::new();
    for path in &args.previous_report {
        load_previous_report(path, &mut ids)?;
    }
    let previous_mappings = ids.len();
    info!(mappings = previous_mappings, "loaded previous upload mappings");

    let output = open_output(Some(args.output.as_path()))?;
    let mut writer = DocumentWriter::new(output);
    let reconciler = Reconciler::new(client, endpoint, ids);

    let mut run = upload_documents(asset_documents(&args.documents), reconciler);
    for report in run.by_ref() {
        writer.write(&Document::Upload(report?)).context("write upload report")?;
    }

    Ok(UploadResult {
        endpoint: args.endpoint.clone(),
        output: args.output.clone(),
        stats: run.stats(),
        previous_mappings,
    })
}

fn load_previous_report(path: &Path, ids: &mut IdMap) -> Result<()> {
    let input = open_input(Some(path))?;
    for document in read_documents(input) {
        let document =
            document.with_context(|| format!("read previous report {}", path.display()))?;
        if let Document::Upload(report) = document {
            ids.record(&report);
        }
    }
    Ok(())
}

/// Asset documents from every input, in order, opened lazily.
fn asset_documents(paths: &[PathBuf]) -> impl Iterator<Item = Result<AssetDocument>> + '_ {
    paths
        .iter()
        .flat_map(|path| -> Box<dyn Iterator<Item = Result<Document>>> {
            info!(path = %path.display(), "loading documents");
            let input = match open_input(Some(path.as_path())) {
                Ok(input) => input,
                Err(error) => return Box::new(std::iter::once(Err(error.into()))),
            };
            let path = path.clone();
            Box::new(read_documents(input).map(move |document| {
                document.with_context(|| format!("read {}", path.display()))
            }))
        })
        .filter_map(|document| match document {
            Ok(document) => document.into_asset().map(Ok),
            Err(error) => Some(Err(error)),
        })
}

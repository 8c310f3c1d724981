//! Create-or-update decision for a single asset.
//!
//! Without a known destination the asset is created. With one, the
//! destination is checked first: if it still exists the asset is updated in
//! place, if the registry answers 404 the mapping is stale and the asset is
//! created again. Every path ends in an [`UploadReport`]; nothing here
//! returns an error.

use iar_model::{Asset, AssetPayload, UploadMethod, UploadReport};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::client::{RegistryClient, RegistryResponse};
use crate::endpoint::Endpoint;
use crate::error::UploadError;
use crate::idmap::IdMap;

/// How an asset upload ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadOutcome {
    Created,
    Updated,
    /// The previous destination was gone and a new resource was created.
    Recreated,
    Failed,
}

/// Upload report for one asset together with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub outcome: UploadOutcome,
    pub report: UploadReport,
}

impl Reconciliation {
    fn new(outcome: UploadOutcome, report: UploadReport) -> Self {
        Self { outcome, report }
    }

    fn failed(
        source_id: &str,
        method: UploadMethod,
        url: &str,
        status_code: Option<u16>,
        error: Value,
    ) -> Self {
        Self::new(
            UploadOutcome::Failed,
            UploadReport::failed(source_id, method, url, status_code, error),
        )
    }

    fn unreachable(source_id: &str, method: UploadMethod, url: &str, err: &UploadError) -> Self {
        error!(source_id, %method, url, error = %err, "registry request failed");
        Self::failed(source_id, method, url, None, Value::String(err.to_string()))
    }

    fn rejected(
        source_id: &str,
        method: UploadMethod,
        url: &str,
        response: RegistryResponse,
    ) -> Self {
        error!(
            source_id,
            %method,
            url,
            status = response.status,
            body = %response.body,
            "registry rejected asset"
        );
        Self::failed(source_id, method, url, Some(response.status), response.body)
    }
}

/// Applies assets to a registry endpoint, one at a time.
pub struct Reconciler<C> {
    client: C,
    endpoint: Endpoint,
    ids: IdMap,
}

impl<C: RegistryClient> Reconciler<C> {
    pub fn new(client: C, endpoint: Endpoint, ids: IdMap) -> Self {
        Self {
            client,
            endpoint,
            ids,
        }
    }

    /// Upload one asset and report the result.
    ///
    /// Successful uploads are added to the id map, so an asset repeated
    /// later in the same run is updated rather than created twice.
    pub fn reconcile(&mut self, asset: &Asset) -> Reconciliation {
        let payload = asset.payload();
        let source_id = asset.id.as_str();

        let result = match self.ids.get(source_id).map(str::to_string) {
            None => self.create(source_id, &payload, UploadOutcome::Created),
            Some(dest_id) => self.verify_and_update(source_id, &dest_id, &payload),
        };
        self.ids.record(&result.report);
        result
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn ids(&self) -> &IdMap {
        &self.ids
    }

    fn verify_and_update(
        &self,
        source_id: &str,
        dest_id: &str,
        payload: &AssetPayload<'_>,
    ) -> Reconciliation {
        let url = self.endpoint.item_url(dest_id);
        match self.client.exists(&url) {
            Err(err) => Reconciliation::unreachable(source_id, UploadMethod::Get, &url, &err),
            Ok(response) if response.is_success() => self.update(source_id, dest_id, &url, payload),
            Ok(response) if response.is_not_found() => {
                warn!(source_id, dest_id, "previous upload no longer exists, creating");
                self.create(source_id, payload, UploadOutcome::Recreated)
            }
            Ok(response) => Reconciliation::rejected(source_id, UploadMethod::Get, &url, response),
        }
    }

    fn create(
        &self,
        source_id: &str,
        payload: &AssetPayload<'_>,
        outcome: UploadOutcome,
    ) -> Reconciliation {
        let url = self.endpoint.as_str();
        let response = match self.client.create(url, payload) {
            Ok(response) => response,
            Err(err) => return Reconciliation::unreachable(source_id, UploadMethod::Post, url, &err),
        };
        if !response.is_success() {
            return Reconciliation::rejected(source_id, UploadMethod::Post, url, response);
        }
        let Some(dest_id) = response.resource_id() else {
            error!(source_id, status = response.status, "created asset has no id");
            return Reconciliation::failed(
                source_id,
                UploadMethod::Post,
                url,
                Some(response.status),
                json!({ "message": "response has no id", "body": response.body }),
            );
        };
        info!(source_id, dest_id = %dest_id, "created asset");
        Reconciliation::new(
            outcome,
            UploadReport::created(source_id, url, response.status, dest_id),
        )
    }

    fn update(
        &self,
        source_id: &str,
        dest_id: &str,
        url: &str,
        payload: &AssetPayload<'_>,
    ) -> Reconciliation {
        let response = match self.client.update(url, payload) {
            Ok(response) => response,
            Err(err) => return Reconciliation::unreachable(source_id, UploadMethod::Put, url, &err),
        };
        if !response.is_success() {
            return Reconciliation::rejected(source_id, UploadMethod::Put, url, response);
        }
        let dest_id = response.resource_id().unwrap_or_else(|| dest_id.to_string());
        info!(source_id, dest_id = %dest_id, "updated asset");
        Reconciliation::new(
            UploadOutcome::Updated,
            UploadReport::succeeded(source_id, UploadMethod::Put, url, response.status, dest_id),
        )
    }
}

//! Creates request definitions inside a collection or one of its folders.

use tracing::info;

use reqhub_core::error::AppError;
use reqhub_core::result::AppResult;
use reqhub_core::types::{CollectionId, FolderId, RequestId};
use reqhub_database::Store;
use reqhub_entity::protocol::{Method, Protocol};
use reqhub_entity::request::{
    CreateRequest, DEFAULT_REQUEST_NAME, REQUEST_NAME_MAX_CHARS, REQUEST_PATH_MAX_CHARS, Request,
};

use crate::validation::{bounded, name_or_default};

/// Manages request definitions.
#[derive(Debug, Clone)]
pub struct RequestService {
    /// Store handle.
    store: Store,
}

/// Request to create a request definition.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateRequestParams {
    /// Owning collection.
    pub collection_id: CollectionId,
    /// Containing folder; None places it at the collection root.
    pub folder_id: Option<FolderId>,
    /// Name; blank means [`DEFAULT_REQUEST_NAME`].
    pub name: Option<String>,
    /// Protocol.
    pub protocol: Protocol,
    /// Method.
    pub method: Method,
    /// Target path.
    pub path: String,
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a request definition.
    pub async fn create_request(&self, params: CreateRequestParams) -> AppResult<Request> {
        self.store
            .collections
            .find_by_collection_id(params.collection_id)
            .await?
            .ok_or_else(|| AppError::not_found("Collection not found"))?;

        if let Some(folder_id) = params.folder_id {
            let folder = self.store.folders.find_by_folder_id(folder_id).await?;
            if folder.is_none_or(|f| f.collection_id != params.collection_id) {
                return Err(AppError::validation(
                    "Folder does not exist in this collection",
                ));
            }
        }

        let name = name_or_default(
            "Request",
            params.name.as_deref(),
            DEFAULT_REQUEST_NAME,
            REQUEST_NAME_MAX_CHARS,
        )?;
        bounded("Request", "path", &params.path, REQUEST_PATH_MAX_CHARS)?;

        let request = self
            .store
            .requests
            .create(&CreateRequest {
                request_id: RequestId::new(),
                collection_id: params.collection_id,
                folder_id: params.folder_id,
                name,
                protocol: params.protocol,
                method: params.method,
                path: params.path,
            })
            .await?;

        info!(
            request_id = %request.request_id,
            collection_id = %request.collection_id,
            folder_id = ?request.folder_id,
            "Request created"
        );
        Ok(request)
    }
}

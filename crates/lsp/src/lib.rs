pub mod capabilities;
pub mod command;
pub mod lens;
pub mod util;

use crate::util::{apply_changes, is_xml_uri, Document, OpenDocuments};
use dashmap::DashMap;
use mapperlens_core::{LensConfig, MapperCorrelator, WorkspaceFolders};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct LspServer {
    pub(crate) client: Client,
    pub documents: Arc<DashMap<Url, Arc<Document>>>,
    pub folders: Arc<WorkspaceFolders>,
    pub correlator: Arc<RwLock<Option<MapperCorrelator>>>,
    lens_refresh: AtomicBool,
}

impl LspServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DashMap::new()),
            folders: Arc::new(WorkspaceFolders::default()),
            correlator: Arc::new(RwLock::new(None)),
            lens_refresh: AtomicBool::new(false),
        }
    }

    /// `initializationOptions` win; otherwise `.mapperlens.json` in the first folder.
    fn load_config(options: Option<serde_json::Value>, root: Option<&PathBuf>) -> LensConfig {
        let loaded = match (options, root) {
            (Some(options), _) => LensConfig::from_json(options),
            (None, Some(root)) => LensConfig::load(root),
            (None, None) => Ok(LensConfig::default()),
        };
        loaded.unwrap_or_else(|e| {
            tracing::warn!("Invalid configuration, using defaults: {}", e);
            LensConfig::default()
        })
    }

    /// XML edits change which lenses navigate and which generate.
    async fn refresh_lenses_for(&self, uri: &Url) {
        if is_xml_uri(uri) && self.lens_refresh.load(Ordering::Relaxed) {
            if let Err(e) = self.client.code_lens_refresh().await {
                tracing::debug!("codeLens/refresh failed: {}", e);
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let mut folders: Vec<PathBuf> = params
            .workspace_folders
            .iter()
            .flatten()
            .filter_map(|folder| folder.uri.to_file_path().ok())
            .collect();
        if folders.is_empty() {
            folders.extend(params.root_uri.and_then(|uri| uri.to_file_path().ok()));
        }

        let config = Self::load_config(params.initialization_options, folders.first());
        for folder in folders {
            self.folders.add(folder);
        }

        let refresh = params
            .capabilities
            .workspace
            .and_then(|ws| ws.code_lens)
            .and_then(|lens| lens.refresh_support)
            .unwrap_or(false);
        self.lens_refresh.store(refresh, Ordering::Relaxed);

        let source = Arc::new(OpenDocuments::new(self.documents.clone()));
        let correlator = mapperlens_runtime::build_correlator(config, self.folders.clone(), source)
            .map_err(|e| {
                tracing::error!("Failed to build correlator: {}", e);
                tower_lsp::jsonrpc::Error::internal_error()
            })?;
        *self.correlator.write().await = Some(correlator);

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "mapperlens".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(
                MessageType::INFO,
                format!(
                    "mapperlens ready for {} workspace folder(s)",
                    self.folders.folders().len()
                ),
            )
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.documents.clear();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let doc = Document::new(&uri, params.text_document.text, params.text_document.version);
        self.documents.insert(uri, Arc::new(doc));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let updated = match self.documents.get(&uri) {
            Some(doc) => apply_changes(&doc.source, params.content_changes),
            None => return,
        };
        self.documents
            .insert(uri.clone(), Arc::new(Document::new(&uri, updated, version)));
        self.refresh_lenses_for(&uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        tracing::debug!("LSP Event: did_close uri={}", params.text_document.uri);
        self.documents.remove(&params.text_document.uri);
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        self.refresh_lenses_for(&params.text_document.uri).await;
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        for removed in params.event.removed {
            if let Ok(path) = removed.uri.to_file_path() {
                self.folders.remove(&path);
            }
        }
        for added in params.event.added {
            if let Ok(path) = added.uri.to_file_path() {
                self.folders.add(path);
            }
        }
    }

    async fn code_lens(&self, params: CodeLensParams) -> Result<Option<Vec<CodeLens>>> {
        let uri = params.text_document.uri.clone();
        tracing::debug!("LSP Request: textDocument/codeLens uri={}", uri);
        let result = lens::code_lens(self, params).await;
        match &result {
            Ok(Some(lenses)) => {
                tracing::debug!("LSP Response: {} code lenses for {}", lenses.len(), uri)
            }
            Ok(None) => tracing::debug!("LSP Response: document not open {}", uri),
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        tracing::debug!("LSP Request: workspace/executeCommand {}", params.command);
        command::execute_command(self, params).await
    }
}

pub async fn run_server() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(LspServer::new);
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}

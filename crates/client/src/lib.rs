pub use api_types::envelope::{Envelope, FieldDef, Rsp};
use reqwest::header::CONTENT_TYPE;

pub use self::config::{DEFAULT_ROWS_PER_PAGE, DEFAULT_START_ROW, ClientConfig, Settings};
pub use error::{ClientError, Result};
pub use filter::{
    FILTER_AND, FILTER_CONTAINS, FILTER_EXACT, FILTER_OR, FilterClause, MatchMode, RecordId,
    filter_fragment,
};
pub use payload::DataPayload;
pub use request::{FORM_URLENCODED, Operation, RequestParts};
pub use response::{FieldSet, NormalizedResult};

pub mod config;
mod error;
mod filter;
mod payload;
mod request;
mod response;

/// Options for [`ServiceClient::view`]. Absent pagination values fall back
/// to the instance defaults.
#[derive(Clone, Debug, Default)]
pub struct ViewOptions {
    pub rows_per_page: Option<u32>,
    pub start_row: Option<u32>,
    pub filter: Vec<FilterClause>,
}

/// Options for [`ServiceClient::app`].
#[derive(Clone, Debug, Default)]
pub struct AppOptions {
    pub rows_per_page: Option<u32>,
    pub start_row: Option<u32>,
    pub filter: Vec<FilterClause>,
}

/// Options for [`ServiceClient::row_count`].
#[derive(Clone, Debug, Default)]
pub struct RowCountOptions {
    pub filter: Vec<FilterClause>,
}

/// Options for [`ServiceClient::custom`].
#[derive(Clone, Debug, Default)]
pub struct CustomOptions {
    pub filter: Vec<FilterClause>,
}

/// Options for [`ServiceClient::attach`]. Both data and filter ride on the
/// URL for uploads.
#[derive(Clone, Debug, Default)]
pub struct AttachOptions {
    pub data: DataPayload,
    pub filter: Vec<FilterClause>,
}

/// Client for the form/query-string web service.
///
/// Every method issues exactly one POST and suspends until the response is
/// decoded. The client holds no mutable state, so any number of calls may
/// be in flight concurrently; there are no retries and no timeouts beyond
/// what the transport provides.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    base_url: String,
    config: ClientConfig,
    http: reqwest::Client,
}

impl ServiceClient {
    /// Builds a client for `base_url` (trailing slashes are trimmed).
    pub fn new(base_url: &str, config: ClientConfig) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Invalid("base_url must not be empty".to_string()));
        }
        config.validate()?;
        Ok(Self {
            base_url: base_url.to_string(),
            config,
            http: reqwest::Client::new(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.base_url,
            ClientConfig {
                rows_per_page: settings.rows_per_page,
                start_row: settings.start_row,
            },
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn config(&self) -> ClientConfig {
        self.config
    }

    fn start_row(&self, explicit: Option<u32>) -> u32 {
        explicit.unwrap_or(self.config.start_row)
    }

    fn rows_per_page(&self, explicit: Option<u32>) -> u32 {
        explicit.unwrap_or(self.config.rows_per_page)
    }

    /// Builds the authentication request.
    #[must_use]
    pub fn login_parts(&self) -> RequestParts {
        request::login(&self.base_url)
    }

    pub async fn login(&self) -> Result<NormalizedResult> {
        self.execute(self.login_parts()).await
    }

    /// Builds the list/query request for `transaction`.
    pub fn view_parts(&self, transaction: &str, opts: &ViewOptions) -> Result<RequestParts> {
        request::view(
            &self.base_url,
            transaction,
            self.start_row(opts.start_row),
            self.rows_per_page(opts.rows_per_page),
            &opts.filter,
        )
    }

    pub async fn view(&self, transaction: &str, opts: ViewOptions) -> Result<NormalizedResult> {
        self.execute(self.view_parts(transaction, &opts)?).await
    }

    pub fn create_parts(&self, transaction: &str, data: &DataPayload) -> Result<RequestParts> {
        request::create(&self.base_url, transaction, data)
    }

    pub async fn create(&self, transaction: &str, data: &DataPayload) -> Result<NormalizedResult> {
        self.execute(self.create_parts(transaction, data)?).await
    }

    pub fn edit_parts(
        &self,
        transaction: &str,
        data: &DataPayload,
        id: &RecordId,
    ) -> Result<RequestParts> {
        request::edit(&self.base_url, transaction, data, id)
    }

    /// Updates the single record identified by `id`.
    pub async fn edit(
        &self,
        transaction: &str,
        data: &DataPayload,
        id: RecordId,
    ) -> Result<NormalizedResult> {
        self.execute(self.edit_parts(transaction, data, &id)?).await
    }

    pub fn edit_all_parts(
        &self,
        transaction: &str,
        data: &DataPayload,
        id: &RecordId,
    ) -> Result<RequestParts> {
        request::edit_all(&self.base_url, transaction, data, id)
    }

    /// Same client-side handling as [`edit`](Self::edit); the server routes
    /// it to the edit-all function.
    pub async fn edit_all(
        &self,
        transaction: &str,
        data: &DataPayload,
        id: RecordId,
    ) -> Result<NormalizedResult> {
        self.execute(self.edit_all_parts(transaction, data, &id)?)
            .await
    }

    pub fn delete_parts(
        &self,
        transaction: &str,
        filter: &[FilterClause],
    ) -> Result<RequestParts> {
        request::delete(&self.base_url, transaction, filter)
    }

    /// Deletes the records matching `filter`.
    ///
    /// An empty filter is passed through and means "delete all" on the
    /// server side; callers must target what they intend to remove.
    pub async fn delete(
        &self,
        transaction: &str,
        filter: &[FilterClause],
    ) -> Result<NormalizedResult> {
        self.execute(self.delete_parts(transaction, filter)?).await
    }

    pub fn app_parts(
        &self,
        func: &str,
        data: &DataPayload,
        opts: &AppOptions,
    ) -> Result<RequestParts> {
        request::app(
            &self.base_url,
            func,
            data,
            self.start_row(opts.start_row),
            self.rows_per_page(opts.rows_per_page),
            &opts.filter,
        )
    }

    /// Invokes the named server-side function.
    pub async fn app(
        &self,
        func: &str,
        data: &DataPayload,
        opts: AppOptions,
    ) -> Result<NormalizedResult> {
        self.execute(self.app_parts(func, data, &opts)?).await
    }

    pub fn row_count_parts(
        &self,
        transaction: &str,
        opts: &RowCountOptions,
    ) -> Result<RequestParts> {
        request::row_count(&self.base_url, transaction, &opts.filter)
    }

    pub async fn row_count(
        &self,
        transaction: &str,
        opts: RowCountOptions,
    ) -> Result<NormalizedResult> {
        self.execute(self.row_count_parts(transaction, &opts)?).await
    }

    pub fn custom_parts(
        &self,
        path: &str,
        data: &DataPayload,
        opts: &CustomOptions,
    ) -> Result<RequestParts> {
        request::custom(&self.base_url, path, data, &opts.filter)
    }

    /// Posts to an arbitrary sub-path under the app namespace; the response
    /// still goes through the full envelope validation.
    pub async fn custom(
        &self,
        path: &str,
        data: &DataPayload,
        opts: CustomOptions,
    ) -> Result<NormalizedResult> {
        self.execute(self.custom_parts(path, data, &opts)?).await
    }

    pub fn attach_parts(&self, func: &str, opts: &AttachOptions) -> Result<RequestParts> {
        request::attach(&self.base_url, func, &opts.data, &opts.filter)
    }

    /// Uploads `form` to the named server-side function.
    ///
    /// Unlike every other operation this resolves with the decoded JSON as
    /// is and never inspects the envelope status, so upload-specific error
    /// shapes are the caller's to interpret. That asymmetry is inherited
    /// from the existing backend contract; whether it is intentional is an
    /// open product question, so it is kept rather than fixed here.
    pub async fn attach(
        &self,
        func: &str,
        form: reqwest::multipart::Form,
        opts: AttachOptions,
    ) -> Result<serde_json::Value> {
        let parts = self.attach_parts(func, &opts)?;
        tracing::debug!("{:?} POST {}", parts.operation, parts.url);
        let response = self.http.post(&parts.url).multipart(form).send().await?;
        Ok(response.json::<serde_json::Value>().await?)
    }

    async fn execute(&self, parts: RequestParts) -> Result<NormalizedResult> {
        tracing::debug!("{:?} POST {}", parts.operation, parts.url);
        let mut req = self.http.request(parts.method.clone(), &parts.url);
        if let Some(content_type) = parts.content_type {
            req = req.header(CONTENT_TYPE, content_type);
        }
        let response = req.body(parts.body).send().await?;
        let envelope = response.json::<Envelope>().await?;

        match NormalizedResult::from_envelope(envelope) {
            Ok(result) => Ok(result),
            Err(err) => {
                tracing::debug!("request failed: {err}");
                Err(err)
            }
        }
    }
}

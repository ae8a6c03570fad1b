/// 경매 서비스 REST 클라이언트
/// 1. 인증 (로그인, 회원가입, 로그아웃, 토큰 갱신)
/// 2. 상품 / 입찰 조회 및 변경
// region:    --- Imports
use crate::auction::model::{
    AuthResponse, Bid, ImageUpload, NewProduct, PlaceBidRequest, Product, SellRequest,
};
use crate::auction::normalize;
use crate::config::Config;
use crate::error::ClientError;
use crate::session::Session;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

// endregion: --- Imports

// region:    --- Modules
pub mod api;
pub mod routes;

pub use api::AuctionApi;

// endregion: --- Modules

// region:    --- Auction Client
#[derive(Clone)]
pub struct AuctionClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    #[serde(default)]
    access: Option<String>,
}

impl AuctionClient {
    /// 클라이언트 생성
    pub fn new(config: &Config, session: Session) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "ngrok-skip-browser-warning",
            HeaderValue::from_static("any-value"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("HTTP 클라이언트 생성 실패: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 인증이 필요한 요청
    fn authed(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.session.require_auth()?;
        Ok(request.bearer_auth(token))
    }

    /// 토큰이 있으면 붙이는 요청
    fn maybe_authed(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// 요청 전송 및 상태 코드 검사
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_status(status, &body);
        debug!("{:<12} --> 요청 실패: {}", "Client", err);
        Err(err)
    }

    async fn value_list(response: Response) -> Result<Vec<Value>, ClientError> {
        match response.json::<Value>().await? {
            Value::Array(values) => Ok(values),
            other => Err(ClientError::Decode(format!(
                "목록 응답 형식이 올바르지 않습니다: {other}"
            ))),
        }
    }

    // region:    --- Auth

    /// 로그인
    /// 실패하면 남아있는 세션을 지우고 에러를 그대로 돌려준다.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        info!("{:<12} --> 로그인 요청: {}", "Client", username);
        let result: Result<AuthResponse, ClientError> = async {
            let request = self
                .http
                .post(self.url(routes::LOGIN))
                .json(&json!({ "username": username, "password": password }));
            let auth: AuthResponse = self.send(request).await?.json().await?;
            self.session.store_session(&auth)?;
            Ok(auth)
        }
        .await;

        match &result {
            Ok(auth) => info!(
                "{:<12} --> 로그인 성공: {}",
                "Client",
                auth.message.as_deref().unwrap_or("")
            ),
            Err(e) => {
                error!("{:<12} --> 로그인 실패: {}", "Client", e);
                self.session.clear_session();
            }
        }
        result
    }

    /// 회원가입 후 자동 로그인
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        info!("{:<12} --> 회원가입 요청: {}", "Client", username);
        let request = self.http.post(self.url(routes::REGISTER)).json(&json!({
            "username": username,
            "email": email,
            "password": password,
        }));
        if let Err(e) = self.send(request).await {
            error!("{:<12} --> 회원가입 실패: {}", "Client", e);
            return Err(e);
        }
        self.login(username, password).await
    }

    /// 로그아웃
    /// 서버 요청이 실패해도 로컬 세션은 지운다.
    pub async fn logout(&self) {
        if let Some(token) = self.session.access_token() {
            let request = self
                .http
                .post(self.url(routes::LOGOUT))
                .bearer_auth(token)
                .json(&json!({}));
            if let Err(e) = self.send(request).await {
                warn!("{:<12} --> 서버 로그아웃 실패: {}", "Client", e);
            }
        }
        self.session.clear_session();
        info!("{:<12} --> 로그아웃 완료", "Client");
    }

    /// access 토큰 갱신
    /// 실패하면 로그아웃 처리 후 에러를 돌려준다.
    pub async fn refresh_token(&self) -> Result<String, ClientError> {
        let result: Result<String, ClientError> = async {
            let refresh = self
                .session
                .refresh_token()
                .ok_or(ClientError::NotAuthenticated)?;
            let request = self
                .http
                .post(self.url(routes::REFRESH))
                .json(&json!({ "refresh": refresh }));
            let body: RefreshResponse = self.send(request).await?.json().await?;
            let access = body
                .access
                .filter(|t| !t.is_empty())
                .ok_or(ClientError::InvalidTokenData)?;
            self.session.set_access_token(&access)?;
            Ok(access)
        }
        .await;

        match &result {
            Ok(_) => info!("{:<12} --> 토큰 갱신 성공", "Client"),
            Err(e) => {
                error!("{:<12} --> 토큰 갱신 실패: {}", "Client", e);
                self.logout().await;
            }
        }
        result
    }

    // endregion: --- Auth
}

// endregion: --- Auction Client

// region:    --- Auction Api
#[async_trait]
impl AuctionApi for AuctionClient {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        info!("{:<12} --> 모든 상품 조회", "Client");
        let request = self.maybe_authed(self.http.get(self.url(routes::PRODUCTS)));
        let values = Self::value_list(self.send(request).await?).await?;
        Ok(normalize::products(values))
    }

    async fn get_product(&self, product_id: i64) -> Result<Product, ClientError> {
        info!("{:<12} --> 상품 조회 id: {}", "Client", product_id);
        let request = self.maybe_authed(self.http.get(self.url(&routes::product(product_id))));
        let value: Value = self.send(request).await?.json().await?;
        Ok(normalize::product(value)?)
    }

    async fn my_listings(&self) -> Result<Vec<Product>, ClientError> {
        info!("{:<12} --> 내 상품 목록 조회", "Client");
        let request = self.authed(self.http.get(self.url(routes::MY_LISTINGS)))?;
        let values = Self::value_list(self.send(request).await?).await?;
        Ok(normalize::products(values))
    }

    async fn list_bids(&self, product_id: i64) -> Result<Vec<Bid>, ClientError> {
        info!("{:<12} --> 입찰 이력 조회 id: {}", "Client", product_id);
        let request =
            self.maybe_authed(self.http.get(self.url(&routes::product_bids(product_id))));
        let values = Self::value_list(self.send(request).await?).await?;
        Ok(normalize::bids(values))
    }

    async fn list_my_bids(&self, product_id: i64) -> Result<Vec<Bid>, ClientError> {
        debug!("{:<12} --> 내 입찰 조회 id: {}", "Client", product_id);
        let request = self.authed(self.http.get(self.url(&routes::my_bids(product_id))))?;
        let values = Self::value_list(self.send(request).await?).await?;
        Ok(normalize::bids(values))
    }

    async fn highest_bid(&self, product_id: i64) -> Result<Option<Bid>, ClientError> {
        info!("{:<12} --> 최고 입찰 조회 id: {}", "Client", product_id);
        let request =
            self.maybe_authed(self.http.get(self.url(&routes::highest_bid(product_id))));
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(ClientError::NetworkOrServer {
                status: Some(404), ..
            }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Null => Ok(None),
            value => Ok(normalize::bid(value)),
        }
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        info!("{:<12} --> 상품 등록 요청: {}", "Client", product.title);
        let request = self.authed(self.http.post(self.url(routes::PRODUCTS)).json(product))?;
        let value: Value = self.send(request).await?.json().await?;
        Ok(normalize::product(value)?)
    }

    async fn upload_product_images(
        &self,
        product_id: i64,
        images: Vec<ImageUpload>,
    ) -> Result<(), ClientError> {
        info!(
            "{:<12} --> 상품 이미지 업로드 id: {}, count: {}",
            "Client",
            product_id,
            images.len()
        );
        let form = images.into_iter().fold(Form::new(), |form, image| {
            form.part(
                "images",
                Part::bytes(image.bytes).file_name(image.file_name),
            )
        });
        let request = self.authed(
            self.http
                .post(self.url(&routes::product_images(product_id)))
                .multipart(form),
        )?;
        self.send(request).await?;
        Ok(())
    }

    async fn place_bid(&self, product_id: i64, amount: f64) -> Result<Bid, ClientError> {
        info!(
            "{:<12} --> 입찰 요청 id: {}, amount: {}",
            "Client", product_id, amount
        );
        let request = self.authed(
            self.http
                .post(self.url(&routes::product_bids(product_id)))
                .json(&PlaceBidRequest { bid_amount: amount }),
        )?;
        let value: Value = self.send(request).await?.json().await?;
        normalize::bid(value)
            .ok_or_else(|| ClientError::Decode("입찰 응답에 식별자가 없습니다.".to_string()))
    }

    async fn delete_bid(&self, bid_id: i64) -> Result<(), ClientError> {
        info!("{:<12} --> 입찰 삭제 요청 id: {}", "Client", bid_id);
        let request = self.authed(self.http.delete(self.url(&routes::bid(bid_id))))?;
        self.send(request).await.map_err(ClientError::for_delete)?;
        Ok(())
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), ClientError> {
        info!("{:<12} --> 상품 삭제 요청 id: {}", "Client", product_id);
        let request = self.authed(self.http.delete(self.url(&routes::product(product_id))))?;
        self.send(request).await.map_err(ClientError::for_delete)?;
        Ok(())
    }

    async fn sell_product(&self, product_id: i64, bid_id: i64) -> Result<(), ClientError> {
        info!(
            "{:<12} --> 낙찰 처리 요청 id: {}, bid: {}",
            "Client", product_id, bid_id
        );
        let request = self.authed(
            self.http
                .post(self.url(&routes::sell(product_id)))
                .json(&SellRequest { bid_id }),
        )?;
        self.send(request).await?;
        Ok(())
    }
}

// endregion: --- Auction Api

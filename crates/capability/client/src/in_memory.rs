//! 内存后端
//!
//! 按路由模拟 REST 接口，用于测试与离线演示。错误响应体与真实后端
//! 一致：裸 JSON 字符串（如 `"Plate already exists"`）。
//!
//! 功能：
//! - 内置 admin 账户（用户名：admin，密码：admin123）
//! - 记录每次收到的请求，便于断言"未发出请求"
//! - 可切换离线、会话失效、上传失败

use crate::transport::{ApiRequest, RawResponse, RequestBody, Transport, TransportError};
use api_contract::{
    AssetPayload, LoginRequest, LoginResponse, RegisterRequest, TransferPayload, WireAsset,
    WireStats, WireTransfer, WireUser,
};
use async_trait::async_trait;
use chrono::Utc;
use domain::{AssetStatus, Department, DepartmentStats, DocumentKind, StatsSnapshot, UserProfile};
use http::header::AUTHORIZATION;
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct BackendState {
    assets: Vec<WireAsset>,
    /// 新记录在前。
    transfers: Vec<WireTransfer>,
    users: HashMap<String, (String, WireUser)>,
    /// token → username
    tokens: HashMap<String, String>,
}

#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
    calls: Mutex<Vec<String>>,
    offline: AtomicBool,
    fail_uploads: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置 admin 账户。
    pub fn with_default_admin() -> Self {
        let backend = Self::new();
        backend.add_user(
            "admin123",
            UserProfile {
                id: Some("user-1".to_string()),
                username: "admin".to_string(),
                role: "admin".to_string(),
                department: Department::Administration.as_str().to_string(),
                company_name: "Prefeitura Municipal".to_string(),
                email: None,
            },
        );
        backend
    }

    pub fn add_user(&self, password: &str, profile: UserProfile) {
        let username = profile.username.clone();
        self.state()
            .users
            .insert(username, (password.to_string(), WireUser::from(&profile)));
    }

    /// 直接签发 token（跳过登录接口）。
    pub fn issue_token(&self, username: &str) -> Option<String> {
        let mut state = self.state();
        if !state.users.contains_key(username) {
            return None;
        }
        let token = uuid::Uuid::new_v4().to_string();
        state.tokens.insert(token.clone(), username.to_string());
        Some(token)
    }

    /// 使所有已签发 token 失效，后续请求返回 401。
    pub fn expire_sessions(&self) {
        self.state().tokens.clear();
    }

    /// 离线时所有请求以连接错误失败。
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// 直接写入资产，返回 id。
    pub fn insert_asset(&self, mut asset: WireAsset) -> String {
        let id = asset
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();
        self.state().assets.push(asset);
        id
    }

    pub fn asset(&self, id: &str) -> Option<WireAsset> {
        self.state()
            .assets
            .iter()
            .find(|asset| asset.id.as_deref() == Some(id))
            .cloned()
    }

    pub fn asset_count(&self) -> usize {
        self.state().assets.len()
    }

    /// 收到的请求，格式 `METHOD /path`。
    pub fn requests(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// 匹配方法与路径前缀的请求数。
    pub fn count_requests(&self, method: &Method, path_prefix: &str) -> usize {
        let prefix = format!("{method} {path_prefix}");
        self.requests()
            .iter()
            .filter(|call| call.starts_with(&prefix))
            .count()
    }

    fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, request: ApiRequest) -> RawResponse {
        let path = request.path.trim_end_matches('/').to_string();
        let segments: Vec<&str> = path
            .strip_prefix("/api/")
            .unwrap_or("")
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let method = request.method.as_str();
        match (method, segments.as_slice()) {
            ("POST", ["login"]) => return self.login(&request),
            ("POST", ["register"]) => return self.register(&request),
            _ => {}
        }

        let Some(username) = self.authorized_user(&request) else {
            return respond(StatusCode::UNAUTHORIZED, json!("Authentication required"));
        };

        match (method, segments.as_slice()) {
            ("GET", ["health"]) => respond(StatusCode::OK, json!({ "status": "ok" })),
            ("GET", ["patrimony"]) => self.list_assets(&request),
            ("POST", ["patrimony"]) => self.create_asset(&request),
            ("GET", ["patrimony", id]) => self.get_asset(id),
            ("PUT", ["patrimony", id]) => self.update_asset(id, &request),
            ("DELETE", ["patrimony", id]) => self.delete_asset(id),
            ("POST", ["patrimony", id, "image"]) => self.upload(id, None, &request),
            ("POST", ["patrimony", id, "document", kind]) => {
                match DocumentKind::parse(kind) {
                    Some(kind) => self.upload(id, Some(kind), &request),
                    None => respond(StatusCode::BAD_REQUEST, json!("Invalid document type")),
                }
            }
            ("POST", ["transfer"]) => self.transfer(&username, &request),
            ("GET", ["transfers"]) => self.list_transfers(&request),
            ("GET", ["transfer", id]) => self.get_transfer(id),
            ("GET", ["stats"]) => self.stats(&request),
            _ => respond(StatusCode::NOT_FOUND, json!("Not found")),
        }
    }

    fn authorized_user(&self, request: &ApiRequest) -> Option<String> {
        let header = request.headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = header.strip_prefix("Bearer ")?;
        self.state().tokens.get(token).cloned()
    }

    fn login(&self, request: &ApiRequest) -> RawResponse {
        let login: LoginRequest = match parse_body(request) {
            Ok(login) => login,
            Err(response) => return response,
        };
        let mut state = self.state();
        let user = match state.users.get(&login.username) {
            Some((password, user)) if *password == login.password => user.clone(),
            _ => return respond(StatusCode::UNAUTHORIZED, json!("Invalid credentials")),
        };
        let token = uuid::Uuid::new_v4().to_string();
        state.tokens.insert(token.clone(), login.username);
        respond_with(StatusCode::OK, &LoginResponse { token, user })
    }

    fn register(&self, request: &ApiRequest) -> RawResponse {
        let register: RegisterRequest = match parse_body(request) {
            Ok(register) => register,
            Err(response) => return response,
        };
        let mut state = self.state();
        if state.users.contains_key(&register.username) {
            return respond(StatusCode::BAD_REQUEST, json!("Username already exists"));
        }
        let user = WireUser {
            id: Some(uuid::Uuid::new_v4().to_string()),
            username: register.username.clone(),
            role: Some(register.role.unwrap_or_else(|| "user".to_string())),
            department: register.department,
            company_name: register.company_name,
            email: register.email,
        };
        state
            .users
            .insert(register.username, (register.password, user.clone()));
        respond_with(StatusCode::CREATED, &user)
    }

    fn list_assets(&self, request: &ApiRequest) -> RawResponse {
        let department = request.query_value("department");
        let status = request.query_value("status");
        let plate = request.query_value("plate");
        let state = self.state();
        let items: Vec<&WireAsset> = state
            .assets
            .iter()
            .filter(|asset| department.is_none_or(|dept| asset.department == dept))
            .filter(|asset| status.is_none_or(|status| asset.status.as_deref() == Some(status)))
            .filter(|asset| plate.is_none_or(|plate| asset.plate.eq_ignore_ascii_case(plate)))
            .collect();
        respond_with(StatusCode::OK, &items)
    }

    fn get_asset(&self, id: &str) -> RawResponse {
        match self.asset(id) {
            Some(asset) => respond_with(StatusCode::OK, &asset),
            None => not_found(),
        }
    }

    fn create_asset(&self, request: &ApiRequest) -> RawResponse {
        let payload: AssetPayload = match parse_body(request) {
            Ok(payload) => payload,
            Err(response) => return response,
        };
        let mut state = self.state();
        if state
            .assets
            .iter()
            .any(|asset| asset.plate.eq_ignore_ascii_case(&payload.plate))
        {
            return respond(StatusCode::BAD_REQUEST, json!("Plate already exists"));
        }
        let mut asset = WireAsset {
            id: Some(uuid::Uuid::new_v4().to_string()),
            created_at: Some(Utc::now().to_rfc3339()),
            ..WireAsset::default()
        };
        apply_payload(&mut asset, payload);
        state.assets.push(asset.clone());
        respond_with(StatusCode::CREATED, &asset)
    }

    fn update_asset(&self, id: &str, request: &ApiRequest) -> RawResponse {
        let payload: AssetPayload = match parse_body(request) {
            Ok(payload) => payload,
            Err(response) => return response,
        };
        let mut state = self.state();
        if state.assets.iter().any(|asset| {
            asset.id.as_deref() != Some(id) && asset.plate.eq_ignore_ascii_case(&payload.plate)
        }) {
            return respond(StatusCode::BAD_REQUEST, json!("Plate already exists"));
        }
        let Some(asset) = state
            .assets
            .iter_mut()
            .find(|asset| asset.id.as_deref() == Some(id))
        else {
            return not_found();
        };
        apply_payload(asset, payload);
        asset.updated_at = Some(Utc::now().to_rfc3339());
        let asset = asset.clone();
        respond_with(StatusCode::OK, &asset)
    }

    fn delete_asset(&self, id: &str) -> RawResponse {
        let mut state = self.state();
        let before = state.assets.len();
        state.assets.retain(|asset| asset.id.as_deref() != Some(id));
        if state.assets.len() == before {
            return not_found();
        }
        respond(
            StatusCode::OK,
            json!({ "message": "Patrimony deleted successfully" }),
        )
    }

    fn upload(&self, id: &str, kind: Option<DocumentKind>, request: &ApiRequest) -> RawResponse {
        let expected_field = if kind.is_some() { "document" } else { "image" };
        let RequestBody::Multipart(field) = &request.body else {
            return respond(StatusCode::BAD_REQUEST, json!("Expected multipart body"));
        };
        if field.name != expected_field || field.file.bytes.is_empty() {
            return respond(StatusCode::BAD_REQUEST, json!("No file provided"));
        }
        if self.fail_uploads.load(Ordering::SeqCst) {
            return respond(StatusCode::INTERNAL_SERVER_ERROR, json!("Error saving file"));
        }
        let mut state = self.state();
        let Some(asset) = state
            .assets
            .iter_mut()
            .find(|asset| asset.id.as_deref() == Some(id))
        else {
            return not_found();
        };
        let stored = format!("{}_{}", uuid::Uuid::new_v4(), field.file.file_name);
        match kind {
            None => {
                let url = format!("/uploads/{stored}");
                asset.image_url = Some(url.clone());
                respond(
                    StatusCode::OK,
                    json!({ "message": "Image uploaded successfully", "image_url": url }),
                )
            }
            Some(kind) => {
                let url = format!("/documents/{stored}");
                let slot = match kind {
                    DocumentKind::Invoice => &mut asset.invoice_file,
                    DocumentKind::Commitment => &mut asset.commitment_file,
                    DocumentKind::DenfSe => &mut asset.denf_se_file,
                };
                *slot = Some(url.clone());
                respond(
                    StatusCode::OK,
                    json!({ "message": "Document uploaded successfully", "document_url": url }),
                )
            }
        }
    }

    fn transfer(&self, username: &str, request: &ApiRequest) -> RawResponse {
        let payload: TransferPayload = match parse_body(request) {
            Ok(payload) => payload,
            Err(response) => return response,
        };
        if Department::parse(&payload.to_department).is_none() {
            return respond(StatusCode::BAD_REQUEST, json!("Invalid department"));
        }
        let mut state = self.state();
        let Some(asset) = state
            .assets
            .iter_mut()
            .find(|asset| asset.id.as_deref() == Some(payload.patrimony_id.as_str()))
        else {
            return not_found();
        };
        if asset.department == payload.to_department {
            return respond(
                StatusCode::BAD_REQUEST,
                json!("Patrimony is already in this department"),
            );
        }
        let from_department = std::mem::replace(&mut asset.department, payload.to_department.clone());
        asset.updated_at = Some(Utc::now().to_rfc3339());
        let transfer = WireTransfer {
            id: Some(uuid::Uuid::new_v4().to_string()),
            patrimony_id: Some(payload.patrimony_id),
            patrimony_name: Some(asset.name.clone()),
            from_department,
            to_department: payload.to_department,
            reason: payload.reason,
            transferred_by_name: Some(username.to_string()),
            transferred_at: Some(Utc::now().to_rfc3339()),
        };
        state.transfers.insert(0, transfer.clone());
        respond_with(StatusCode::CREATED, &transfer)
    }

    fn list_transfers(&self, request: &ApiRequest) -> RawResponse {
        let asset_id = request.query_value("patrimony_id");
        let state = self.state();
        let items: Vec<&WireTransfer> = state
            .transfers
            .iter()
            .filter(|transfer| {
                asset_id.is_none_or(|id| transfer.patrimony_id.as_deref() == Some(id))
            })
            .collect();
        respond_with(StatusCode::OK, &items)
    }

    fn get_transfer(&self, id: &str) -> RawResponse {
        let state = self.state();
        match state
            .transfers
            .iter()
            .find(|transfer| transfer.id.as_deref() == Some(id))
        {
            Some(transfer) => respond_with(StatusCode::OK, transfer),
            None => respond(StatusCode::NOT_FOUND, json!("Transfer not found")),
        }
    }

    fn stats(&self, request: &ApiRequest) -> RawResponse {
        let department = request.query_value("department");
        let state = self.state();
        let assets: Vec<&WireAsset> = state
            .assets
            .iter()
            .filter(|asset| department.is_none_or(|dept| asset.department == dept))
            .collect();

        let count_status = |status: AssetStatus| {
            assets
                .iter()
                .filter(|asset| asset_status(asset) == status)
                .count() as u64
        };
        let by_department = Department::ALL
            .iter()
            .filter_map(|dept| {
                let members: Vec<&&WireAsset> = assets
                    .iter()
                    .filter(|asset| asset.department == dept.as_str())
                    .collect();
                if members.is_empty() {
                    return None;
                }
                Some(DepartmentStats {
                    department: dept.as_str().to_string(),
                    count: members.len() as u64,
                    total_value: Some(members.iter().filter_map(|asset| asset.value).sum()),
                })
            })
            .collect();
        let snapshot = StatsSnapshot {
            total: assets.len() as u64,
            active: count_status(AssetStatus::Active),
            inactive: count_status(AssetStatus::Inactive),
            maintenance: count_status(AssetStatus::Maintenance),
            written_off: count_status(AssetStatus::WrittenOff),
            total_value: assets.iter().filter_map(|asset| asset.value).sum(),
            by_department,
        };
        respond_with(StatusCode::OK, &WireStats::from(&snapshot))
    }
}

#[async_trait]
impl Transport for InMemoryBackend {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{} {}", request.method, request.path));
        if self.offline.load(Ordering::SeqCst) {
            return Err(TransportError::Connect("connection refused".to_string()));
        }
        Ok(self.handle(request))
    }
}

fn apply_payload(asset: &mut WireAsset, payload: AssetPayload) {
    asset.plate = payload.plate;
    asset.name = payload.name;
    asset.description = Some(payload.description);
    asset.acquisition_date = payload.acquisition_date;
    asset.value = Some(payload.value);
    asset.department = payload.department;
    asset.status = Some(payload.status);
    asset.invoice_number = payload.invoice_number;
    asset.commitment_number = payload.commitment_number;
    asset.denf_se_number = payload.denf_se_number;
}

fn asset_status(asset: &WireAsset) -> AssetStatus {
    asset
        .status
        .as_deref()
        .and_then(AssetStatus::parse)
        .unwrap_or_default()
}

fn parse_body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, RawResponse> {
    match &request.body {
        RequestBody::Json(value) => serde_json::from_value(value.clone())
            .map_err(|_| respond(StatusCode::BAD_REQUEST, json!("Invalid request body"))),
        _ => Err(respond(StatusCode::BAD_REQUEST, json!("Expected JSON body"))),
    }
}

fn respond(status: StatusCode, value: Value) -> RawResponse {
    RawResponse::json(status, &value)
}

fn respond_with<T: serde::Serialize>(status: StatusCode, value: &T) -> RawResponse {
    match serde_json::to_value(value) {
        Ok(value) => respond(status, value),
        Err(err) => respond(StatusCode::INTERNAL_SERVER_ERROR, json!(err.to_string())),
    }
}

fn not_found() -> RawResponse {
    respond(StatusCode::NOT_FOUND, json!("Patrimony not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_contract::normalize_image_url;

    #[test]
    fn relative_upload_reference_is_normalizable() {
        let backend = InMemoryBackend::with_default_admin();
        let id = backend.insert_asset(WireAsset {
            plate: "P-1".to_string(),
            name: "Desk".to_string(),
            department: "health".to_string(),
            image_url: Some("/uploads/desk.png".to_string()),
            ..WireAsset::default()
        });
        let asset = backend.asset(&id).expect("asset");
        assert_eq!(
            normalize_image_url(asset.image_url.as_deref(), "http://files.local/"),
            Some("http://files.local/uploads/desk.png".to_string())
        );
    }

    #[test]
    fn tokens_are_issued_only_for_known_users() {
        let backend = InMemoryBackend::with_default_admin();
        assert!(backend.issue_token("admin").is_some());
        assert!(backend.issue_token("ghost").is_none());
    }
}
